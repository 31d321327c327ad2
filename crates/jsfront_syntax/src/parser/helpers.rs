/// Token-stream helpers and semicolon insertion.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `advance`), skipping trivia
/// - Matching / expecting keywords and operators
/// - Checkpoint / restore for backtracking
/// - Automatic semicolon insertion (`semicolon`)
impl<'a> Parser<'a> {
    // ========================================================================
    // Cursor
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Return the current token without consuming it.
    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    /// Return the significant token after the current one without consuming anything.
    fn peek_next(&self) -> &Token {
        self.tokens
            .iter()
            .skip(self.pos + 1)
            .find(|t| !t.is_trivia())
            .unwrap_or(&self.eof)
    }

    /// Advance past the current token (and any trivia after it) and return the token consumed.
    fn advance(&mut self) -> &Token {
        let at = self.pos;
        if !self.is_at_end() {
            self.prev_end = self.peek().span.end;
            self.pos += 1;
            self.skip_trivia();
        }
        self.tokens.get(at).unwrap_or(&self.eof)
    }

    fn skip_trivia(&mut self) {
        while self.tokens.get(self.pos).is_some_and(|t| t.is_trivia()) {
            self.pos += 1;
        }
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            prev_end: self.prev_end,
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        tracing::trace!(from = self.pos, to = checkpoint.pos, "parser backtrack");
        self.pos = checkpoint.pos;
        self.prev_end = checkpoint.prev_end;
    }

    /// Start offset of the current token.
    fn start(&self) -> usize {
        self.peek().span.start
    }

    /// Span from `start` to the end of the last consumed token.
    fn finish(&self, start: usize) -> Span {
        Span::new(start, self.prev_end.max(start))
    }

    /// Return `true` if a `NewLine` token sits between the previous significant token and the current one.
    fn newline_before(&self) -> bool {
        self.tokens[..self.pos.min(self.tokens.len())]
            .iter()
            .rev()
            .take_while(|t| t.is_trivia())
            .any(|t| t.kind == TokenKind::NewLine || (t.kind == TokenKind::Comment && t.value.contains('\n')))
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// Return `true` if the current token is the given keyword.
    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    /// Return `true` if the current token is the given operator.
    fn check_op(&self, id: OperatorId) -> bool {
        self.peek().kind.is_operator(id)
    }

    fn check_identifier(&self) -> bool {
        self.peek().kind == TokenKind::Identifier
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_op(&mut self, id: OperatorId) -> bool {
        if self.check_op(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, id: KeywordId) -> Result<&Token, ParseError> {
        if self.check_keyword(id) {
            Ok(self.advance())
        } else {
            Err(self.unexpected())
        }
    }

    fn expect_op(&mut self, id: OperatorId) -> Result<&Token, ParseError> {
        if self.check_op(id) {
            Ok(self.advance())
        } else {
            Err(self.unexpected())
        }
    }

    /// The generic error for the current token.
    fn unexpected(&self) -> ParseError {
        ParseError::unexpected(self.peek())
    }

    // ========================================================================
    // Statement termination
    // ========================================================================

    /// Accept a statement terminator.
    ///
    /// ## Notes
    /// - `}` and EOF terminate implicitly and are not consumed.
    /// - A run of `;` is consumed whole.
    /// - Otherwise the raw stream before the cursor is scanned backward for a `;` or a `NewLine`. Finding one
    ///   accepts the statement as terminated; the scan is not limited to the tokens since the previous statement.
    fn semicolon(&mut self) -> Result<(), ParseError> {
        if self.is_at_end() || self.check_op(OperatorId::RBrace) {
            return Ok(());
        }
        if self.check_op(OperatorId::Semicolon) {
            while self.match_op(OperatorId::Semicolon) {}
            return Ok(());
        }

        let before = &self.tokens[..self.pos.min(self.tokens.len())];
        if before
            .iter()
            .rev()
            .any(|t| t.kind == TokenKind::NewLine || t.kind.is_operator(OperatorId::Semicolon))
        {
            tracing::trace!(at = self.start(), "automatic semicolon insertion");
            return Ok(());
        }
        Err(self.unexpected())
    }
}
