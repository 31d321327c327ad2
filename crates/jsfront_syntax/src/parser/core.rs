/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type, its options and its top-level `parse_program()` entrypoint.
/// It also contains the small internal helper types shared across the other parser chunks.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single "god file".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Accept `return` at the top level of the program.
    pub allow_return_outside_function: bool,
    /// Recorded on the resulting `Program` node.
    pub source_type: SourceType,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_allow_return_outside_function(mut self, allow: bool) -> Self {
        self.allow_return_outside_function = allow;
        self
    }

    pub fn with_source_type(mut self, source_type: SourceType) -> Self {
        self.source_type = source_type;
        self
    }
}

/// Which jump statements are legal at the current position.
///
/// Threaded by value through every statement-parsing call; nested blocks inherit it, loops and switches widen it,
/// function bodies reset it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct StatementContext {
    allow_return: bool,
    allow_break: bool,
    allow_continue: bool,
}

impl StatementContext {
    fn function_body() -> Self {
        Self {
            allow_return: true,
            ..Self::default()
        }
    }

    fn in_loop(self) -> Self {
        Self {
            allow_break: true,
            allow_continue: true,
            ..self
        }
    }

    fn in_switch(self) -> Self {
        Self {
            allow_break: true,
            ..self
        }
    }
}

/// Saved cursor for backtracking. Restoring one discards everything parsed since.
#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    pos: usize,
    prev_end: usize,
}

/// Parser state.
///
/// ## Notes
/// - The cursor (`pos`) always rests on a significant token: trivia is skipped on every advance, so grammar
///   rules never see comments, whitespace or newlines. Only the ASI rule looks at the raw stream.
/// - Parsing stops at the first error. There is no recovery.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    /// End offset of the last consumed significant token; closes node spans.
    prev_end: usize,
    /// Returned by `peek` past the end of a stream that lacks its own EOF token.
    eof: Token,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by [`crate::lexer::tokenize`] (trivia included).
    pub fn new(tokens: &'a [Token]) -> Self {
        Self::with_options(tokens, ParseOptions::default())
    }

    pub fn with_options(tokens: &'a [Token], options: ParseOptions) -> Self {
        let eof = match tokens.last() {
            Some(last) if last.kind == TokenKind::Eof => last.clone(),
            Some(last) => {
                let mut eof = Token::eof(last.span.end);
                let p = last.position;
                eof.position = Position::new(p.end_line, p.end_column, p.end_line, p.end_column);
                eof
            }
            None => Token::eof(0),
        };

        let mut parser = Self {
            tokens,
            pos: 0,
            prev_end: 0,
            eof,
            options,
        };
        parser.skip_trivia();
        parser
    }

    /// Parse the entire token stream into a `Program` node.
    ///
    /// ## Errors
    /// Returns the first [`ParseError`] encountered.
    pub fn parse_program(mut self) -> Result<Node, ParseError> {
        let ctx = StatementContext {
            allow_return: self.options.allow_return_outside_function,
            ..StatementContext::default()
        };

        let mut body = Vec::new();
        while !self.is_at_end() {
            body.push(self.statement(ctx)?);
        }

        let end = self.tokens.last().map(|t| t.span.end).unwrap_or(0);
        Ok(Node::Program(Program {
            span: Span::new(0, end),
            body,
            source_type: self.options.source_type,
        }))
    }
}
