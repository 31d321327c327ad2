//! Tokenizer for the JavaScript-like source language.
//!
//! Handles tokenization including:
//! - Comments, newline runs and whitespace runs (kept in the stream as trivia)
//! - String, template (with `${ ... }` quasics) and regex literals
//! - Greedy compound operators with binary/assignment/update classification
//! - Numbers (decimal with optional fraction, `0x` hex), identifiers, keywords and `true`/`false`/`null`
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token, TokenFlags, Position, Quasic)
//! - `strings` - Quoted string, template and regex scanning (backslash-run parity)
//! - `positions` - Line/column post-pass
//!
//! ## Notes
//! - The tokenizer never fails. Malformed input (an unterminated string, comment or regex) degrades to a token that
//!   runs as far as the scan got; rejecting it is the parser's job.
//! - All structural characters are ASCII, so the scanner works on bytes and only ever slices the source at ASCII
//!   positions or at the end of the range.

mod positions;
mod strings;
pub mod tokens;

pub use positions::fill_positions;
pub use tokens::{Position, Quasic, Token, TokenFlags, TokenKind, keyword_id};

use crate::ast::Span;
use jsfront_core::lang::chars;
use jsfront_core::lang::keywords::KeywordId;
use jsfront_core::lang::operators::{self, OperatorId};
use jsfront_core::lang::specials;

// ============================================================================
// OPTIONS
// ============================================================================

/// Tokenizer configuration.
///
/// ## Notes
/// - With `keep_trivia` off, comments, whitespace and newlines are still scanned (newlines drive regex detection)
///   but are not returned. Positions are unaffected.
/// - The parser's ASI rule needs `NewLine` tokens, so parse from a trivia-keeping stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerOptions {
    pub keep_trivia: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self { keep_trivia: true }
    }
}

impl TokenizerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keep_trivia(mut self, keep_trivia: bool) -> Self {
        self.keep_trivia = keep_trivia;
        self
    }
}

// ============================================================================
// TOKENIZER STATE
// ============================================================================

/// Single-pass scanner over a source range.
///
/// The state carried between calls is the cursor, the kind/flags of the last significant token and the stack of open
/// parentheses. Together they decide whether a `/` starts a regex literal or is a division operator.
pub struct Tokenizer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    index: usize,
    /// Exclusive end of the scanned range (a sub-range for template quasics).
    end: usize,
    last_token: Option<(TokenKind, TokenFlags)>,
    /// One entry per open `(`: `true` when it opened an `if`/`while`/`for`/`with` head.
    paren_heads: Vec<bool>,
    /// A `/` at the cursor would open a regex.
    regex_allowed: bool,
    options: TokenizerOptions,
    /// Set once the iterator has yielded EOF.
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer over the whole source.
    pub fn new(source: &'a str) -> Self {
        Self::with_options(source, TokenizerOptions::default())
    }

    pub fn with_options(source: &'a str, options: TokenizerOptions) -> Self {
        Self::over_range(source, 0, source.len(), options)
    }

    /// Create a tokenizer over `source[start..end]` that reports absolute offsets.
    fn over_range(source: &'a str, start: usize, end: usize, options: TokenizerOptions) -> Self {
        let end = end.min(source.len());
        Self {
            source,
            bytes: source.as_bytes(),
            index: start.min(end),
            end,
            last_token: None,
            paren_heads: Vec::new(),
            regex_allowed: true,
            options,
            finished: false,
        }
    }

    /// Return the next token.
    ///
    /// Once the range is exhausted every call returns a zero-width `Eof` token at the end of the range.
    pub fn next_token(&mut self) -> Token {
        loop {
            let token = self.scan_token();
            if !self.options.keep_trivia && is_trivia(token.kind) {
                continue;
            }
            return token;
        }
    }

    /// Drain the tokenizer up to (not including) EOF.
    fn collect_significant(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            if token.kind == TokenKind::Eof {
                return tokens;
            }
            tokens.push(token);
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn peek_at(&self, offset: usize) -> Option<u8> {
        let at = self.index + offset;
        if at < self.end { Some(self.bytes[at]) } else { None }
    }

    fn match_byte(&mut self, expected: u8) -> bool {
        if self.peek_at(0) == Some(expected) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn advance_while(&mut self, pred: impl Fn(u8) -> bool) {
        while self.index < self.end && pred(self.bytes[self.index]) {
            self.index += 1;
        }
    }

    fn make_token(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(kind, Span::new(start, self.index), &self.source[start..self.index])
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) -> Token {
        if self.index >= self.end {
            return Token::eof(self.end);
        }

        let start = self.index;
        let b = self.bytes[start];

        let token = if b == b'/' && matches!(self.peek_at(1), Some(b'/') | Some(b'*')) {
            self.scan_comment(start)
        } else if chars::is_line_break(b) {
            self.advance_while(chars::is_line_break);
            self.make_token(TokenKind::NewLine, start)
        } else if chars::is_space(b) {
            self.advance_while(chars::is_space);
            self.make_token(TokenKind::WhiteSpace, start)
        } else if b == b'`' {
            self.scan_template(start)
        } else if b == b'"' || b == b'\'' {
            self.scan_quoted(start, b)
        } else if let Some(regex) = self.try_scan_regex(start) {
            regex
        } else if let Some(op) = self.scan_operator(start) {
            op
        } else if b.is_ascii_digit() {
            self.scan_number(start)
        } else {
            self.scan_word(start)
        };

        if !matches!(token.kind, TokenKind::WhiteSpace | TokenKind::Comment) {
            self.note_significant(&token);
        }
        token
    }

    /// Record `token` as the last significant token and decide whether a following `/` opens a regex.
    ///
    /// ## Notes
    /// - At the start of the range (no previous token) a regex is allowed.
    /// - `]` and the `)` of a call or grouping close an operand, so a `/` after them is division.
    /// - The `)` closing an `if`/`while`/`for`/`with` head leaves the scanner at the start of a statement, where a
    ///   `/` opens a regex.
    fn note_significant(&mut self, token: &Token) {
        self.regex_allowed = match token.kind {
            TokenKind::Operator(OperatorId::LParen) => {
                let opens_head = matches!(
                    self.last_token,
                    Some((
                        TokenKind::Keyword(KeywordId::If | KeywordId::While | KeywordId::For | KeywordId::With),
                        _
                    ))
                );
                self.paren_heads.push(opens_head);
                true
            }
            TokenKind::Operator(OperatorId::RParen) => self.paren_heads.pop().unwrap_or(false),
            TokenKind::Operator(OperatorId::RBracket) => false,
            TokenKind::Operator(_) | TokenKind::NewLine => true,
            _ => token.flags.is_operator_like(),
        };
        self.last_token = Some((token.kind, token.flags));
    }

    fn try_scan_regex(&mut self, start: usize) -> Option<Token> {
        if self.bytes[start] != b'/' || !self.regex_allowed {
            return None;
        }
        self.scan_regex(start)
    }

    // ========================================================================
    // Comments
    // ========================================================================

    fn scan_comment(&mut self, start: usize) -> Token {
        self.index = start + 2;
        let multiline = self.bytes[start + 1] == b'*';
        if multiline {
            loop {
                if self.index >= self.end {
                    break;
                }
                if self.bytes[self.index] == b'*' && self.peek_at(1) == Some(b'/') {
                    self.index += 2;
                    break;
                }
                self.index += 1;
            }
        } else {
            self.advance_while(|b| !chars::is_line_break(b));
        }
        let mut token = self.make_token(TokenKind::Comment, start);
        token.flags.is_multiline = multiline;
        token
    }

    // ========================================================================
    // Operators
    // ========================================================================

    /// Scan the longest operator starting at `start`.
    fn scan_operator(&mut self, start: usize) -> Option<Token> {
        let b = self.bytes[start];
        if !chars::is_operator_char(b) {
            return None;
        }
        self.index = start + 1;

        let id = match b {
            b'=' => {
                if self.match_byte(b'=') {
                    if self.match_byte(b'=') { OperatorId::EqEqEq } else { OperatorId::EqEq }
                } else {
                    OperatorId::Eq
                }
            }
            b'+' => self.compound(OperatorId::Plus, &[(b'+', OperatorId::PlusPlus), (b'=', OperatorId::PlusEq)]),
            b'-' => self.compound(
                OperatorId::Minus,
                &[(b'-', OperatorId::MinusMinus), (b'=', OperatorId::MinusEq)],
            ),
            b'*' => self.compound(OperatorId::Star, &[(b'=', OperatorId::StarEq)]),
            b'/' => self.compound(OperatorId::Slash, &[(b'=', OperatorId::SlashEq)]),
            b'^' => self.compound(OperatorId::Caret, &[(b'=', OperatorId::CaretEq)]),
            b'%' => self.compound(OperatorId::Percent, &[(b'=', OperatorId::PercentEq)]),
            b'!' => {
                if self.match_byte(b'=') {
                    if self.match_byte(b'=') { OperatorId::BangEqEq } else { OperatorId::BangEq }
                } else {
                    OperatorId::Bang
                }
            }
            b'&' => {
                if self.match_byte(b'&') {
                    if self.match_byte(b'=') { OperatorId::AmpAmpEq } else { OperatorId::AmpAmp }
                } else {
                    self.compound(OperatorId::Amp, &[(b'=', OperatorId::AmpEq)])
                }
            }
            b'|' => {
                if self.match_byte(b'|') {
                    if self.match_byte(b'=') { OperatorId::PipePipeEq } else { OperatorId::PipePipe }
                } else {
                    self.compound(OperatorId::Pipe, &[(b'=', OperatorId::PipeEq)])
                }
            }
            b'<' => {
                if self.match_byte(b'<') {
                    if self.match_byte(b'=') { OperatorId::LtLtEq } else { OperatorId::LtLt }
                } else {
                    self.compound(OperatorId::Lt, &[(b'=', OperatorId::LtEq)])
                }
            }
            b'>' => {
                if self.match_byte(b'>') {
                    if self.match_byte(b'>') {
                        self.compound(OperatorId::GtGtGt, &[(b'=', OperatorId::GtGtGtEq)])
                    } else {
                        self.compound(OperatorId::GtGt, &[(b'=', OperatorId::GtGtEq)])
                    }
                } else {
                    self.compound(OperatorId::Gt, &[(b'=', OperatorId::GtEq)])
                }
            }
            _ => operators::from_str(&self.source[start..start + 1])?,
        };

        Some(Token::new(TokenKind::Operator(id), Span::new(start, self.index), operators::as_str(id))
            .with_flags(TokenFlags::for_operator(id)))
    }

    /// Try to match a compound continuation, fallback to simple.
    fn compound(&mut self, simple: OperatorId, compounds: &[(u8, OperatorId)]) -> OperatorId {
        for (b, id) in compounds {
            if self.match_byte(*b) {
                return *id;
            }
        }
        simple
    }

    // ========================================================================
    // Numbers, identifiers, keywords
    // ========================================================================

    fn scan_number(&mut self, start: usize) -> Token {
        self.index = start;
        if self.bytes[start] == b'0' && matches!(self.peek_at(1), Some(b'x') | Some(b'X')) {
            self.index += 2;
            self.advance_while(|b| b.is_ascii_hexdigit());
        } else {
            self.advance_while(|b| b.is_ascii_digit());
            if self.match_byte(b'.') {
                self.advance_while(|b| b.is_ascii_digit());
            }
        }
        self.make_token(TokenKind::Number, start)
    }

    fn scan_word(&mut self, start: usize) -> Token {
        self.index = start + 1;
        self.advance_while(chars::is_identifier_char);
        // Keep the cursor on a char boundary even for a lone stray byte.
        while !self.source.is_char_boundary(self.index) {
            self.index += 1;
        }

        let spelling = &self.source[start..self.index];
        let span = Span::new(start, self.index);

        if let Some(id) = keyword_id(spelling) {
            let mut token = Token::new(TokenKind::Keyword(id), span, spelling);
            if matches!(id, KeywordId::In | KeywordId::Instanceof) {
                let op = if id == KeywordId::In { OperatorId::In } else { OperatorId::Instanceof };
                token.flags = TokenFlags::for_operator(op);
            }
            return token;
        }
        if let Some(id) = specials::from_str(spelling) {
            return Token::new(TokenKind::Special(id), span, spelling);
        }
        Token::new(TokenKind::Identifier, span, spelling)
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    /// Yield tokens in source order, ending after the first `Eof`.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.finished = true;
        }
        Some(token)
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Return `true` for comments, newlines and whitespace.
pub fn is_trivia(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::Comment | TokenKind::NewLine | TokenKind::WhiteSpace)
}

/// Tokenize a whole source string.
///
/// The result always ends with exactly one `Eof` token, and every token has its line/column position filled.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn tokenize(source: &str) -> Vec<Token> {
    tokenize_with(source, TokenizerOptions::default())
}

/// Tokenize with explicit options.
pub fn tokenize_with(source: &str, options: TokenizerOptions) -> Vec<Token> {
    let mut tokens: Vec<Token> = Tokenizer::with_options(source, options).collect();
    fill_positions(source, &mut tokens);
    tracing::debug!(token_count = tokens.len(), "tokenized source");
    tokens
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use jsfront_core::lang::keywords::{self, KeywordId};
    use jsfront_core::lang::specials::SpecialId;

    fn significant(source: &str) -> Vec<Token> {
        tokenize(source).into_iter().filter(|t| !is_trivia(t.kind)).collect()
    }

    #[test]
    fn test_keyword_registry_parity() {
        for k in keywords::KEYWORDS {
            let tokens = significant(k.canonical);
            assert_eq!(tokens.len(), 2, "expected keyword + EOF for {:?}, got {:?}", k.id, tokens);
            assert!(tokens[0].kind.is_keyword(k.id));
            assert!(matches!(tokens[1].kind, TokenKind::Eof));
        }
    }

    #[test]
    fn test_operator_registry_parity() {
        for o in operators::OPERATORS {
            let tokens = significant(o.spelling);
            assert_eq!(tokens.len(), 2, "expected operator + EOF for {:?}, got {:?}", o.spelling, tokens);
            if o.is_keyword_spelling {
                assert!(matches!(tokens[0].kind, TokenKind::Keyword(_)));
                assert!(tokens[0].flags.is_binary);
            } else if o.id == OperatorId::Slash || o.id == OperatorId::SlashEq {
                // A leading `/` is in regex position, but without a closing `/` it falls back to the operator.
                assert!(tokens[0].kind.is_operator(o.id));
            } else {
                assert!(tokens[0].kind.is_operator(o.id), "{:?} lexed as {:?}", o.spelling, tokens[0].kind);
            }
            assert_eq!(tokens[0].flags.precedence, o.precedence);
        }
    }

    #[test]
    fn test_operator_flags_are_exclusive() {
        for token in significant("a = b += c ++ d && e ||= f >>>= g >>> h") {
            if let TokenKind::Operator(_) = token.kind {
                let set = [token.flags.is_assignment, token.flags.is_update, token.flags.is_binary]
                    .iter()
                    .filter(|f| **f)
                    .count();
                assert_eq!(set, 1, "{} must carry exactly one class", token.value);
            }
        }
    }

    #[test]
    fn test_greedy_operators() {
        let tokens = significant("a>>>=b!==c&&=d");
        let ops: Vec<&str> = tokens
            .iter()
            .filter(|t| matches!(t.kind, TokenKind::Operator(_)))
            .map(|t| t.value.as_str())
            .collect();
        assert_eq!(ops, vec![">>>=", "!==", "&&="]);
    }

    #[test]
    fn test_division_after_identifier() {
        let tokens = significant("a / b");
        assert!(tokens[1].kind.is_operator(OperatorId::Slash));
        assert_eq!(tokens[1].flags.precedence, Some(13));
    }

    #[test]
    fn test_regex_after_assignment() {
        let tokens = significant("x = /ab/; ");
        assert_eq!(tokens[2].kind, TokenKind::Regex);
        assert_eq!(tokens[2].value, "/ab/");
        assert!(tokens[2].flags.is_regex);
    }

    #[test]
    fn test_regex_flags_and_escaped_slash() {
        let tokens = significant(r"r = /a\/b/gi.test(s)");
        assert_eq!(tokens[2].kind, TokenKind::Regex);
        assert_eq!(tokens[2].value, r"/a\/b/gi");
    }

    #[test]
    fn test_unterminated_regex_falls_back_to_division() {
        let tokens = significant("x = / 2\n");
        assert!(tokens[2].kind.is_operator(OperatorId::Slash));
    }

    #[test]
    fn test_division_after_closing_paren() {
        let tokens = significant("(a) / b / c");
        assert!(tokens[3].kind.is_operator(OperatorId::Slash));
        assert!(tokens[5].kind.is_operator(OperatorId::Slash));
    }

    #[test]
    fn test_division_after_closing_bracket_and_call() {
        let tokens = significant("a[0] / 2 / f(x) / 3");
        let slashes = tokens.iter().filter(|t| t.kind.is_operator(OperatorId::Slash)).count();
        assert_eq!(slashes, 3);
        assert!(tokens.iter().all(|t| t.kind != TokenKind::Regex));
    }

    #[test]
    fn test_regex_after_control_head() {
        for source in ["if (x) /ab/.test(s);", "while (f(a)) /b/g.exec(s)", "for (;;) /c/;"] {
            let regexes: Vec<String> = significant(source)
                .into_iter()
                .filter(|t| t.kind == TokenKind::Regex)
                .map(|t| t.value)
                .collect();
            assert_eq!(regexes.len(), 1, "{source}: {regexes:?}");
        }
        let tokens = significant("if ((a) / b) c");
        assert!(tokens[5].kind.is_operator(OperatorId::Slash));
    }

    #[test]
    fn test_comment_does_not_change_regex_context() {
        let tokens = significant("x = /* c */ /ab/;");
        assert_eq!(tokens[2].kind, TokenKind::Regex);
        assert_eq!(tokens[2].value, "/ab/");

        let tokens = significant("a /* c */ / b");
        assert!(tokens[1].kind.is_operator(OperatorId::Slash));

        let tokens = significant("x = a // note\n/re/.test(s)");
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Regex && t.value == "/re/"));
    }

    #[test]
    fn test_regex_after_in_keyword() {
        let tokens = significant("k in /x/");
        assert_eq!(tokens[2].kind, TokenKind::Regex);
    }

    #[test]
    fn test_escaped_quote_stays_in_string() {
        let source = "\"a\\\"b\"";
        let tokens = significant(source);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].value, source);
    }

    #[test]
    fn test_even_backslash_run_closes_string() {
        let tokens = significant(r#"'a\\' + b"#);
        assert_eq!(tokens[0].value, r#"'a\\'"#);
        assert!(tokens[1].kind.is_operator(OperatorId::Plus));
    }

    #[test]
    fn test_unterminated_string_stops_at_newline() {
        let tokens = tokenize("'abc\nx");
        assert_eq!(tokens[0].value, "'abc");
        assert_eq!(tokens[1].kind, TokenKind::NewLine);
        assert_eq!(tokens[2].value, "x");
    }

    #[test]
    fn test_template_quasics() {
        let source = "`a ${b + c} d ${e}`";
        let tokens = significant(source);
        assert_eq!(tokens.len(), 2);
        let template = &tokens[0];
        assert!(template.flags.is_template);
        assert_eq!(template.value, source);
        assert_eq!(template.quasics.len(), 2);

        let first = &template.quasics[0];
        assert_eq!(&source[first.span.start..first.span.end], "${b + c}");
        let values: Vec<&str> = first.tokens.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, vec!["b", " ", "+", " ", "c"]);
        assert_eq!(first.tokens[0].span.start, source.find('b').unwrap());
    }

    #[test]
    fn test_escaped_template_placeholder_is_text() {
        let tokens = significant(r"`\${a}`");
        assert!(tokens[0].quasics.is_empty());
    }

    #[test]
    fn test_comments() {
        let tokens = tokenize("// line\n/* block\n */x");
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert!(!tokens[0].flags.is_multiline);
        assert_eq!(tokens[1].kind, TokenKind::NewLine);
        assert_eq!(tokens[2].kind, TokenKind::Comment);
        assert!(tokens[2].flags.is_multiline);
        assert_eq!(tokens[2].value, "/* block\n */");
        assert_eq!(tokens[3].value, "x");
    }

    #[test]
    fn test_numbers() {
        let tokens = significant("42 3.14 0xFF");
        let values: Vec<&str> = tokens.iter().take(3).map(|t| t.value.as_str()).collect();
        assert_eq!(values, vec!["42", "3.14", "0xFF"]);
        assert!(tokens.iter().take(3).all(|t| t.kind == TokenKind::Number));
    }

    #[test]
    fn test_specials_and_identifiers() {
        let tokens = significant("true null foo $bar _9 instanceof");
        assert_eq!(tokens[0].kind, TokenKind::Special(SpecialId::True));
        assert_eq!(tokens[1].kind, TokenKind::Special(SpecialId::Null));
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
        assert_eq!(tokens[3].value, "$bar");
        assert_eq!(tokens[4].value, "_9");
        assert!(tokens[5].kind.is_keyword(KeywordId::Instanceof));
        assert_eq!(tokens[5].flags.precedence, Some(10));
    }

    #[test]
    fn test_non_ascii_identifier() {
        let tokens = significant("π = 1");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].value, "π");
    }

    #[test]
    fn test_eof_is_idempotent() {
        let mut tokenizer = Tokenizer::new("a");
        assert_eq!(tokenizer.next_token().value, "a");
        for _ in 0..3 {
            let token = tokenizer.next_token();
            assert_eq!(token.kind, TokenKind::Eof);
            assert_eq!(token.span, Span::new(1, 1));
        }
    }

    #[test]
    fn test_iterator_ends_after_eof() {
        let kinds: Vec<TokenKind> = Tokenizer::new("a b").map(|t| t.kind).collect();
        assert_eq!(kinds.len(), 4);
        assert_eq!(kinds.last(), Some(&TokenKind::Eof));
    }

    #[test]
    fn test_tokens_are_contiguous() {
        let source = "let s = `x${y}`; // done\r\nif (a) { b = /re/g }";
        let tokens = tokenize(source);
        let mut at = 0;
        for token in &tokens {
            assert_eq!(token.span.start, at, "gap before {token}");
            at = token.span.end;
        }
        assert_eq!(at, source.len());
    }

    #[test]
    fn test_without_trivia() {
        let options = TokenizerOptions::new().with_keep_trivia(false);
        let tokens = tokenize_with("a /* c */ =\n b", options);
        let values: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, vec!["a", "=", "b", ""]);
    }
}
