//! Parse errors with source locations.
//!
//! Every error renders as `<message> (#startLine:startCol-#endLine:endCol)` where the location is the offending
//! token's position. [`ParseError`] is a [`miette::Diagnostic`], so the CLI can render it against the source with a
//! label under the offending token.
//!
//! ## Notes
//! - Errors are values: the parser returns the first one it hits and never recovers.

// Thiserror/miette derive-generated code can trip this lint under rustc >= 1.92.
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

use crate::ast::Span;
use crate::lexer::{Position, Token, TokenKind};

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::new(span.start.into(), span.len())
    }
}

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("Unexpected token '{0}'")]
    UnexpectedToken(String),

    #[error("Unexpected string")]
    UnexpectedString,

    #[error("Unexpected end of input")]
    UnexpectedEof,

    /// Payload names the declaration, e.g. `const declaration`.
    #[error("Missing initializer in {0}")]
    MissingInitializer(String),

    #[error("Invalid left-hand side expression in {0}")]
    InvalidLeftHandSide(String),

    /// Payload is the statement keyword, e.g. `return`.
    #[error("Illegal {0} statement")]
    IllegalStatement(String),
}

impl ParseErrorKind {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ParseErrorKind::UnexpectedToken(_) => "unexpected_token",
            ParseErrorKind::UnexpectedString => "unexpected_string",
            ParseErrorKind::UnexpectedEof => "unexpected_eof",
            ParseErrorKind::MissingInitializer(_) => "missing_init",
            ParseErrorKind::InvalidLeftHandSide(_) => "invalid_left_hand_side",
            ParseErrorKind::IllegalStatement(_) => "illegal_statement",
        }
    }
}

/// A parse error anchored at a token.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind} ({position})")]
#[diagnostic()]
pub struct ParseError {
    #[source]
    pub kind: ParseErrorKind,
    #[label("here")]
    pub span: Span,
    pub position: Position,
    #[help]
    pub hint: Option<String>,
}

impl ParseError {
    #[must_use]
    pub fn new(kind: ParseErrorKind, token: &Token) -> Self {
        Self {
            kind,
            span: token.span,
            position: token.position,
            hint: None,
        }
    }

    /// The generic error for a token the grammar did not expect here.
    ///
    /// String tokens and EOF get their own messages.
    #[must_use]
    pub fn unexpected(token: &Token) -> Self {
        let kind = match token.kind {
            TokenKind::Eof => ParseErrorKind::UnexpectedEof,
            TokenKind::String => ParseErrorKind::UnexpectedString,
            _ => ParseErrorKind::UnexpectedToken(token.value.clone()),
        };
        Self::new(kind, token)
    }

    #[must_use]
    pub fn missing_initializer(declaration: &str, token: &Token) -> Self {
        Self::new(ParseErrorKind::MissingInitializer(declaration.to_string()), token)
    }

    #[must_use]
    pub fn invalid_lhs(context: &str, token: &Token) -> Self {
        Self::new(ParseErrorKind::InvalidLeftHandSide(context.to_string()), token)
    }

    #[must_use]
    pub fn illegal_statement(keyword: &str, token: &Token) -> Self {
        Self::new(ParseErrorKind::IllegalStatement(keyword.to_string()), token)
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Just the message, without the location suffix.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: TokenKind, value: &str) -> Token {
        let mut token = Token::new(kind, Span::new(4, 4 + value.len()), value);
        token.position = Position::new(1, 5, 1, 5 + value.len());
        token
    }

    #[test]
    fn test_unexpected_token_message() {
        let err = ParseError::unexpected(&token(TokenKind::Identifier, "foo"));
        assert_eq!(err.to_string(), "Unexpected token 'foo' (#1:5-#1:8)");
    }

    #[test]
    fn test_unexpected_string_and_eof() {
        let err = ParseError::unexpected(&token(TokenKind::String, "'s'"));
        assert_eq!(err.message(), "Unexpected string");
        let err = ParseError::unexpected(&token(TokenKind::Eof, ""));
        assert_eq!(err.message(), "Unexpected end of input");
    }

    #[test]
    fn test_missing_initializer_message() {
        let err = ParseError::missing_initializer("const declaration", &token(TokenKind::Identifier, "a"));
        assert_eq!(err.to_string(), "Missing initializer in const declaration (#1:5-#1:6)");
    }

    #[test]
    fn test_source_span_conversion() {
        let span: miette::SourceSpan = Span::new(3, 7).into();
        assert_eq!(span.offset(), 3);
        assert_eq!(span.len(), 4);
    }
}
