//! Token types for the tokenizer.
//!
//! Vocabulary-bearing tokens carry **registry-backed IDs**:
//! - `Keyword(KeywordId)` for reserved words
//! - `Operator(OperatorId)` for operators and punctuators
//! - `Special(SpecialId)` for `true` / `false` / `null`
//!
//! ## Notes
//! - Unlike a typical compiler lexer, trivia (`WhiteSpace`, `NewLine`, `Comment`) is kept in the stream. The parser
//!   skips it, but its ASI rule looks back at `NewLine` tokens, and the token dump shows everything.
//! - `value` always holds the exact source slice, so concatenating the values of a contiguous scan reproduces the
//!   input.

use std::fmt;

use crate::ast::Span;
use jsfront_core::lang::keywords::{self, KeywordId};
use jsfront_core::lang::operators::{self, OperatorClass, OperatorId};
use jsfront_core::lang::specials::{self, SpecialId};

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ========== Trivia ==========
    Comment,
    NewLine,
    WhiteSpace,

    // ========== Vocabulary (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Special(SpecialId),

    // ========== Identifiers and literals ==========
    Identifier,
    Number,
    Regex,
    String,

    // ========== Special ==========
    Eof,
}

impl TokenKind {
    /// Short kind name used by the token dump.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Comment => "Comment",
            TokenKind::NewLine => "NewLine",
            TokenKind::WhiteSpace => "WhiteSpace",
            TokenKind::Keyword(_) => "Keyword",
            TokenKind::Operator(_) => "Operator",
            TokenKind::Special(_) => "Special",
            TokenKind::Identifier => "Identifier",
            TokenKind::Number => "Number",
            TokenKind::Regex => "Regex",
            TokenKind::String => "String",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(id) => write!(f, "Keyword({})", keywords::as_str(*id)),
            TokenKind::Operator(id) => write!(f, "Operator({})", operators::as_str(*id)),
            TokenKind::Special(id) => write!(f, "Special({})", specials::as_str(*id)),
            other => f.write_str(other.name()),
        }
    }
}

/// Classification flags set when a token is created.
///
/// ## Notes
/// - For operator tokens exactly one of `is_assignment`, `is_update`, `is_binary` is set.
/// - `precedence` is only meaningful when `is_binary` is set. The keyword tokens `in` and `instanceof` are binary too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenFlags {
    pub is_assignment: bool,
    pub is_update: bool,
    pub is_binary: bool,
    pub precedence: Option<u8>,
    pub is_template: bool,
    pub is_regex: bool,
    pub is_multiline: bool,
}

impl TokenFlags {
    /// Flags for an operator, derived from its registry classification.
    pub fn for_operator(id: OperatorId) -> Self {
        let info = operators::info_for(id);
        Self {
            is_assignment: info.class == OperatorClass::Assignment,
            is_update: info.class == OperatorClass::Update,
            is_binary: info.class == OperatorClass::Binary,
            precedence: info.precedence,
            ..Self::default()
        }
    }

    /// Return `true` if any operator classification is set.
    pub fn is_operator_like(&self) -> bool {
        self.is_assignment || self.is_update || self.is_binary
    }
}

/// 1-based line/column range of a token, filled by [`crate::lexer::fill_positions`].
///
/// `end_column` is the column just past the last character. All fields are `0` until positions are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl Position {
    pub fn new(start_line: usize, start_column: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    /// Return `true` once the post-pass has run.
    pub fn is_filled(&self) -> bool {
        self.start_line > 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{}:{}-#{}:{}",
            self.start_line, self.start_column, self.end_line, self.end_column
        )
    }
}

/// One `${ ... }` segment of a template literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Quasic {
    /// Absolute span from `$` through the closing `}`.
    pub span: Span,
    /// Tokens of the embedded expression (absolute offsets, no EOF).
    pub tokens: Vec<Token>,
}

/// A token with its kind, source span and classification.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub value: String,
    pub position: Position,
    pub flags: TokenFlags,
    /// Embedded expression groups; only non-empty for template strings.
    pub quasics: Vec<Quasic>,
}

impl Token {
    /// Construct a new token with empty flags.
    pub fn new(kind: TokenKind, span: Span, value: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            value: value.into(),
            position: Position::default(),
            flags: TokenFlags::default(),
            quasics: Vec::new(),
        }
    }

    /// Construct a zero-width end-of-input token.
    pub fn eof(at: usize) -> Self {
        Self::new(TokenKind::Eof, Span::new(at, at), "")
    }

    pub fn with_flags(mut self, flags: TokenFlags) -> Self {
        self.flags = flags;
        self
    }
}

impl fmt::Display for Token {
    /// One token-dump line: `Kind(start..end) "value" @line:col-line:col`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}..{}) {:?}", self.kind, self.span.start, self.span.end, self.value)?;
        if self.position.is_filled() {
            let p = self.position;
            write!(f, " @{}:{}-{}:{}", p.start_line, p.start_column, p.end_line, p.end_column)?;
        }
        if !self.quasics.is_empty() {
            write!(f, " quasics={}", self.quasics.len())?;
        }
        Ok(())
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
