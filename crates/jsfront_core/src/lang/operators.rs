//! Operator vocabulary.
//!
//! This module defines the canonical operator set (symbol operators like `+`, structural punctuators like `(`, and
//! the word operators `in` / `instanceof`) together with the classification the tokenizer stamps onto every
//! operator token: exactly one of *binary*, *assignment* or *update*, plus a precedence level for binary operators.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Punctuators (`(`, `;`, `:` ...) are classified as binary with no precedence. The parser's binary loop only
//!   folds operators that have a level, so they terminate an expression instead of joining it.
//! - `?` (3) and `,` (1) carry levels for completeness, but the parser handles them in the postfix loop.
//!
//! ## Examples
//! ```rust
//! use jsfront_core::lang::operators::{self, OperatorClass, OperatorId};
//!
//! assert_eq!(operators::from_str(">>>="), Some(OperatorId::GtGtGtEq));
//! assert_eq!(operators::info_for(OperatorId::Star).precedence, Some(13));
//! assert_eq!(operators::class(OperatorId::PlusPlus), OperatorClass::Update);
//! ```

/// How the tokenizer classifies an operator token.
///
/// The three classes are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorClass {
    Binary,
    Assignment,
    Update,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Bitwise / logical
    Amp,
    Pipe,
    Caret,
    Tilde,
    Bang,
    AmpAmp,
    PipePipe,
    LtLt,
    GtGt,
    GtGtGt,

    // Comparison
    EqEq,
    EqEqEq,
    BangEq,
    BangEqEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Assignment
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    CaretEq,
    AmpEq,
    PipeEq,
    AmpAmpEq,
    PipePipeEq,
    LtLtEq,
    GtGtEq,
    GtGtGtEq,

    // Update
    PlusPlus,
    MinusMinus,

    // Punctuators
    Question,
    Colon,
    Dot,
    Comma,
    Semicolon,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,

    // Word operators
    In,
    Instanceof,
}

/// Metadata for an operator.
///
/// ## Notes
/// - `precedence` is only meaningful for [`OperatorClass::Binary`]; higher binds tighter.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub class: OperatorClass,
    pub precedence: Option<u8>,
    pub is_keyword_spelling: bool,
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Arithmetic
    binary(OperatorId::Plus, "+", 12),
    binary(OperatorId::Minus, "-", 12),
    binary(OperatorId::Star, "*", 13),
    binary(OperatorId::Slash, "/", 13),
    binary(OperatorId::Percent, "%", 13),
    // Bitwise / logical
    binary(OperatorId::Amp, "&", 8),
    binary(OperatorId::Pipe, "|", 6),
    binary(OperatorId::Caret, "^", 7),
    binary(OperatorId::Tilde, "~", 15),
    binary(OperatorId::Bang, "!", 15),
    binary(OperatorId::AmpAmp, "&&", 5),
    binary(OperatorId::PipePipe, "||", 4),
    binary(OperatorId::LtLt, "<<", 11),
    binary(OperatorId::GtGt, ">>", 11),
    binary(OperatorId::GtGtGt, ">>>", 11),
    // Comparison
    binary(OperatorId::EqEq, "==", 9),
    binary(OperatorId::EqEqEq, "===", 9),
    binary(OperatorId::BangEq, "!=", 9),
    binary(OperatorId::BangEqEq, "!==", 9),
    binary(OperatorId::Lt, "<", 10),
    binary(OperatorId::LtEq, "<=", 10),
    binary(OperatorId::Gt, ">", 10),
    binary(OperatorId::GtEq, ">=", 10),
    // Assignment
    assignment(OperatorId::Eq, "="),
    assignment(OperatorId::PlusEq, "+="),
    assignment(OperatorId::MinusEq, "-="),
    assignment(OperatorId::StarEq, "*="),
    assignment(OperatorId::SlashEq, "/="),
    assignment(OperatorId::PercentEq, "%="),
    assignment(OperatorId::CaretEq, "^="),
    assignment(OperatorId::AmpEq, "&="),
    assignment(OperatorId::PipeEq, "|="),
    assignment(OperatorId::AmpAmpEq, "&&="),
    assignment(OperatorId::PipePipeEq, "||="),
    assignment(OperatorId::LtLtEq, "<<="),
    assignment(OperatorId::GtGtEq, ">>="),
    assignment(OperatorId::GtGtGtEq, ">>>="),
    // Update
    update(OperatorId::PlusPlus, "++"),
    update(OperatorId::MinusMinus, "--"),
    // Punctuators
    binary(OperatorId::Question, "?", 3),
    punctuator(OperatorId::Colon, ":"),
    binary(OperatorId::Dot, ".", 18),
    binary(OperatorId::Comma, ",", 1),
    punctuator(OperatorId::Semicolon, ";"),
    punctuator(OperatorId::LParen, "("),
    punctuator(OperatorId::RParen, ")"),
    punctuator(OperatorId::LBracket, "["),
    punctuator(OperatorId::RBracket, "]"),
    punctuator(OperatorId::LBrace, "{"),
    punctuator(OperatorId::RBrace, "}"),
    // Word operators
    word(OperatorId::In, "in", 10),
    word(OperatorId::Instanceof, "instanceof", 10),
];

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Canonical spelling of an operator.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Classification of an operator.
pub fn class(id: OperatorId) -> OperatorClass {
    info_for(id).class
}

/// Binary precedence level, if the operator has one.
pub fn precedence(id: OperatorId) -> Option<u8> {
    info_for(id).precedence
}

/// Resolve an operator spelling to its identifier.
///
/// ## Returns
/// - `Some(OperatorId)` if the spelling exists in [`OPERATORS`].
/// - `None` otherwise.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

// --- helpers -----------------------------------------------------------------

const fn binary(id: OperatorId, spelling: &'static str, precedence: u8) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        class: OperatorClass::Binary,
        precedence: Some(precedence),
        is_keyword_spelling: false,
    }
}

const fn punctuator(id: OperatorId, spelling: &'static str) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        class: OperatorClass::Binary,
        precedence: None,
        is_keyword_spelling: false,
    }
}

const fn assignment(id: OperatorId, spelling: &'static str) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        class: OperatorClass::Assignment,
        precedence: None,
        is_keyword_spelling: false,
    }
}

const fn update(id: OperatorId, spelling: &'static str) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        class: OperatorClass::Update,
        precedence: None,
        is_keyword_spelling: false,
    }
}

const fn word(id: OperatorId, spelling: &'static str, precedence: u8) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        class: OperatorClass::Binary,
        precedence: Some(precedence),
        is_keyword_spelling: true,
    }
}
