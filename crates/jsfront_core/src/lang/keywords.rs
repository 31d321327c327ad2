//! Define the reserved keyword vocabulary.
//!
//! This module is the single source of truth for reserved words: a stable identifier ([`KeywordId`]) plus a const
//! metadata table ([`KEYWORDS`]) that records canonical spellings and a coarse category.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - `in` and `instanceof` are also word operators. If you need their precedence, use
//!   [`crate::lang::operators`] (`OperatorId::In` / `OperatorId::Instanceof`).
//! - Several words are reserved without being supported by the grammar (`class`, `import`, `yield`, ...). The
//!   tokenizer still classifies them as keywords so that they can never be used as plain identifiers.
//!
//! ## Examples
//! ```rust
//! use jsfront_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("debugger"), Some(KeywordId::Debugger));
//! assert_eq!(keywords::from_str("Debugger"), None);
//! assert_eq!(keywords::as_str(KeywordId::Instanceof), "instanceof");
//! ```

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Declarations
    Var,
    Let,
    Const,
    Function,
    Class,
    Extends,

    // Control flow
    If,
    Else,
    Switch,
    Case,
    Default,
    For,
    While,
    Do,
    Break,
    Continue,
    Return,
    Yield,
    Await,
    Throw,
    Try,
    Catch,
    Finally,
    With,
    Debugger,

    // Expressions
    This,
    New,
    Delete,
    Typeof,
    Void,
    In,
    Of,
    Instanceof,

    // Modules
    Import,
    Export,
    As,
    From,
}

/// High-level grouping for documentation and tooling.
///
/// ## Notes
/// - Categories are metadata only; they do not enforce parsing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Declaration,
    ControlFlow,
    Expression,
    Operator,
    Module,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    /// `true` when the parser has a grammar rule for the word; `false` for reserved-only words.
    pub supported: bool,
}

/// Registry of all keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Declarations
    info(KeywordId::Var, "var", KeywordCategory::Declaration, true),
    info(KeywordId::Let, "let", KeywordCategory::Declaration, true),
    info(KeywordId::Const, "const", KeywordCategory::Declaration, true),
    info(KeywordId::Function, "function", KeywordCategory::Declaration, true),
    info(KeywordId::Class, "class", KeywordCategory::Declaration, false),
    info(KeywordId::Extends, "extends", KeywordCategory::Declaration, false),
    // Control flow
    info(KeywordId::If, "if", KeywordCategory::ControlFlow, true),
    info(KeywordId::Else, "else", KeywordCategory::ControlFlow, true),
    info(KeywordId::Switch, "switch", KeywordCategory::ControlFlow, true),
    info(KeywordId::Case, "case", KeywordCategory::ControlFlow, true),
    info(KeywordId::Default, "default", KeywordCategory::ControlFlow, true),
    info(KeywordId::For, "for", KeywordCategory::ControlFlow, true),
    info(KeywordId::While, "while", KeywordCategory::ControlFlow, true),
    info(KeywordId::Do, "do", KeywordCategory::ControlFlow, true),
    info(KeywordId::Break, "break", KeywordCategory::ControlFlow, true),
    info(KeywordId::Continue, "continue", KeywordCategory::ControlFlow, true),
    info(KeywordId::Return, "return", KeywordCategory::ControlFlow, true),
    info(KeywordId::Yield, "yield", KeywordCategory::ControlFlow, false),
    info(KeywordId::Await, "await", KeywordCategory::ControlFlow, false),
    info(KeywordId::Throw, "throw", KeywordCategory::ControlFlow, true),
    info(KeywordId::Try, "try", KeywordCategory::ControlFlow, true),
    info(KeywordId::Catch, "catch", KeywordCategory::ControlFlow, true),
    info(KeywordId::Finally, "finally", KeywordCategory::ControlFlow, true),
    info(KeywordId::With, "with", KeywordCategory::ControlFlow, true),
    info(KeywordId::Debugger, "debugger", KeywordCategory::ControlFlow, true),
    // Expressions
    info(KeywordId::This, "this", KeywordCategory::Expression, true),
    info(KeywordId::New, "new", KeywordCategory::Expression, true),
    info(KeywordId::Delete, "delete", KeywordCategory::Operator, true),
    info(KeywordId::Typeof, "typeof", KeywordCategory::Operator, true),
    info(KeywordId::Void, "void", KeywordCategory::Operator, true),
    info(KeywordId::In, "in", KeywordCategory::Operator, true),
    info(KeywordId::Of, "of", KeywordCategory::Operator, false),
    info(KeywordId::Instanceof, "instanceof", KeywordCategory::Operator, true),
    // Modules
    info(KeywordId::Import, "import", KeywordCategory::Module, false),
    info(KeywordId::Export, "export", KeywordCategory::Module, false),
    info(KeywordId::As, "as", KeywordCategory::Module, false),
    info(KeywordId::From, "from", KeywordCategory::Module, false),
];

/// Canonical spelling.
///
/// ## Parameters
/// - `id`: Keyword identifier.
///
/// ## Returns
/// - The canonical spelling from [`KEYWORDS`].
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling is reserved.
/// - `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory, supported: bool) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        supported,
    }
}
