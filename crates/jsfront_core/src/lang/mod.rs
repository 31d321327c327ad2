//! Language vocabulary registries.
//!
//! This module is the "front door" for language-level vocabulary: reserved keywords, operators (including the
//! word operators `in` and `instanceof`), and the special literal words `true`/`false`/`null`.
//!
//! Callers work with **stable IDs** (e.g. `KeywordId`, `OperatorId`) and look up spellings and metadata via
//! registry tables instead of comparing strings all over the tokenizer and parser.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no AST types, no IO, no side effects.
//! - The tokenizer/parser enforce syntax; registries only provide spellings and metadata.
//!
//! ## Examples
//! ```rust
//! use jsfront_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("typeof"), Some(KeywordId::Typeof));
//! assert_eq!(keywords::as_str(KeywordId::Typeof), "typeof");
//! ```

pub mod chars;
pub mod keywords;
pub mod operators;
pub mod specials;
