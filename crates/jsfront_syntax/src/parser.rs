//! Parser for the JavaScript-like source language.
//!
//! Converts a token stream into an ESTree-shaped [`Node::Program`]: recursive descent for statements, one
//! precedence-climbing loop for binary operators, automatic semicolon insertion by backward scan, and checkpoint /
//! restore backtracking for the `for-in` head and labeled statements.
//!
//! ## Examples
//!
//! ```rust
//! use jsfront_syntax::ast::Node;
//! use jsfront_syntax::{lexer, parser};
//!
//! let tokens = lexer::tokenize("let x = 1\nlet y = 2");
//! let Node::Program(program) = parser::parse(&tokens).unwrap() else { unreachable!() };
//! assert_eq!(program.body.len(), 2);
//! ```

use crate::ast::*;
use crate::diagnostics::ParseError;
use crate::lexer::{Position, Token, TokenKind};
use jsfront_core::lang::keywords::KeywordId;
use jsfront_core::lang::operators::{self, OperatorId};
use jsfront_core::lang::specials::SpecialId;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
