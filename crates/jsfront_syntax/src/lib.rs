//! Syntax frontend for a JavaScript-like language: tokenizer, ESTree-shaped AST, parser, diagnostics.
//!
//! This crate is dependency-light and intended for reuse by the traversal engine, the code generator and the CLI.
//!
//! ## Notes
//! - This crate is "syntax-only": scopes and bindings live in the traversal layer of the `jsfront` crate.
//! - Vocabulary identity (keywords/operators/specials) comes from `jsfront_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! use jsfront_syntax::ast::Node;
//! use jsfront_syntax::{lexer, parser};
//!
//! let tokens = lexer::tokenize("var a = 1 + 2;");
//! let program = parser::parse(&tokens).unwrap();
//! let Node::Program(program) = program else { unreachable!() };
//! assert_eq!(program.body.len(), 1);
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod token_helpers;
