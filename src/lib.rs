#![forbid(unsafe_code)]
//! jsfront: a front end for a JavaScript-like language
//!
//! The syntax layer (tokenizer, parser, AST, diagnostics) lives in `jsfront_syntax` and is re-exported here. This
//! crate adds the pieces that operate on a finished tree: the traversal/transform engine with lexical scopes, node
//! builders, a source code generator, and the command-line driver.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Traversal misuse**: calling both `remove()` and `replace_with()` on one visit, or removing a node from a
//!   field that cannot be empty, panics. These are programmer errors, not recoverable conditions.
//!
//! - **True invariants**: If a panic represents an engine bug (logic error), use `.expect("INVARIANT: reason")` with a
//!   clear explanation.
//!
//! ## Example
//!
//! ```rust
//! use jsfront::codegen::{GeneratorOptions, generate_source};
//!
//! let out = generate_source("let x = 1 + 2 * 3", GeneratorOptions::default()).unwrap();
//! assert_eq!(out, "let x=1+2*3;");
//! ```

pub mod cli;
pub mod codegen;
pub mod traverse;
pub mod types;

pub use jsfront_syntax::ast;
pub use jsfront_syntax::diagnostics;
pub use jsfront_syntax::lexer;
pub use jsfront_syntax::parser;

pub use codegen::{CodeGenerator, GeneratorOptions, generate_source};
pub use traverse::{NodePath, Tree, Visitor, traverse};
