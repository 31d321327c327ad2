//! Provide the canonical language vocabulary for the jsfront toolchain.
//!
//! This crate is intentionally tiny and dependency-free. Both the tokenizer and the parser look up reserved words,
//! operator spellings and precedence levels here, so the two can never disagree about what `instanceof` or `>>>=`
//! means.
//!
//! ## Notes
//!
//! - This is a "vocabulary" crate: **no IO**, no global state, and no AST types.
//! - Every registry is a `const` table plus small lookup helpers (`from_str`, `as_str`, `info_for`).

pub mod lang;
