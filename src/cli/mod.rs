//! Command-line driver
//!
//! ## Commands
//!
//! - `tokens <file>` - Dump the token stream, one token per line
//! - `ast <file>` - Dump the parsed tree as JSON
//! - `generate <file>` - Parse and print the program back as source
//!
//! Every command writes to stdout, or to the file named by `--out`.
//!
//! ## Design
//!
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::codegen::{ComputedMode, GeneratorOptions};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
    /// The input did not parse
    pub const SYNTAX: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// The messages are user-facing. The entry point prints them and exits with [`CliError::exit_code`].
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Source file '{}' is too large ({size} bytes, max {max} bytes)", path.display())]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    /// A parse error, already rendered against its source.
    #[error("{0}")]
    Syntax(String),

    #[error("Cannot serialize tree: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Syntax(_) => ExitCode::SYNTAX,
            _ => ExitCode::FAILURE,
        }
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Tokenizer, parser and code generator for a JavaScript-like language
#[derive(Parser, Debug)]
#[command(name = "jsfront")]
#[command(version = VERSION)]
#[command(about = "Tokenize, parse and regenerate JavaScript-like source", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Write output to this file instead of stdout
    #[arg(short, long, value_name = "PATH", global = true)]
    pub out: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Dump the token stream
    Tokens {
        /// Source file
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Leave out comments, whitespace and newlines
        #[arg(long)]
        no_trivia: bool,
    },

    /// Dump the parsed tree as JSON
    Ast {
        /// Source file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Parse and print the program back as source
    Generate {
        /// Source file
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Spaced, indented output with one statement per line
        #[arg(short, long)]
        format: bool,
        /// Member access style: default, on or off
        #[arg(long, value_name = "MODE", default_value = "default")]
        computed: ComputedMode,
        /// Wrap every expression statement in parentheses
        #[arg(long)]
        bracket: bool,
    },
}

impl Command {
    /// The source file the command reads.
    pub fn file(&self) -> &Path {
        match self {
            Command::Tokens { file, .. } | Command::Ast { file } | Command::Generate { file, .. } => file,
        }
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            process::exit(e.exit_code().0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let file = cli.command.file();
    let source = commands::read_source(file)?;
    tracing::info!(file = %file.display(), bytes = source.len(), "read source");

    let output = match &cli.command {
        Command::Tokens { no_trivia, .. } => commands::dump_tokens(&source, !no_trivia),
        Command::Ast { file } => commands::dump_ast(file, &source)?,
        Command::Generate {
            file,
            format,
            computed,
            bracket,
        } => {
            let options = GeneratorOptions::new()
                .with_format(*format)
                .with_computed_mode(*computed)
                .with_bracket_expression_statements(*bracket);
            commands::generate(file, &source, options)?
        }
    };

    commands::write_output(&output, cli.out.as_deref())?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Tests
// ============================================================================
