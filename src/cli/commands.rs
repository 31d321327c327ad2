//! CLI command implementations
//!
//! Commands take the source text and return the text to emit; reading input and writing output are separate steps
//! so the commands can be tested without touching the filesystem.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use miette::{GraphicalReportHandler, GraphicalTheme, NamedSource, Report};

use crate::codegen::{CodeGenerator, GeneratorOptions};
use crate::diagnostics::ParseError;
use crate::lexer::{self, TokenizerOptions};
use crate::{ast, parser};

use super::{CliError, CliResult};

/// Maximum source file size (100 MB).
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Read a source file.
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE`
pub fn read_source(path: &Path) -> CliResult<String> {
    let metadata = fs::metadata(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max: MAX_SOURCE_SIZE,
        });
    }
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `output` to `out`, or to stdout when `out` is `None`.
pub fn write_output(output: &str, out: Option<&Path>) -> CliResult<()> {
    match out {
        Some(path) => {
            fs::write(path, output).map_err(|source| CliError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::info!(file = %path.display(), bytes = output.len(), "wrote output");
            Ok(())
        }
        None => {
            println!("{output}");
            Ok(())
        }
    }
}

/// One line per token, in the `Token` display format.
pub fn dump_tokens(source: &str, keep_trivia: bool) -> String {
    let options = TokenizerOptions::new().with_keep_trivia(keep_trivia);
    let mut out = String::new();
    for token in lexer::tokenize_with(source, options) {
        let _ = writeln!(out, "{token}");
    }
    out.truncate(out.trim_end().len());
    out
}

/// The parsed tree as pretty-printed JSON.
pub fn dump_ast(path: &Path, source: &str) -> CliResult<String> {
    let program = parse(path, source)?;
    Ok(ast::to_json(&program)?)
}

/// Parse and regenerate the program.
pub fn generate(path: &Path, source: &str, options: GeneratorOptions) -> CliResult<String> {
    let mut program = parse(path, source)?;
    Ok(CodeGenerator::new(options).generate(&mut program))
}

fn parse(path: &Path, source: &str) -> CliResult<ast::Node> {
    parser::parse_source(source).map_err(|err| render_parse_error(path, source, err))
}

/// Render a parse error with the offending source line, labelled.
fn render_parse_error(path: &Path, source: &str, err: ParseError) -> CliError {
    tracing::debug!(code = err.code(), "parse failed");
    let report = Report::new(err).with_source_code(NamedSource::new(path.display().to_string(), source.to_string()));
    let mut rendered = String::new();
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
    if handler.render_report(&mut rendered, &*report).is_err() {
        rendered = report.to_string();
    }
    CliError::Syntax(rendered.trim_end().to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn path() -> &'static Path {
        Path::new("input.js")
    }

    #[test]
    fn test_dump_tokens_without_trivia() {
        let dump = dump_tokens("a = 1", false);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Identifier(0..1)"));
        assert!(lines[3].starts_with("EOF("));
    }

    #[test]
    fn test_dump_tokens_keeps_trivia() {
        assert_eq!(dump_tokens("a = 1", true).lines().count(), 6);
    }

    #[test]
    fn test_dump_ast_is_json() {
        let json = dump_ast(path(), "x;").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "Program");
        assert_eq!(value["body"][0]["expression"]["name"], "x");
    }

    #[test]
    fn test_generate_compact_and_formatted() {
        let source = "if (a) { b = 1 }";
        assert_eq!(generate(path(), source, GeneratorOptions::default()).unwrap(), "if(a){b=1;}");
        assert_eq!(
            generate(path(), source, GeneratorOptions::new().with_format(true)).unwrap(),
            "if (a) {\n    b = 1;\n}"
        );
    }

    #[test]
    fn test_parse_error_is_rendered_with_file_name() {
        let err = generate(path(), "var = 1;", GeneratorOptions::default()).unwrap_err();
        assert!(matches!(err, CliError::Syntax(_)));
        let rendered = err.to_string();
        assert!(rendered.contains("input.js"), "{rendered}");
        assert!(rendered.contains("Unexpected token '='"), "{rendered}");
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_source(Path::new("definitely/not/here.js")).unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
    }
}
