//! Line/column post-pass.
//!
//! Positions are 1-based. `\r\n`, a lone `\r` and a lone `\n` each count as one line break. `end_column` is the
//! column just past the token's last character, so a single-character token at column 1 ends at column 2.

use super::Token;

/// Fill [`Token::position`] for tokens scanned from `source`.
///
/// Positions come from each token's span, so a stream with trivia dropped (or any other gaps) is still placed
/// correctly. Tokens embedded in template quasics are filled too.
pub fn fill_positions(source: &str, tokens: &mut [Token]) {
    let lines = LineStarts::new(source);
    fill_from(source, &lines, tokens);
}

fn fill_from(source: &str, lines: &LineStarts, tokens: &mut [Token]) {
    for token in tokens {
        let (start_line, start_column) = lines.locate(source, token.span.start);
        let (end_line, end_column) = lines.locate(source, token.span.end);
        token.position.start_line = start_line;
        token.position.start_column = start_column;
        token.position.end_line = end_line;
        token.position.end_column = end_column;

        for quasic in &mut token.quasics {
            fill_from(source, lines, &mut quasic.tokens);
        }
    }
}

/// Byte offset of the first character of every line.
struct LineStarts(Vec<usize>);

impl LineStarts {
    fn new(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut starts = vec![0];
        for (i, b) in bytes.iter().enumerate() {
            let ends_line = match b {
                b'\n' => true,
                b'\r' => bytes.get(i + 1) != Some(&b'\n'),
                _ => false,
            };
            if ends_line {
                starts.push(i + 1);
            }
        }
        Self(starts)
    }

    /// 1-based line and column of `offset`; columns count characters.
    fn locate(&self, source: &str, offset: usize) -> (usize, usize) {
        let line = self.0.partition_point(|start| *start <= offset).max(1);
        let line_start = self.0[line - 1];
        let column = source
            .get(line_start..offset)
            .map_or(offset.saturating_sub(line_start), |text| text.chars().count());
        (line, column + 1)
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::{Position, TokenizerOptions, tokenize, tokenize_with};

    #[test]
    fn test_single_line_positions() {
        let tokens = tokenize("var a");
        assert_eq!(tokens[0].position, Position::new(1, 1, 1, 4));
        assert_eq!(tokens[2].position, Position::new(1, 5, 1, 6));
    }

    #[test]
    fn test_crlf_is_one_break() {
        let tokens = tokenize("a\r\n\r\nb");
        assert_eq!(tokens[1].position, Position::new(1, 2, 3, 1));
        assert_eq!(tokens[2].position, Position::new(3, 1, 3, 2));
    }

    #[test]
    fn test_multiline_comment_spans_lines() {
        let tokens = tokenize("/* a\nbc */ x");
        assert_eq!(tokens[0].position, Position::new(1, 1, 2, 6));
        assert_eq!(tokens[2].position.start_line, 2);
        assert_eq!(tokens[2].position.start_column, 7);
    }

    #[test]
    fn test_eof_position() {
        let tokens = tokenize("ab\n");
        let eof = tokens.last().unwrap();
        assert_eq!(eof.position, Position::new(2, 1, 2, 1));
    }

    #[test]
    fn test_quasic_tokens_have_positions() {
        let tokens = tokenize("x = `a\n${b}`");
        let template = &tokens[4];
        let b = &template.quasics[0].tokens[0];
        assert_eq!(b.value, "b");
        assert_eq!(b.position, Position::new(2, 3, 2, 4));
    }

    #[test]
    fn test_positions_without_trivia() {
        let source = "a /* c */ =\n b";
        let tokens = tokenize_with(source, TokenizerOptions::new().with_keep_trivia(false));
        let values: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, ["a", "=", "b", ""]);
        assert_eq!(tokens[1].position, Position::new(1, 11, 1, 12));
        assert_eq!(tokens[2].position, Position::new(2, 2, 2, 3));

        let with_trivia = tokenize(source);
        let b = with_trivia.iter().find(|t| t.value == "b").unwrap();
        assert_eq!(tokens[2].position, b.position);
    }

    #[test]
    fn test_quasic_positions_without_trivia() {
        let tokens = tokenize_with("`x${ a + b }`", TokenizerOptions::new().with_keep_trivia(false));
        let quasic: Vec<(&str, Position)> =
            tokens[0].quasics[0].tokens.iter().map(|t| (t.value.as_str(), t.position)).collect();
        assert_eq!(
            quasic,
            [
                ("a", Position::new(1, 6, 1, 7)),
                ("+", Position::new(1, 8, 1, 9)),
                ("b", Position::new(1, 10, 1, 11)),
            ]
        );
    }

    #[test]
    fn test_columns_count_characters() {
        let tokens = tokenize("'é' x");
        assert_eq!(tokens[0].position, Position::new(1, 1, 1, 4));
        assert_eq!(tokens[2].position, Position::new(1, 5, 1, 6));
    }
}
