//! Output writer with indentation tracking
//!
//! Builds generated source piece by piece. Two adjacent pieces that would lex as one token (`a` `b`, `+` `+`,
//! `/` `/`) get a separating space automatically. In format mode, line breaks are deferred: a requested newline is
//! only written when more output follows, so the result never ends with a trailing line break.

use super::config::GeneratorOptions;

/// Writer that tracks indentation and token boundaries
pub struct CodeWriter {
    /// The output buffer
    output: String,
    /// Current indentation level
    indent_level: usize,
    /// Configuration
    options: GeneratorOptions,
    /// A line break was requested and not yet written
    pending_newline: bool,
}

impl CodeWriter {
    pub fn new(options: GeneratorOptions) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            options,
            pending_newline: false,
        }
    }

    /// Get the generated output
    pub fn finish(self) -> String {
        self.output
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn is_format(&self) -> bool {
        self.options.format
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    #[allow(dead_code)]
    pub fn current_indent(&self) -> usize {
        self.indent_level
    }

    /// Last character written so far.
    pub fn last_char(&self) -> Option<char> {
        self.output.chars().next_back()
    }

    /// Last character written, ignoring trailing spaces.
    pub fn last_token_char(&self) -> Option<char> {
        self.output.trim_end_matches(' ').chars().next_back()
    }

    fn flush_newline(&mut self) {
        if !self.pending_newline {
            return;
        }
        self.pending_newline = false;
        if self.output.is_empty() {
            return;
        }
        self.output.push('\n');
        let width = self.indent_level * self.options.indent_width;
        self.output.extend(std::iter::repeat_n(' ', width));
    }

    /// Write one piece of output, separating it from the previous piece if the two would merge.
    pub fn write(&mut self, s: &str) {
        let Some(first) = s.chars().next() else {
            return;
        };
        self.flush_newline();
        if self.last_char().is_some_and(|last| would_merge(last, first)) {
            self.output.push(' ');
        }
        self.output.push_str(s);
    }

    /// Write a space, unless a line break is already pending.
    pub fn space(&mut self) {
        if self.pending_newline {
            return;
        }
        if !self.output.is_empty() && self.last_char() != Some(' ') {
            self.output.push(' ');
        }
    }

    /// Write a space in format mode only.
    pub fn space_if_format(&mut self) {
        if self.is_format() {
            self.space();
        }
    }

    /// Request a line break (format mode only).
    pub fn newline(&mut self) {
        if self.is_format() {
            self.pending_newline = true;
        }
    }

    /// Write a statement terminator.
    pub fn end_statement(&mut self) {
        self.write(";");
        self.newline();
    }
}

pub(super) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Return `true` if writing `next` right after `last` would glue two tokens together.
fn would_merge(last: char, next: char) -> bool {
    (is_word_char(last) && is_word_char(next))
        || (last == '+' && next == '+')
        || (last == '-' && next == '-')
        || (last == '/' && (next == '/' || next == '*'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compact() -> CodeWriter {
        CodeWriter::new(GeneratorOptions::default())
    }

    fn formatted() -> CodeWriter {
        CodeWriter::new(GeneratorOptions::default().with_format(true))
    }

    // ========================================
    // Write tests
    // ========================================

    #[test]
    fn test_new_writer_empty_output() {
        assert_eq!(compact().finish(), "");
    }

    #[test]
    fn test_write_empty_string() {
        let mut writer = compact();
        writer.write("");
        assert_eq!(writer.finish(), "");
    }

    #[test]
    fn test_words_are_separated() {
        let mut writer = compact();
        writer.write("return");
        writer.write("x");
        writer.write(";");
        assert_eq!(writer.finish(), "return x;");
    }

    #[test]
    fn test_punctuation_is_not_separated() {
        let mut writer = compact();
        for piece in ["f", "(", "a", ",", "b", ")"] {
            writer.write(piece);
        }
        assert_eq!(writer.finish(), "f(a,b)");
    }

    #[test]
    fn test_operator_merging_is_prevented() {
        let mut writer = compact();
        for piece in ["a", "+", "+", "b", "-", "--", "c", "/", "/re/"] {
            writer.write(piece);
        }
        assert_eq!(writer.finish(), "a+ +b- --c/ /re/");
    }

    // ========================================
    // Space tests
    // ========================================

    #[test]
    fn test_space_if_format() {
        let mut writer = compact();
        writer.write("a");
        writer.space_if_format();
        writer.write("=");
        assert_eq!(writer.finish(), "a=");

        let mut writer = formatted();
        writer.write("a");
        writer.space_if_format();
        writer.write("=");
        assert_eq!(writer.finish(), "a =");
    }

    #[test]
    fn test_space_is_not_doubled() {
        let mut writer = formatted();
        writer.write("in");
        writer.space();
        writer.space();
        writer.write("b");
        assert_eq!(writer.finish(), "in b");
    }

    // ========================================
    // Newline / indentation tests
    // ========================================

    #[test]
    fn test_newline_ignored_in_compact_mode() {
        let mut writer = compact();
        writer.write("a");
        writer.end_statement();
        writer.write("b");
        writer.end_statement();
        assert_eq!(writer.finish(), "a;b;");
    }

    #[test]
    fn test_pending_newline_is_dropped_at_end() {
        let mut writer = formatted();
        writer.write("a");
        writer.end_statement();
        writer.write("b");
        writer.end_statement();
        assert_eq!(writer.finish(), "a;\nb;");
    }

    #[test]
    fn test_indentation_applies_after_newline() {
        let mut writer = CodeWriter::new(GeneratorOptions::default().with_format(true).with_indent_width(2));
        writer.write("{");
        writer.indent();
        writer.newline();
        writer.write("x");
        writer.end_statement();
        writer.dedent();
        writer.write("}");
        assert_eq!(writer.finish(), "{\n  x;\n}");
    }

    #[test]
    fn test_dedent_at_zero_stays_zero() {
        let mut writer = compact();
        writer.dedent();
        assert_eq!(writer.current_indent(), 0);
    }

    #[test]
    fn test_last_token_char_skips_spaces() {
        let mut writer = formatted();
        writer.write("return");
        writer.space();
        assert_eq!(writer.last_char(), Some(' '));
        assert_eq!(writer.last_token_char(), Some('n'));
    }

    #[test]
    fn test_leading_newline_is_not_written() {
        let mut writer = formatted();
        writer.newline();
        writer.write("a");
        assert_eq!(writer.finish(), "a");
    }
}
