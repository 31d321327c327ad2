//! Quoted strings, template literals and regex literals.
//!
//! All three decide whether a delimiter is escaped the same way: count the run of backslashes directly before it.
//! An odd run escapes the delimiter, an even run escapes itself.

use super::{Quasic, Token, TokenFlags, TokenKind, Tokenizer};
use crate::ast::Span;
use jsfront_core::lang::chars;

impl<'a> Tokenizer<'a> {
    /// Return `true` if the byte at `at` is preceded by an odd number of backslashes.
    pub(super) fn is_escaped(&self, at: usize) -> bool {
        let run = self.bytes[..at].iter().rev().take_while(|b| **b == b'\\').count();
        run % 2 == 1
    }

    /// Scan a `"` or `'` string. An unterminated string stops before the line break.
    pub(super) fn scan_quoted(&mut self, start: usize, quote: u8) -> Token {
        self.index = start + 1;
        while self.index < self.end {
            let b = self.bytes[self.index];
            if chars::is_line_break(b) {
                break;
            }
            self.index += 1;
            if b == quote && !self.is_escaped(self.index - 1) {
                break;
            }
        }
        self.make_token(TokenKind::String, start)
    }

    /// Scan a backtick template, tokenizing each `${ ... }` into a [`Quasic`].
    ///
    /// ## Notes
    /// - The embedded expression runs to the first `}` after `${`; nested braces are not tracked.
    /// - Templates may span lines. An unterminated template runs to the end of the range.
    pub(super) fn scan_template(&mut self, start: usize) -> Token {
        self.index = start + 1;
        let mut quasics = Vec::new();

        while self.index < self.end {
            let b = self.bytes[self.index];
            if b == b'`' && !self.is_escaped(self.index) {
                self.index += 1;
                break;
            }
            if b == b'$' && self.peek_at(1) == Some(b'{') && !self.is_escaped(self.index) {
                let dollar = self.index;
                let body_start = dollar + 2;
                let close = (body_start..self.end)
                    .find(|&i| self.bytes[i] == b'}')
                    .unwrap_or(self.end);
                let tokens = Tokenizer::over_range(self.source, body_start, close, self.options).collect_significant();
                let quasic_end = (close + 1).min(self.end);
                tracing::trace!(start = dollar, end = quasic_end, tokens = tokens.len(), "template quasic");
                quasics.push(Quasic {
                    span: Span::new(dollar, quasic_end),
                    tokens,
                });
                self.index = quasic_end;
                continue;
            }
            self.index += 1;
        }

        let mut token = self.make_token(TokenKind::String, start);
        token.flags.is_template = true;
        token.quasics = quasics;
        token
    }

    /// Scan `/body/flags`. Returns `None` (leaving the cursor alone) if the line ends before the closing slash.
    pub(super) fn scan_regex(&mut self, start: usize) -> Option<Token> {
        let mut i = start + 1;
        while i < self.end {
            let b = self.bytes[i];
            if chars::is_line_break(b) {
                return None;
            }
            if b == b'/' && !self.is_escaped(i) {
                i += 1;
                while i < self.end && self.bytes[i].is_ascii_alphabetic() {
                    i += 1;
                }
                self.index = i;
                let flags = TokenFlags {
                    is_regex: true,
                    ..TokenFlags::default()
                };
                return Some(self.make_token(TokenKind::Regex, start).with_flags(flags));
            }
            i += 1;
        }
        None
    }
}
