//! Character classes shared by the tokenizer and the code generator.
//!
//! All structural characters are ASCII. Everything that is not whitespace, a line break, an operator character or
//! a quote is an identifier character (including digits in non-leading position and any non-ASCII byte), so a
//! byte-oriented scanner never splits a multi-byte UTF-8 sequence.

/// Characters that start an operator or punctuator token.
pub const OPERATOR_CHARS: &[u8] = b"+-*/!%^&?:~.,;=()[]{}|<>";

/// Return `true` for a byte that starts an operator token.
pub fn is_operator_char(b: u8) -> bool {
    OPERATOR_CHARS.contains(&b)
}

/// Return `true` for `\r` and `\n`.
pub fn is_line_break(b: u8) -> bool {
    b == b'\r' || b == b'\n'
}

/// Return `true` for space and tab.
pub fn is_space(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Return `true` for the three string delimiters.
pub fn is_quote(b: u8) -> bool {
    b == b'"' || b == b'\'' || b == b'`'
}

/// Return `true` for a byte that may appear inside an identifier, keyword or number.
pub fn is_identifier_char(b: u8) -> bool {
    !is_space(b) && !is_line_break(b) && !is_operator_char(b) && !is_quote(b)
}

/// Return `true` for a byte that may start an identifier (identifier character, not a digit).
pub fn is_identifier_start(b: u8) -> bool {
    is_identifier_char(b) && !b.is_ascii_digit()
}
