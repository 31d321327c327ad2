#![no_main]

use jsfront::{lexer, parser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // The tokenizer never fails and always ends in exactly one EOF
        let tokens = lexer::tokenize(s);
        assert_eq!(tokens.last().map(|t| t.kind), Some(lexer::TokenKind::Eof));
        let _ = parser::parse_source(s);
    }
});
