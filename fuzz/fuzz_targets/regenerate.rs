#![no_main]

use jsfront::codegen::{CodeGenerator, GeneratorOptions};
use jsfront::parser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(mut program) = parser::parse_source(s) else {
        return;
    };
    // Whatever parses must print to something that parses again
    let output = CodeGenerator::new(GeneratorOptions::default()).generate(&mut program);
    if let Err(err) = parser::parse_source(&output) {
        panic!("regenerated source does not parse: {err}\n{s:?}\n=>\n{output}");
    }
});
