//! Code generation: turn a tree back into source text.
//!
//! Output is compact by default (no optional whitespace, one line). [`GeneratorOptions::format`] switches to spaced
//! operators, one statement per line and indented blocks.
//!
//! ## Guarantees
//! - Parentheses are inserted wherever precedence, statement position or the lexer's regex rule would otherwise
//!   change the meaning. Parsing the output of a parsed tree yields the same tree (spans aside).
//! - Spans are ignored, so trees built with [`crate::types`] print the same as parsed ones.
//!
//! ## Examples
//! ```rust
//! use jsfront::codegen::{ComputedMode, GeneratorOptions, generate_source};
//!
//! let options = GeneratorOptions::new().with_computed_mode(ComputedMode::OnComputed);
//! assert_eq!(generate_source("a.b = c", options).unwrap(), "a[\"b\"]=c;");
//! ```

mod config;
mod generator;
mod writer;

pub use config::{ComputedMode, GeneratorOptions};
pub use generator::CodeGenerator;

use jsfront_syntax::diagnostics::ParseError;
use jsfront_syntax::parser;

/// Parse `source` and generate it back with `options`.
///
/// ## Errors
/// Returns the parse error if `source` does not parse.
pub fn generate_source(source: &str, options: GeneratorOptions) -> Result<String, ParseError> {
    let mut program = parser::parse_source(source)?;
    Ok(CodeGenerator::new(options).generate(&mut program))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types;
    use jsfront_core::lang::operators::OperatorId;
    use jsfront_syntax::ast::{LiteralKind, Node, VariableKind};

    fn compact(source: &str) -> String {
        generate_source(source, GeneratorOptions::default()).unwrap()
    }

    fn formatted(source: &str) -> String {
        generate_source(source, GeneratorOptions::default().with_format(true)).unwrap()
    }

    fn generate(mut node: Node) -> String {
        CodeGenerator::new(GeneratorOptions::default()).generate(&mut node)
    }

    // ========================================================================
    // Statements
    // ========================================================================

    #[test]
    fn test_variable_declaration() {
        assert_eq!(compact("let x = 1 + 2 * 3"), "let x=1+2*3;");
        assert_eq!(compact("var a, b = 2;"), "var a,b=2;");
    }

    #[test]
    fn test_control_flow() {
        assert_eq!(compact("if (a) b(); else { c() }"), "if(a)b();else{c();}");
        assert_eq!(compact("while (i < n) i++;"), "while(i<n)i++;");
        assert_eq!(compact("do x(); while (y)"), "do x();while(y);");
        assert_eq!(compact("for (var i = 0; i < n; i++) {}"), "for(var i=0;i<n;i++){}");
        assert_eq!(compact("for (;;) {}"), "for(;;){}");
        assert_eq!(compact("for (var k in o) f(k);"), "for(var k in o)f(k);");
    }

    #[test]
    fn test_jumps_and_labels() {
        assert_eq!(
            compact("outer: for (;;) { continue outer; break; }"),
            "outer:for(;;){continue outer;break;}"
        );
        assert_eq!(compact("function f() { return; }"), "function f(){return;}");
        assert_eq!(compact("function f() { return a, b; }"), "function f(){return a,b;}");
        assert_eq!(compact("throw new Error('x')"), "throw new Error('x');");
        assert_eq!(compact("debugger;"), "debugger;");
    }

    #[test]
    fn test_switch_and_try() {
        assert_eq!(
            compact("switch (x) { case 1: a(); break; default: b() }"),
            "switch(x){case 1:a();break;default:b();}"
        );
        assert_eq!(
            compact("try { a() } catch (e) { b() } finally { c() }"),
            "try{a();}catch(e){b();}finally{c();}"
        );
        assert_eq!(compact("with (o) x;"), "with(o)x;");
    }

    #[test]
    fn test_functions() {
        assert_eq!(compact("function f(a, b) { return a + b }"), "function f(a,b){return a+b;}");
        assert_eq!(compact("var g = function* () {};"), "var g=function*(){};");
        assert_eq!(compact("var h = async function named() {};"), "var h=async function named(){};");
    }

    // ========================================================================
    // Parentheses
    // ========================================================================

    #[test]
    fn test_precedence_parentheses() {
        assert_eq!(compact("(a + b) * c"), "(a+b)*c;");
        assert_eq!(compact("a - (b - c)"), "a-(b-c);");
        assert_eq!(compact("a - b - c"), "a-b-c;");
        assert_eq!(compact("a * (b ? c : d)"), "a*(b?c:d);");
        assert_eq!(compact("(a, b) ? c : d"), "(a,b)?c:d;");
        assert_eq!(compact("f((a, b))"), "f((a,b));");
        assert_eq!(compact("-(a + b)"), "-(a+b);");
    }

    #[test]
    fn test_statement_start_parentheses() {
        assert_eq!(compact("(function () {})()"), "(function(){}());");
        assert_eq!(compact("({a: 1})"), "({a:1});");
        assert_eq!(compact("({}).toString()"), "({}.toString());");
    }

    #[test]
    fn test_new_and_member_parentheses() {
        assert_eq!(compact("new Foo"), "new Foo();");
        assert_eq!(compact("new a.b.C(1)"), "new a.b.C(1);");
        assert_eq!(compact("new (f())()"), "new (f())();");
        assert_eq!(compact("(1).toString()"), "(1).toString();");
    }

    #[test]
    fn test_in_inside_for_head_is_wrapped() {
        assert_eq!(compact("for (var i = (a in b); i; i++) {}"), "for(var i=(a in b);i;i++){}");
        assert_eq!(compact("x = a in b"), "x=a in b;");
    }

    #[test]
    fn test_tokens_do_not_merge() {
        assert_eq!(compact("a + +b"), "a+ +b;");
        assert_eq!(compact("a - -b"), "a- -b;");
        assert_eq!(compact("-(-x)"), "- -x;");
        assert_eq!(compact("typeof x"), "typeof x;");
        assert_eq!(compact("a++ + b"), "a++ +b;");
    }

    #[test]
    fn test_regex_after_word_is_wrapped() {
        let node = types::return_statement(Some(types::literal(LiteralKind::Regex, "/a/g")));
        assert_eq!(generate(node), "return(/a/g);");
        assert_eq!(compact("x = /a/g.test(s)"), "x=/a/g.test(s);");
    }

    #[test]
    fn test_division_after_object_is_wrapped() {
        let quotient = types::binary_expression(
            types::object_expression(vec![]),
            OperatorId::Slash,
            types::identifier("a"),
        );
        let declarator = types::variable_declarator(types::identifier("x"), Some(quotient));
        let node = types::variable_declaration(VariableKind::Var, vec![declarator]);
        assert_eq!(generate(node), "var x=({})/a;");
        assert_eq!(compact("(x++) / a / b"), "(x++)/a/b;");
        assert_eq!(compact("a / /re/"), "a/(/re/);");
    }

    #[test]
    fn test_dangling_else_gets_braces() {
        let inner = types::if_statement(
            types::identifier("b"),
            types::expression_statement(types::identifier("x")),
            None,
        );
        let outer = types::if_statement(
            types::identifier("a"),
            inner,
            Some(types::expression_statement(types::identifier("y"))),
        );
        assert_eq!(generate(outer), "if(a){if(b)x;}else y;");
    }

    #[test]
    fn test_array_holes() {
        assert_eq!(compact("[a, , b]"), "[a,,b];");
        assert_eq!(compact("[a, ,]"), "[a,,];");
        assert_eq!(compact("[a,]"), "[a];");
    }

    // ========================================================================
    // Options
    // ========================================================================

    #[test]
    fn test_computed_modes() {
        let on = GeneratorOptions::new().with_computed_mode(ComputedMode::OnComputed);
        assert_eq!(generate_source("a.b.c", on).unwrap(), "a[\"b\"][\"c\"];");

        let off = GeneratorOptions::new().with_computed_mode(ComputedMode::OffComputed);
        assert_eq!(generate_source("a['b'][\"c d\"][0]", off).unwrap(), "a.b[\"c d\"][0];");

        assert_eq!(compact("a['b']"), "a['b'];");
    }

    #[test]
    fn test_bracket_expression_statements() {
        let options = GeneratorOptions::new().with_bracket_expression_statements(true);
        assert_eq!(generate_source("a = 1; f()", options).unwrap(), "(a=1);(f());");
    }

    #[test]
    fn test_format_mode() {
        assert_eq!(
            formatted("function f(a,b){if(a){return a+b}else return b}"),
            "function f(a, b) {\n    if (a) {\n        return a + b;\n    } else return b;\n}"
        );
        assert_eq!(formatted("var a=1;var b=2"), "var a = 1;\nvar b = 2;");
    }

    #[test]
    fn test_format_mode_switch() {
        assert_eq!(
            formatted("switch(x){case 1:a();default:b()}"),
            "switch (x) {\n    case 1:\n        a();\n    default:\n        b();\n}"
        );
    }

    #[test]
    fn test_source_code_is_verbatim() {
        let node = types::program(vec![types::expression_statement(types::source_code("a  +  b"))]);
        assert_eq!(generate(node), "a  +  b;");
    }

    #[test]
    fn test_parse_error_is_returned() {
        assert!(generate_source("var = 1", GeneratorOptions::default()).is_err());
    }
}
