//! Node builders.
//!
//! Constructors for synthesized nodes, used by transforms (`NodePath::replace_with`) and tests. Built nodes carry an
//! empty span at offset 0; the generator ignores spans.

use jsfront_core::lang::operators::OperatorId;
use jsfront_syntax::ast::*;

fn span() -> Span {
    Span::default()
}

fn boxed(node: Node) -> Box<Node> {
    Box::new(node)
}

// ============================================================================
// Statements
// ============================================================================

pub fn program(body: Vec<Node>) -> Node {
    Node::Program(Program {
        span: span(),
        body,
        source_type: SourceType::default(),
    })
}

pub fn variable_declaration(kind: VariableKind, declarations: Vec<Node>) -> Node {
    Node::VariableDeclaration(VariableDeclaration {
        span: span(),
        declarations,
        kind,
    })
}

pub fn variable_declarator(id: Node, init: Option<Node>) -> Node {
    Node::VariableDeclarator(VariableDeclarator {
        span: span(),
        id: boxed(id),
        init: init.map(boxed),
    })
}

pub fn expression_statement(expression: Node) -> Node {
    Node::ExpressionStatement(ExpressionStatement {
        span: span(),
        expression: boxed(expression),
    })
}

pub fn empty_statement() -> Node {
    Node::EmptyStatement(EmptyStatement { span: span() })
}

pub fn block_statement(body: Vec<Node>) -> Node {
    Node::BlockStatement(BlockStatement { span: span(), body })
}

pub fn if_statement(test: Node, consequent: Node, alternate: Option<Node>) -> Node {
    Node::IfStatement(IfStatement {
        span: span(),
        test: boxed(test),
        consequent: boxed(consequent),
        alternate: alternate.map(boxed),
    })
}

pub fn while_statement(test: Node, body: Node) -> Node {
    Node::WhileStatement(WhileStatement {
        span: span(),
        test: boxed(test),
        body: boxed(body),
    })
}

pub fn for_statement(init: Option<Node>, test: Option<Node>, update: Option<Node>, body: Node) -> Node {
    Node::ForStatement(ForStatement {
        span: span(),
        init: init.map(boxed),
        test: test.map(boxed),
        update: update.map(boxed),
        body: boxed(body),
    })
}

pub fn for_in_statement(left: Node, right: Node, body: Node) -> Node {
    Node::ForInStatement(ForInStatement {
        span: span(),
        left: boxed(left),
        right: boxed(right),
        body: boxed(body),
    })
}

pub fn do_while_statement(body: Node, test: Node) -> Node {
    Node::DoWhileStatement(DoWhileStatement {
        span: span(),
        body: boxed(body),
        test: boxed(test),
    })
}

pub fn break_statement(label: Option<Node>) -> Node {
    Node::BreakStatement(BreakStatement {
        span: span(),
        label: label.map(boxed),
    })
}

pub fn continue_statement(label: Option<Node>) -> Node {
    Node::ContinueStatement(ContinueStatement {
        span: span(),
        label: label.map(boxed),
    })
}

pub fn return_statement(argument: Option<Node>) -> Node {
    Node::ReturnStatement(ReturnStatement {
        span: span(),
        argument: argument.map(boxed),
    })
}

pub fn throw_statement(argument: Node) -> Node {
    Node::ThrowStatement(ThrowStatement {
        span: span(),
        argument: boxed(argument),
    })
}

pub fn try_statement(block: Node, handler: Option<Node>, finalizer: Option<Node>) -> Node {
    Node::TryStatement(TryStatement {
        span: span(),
        block: boxed(block),
        handler: handler.map(boxed),
        finalizer: finalizer.map(boxed),
    })
}

pub fn catch_clause(param: Node, body: Node) -> Node {
    Node::CatchClause(CatchClause {
        span: span(),
        param: boxed(param),
        body: boxed(body),
    })
}

pub fn labeled_statement(label: Node, body: Node) -> Node {
    Node::LabeledStatement(LabeledStatement {
        span: span(),
        label: boxed(label),
        body: boxed(body),
    })
}

pub fn debugger_statement() -> Node {
    Node::DebuggerStatement(DebuggerStatement { span: span() })
}

pub fn switch_statement(discriminant: Node, cases: Vec<Node>) -> Node {
    Node::SwitchStatement(SwitchStatement {
        span: span(),
        discriminant: boxed(discriminant),
        cases,
    })
}

/// A `case test:` arm, or `default:` when `test` is `None`.
pub fn switch_case(test: Option<Node>, consequent: Vec<Node>) -> Node {
    Node::SwitchCase(SwitchCase {
        span: span(),
        test: test.map(boxed),
        consequent,
    })
}

pub fn with_statement(object: Node, body: Node) -> Node {
    Node::WithStatement(WithStatement {
        span: span(),
        object: boxed(object),
        body: boxed(body),
    })
}

pub fn function_declaration(id: Node, params: Vec<Node>, body: Vec<Node>) -> Node {
    Node::FunctionDeclaration(function(Some(id), params, body))
}

/// Raw source text, emitted verbatim by the generator.
pub fn source_code(source: impl Into<String>) -> Node {
    Node::SourceCode(SourceCode {
        span: span(),
        source: source.into(),
    })
}

// ============================================================================
// Expressions
// ============================================================================

pub fn identifier(name: impl Into<String>) -> Node {
    Node::Identifier(Identifier {
        span: span(),
        name: name.into(),
    })
}

/// A literal from its exact source text.
pub fn literal(kind: LiteralKind, raw: impl Into<String>) -> Node {
    Node::Literal(Literal {
        span: span(),
        kind,
        raw: raw.into(),
    })
}

/// A double-quoted string literal holding `value`.
pub fn string_literal(value: &str) -> Node {
    let mut raw = String::with_capacity(value.len() + 2);
    raw.push('"');
    for ch in value.chars() {
        match ch {
            '"' => raw.push_str("\\\""),
            '\\' => raw.push_str("\\\\"),
            '\n' => raw.push_str("\\n"),
            '\r' => raw.push_str("\\r"),
            _ => raw.push(ch),
        }
    }
    raw.push('"');
    literal(LiteralKind::String, raw)
}

/// A numeric literal. Negative values still print with a leading `-`; wrap them in a unary minus for source output.
pub fn number_literal(value: f64) -> Node {
    literal(LiteralKind::Number, value.to_string())
}

pub fn boolean_literal(value: bool) -> Node {
    literal(LiteralKind::Boolean, if value { "true" } else { "false" })
}

pub fn null_literal() -> Node {
    literal(LiteralKind::Null, "null")
}

pub fn this_expression() -> Node {
    Node::ThisExpression(ThisExpression { span: span() })
}

pub fn binary_expression(left: Node, operator: OperatorId, right: Node) -> Node {
    Node::BinaryExpression(BinaryExpression {
        span: span(),
        left: boxed(left),
        operator,
        right: boxed(right),
    })
}

pub fn assignment_expression(operator: OperatorId, left: Node, right: Node) -> Node {
    Node::AssignmentExpression(AssignmentExpression {
        span: span(),
        operator,
        left: boxed(left),
        right: boxed(right),
    })
}

pub fn update_expression(operator: UpdateOperator, prefix: bool, argument: Node) -> Node {
    Node::UpdateExpression(UpdateExpression {
        span: span(),
        operator,
        prefix,
        argument: boxed(argument),
    })
}

pub fn unary_expression(operator: UnaryOperator, argument: Node) -> Node {
    Node::UnaryExpression(UnaryExpression {
        span: span(),
        operator,
        prefix: true,
        argument: boxed(argument),
    })
}

pub fn conditional_expression(test: Node, consequent: Node, alternate: Node) -> Node {
    Node::ConditionalExpression(ConditionalExpression {
        span: span(),
        test: boxed(test),
        consequent: boxed(consequent),
        alternate: boxed(alternate),
    })
}

/// Array literal; `None` elements are holes.
pub fn array_expression(elements: Vec<Option<Node>>) -> Node {
    Node::ArrayExpression(ArrayExpression { span: span(), elements })
}

pub fn sequence_expression(expressions: Vec<Node>) -> Node {
    Node::SequenceExpression(SequenceExpression {
        span: span(),
        expressions,
    })
}

pub fn object_expression(properties: Vec<Node>) -> Node {
    Node::ObjectExpression(ObjectExpression {
        span: span(),
        properties,
    })
}

/// A plain `key: value` property.
pub fn property(key: Node, value: Node) -> Node {
    Node::Property(Property {
        span: span(),
        key: boxed(key),
        value: boxed(value),
        computed: false,
        shorthand: false,
        method: false,
    })
}

pub fn function_expression(id: Option<Node>, params: Vec<Node>, body: Vec<Node>) -> Node {
    Node::FunctionExpression(function(id, params, body))
}

pub fn call_expression(callee: Node, arguments: Vec<Node>) -> Node {
    Node::CallExpression(CallExpression {
        span: span(),
        callee: boxed(callee),
        arguments,
        optional: false,
    })
}

/// `object.property` (or `object[property]` when `computed`).
pub fn member_expression(object: Node, property: Node, computed: bool) -> Node {
    Node::MemberExpression(MemberExpression {
        span: span(),
        object: boxed(object),
        property: boxed(property),
        computed,
        optional: false,
    })
}

pub fn new_expression(callee: Node, arguments: Vec<Node>) -> Node {
    Node::NewExpression(NewExpression {
        span: span(),
        callee: boxed(callee),
        arguments,
    })
}

fn function(id: Option<Node>, params: Vec<Node>, body: Vec<Node>) -> Function {
    Function {
        span: span(),
        id: id.map(boxed),
        params,
        body: boxed(block_statement(body)),
        is_async: false,
        generator: false,
        expression: false,
    }
}
