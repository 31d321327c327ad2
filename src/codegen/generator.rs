//! Source generator
//!
//! A [`Visitor`] that skips every node on `enter` and drives descent itself with `NodePath::traverse`, so it can
//! interleave punctuation with the children. Each child is emitted under a [`Slot`] chosen by its parent: the weakest
//! expression precedence the position accepts, plus a few position-specific constraints. A child that does not fit
//! its slot is wrapped in parentheses. The parser drops parentheses, so wrapping never changes the re-parsed tree.

use jsfront_core::lang::operators::{self, OperatorId};
use jsfront_syntax::ast::{Function, Literal, LiteralKind, Node};

use super::config::{ComputedMode, GeneratorOptions};
use super::writer::{CodeWriter, is_word_char};
use crate::traverse::{NodePath, Visitor, traverse};

// Expression precedence levels. Binary operators take their registry levels, which sit between CONDITIONAL and UNARY.
const SEQUENCE: u8 = 0;
const ASSIGNMENT: u8 = 1;
const CONDITIONAL: u8 = 2;
const UNARY: u8 = 16;
const POSTFIX: u8 = 17;
const CALL: u8 = 18;
const PRIMARY: u8 = 19;

/// Constraints a parent places on the child it is about to emit.
#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    /// Weakest precedence accepted without parentheses
    min_prec: u8,
    /// Parenthesize regardless of precedence
    parens: bool,
    /// Inside a `for (init; ...)` head, where a bare `in` would turn the loop into a for-in
    no_in: bool,
    /// Declaration inside a `for` head: no terminator
    bare_declaration: bool,
}

impl Slot {
    fn expr(min_prec: u8) -> Self {
        Self {
            min_prec,
            ..Self::default()
        }
    }
}

/// Code generator over a parsed (or transformed) tree
pub struct CodeGenerator {
    writer: CodeWriter,
    /// Slot for the next node entered
    slot: Slot,
    /// The node being emitted sits in a for-head without intervening parentheses
    no_in: bool,
}

impl CodeGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self {
            writer: CodeWriter::new(options),
            slot: Slot::default(),
            no_in: false,
        }
    }

    /// Generate source text for `node` (usually a `Program`).
    ///
    /// The tree is borrowed mutably because the walk holds it for its duration; it comes back unchanged.
    #[tracing::instrument(skip_all, fields(root = %node.type_tag()))]
    pub fn generate(mut self, node: &mut Node) -> String {
        traverse(node, &mut self);
        let output = self.writer.finish();
        tracing::debug!(bytes = output.len(), "generated source");
        output
    }

    // ========================================================================
    // Descent helpers
    // ========================================================================

    fn child(&mut self, path: &NodePath<'_>, field: &str, index: Option<usize>, mut slot: Slot) {
        let saved = self.no_in;
        slot.no_in |= saved;
        self.slot = slot;
        path.traverse(self, field, index);
        self.slot = Slot::default();
        self.no_in = saved;
    }

    /// Emit `len` members of the list `field`, separated by commas.
    fn list(&mut self, path: &NodePath<'_>, field: &str, len: usize, slot: Slot) {
        for index in 0..len {
            if index > 0 {
                self.writer.write(",");
                self.writer.space_if_format();
            }
            self.child(path, field, Some(index), slot);
        }
    }

    /// Emit a statement list, one statement per line in format mode.
    fn statements(&mut self, path: &NodePath<'_>, field: &str, len: usize) {
        for index in 0..len {
            self.writer.newline();
            self.child(path, field, Some(index), Slot::default());
        }
    }

    fn open_block(&mut self) {
        self.writer.write("{");
        self.writer.indent();
    }

    fn close_block(&mut self, had_content: bool) {
        self.writer.dedent();
        if had_content {
            self.writer.newline();
        }
        self.writer.write("}");
    }

    /// `keyword (field)` head shared by `if`, `while`, `with`, `switch` and `catch`.
    fn keyword_head(&mut self, path: &NodePath<'_>, keyword: &str, field: &str) {
        self.writer.write(keyword);
        self.writer.space_if_format();
        self.writer.write("(");
        self.child(path, field, None, Slot::expr(SEQUENCE));
        self.writer.write(")");
        self.writer.space_if_format();
    }

    fn body(&mut self, path: &NodePath<'_>) {
        self.child(path, "body", None, Slot::default());
    }

    /// Infix operator, spaced in format mode. Word operators are always spaced.
    fn operator(&mut self, spelling: &str) {
        if spelling.starts_with(is_word_char) {
            self.writer.space();
            self.writer.write(spelling);
            self.writer.space();
        } else {
            self.writer.space_if_format();
            self.writer.write(spelling);
            self.writer.space_if_format();
        }
    }

    // ========================================================================
    // Emission
    // ========================================================================

    fn emit(&mut self, path: &NodePath<'_>, node: &Node, slot: Slot) {
        match node {
            Node::Program(program) => self.statements(path, "body", program.body.len()),
            Node::BlockStatement(block) => {
                self.open_block();
                self.statements(path, "body", block.body.len());
                self.close_block(!block.body.is_empty());
            }
            Node::EmptyStatement(_) => self.writer.end_statement(),
            Node::ExpressionStatement(stmt) => {
                let parens =
                    self.writer.options().bracket_expression_statements || starts_like_statement(&stmt.expression);
                let expression = Slot {
                    parens,
                    ..Slot::expr(SEQUENCE)
                };
                self.child(path, "expression", None, expression);
                self.writer.end_statement();
            }
            Node::VariableDeclaration(declaration) => {
                self.writer.write(declaration.kind.as_str());
                self.writer.space();
                self.list(path, "declarations", declaration.declarations.len(), Slot::default());
                if !slot.bare_declaration {
                    self.writer.end_statement();
                }
            }
            Node::VariableDeclarator(declarator) => {
                self.child(path, "id", None, Slot::default());
                if declarator.init.is_some() {
                    self.operator("=");
                    self.child(path, "init", None, Slot::expr(ASSIGNMENT));
                }
            }
            Node::IfStatement(stmt) => {
                self.keyword_head(path, "if", "test");
                if stmt.alternate.is_some() && ends_with_open_if(&stmt.consequent) {
                    self.open_block();
                    self.writer.newline();
                    self.child(path, "consequent", None, Slot::default());
                    self.close_block(true);
                } else {
                    self.child(path, "consequent", None, Slot::default());
                }
                if stmt.alternate.is_some() {
                    self.writer.space_if_format();
                    self.writer.write("else");
                    self.writer.space_if_format();
                    self.child(path, "alternate", None, Slot::default());
                }
            }
            Node::WhileStatement(_) => {
                self.keyword_head(path, "while", "test");
                self.body(path);
            }
            Node::DoWhileStatement(_) => {
                self.writer.write("do");
                self.writer.space_if_format();
                self.body(path);
                self.writer.space_if_format();
                self.keyword_head(path, "while", "test");
                self.writer.end_statement();
            }
            Node::ForStatement(stmt) => self.for_statement(path, stmt.test.is_some(), stmt.update.is_some()),
            Node::ForInStatement(_) => {
                self.writer.write("for");
                self.writer.space_if_format();
                self.writer.write("(");
                let left = Slot {
                    bare_declaration: true,
                    no_in: true,
                    ..Slot::expr(CALL)
                };
                self.child(path, "left", None, left);
                self.operator("in");
                self.child(path, "right", None, Slot::expr(SEQUENCE));
                self.writer.write(")");
                self.writer.space_if_format();
                self.body(path);
            }
            Node::BreakStatement(stmt) => self.jump(path, "break", stmt.label.is_some()),
            Node::ContinueStatement(stmt) => self.jump(path, "continue", stmt.label.is_some()),
            Node::ReturnStatement(stmt) => {
                self.writer.write("return");
                if stmt.argument.is_some() {
                    self.writer.space_if_format();
                    self.child(path, "argument", None, Slot::expr(SEQUENCE));
                }
                self.writer.end_statement();
            }
            Node::ThrowStatement(_) => {
                self.writer.write("throw");
                self.writer.space_if_format();
                self.child(path, "argument", None, Slot::expr(SEQUENCE));
                self.writer.end_statement();
            }
            Node::TryStatement(stmt) => {
                self.writer.write("try");
                self.writer.space_if_format();
                self.child(path, "block", None, Slot::default());
                if stmt.handler.is_some() {
                    self.writer.space_if_format();
                    self.child(path, "handler", None, Slot::default());
                }
                if stmt.finalizer.is_some() {
                    self.writer.space_if_format();
                    self.writer.write("finally");
                    self.writer.space_if_format();
                    self.child(path, "finalizer", None, Slot::default());
                }
            }
            Node::CatchClause(_) => {
                self.keyword_head(path, "catch", "param");
                self.body(path);
            }
            Node::LabeledStatement(_) => {
                self.child(path, "label", None, Slot::default());
                self.writer.write(":");
                self.writer.space_if_format();
                self.body(path);
            }
            Node::DebuggerStatement(_) => {
                self.writer.write("debugger");
                self.writer.end_statement();
            }
            Node::SwitchStatement(stmt) => {
                self.keyword_head(path, "switch", "discriminant");
                self.open_block();
                self.statements(path, "cases", stmt.cases.len());
                self.close_block(!stmt.cases.is_empty());
            }
            Node::SwitchCase(case) => {
                if case.test.is_some() {
                    self.writer.write("case");
                    self.writer.space_if_format();
                    self.child(path, "test", None, Slot::expr(SEQUENCE));
                } else {
                    self.writer.write("default");
                }
                self.writer.write(":");
                self.writer.indent();
                self.statements(path, "consequent", case.consequent.len());
                self.writer.dedent();
            }
            Node::WithStatement(_) => {
                self.keyword_head(path, "with", "object");
                self.body(path);
            }
            Node::FunctionDeclaration(function) | Node::FunctionExpression(function) => self.function(path, function),

            Node::Identifier(identifier) => self.writer.write(&identifier.name),
            Node::ThisExpression(_) => self.writer.write("this"),
            Node::SourceCode(code) => self.writer.write(&code.source),
            Node::Literal(literal) => self.literal(literal),
            Node::ArrayExpression(array) => {
                self.writer.write("[");
                self.list(path, "elements", array.elements.len(), Slot::expr(ASSIGNMENT));
                // A single trailing comma is not a hole, so a trailing hole needs a second one.
                if matches!(array.elements.last(), Some(None)) {
                    self.writer.write(",");
                }
                self.writer.write("]");
            }
            Node::ObjectExpression(object) => {
                self.writer.write("{");
                self.list(path, "properties", object.properties.len(), Slot::default());
                self.writer.write("}");
            }
            Node::Property(property) => {
                if property.computed {
                    self.writer.write("[");
                    self.child(path, "key", None, Slot::expr(ASSIGNMENT));
                    self.writer.write("]");
                } else {
                    self.child(path, "key", None, Slot::default());
                }
                if !property.shorthand {
                    self.writer.write(":");
                    self.writer.space_if_format();
                    self.child(path, "value", None, Slot::expr(ASSIGNMENT));
                }
            }
            Node::SequenceExpression(sequence) => {
                self.list(path, "expressions", sequence.expressions.len(), Slot::expr(ASSIGNMENT));
            }
            Node::AssignmentExpression(assignment) => {
                self.child(path, "left", None, Slot::expr(CALL));
                self.operator(operators::as_str(assignment.operator));
                self.child(path, "right", None, Slot::expr(ASSIGNMENT));
            }
            Node::ConditionalExpression(_) => {
                self.child(path, "test", None, Slot::expr(CONDITIONAL + 1));
                self.operator("?");
                self.child(path, "consequent", None, Slot::expr(ASSIGNMENT));
                self.operator(":");
                self.child(path, "alternate", None, Slot::expr(ASSIGNMENT));
            }
            Node::BinaryExpression(binary) => {
                let level = precedence(node);
                // `}` leaves the lexer in operand position, where `/` would open a regex.
                let left = Slot {
                    parens: binary.operator == OperatorId::Slash && ends_with_brace(&binary.left),
                    ..Slot::expr(level)
                };
                self.child(path, "left", None, left);
                self.operator(operators::as_str(binary.operator));
                self.child(path, "right", None, Slot::expr(level + 1));
            }
            Node::UnaryExpression(unary) => {
                self.writer.write(unary.operator.as_str());
                self.child(path, "argument", None, Slot::expr(UNARY));
            }
            Node::UpdateExpression(update) => {
                if update.prefix {
                    self.writer.write(update.operator.as_str());
                    self.child(path, "argument", None, Slot::expr(CALL));
                } else {
                    self.child(path, "argument", None, Slot::expr(CALL));
                    self.writer.write(update.operator.as_str());
                }
            }
            Node::CallExpression(call) => {
                self.child(path, "callee", None, Slot::expr(CALL));
                self.writer.write("(");
                self.list(path, "arguments", call.arguments.len(), Slot::expr(ASSIGNMENT));
                self.writer.write(")");
            }
            Node::NewExpression(new) => {
                self.writer.write("new");
                self.writer.space();
                let callee = Slot {
                    parens: !is_plain_member_chain(&new.callee),
                    ..Slot::expr(CALL)
                };
                self.child(path, "callee", None, callee);
                self.writer.write("(");
                self.list(path, "arguments", new.arguments.len(), Slot::expr(ASSIGNMENT));
                self.writer.write(")");
            }
            Node::MemberExpression(member) => {
                let object = Slot {
                    parens: matches!(&*member.object, Node::Literal(lit) if lit.kind == LiteralKind::Number),
                    ..Slot::expr(CALL)
                };
                self.child(path, "object", None, object);
                self.member_property(path, member.computed, &member.property);
            }
        }
    }

    fn for_statement(&mut self, path: &NodePath<'_>, has_test: bool, has_update: bool) {
        self.writer.write("for");
        self.writer.space_if_format();
        self.writer.write("(");
        let init = Slot {
            no_in: true,
            bare_declaration: true,
            ..Slot::expr(SEQUENCE)
        };
        self.child(path, "init", None, init);
        self.writer.write(";");
        if has_test {
            self.writer.space_if_format();
            self.child(path, "test", None, Slot::expr(SEQUENCE));
        }
        self.writer.write(";");
        if has_update {
            self.writer.space_if_format();
            self.child(path, "update", None, Slot::expr(SEQUENCE));
        }
        self.writer.write(")");
        self.writer.space_if_format();
        self.body(path);
    }

    fn jump(&mut self, path: &NodePath<'_>, keyword: &str, has_label: bool) {
        self.writer.write(keyword);
        if has_label {
            self.writer.space();
            self.child(path, "label", None, Slot::default());
        }
        self.writer.end_statement();
    }

    fn function(&mut self, path: &NodePath<'_>, function: &Function) {
        if function.is_async {
            self.writer.write("async");
            self.writer.space();
        }
        self.writer.write("function");
        if function.generator {
            self.writer.write("*");
        }
        if function.id.is_some() {
            self.writer.space_if_format();
            self.child(path, "id", None, Slot::default());
        }
        self.writer.write("(");
        self.list(path, "params", function.params.len(), Slot::default());
        self.writer.write(")");
        self.writer.space_if_format();
        self.body(path);
    }

    fn literal(&mut self, literal: &Literal) {
        // After a word or a closing bracket a `/` lexes as division; after a `/` it would open a comment.
        let guard = literal.kind == LiteralKind::Regex
            && self
                .writer
                .last_token_char()
                .is_some_and(|c| is_word_char(c) || matches!(c, ')' | ']' | '"' | '\'' | '`' | '/'));
        if guard {
            self.writer.write("(");
        }
        self.writer.write(&literal.raw);
        if guard {
            self.writer.write(")");
        }
    }

    fn member_property(&mut self, path: &NodePath<'_>, computed: bool, property: &Node) {
        let mode = self.writer.options().computed_mode;
        if mode == ComputedMode::OffComputed && computed {
            if let Some(name) = dot_name(property) {
                self.writer.write(".");
                self.writer.write(name);
                return;
            }
        }
        match (mode, computed, property) {
            (ComputedMode::OnComputed, false, Node::Identifier(identifier)) => {
                self.writer.write("[\"");
                self.writer.write(&identifier.name);
                self.writer.write("\"]");
            }
            (_, true, _) => {
                self.writer.write("[");
                self.child(path, "property", None, Slot::expr(SEQUENCE));
                self.writer.write("]");
            }
            (_, false, _) => {
                self.writer.write(".");
                self.child(path, "property", None, Slot::default());
            }
        }
    }
}

impl Visitor for CodeGenerator {
    fn enter(&mut self, path: &NodePath<'_>) {
        path.skip();
        let slot = std::mem::take(&mut self.slot);
        let node = path.node();
        let wrap = slot.parens
            || precedence(&node) < slot.min_prec
            || (slot.no_in && matches!(&*node, Node::BinaryExpression(b) if b.operator == OperatorId::In));

        // Parentheses lift the for-head restriction for everything inside them.
        self.no_in = slot.no_in && !wrap;
        if wrap {
            self.writer.write("(");
        }
        self.emit(path, &node, slot);
        if wrap {
            self.writer.write(")");
        }
    }
}

/// Binding strength of an expression; statements never need parentheses.
fn precedence(node: &Node) -> u8 {
    match node {
        Node::SequenceExpression(_) => SEQUENCE,
        Node::AssignmentExpression(_) => ASSIGNMENT,
        Node::ConditionalExpression(_) => CONDITIONAL,
        Node::BinaryExpression(binary) => operators::precedence(binary.operator).unwrap_or(CONDITIONAL + 1),
        Node::UnaryExpression(_) => UNARY,
        Node::UpdateExpression(update) if update.prefix => UNARY,
        Node::UpdateExpression(_) => POSTFIX,
        Node::CallExpression(_) | Node::MemberExpression(_) | Node::NewExpression(_) => CALL,
        _ => PRIMARY,
    }
}

/// Return `true` if an expression statement would begin with `function` or `{` and so parse as something else.
fn starts_like_statement(node: &Node) -> bool {
    match node {
        Node::FunctionExpression(_) | Node::ObjectExpression(_) => true,
        Node::BinaryExpression(binary) => starts_like_statement(&binary.left),
        Node::AssignmentExpression(assignment) => starts_like_statement(&assignment.left),
        Node::ConditionalExpression(conditional) => starts_like_statement(&conditional.test),
        Node::SequenceExpression(sequence) => sequence.expressions.first().is_some_and(starts_like_statement),
        Node::CallExpression(call) => starts_like_statement(&call.callee),
        Node::MemberExpression(member) => starts_like_statement(&member.object),
        Node::UpdateExpression(update) if !update.prefix => starts_like_statement(&update.argument),
        _ => false,
    }
}

/// Return `true` if `node` may print with `}` or a postfix `++`/`--` last, after which `/` starts a regex.
fn ends_with_brace(node: &Node) -> bool {
    match node {
        Node::ObjectExpression(_) | Node::FunctionExpression(_) => true,
        Node::UpdateExpression(update) => !update.prefix,
        Node::BinaryExpression(binary) => ends_with_brace(&binary.right),
        Node::AssignmentExpression(assignment) => ends_with_brace(&assignment.right),
        Node::ConditionalExpression(conditional) => ends_with_brace(&conditional.alternate),
        Node::UnaryExpression(unary) => ends_with_brace(&unary.argument),
        Node::SequenceExpression(sequence) => sequence.expressions.last().is_some_and(ends_with_brace),
        _ => false,
    }
}

/// Return `true` if a `new` callee can be written bare: a primary with accessors but no calls.
fn is_plain_member_chain(node: &Node) -> bool {
    match node {
        Node::Identifier(_) | Node::ThisExpression(_) | Node::Literal(_) => true,
        Node::ArrayExpression(_) | Node::ObjectExpression(_) => true,
        Node::MemberExpression(member) => is_plain_member_chain(&member.object),
        _ => false,
    }
}

/// Return `true` if `stmt` ends in an `if` without `else`, which would capture a following `else`.
fn ends_with_open_if(stmt: &Node) -> bool {
    match stmt {
        Node::IfStatement(inner) => match &inner.alternate {
            None => true,
            Some(alternate) => ends_with_open_if(alternate),
        },
        Node::WhileStatement(inner) => ends_with_open_if(&inner.body),
        Node::ForStatement(inner) => ends_with_open_if(&inner.body),
        Node::ForInStatement(inner) => ends_with_open_if(&inner.body),
        Node::WithStatement(inner) => ends_with_open_if(&inner.body),
        Node::LabeledStatement(inner) => ends_with_open_if(&inner.body),
        _ => false,
    }
}

/// The name inside a string literal such as `"name"`, if it can be written after a `.`.
fn dot_name(property: &Node) -> Option<&str> {
    let Node::Literal(literal) = property else {
        return None;
    };
    if literal.kind != LiteralKind::String {
        return None;
    }
    let inner = literal.raw.get(1..literal.raw.len().checked_sub(1)?)?;
    let mut chars = inner.chars();
    let first = chars.next()?;
    let valid = (first.is_alphabetic() || first == '_' || first == '$') && chars.all(is_word_char);
    valid.then_some(inner)
}
