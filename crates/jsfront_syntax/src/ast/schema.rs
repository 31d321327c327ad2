//! Child-field schema ("visitor keys") and by-name field access.
//!
//! [`child_fields`] is the single declaration of which fields of a node hold child nodes, in visiting order. The
//! traversal engine only ever discovers children through this table plus [`Node::field`] / [`Node::field_mut`].
//!
//! ## Notes
//! - `IfStatement` lists `test, consequent, alternate`; `WhileStatement` lists `test, body`; `SwitchCase` lists
//!   `test, consequent`; function nodes list `id, params, body`.
//! - Scalar fields (`name`, `raw`, `operator`, `kind`, flags) are never children.

use super::{Node, NodeType};

/// A child-bearing field, borrowed.
#[derive(Debug, Clone, Copy)]
pub enum FieldRef<'a> {
    /// Always present.
    Required(&'a Node),
    /// May be absent (`init`, `alternate`, `label`, ...).
    Optional(Option<&'a Node>),
    /// Ordered list of children.
    List(&'a [Node]),
    /// Ordered list that may contain holes (array elements).
    SparseList(&'a [Option<Node>]),
}

/// A child-bearing field, mutably borrowed.
#[derive(Debug)]
pub enum FieldMut<'a> {
    Required(&'a mut Node),
    Optional(&'a mut Option<Box<Node>>),
    List(&'a mut Vec<Node>),
    SparseList(&'a mut Vec<Option<Node>>),
}

impl FieldRef<'_> {
    /// Number of slots for list fields; `None` for single-node fields.
    pub fn list_len(&self) -> Option<usize> {
        match self {
            FieldRef::List(items) => Some(items.len()),
            FieldRef::SparseList(items) => Some(items.len()),
            FieldRef::Required(_) | FieldRef::Optional(_) => None,
        }
    }
}

/// Ordered child-bearing field names for a node type.
///
/// ## Returns
/// - The fields the traversal engine descends into, in visiting order. Leaf types return an empty slice.
pub fn child_fields(ty: NodeType) -> &'static [&'static str] {
    match ty {
        NodeType::Program => &["body"],
        NodeType::VariableDeclaration => &["declarations"],
        NodeType::VariableDeclarator => &["id", "init"],
        NodeType::Identifier => &[],
        NodeType::Literal => &[],
        NodeType::BinaryExpression => &["left", "right"],
        NodeType::UpdateExpression => &["argument"],
        NodeType::AssignmentExpression => &["left", "right"],
        NodeType::UnaryExpression => &["argument"],
        NodeType::ConditionalExpression => &["test", "consequent", "alternate"],
        NodeType::ArrayExpression => &["elements"],
        NodeType::SequenceExpression => &["expressions"],
        NodeType::ObjectExpression => &["properties"],
        NodeType::Property => &["key", "value"],
        NodeType::FunctionExpression => &["id", "params", "body"],
        NodeType::CallExpression => &["callee", "arguments"],
        NodeType::MemberExpression => &["object", "property"],
        NodeType::NewExpression => &["callee", "arguments"],
        NodeType::ThisExpression => &[],
        NodeType::ExpressionStatement => &["expression"],
        NodeType::EmptyStatement => &[],
        NodeType::BlockStatement => &["body"],
        NodeType::IfStatement => &["test", "consequent", "alternate"],
        NodeType::WhileStatement => &["test", "body"],
        NodeType::ForStatement => &["init", "test", "update", "body"],
        NodeType::DoWhileStatement => &["body", "test"],
        NodeType::BreakStatement => &["label"],
        NodeType::ContinueStatement => &["label"],
        NodeType::FunctionDeclaration => &["id", "params", "body"],
        NodeType::ReturnStatement => &["argument"],
        NodeType::TryStatement => &["block", "handler", "finalizer"],
        NodeType::CatchClause => &["param", "body"],
        NodeType::LabeledStatement => &["label", "body"],
        NodeType::DebuggerStatement => &[],
        NodeType::SwitchStatement => &["discriminant", "cases"],
        NodeType::SwitchCase => &["test", "consequent"],
        NodeType::WithStatement => &["object", "body"],
        NodeType::ThrowStatement => &["argument"],
        NodeType::ForInStatement => &["left", "right", "body"],
        NodeType::SourceCode => &[],
    }
}

impl Node {
    /// Borrow a child-bearing field by name.
    ///
    /// ## Returns
    /// - `None` if the node has no child-bearing field called `name`.
    pub fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        use FieldRef::{List, Optional, Required, SparseList};

        let field = match (self, name) {
            (Node::Program(n), "body") => List(&n.body),
            (Node::VariableDeclaration(n), "declarations") => List(&n.declarations),
            (Node::VariableDeclarator(n), "id") => Required(&n.id),
            (Node::VariableDeclarator(n), "init") => Optional(n.init.as_deref()),
            (Node::BinaryExpression(n), "left") => Required(&n.left),
            (Node::BinaryExpression(n), "right") => Required(&n.right),
            (Node::UpdateExpression(n), "argument") => Required(&n.argument),
            (Node::AssignmentExpression(n), "left") => Required(&n.left),
            (Node::AssignmentExpression(n), "right") => Required(&n.right),
            (Node::UnaryExpression(n), "argument") => Required(&n.argument),
            (Node::ConditionalExpression(n), "test") => Required(&n.test),
            (Node::ConditionalExpression(n), "consequent") => Required(&n.consequent),
            (Node::ConditionalExpression(n), "alternate") => Required(&n.alternate),
            (Node::ArrayExpression(n), "elements") => SparseList(&n.elements),
            (Node::SequenceExpression(n), "expressions") => List(&n.expressions),
            (Node::ObjectExpression(n), "properties") => List(&n.properties),
            (Node::Property(n), "key") => Required(&n.key),
            (Node::Property(n), "value") => Required(&n.value),
            (Node::FunctionExpression(n) | Node::FunctionDeclaration(n), "id") => Optional(n.id.as_deref()),
            (Node::FunctionExpression(n) | Node::FunctionDeclaration(n), "params") => List(&n.params),
            (Node::FunctionExpression(n) | Node::FunctionDeclaration(n), "body") => Required(&n.body),
            (Node::CallExpression(n), "callee") => Required(&n.callee),
            (Node::CallExpression(n), "arguments") => List(&n.arguments),
            (Node::MemberExpression(n), "object") => Required(&n.object),
            (Node::MemberExpression(n), "property") => Required(&n.property),
            (Node::NewExpression(n), "callee") => Required(&n.callee),
            (Node::NewExpression(n), "arguments") => List(&n.arguments),
            (Node::ExpressionStatement(n), "expression") => Required(&n.expression),
            (Node::BlockStatement(n), "body") => List(&n.body),
            (Node::IfStatement(n), "test") => Required(&n.test),
            (Node::IfStatement(n), "consequent") => Required(&n.consequent),
            (Node::IfStatement(n), "alternate") => Optional(n.alternate.as_deref()),
            (Node::WhileStatement(n), "test") => Required(&n.test),
            (Node::WhileStatement(n), "body") => Required(&n.body),
            (Node::ForStatement(n), "init") => Optional(n.init.as_deref()),
            (Node::ForStatement(n), "test") => Optional(n.test.as_deref()),
            (Node::ForStatement(n), "update") => Optional(n.update.as_deref()),
            (Node::ForStatement(n), "body") => Required(&n.body),
            (Node::DoWhileStatement(n), "body") => Required(&n.body),
            (Node::DoWhileStatement(n), "test") => Required(&n.test),
            (Node::BreakStatement(n), "label") => Optional(n.label.as_deref()),
            (Node::ContinueStatement(n), "label") => Optional(n.label.as_deref()),
            (Node::ReturnStatement(n), "argument") => Optional(n.argument.as_deref()),
            (Node::TryStatement(n), "block") => Required(&n.block),
            (Node::TryStatement(n), "handler") => Optional(n.handler.as_deref()),
            (Node::TryStatement(n), "finalizer") => Optional(n.finalizer.as_deref()),
            (Node::CatchClause(n), "param") => Required(&n.param),
            (Node::CatchClause(n), "body") => Required(&n.body),
            (Node::LabeledStatement(n), "label") => Required(&n.label),
            (Node::LabeledStatement(n), "body") => Required(&n.body),
            (Node::SwitchStatement(n), "discriminant") => Required(&n.discriminant),
            (Node::SwitchStatement(n), "cases") => List(&n.cases),
            (Node::SwitchCase(n), "test") => Optional(n.test.as_deref()),
            (Node::SwitchCase(n), "consequent") => List(&n.consequent),
            (Node::WithStatement(n), "object") => Required(&n.object),
            (Node::WithStatement(n), "body") => Required(&n.body),
            (Node::ThrowStatement(n), "argument") => Required(&n.argument),
            (Node::ForInStatement(n), "left") => Required(&n.left),
            (Node::ForInStatement(n), "right") => Required(&n.right),
            (Node::ForInStatement(n), "body") => Required(&n.body),
            _ => return None,
        };
        Some(field)
    }

    /// Mutably borrow a child-bearing field by name.
    pub fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
        use FieldMut::{List, Optional, Required, SparseList};

        let field = match (self, name) {
            (Node::Program(n), "body") => List(&mut n.body),
            (Node::VariableDeclaration(n), "declarations") => List(&mut n.declarations),
            (Node::VariableDeclarator(n), "id") => Required(&mut n.id),
            (Node::VariableDeclarator(n), "init") => Optional(&mut n.init),
            (Node::BinaryExpression(n), "left") => Required(&mut n.left),
            (Node::BinaryExpression(n), "right") => Required(&mut n.right),
            (Node::UpdateExpression(n), "argument") => Required(&mut n.argument),
            (Node::AssignmentExpression(n), "left") => Required(&mut n.left),
            (Node::AssignmentExpression(n), "right") => Required(&mut n.right),
            (Node::UnaryExpression(n), "argument") => Required(&mut n.argument),
            (Node::ConditionalExpression(n), "test") => Required(&mut n.test),
            (Node::ConditionalExpression(n), "consequent") => Required(&mut n.consequent),
            (Node::ConditionalExpression(n), "alternate") => Required(&mut n.alternate),
            (Node::ArrayExpression(n), "elements") => SparseList(&mut n.elements),
            (Node::SequenceExpression(n), "expressions") => List(&mut n.expressions),
            (Node::ObjectExpression(n), "properties") => List(&mut n.properties),
            (Node::Property(n), "key") => Required(&mut n.key),
            (Node::Property(n), "value") => Required(&mut n.value),
            (Node::FunctionExpression(n) | Node::FunctionDeclaration(n), "id") => Optional(&mut n.id),
            (Node::FunctionExpression(n) | Node::FunctionDeclaration(n), "params") => List(&mut n.params),
            (Node::FunctionExpression(n) | Node::FunctionDeclaration(n), "body") => Required(&mut n.body),
            (Node::CallExpression(n), "callee") => Required(&mut n.callee),
            (Node::CallExpression(n), "arguments") => List(&mut n.arguments),
            (Node::MemberExpression(n), "object") => Required(&mut n.object),
            (Node::MemberExpression(n), "property") => Required(&mut n.property),
            (Node::NewExpression(n), "callee") => Required(&mut n.callee),
            (Node::NewExpression(n), "arguments") => List(&mut n.arguments),
            (Node::ExpressionStatement(n), "expression") => Required(&mut n.expression),
            (Node::BlockStatement(n), "body") => List(&mut n.body),
            (Node::IfStatement(n), "test") => Required(&mut n.test),
            (Node::IfStatement(n), "consequent") => Required(&mut n.consequent),
            (Node::IfStatement(n), "alternate") => Optional(&mut n.alternate),
            (Node::WhileStatement(n), "test") => Required(&mut n.test),
            (Node::WhileStatement(n), "body") => Required(&mut n.body),
            (Node::ForStatement(n), "init") => Optional(&mut n.init),
            (Node::ForStatement(n), "test") => Optional(&mut n.test),
            (Node::ForStatement(n), "update") => Optional(&mut n.update),
            (Node::ForStatement(n), "body") => Required(&mut n.body),
            (Node::DoWhileStatement(n), "body") => Required(&mut n.body),
            (Node::DoWhileStatement(n), "test") => Required(&mut n.test),
            (Node::BreakStatement(n), "label") => Optional(&mut n.label),
            (Node::ContinueStatement(n), "label") => Optional(&mut n.label),
            (Node::ReturnStatement(n), "argument") => Optional(&mut n.argument),
            (Node::TryStatement(n), "block") => Required(&mut n.block),
            (Node::TryStatement(n), "handler") => Optional(&mut n.handler),
            (Node::TryStatement(n), "finalizer") => Optional(&mut n.finalizer),
            (Node::CatchClause(n), "param") => Required(&mut n.param),
            (Node::CatchClause(n), "body") => Required(&mut n.body),
            (Node::LabeledStatement(n), "label") => Required(&mut n.label),
            (Node::LabeledStatement(n), "body") => Required(&mut n.body),
            (Node::SwitchStatement(n), "discriminant") => Required(&mut n.discriminant),
            (Node::SwitchStatement(n), "cases") => List(&mut n.cases),
            (Node::SwitchCase(n), "test") => Optional(&mut n.test),
            (Node::SwitchCase(n), "consequent") => List(&mut n.consequent),
            (Node::WithStatement(n), "object") => Required(&mut n.object),
            (Node::WithStatement(n), "body") => Required(&mut n.body),
            (Node::ThrowStatement(n), "argument") => Required(&mut n.argument),
            (Node::ForInStatement(n), "left") => Required(&mut n.left),
            (Node::ForInStatement(n), "right") => Required(&mut n.right),
            (Node::ForInStatement(n), "body") => Required(&mut n.body),
            _ => return None,
        };
        Some(field)
    }

    /// Borrow one child: the node of a single-node field (`index` is `None`) or one slot of a list field.
    ///
    /// ## Returns
    /// - `None` when the field does not exist, is empty, is a hole, or `index` does not match the field's shape.
    pub fn child(&self, field: &str, index: Option<usize>) -> Option<&Node> {
        match (self.field(field)?, index) {
            (FieldRef::Required(node), None) => Some(node),
            (FieldRef::Optional(node), None) => node,
            (FieldRef::List(items), Some(i)) => items.get(i),
            (FieldRef::SparseList(items), Some(i)) => items.get(i)?.as_ref(),
            _ => None,
        }
    }

    /// Mutable counterpart of [`Node::child`].
    pub fn child_mut(&mut self, field: &str, index: Option<usize>) -> Option<&mut Node> {
        match (self.field_mut(field)?, index) {
            (FieldMut::Required(node), None) => Some(node),
            (FieldMut::Optional(node), None) => node.as_deref_mut(),
            (FieldMut::List(items), Some(i)) => items.get_mut(i),
            (FieldMut::SparseList(items), Some(i)) => items.get_mut(i)?.as_mut(),
            _ => None,
        }
    }
}
