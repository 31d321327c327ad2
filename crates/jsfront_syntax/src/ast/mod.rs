//! Abstract Syntax Tree definitions.
//!
//! The tree is a closed sum type: one [`Node`] variant per grammar form, each wrapping a plain struct that carries
//! its absolute source [`Span`] plus its own fields. Child positions are always typed as [`Node`] (boxed, optional,
//! or in a list) so that a transform can substitute any node kind at any position.
//!
//! Which fields hold children is declared exactly once, in [`child_fields`]; see the `schema` module.
//!
//! ## Serialization
//!
//! Every node serializes (via `serde`) to an ESTree-shaped object: a `"type"` tag, flattened `start`/`end`, then the
//! variant's fields. [`to_json`] renders the pretty-printed dump used by the CLI.

mod schema;

pub use schema::{FieldMut, FieldRef, child_fields};

use std::fmt;

use jsfront_core::lang::keywords::KeywordId;
use jsfront_core::lang::operators::{self, OperatorId};
use serde::{Serialize, Serializer};

/// Source location span (byte offsets, half-open).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// Node catalogue
// ============================================================================

macro_rules! node_catalogue {
    ($($variant:ident($payload:ident)),* $(,)?) => {
        /// One AST node.
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(tag = "type")]
        pub enum Node {
            $($variant($payload),)*
        }

        /// Fieldless tag identifying a [`Node`] variant.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum NodeType {
            $($variant,)*
        }

        impl NodeType {
            /// Every node type, in catalogue order.
            pub const ALL: &'static [NodeType] = &[$(NodeType::$variant,)*];

            /// ESTree-style type name (`"BinaryExpression"`).
            pub fn as_str(self) -> &'static str {
                match self {
                    $(NodeType::$variant => stringify!($variant),)*
                }
            }
        }

        impl Node {
            /// Return the variant tag.
            pub fn type_tag(&self) -> NodeType {
                match self {
                    $(Node::$variant(_) => NodeType::$variant,)*
                }
            }

            /// Return the node's source span.
            pub fn span(&self) -> Span {
                match self {
                    $(Node::$variant(n) => n.span,)*
                }
            }

            /// Mutable access to the node's source span.
            pub fn span_mut(&mut self) -> &mut Span {
                match self {
                    $(Node::$variant(n) => &mut n.span,)*
                }
            }
        }
    };
}

node_catalogue! {
    Program(Program),
    VariableDeclaration(VariableDeclaration),
    VariableDeclarator(VariableDeclarator),
    Identifier(Identifier),
    Literal(Literal),
    BinaryExpression(BinaryExpression),
    UpdateExpression(UpdateExpression),
    AssignmentExpression(AssignmentExpression),
    UnaryExpression(UnaryExpression),
    ConditionalExpression(ConditionalExpression),
    ArrayExpression(ArrayExpression),
    SequenceExpression(SequenceExpression),
    ObjectExpression(ObjectExpression),
    Property(Property),
    FunctionExpression(Function),
    CallExpression(CallExpression),
    MemberExpression(MemberExpression),
    NewExpression(NewExpression),
    ThisExpression(ThisExpression),
    ExpressionStatement(ExpressionStatement),
    EmptyStatement(EmptyStatement),
    BlockStatement(BlockStatement),
    IfStatement(IfStatement),
    WhileStatement(WhileStatement),
    ForStatement(ForStatement),
    DoWhileStatement(DoWhileStatement),
    BreakStatement(BreakStatement),
    ContinueStatement(ContinueStatement),
    FunctionDeclaration(Function),
    ReturnStatement(ReturnStatement),
    TryStatement(TryStatement),
    CatchClause(CatchClause),
    LabeledStatement(LabeledStatement),
    DebuggerStatement(DebuggerStatement),
    SwitchStatement(SwitchStatement),
    SwitchCase(SwitchCase),
    WithStatement(WithStatement),
    ThrowStatement(ThrowStatement),
    ForInStatement(ForInStatement),
    SourceCode(SourceCode),
}

impl Node {
    pub fn start(&self) -> usize {
        self.span().start
    }

    pub fn end(&self) -> usize {
        self.span().end
    }

    /// Return `true` for `Program` and `BlockStatement`, the nodes that own a lexical scope.
    pub fn is_block(&self) -> bool {
        matches!(self, Node::Program(_) | Node::BlockStatement(_))
    }

    /// Return `true` for function declarations and function expressions.
    pub fn is_function(&self) -> bool {
        matches!(self, Node::FunctionDeclaration(_) | Node::FunctionExpression(_))
    }

    /// Return `true` if the node may appear on the left of an assignment or as an update target.
    pub fn is_assignable(&self) -> bool {
        matches!(self, Node::Identifier(_) | Node::MemberExpression(_))
    }

    /// Identifier name, if this is an `Identifier`.
    pub fn identifier_name(&self) -> Option<&str> {
        match self {
            Node::Identifier(id) => Some(&id.name),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Node::FunctionDeclaration(f) | Node::FunctionExpression(f) => Some(f),
            _ => None,
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::EmptyStatement(EmptyStatement { span: Span::default() })
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render a node as pretty-printed JSON.
///
/// ## Errors
/// Propagates `serde_json` failures (none are expected for well-formed trees).
pub fn to_json(node: &Node) -> serde_json::Result<String> {
    serde_json::to_string_pretty(node)
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    #[serde(flatten)]
    pub span: Span,
    pub body: Vec<Node>,
    #[serde(rename = "sourceType")]
    pub source_type: SourceType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Script,
    #[default]
    Module,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclaration {
    #[serde(flatten)]
    pub span: Span,
    pub declarations: Vec<Node>,
    pub kind: VariableKind,
}

/// Declaration keyword of a `VariableDeclaration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

impl VariableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }

    /// Map a declaration keyword to its kind.
    pub fn from_keyword(id: KeywordId) -> Option<Self> {
        match id {
            KeywordId::Var => Some(VariableKind::Var),
            KeywordId::Let => Some(VariableKind::Let),
            KeywordId::Const => Some(VariableKind::Const),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclarator {
    #[serde(flatten)]
    pub span: Span,
    pub id: Box<Node>,
    pub init: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionStatement {
    #[serde(flatten)]
    pub span: Span,
    pub expression: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmptyStatement {
    #[serde(flatten)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockStatement {
    #[serde(flatten)]
    pub span: Span,
    pub body: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfStatement {
    #[serde(flatten)]
    pub span: Span,
    pub test: Box<Node>,
    pub consequent: Box<Node>,
    pub alternate: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhileStatement {
    #[serde(flatten)]
    pub span: Span,
    pub test: Box<Node>,
    pub body: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForStatement {
    #[serde(flatten)]
    pub span: Span,
    pub init: Option<Box<Node>>,
    pub test: Option<Box<Node>>,
    pub update: Option<Box<Node>>,
    pub body: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForInStatement {
    #[serde(flatten)]
    pub span: Span,
    pub left: Box<Node>,
    pub right: Box<Node>,
    pub body: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoWhileStatement {
    #[serde(flatten)]
    pub span: Span,
    pub body: Box<Node>,
    pub test: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakStatement {
    #[serde(flatten)]
    pub span: Span,
    pub label: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinueStatement {
    #[serde(flatten)]
    pub span: Span,
    pub label: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnStatement {
    #[serde(flatten)]
    pub span: Span,
    pub argument: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThrowStatement {
    #[serde(flatten)]
    pub span: Span,
    pub argument: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TryStatement {
    #[serde(flatten)]
    pub span: Span,
    pub block: Box<Node>,
    pub handler: Option<Box<Node>>,
    pub finalizer: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatchClause {
    #[serde(flatten)]
    pub span: Span,
    pub param: Box<Node>,
    pub body: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledStatement {
    #[serde(flatten)]
    pub span: Span,
    pub label: Box<Node>,
    pub body: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebuggerStatement {
    #[serde(flatten)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchStatement {
    #[serde(flatten)]
    pub span: Span,
    pub discriminant: Box<Node>,
    pub cases: Vec<Node>,
}

/// One `case` (or `default`, when `test` is `None`) arm of a switch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchCase {
    #[serde(flatten)]
    pub span: Span,
    pub test: Option<Box<Node>>,
    pub consequent: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithStatement {
    #[serde(flatten)]
    pub span: Span,
    pub object: Box<Node>,
    pub body: Box<Node>,
}

/// Shared payload of `FunctionDeclaration` and `FunctionExpression`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    #[serde(flatten)]
    pub span: Span,
    pub id: Option<Box<Node>>,
    pub params: Vec<Node>,
    pub body: Box<Node>,
    #[serde(rename = "async")]
    pub is_async: bool,
    pub generator: bool,
    pub expression: bool,
}

/// Raw source text emitted verbatim by the code generator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceCode {
    #[serde(flatten)]
    pub span: Span,
    pub source: String,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identifier {
    #[serde(flatten)]
    pub span: Span,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Literal {
    #[serde(flatten)]
    pub span: Span,
    pub kind: LiteralKind,
    /// Source text of the literal, quotes and regex flags included.
    pub raw: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralKind {
    String,
    Template,
    Number,
    Regex,
    Boolean,
    Null,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThisExpression {
    #[serde(flatten)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryExpression {
    #[serde(flatten)]
    pub span: Span,
    pub left: Box<Node>,
    #[serde(serialize_with = "serialize_operator")]
    pub operator: OperatorId,
    pub right: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentExpression {
    #[serde(flatten)]
    pub span: Span,
    #[serde(serialize_with = "serialize_operator")]
    pub operator: OperatorId,
    pub left: Box<Node>,
    pub right: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateExpression {
    #[serde(flatten)]
    pub span: Span,
    pub operator: UpdateOperator,
    pub prefix: bool,
    pub argument: Box<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UpdateOperator {
    #[serde(rename = "++")]
    Increment,
    #[serde(rename = "--")]
    Decrement,
}

impl UpdateOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            UpdateOperator::Increment => "++",
            UpdateOperator::Decrement => "--",
        }
    }

    pub fn from_operator(id: OperatorId) -> Option<Self> {
        match id {
            OperatorId::PlusPlus => Some(UpdateOperator::Increment),
            OperatorId::MinusMinus => Some(UpdateOperator::Decrement),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnaryExpression {
    #[serde(flatten)]
    pub span: Span,
    pub operator: UnaryOperator,
    pub prefix: bool,
    pub argument: Box<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnaryOperator {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "~")]
    Tilde,
    #[serde(rename = "!")]
    Bang,
    #[serde(rename = "void")]
    Void,
    #[serde(rename = "typeof")]
    Typeof,
    #[serde(rename = "delete")]
    Delete,
}

impl UnaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
            UnaryOperator::Tilde => "~",
            UnaryOperator::Bang => "!",
            UnaryOperator::Void => "void",
            UnaryOperator::Typeof => "typeof",
            UnaryOperator::Delete => "delete",
        }
    }

    /// Return `true` for the word operators, which need a space before their argument.
    pub fn is_keyword(self) -> bool {
        matches!(self, UnaryOperator::Void | UnaryOperator::Typeof | UnaryOperator::Delete)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionalExpression {
    #[serde(flatten)]
    pub span: Span,
    pub test: Box<Node>,
    pub consequent: Box<Node>,
    pub alternate: Box<Node>,
}

/// Array literal; `None` elements are holes (`[a, , b]`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayExpression {
    #[serde(flatten)]
    pub span: Span,
    pub elements: Vec<Option<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceExpression {
    #[serde(flatten)]
    pub span: Span,
    pub expressions: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectExpression {
    #[serde(flatten)]
    pub span: Span,
    pub properties: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    #[serde(flatten)]
    pub span: Span,
    pub key: Box<Node>,
    pub value: Box<Node>,
    pub computed: bool,
    pub shorthand: bool,
    pub method: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallExpression {
    #[serde(flatten)]
    pub span: Span,
    pub callee: Box<Node>,
    pub arguments: Vec<Node>,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberExpression {
    #[serde(flatten)]
    pub span: Span,
    pub object: Box<Node>,
    pub property: Box<Node>,
    pub computed: bool,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExpression {
    #[serde(flatten)]
    pub span: Span,
    pub callee: Box<Node>,
    pub arguments: Vec<Node>,
}

fn serialize_operator<S: Serializer>(id: &OperatorId, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(operators::as_str(*id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str, start: usize) -> Node {
        Node::Identifier(Identifier {
            span: Span::new(start, start + name.len()),
            name: name.to_string(),
        })
    }

    #[test]
    fn test_type_tag_and_names_agree() {
        for ty in NodeType::ALL {
            assert!(!ty.as_str().is_empty());
            assert_eq!(ty.to_string(), ty.as_str());
        }
        assert_eq!(ident("x", 0).type_tag(), NodeType::Identifier);
    }

    #[test]
    fn test_json_shape_is_estree_like() {
        let node = Node::BinaryExpression(BinaryExpression {
            span: Span::new(0, 5),
            left: Box::new(ident("a", 0)),
            operator: OperatorId::Plus,
            right: Box::new(ident("b", 4)),
        });
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["type"], "BinaryExpression");
        assert_eq!(value["start"], 0);
        assert_eq!(value["end"], 5);
        assert_eq!(value["operator"], "+");
        assert_eq!(value["left"]["name"], "a");
    }

    #[test]
    fn test_function_async_field_name() {
        let node = Node::FunctionExpression(Function {
            span: Span::new(0, 0),
            id: None,
            params: vec![],
            body: Box::new(Node::BlockStatement(BlockStatement {
                span: Span::new(0, 0),
                body: vec![],
            })),
            is_async: true,
            generator: false,
            expression: false,
        });
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["async"], true);
        assert!(value.get("is_async").is_none());
    }

    #[test]
    fn test_span_merge() {
        assert_eq!(Span::new(3, 5).merge(Span::new(1, 4)), Span::new(1, 5));
        assert!(Span::new(2, 2).is_empty());
    }
}
