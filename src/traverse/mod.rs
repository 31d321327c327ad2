//! Traversal and transform engine
//!
//! A depth-first walk over the AST driven by the child-field schema ([`child_fields`]). For every node the engine
//! builds a transient [`NodePath`], calls [`Visitor::enter`], descends into the schema's child fields in declared
//! order unless the visit was skipped, then calls [`Visitor::exit`].
//!
//! ## Ownership
//!
//! The tree being walked is owned by a [`Tree`] for the duration of the walk. Paths never hold references into the
//! tree; they hold a [`Location`] (the field/index steps from the root) and resolve it on demand. Per-visit state
//! (skip, remove, replace, memoized scope) lives on the path itself, so a nested walk over the same subtree (scope
//! construction does this) cannot disturb the outer walk.
//!
//! ## Mutation
//!
//! - `replace_with` writes the new node into the parent slot immediately; if requested in `enter`, descent walks the
//!   replacement's children.
//! - `remove` detaches the node after `exit`. Removing a list element shifts later siblings down; the walk does not
//!   skip them.
//! - Using both on one visit panics, as does removing the root or a node in a required field.
//!
//! [`child_fields`]: jsfront_syntax::ast::child_fields

mod path;
mod scope;

pub use path::NodePath;
pub use scope::{Binding, BindingKind, Scope};

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;

use jsfront_syntax::ast::Node;

/// One step from a parent node to a child: the field name and, for list fields, the slot index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step {
    pub field: &'static str,
    pub index: Option<usize>,
}

/// Structural position of a node: the steps taken from the root to reach it.
///
/// A location is the persistent identity of a path; bindings record locations rather than paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Location {
    steps: Vec<Step>,
}

impl Location {
    /// The root location (no steps).
    pub fn root() -> Self {
        Self::default()
    }

    /// Location of a child reached through `field` (and `index` for list fields).
    pub fn child(&self, field: &'static str, index: Option<usize>) -> Self {
        let mut steps = self.steps.clone();
        steps.push(Step { field, index });
        Self { steps }
    }

    /// Location of the parent node; `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.steps.split_last()?;
        Some(Self { steps: rest.to_vec() })
    }

    /// The final step, i.e. how the parent reaches this node.
    pub fn last(&self) -> Option<Step> {
        self.steps.last().copied()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    /// Return `true` if `self` is `other` or lies inside it.
    pub fn starts_with(&self, other: &Location) -> bool {
        self.steps.starts_with(&other.steps)
    }

    /// Follow the steps from `root`.
    pub fn resolve<'n>(&self, root: &'n Node) -> Option<&'n Node> {
        self.steps
            .iter()
            .try_fold(root, |node, step| node.child(step.field, step.index))
    }

    pub fn resolve_mut<'n>(&self, root: &'n mut Node) -> Option<&'n mut Node> {
        let mut node = root;
        for step in &self.steps {
            node = node.child_mut(step.field, step.index)?;
        }
        Some(node)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return f.write_str("<root>");
        }
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(step.field)?;
            if let Some(index) = step.index {
                write!(f, "[{index}]")?;
            }
        }
        Ok(())
    }
}

/// Owner of the tree during a walk.
#[derive(Debug)]
pub struct Tree {
    root: RefCell<Node>,
}

impl Tree {
    pub fn new(root: Node) -> Self {
        Self {
            root: RefCell::new(root),
        }
    }

    /// Give the (possibly transformed) tree back.
    pub fn into_inner(self) -> Node {
        self.root.into_inner()
    }

    /// Borrow the root node.
    ///
    /// ## Panics
    /// If a mutation is in progress (a `Ref` must not be held across `replace_with`).
    pub fn root(&self) -> Ref<'_, Node> {
        self.root.borrow()
    }

    /// Borrow the node at `location`, if the location still resolves.
    pub fn node_at(&self, location: &Location) -> Option<Ref<'_, Node>> {
        Ref::filter_map(self.root.borrow(), |root| location.resolve(root)).ok()
    }

    pub(crate) fn node_at_mut(&self, location: &Location) -> Option<RefMut<'_, Node>> {
        RefMut::filter_map(self.root.borrow_mut(), |root| location.resolve_mut(root)).ok()
    }

    /// Walk the whole tree with `visitor`, starting at the root.
    pub fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        path::visit(self, None, Location::root(), visitor);
    }
}

/// Callbacks invoked by the engine. Both default to doing nothing.
pub trait Visitor {
    fn enter(&mut self, path: &NodePath<'_>) {
        let _ = path;
    }

    fn exit(&mut self, path: &NodePath<'_>) {
        let _ = path;
    }
}

impl<V: Visitor + ?Sized> Visitor for &mut V {
    fn enter(&mut self, path: &NodePath<'_>) {
        (**self).enter(path);
    }

    fn exit(&mut self, path: &NodePath<'_>) {
        (**self).exit(path);
    }
}

/// Visitor built from an `enter` closure.
pub struct FnVisitor<F> {
    enter: F,
}

impl<F> Visitor for FnVisitor<F>
where
    F: FnMut(&NodePath<'_>),
{
    fn enter(&mut self, path: &NodePath<'_>) {
        (self.enter)(path);
    }
}

/// Wrap an `enter` closure as a [`Visitor`].
///
/// ```rust
/// use jsfront::parser::parse_source;
/// use jsfront::traverse::{traverse, visitor_fn};
///
/// let mut program = parse_source("a + b").unwrap();
/// let mut names = Vec::new();
/// traverse(&mut program, &mut visitor_fn(|path| {
///     if let Some(name) = path.node().identifier_name() {
///         names.push(name.to_string());
///     }
/// }));
/// assert_eq!(names, ["a", "b"]);
/// ```
pub fn visitor_fn<F>(enter: F) -> FnVisitor<F>
where
    F: FnMut(&NodePath<'_>),
{
    FnVisitor { enter }
}

/// Walk `node` depth-first with `visitor`, applying any mutations the visitor requests.
#[tracing::instrument(skip_all, fields(root = %node.type_tag()))]
pub fn traverse<V: Visitor + ?Sized>(node: &mut Node, visitor: &mut V) {
    let tree = Tree::new(std::mem::take(node));
    tree.walk(visitor);
    *node = tree.into_inner();
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsfront_syntax::ast::NodeType;
    use jsfront_syntax::parser::parse_source;

    fn types_in_order(source: &str) -> Vec<NodeType> {
        let mut program = parse_source(source).unwrap();
        let mut seen = Vec::new();
        traverse(&mut program, &mut visitor_fn(|path| seen.push(path.type_tag())));
        seen
    }

    #[test]
    fn test_location_display_and_parent() {
        let loc = Location::root().child("body", Some(2)).child("expression", None);
        assert_eq!(loc.to_string(), "body[2].expression");
        assert_eq!(loc.parent().unwrap().to_string(), "body[2]");
        assert_eq!(Location::root().to_string(), "<root>");
        assert!(Location::root().parent().is_none());
        assert!(loc.starts_with(&Location::root().child("body", Some(2))));
    }

    #[test]
    fn test_location_resolves_against_tree() {
        let program = parse_source("a; b + c;").unwrap();
        let loc = Location::root()
            .child("body", Some(1))
            .child("expression", None)
            .child("right", None);
        assert_eq!(loc.resolve(&program).unwrap().identifier_name(), Some("c"));
        let missing = Location::root().child("body", Some(9));
        assert!(missing.resolve(&program).is_none());
    }

    #[test]
    fn test_preorder_visit_order() {
        assert_eq!(
            types_in_order("x = a * b;"),
            vec![
                NodeType::Program,
                NodeType::ExpressionStatement,
                NodeType::AssignmentExpression,
                NodeType::Identifier,
                NodeType::BinaryExpression,
                NodeType::Identifier,
                NodeType::Identifier,
            ]
        );
    }

    #[test]
    fn test_exit_is_postorder() {
        struct Order(Vec<String>);
        impl Visitor for Order {
            fn enter(&mut self, path: &NodePath<'_>) {
                self.0.push(format!("+{}", path.type_tag()));
            }
            fn exit(&mut self, path: &NodePath<'_>) {
                self.0.push(format!("-{}", path.type_tag()));
            }
        }
        let mut program = parse_source("f()").unwrap();
        let mut order = Order(Vec::new());
        traverse(&mut program, &mut order);
        assert_eq!(
            order.0,
            [
                "+Program",
                "+ExpressionStatement",
                "+CallExpression",
                "+Identifier",
                "-Identifier",
                "-CallExpression",
                "-ExpressionStatement",
                "-Program",
            ]
        );
    }

    #[test]
    fn test_array_holes_are_not_visited() {
        let seen = types_in_order("[a, , b]");
        let identifiers = seen.iter().filter(|t| **t == NodeType::Identifier).count();
        assert_eq!(identifiers, 2);
    }

    #[test]
    fn test_tree_round_trips_node() {
        let program = parse_source("let a = 1").unwrap();
        let tree = Tree::new(program.clone());
        assert_eq!(tree.root().type_tag(), NodeType::Program);
        assert_eq!(tree.into_inner(), program);
    }
}
