//! `NodePath`: the per-visit handle a visitor receives.

use std::cell::{Cell, OnceCell, Ref};
use std::rc::Rc;

use jsfront_syntax::ast::{FieldMut, FieldRef, Node, NodeType, child_fields};

use super::scope::Scope;
use super::{Location, Tree, Visitor};
use crate::types;

/// A node plus its structural position, valid for one visit.
///
/// Paths form a chain through [`NodePath::parent_path`] back to the path the walk started from. The node itself is
/// borrowed from the [`Tree`] on demand via [`NodePath::node`]; do not hold that borrow across `replace_with`.
#[derive(Debug)]
pub struct NodePath<'a> {
    tree: &'a Tree,
    parent: Option<&'a NodePath<'a>>,
    location: Location,
    skipped: Cell<bool>,
    removed: Cell<bool>,
    replaced: Cell<bool>,
    scope: OnceCell<Option<Rc<Scope>>>,
}

/// Run one visit of the node at `location`. Returns `true` if the node was removed from its parent.
pub(super) fn visit<'a, V: Visitor + ?Sized>(
    tree: &'a Tree,
    parent: Option<&'a NodePath<'a>>,
    location: Location,
    visitor: &mut V,
) -> bool {
    NodePath::new(tree, parent, location).run(visitor)
}

impl<'a> NodePath<'a> {
    fn new(tree: &'a Tree, parent: Option<&'a NodePath<'a>>, location: Location) -> Self {
        Self {
            tree,
            parent,
            location,
            skipped: Cell::new(false),
            removed: Cell::new(false),
            replaced: Cell::new(false),
            scope: OnceCell::new(),
        }
    }

    fn run<V: Visitor + ?Sized>(&self, visitor: &mut V) -> bool {
        visitor.enter(self);
        if self.skipped.get() {
            return self.commit_removal();
        }
        if !self.removed.get() {
            self.walk_children(visitor);
        }
        visitor.exit(self);
        self.commit_removal()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Borrow the node this path points at.
    pub fn node(&self) -> Ref<'a, Node> {
        self.tree
            .node_at(&self.location)
            .expect("INVARIANT: a live path always resolves to a node")
    }

    pub fn type_tag(&self) -> NodeType {
        self.node().type_tag()
    }

    /// Borrow the parent node, if any.
    pub fn parent(&self) -> Option<Ref<'a, Node>> {
        self.parent.map(NodePath::node)
    }

    pub fn parent_path(&self) -> Option<&'a NodePath<'a>> {
        self.parent
    }

    /// Name of the parent field holding this node.
    pub fn key(&self) -> Option<&'static str> {
        self.location.last().map(|step| step.field)
    }

    /// Index within the parent's list field, for list members.
    pub fn list_key(&self) -> Option<usize> {
        self.location.last().and_then(|step| step.index)
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn tree(&self) -> &'a Tree {
        self.tree
    }

    /// Return `true` for `Program` and `BlockStatement` paths.
    pub fn is_block(&self) -> bool {
        self.node().is_block()
    }

    // ========================================================================
    // Directives
    // ========================================================================

    /// Do not descend into this node's children on this visit. `exit` is not called for a skipped node.
    pub fn skip(&self) {
        self.skipped.set(true);
    }

    pub fn is_skipped(&self) -> bool {
        self.skipped.get()
    }

    pub fn is_removed(&self) -> bool {
        self.removed.get()
    }

    /// Detach this node from its parent once the visit finishes.
    ///
    /// ## Panics
    /// - if `replace_with` was already called on this visit
    /// - if this is the root, or the node sits in a field that cannot be empty
    pub fn remove(&self) {
        assert!(
            !self.replaced.get(),
            "cannot remove a node that was replaced during the same visit"
        );
        let (Some(step), Some(parent)) = (self.location.last(), self.parent()) else {
            panic!("cannot remove the root node");
        };
        if let Some(FieldRef::Required(_)) = parent.field(step.field) {
            panic!(
                "cannot remove `{}` of {}: the field is required",
                step.field,
                parent.type_tag()
            );
        }
        self.removed.set(true);
    }

    /// Substitute `node` at this position in the parent.
    ///
    /// ## Panics
    /// If `remove` was already called on this visit, or the node is currently borrowed via [`NodePath::node`].
    pub fn replace_with(&self, node: Node) {
        assert!(
            !self.removed.get(),
            "cannot replace a node that was removed during the same visit"
        );
        self.replaced.set(true);
        let mut slot = self
            .tree
            .node_at_mut(&self.location)
            .expect("INVARIANT: a live path always resolves to a node");
        tracing::trace!(location = %self.location, from = %slot.type_tag(), to = %node.type_tag(), "replace node");
        *slot = node;
    }

    /// Replace this node with raw source text that the generator emits verbatim.
    pub fn replace_with_source(&self, source: impl Into<String>) {
        self.replace_with(types::source_code(source));
    }

    // ========================================================================
    // Descent
    // ========================================================================

    /// Descend into one child field with `visitor`: every slot of a list field when `index` is `None`, or a single
    /// slot. Unknown or empty fields are ignored.
    pub fn traverse<V: Visitor + ?Sized>(&self, visitor: &mut V, field: &str, index: Option<usize>) {
        let Some(field) = self.child_field(field) else {
            tracing::trace!(location = %self.location, field, "no such child field");
            return;
        };
        match index {
            Some(index) => {
                self.visit_child(visitor, field, Some(index));
            }
            None => self.walk_field(visitor, field),
        }
    }

    /// Walk this node and its subtree with a different visitor, as a fresh visit that shares this path's parent
    /// chain. State set on the inner visit (skip, memoized scope) is independent of this one.
    pub fn traverse_subtree<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        let inner = NodePath::new(self.tree, self.parent, self.location.clone());
        inner.run(visitor);
    }

    fn child_field(&self, name: &str) -> Option<&'static str> {
        child_fields(self.type_tag()).iter().copied().find(|field| *field == name)
    }

    fn walk_children<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        for &field in child_fields(self.type_tag()) {
            self.walk_field(visitor, field);
        }
    }

    fn walk_field<V: Visitor + ?Sized>(&self, visitor: &mut V, field: &'static str) {
        let len = self.node().field(field).and_then(|f| f.list_len());
        let Some(mut remaining) = len else {
            self.visit_child(visitor, field, None);
            return;
        };
        let mut index = 0;
        while remaining > 0 {
            if !self.visit_child(visitor, field, Some(index)) {
                index += 1;
            }
            remaining -= 1;
        }
    }

    /// Visit one child if present (holes and `None` are skipped). Returns `true` if the child was removed.
    fn visit_child<V: Visitor + ?Sized>(&self, visitor: &mut V, field: &'static str, index: Option<usize>) -> bool {
        if self.node().child(field, index).is_none() {
            return false;
        }
        visit(self.tree, Some(self), self.location.child(field, index), visitor)
    }

    fn commit_removal(&self) -> bool {
        if !self.removed.get() {
            return false;
        }
        let (Some(step), Some(parent_location)) = (self.location.last(), self.location.parent()) else {
            return false;
        };
        let mut parent = self
            .tree
            .node_at_mut(&parent_location)
            .expect("INVARIANT: the parent of a live path resolves");
        match (parent.field_mut(step.field), step.index) {
            (Some(FieldMut::Optional(slot)), None) => *slot = None,
            (Some(FieldMut::List(items)), Some(i)) if i < items.len() => {
                items.remove(i);
            }
            (Some(FieldMut::SparseList(items)), Some(i)) if i < items.len() => {
                items.remove(i);
            }
            _ => unreachable!("INVARIANT: remove() only marks removable slots"),
        }
        tracing::trace!(location = %self.location, "removed node");
        true
    }

    // ========================================================================
    // Ancestry
    // ========================================================================

    /// First path, starting with this one and walking up, for which `predicate` holds.
    pub fn find(&self, mut predicate: impl FnMut(&NodePath<'a>) -> bool) -> Option<&NodePath<'a>> {
        if predicate(self) {
            return Some(self);
        }
        self.find_parent(predicate)
    }

    /// Like [`NodePath::find`], but starting at the parent.
    pub fn find_parent(&self, mut predicate: impl FnMut(&NodePath<'a>) -> bool) -> Option<&NodePath<'a>> {
        let mut current = self.parent;
        while let Some(path) = current {
            if predicate(path) {
                return Some(path);
            }
            current = path.parent;
        }
        None
    }

    /// Lexical scope of this path, computed on first access and memoized.
    ///
    /// Block paths (`Program`, `BlockStatement`) own a new scope; every other path shares its parent's. A walk
    /// rooted below any block has no scope.
    pub fn scope(&self) -> Option<Rc<Scope>> {
        self.scope
            .get_or_init(|| {
                if self.is_block() {
                    Some(Rc::new(Scope::build(self)))
                } else {
                    self.parent.and_then(NodePath::scope)
                }
            })
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traverse::{traverse, visitor_fn};
    use crate::types;
    use jsfront_syntax::ast::NodeType;
    use jsfront_syntax::parser::parse_source;

    fn identifiers(node: &Node) -> Vec<String> {
        let mut node = node.clone();
        let mut names = Vec::new();
        traverse(
            &mut node,
            &mut visitor_fn(|path| {
                if let Some(name) = path.node().identifier_name() {
                    names.push(name.to_string());
                }
            }),
        );
        names
    }

    #[test]
    fn test_key_and_list_key() {
        let mut program = parse_source("a; b;").unwrap();
        let mut seen = Vec::new();
        traverse(
            &mut program,
            &mut visitor_fn(|path| seen.push((path.type_tag(), path.key(), path.list_key()))),
        );
        assert_eq!(seen[0], (NodeType::Program, None, None));
        assert_eq!(seen[1], (NodeType::ExpressionStatement, Some("body"), Some(0)));
        assert_eq!(seen[2], (NodeType::Identifier, Some("expression"), None));
        assert_eq!(seen[3], (NodeType::ExpressionStatement, Some("body"), Some(1)));
    }

    #[test]
    fn test_skip_prevents_descent() {
        let mut program = parse_source("function f(a) { b; } c;").unwrap();
        let mut names = Vec::new();
        traverse(
            &mut program,
            &mut visitor_fn(|path| {
                if path.type_tag() == NodeType::FunctionDeclaration {
                    path.skip();
                }
                if let Some(name) = path.node().identifier_name() {
                    names.push(name.to_string());
                }
            }),
        );
        assert_eq!(names, ["c"]);
    }

    #[test]
    fn test_skip_suppresses_exit() {
        struct Exits(Vec<NodeType>);
        impl Visitor for Exits {
            fn enter(&mut self, path: &NodePath<'_>) {
                if path.type_tag() == NodeType::CallExpression {
                    path.skip();
                }
            }
            fn exit(&mut self, path: &NodePath<'_>) {
                self.0.push(path.type_tag());
            }
        }
        let mut program = parse_source("f(x)").unwrap();
        let mut exits = Exits(Vec::new());
        traverse(&mut program, &mut exits);
        assert_eq!(exits.0, [NodeType::ExpressionStatement, NodeType::Program]);
    }

    #[test]
    fn test_remove_list_member_does_not_skip_sibling() {
        let mut program = parse_source("a; b; c;").unwrap();
        let mut visited = Vec::new();
        traverse(
            &mut program,
            &mut visitor_fn(|path| {
                if path.type_tag() != NodeType::ExpressionStatement {
                    return;
                }
                let name = match &*path.node() {
                    Node::ExpressionStatement(stmt) => stmt.expression.identifier_name().map(str::to_string),
                    _ => None,
                };
                if let Some(name) = name {
                    if name == "a" || name == "b" {
                        path.remove();
                    }
                    visited.push(name);
                }
            }),
        );
        assert_eq!(visited, ["a", "b", "c"]);
        assert_eq!(identifiers(&program), ["c"]);
    }

    #[test]
    fn test_remove_optional_field_sets_none() {
        let mut program = parse_source("let x = 1;").unwrap();
        traverse(
            &mut program,
            &mut visitor_fn(|path| {
                if path.key() == Some("init") {
                    path.remove();
                }
            }),
        );
        let Node::Program(p) = &program else { unreachable!() };
        let Node::VariableDeclaration(decl) = &p.body[0] else { unreachable!() };
        let Node::VariableDeclarator(d) = &decl.declarations[0] else { unreachable!() };
        assert!(d.init.is_none());
    }

    #[test]
    fn test_remove_array_element_removes_slot() {
        let mut program = parse_source("[a, b, c]").unwrap();
        traverse(
            &mut program,
            &mut visitor_fn(|path| {
                if path.node().identifier_name() == Some("b") {
                    path.remove();
                }
            }),
        );
        assert_eq!(identifiers(&program), ["a", "c"]);
    }

    #[test]
    fn test_replace_in_enter_walks_replacement() {
        let mut program = parse_source("x;").unwrap();
        let mut names = Vec::new();
        traverse(
            &mut program,
            &mut visitor_fn(|path| {
                if path.node().identifier_name() == Some("x") {
                    path.replace_with(types::binary_expression(
                        types::identifier("y"),
                        jsfront_core::lang::operators::OperatorId::Plus,
                        types::identifier("z"),
                    ));
                }
                if let Some(name) = path.node().identifier_name() {
                    names.push(name.to_string());
                }
            }),
        );
        assert_eq!(names, ["y", "z"]);
        assert_eq!(identifiers(&program), ["y", "z"]);
    }

    #[test]
    fn test_replace_with_source() {
        let mut program = parse_source("a + b").unwrap();
        traverse(
            &mut program,
            &mut visitor_fn(|path| {
                if path.type_tag() == NodeType::BinaryExpression {
                    path.replace_with_source("c");
                }
            }),
        );
        let Node::Program(p) = &program else { unreachable!() };
        let Node::ExpressionStatement(stmt) = &p.body[0] else { unreachable!() };
        assert!(matches!(&*stmt.expression, Node::SourceCode(code) if code.source == "c"));
    }

    #[test]
    #[should_panic(expected = "replaced during the same visit")]
    fn test_replace_then_remove_panics() {
        let mut program = parse_source("a;").unwrap();
        traverse(
            &mut program,
            &mut visitor_fn(|path| {
                if path.type_tag() == NodeType::ExpressionStatement {
                    path.replace_with(types::empty_statement());
                    path.remove();
                }
            }),
        );
    }

    #[test]
    #[should_panic(expected = "removed during the same visit")]
    fn test_remove_then_replace_panics() {
        let mut program = parse_source("a;").unwrap();
        traverse(
            &mut program,
            &mut visitor_fn(|path| {
                if path.type_tag() == NodeType::ExpressionStatement {
                    path.remove();
                    path.replace_with(types::empty_statement());
                }
            }),
        );
    }

    #[test]
    #[should_panic(expected = "the field is required")]
    fn test_remove_required_field_panics() {
        let mut program = parse_source("a + b").unwrap();
        traverse(
            &mut program,
            &mut visitor_fn(|path| {
                if path.key() == Some("left") {
                    path.remove();
                }
            }),
        );
    }

    #[test]
    #[should_panic(expected = "root")]
    fn test_remove_root_panics() {
        let mut program = parse_source("a").unwrap();
        traverse(&mut program, &mut visitor_fn(|path| path.remove()));
    }

    #[test]
    fn test_explicit_traverse_controls_order() {
        struct Reversed(Vec<String>);
        impl Visitor for Reversed {
            fn enter(&mut self, path: &NodePath<'_>) {
                if path.type_tag() == NodeType::BinaryExpression {
                    path.skip();
                    path.traverse(self, "right", None);
                    path.traverse(self, "left", None);
                    return;
                }
                if let Some(name) = path.node().identifier_name() {
                    self.0.push(name.to_string());
                }
            }
        }
        let mut program = parse_source("a - b").unwrap();
        let mut visitor = Reversed(Vec::new());
        traverse(&mut program, &mut visitor);
        assert_eq!(visitor.0, ["b", "a"]);
    }

    #[test]
    fn test_explicit_traverse_single_index_and_unknown_field() {
        struct Second(Vec<String>);
        impl Visitor for Second {
            fn enter(&mut self, path: &NodePath<'_>) {
                if path.type_tag() == NodeType::CallExpression {
                    path.skip();
                    path.traverse(self, "arguments", Some(1));
                    path.traverse(self, "nonsense", None);
                    path.traverse(self, "arguments", Some(7));
                    return;
                }
                if let Some(name) = path.node().identifier_name() {
                    self.0.push(name.to_string());
                }
            }
        }
        let mut program = parse_source("f(a, b, c)").unwrap();
        let mut visitor = Second(Vec::new());
        traverse(&mut program, &mut visitor);
        assert_eq!(visitor.0, ["b"]);
    }

    #[test]
    fn test_find_and_find_parent() {
        let mut program = parse_source("function f() { return g(x); }").unwrap();
        let mut found = None;
        traverse(
            &mut program,
            &mut visitor_fn(|path| {
                if path.node().identifier_name() != Some("x") {
                    return;
                }
                let call = path.find_parent(|p| p.type_tag() == NodeType::CallExpression);
                let function = path.find(|p| p.type_tag() == NodeType::FunctionDeclaration);
                let itself = path.find(|p| p.type_tag() == NodeType::Identifier);
                let missing = path.find_parent(|p| p.type_tag() == NodeType::WhileStatement);
                found = Some((
                    call.map(|p| p.location().to_string()),
                    function.map(|p| p.location().to_string()),
                    itself.map(|p| p.location() == path.location()),
                    missing.is_none(),
                ));
            }),
        );
        let (call, function, itself, missing) = found.unwrap();
        assert_eq!(call.as_deref(), Some("body[0].body.body[0].argument"));
        assert_eq!(function.as_deref(), Some("body[0]"));
        assert_eq!(itself, Some(true));
        assert!(missing);
    }

    #[test]
    fn test_parent_accessors() {
        let mut program = parse_source("a.b").unwrap();
        let mut parents = Vec::new();
        traverse(
            &mut program,
            &mut visitor_fn(|path| {
                let parent = path.parent().map(|p| p.type_tag());
                let via_path = path.parent_path().map(NodePath::type_tag);
                assert_eq!(parent, via_path);
                parents.push(parent);
            }),
        );
        assert_eq!(parents[0], None);
        assert_eq!(parents.last().copied().flatten(), Some(NodeType::MemberExpression));
    }

    #[test]
    fn test_is_block() {
        let mut program = parse_source("{ a; }").unwrap();
        let mut blocks = 0;
        traverse(
            &mut program,
            &mut visitor_fn(|path| {
                if path.is_block() {
                    blocks += 1;
                }
            }),
        );
        assert_eq!(blocks, 2);
    }
}
