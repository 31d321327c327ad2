//! Lexical scopes and bindings.
//!
//! A [`Scope`] belongs to a block path (`Program` or `BlockStatement`). It is built by a nested walk over the block's
//! own subtree that registers declarations and records identifier references; references are resolved once the walk
//! finishes, against this scope and then the parent chain. Building a scope never mutates the tree.
//!
//! ## Rules
//!
//! - `let`, `const` and function declarations bind in the block that directly contains them.
//! - `var` binds in the nearest function-level block (the program, or a function body), wherever it appears inside it.
//! - Function parameters bind in the function body; a catch parameter binds in the catch body.
//! - Nested functions are not entered: their contents belong to their own scopes.
//! - The first declaration of a name in a scope wins.

use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use jsfront_syntax::ast::{Node, VariableKind};

use super::path::NodePath;
use super::{Location, Visitor};

/// How a name was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Var,
    Let,
    Const,
    Function,
    Param,
}

impl From<VariableKind> for BindingKind {
    fn from(kind: VariableKind) -> Self {
        match kind {
            VariableKind::Var => BindingKind::Var,
            VariableKind::Let => BindingKind::Let,
            VariableKind::Const => BindingKind::Const,
        }
    }
}

/// A named declaration and the places it is referenced from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub name: String,
    /// Location of the declaring node (declarator, function declaration, or parameter).
    pub path: Location,
    pub kind: BindingKind,
    pub referenced: bool,
    pub reference_paths: Vec<Location>,
}

#[derive(Debug)]
pub struct Scope {
    block: Location,
    parent: Option<Rc<Scope>>,
    bindings: RefCell<BTreeMap<String, Binding>>,
}

impl Scope {
    /// Location of the block that owns this scope.
    pub fn block(&self) -> &Location {
        &self.block
    }

    pub fn parent(&self) -> Option<&Rc<Scope>> {
        self.parent.as_ref()
    }

    pub fn get_own_binding(&self, name: &str) -> Option<Ref<'_, Binding>> {
        Ref::filter_map(self.bindings.borrow(), |bindings| bindings.get(name)).ok()
    }

    /// Look `name` up here, then in each enclosing scope.
    pub fn get_binding(&self, name: &str) -> Option<Ref<'_, Binding>> {
        if let Some(binding) = self.get_own_binding(name) {
            return Some(binding);
        }
        self.parent.as_ref()?.get_binding(name)
    }

    pub fn has_binding(&self, name: &str) -> bool {
        self.get_binding(name).is_some()
    }

    pub fn has_own_binding(&self, name: &str) -> bool {
        self.bindings.borrow().contains_key(name)
    }

    /// Names bound directly in this scope, sorted.
    pub fn binding_names(&self) -> Vec<String> {
        self.bindings.borrow().keys().cloned().collect()
    }

    fn register(&self, name: &str, path: Location, kind: BindingKind) {
        self.bindings
            .borrow_mut()
            .entry(name.to_string())
            .or_insert_with(|| Binding {
                name: name.to_string(),
                path,
                kind,
                referenced: false,
                reference_paths: Vec::new(),
            });
    }

    /// Mark the nearest binding of `name` as referenced from `location`. Returns `false` for unresolved names.
    fn reference(&self, name: &str, location: Location) -> bool {
        if let Some(binding) = self.bindings.borrow_mut().get_mut(name) {
            binding.referenced = true;
            binding.reference_paths.push(location);
            return true;
        }
        match &self.parent {
            Some(parent) => parent.reference(name, location),
            None => false,
        }
    }

    /// Build the scope owned by the block at `path`.
    #[tracing::instrument(level = "debug", skip_all, fields(block = %path.location()))]
    pub(super) fn build(path: &NodePath<'_>) -> Scope {
        let parent_path = path.parent_path();
        let scope = Scope {
            block: path.location().clone(),
            parent: parent_path.and_then(NodePath::scope),
            bindings: RefCell::new(BTreeMap::new()),
        };

        let function_level = match parent_path {
            None => true,
            Some(parent) => parent.node().is_function(),
        };
        if let Some(parent) = parent_path {
            scope.register_params(parent);
        }

        let mut collector = Collector {
            scope: &scope,
            function_level,
            depth: 0,
            references: Vec::new(),
        };
        path.traverse_subtree(&mut collector);

        let mut unresolved = 0usize;
        for (name, location) in collector.references {
            if !scope.reference(&name, location) {
                unresolved += 1;
            }
        }
        tracing::debug!(
            bindings = scope.bindings.borrow().len(),
            unresolved,
            "scope built"
        );
        scope
    }

    /// Parameters of an enclosing function, or the parameter of an enclosing catch clause.
    fn register_params(&self, owner: &NodePath<'_>) {
        match &*owner.node() {
            Node::FunctionDeclaration(function) | Node::FunctionExpression(function) => {
                for (i, param) in function.params.iter().enumerate() {
                    if let Some(name) = param.identifier_name() {
                        self.register(name, owner.location().child("params", Some(i)), BindingKind::Param);
                    }
                }
            }
            Node::CatchClause(clause) => {
                if let Some(name) = clause.param.identifier_name() {
                    self.register(name, owner.location().child("param", None), BindingKind::Param);
                }
            }
            _ => {}
        }
    }
}

/// Nested visitor that fills a scope. `depth` counts block nodes entered, so the owning block is depth 1.
struct Collector<'s> {
    scope: &'s Scope,
    function_level: bool,
    depth: usize,
    references: Vec<(String, Location)>,
}

impl Collector<'_> {
    fn at_own_level(&self) -> bool {
        self.depth == 1
    }
}

impl Visitor for Collector<'_> {
    fn enter(&mut self, path: &NodePath<'_>) {
        let node = path.node();
        match &*node {
            Node::Program(_) | Node::BlockStatement(_) => self.depth += 1,
            Node::FunctionDeclaration(function) => {
                path.skip();
                let name = function.id.as_deref().and_then(Node::identifier_name);
                if let (true, Some(name)) = (self.at_own_level(), name) {
                    self.scope.register(name, path.location().clone(), BindingKind::Function);
                }
            }
            Node::FunctionExpression(_) => path.skip(),
            Node::VariableDeclarator(declarator) => {
                let Some(name) = declarator.id.identifier_name() else {
                    return;
                };
                let kind = match path.parent().as_deref() {
                    Some(Node::VariableDeclaration(declaration)) => BindingKind::from(declaration.kind),
                    _ => BindingKind::Var,
                };
                let binds_here = match kind {
                    BindingKind::Var => self.function_level,
                    _ => self.at_own_level(),
                };
                if binds_here {
                    self.scope.register(name, path.location().clone(), kind);
                }
            }
            Node::Identifier(identifier) => {
                if self.at_own_level() && is_reference(path) {
                    self.references.push((identifier.name.clone(), path.location().clone()));
                }
            }
            _ => {}
        }
    }

    fn exit(&mut self, path: &NodePath<'_>) {
        if path.is_block() {
            self.depth -= 1;
        }
    }
}

/// Return `true` if the identifier at `path` reads a binding rather than naming something.
fn is_reference(path: &NodePath<'_>) -> bool {
    let (Some(parent), Some(key)) = (path.parent(), path.key()) else {
        return true;
    };
    match (&*parent, key) {
        (Node::VariableDeclarator(_), "id") => false,
        (Node::FunctionDeclaration(_) | Node::FunctionExpression(_), "id" | "params") => false,
        (Node::CatchClause(_), "param") => false,
        (Node::LabeledStatement(_) | Node::BreakStatement(_) | Node::ContinueStatement(_), "label") => false,
        (Node::MemberExpression(member), "property") => member.computed,
        (Node::Property(property), "key") => property.computed,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traverse::{Visitor, traverse};
    use jsfront_syntax::ast::NodeType;
    use jsfront_syntax::parser::parse_source;

    /// Run `check` with the scope of every path whose node matches `ty`.
    fn with_scopes(source: &str, ty: NodeType, mut check: impl FnMut(&NodePath<'_>, Rc<Scope>)) {
        struct Probe<'f> {
            ty: NodeType,
            check: &'f mut dyn FnMut(&NodePath<'_>, Rc<Scope>),
        }
        impl Visitor for Probe<'_> {
            fn enter(&mut self, path: &NodePath<'_>) {
                if path.type_tag() == self.ty {
                    let scope = path.scope().expect("scope");
                    (self.check)(path, scope);
                }
            }
        }
        let mut program = parse_source(source).unwrap();
        traverse(&mut program, &mut Probe { ty, check: &mut check });
    }

    #[test]
    fn test_reference_resolves_through_parent_scope() {
        let mut checked = false;
        with_scopes(
            "let x = 1; function f(){ return x + 1; }",
            NodeType::ReturnStatement,
            |_, scope| {
                assert!(!scope.has_own_binding("x"));
                let parent = scope.parent().expect("program scope");
                let binding = parent.get_own_binding("x").expect("x");
                assert!(binding.referenced);
                assert_eq!(binding.reference_paths.len(), 1);
                assert_eq!(
                    binding.reference_paths[0].to_string(),
                    "body[1].body.body[0].argument.left"
                );
                assert_eq!(binding.kind, BindingKind::Let);
                assert!(scope.has_binding("x"));
                checked = true;
            },
        );
        assert!(checked);
    }

    #[test]
    fn test_program_scope_bindings() {
        with_scopes(
            "var a; let b = a; const c = 1; function d() { var inner; }",
            NodeType::Program,
            |_, scope| {
                assert_eq!(scope.binding_names(), ["a", "b", "c", "d"]);
                assert_eq!(scope.get_binding("d").unwrap().kind, BindingKind::Function);
                assert_eq!(scope.get_binding("c").unwrap().kind, BindingKind::Const);
                assert!(scope.get_binding("a").unwrap().referenced);
                assert!(!scope.get_binding("b").unwrap().referenced);
                assert!(!scope.has_binding("inner"));
                assert!(scope.parent().is_none());
            },
        );
    }

    #[test]
    fn test_declaration_targets_are_not_references() {
        with_scopes("let x = 1; function x2() {} x2;", NodeType::Program, |_, scope| {
            assert!(!scope.get_binding("x").unwrap().referenced);
            let x2 = scope.get_binding("x2").unwrap();
            assert_eq!(x2.reference_paths.len(), 1);
        });
    }

    #[test]
    fn test_var_hoists_out_of_nested_block() {
        with_scopes("{ var a = 1; let b = 2; }", NodeType::Program, |path, scope| {
            assert!(path.is_block());
            assert!(scope.has_own_binding("a"));
            assert!(!scope.has_own_binding("b"));
        });
    }

    #[test]
    fn test_let_binds_in_inner_block() {
        let mut seen = 0;
        with_scopes("{ let b = 2; b; }", NodeType::BlockStatement, |_, scope| {
            let binding = scope.get_own_binding("b").expect("b");
            assert_eq!(binding.reference_paths.len(), 1);
            assert!(!scope.has_own_binding("a"));
            seen += 1;
        });
        assert_eq!(seen, 1);
    }

    #[test]
    fn test_params_bind_in_function_body() {
        with_scopes("function f(a, b) { return a; }", NodeType::BlockStatement, |_, scope| {
            let a = scope.get_own_binding("a").expect("a");
            assert_eq!(a.kind, BindingKind::Param);
            assert!(a.referenced);
            assert!(!scope.get_own_binding("b").unwrap().referenced);
            assert!(scope.has_binding("f"));
        });
    }

    #[test]
    fn test_catch_param_binds_in_catch_body() {
        let mut bodies = Vec::new();
        with_scopes("try { } catch (e) { e; }", NodeType::BlockStatement, |path, scope| {
            bodies.push((path.key(), scope.has_own_binding("e")));
        });
        assert_eq!(bodies, [(Some("block"), false), (Some("body"), true)]);
    }

    #[test]
    fn test_member_properties_and_keys_are_not_references() {
        with_scopes("var p, k; o.p; o[k]; ({ p: 1 });", NodeType::Program, |_, scope| {
            assert!(!scope.get_binding("p").unwrap().referenced);
            assert_eq!(scope.get_binding("k").unwrap().reference_paths.len(), 1);
        });
    }

    #[test]
    fn test_first_declaration_wins() {
        with_scopes("var a = 1; var a = 2;", NodeType::Program, |_, scope| {
            let a = scope.get_binding("a").unwrap();
            assert_eq!(a.path.to_string(), "body[0].declarations[0]");
        });
    }

    #[test]
    fn test_scope_is_memoized_per_path() {
        with_scopes("let x; { x; }", NodeType::ExpressionStatement, |path, scope| {
            let again = path.scope().unwrap();
            assert!(Rc::ptr_eq(&scope, &again));
            let outer = scope.parent().unwrap();
            assert_eq!(outer.get_own_binding("x").unwrap().reference_paths.len(), 1);
        });
    }

    #[test]
    fn test_scope_building_does_not_mutate_tree() {
        let mut program = parse_source("let x = 1; function f(y) { x + y; }").unwrap();
        let before = program.clone();
        traverse(
            &mut program,
            &mut crate::traverse::visitor_fn(|path| {
                let _ = path.scope();
            }),
        );
        assert_eq!(program, before);
    }
}
