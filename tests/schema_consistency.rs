//! The child-field schema must agree with the node catalogue.
//!
//! Each parsed node is serialized to JSON; every key whose value is a node (or a list of nodes) must be listed by
//! `child_fields` for that node type, and every listed field must exist on the node.

use std::collections::BTreeSet;

use jsfront::ast::{Node, NodeType, child_fields};
use jsfront::parser;
use serde_json::Value;

const CORPUS: &str = r#"
var a = 1, b;
let c = [1, , 'two', /re/g, this, null, true];
const d = { k: a, 'q': b, 3: c };
function f(p, q) {
    if (p) { return p + q; } else return -q;
}
var g = function named(x) { return x ? x++ : --x; };
while (a < 10) { a += 1; continue; }
do { a--; } while (a > 0);
for (var i = 0; i < 3; i = i + 1) { break; }
for (var k in d) { f(k, d[k]); }
outer: for (;;) { break outer; }
try { throw new Error('boom'); } catch (e) { e.message; } finally { ; }
switch (a) { case 1: f(); default: g(); }
with (d) { k; }
debugger;
x = (a, b);
typeof x === 'string' && !y;
"#;

fn node_type(name: &str) -> NodeType {
    NodeType::ALL
        .iter()
        .copied()
        .find(|ty| ty.as_str() == name)
        .unwrap_or_else(|| panic!("unknown node type {name}"))
}

fn is_node(value: &Value) -> bool {
    value.get("type").is_some_and(Value::is_string)
}

fn holds_nodes(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.iter().any(is_node),
        other => is_node(other),
    }
}

fn check(value: &Value, seen: &mut BTreeSet<NodeType>) {
    match value {
        Value::Array(items) => items.iter().for_each(|item| check(item, seen)),
        Value::Object(map) if is_node(value) => {
            let ty = node_type(map["type"].as_str().unwrap());
            seen.insert(ty);
            let fields: BTreeSet<&str> = child_fields(ty).iter().copied().collect();

            for (key, child) in map {
                if holds_nodes(child) {
                    assert!(fields.contains(key.as_str()), "{ty}: `{key}` holds nodes but is not a child field");
                }
            }
            for field in &fields {
                assert!(map.contains_key(*field), "{ty}: child field `{field}` missing from the node");
            }
            map.values().for_each(|child| check(child, seen));
        }
        _ => {}
    }
}

#[test]
fn test_child_fields_match_serialized_nodes() {
    let program = parser::parse_source(CORPUS).unwrap();
    let value = serde_json::to_value(&program).unwrap();
    let mut seen = BTreeSet::new();
    check(&value, &mut seen);

    let unseen: Vec<NodeType> = NodeType::ALL
        .iter()
        .copied()
        .filter(|ty| !seen.contains(ty) && *ty != NodeType::SourceCode)
        .collect();
    assert!(unseen.is_empty(), "corpus does not exercise {unseen:?}");
}

#[test]
fn test_every_child_field_is_addressable() {
    let program = parser::parse_source(CORPUS).unwrap();
    let mut stack: Vec<&Node> = vec![&program];
    while let Some(node) = stack.pop() {
        for field in child_fields(node.type_tag()) {
            let Some(field_ref) = node.field(field) else {
                panic!("{}: `{field}` is listed but not accessible", node.type_tag());
            };
            match field_ref {
                jsfront::ast::FieldRef::Required(child) => stack.push(child),
                jsfront::ast::FieldRef::Optional(child) => stack.extend(child),
                jsfront::ast::FieldRef::List(children) => stack.extend(children.iter()),
                jsfront::ast::FieldRef::SparseList(children) => stack.extend(children.iter().flatten()),
            }
        }
        assert!(node.field("span").is_none());
    }
}

#[test]
fn test_leaf_types_have_no_children() {
    for ty in [
        NodeType::Identifier,
        NodeType::Literal,
        NodeType::ThisExpression,
        NodeType::EmptyStatement,
        NodeType::DebuggerStatement,
        NodeType::SourceCode,
    ] {
        assert!(child_fields(ty).is_empty(), "{ty}");
    }
}
