use super::*;
use crate::memory::{FieldValue, MemoryEngine};
use std::sync::Arc;

const GROUP: NodeType = NodeType::from_tag(*b"Grp ");
const QUAD: NodeType = NodeType::from_tag(*b"Quad");

fn engine() -> (Arc<MemoryEngine>, EngineRef) {
    let mem = Arc::new(MemoryEngine::new());
    let engine: EngineRef = mem.clone();
    (mem, engine)
}

#[test]
fn clone_and_drop_balance_references() {
    let (mem, engine) = engine();
    let node = Node::create(&engine, GROUP).unwrap();
    let copy = node.clone();
    assert_eq!(copy, node);
    assert_eq!(mem.ref_count(node.raw()), Some(2));
    drop(copy);
    assert_eq!(mem.ref_count(node.raw()), Some(1));
    drop(node);
    assert_eq!(mem.node_count(), 0);
}

#[test]
fn from_raw_takes_or_steals_a_reference() {
    let (mem, engine) = engine();
    let raw = engine.node_create(QUAD);
    let shared = Node::from_raw(&engine, raw, false).unwrap();
    assert_eq!(mem.ref_count(raw), Some(2));
    let stolen = Node::from_raw(&engine, raw, true).unwrap();
    drop(shared);
    drop(stolen);
    assert_eq!(mem.ref_count(raw), None);
    assert!(Node::from_raw(&engine, RawNode::NULL, true).is_err());
}

#[test]
fn typed_setters_store_values() {
    let (mem, engine) = engine();
    let node = Node::create(&engine, QUAD).unwrap();
    node.set_label("quad").unwrap();
    node.set_int("i", -3).unwrap();
    node.set_uvec2("uv", [1, 2]).unwrap();
    node.set_vec4("color", [0.0, 0.5, 1.0, 1.0]).unwrap();
    node.set_bool("on", true).unwrap();
    node.set_rational("rate", Rational::new(30, 1)).unwrap();
    node.add_doubles("times", &[0.0, 1.0]).unwrap();
    node.add_doubles("times", &[2.0]).unwrap();
    node.set_select("mode", "linear").unwrap();

    let raw = node.raw();
    assert_eq!(mem.field(raw, "label"), Some(FieldValue::Str("quad".into())));
    assert_eq!(mem.field(raw, "i"), Some(FieldValue::Int(-3)));
    assert_eq!(mem.field(raw, "uv"), Some(FieldValue::UVec2([1, 2])));
    assert_eq!(
        mem.field(raw, "color"),
        Some(FieldValue::Vec4([0.0, 0.5, 1.0, 1.0]))
    );
    assert_eq!(mem.field(raw, "on"), Some(FieldValue::Bool(true)));
    assert_eq!(
        mem.field(raw, "rate"),
        Some(FieldValue::Rational(Rational::new(30, 1)))
    );
    assert_eq!(
        mem.field(raw, "times"),
        Some(FieldValue::DoubleList(vec![0.0, 1.0, 2.0]))
    );
    assert_eq!(
        mem.field(raw, "mode"),
        Some(FieldValue::Select("linear".into()))
    );
}

#[test]
fn node_fields_outlive_the_child_handle() {
    let (mem, engine) = engine();
    let parent = Node::create(&engine, GROUP).unwrap();
    {
        let a = Node::create(&engine, QUAD).unwrap();
        let b = Node::create(&engine, QUAD).unwrap();
        parent.add_nodes("children", &[a.clone(), b]).unwrap();
        parent.set_node("first", &a).unwrap();
        let entries = BTreeMap::from([("x".to_owned(), a)]);
        parent.set_dict_entries("vars", &entries).unwrap();
    }
    assert_eq!(mem.node_count(), 3);
    drop(parent);
    assert_eq!(mem.node_count(), 0);
}

#[test]
fn failed_setter_reports_key_and_status() {
    let (_mem, engine) = engine();
    let node = Node::create(&engine, GROUP).unwrap();
    let err = node.set("child", NativeValue::Node(RawNode(12345))).unwrap_err();
    assert!(matches!(
        err,
        NglError::NativeCall { ref key, status: -1 } if key == "child"
    ));
}
