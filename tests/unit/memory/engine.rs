use super::*;
use crate::foundation::core::Rational;
use crate::memory::schema::{STATUS_OUT_OF_RANGE, STATUS_UNKNOWN_FIELD};
use crate::specs::parse_str;

const GROUP: NodeType = NodeType::from_tag(*b"Grp ");
const QUAD: NodeType = NodeType::from_tag(*b"Quad");

fn specs_engine() -> MemoryEngine {
    let registry = NodeTypeRegistry::from_entries([("Group", GROUP), ("Quad", QUAD)]);
    let raw = r#"{
        "types": [],
        "choices": {"mode": [{"name": "fast"}, {"name": "slow"}],
                    "opts": [{"name": "a"}, {"name": "b"}]},
        "nodes": {
            "Group": {"params": [{"name": "children", "type": "node_list"}]},
            "Quad": {"params": [
                {"name": "size", "type": "f32", "flags": ["node"]},
                {"name": "mode", "type": "select", "choices": "mode"},
                {"name": "opts", "type": "flags", "choices": "opts"}
            ]}
        }
    }"#;
    let specs = parse_str(raw, &registry).unwrap();
    MemoryEngine::from_specs(&specs, &registry).unwrap()
}

#[test]
fn children_keep_nodes_alive_until_parent_is_freed() {
    let engine = MemoryEngine::new();
    let parent = engine.node_create(GROUP);
    let child = engine.node_create(QUAD);
    assert_eq!(engine.node_set(parent, "children", NativeValue::AddNodes(&[child])), 0);
    assert_eq!(engine.ref_count(child), Some(2));

    engine.node_unref(child);
    assert_eq!(engine.node_count(), 2);
    engine.node_unref(parent);
    assert_eq!(engine.node_count(), 0);
}

#[test]
fn add_nodes_appends_and_replacing_a_node_releases_the_old_one() {
    let engine = MemoryEngine::new();
    let parent = engine.node_create(GROUP);
    let a = engine.node_create(QUAD);
    let b = engine.node_create(QUAD);
    engine.node_set(parent, "children", NativeValue::AddNodes(&[a]));
    engine.node_set(parent, "children", NativeValue::AddNodes(&[b]));
    assert_eq!(
        engine.field(parent, "children"),
        Some(FieldValue::NodeList(vec![a, b]))
    );

    engine.node_set(parent, "target", NativeValue::Node(a));
    assert_eq!(engine.ref_count(a), Some(3));
    engine.node_set(parent, "target", NativeValue::Node(b));
    assert_eq!(engine.ref_count(a), Some(2));
    assert_eq!(engine.ref_count(b), Some(3));
}

#[test]
fn dict_entries_replace_by_name() {
    let engine = MemoryEngine::new();
    let parent = engine.node_create(GROUP);
    let a = engine.node_create(QUAD);
    let b = engine.node_create(QUAD);
    engine.node_set(parent, "vars", NativeValue::Dict { name: "x", node: a });
    engine.node_set(parent, "vars", NativeValue::Dict { name: "x", node: b });
    engine.node_unref(a);
    assert_eq!(engine.ref_count(a), None);
    let Some(FieldValue::Dict(map)) = engine.field(parent, "vars") else {
        panic!("expected dict");
    };
    assert_eq!(map.get("x"), Some(&b));
}

#[test]
fn setting_an_unknown_handle_fails() {
    let engine = MemoryEngine::new();
    let node = engine.node_create(GROUP);
    assert_eq!(
        engine.node_set(RawNode(999), "x", NativeValue::Int(1)),
        STATUS_INVALID_HANDLE
    );
    assert_eq!(
        engine.node_set(node, "child", NativeValue::Node(RawNode(999))),
        STATUS_INVALID_HANDLE
    );
}

#[test]
fn schema_rejects_bad_calls() {
    let engine = specs_engine();
    assert!(engine.node_create(NodeType::from_tag(*b"Cmra")).is_null());

    let quad = engine.node_create(QUAD);
    assert_eq!(engine.node_set(quad, "size", NativeValue::Float(1.0)), 0);
    assert_eq!(
        engine.node_set(quad, "size", NativeValue::Int(1)),
        STATUS_TYPE_MISMATCH
    );
    assert_eq!(
        engine.node_set(quad, "nope", NativeValue::Int(1)),
        STATUS_UNKNOWN_FIELD
    );
    assert_eq!(engine.node_set(quad, "mode", NativeValue::Select("slow")), 0);
    assert_eq!(
        engine.node_set(quad, "mode", NativeValue::Select("medium")),
        STATUS_OUT_OF_RANGE
    );
    assert_eq!(engine.node_set(quad, "opts", NativeValue::Flags("a+b")), 0);
    assert_eq!(
        engine.node_set(quad, "opts", NativeValue::Flags("a+c")),
        STATUS_OUT_OF_RANGE
    );
    assert_eq!(engine.node_set(quad, "label", NativeValue::Str("q")), 0);
}

#[test]
fn node_flagged_fields_accept_nodes() {
    let engine = specs_engine();
    let quad = engine.node_create(QUAD);
    let driver = engine.node_create(QUAD);
    assert_eq!(engine.node_set(quad, "size", NativeValue::Node(driver)), 0);
    assert_eq!(
        engine.node_set(quad, "mode", NativeValue::Node(driver)),
        STATUS_TYPE_MISMATCH
    );
}

#[test]
fn scene_holds_the_root_and_lists_live_controls() {
    let engine = MemoryEngine::new();
    let root = engine.node_create(GROUP);
    let ctl = engine.node_create(QUAD);
    engine.node_set(ctl, LIVE_ID_KEY, NativeValue::Str("speed"));
    engine.node_set(root, "children", NativeValue::AddNodes(&[ctl]));
    engine.node_unref(ctl);

    let params = SceneParams {
        duration: 2.0,
        frame_rate: Rational::new(30, 1),
        aspect_ratio: Rational::new(16, 9),
    };
    let scene = engine.scene_create(root, &params);
    assert!(!scene.is_null());
    engine.node_unref(root);
    assert_eq!(engine.node_count(), 2);
    assert_eq!(engine.scene_params(scene), Some(params));

    let controls = engine.scene_live_controls(scene).unwrap();
    assert_eq!(controls, vec![("speed".to_owned(), ctl)]);
    assert_eq!(engine.ref_count(ctl), Some(2));
    engine.node_unref(ctl);

    engine.scene_release(scene);
    assert_eq!(engine.node_count(), 0);
    assert_eq!(engine.scene_count(), 0);
}

#[test]
fn scene_requires_a_live_root() {
    let engine = MemoryEngine::new();
    assert!(
        engine
            .scene_create(RawNode(42), &SceneParams::default())
            .is_null()
    );
    assert_eq!(
        engine.scene_live_controls(RawScene(42)),
        Err(STATUS_INVALID_HANDLE)
    );
}

#[test]
fn snapshot_rejects_cycles() {
    let engine = MemoryEngine::new();
    let a = engine.node_create(GROUP);
    let b = engine.node_create(GROUP);
    engine.node_set(a, "next", NativeValue::Node(b));
    assert!(engine.snapshot(a).is_some());
    engine.node_set(b, "next", NativeValue::Node(a));
    assert!(engine.snapshot(a).is_none());
}

#[test]
fn malformed_text_yields_a_null_scene() {
    let engine = MemoryEngine::new();
    assert!(engine.scene_from_string("").is_null());
    assert!(engine.scene_from_string("Grp  child=n:1").is_null());
    assert_eq!(engine.node_count(), 0);
}
