use super::*;
use crate::codegen::types::CallFamily;
use crate::specs::{ParamSpec, parse_str};

fn registry() -> NodeTypeRegistry {
    NodeTypeRegistry::from_entries([
        ("Foo", NodeType::from_tag(*b"Foo ")),
        ("Texture2D", NodeType::from_tag(*b"Tex2")),
        ("texture2d", NodeType::from_tag(*b"tx2d")),
        ("Node", NodeType::from_tag(*b"Node")),
    ])
}

fn parse(raw: &str) -> Specs {
    parse_str(raw, &registry()).unwrap()
}

#[test]
fn foo_bar_class_has_one_nullable_int_field() {
    let specs = parse(
        r#"{"types": [], "choices": {}, "nodes": {"Foo": {"params": [
            {"name": "bar", "type": "i32", "flags": []}]}}}"#,
    );
    let defs = synthesize(&specs, &registry(), &GenerateOptions::default()).unwrap();
    assert!(defs.enums.is_empty());
    let foo = &defs.classes[0];
    assert_eq!(foo.name, "Foo");
    assert_eq!(foo.module, "foo");
    assert_eq!(foo.tag, NodeType::from_tag(*b"Foo "));
    assert_eq!(foo.fields.len(), 1);
    let bar = &foo.fields[0];
    assert_eq!(bar.ident, "bar");
    assert_eq!(bar.setter, "set_bar");
    assert!(bar.nullable);
    assert!(!bar.can_be_node);
    assert_eq!(bar.ctor_type(), "Option<i32>");
    assert_eq!(bar.value_type(), "i32");
    assert_eq!(bar.mapped.family, CallFamily::Int);
}

#[test]
fn filter_enum_keeps_order_and_wire_names() {
    let choices = vec![
        ChoiceSpec {
            name: "linear".to_owned(),
            description: "interpolate".to_owned(),
        },
        ChoiceSpec {
            name: "nearest".to_owned(),
            description: "closest texel".to_owned(),
        },
    ];
    let e = synthesize_choice_enum("filter", &choices, "").unwrap();
    assert_eq!(e.name, "Filter");
    let pairs: Vec<(&str, &str)> = e
        .variants
        .iter()
        .map(|v| (v.ident.as_str(), v.wire.as_str()))
        .collect();
    assert_eq!(pairs, vec![("Linear", "linear"), ("Nearest", "nearest")]);
    assert_eq!(e.variants[1].doc, "closest texel");
}

#[test]
fn prefix_applies_to_every_type() {
    let specs = parse(
        r#"{"types": [], "choices": {"filter": [{"name": "linear"}]},
            "nodes": {"Foo": {"params": [
                {"name": "mode", "type": "select", "choices": "filter", "flags": ["nonull", "node"]}]}}}"#,
    );
    let opts = GenerateOptions {
        prefix: "Ngl".to_owned(),
        ..GenerateOptions::default()
    };
    let defs = synthesize(&specs, &registry(), &opts).unwrap();
    assert_eq!(defs.enums[0].name, "NglFilter");
    assert_eq!(defs.classes[0].name, "NglFoo");
    assert_eq!(defs.classes[0].module, "ngl_foo");
    let mode = &defs.classes[0].fields[0];
    assert_eq!(mode.ctor_type(), "NodeOrValue<super::NglFilter>");
}

#[test]
fn duplicate_variants_collide() {
    let choices = vec![
        ChoiceSpec {
            name: "src_alpha".to_owned(),
            description: String::new(),
        },
        ChoiceSpec {
            name: "src-alpha".to_owned(),
            description: String::new(),
        },
    ];
    assert!(matches!(
        synthesize_choice_enum("blend", &choices, ""),
        Err(NglError::NameCollision(_))
    ));
}

#[test]
fn duplicate_file_names_collide() {
    let specs = parse(
        r#"{"types": [], "choices": {}, "nodes": {
            "Texture2D": {"params": []}, "texture2d": {"params": []}}}"#,
    );
    match synthesize(&specs, &registry(), &GenerateOptions::default()) {
        Err(NglError::NameCollision(msg)) => assert!(msg.contains("texture2d"), "{msg}"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn runtime_type_names_are_reserved() {
    let specs = parse(r#"{"types": [], "choices": {}, "nodes": {"Node": {"params": []}}}"#);
    assert!(matches!(
        synthesize(&specs, &registry(), &GenerateOptions::default()),
        Err(NglError::NameCollision(_))
    ));
}

#[test]
fn duplicate_field_identifiers_collide() {
    let spec = NodeSpec {
        source_file: None,
        params: vec![
            ParamSpec {
                name: "minFilter".to_owned(),
                ty: TypeName::I32,
                choices_type: None,
                description: String::new(),
                flags: vec![],
                node_types: vec![],
            },
            ParamSpec {
                name: "min_filter".to_owned(),
                ty: TypeName::I32,
                choices_type: None,
                description: String::new(),
                flags: vec![],
                node_types: vec![],
            },
        ],
    };
    assert!(matches!(
        synthesize_node_class("Foo", &spec, &registry(), &BTreeMap::new(), ""),
        Err(NglError::NameCollision(_))
    ));
}

#[test]
fn unknown_node_is_rejected_during_synthesis() {
    let spec = NodeSpec {
        source_file: None,
        params: vec![],
    };
    assert!(matches!(
        synthesize_node_class("Bar", &spec, &registry(), &BTreeMap::new(), ""),
        Err(NglError::UnknownType(_))
    ));
}
