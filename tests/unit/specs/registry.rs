use super::*;

#[test]
fn builtin_table_is_sorted_and_unique() {
    for pair in BUILTIN_NODE_TYPES.windows(2) {
        assert!(pair[0].0 < pair[1].0, "{} >= {}", pair[0].0, pair[1].0);
    }
    let mut tags: Vec<[u8; 4]> = BUILTIN_NODE_TYPES.iter().map(|(_, t)| *t).collect();
    tags.sort_unstable();
    tags.dedup();
    assert_eq!(tags.len(), BUILTIN_NODE_TYPES.len());
}

#[test]
fn builtin_lookup_resolves_known_names() {
    let reg = NodeTypeRegistry::builtin();
    assert_eq!(reg.lookup("Group"), Some(NodeType::from_tag(*b"Grp ")));
    assert_eq!(reg.lookup("Texture2D"), Some(NodeType::from_tag(*b"Tex2")));
    assert_eq!(reg.lookup("Foo"), None);
    assert_eq!(reg.name_of(NodeType::from_tag(*b"Quad")), Some("Quad"));
}

#[test]
fn custom_entries_replace_and_extend() {
    let mut reg = NodeTypeRegistry::from_entries([("Foo", NodeType::from_tag(*b"Foo "))]);
    reg.insert("Bar", NodeType::from_tag(*b"Bar "));
    reg.insert("Foo", NodeType::from_tag(*b"Foo2"));
    assert_eq!(reg.len(), 2);
    assert_eq!(reg.lookup("Foo"), Some(NodeType::from_tag(*b"Foo2")));
    assert_eq!(reg.lookup("Bar"), Some(NodeType::from_tag(*b"Bar ")));
}
