use super::*;

#[test]
fn every_wire_type_maps() {
    for ty in TypeName::ALL {
        let m = map_type(ty, Some("Filter")).unwrap();
        assert!(!m.rust.is_empty(), "{ty}");
        assert!(m.family.method().starts_with("set_") || m.family.method().starts_with("add_"));
    }
}

#[test]
fn table_matches_families() {
    let m = map_type(TypeName::I32, None).unwrap();
    assert_eq!((m.rust.as_str(), m.family.method()), ("i32", "set_int"));
    let m = map_type(TypeName::UVec3, None).unwrap();
    assert_eq!((m.rust.as_str(), m.family.method()), ("[u32; 3]", "set_uvec3"));
    let m = map_type(TypeName::Mat4, None).unwrap();
    assert_eq!((m.rust.as_str(), m.family.method()), ("[f32; 16]", "set_mat4"));
    let m = map_type(TypeName::NodeList, None).unwrap();
    assert_eq!((m.rust.as_str(), m.family.method()), ("&[Node]", "add_nodes"));
    let m = map_type(TypeName::F64List, None).unwrap();
    assert_eq!((m.rust.as_str(), m.family.method()), ("&[f64]", "add_doubles"));
    let m = map_type(TypeName::Select, Some("Filter")).unwrap();
    assert_eq!(m.rust, "super::Filter");
    assert_eq!(m.family.arg("v"), "v.native_value()");
    assert_eq!(CallFamily::Int.arg("v"), "v");
}

#[test]
fn select_without_group_is_rejected() {
    assert!(matches!(
        map_type(TypeName::Select, None),
        Err(NglError::SpecFormat(_))
    ));
}
