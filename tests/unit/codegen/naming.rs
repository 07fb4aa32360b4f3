use super::*;

#[test]
fn type_idents_keep_inner_casing() {
    assert_eq!(type_ident("Foo"), "Foo");
    assert_eq!(type_ident("Texture2D"), "Texture2D");
    assert_eq!(type_ident("RenderToTexture"), "RenderToTexture");
    assert_eq!(type_ident("filter"), "Filter");
    assert_eq!(type_ident("clamp_to_edge"), "ClampToEdge");
    assert_eq!(type_ident("mirrored-repeat"), "MirroredRepeat");
    assert_eq!(type_ident("2d"), "V2d");
    assert_eq!(type_ident(""), "V");
}

#[test]
fn type_idents_never_spell_self() {
    assert_eq!(type_ident("self"), "Self_");
    assert_eq!(type_ident("Self"), "Self_");
    assert_eq!(type_ident("self_node"), "SelfNode");
    assert_eq!(type_ident("super"), "Super");
}

#[test]
fn snake_case_splits_words() {
    assert_eq!(snake_case("bar"), "bar");
    assert_eq!(snake_case("RenderToTexture"), "render_to_texture");
    assert_eq!(snake_case("Texture2D"), "texture2d");
    assert_eq!(snake_case("HTTPServer"), "http_server");
    assert_eq!(snake_case("min_filter"), "min_filter");
    assert_eq!(snake_case("3d_mode"), "v3d_mode");
}

#[test]
fn field_idents_escape_keywords() {
    assert_eq!(field_ident("bar"), "bar");
    assert_eq!(field_ident("type"), "r#type");
    assert_eq!(field_ident("self"), "self_");
    assert_eq!(field_ident("node"), "node_");
    assert_eq!(setter_ident("type"), "set_type");
    assert_eq!(setter_ident("minFilter"), "set_min_filter");
}

#[test]
fn module_idents_avoid_keywords() {
    assert_eq!(module_ident("Foo"), "foo");
    assert_eq!(module_ident("Type"), "type_");
    assert_eq!(module_ident("GraphicConfig"), "graphic_config");
}
