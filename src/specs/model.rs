use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root of the node specification document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specs {
    /// Wire type catalogue.
    pub types: Vec<TypeSpec>,
    /// Choice groups, each an ordered list of allowed values.
    pub choices: BTreeMap<String, Vec<ChoiceSpec>>,
    /// Node definitions keyed by node name.
    pub nodes: BTreeMap<String, NodeSpec>,
}

impl Specs {
    /// Node definitions that produce generated types (names not starting with `_`).
    pub fn public_nodes(&self) -> impl Iterator<Item = (&str, &NodeSpec)> {
        self.nodes
            .iter()
            .filter(|(name, _)| !is_internal_name(name))
            .map(|(name, spec)| (name.as_str(), spec))
    }
}

/// Names starting with `_` are internal alias targets and never generated.
pub fn is_internal_name(name: &str) -> bool {
    name.starts_with('_')
}

/// One entry of the wire type catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSpec {
    /// Wire type name.
    pub name: TypeName,
    /// Size in bytes of the native representation.
    pub size: u32,
    /// Human readable description.
    #[serde(rename = "desc", default)]
    pub description: String,
}

/// Closed set of field wire types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TypeName {
    /// Signed 32-bit integer.
    #[serde(rename = "i32")]
    I32,
    /// Two signed integers.
    #[serde(rename = "ivec2")]
    IVec2,
    /// Three signed integers.
    #[serde(rename = "ivec3")]
    IVec3,
    /// Four signed integers.
    #[serde(rename = "ivec4")]
    IVec4,
    /// Boolean.
    #[serde(rename = "bool")]
    Bool,
    /// Unsigned 32-bit integer.
    #[serde(rename = "u32")]
    U32,
    /// Two unsigned integers.
    #[serde(rename = "uvec2")]
    UVec2,
    /// Three unsigned integers.
    #[serde(rename = "uvec3")]
    UVec3,
    /// Four unsigned integers.
    #[serde(rename = "uvec4")]
    UVec4,
    /// Double precision float.
    #[serde(rename = "f64")]
    F64,
    /// UTF-8 string.
    #[serde(rename = "str")]
    Str,
    /// Opaque byte buffer.
    #[serde(rename = "data")]
    Data,
    /// Single precision float.
    #[serde(rename = "f32")]
    F32,
    /// Two floats.
    #[serde(rename = "vec2")]
    Vec2,
    /// Three floats.
    #[serde(rename = "vec3")]
    Vec3,
    /// Four floats.
    #[serde(rename = "vec4")]
    Vec4,
    /// 4x4 float matrix, column-major.
    #[serde(rename = "mat4")]
    Mat4,
    /// Reference to another node.
    #[serde(rename = "node")]
    Node,
    /// Ordered list of node references.
    #[serde(rename = "node_list")]
    NodeList,
    /// Ordered list of doubles.
    #[serde(rename = "f64_list")]
    F64List,
    /// String-keyed node references.
    #[serde(rename = "node_dict")]
    NodeDict,
    /// One value of a choice group.
    #[serde(rename = "select")]
    Select,
    /// `+`-separated flag names.
    #[serde(rename = "flags")]
    Flags,
    /// Exact rational.
    #[serde(rename = "rational")]
    Rational,
}

impl TypeName {
    /// Every wire type, in declaration order.
    pub const ALL: [TypeName; 24] = [
        TypeName::I32,
        TypeName::IVec2,
        TypeName::IVec3,
        TypeName::IVec4,
        TypeName::Bool,
        TypeName::U32,
        TypeName::UVec2,
        TypeName::UVec3,
        TypeName::UVec4,
        TypeName::F64,
        TypeName::Str,
        TypeName::Data,
        TypeName::F32,
        TypeName::Vec2,
        TypeName::Vec3,
        TypeName::Vec4,
        TypeName::Mat4,
        TypeName::Node,
        TypeName::NodeList,
        TypeName::F64List,
        TypeName::NodeDict,
        TypeName::Select,
        TypeName::Flags,
        TypeName::Rational,
    ];

    /// Wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeName::I32 => "i32",
            TypeName::IVec2 => "ivec2",
            TypeName::IVec3 => "ivec3",
            TypeName::IVec4 => "ivec4",
            TypeName::Bool => "bool",
            TypeName::U32 => "u32",
            TypeName::UVec2 => "uvec2",
            TypeName::UVec3 => "uvec3",
            TypeName::UVec4 => "uvec4",
            TypeName::F64 => "f64",
            TypeName::Str => "str",
            TypeName::Data => "data",
            TypeName::F32 => "f32",
            TypeName::Vec2 => "vec2",
            TypeName::Vec3 => "vec3",
            TypeName::Vec4 => "vec4",
            TypeName::Mat4 => "mat4",
            TypeName::Node => "node",
            TypeName::NodeList => "node_list",
            TypeName::F64List => "f64_list",
            TypeName::NodeDict => "node_dict",
            TypeName::Select => "select",
            TypeName::Flags => "flags",
            TypeName::Rational => "rational",
        }
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One allowed value of a choice group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceSpec {
    /// Literal wire value.
    pub name: String,
    /// Human readable description.
    #[serde(rename = "desc", default)]
    pub description: String,
}

/// One node definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    /// Engine source file that implements the node, if known.
    #[serde(rename = "file", default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    /// Fields in constructor order.
    pub params: Vec<ParamSpec>,
}

/// One node field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Wire field name (the key passed to native setters).
    pub name: String,
    /// Wire type.
    #[serde(rename = "type")]
    pub ty: TypeName,
    /// Choice group for `select` fields.
    #[serde(rename = "choices", default, skip_serializing_if = "Option::is_none")]
    pub choices_type: Option<String>,
    /// Human readable description.
    #[serde(rename = "desc", default)]
    pub description: String,
    /// Field flags.
    #[serde(default)]
    pub flags: Vec<ParamFlag>,
    /// Node names accepted by node-typed fields (informational).
    #[serde(rename = "node_types", default)]
    pub node_types: Vec<String>,
}

impl ParamSpec {
    /// `true` unless the field carries the `nonull` flag.
    pub fn nullable(&self) -> bool {
        !self.flags.contains(&ParamFlag::NonNull)
    }

    /// `true` when the field accepts either a node or a literal value.
    pub fn can_be_node(&self) -> bool {
        self.flags.contains(&ParamFlag::Node)
    }
}

/// Field flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamFlag {
    /// Value can be changed live through a scene control.
    Live,
    /// Field is mandatory.
    #[serde(rename = "nonull")]
    NonNull,
    /// String field naming a file on disk.
    Filepath,
    /// Field also accepts a node producing the value.
    Node,
}
