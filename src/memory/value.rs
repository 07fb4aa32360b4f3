use crate::foundation::core::Rational;
use crate::native::{NativeValue, RawNode};
use crate::specs::TypeName;
use std::collections::BTreeMap;

/// A field value as stored by the in-memory engine.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// `i32`.
    Int(i32),
    /// `ivec2`.
    IVec2([i32; 2]),
    /// `ivec3`.
    IVec3([i32; 3]),
    /// `ivec4`.
    IVec4([i32; 4]),
    /// `u32`.
    UInt(u32),
    /// `uvec2`.
    UVec2([u32; 2]),
    /// `uvec3`.
    UVec3([u32; 3]),
    /// `uvec4`.
    UVec4([u32; 4]),
    /// `bool`.
    Bool(bool),
    /// `f32`.
    Float(f32),
    /// `f64`.
    Double(f64),
    /// `vec2`.
    Vec2([f32; 2]),
    /// `vec3`.
    Vec3([f32; 3]),
    /// `vec4`.
    Vec4([f32; 4]),
    /// `mat4`, column-major.
    Mat4([f32; 16]),
    /// `str`.
    Str(String),
    /// `data`.
    Data(Vec<u8>),
    /// `select`, as the literal choice name.
    Select(String),
    /// `flags`, `+`-separated.
    Flags(String),
    /// `rational`.
    Rational(Rational),
    /// `node`.
    Node(RawNode),
    /// `node_list`.
    NodeList(Vec<RawNode>),
    /// `f64_list`.
    DoubleList(Vec<f64>),
    /// `node_dict`.
    Dict(BTreeMap<String, RawNode>),
}

impl FieldValue {
    /// Wire type this value is stored as.
    pub fn wire_type(&self) -> TypeName {
        match self {
            FieldValue::Int(_) => TypeName::I32,
            FieldValue::IVec2(_) => TypeName::IVec2,
            FieldValue::IVec3(_) => TypeName::IVec3,
            FieldValue::IVec4(_) => TypeName::IVec4,
            FieldValue::UInt(_) => TypeName::U32,
            FieldValue::UVec2(_) => TypeName::UVec2,
            FieldValue::UVec3(_) => TypeName::UVec3,
            FieldValue::UVec4(_) => TypeName::UVec4,
            FieldValue::Bool(_) => TypeName::Bool,
            FieldValue::Float(_) => TypeName::F32,
            FieldValue::Double(_) => TypeName::F64,
            FieldValue::Vec2(_) => TypeName::Vec2,
            FieldValue::Vec3(_) => TypeName::Vec3,
            FieldValue::Vec4(_) => TypeName::Vec4,
            FieldValue::Mat4(_) => TypeName::Mat4,
            FieldValue::Str(_) => TypeName::Str,
            FieldValue::Data(_) => TypeName::Data,
            FieldValue::Select(_) => TypeName::Select,
            FieldValue::Flags(_) => TypeName::Flags,
            FieldValue::Rational(_) => TypeName::Rational,
            FieldValue::Node(_) => TypeName::Node,
            FieldValue::NodeList(_) => TypeName::NodeList,
            FieldValue::DoubleList(_) => TypeName::F64List,
            FieldValue::Dict(_) => TypeName::NodeDict,
        }
    }

    /// Text checked against choice groups (`select` and `flags` values).
    pub fn choice_text(&self) -> Option<&str> {
        match self {
            FieldValue::Select(s) | FieldValue::Flags(s) => Some(s),
            _ => None,
        }
    }

    /// Nodes referenced by this value, in storage order.
    pub fn children(&self) -> Vec<RawNode> {
        match self {
            FieldValue::Node(n) => vec![*n],
            FieldValue::NodeList(list) => list.clone(),
            FieldValue::Dict(map) => map.values().copied().collect(),
            _ => Vec::new(),
        }
    }

    /// Rewrite every node reference.
    pub(crate) fn map_nodes(&mut self, mut f: impl FnMut(RawNode) -> RawNode) {
        match self {
            FieldValue::Node(n) => *n = f(*n),
            FieldValue::NodeList(list) => list.iter_mut().for_each(|n| *n = f(*n)),
            FieldValue::Dict(map) => map.values_mut().for_each(|n| *n = f(*n)),
            _ => {}
        }
    }

    /// Stored form of a scalar setter value. List and dict families are merged by the engine
    /// and return `None` here.
    pub(crate) fn from_native(value: &NativeValue<'_>) -> Option<Self> {
        Some(match *value {
            NativeValue::Int(v) => FieldValue::Int(v),
            NativeValue::IVec2(v) => FieldValue::IVec2(v),
            NativeValue::IVec3(v) => FieldValue::IVec3(v),
            NativeValue::IVec4(v) => FieldValue::IVec4(v),
            NativeValue::UInt(v) => FieldValue::UInt(v),
            NativeValue::UVec2(v) => FieldValue::UVec2(v),
            NativeValue::UVec3(v) => FieldValue::UVec3(v),
            NativeValue::UVec4(v) => FieldValue::UVec4(v),
            NativeValue::Bool(v) => FieldValue::Bool(v),
            NativeValue::Float(v) => FieldValue::Float(v),
            NativeValue::Double(v) => FieldValue::Double(v),
            NativeValue::Vec2(v) => FieldValue::Vec2(v),
            NativeValue::Vec3(v) => FieldValue::Vec3(v),
            NativeValue::Vec4(v) => FieldValue::Vec4(v),
            NativeValue::Mat4(v) => FieldValue::Mat4(v),
            NativeValue::Str(v) => FieldValue::Str(v.to_owned()),
            NativeValue::Data(v) => FieldValue::Data(v.to_vec()),
            NativeValue::Select(v) => FieldValue::Select(v.to_owned()),
            NativeValue::Flags(v) => FieldValue::Flags(v.to_owned()),
            NativeValue::Rational(v) => FieldValue::Rational(v),
            NativeValue::Node(n) => FieldValue::Node(n),
            NativeValue::AddNodes(_) | NativeValue::AddDoubles(_) | NativeValue::Dict { .. } => {
                return None;
            }
        })
    }
}

/// Wire type a setter value targets.
pub(crate) fn native_wire_type(value: &NativeValue<'_>) -> TypeName {
    match value {
        NativeValue::Int(_) => TypeName::I32,
        NativeValue::IVec2(_) => TypeName::IVec2,
        NativeValue::IVec3(_) => TypeName::IVec3,
        NativeValue::IVec4(_) => TypeName::IVec4,
        NativeValue::UInt(_) => TypeName::U32,
        NativeValue::UVec2(_) => TypeName::UVec2,
        NativeValue::UVec3(_) => TypeName::UVec3,
        NativeValue::UVec4(_) => TypeName::UVec4,
        NativeValue::Bool(_) => TypeName::Bool,
        NativeValue::Float(_) => TypeName::F32,
        NativeValue::Double(_) => TypeName::F64,
        NativeValue::Vec2(_) => TypeName::Vec2,
        NativeValue::Vec3(_) => TypeName::Vec3,
        NativeValue::Vec4(_) => TypeName::Vec4,
        NativeValue::Mat4(_) => TypeName::Mat4,
        NativeValue::Str(_) => TypeName::Str,
        NativeValue::Data(_) => TypeName::Data,
        NativeValue::Node(_) => TypeName::Node,
        NativeValue::AddNodes(_) => TypeName::NodeList,
        NativeValue::AddDoubles(_) => TypeName::F64List,
        NativeValue::Dict { .. } => TypeName::NodeDict,
        NativeValue::Select(_) => TypeName::Select,
        NativeValue::Flags(_) => TypeName::Flags,
        NativeValue::Rational(_) => TypeName::Rational,
    }
}

/// Structural copy of a node graph with handles replaced by nested snapshots.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSnapshot {
    /// Node type.
    pub ty: crate::foundation::core::NodeType,
    /// Fields in key order.
    pub fields: BTreeMap<String, SnapshotValue>,
}

/// One field of a [`NodeSnapshot`].
#[derive(Clone, Debug, PartialEq)]
pub enum SnapshotValue {
    /// Any value without node references.
    Plain(FieldValue),
    /// Single node.
    Node(Box<NodeSnapshot>),
    /// Node list.
    NodeList(Vec<NodeSnapshot>),
    /// Node dictionary.
    Dict(BTreeMap<String, NodeSnapshot>),
}
