//! Boundary to the external scene-graph engine.
//!
//! The engine owns node and scene memory and is reached only through opaque handles. Every call
//! that can fail returns a raw status code where `0` means success; the typed layers in
//! [`crate::node`] and [`crate::scene`] turn those codes into [`crate::NglError`] values.

use crate::foundation::core::{NodeType, Rational};
use crate::scene::SceneParams;
use std::sync::Arc;

/// Opaque engine node handle. `RawNode::NULL` marks a failed allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawNode(pub u64);

impl RawNode {
    /// The null handle.
    pub const NULL: RawNode = RawNode(0);

    /// Return `true` for the null handle.
    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// Opaque engine scene handle. `RawScene::NULL` marks a failed construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawScene(pub u64);

impl RawScene {
    /// The null handle.
    pub const NULL: RawScene = RawScene(0);

    /// Return `true` for the null handle.
    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// One value passed to a native node setter, tagged by call family.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NativeValue<'a> {
    /// set-int.
    Int(i32),
    /// set-ivec2.
    IVec2([i32; 2]),
    /// set-ivec3.
    IVec3([i32; 3]),
    /// set-ivec4.
    IVec4([i32; 4]),
    /// set-uint.
    UInt(u32),
    /// set-uvec2.
    UVec2([u32; 2]),
    /// set-uvec3.
    UVec3([u32; 3]),
    /// set-uvec4.
    UVec4([u32; 4]),
    /// set-bool.
    Bool(bool),
    /// set-float.
    Float(f32),
    /// set-double.
    Double(f64),
    /// set-vec2.
    Vec2([f32; 2]),
    /// set-vec3.
    Vec3([f32; 3]),
    /// set-vec4.
    Vec4([f32; 4]),
    /// set-mat4, column-major.
    Mat4([f32; 16]),
    /// set-string.
    Str(&'a str),
    /// set-data.
    Data(&'a [u8]),
    /// set-node.
    Node(RawNode),
    /// add-nodes (appends to a list field).
    AddNodes(&'a [RawNode]),
    /// add-doubles (appends to a list field).
    AddDoubles(&'a [f64]),
    /// set-dict: one named entry of a dictionary field.
    Dict {
        /// Entry name.
        name: &'a str,
        /// Entry value.
        node: RawNode,
    },
    /// set-select with the literal wire name.
    Select(&'a str),
    /// set-flags with a `+`-separated flag list.
    Flags(&'a str),
    /// set-rational.
    Rational(Rational),
}

impl NativeValue<'_> {
    /// Short family name used in logs and error messages.
    pub fn family(&self) -> &'static str {
        match self {
            NativeValue::Int(_) => "int",
            NativeValue::IVec2(_) => "ivec2",
            NativeValue::IVec3(_) => "ivec3",
            NativeValue::IVec4(_) => "ivec4",
            NativeValue::UInt(_) => "uint",
            NativeValue::UVec2(_) => "uvec2",
            NativeValue::UVec3(_) => "uvec3",
            NativeValue::UVec4(_) => "uvec4",
            NativeValue::Bool(_) => "bool",
            NativeValue::Float(_) => "float",
            NativeValue::Double(_) => "double",
            NativeValue::Vec2(_) => "vec2",
            NativeValue::Vec3(_) => "vec3",
            NativeValue::Vec4(_) => "vec4",
            NativeValue::Mat4(_) => "mat4",
            NativeValue::Str(_) => "string",
            NativeValue::Data(_) => "data",
            NativeValue::Node(_) => "node",
            NativeValue::AddNodes(_) => "add-nodes",
            NativeValue::AddDoubles(_) => "add-doubles",
            NativeValue::Dict { .. } => "dict",
            NativeValue::Select(_) => "select",
            NativeValue::Flags(_) => "flags",
            NativeValue::Rational(_) => "rational",
        }
    }
}

/// Node and scene operations exposed by the engine.
///
/// Implementations must be callable from any thread; the engine serializes internally.
pub trait Engine: Send + Sync {
    /// Allocate a node with one reference. Returns [`RawNode::NULL`] on failure.
    fn node_create(&self, ty: NodeType) -> RawNode;

    /// Take one more reference on `node`.
    fn node_ref(&self, node: RawNode);

    /// Drop one reference on `node`, freeing it when the count reaches zero.
    fn node_unref(&self, node: RawNode);

    /// Assign field `key`. Non-zero status on unknown field, type mismatch or out of range value.
    fn node_set(&self, node: RawNode, key: &str, value: NativeValue<'_>) -> i32;

    /// Build a scene around `root`. Returns [`RawScene::NULL`] on failure.
    fn scene_create(&self, root: RawNode, params: &SceneParams) -> RawScene;

    /// Rebuild a scene from its serialized text. Returns [`RawScene::NULL`] on failure.
    fn scene_from_string(&self, text: &str) -> RawScene;

    /// Duration, frame rate and aspect ratio of a scene.
    fn scene_params(&self, scene: RawScene) -> Option<SceneParams>;

    /// Serialize a scene to text.
    fn scene_serialize(&self, scene: RawScene) -> Option<String>;

    /// Enumerate live controls. Every returned node carries a reference owned by the caller.
    fn scene_live_controls(&self, scene: RawScene) -> Result<Vec<(String, RawNode)>, i32>;

    /// Release a scene and the references it holds on its graph.
    fn scene_release(&self, scene: RawScene);
}

/// Shared engine handle.
pub type EngineRef = Arc<dyn Engine>;
