use crate::foundation::core::{NodeType, Rational};
use crate::foundation::error::{NglError, NglResult, check_status};
use crate::native::{EngineRef, NativeValue, RawNode};
use std::collections::BTreeMap;
use std::fmt;

/// Reference-counted handle to an engine node.
///
/// Cloning takes a new engine reference and dropping releases one, so the engine frees the node
/// once the last handle (and every scene holding it) is gone.
pub struct Node {
    engine: EngineRef,
    raw: RawNode,
}

impl Node {
    /// Allocate a node of type `ty`.
    pub fn create(engine: &EngineRef, ty: NodeType) -> NglResult<Self> {
        let raw = engine.node_create(ty);
        if raw.is_null() {
            return Err(NglError::native_call(format!("create {ty}"), -1));
        }
        Ok(Self {
            engine: engine.clone(),
            raw,
        })
    }

    /// Wrap an existing handle.
    ///
    /// With `steal_ref` the caller's reference is adopted; otherwise a new one is taken.
    pub fn from_raw(engine: &EngineRef, raw: RawNode, steal_ref: bool) -> NglResult<Self> {
        if raw.is_null() {
            return Err(NglError::native_call("wrap null node", -1));
        }
        if !steal_ref {
            engine.node_ref(raw);
        }
        Ok(Self {
            engine: engine.clone(),
            raw,
        })
    }

    /// Underlying engine handle.
    pub fn raw(&self) -> RawNode {
        self.raw
    }

    /// Engine that owns this node.
    pub fn engine(&self) -> &EngineRef {
        &self.engine
    }

    /// Assign a field through any call family.
    pub fn set(&self, key: &str, value: NativeValue<'_>) -> NglResult<()> {
        let status = self.engine.node_set(self.raw, key, value);
        if status != 0 {
            tracing::debug!(key, family = value.family(), status, "native setter failed");
        }
        check_status(key, status)
    }

    /// Set the `label` field every node carries.
    pub fn set_label(&self, label: &str) -> NglResult<()> {
        self.set_string("label", label)
    }

    /// Set a field of type `i32`.
    pub fn set_int(&self, key: &str, value: i32) -> NglResult<()> {
        self.set(key, NativeValue::Int(value))
    }

    /// Set a field of type `[i32; 2]`.
    pub fn set_ivec2(&self, key: &str, value: [i32; 2]) -> NglResult<()> {
        self.set(key, NativeValue::IVec2(value))
    }

    /// Set a field of type `[i32; 3]`.
    pub fn set_ivec3(&self, key: &str, value: [i32; 3]) -> NglResult<()> {
        self.set(key, NativeValue::IVec3(value))
    }

    /// Set a field of type `[i32; 4]`.
    pub fn set_ivec4(&self, key: &str, value: [i32; 4]) -> NglResult<()> {
        self.set(key, NativeValue::IVec4(value))
    }

    /// Set a field of type `u32`.
    pub fn set_uint(&self, key: &str, value: u32) -> NglResult<()> {
        self.set(key, NativeValue::UInt(value))
    }

    /// Set a field of type `[u32; 2]`.
    pub fn set_uvec2(&self, key: &str, value: [u32; 2]) -> NglResult<()> {
        self.set(key, NativeValue::UVec2(value))
    }

    /// Set a field of type `[u32; 3]`.
    pub fn set_uvec3(&self, key: &str, value: [u32; 3]) -> NglResult<()> {
        self.set(key, NativeValue::UVec3(value))
    }

    /// Set a field of type `[u32; 4]`.
    pub fn set_uvec4(&self, key: &str, value: [u32; 4]) -> NglResult<()> {
        self.set(key, NativeValue::UVec4(value))
    }

    /// Set a field of type `bool`.
    pub fn set_bool(&self, key: &str, value: bool) -> NglResult<()> {
        self.set(key, NativeValue::Bool(value))
    }

    /// Set a field of type `f32`.
    pub fn set_float(&self, key: &str, value: f32) -> NglResult<()> {
        self.set(key, NativeValue::Float(value))
    }

    /// Set a field of type `f64`.
    pub fn set_double(&self, key: &str, value: f64) -> NglResult<()> {
        self.set(key, NativeValue::Double(value))
    }

    /// Set a field of type `[f32; 2]`.
    pub fn set_vec2(&self, key: &str, value: [f32; 2]) -> NglResult<()> {
        self.set(key, NativeValue::Vec2(value))
    }

    /// Set a field of type `[f32; 3]`.
    pub fn set_vec3(&self, key: &str, value: [f32; 3]) -> NglResult<()> {
        self.set(key, NativeValue::Vec3(value))
    }

    /// Set a field of type `[f32; 4]`.
    pub fn set_vec4(&self, key: &str, value: [f32; 4]) -> NglResult<()> {
        self.set(key, NativeValue::Vec4(value))
    }

    /// Set a 4x4 matrix given in column-major order.
    pub fn set_mat4(&self, key: &str, value: [f32; 16]) -> NglResult<()> {
        self.set(key, NativeValue::Mat4(value))
    }

    /// Set a field of type `&str`.
    pub fn set_string(&self, key: &str, value: &str) -> NglResult<()> {
        self.set(key, NativeValue::Str(value))
    }

    /// Copy `value` into a data field. The length travels with the slice.
    pub fn set_data(&self, key: &str, value: &[u8]) -> NglResult<()> {
        self.set(key, NativeValue::Data(value))
    }

    /// Point a node field at `value`.
    pub fn set_node(&self, key: &str, value: &Node) -> NglResult<()> {
        self.set(key, NativeValue::Node(value.raw))
    }

    /// Append every node of `values` to a list field in one call.
    pub fn add_nodes(&self, key: &str, values: &[Node]) -> NglResult<()> {
        let raws: Vec<RawNode> = values.iter().map(Node::raw).collect();
        self.set(key, NativeValue::AddNodes(&raws))
    }

    /// Append every value to a double list field in one call.
    pub fn add_doubles(&self, key: &str, values: &[f64]) -> NglResult<()> {
        self.set(key, NativeValue::AddDoubles(values))
    }

    /// Set one entry of a dictionary field.
    pub fn set_dict(&self, key: &str, name: &str, value: &Node) -> NglResult<()> {
        self.set(
            key,
            NativeValue::Dict {
                name,
                node: value.raw,
            },
        )
    }

    /// Set every entry of `values`, one native call per entry, in key order.
    pub fn set_dict_entries(&self, key: &str, values: &BTreeMap<String, Node>) -> NglResult<()> {
        for (name, node) in values {
            self.set_dict(key, name, node)?;
        }
        Ok(())
    }

    /// Set a choice field by its literal wire name.
    pub fn set_select(&self, key: &str, value: &str) -> NglResult<()> {
        self.set(key, NativeValue::Select(value))
    }

    /// Set a flags field from a `+`-separated list of flag names.
    pub fn set_flags(&self, key: &str, value: &str) -> NglResult<()> {
        self.set(key, NativeValue::Flags(value))
    }

    /// Set a field of type `Rational`.
    pub fn set_rational(&self, key: &str, value: Rational) -> NglResult<()> {
        self.set(key, NativeValue::Rational(value))
    }
}

impl Clone for Node {
    fn clone(&self) -> Self {
        self.engine.node_ref(self.raw);
        Self {
            engine: self.engine.clone(),
            raw: self.raw,
        }
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        self.engine.node_unref(self.raw);
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Node {}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Node").field(&self.raw.0).finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/node/handle.rs"]
mod tests;
