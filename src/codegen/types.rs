use crate::foundation::error::{NglError, NglResult};
use crate::specs::TypeName;

/// Native setter family a field is forwarded to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallFamily {
    /// set-int.
    Int,
    /// set-uint.
    UInt,
    /// set-ivecN.
    IVec(u8),
    /// set-uvecN.
    UVec(u8),
    /// set-float.
    Float,
    /// set-double.
    Double,
    /// set-vecN.
    Vec(u8),
    /// set-mat4.
    Mat4,
    /// set-bool.
    Bool,
    /// set-string.
    Str,
    /// set-data.
    Data,
    /// set-node.
    Node,
    /// add-nodes.
    AddNodes,
    /// add-doubles.
    AddDoubles,
    /// set-dict, once per entry.
    Dict,
    /// set-select with the choice's wire name.
    Select,
    /// set-flags.
    Flags,
    /// set-rational.
    Rational,
}

impl CallFamily {
    /// [`crate::node::Node`] method implementing this family.
    pub fn method(self) -> &'static str {
        match self {
            CallFamily::Int => "set_int",
            CallFamily::UInt => "set_uint",
            CallFamily::IVec(2) => "set_ivec2",
            CallFamily::IVec(3) => "set_ivec3",
            CallFamily::IVec(_) => "set_ivec4",
            CallFamily::UVec(2) => "set_uvec2",
            CallFamily::UVec(3) => "set_uvec3",
            CallFamily::UVec(_) => "set_uvec4",
            CallFamily::Float => "set_float",
            CallFamily::Double => "set_double",
            CallFamily::Vec(2) => "set_vec2",
            CallFamily::Vec(3) => "set_vec3",
            CallFamily::Vec(_) => "set_vec4",
            CallFamily::Mat4 => "set_mat4",
            CallFamily::Bool => "set_bool",
            CallFamily::Str => "set_string",
            CallFamily::Data => "set_data",
            CallFamily::Node => "set_node",
            CallFamily::AddNodes => "add_nodes",
            CallFamily::AddDoubles => "add_doubles",
            CallFamily::Dict => "set_dict_entries",
            CallFamily::Select => "set_select",
            CallFamily::Flags => "set_flags",
            CallFamily::Rational => "set_rational",
        }
    }

    /// Argument expression for a value bound to `var`.
    pub fn arg(self, var: &str) -> String {
        match self {
            CallFamily::Select => format!("{var}.native_value()"),
            _ => var.to_owned(),
        }
    }
}

/// Rust representation of one wire type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappedType {
    /// Parameter type as written in generated code.
    pub rust: String,
    /// Setter family.
    pub family: CallFamily,
}

fn mapped(rust: impl Into<String>, family: CallFamily) -> MappedType {
    MappedType {
        rust: rust.into(),
        family,
    }
}

/// Map a wire type to its Rust parameter type and setter family.
///
/// `choice` is the generated enum name for `select` fields.
pub fn map_type(ty: TypeName, choice: Option<&str>) -> NglResult<MappedType> {
    Ok(match ty {
        TypeName::I32 => mapped("i32", CallFamily::Int),
        TypeName::IVec2 => mapped("[i32; 2]", CallFamily::IVec(2)),
        TypeName::IVec3 => mapped("[i32; 3]", CallFamily::IVec(3)),
        TypeName::IVec4 => mapped("[i32; 4]", CallFamily::IVec(4)),
        TypeName::Bool => mapped("bool", CallFamily::Bool),
        TypeName::U32 => mapped("u32", CallFamily::UInt),
        TypeName::UVec2 => mapped("[u32; 2]", CallFamily::UVec(2)),
        TypeName::UVec3 => mapped("[u32; 3]", CallFamily::UVec(3)),
        TypeName::UVec4 => mapped("[u32; 4]", CallFamily::UVec(4)),
        TypeName::F64 => mapped("f64", CallFamily::Double),
        TypeName::Str => mapped("&str", CallFamily::Str),
        TypeName::Data => mapped("&[u8]", CallFamily::Data),
        TypeName::F32 => mapped("f32", CallFamily::Float),
        TypeName::Vec2 => mapped("[f32; 2]", CallFamily::Vec(2)),
        TypeName::Vec3 => mapped("[f32; 3]", CallFamily::Vec(3)),
        TypeName::Vec4 => mapped("[f32; 4]", CallFamily::Vec(4)),
        TypeName::Mat4 => mapped("[f32; 16]", CallFamily::Mat4),
        TypeName::Node => mapped("&Node", CallFamily::Node),
        TypeName::NodeList => mapped("&[Node]", CallFamily::AddNodes),
        TypeName::F64List => mapped("&[f64]", CallFamily::AddDoubles),
        TypeName::NodeDict => mapped("&BTreeMap<String, Node>", CallFamily::Dict),
        TypeName::Select => {
            let name = choice.ok_or_else(|| {
                NglError::spec_format("select field without a choice group")
            })?;
            mapped(format!("super::{name}"), CallFamily::Select)
        }
        TypeName::Flags => mapped("&str", CallFamily::Flags),
        TypeName::Rational => mapped("Rational", CallFamily::Rational),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/codegen/types.rs"]
mod tests;
