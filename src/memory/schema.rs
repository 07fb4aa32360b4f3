use crate::foundation::core::NodeType;
use crate::foundation::error::{NglError, NglResult};
use crate::specs::{NodeTypeRegistry, Specs, TypeName};
use std::collections::{BTreeMap, HashMap};

/// Handle does not name a live node or scene.
pub const STATUS_INVALID_HANDLE: i32 = -1;
/// Field key is not declared for the node type.
pub const STATUS_UNKNOWN_FIELD: i32 = -2;
/// Value family does not match the declared field type.
pub const STATUS_TYPE_MISMATCH: i32 = -3;
/// Select or flags value is not part of the field's choice group.
pub const STATUS_OUT_OF_RANGE: i32 = -4;

/// Field key accepted on every node.
pub const LABEL_KEY: &str = "label";

#[derive(Clone, Debug)]
struct FieldSchema {
    ty: TypeName,
    can_be_node: bool,
    choices: Option<Vec<String>>,
}

#[derive(Clone, Debug)]
struct NodeSchema {
    name: String,
    fields: BTreeMap<String, FieldSchema>,
}

/// Field declarations the in-memory engine checks setter calls against.
#[derive(Clone, Debug, Default)]
pub struct Schema {
    nodes: HashMap<NodeType, NodeSchema>,
}

impl Schema {
    /// Build from a validated spec document. Internal alias targets are skipped.
    pub fn from_specs(specs: &Specs, registry: &NodeTypeRegistry) -> NglResult<Self> {
        let mut nodes = HashMap::new();
        for (name, spec) in specs.public_nodes() {
            let ty = registry
                .lookup(name)
                .ok_or_else(|| NglError::unknown_type(name))?;
            let fields = spec
                .params
                .iter()
                .map(|p| {
                    let choices = p.choices_type.as_ref().and_then(|group| {
                        specs
                            .choices
                            .get(group)
                            .map(|c| c.iter().map(|c| c.name.clone()).collect())
                    });
                    let field = FieldSchema {
                        ty: p.ty,
                        can_be_node: p.can_be_node(),
                        choices,
                    };
                    (p.name.clone(), field)
                })
                .collect();
            nodes.insert(
                ty,
                NodeSchema {
                    name: name.to_owned(),
                    fields,
                },
            );
        }
        Ok(Self { nodes })
    }

    /// `true` when nodes of type `ty` may be created.
    pub fn knows(&self, ty: NodeType) -> bool {
        self.nodes.contains_key(&ty)
    }

    /// Spec name of a node type.
    pub fn node_name(&self, ty: NodeType) -> Option<&str> {
        self.nodes.get(&ty).map(|n| n.name.as_str())
    }

    /// Status for assigning a value of wire type `wire` to `key` on a node of type `ty`.
    ///
    /// `choice` carries the literal text of `select` and `flags` values.
    pub fn check(&self, ty: NodeType, key: &str, wire: TypeName, choice: Option<&str>) -> i32 {
        if key == LABEL_KEY {
            return if wire == TypeName::Str {
                0
            } else {
                STATUS_TYPE_MISMATCH
            };
        }
        let Some(node) = self.nodes.get(&ty) else {
            return STATUS_INVALID_HANDLE;
        };
        let Some(field) = node.fields.get(key) else {
            return STATUS_UNKNOWN_FIELD;
        };
        if wire != field.ty && !(wire == TypeName::Node && field.can_be_node) {
            return STATUS_TYPE_MISMATCH;
        }
        match (wire, choice, &field.choices) {
            (TypeName::Select, Some(value), Some(allowed)) => {
                if allowed.iter().any(|c| c == value) {
                    0
                } else {
                    STATUS_OUT_OF_RANGE
                }
            }
            (TypeName::Flags, Some(value), Some(allowed)) => {
                let ok = value
                    .split('+')
                    .filter(|f| !f.is_empty())
                    .all(|f| allowed.iter().any(|c| c == f));
                if ok { 0 } else { STATUS_OUT_OF_RANGE }
            }
            _ => 0,
        }
    }
}
