use crate::codegen::GenerateOptions;
use crate::codegen::naming::{field_ident, module_ident, setter_ident, type_ident};
use crate::codegen::types::{MappedType, map_type};
use crate::foundation::core::NodeType;
use crate::foundation::error::{NglError, NglResult};
use crate::specs::{ChoiceSpec, NodeSpec, NodeTypeRegistry, Specs, TypeName};
use std::collections::{BTreeMap, HashSet};

/// A generated choice enum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumDef {
    /// Rust type name.
    pub name: String,
    /// Choice group name in the spec document.
    pub group: String,
    /// Module (file stem) the enum is written to.
    pub module: String,
    /// Variants in spec order.
    pub variants: Vec<VariantDef>,
}

/// One variant of an [`EnumDef`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariantDef {
    /// Rust variant identifier.
    pub ident: String,
    /// Literal value handed to the engine.
    pub wire: String,
    /// Documentation.
    pub doc: String,
}

/// A generated node wrapper type.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDef {
    /// Rust type name.
    pub name: String,
    /// Node name in the spec document.
    pub node_name: String,
    /// Module (file stem) the type is written to.
    pub module: String,
    /// Engine type tag.
    pub tag: NodeType,
    /// Engine source file, when the spec document names one.
    pub source_file: Option<String>,
    /// Fields in constructor order.
    pub fields: Vec<FieldDef>,
}

/// One field of a [`ClassDef`].
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDef {
    /// Wire key passed to the native setter.
    pub key: String,
    /// Parameter identifier.
    pub ident: String,
    /// Setter method name.
    pub setter: String,
    /// Wire type.
    pub ty: TypeName,
    /// Mapped Rust type and call family.
    pub mapped: MappedType,
    /// Constructor parameter is optional.
    pub nullable: bool,
    /// Field also accepts a node.
    pub can_be_node: bool,
    /// Documentation.
    pub doc: String,
}

impl FieldDef {
    /// Non-null parameter type (as taken by the setter).
    pub fn value_type(&self) -> String {
        if self.can_be_node {
            format!("NodeOrValue<{}>", self.mapped.rust)
        } else {
            self.mapped.rust.clone()
        }
    }

    /// Constructor parameter type.
    pub fn ctor_type(&self) -> String {
        if self.nullable {
            format!("Option<{}>", self.value_type())
        } else {
            self.value_type()
        }
    }
}

/// Everything synthesized from one spec document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Definitions {
    /// Choice enums, sorted by group name.
    pub enums: Vec<EnumDef>,
    /// Node types, sorted by node name.
    pub classes: Vec<ClassDef>,
}

/// Build the enum for one choice group.
pub fn synthesize_choice_enum(
    group: &str,
    choices: &[ChoiceSpec],
    prefix: &str,
) -> NglResult<EnumDef> {
    let name = format!("{prefix}{}", type_ident(group));
    let mut seen = HashSet::new();
    let mut variants = Vec::with_capacity(choices.len());
    for c in choices {
        let ident = type_ident(&c.name);
        if !seen.insert(ident.clone()) {
            return Err(NglError::name_collision(format!(
                "choice '{}' of group '{group}' maps to duplicate variant '{ident}'",
                c.name
            )));
        }
        variants.push(VariantDef {
            ident,
            wire: c.name.clone(),
            doc: c.description.clone(),
        });
    }
    Ok(EnumDef {
        module: module_ident(&name),
        name,
        group: group.to_owned(),
        variants,
    })
}

/// Build the wrapper type for one node.
///
/// `enum_names` maps choice group names to generated enum names.
pub fn synthesize_node_class(
    node_name: &str,
    spec: &NodeSpec,
    registry: &NodeTypeRegistry,
    enum_names: &BTreeMap<String, String>,
    prefix: &str,
) -> NglResult<ClassDef> {
    let tag = registry
        .lookup(node_name)
        .ok_or_else(|| NglError::unknown_type(node_name))?;
    let name = format!("{prefix}{}", type_ident(node_name));

    let mut idents = HashSet::new();
    let mut fields = Vec::with_capacity(spec.params.len());
    for p in &spec.params {
        let choice = match &p.choices_type {
            Some(group) => Some(enum_names.get(group).ok_or_else(|| {
                NglError::spec_format(format!(
                    "{node_name}.{}: unknown choice group '{group}'",
                    p.name
                ))
            })?),
            None => None,
        };
        let mapped = map_type(p.ty, choice.map(String::as_str)).map_err(|e| match e {
            NglError::SpecFormat(msg) => {
                NglError::spec_format(format!("{node_name}.{}: {msg}", p.name))
            }
            other => other,
        })?;
        let ident = field_ident(&p.name);
        if !idents.insert(ident.clone()) {
            return Err(NglError::name_collision(format!(
                "{node_name}: field '{}' maps to duplicate identifier '{ident}'",
                p.name
            )));
        }
        fields.push(FieldDef {
            key: p.name.clone(),
            setter: setter_ident(&p.name),
            ident,
            ty: p.ty,
            mapped,
            nullable: p.nullable(),
            can_be_node: p.can_be_node(),
            doc: p.description.clone(),
        });
    }

    Ok(ClassDef {
        module: module_ident(&name),
        name,
        node_name: node_name.to_owned(),
        tag,
        source_file: spec.source_file.clone(),
        fields,
    })
}

/// Synthesize every enum and public node type of `specs`.
///
/// Fails with [`NglError::NameCollision`] when two definitions share a type or module name.
pub fn synthesize(
    specs: &Specs,
    registry: &NodeTypeRegistry,
    opts: &GenerateOptions,
) -> NglResult<Definitions> {
    let mut defs = Definitions::default();
    let mut enum_names = BTreeMap::new();
    for (group, choices) in &specs.choices {
        let e = synthesize_choice_enum(group, choices, &opts.prefix)?;
        enum_names.insert(group.clone(), e.name.clone());
        defs.enums.push(e);
    }
    for (name, spec) in specs.public_nodes() {
        let class = synthesize_node_class(name, spec, registry, &enum_names, &opts.prefix)?;
        defs.classes.push(class);
    }
    check_collisions(&defs)?;
    Ok(defs)
}

// Names imported by every generated file.
const RESERVED_TYPES: &[&str] = &[
    "BTreeMap",
    "EngineRef",
    "NglResult",
    "Node",
    "NodeOrValue",
    "NodeType",
    "Option",
    "Rational",
    "Result",
    "String",
];

fn check_collisions(defs: &Definitions) -> NglResult<()> {
    let mut types: BTreeMap<&str, &str> = BTreeMap::new();
    let mut modules: BTreeMap<&str, &str> = BTreeMap::new();
    let entries = defs
        .enums
        .iter()
        .map(|e| (e.name.as_str(), e.module.as_str(), e.group.as_str()))
        .chain(
            defs.classes
                .iter()
                .map(|c| (c.name.as_str(), c.module.as_str(), c.node_name.as_str())),
        );
    for (name, module, source) in entries {
        if RESERVED_TYPES.contains(&name) {
            return Err(NglError::name_collision(format!(
                "'{source}' generates type '{name}', which shadows a runtime type"
            )));
        }
        if let Some(prev) = types.insert(name, source) {
            return Err(NglError::name_collision(format!(
                "'{prev}' and '{source}' both generate type '{name}'"
            )));
        }
        if let Some(prev) = modules.insert(module, source) {
            return Err(NglError::name_collision(format!(
                "'{prev}' and '{source}' both generate file '{module}.rs'"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/codegen/synth.rs"]
mod tests;
