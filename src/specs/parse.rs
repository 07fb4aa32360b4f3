use crate::foundation::error::{NglError, NglResult};
use crate::specs::model::{Specs, TypeName};
use crate::specs::registry::NodeTypeRegistry;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

impl Specs {
    /// Parse and validate a spec document from a reader.
    pub fn from_reader<R: std::io::Read>(r: R, registry: &NodeTypeRegistry) -> NglResult<Self> {
        let value: Value = serde_json::from_reader(r)
            .map_err(|e| NglError::spec_format(format!("parse spec JSON: {e}")))?;
        parse_value(value, registry)
    }

    /// Parse and validate a spec document from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>, registry: &NodeTypeRegistry) -> NglResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .map_err(|e| NglError::io(format!("open spec file '{}': {e}", path.display())))?;
        Self::from_reader(BufReader::new(f), registry)
    }
}

/// Parse and validate a spec document held in memory.
pub fn parse_str(raw: &str, registry: &NodeTypeRegistry) -> NglResult<Specs> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| NglError::spec_format(format!("parse spec JSON: {e}")))?;
    parse_value(value, registry)
}

/// Resolve aliases, decode and validate an already parsed JSON document.
pub fn parse_value(mut value: Value, registry: &NodeTypeRegistry) -> NglResult<Specs> {
    resolve_aliases(&mut value)?;
    let specs: Specs = serde_json::from_value(value)
        .map_err(|e| NglError::spec_format(format!("decode spec document: {e}")))?;
    validate(&specs, registry)?;
    Ok(specs)
}

/// Replace every string-valued entry of `nodes` with the object it names.
///
/// Targets are looked up in the document as read, so an alias pointing at another alias is
/// rejected instead of being chased.
pub fn resolve_aliases(doc: &mut Value) -> NglResult<()> {
    let root = doc
        .as_object_mut()
        .ok_or_else(|| NglError::spec_format("spec document must be a JSON object"))?;
    let nodes = root
        .get_mut("nodes")
        .ok_or_else(|| NglError::spec_format("missing required key 'nodes'"))?
        .as_object_mut()
        .ok_or_else(|| NglError::spec_format("'nodes' must be an object"))?;

    let original: Map<String, Value> = nodes.clone();
    for (name, entry) in nodes.iter_mut() {
        let Value::String(target) = entry else {
            continue;
        };
        let resolved = match original.get(target.as_str()) {
            Some(obj @ Value::Object(_)) => obj.clone(),
            Some(_) => {
                return Err(NglError::spec_format(format!(
                    "node '{name}' aliases '{target}', which is not a node object"
                )));
            }
            None => {
                return Err(NglError::spec_format(format!(
                    "node '{name}' aliases unknown node '{target}'"
                )));
            }
        };
        tracing::debug!(node = %name, target = %target, "resolved spec alias");
        *entry = resolved;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SpecIssue {
    pub(crate) path: String,
    pub(crate) message: String,
}

impl fmt::Display for SpecIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

fn join_issues(issues: &[SpecIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check cross references of a decoded document.
///
/// Structural problems are collected in one pass and reported together as
/// [`NglError::SpecFormat`]. Registry resolution only runs once the structure is sound, and the
/// first unknown public node name is reported as [`NglError::UnknownType`].
pub fn validate(specs: &Specs, registry: &NodeTypeRegistry) -> NglResult<()> {
    let issues = structural_issues(specs);
    if !issues.is_empty() {
        return Err(NglError::spec_format(format!(
            "spec validation failed:\n{}",
            join_issues(&issues)
        )));
    }

    for (name, _) in specs.public_nodes() {
        if registry.lookup(name).is_none() {
            return Err(NglError::unknown_type(name));
        }
    }
    Ok(())
}

pub(crate) fn structural_issues(specs: &Specs) -> Vec<SpecIssue> {
    let mut issues = Vec::new();

    let mut seen_types = HashSet::new();
    for (i, t) in specs.types.iter().enumerate() {
        if !seen_types.insert(t.name) {
            issues.push(SpecIssue {
                path: format!("$.types[{i}]"),
                message: format!("duplicate type '{}'", t.name),
            });
        }
    }

    for (group, entries) in &specs.choices {
        let mut seen = HashSet::new();
        if entries.is_empty() {
            issues.push(SpecIssue {
                path: format!("$.choices.{group}"),
                message: "choice group is empty".to_owned(),
            });
        }
        for (i, c) in entries.iter().enumerate() {
            if !seen.insert(c.name.as_str()) {
                issues.push(SpecIssue {
                    path: format!("$.choices.{group}[{i}]"),
                    message: format!("duplicate choice '{}'", c.name),
                });
            }
        }
    }

    for (node, spec) in &specs.nodes {
        let mut seen = HashSet::new();
        for (i, p) in spec.params.iter().enumerate() {
            let path = format!("$.nodes.{node}.params[{i}]");
            if p.name.is_empty() {
                issues.push(SpecIssue {
                    path: path.clone(),
                    message: "param name is empty".to_owned(),
                });
            }
            if !seen.insert(p.name.as_str()) {
                issues.push(SpecIssue {
                    path: path.clone(),
                    message: format!("duplicate param '{}'", p.name),
                });
            }
            match (&p.choices_type, p.ty) {
                (Some(group), _) if !specs.choices.contains_key(group) => {
                    issues.push(SpecIssue {
                        path,
                        message: format!("unknown choice group '{group}'"),
                    });
                }
                (None, TypeName::Select) => {
                    issues.push(SpecIssue {
                        path,
                        message: format!("select param '{}' names no choice group", p.name),
                    });
                }
                _ => {}
            }
        }
    }

    issues
}

#[cfg(test)]
#[path = "../../tests/unit/specs/parse.rs"]
mod tests;
