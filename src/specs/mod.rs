//! Node specification document: model, parser and the engine's node type registry.

/// Serde model of the specification document.
pub mod model;
/// Alias resolution, decoding and validation.
pub mod parse;
/// Node name → four-character tag table.
pub mod registry;

pub use model::{ChoiceSpec, NodeSpec, ParamFlag, ParamSpec, Specs, TypeName, TypeSpec};
pub use parse::{parse_str, parse_value, resolve_aliases, validate};
pub use registry::NodeTypeRegistry;
