//! Runtime node handles used by generated wrapper types.

/// Reference-counted node handle and its typed setters.
pub mod handle;
/// Node-or-literal field values.
pub mod or_value;

pub use crate::foundation::core::NodeType;
pub use crate::native::EngineRef;
pub use handle::Node;
pub use or_value::NodeOrValue;
