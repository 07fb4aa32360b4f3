// @generated by nglbind from the engine node specification. Do not edit.

use nglbind::node::{EngineRef, Node, NodeType};
use nglbind::NglResult;

/// `Texture2D` node.
///
/// # Fields
///
/// - `min_filter`: texture minifying function
#[derive(Clone, Debug, PartialEq)]
pub struct Texture2D(Node);

impl Texture2D {
    /// Engine type tag.
    pub const TYPE: NodeType = NodeType::from_tag(*b"Tex2");

    /// Create the node and assign every provided field in declaration order.
    pub fn new(
        engine: &EngineRef,
        min_filter: Option<super::Filter>,
    ) -> NglResult<Self> {
        let node = Node::create(engine, Self::TYPE)?;
        if let Some(min_filter) = min_filter {
            node.set_select("min_filter", min_filter.native_value())?;
        }
        Ok(Self(node))
    }

    /// texture minifying function
    pub fn set_min_filter(&self, min_filter: super::Filter) -> NglResult<()> {
        self.0.set_select("min_filter", min_filter.native_value())
    }

    /// Wrapped node handle.
    pub fn into_node(self) -> Node {
        self.0
    }
}

impl std::ops::Deref for Texture2D {
    type Target = Node;

    fn deref(&self) -> &Node {
        &self.0
    }
}

impl AsRef<Node> for Texture2D {
    fn as_ref(&self) -> &Node {
        &self.0
    }
}

impl From<Texture2D> for Node {
    fn from(value: Texture2D) -> Node {
        value.0
    }
}
