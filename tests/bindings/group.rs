// @generated by nglbind from the engine node specification. Do not edit.

use nglbind::node::{EngineRef, Node, NodeType};
use nglbind::NglResult;

/// `Group` node (`src/node_group.c`).
///
/// # Fields
///
/// - `children`: a set of scenes
#[derive(Clone, Debug, PartialEq)]
pub struct Group(Node);

impl Group {
    /// Engine type tag.
    pub const TYPE: NodeType = NodeType::from_tag(*b"Grp ");

    /// Create the node and assign every provided field in declaration order.
    pub fn new(
        engine: &EngineRef,
        children: Option<&[Node]>,
    ) -> NglResult<Self> {
        let node = Node::create(engine, Self::TYPE)?;
        if let Some(children) = children {
            node.add_nodes("children", children)?;
        }
        Ok(Self(node))
    }

    /// a set of scenes
    pub fn set_children(&self, children: &[Node]) -> NglResult<()> {
        self.0.add_nodes("children", children)
    }

    /// Wrapped node handle.
    pub fn into_node(self) -> Node {
        self.0
    }
}

impl std::ops::Deref for Group {
    type Target = Node;

    fn deref(&self) -> &Node {
        &self.0
    }
}

impl AsRef<Node> for Group {
    fn as_ref(&self) -> &Node {
        &self.0
    }
}

impl From<Group> for Node {
    fn from(value: Group) -> Node {
        value.0
    }
}
