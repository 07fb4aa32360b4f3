use crate::node::handle::Node;

/// A field value that is either produced by another node or given literally.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeOrValue<T> {
    /// Value computed by a node (an animation, a uniform, ...).
    Node(Node),
    /// Literal value.
    Value(T),
}

impl<T> NodeOrValue<T> {
    /// Wrap a node.
    pub fn node(node: Node) -> Self {
        Self::Node(node)
    }

    /// Wrap a literal value.
    pub fn value(value: T) -> Self {
        Self::Value(value)
    }

    /// Borrow the node variant, if any.
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(n) => Some(n),
            Self::Value(_) => None,
        }
    }

    /// Borrow the literal variant, if any.
    pub fn as_value(&self) -> Option<&T> {
        match self {
            Self::Node(_) => None,
            Self::Value(v) => Some(v),
        }
    }
}

impl<T> From<Node> for NodeOrValue<T> {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}
