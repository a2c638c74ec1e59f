use super::*;
use petgraph::graph::NodeIndex;

/// Anything that can hang under an action.
#[derive(Debug, Clone)]
pub enum Vertex {
    Node(Node),
    Leaf(Leaf),
}

impl Vertex {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Node(node) => node.name(),
            Self::Leaf(leaf) => leaf.name(),
        }
    }
    /// name, or empty before naming has run
    pub fn label(&self) -> &str {
        self.name().unwrap_or_default()
    }
    pub fn parent(&self) -> Option<NodeIndex> {
        match self {
            Self::Node(node) => node.parent(),
            Self::Leaf(leaf) => leaf.parent(),
        }
    }
    pub fn node(&self) -> Option<&Node> {
        match self {
            Self::Node(node) => Some(node),
            Self::Leaf(_) => None,
        }
    }
    pub fn leaf(&self) -> Option<&Leaf> {
        match self {
            Self::Node(_) => None,
            Self::Leaf(leaf) => Some(leaf),
        }
    }
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    pub(crate) fn rename(&mut self, name: impl Into<String>) {
        match self {
            Self::Node(node) => node.rename(name),
            Self::Leaf(leaf) => leaf.rename(name),
        }
    }
    pub(crate) fn adopt(&mut self, parent: NodeIndex) {
        match self {
            Self::Node(node) => node.adopt(parent),
            Self::Leaf(leaf) => leaf.adopt(parent),
        }
    }
}

impl From<Node> for Vertex {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}
impl From<Leaf> for Vertex {
    fn from(leaf: Leaf) -> Self {
        Self::Leaf(leaf)
    }
}

impl std::fmt::Display for Vertex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Node(node) => write!(f, "{}", node),
            Self::Leaf(leaf) => write!(f, "{}", leaf),
        }
    }
}
