use crate::*;
use petgraph::graph::NodeIndex;

/// Decision nodes the acting player cannot tell apart.
///
/// # Invariants
///
/// 1. All members are owned by the same player
/// 2. All members offer the same actions, compared as a set
/// 3. Members are sorted by name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InfoSet(Vec<NodeIndex>);

impl InfoSet {
    /// arrange members by name, breaking ties by index
    pub fn arrange(graph: &Arena, mut members: Vec<NodeIndex>) -> Self {
        members.sort_by(|a, b| graph[*a].label().cmp(graph[*b].label()).then(a.cmp(b)));
        members.dedup();
        Self(members)
    }
    pub fn members(&self) -> &[NodeIndex] {
        &self.0
    }
    /// representative member, first by name
    pub fn head(&self) -> NodeIndex {
        self.0.first().copied().expect("information sets are never empty")
    }
    pub fn contains(&self, node: &NodeIndex) -> bool {
        self.0.contains(node)
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_singleton(&self) -> bool {
        self.0.len() == 1
    }
    pub fn iter(&self) -> impl Iterator<Item = &NodeIndex> {
        self.0.iter()
    }
    /// the shared owner
    pub fn player<'g>(&self, graph: &'g Arena) -> Option<&'g Player> {
        graph[self.head()].node().and_then(Node::player)
    }
    /// "(a, b, c)" over member names
    pub fn describe(&self, graph: &Arena) -> String {
        format!(
            "({})",
            self.0
                .iter()
                .map(|i| graph[*i].label())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl From<NodeIndex> for InfoSet {
    fn from(node: NodeIndex) -> Self {
        Self(vec![node])
    }
}
