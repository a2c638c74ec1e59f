use super::*;
use crate::*;
use petgraph::graph::NodeIndex;

/// A validated extensive-form game.
///
/// Topology, names, players, and the node and leaf lists are fixed at
/// construction. Only the information-set partition changes afterwards.
///
/// # Construction
///
/// - `grow(draft, root)`: validate a caller-built [`Draft`]
/// - `TryFrom<&Efg>`: import an external tree
///
/// # Information sets
///
/// - `set_info_set(nodes)` / `remove_info_set(nodes)`: regroup
/// - `perfect_info()`: every set is a singleton
/// - `info_graph()`: the condensed graph of sets
#[derive(Debug, Clone)]
pub struct Tree {
    graph: Arena,
    root: NodeIndex,
    nodes: Vec<NodeIndex>,
    leaves: Vec<NodeIndex>,
    players: Vec<Player>,
    partition: Partition,
}

impl Tree {
    pub fn grow(draft: Draft, root: NodeIndex) -> Result<Self> {
        let mut graph = draft.into_graph();
        let skeleton = TreeBuilder::new(&mut graph, root).grow()?;
        let players = Namer::new(&mut graph, &skeleton).name();
        for &leaf in skeleton.leaves.iter() {
            if let Some(Err(reason)) = graph[leaf].leaf().map(|l| l.audit(&players)) {
                return Err(Error::InvalidPayoffs {
                    leaf: graph[leaf].label().to_string(),
                    reason,
                });
            }
        }
        let mut nodes = skeleton.order;
        nodes.sort_by(|a, b| {
            let parent = |i: &NodeIndex| graph[*i].parent().map(|p| graph[p].label()).unwrap_or_default();
            graph[*a]
                .label()
                .cmp(graph[*b].label())
                .then_with(|| parent(a).cmp(parent(b)))
                .then(a.cmp(b))
        });
        let mut leaves = skeleton.leaves;
        leaves.sort_by(|a, b| graph[*a].label().cmp(graph[*b].label()).then(a.cmp(b)));
        let partition = Partition::singletons(&graph, &nodes);
        log::info!(
            "built game of {} players, {} nodes, {} leaves",
            players.len(),
            nodes.len(),
            leaves.len()
        );
        Ok(Self {
            graph,
            root,
            nodes,
            leaves,
            players,
            partition,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }
    /// decision nodes, sorted by name
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }
    /// leaves, sorted by name
    pub fn leaves(&self) -> &[NodeIndex] {
        &self.leaves
    }
    pub fn info_sets(&self) -> &[InfoSet] {
        self.partition.sets()
    }
    pub fn tree_root(&self) -> NodeIndex {
        self.root
    }
    pub fn graph(&self) -> &Arena {
        &self.graph
    }
    pub fn vertex(&self, index: NodeIndex) -> &Vertex {
        &self.graph[index]
    }
    pub fn node(&self, index: NodeIndex) -> Option<&Node> {
        self.graph.node_weight(index).and_then(Vertex::node)
    }
    pub fn leaf(&self, index: NodeIndex) -> Option<&Leaf> {
        self.graph.node_weight(index).and_then(Vertex::leaf)
    }
    pub fn name(&self, index: NodeIndex) -> &str {
        self.graph[index].label()
    }
    /// first decision node or leaf carrying `name`
    pub fn find(&self, name: &str) -> Option<NodeIndex> {
        self.nodes
            .iter()
            .chain(self.leaves.iter())
            .find(|i| self.name(**i) == name)
            .copied()
    }
    pub fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        match index == self.root {
            true => None,
            false => self.graph[index].parent(),
        }
    }
    /// children in action order
    pub fn children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        self.branches(index).into_iter().map(|(_, c)| c).collect()
    }
    /// (action, child) pairs in action order
    pub fn branches(&self, index: NodeIndex) -> Vec<(&Action, NodeIndex)> {
        self.node(index)
            .map(|node| {
                node.actions()
                    .iter()
                    .filter_map(|a| follow(&self.graph, index, a).map(|c| (a, c)))
                    .collect()
            })
            .unwrap_or_default()
    }
    /// the child reached by taking `action`
    pub fn follow(&self, index: NodeIndex, action: &Action) -> Option<NodeIndex> {
        self.node(index).and_then(|n| n.position(action))?;
        follow(&self.graph, index, action)
    }
    /// every child is a leaf
    pub fn is_terminal(&self, index: NodeIndex) -> bool {
        self.children(index)
            .iter()
            .all(|c| self.graph[*c].is_leaf())
    }

    pub fn set_info_set(&mut self, nodes: &[NodeIndex]) -> Result<()> {
        self.partition.set(&self.graph, &self.nodes, nodes)
    }
    pub fn remove_info_set(&mut self, nodes: &[NodeIndex]) -> Result<()> {
        self.partition.remove(&self.graph, nodes)
    }
    pub fn perfect_info(&self) -> bool {
        self.partition.perfect(&self.graph, &self.nodes)
    }
    pub fn info_set(&self, node: NodeIndex) -> Option<&InfoSet> {
        self.partition.find(node)
    }
    pub fn info_graph(&self) -> InfoGraph {
        InfoGraph::from(self)
    }

    /// display the Tree in a human-readable format
    fn show(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "ROOT   {}", self.vertex(self.root))?;
        let mut stack = self
            .branches(self.root)
            .into_iter()
            .rev()
            .enumerate()
            .map(|(i, (edge, child))| (edge.clone(), child, String::new(), i == 0))
            .collect::<Vec<_>>();
        while let Some((edge, x, prefix, last)) = stack.pop() {
            let stem = if last { "└" } else { "├" };
            let gaps = if last { "    " } else { "│   " };
            writeln!(f, "{}{}──{} → {}", prefix, stem, edge, self.vertex(x))?;
            let prefix = format!("{}{}", prefix, gaps);
            stack.extend(
                self.branches(x)
                    .into_iter()
                    .rev()
                    .enumerate()
                    .map(|(i, (edge, child))| (edge.clone(), child, prefix.clone(), i == 0)),
            );
        }
        Ok(())
    }
}

impl TryFrom<(Draft, NodeIndex)> for Tree {
    type Error = Error;
    fn try_from((draft, root): (Draft, NodeIndex)) -> Result<Self> {
        Self::grow(draft, root)
    }
}

impl std::fmt::Display for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.show(f)
    }
}
