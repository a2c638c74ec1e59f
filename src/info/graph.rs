use super::*;
use crate::*;
use petgraph::graph::DiGraph;
use petgraph::graph::NodeIndex;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::collections::HashSet;

/// The tree condensed to information sets.
///
/// There is an edge A → B whenever some member of A has a child in B.
/// Self-edges are dropped. Derived on demand from the current
/// partition; it is never kept in sync with later mutations.
#[derive(Debug, Clone, Default)]
pub struct InfoGraph {
    order: Vec<InfoSet>,
    adjacency: BTreeMap<InfoSet, Vec<InfoSet>>,
    labels: BTreeMap<InfoSet, String>,
    owners: BTreeMap<InfoSet, Player>,
}

impl From<&Tree> for InfoGraph {
    fn from(tree: &Tree) -> Self {
        let sets = tree.info_sets();
        let owner = sets
            .iter()
            .enumerate()
            .flat_map(|(i, set)| set.iter().map(move |n| (*n, i)))
            .collect::<HashMap<NodeIndex, usize>>();
        let mut adjacency = BTreeMap::new();
        for (i, set) in sets.iter().enumerate() {
            let mut targets = set
                .iter()
                .flat_map(|n| tree.children(*n))
                .filter_map(|child| owner.get(&child).copied())
                .filter(|j| *j != i)
                .collect::<Vec<usize>>();
            targets.sort();
            targets.dedup();
            adjacency.insert(
                set.clone(),
                targets.into_iter().map(|j| sets[j].clone()).collect(),
            );
        }
        Self {
            order: sets.to_vec(),
            labels: sets
                .iter()
                .map(|s| (s.clone(), s.describe(tree.graph())))
                .collect(),
            owners: sets
                .iter()
                .filter_map(|s| s.player(tree.graph()).map(|p| (s.clone(), p.clone())))
                .collect(),
            adjacency,
        }
    }
}

impl InfoGraph {
    /// sets in partition order
    pub fn sets(&self) -> &[InfoSet] {
        &self.order
    }
    pub fn successors(&self, set: &InfoSet) -> &[InfoSet] {
        self.adjacency.get(set).map(Vec::as_slice).unwrap_or_default()
    }
    pub fn adjacency(&self) -> &BTreeMap<InfoSet, Vec<InfoSet>> {
        &self.adjacency
    }
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }
    pub fn label(&self, set: &InfoSet) -> &str {
        self.labels.get(set).map(String::as_str).unwrap_or_default()
    }
    pub fn owner(&self, set: &InfoSet) -> Option<&Player> {
        self.owners.get(set)
    }
    /// breadth-first layers starting at `from`, each set visited once,
    /// each layer in partition order
    pub fn layers(&self, from: &InfoSet) -> Vec<Vec<InfoSet>> {
        let rank = |s: &InfoSet| self.order.iter().position(|o| o == s).unwrap_or(usize::MAX);
        let mut layers = Vec::new();
        let mut visited = HashSet::from([from.clone()]);
        let mut current = vec![from.clone()];
        while !current.is_empty() {
            let mut next = current
                .iter()
                .flat_map(|s| self.successors(s))
                .filter(|s| visited.insert((*s).clone()))
                .cloned()
                .collect::<Vec<InfoSet>>();
            next.sort_by_key(|s| rank(s));
            layers.push(std::mem::replace(&mut current, next));
        }
        layers
    }
    /// petgraph view for plotting, edges labelled by the acting player
    pub fn digraph(&self) -> DiGraph<String, Player> {
        let mut graph = DiGraph::new();
        let index = self
            .order
            .iter()
            .map(|s| (s, graph.add_node(self.label(s).to_string())))
            .collect::<HashMap<&InfoSet, NodeIndex>>();
        for (source, targets) in self.adjacency.iter() {
            if let Some(player) = self.owner(source) {
                for target in targets {
                    graph.add_edge(index[source], index[target], player.clone());
                }
            }
        }
        graph
    }
}

impl std::fmt::Display for InfoGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for set in self.order.iter() {
            let owner = self.owner(set).map(Player::name).unwrap_or_default();
            let targets = self
                .successors(set)
                .iter()
                .map(|t| self.label(t))
                .collect::<Vec<_>>();
            match targets.is_empty() {
                true => writeln!(f, "{} [{}]", self.label(set), owner)?,
                false => writeln!(f, "{} [{}] → {}", self.label(set), owner, targets.join(" "))?,
            }
        }
        Ok(())
    }
}
