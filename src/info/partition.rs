use super::*;
use crate::*;
use petgraph::graph::NodeIndex;
use std::collections::BTreeSet;

/// The information sets of a tree.
///
/// Every decision node belongs to exactly one set, before and after
/// every mutation. Sets are kept sorted by the name of their first
/// member. Mutations validate everything up front, so a failed call
/// leaves the partition exactly as it was.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition(Vec<InfoSet>);

impl Partition {
    /// perfect information: one set per node
    pub fn singletons(graph: &Arena, nodes: &[NodeIndex]) -> Self {
        let mut partition = Self(nodes.iter().copied().map(InfoSet::from).collect());
        partition.sort(graph);
        partition
    }
    pub fn sets(&self) -> &[InfoSet] {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// the set holding `node`
    pub fn find(&self, node: NodeIndex) -> Option<&InfoSet> {
        self.0.iter().find(|set| set.contains(&node))
    }

    /// group `members` into one information set.
    ///
    /// members are pulled out of whatever sets they were in; anything
    /// left uncovered by that removal falls back to a singleton.
    pub fn set(&mut self, graph: &Arena, nodes: &[NodeIndex], members: &[NodeIndex]) -> Result<()> {
        let group = members.iter().copied().collect::<BTreeSet<NodeIndex>>();
        if let Some(stranger) = group.iter().find(|m| !nodes.contains(*m)) {
            return Err(Error::UnknownNode(stranger.index()));
        }
        let players = group
            .iter()
            .filter_map(|&m| graph[m].node())
            .filter_map(Node::player)
            .collect::<BTreeSet<&Player>>();
        if players.len() != 1 {
            return Err(Error::InconsistentPlayer);
        }
        let supports = group
            .iter()
            .filter_map(|&m| graph[m].node())
            .map(Node::support)
            .collect::<BTreeSet<_>>();
        if supports.len() != 1 {
            return Err(Error::InconsistentActions);
        }
        self.0.retain(|set| !set.iter().any(|m| group.contains(m)));
        self.0.push(InfoSet::arrange(graph, group.into_iter().collect()));
        let uncovered = nodes
            .iter()
            .filter(|n| self.find(**n).is_none())
            .copied()
            .collect::<Vec<_>>();
        self.0.extend(uncovered.into_iter().map(InfoSet::from));
        self.sort(graph);
        log::debug!("grouped {} nodes, {} sets remain", members.len(), self.0.len());
        Ok(())
    }

    /// split an existing set back into singletons
    pub fn remove(&mut self, graph: &Arena, members: &[NodeIndex]) -> Result<()> {
        let group = members.iter().copied().collect::<BTreeSet<NodeIndex>>();
        let position = self
            .0
            .iter()
            .position(|set| set.len() == group.len() && set.iter().all(|m| group.contains(m)))
            .ok_or_else(|| {
                Error::NotAGroup(
                    members
                        .iter()
                        .map(|m| match graph.node_weight(*m) {
                            Some(vertex) => vertex.label().to_string(),
                            None => format!("#{}", m.index()),
                        })
                        .collect(),
                )
            })?;
        let set = self.0.remove(position);
        self.0.extend(set.iter().copied().map(InfoSet::from));
        self.sort(graph);
        log::debug!("split {} nodes, {} sets remain", group.len(), self.0.len());
        Ok(())
    }

    /// whether this is the all-singleton partition
    pub fn perfect(&self, graph: &Arena, nodes: &[NodeIndex]) -> bool {
        self == &Self::singletons(graph, nodes)
    }

    fn sort(&mut self, graph: &Arena) {
        self.0.sort_by(|a, b| {
            graph[a.head()]
                .label()
                .cmp(graph[b.head()].label())
                .then(a.head().cmp(&b.head()))
        });
    }
}
