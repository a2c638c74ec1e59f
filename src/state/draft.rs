use super::*;
use crate::Error;
use crate::Result;
use crate::Utility;
use petgraph::Direction::Outgoing;
use petgraph::graph::DiGraph;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

/// Vertices are entities, edges are labelled with the action that leads to them.
pub type Arena = DiGraph<Vertex, Action>;

/// The child hanging under `action` of `parent`, if any.
pub fn follow(graph: &Arena, parent: NodeIndex, action: &Action) -> Option<NodeIndex> {
    graph
        .edges_directed(parent, Outgoing)
        .find(|e| e.weight() == action)
        .map(|e| e.target())
}

/// An arena of nodes and leaves wired together by the caller.
///
/// Nothing here is validated beyond index bounds: a Draft may describe
/// a forest, a DAG or a cycle. [`crate::Tree`] decides whether the
/// vertices reachable from a chosen root really form a tree.
/// Indices handed out here stay valid in the finished tree.
#[derive(Debug, Default, Clone)]
pub struct Draft(Arena);

impl Draft {
    pub fn insert(&mut self, vertex: impl Into<Vertex>) -> NodeIndex {
        self.0.add_node(vertex.into())
    }
    /// shorthand for an unnamed leaf
    pub fn leaf<P>(&mut self, payoffs: impl IntoIterator<Item = (P, Utility)>) -> NodeIndex
    where
        P: Into<Player>,
    {
        self.insert(Leaf::new(payoffs))
    }
    /// build a node from ordered (action, child) pairs, like a dictionary literal
    pub fn branch<A>(
        &mut self,
        player: Player,
        children: impl IntoIterator<Item = (A, NodeIndex)>,
    ) -> Result<NodeIndex>
    where
        A: Into<Action>,
    {
        let parent = self.insert(Node::new(player));
        for (action, child) in children {
            self.assign(parent, action, child)?;
        }
        Ok(parent)
    }
    /// hang `child` under `action` of `parent`.
    /// an existing child under the same action is replaced, and the
    /// child's parent becomes `parent` whatever it was before.
    pub fn assign(&mut self, parent: NodeIndex, action: impl Into<Action>, child: NodeIndex) -> Result<()> {
        let action = action.into();
        self.0
            .node_weight(child)
            .ok_or(Error::UnknownNode(child.index()))?;
        match self.0.node_weight_mut(parent) {
            None => return Err(Error::UnknownNode(parent.index())),
            Some(Vertex::Leaf(leaf)) => {
                return Err(Error::Childless {
                    leaf: leaf.name().unwrap_or("unnamed").to_string(),
                });
            }
            Some(Vertex::Node(node)) => node.offer(action.clone()),
        }
        if let Some(stale) = self
            .0
            .edges_directed(parent, Outgoing)
            .find(|e| e.weight() == &action)
            .map(|e| e.id())
        {
            self.0.remove_edge(stale);
        }
        self.0.add_edge(parent, child, action);
        if let Some(vertex) = self.0.node_weight_mut(child) {
            vertex.adopt(parent);
        }
        Ok(())
    }
    pub fn rename(&mut self, index: NodeIndex, name: impl Into<String>) -> Result<()> {
        self.0
            .node_weight_mut(index)
            .map(|v| v.rename(name))
            .ok_or(Error::UnknownNode(index.index()))
    }
    pub fn vertex(&self, index: NodeIndex) -> Option<&Vertex> {
        self.0.node_weight(index)
    }
    /// the child currently hanging under `action`
    pub fn child(&self, parent: NodeIndex, action: &Action) -> Option<NodeIndex> {
        follow(&self.0, parent, action)
    }
    /// children in action order, with gaps where an action has none yet
    pub fn slots(&self, parent: NodeIndex) -> Vec<(Action, Option<NodeIndex>)> {
        self.0
            .node_weight(parent)
            .and_then(Vertex::node)
            .map(|node| {
                node.actions()
                    .iter()
                    .map(|a| (a.clone(), self.child(parent, a)))
                    .collect()
            })
            .unwrap_or_default()
    }
    pub fn len(&self) -> usize {
        self.0.node_count()
    }
    pub fn is_empty(&self) -> bool {
        self.0.node_count() == 0
    }
    pub fn graph(&self) -> &Arena {
        &self.0
    }

    pub(crate) fn into_graph(self) -> Arena {
        self.0
    }
}
