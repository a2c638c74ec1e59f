use crate::*;
use petgraph::graph::NodeIndex;
use petgraph::graph::UnGraph;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::collections::HashSet;
use std::collections::VecDeque;

/// What validation learns about the vertices reachable from a root.
#[derive(Debug, Clone, Default)]
pub struct Skeleton {
    /// decision nodes in breadth-first order, root first
    pub order: Vec<NodeIndex>,
    /// leaves in the order they were reached
    pub leaves: Vec<NodeIndex>,
    /// decision node -> children in action order
    pub adjacency: BTreeMap<NodeIndex, Vec<NodeIndex>>,
}

/// Checks that a root induces a genuine tree.
///
/// Every child is *claimed* by the node that reaches it. A second claim
/// means the vertex hangs under two parents (or under one of its own
/// descendants), which fails on the spot. Claims also settle each
/// vertex's parent, whatever earlier assignments left there.
///
/// Once traversal finishes, the accumulated adjacency is checked once
/// more as an undirected graph: connected, |E| = |V| - 1, acyclic.
pub struct TreeBuilder<'a> {
    graph: &'a mut Arena,
    root: NodeIndex,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(graph: &'a mut Arena, root: NodeIndex) -> Self {
        Self { graph, root }
    }

    pub fn grow(self) -> Result<Skeleton> {
        match self.graph.node_weight(self.root) {
            None => return Err(Error::UnknownNode(self.root.index())),
            Some(Vertex::Leaf(_)) => return Err(Error::NotATree("root is a leaf".into())),
            Some(Vertex::Node(_)) => self.check(self.root, true)?,
        }
        let mut skeleton = Skeleton::default();
        let mut claimed = HashSet::from([self.root]);
        let mut queue = VecDeque::from([self.root]);
        while let Some(parent) = queue.pop_front() {
            let children = self.children(parent);
            for &child in children.iter() {
                if !claimed.insert(child) {
                    return Err(Error::NotATree(format!(
                        "{} is reachable from more than one parent",
                        self.describe(child)
                    )));
                }
                log::debug!("{} claims {}", self.describe(parent), self.describe(child));
                self.graph[child].adopt(parent);
                match &self.graph[child] {
                    Vertex::Leaf(_) => skeleton.leaves.push(child),
                    Vertex::Node(_) => {
                        self.check(child, false)?;
                        queue.push_back(child);
                    }
                }
            }
            skeleton.order.push(parent);
            skeleton.adjacency.insert(parent, children);
        }
        Self::verify(self.root, &skeleton.adjacency)?;
        log::debug!(
            "grew tree of {} nodes and {} leaves",
            skeleton.order.len(),
            skeleton.leaves.len()
        );
        Ok(skeleton)
    }

    /// children in action order. only called on checked nodes,
    /// so every action has exactly one child.
    fn children(&self, parent: NodeIndex) -> Vec<NodeIndex> {
        self.graph[parent]
            .node()
            .map(|node| {
                node.actions()
                    .iter()
                    .filter_map(|a| follow(self.graph, parent, a))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// completeness, player validity, action uniqueness
    fn check(&self, index: NodeIndex, root: bool) -> Result<()> {
        let Vertex::Node(node) = &self.graph[index] else {
            unreachable!("only decision nodes are checked")
        };
        let name = self.describe(index);
        let player = node.player().ok_or_else(|| Error::Incomplete {
            node: name.clone(),
            missing: "player",
        })?;
        if node.actions().is_empty() {
            return Err(Error::Incomplete {
                node: name,
                missing: "actions",
            });
        }
        if !root && node.parent().is_none() {
            return Err(Error::Incomplete {
                node: name,
                missing: "parent",
            });
        }
        if !player.is_valid() {
            return Err(Error::InvalidPlayer { node: name });
        }
        let mut seen = HashSet::new();
        if let Some(action) = node.actions().iter().find(|a| !seen.insert(*a)) {
            return Err(Error::AmbiguousAction {
                node: name,
                action: action.to_string(),
            });
        }
        if node
            .actions()
            .iter()
            .any(|a| follow(self.graph, index, a).is_none())
        {
            return Err(Error::Incomplete {
                node: name,
                missing: "children",
            });
        }
        Ok(())
    }

    /// connected, |E| = |V| - 1, and no cycles
    fn verify(root: NodeIndex, adjacency: &BTreeMap<NodeIndex, Vec<NodeIndex>>) -> Result<()> {
        let mut graph = UnGraph::<NodeIndex, ()>::default();
        let mut index = HashMap::new();
        index.insert(root, graph.add_node(root));
        for (parent, children) in adjacency {
            for &vertex in std::iter::once(parent).chain(children) {
                index.entry(vertex).or_insert_with(|| graph.add_node(vertex));
            }
            for child in children {
                graph.add_edge(index[parent], index[child], ());
            }
        }
        let connected = petgraph::algo::connected_components(&graph) == 1;
        let sized = graph.edge_count() + 1 == graph.node_count();
        let acyclic = !petgraph::algo::is_cyclic_undirected(&graph);
        if connected && sized && acyclic {
            Ok(())
        } else {
            Err(Error::NotATree(format!(
                "{} vertices and {} edges (connected: {}, acyclic: {})",
                graph.node_count(),
                graph.edge_count(),
                connected,
                acyclic
            )))
        }
    }

    fn describe(&self, index: NodeIndex) -> String {
        match self.graph[index].name() {
            Some(name) => name.to_string(),
            None => format!("#{}", index.index()),
        }
    }
}
