use super::*;
use crate::*;
use std::collections::BTreeSet;
use std::collections::HashSet;

/// One-time finalization of names after validation.
///
/// An unnamed root becomes [`ROOT_NAME`], other unnamed nodes are
/// numbered in traversal order and unnamed leaves in encounter order.
/// Numbers already taken by a caller-chosen name are skipped.
/// Names that were given explicitly are never touched.
pub struct Namer<'a> {
    graph: &'a mut Arena,
    skeleton: &'a Skeleton,
}

impl<'a> Namer<'a> {
    pub fn new(graph: &'a mut Arena, skeleton: &'a Skeleton) -> Self {
        Self { graph, skeleton }
    }

    /// name everything and return the sorted, distinct players:
    /// everyone who owns a node or is paid at a leaf
    pub fn name(self) -> Vec<Player> {
        let ref nodes = self.skeleton.order;
        let ref leaves = self.skeleton.leaves;
        if let Some(&root) = nodes.first() {
            if self.graph[root].name().is_none() {
                self.graph[root].rename(ROOT_NAME);
            }
        }
        Self::number(self.graph, nodes, NODE_PREFIX);
        Self::number(self.graph, leaves, LEAF_PREFIX);
        let owners = nodes
            .iter()
            .filter_map(|&i| self.graph[i].node())
            .filter_map(Node::player);
        let payees = leaves
            .iter()
            .filter_map(|&i| self.graph[i].leaf())
            .flat_map(|leaf| leaf.payoffs().keys());
        owners
            .chain(payees)
            .cloned()
            .collect::<BTreeSet<Player>>()
            .into_iter()
            .collect()
    }

    fn number(graph: &mut Arena, order: &[petgraph::graph::NodeIndex], prefix: &str) {
        let mut taken = order
            .iter()
            .filter_map(|&i| graph[i].name())
            .map(String::from)
            .collect::<HashSet<String>>();
        let mut counter = 1..;
        for &index in order.iter().filter(|&&i| graph[i].name().is_none()).collect::<Vec<_>>() {
            let name = counter
                .by_ref()
                .map(|n| format!("{} {}", prefix, n))
                .find(|name| !taken.contains(name))
                .unwrap_or_else(|| unreachable!("unbounded counter"));
            log::debug!("naming #{} {}", index.index(), name);
            taken.insert(name.clone());
            graph[index].rename(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::graph::NodeIndex;

    fn named(draft: Draft, root: NodeIndex) -> (Arena, Vec<Player>) {
        let mut graph = draft.into_graph();
        let skeleton = TreeBuilder::new(&mut graph, root).grow().unwrap();
        let players = Namer::new(&mut graph, &skeleton).name();
        (graph, players)
    }

    #[test]
    fn defaults_follow_traversal() {
        let mut draft = Draft::default();
        let l1 = draft.leaf([("B", 0.), ("A", 0.)]);
        let l2 = draft.leaf([("B", 1.), ("A", 1.)]);
        let l3 = draft.leaf([("B", 2.), ("A", 2.)]);
        let l4 = draft.leaf([("B", 3.), ("A", 3.)]);
        let n1 = draft.branch(Player::from("B"), [("X", l1), ("Y", l2)]).unwrap();
        let n2 = draft.branch(Player::from("B"), [("X", l3), ("Y", l4)]).unwrap();
        let root = draft.branch(Player::from("A"), [("C", n1), ("D", n2)]).unwrap();
        let (graph, players) = named(draft, root);
        assert_eq!(players, vec![Player::from("A"), Player::from("B")]);
        assert_eq!(graph[root].label(), ROOT_NAME);
        assert_eq!(graph[n1].label(), "Node 1");
        assert_eq!(graph[n2].label(), "Node 2");
        assert_eq!(graph[l1].label(), "Leaf 1");
        assert_eq!(graph[l4].label(), "Leaf 4");
    }
    #[test]
    fn explicit_names_are_kept_and_skipped() {
        let mut draft = Draft::default();
        let l1 = draft.insert(Leaf::new([("A", 0.)]).named("Leaf 1"));
        let l2 = draft.leaf([("A", 1.)]);
        let n1 = draft.insert(Node::new(Player::from("A")).named("Node 1"));
        draft.assign(n1, "X", l1).unwrap();
        let n2 = draft.branch(Player::from("A"), [("X", l2)]).unwrap();
        let root = draft.branch(Player::from("A"), [("C", n1), ("D", n2)]).unwrap();
        draft.rename(root, "Start").unwrap();
        let (graph, _) = named(draft, root);
        assert_eq!(graph[root].label(), "Start");
        assert_eq!(graph[n1].label(), "Node 1");
        assert_eq!(graph[n2].label(), "Node 2");
        assert_eq!(graph[l1].label(), "Leaf 1");
        assert_eq!(graph[l2].label(), "Leaf 2");
    }
    #[test]
    fn payees_are_players() {
        let mut draft = Draft::default();
        let l = draft.leaf([("A", 3.), ("B", 2.)]);
        let r = draft.leaf([("A", 1.), ("B", 4.)]);
        let root = draft.branch(Player::from("A"), [("L", l), ("R", r)]).unwrap();
        let (_, players) = named(draft, root);
        assert_eq!(players, vec![Player::from("A"), Player::from("B")]);
    }
}
