use super::*;
use crate::*;
use petgraph::graph::NodeIndex;
use std::collections::HashSet;

/// Import rebuilds the tree bottom-up.
///
/// Nodes are layered by depth from the external root and converted
/// deepest layer first, so every child already exists when its parent
/// is built. Blank node labels stay unnamed and are numbered during
/// construction; blank action labels become `Action k`. External moves
/// shared by several nodes are replayed as information sets once the
/// tree stands.
impl TryFrom<&Efg> for Tree {
    type Error = Error;
    fn try_from(efg: &Efg) -> Result<Self> {
        audit(efg)?;
        let layers = layers(efg)?;
        let mut draft = Draft::default();
        let mut index = vec![None::<NodeIndex>; efg.nodes.len()];
        for layer in layers.iter().rev() {
            for &i in layer {
                index[i] = Some(convert(efg, &mut draft, &index, i)?);
            }
        }
        let Some(root) = index[efg.root()] else {
            unreachable!("the root is the first layer")
        };
        let mut tree = Tree::grow(draft, root)?;
        for infoset in 0..efg.infosets.len() {
            let members = efg
                .members(infoset)
                .into_iter()
                .filter_map(|n| index[n])
                .collect::<Vec<NodeIndex>>();
            if members.len() > 1 {
                tree.set_info_set(&members)?;
            }
        }
        log::debug!(
            "imported {} nodes and {} leaves from external tree",
            tree.nodes().len(),
            tree.leaves().len()
        );
        Ok(tree)
    }
}

/// indices in range, counts agree, terminals carry outcomes
fn audit(efg: &Efg) -> Result<()> {
    if efg.nodes.is_empty() {
        return Err(Error::Malformed("no root node".into()));
    }
    let mut names = HashSet::new();
    if let Some(dup) = efg.players.iter().find(|p| !names.insert(*p)) {
        return Err(Error::Malformed(format!("player {} is listed twice", dup)));
    }
    for (i, infoset) in efg.infosets.iter().enumerate() {
        if infoset.player >= efg.players.len() {
            return Err(Error::Malformed(format!(
                "infoset {} belongs to unknown player {}",
                i, infoset.player
            )));
        }
    }
    for (i, outcome) in efg.outcomes.iter().enumerate() {
        if outcome.payoffs.len() != efg.players.len() {
            return Err(Error::Malformed(format!(
                "outcome {} has {} payoffs for {} players",
                i,
                outcome.payoffs.len(),
                efg.players.len()
            )));
        }
    }
    for (i, node) in efg.nodes.iter().enumerate() {
        if let Some(c) = node.children.iter().find(|c| **c >= efg.nodes.len()) {
            return Err(Error::Malformed(format!("node {} has unknown child {}", i, c)));
        }
        if let Some(o) = node.outcome.filter(|o| *o >= efg.outcomes.len()) {
            return Err(Error::Malformed(format!("node {} has unknown outcome {}", i, o)));
        }
        match (node.children.is_empty(), node.infoset, node.outcome) {
            (true, Some(_), _) => {
                return Err(Error::Malformed(format!("node {} has a move but no children", i)));
            }
            (true, None, None) => return Err(Error::MissingOutcome { node: i }),
            (true, None, Some(_)) => {}
            (false, _, Some(_)) => {
                return Err(Error::Malformed(format!("non-terminal node {} has an outcome", i)));
            }
            (false, None, None) => {
                return Err(Error::Malformed(format!("non-terminal node {} has no move", i)));
            }
            (false, Some(k), None) => match efg.infosets.get(k) {
                None => {
                    return Err(Error::Malformed(format!("node {} has unknown infoset {}", i, k)));
                }
                Some(infoset) if infoset.actions.len() != node.children.len() => {
                    return Err(Error::Malformed(format!(
                        "node {} has {} children for {} actions",
                        i,
                        node.children.len(),
                        infoset.actions.len()
                    )));
                }
                Some(_) => {}
            },
        }
    }
    Ok(())
}

/// breadth-first generations from the root. a node reached twice
/// means the external graph is not a tree.
fn layers(efg: &Efg) -> Result<Vec<Vec<usize>>> {
    let mut seen = vec![false; efg.nodes.len()];
    seen[efg.root()] = true;
    let mut layers = Vec::new();
    let mut current = vec![efg.root()];
    while !current.is_empty() {
        let mut next = Vec::new();
        for &parent in current.iter() {
            for &child in efg.nodes[parent].children.iter() {
                if std::mem::replace(&mut seen[child], true) {
                    return Err(Error::NotATree(format!(
                        "external node {} is reachable more than once",
                        child
                    )));
                }
                next.push(child);
            }
        }
        layers.push(std::mem::replace(&mut current, next));
    }
    Ok(layers)
}

/// blank action labels numbered among blanks only, from 1
fn actions(infoset: &EfgInfoset) -> Vec<Action> {
    let mut blanks = 0;
    infoset
        .actions
        .iter()
        .map(|label| match label.is_empty() {
            true => {
                blanks += 1;
                Action::from(format!("{} {}", ACTION_PREFIX, blanks))
            }
            false => Action::from(label.as_str()),
        })
        .collect()
}

fn convert(efg: &Efg, draft: &mut Draft, index: &[Option<NodeIndex>], i: usize) -> Result<NodeIndex> {
    let ref node = efg.nodes[i];
    let named = |label: &String| (!label.is_empty()).then(|| label.clone());
    match (node.outcome, node.infoset) {
        (Some(o), _) => {
            let payoffs = efg
                .players
                .iter()
                .map(String::as_str)
                .zip(efg.outcomes[o].payoffs.iter().copied());
            let leaf = Leaf::new(payoffs);
            Ok(draft.insert(match named(&node.label) {
                Some(name) => leaf.named(name),
                None => leaf,
            }))
        }
        (None, Some(k)) => {
            let ref infoset = efg.infosets[k];
            let labels = actions(infoset);
            let mut seen = HashSet::new();
            if let Some(dup) = labels.iter().find(|a| !seen.insert(*a)) {
                return Err(Error::AmbiguousAction {
                    node: named(&node.label).unwrap_or_else(|| format!("#{}", i)),
                    action: dup.to_string(),
                });
            }
            let owner = Node::new(Player::from(efg.players[infoset.player].as_str()));
            let parent = draft.insert(match named(&node.label) {
                Some(name) => owner.named(name),
                None => owner,
            });
            for (action, &child) in labels.into_iter().zip(node.children.iter()) {
                let Some(child) = index[child] else {
                    unreachable!("children are converted before parents")
                };
                draft.assign(parent, action, child)?;
            }
            Ok(parent)
        }
        (None, None) => unreachable!("audited before conversion"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::collections::BTreeSet;

    /// everything that must survive a round trip, keyed by names
    #[derive(Debug, PartialEq)]
    struct Shape {
        players: Vec<Player>,
        nodes: BTreeMap<String, (Player, BTreeSet<String>)>,
        leaves: BTreeMap<String, Vec<Utility>>,
        edges: BTreeSet<(String, String, String)>,
        sets: BTreeSet<Vec<String>>,
    }

    impl From<&Tree> for Shape {
        fn from(tree: &Tree) -> Self {
            Self {
                players: tree.players().to_vec(),
                nodes: tree
                    .nodes()
                    .iter()
                    .map(|n| {
                        let node = tree.node(*n).unwrap();
                        (
                            tree.name(*n).to_string(),
                            (
                                node.player().unwrap().clone(),
                                node.actions().iter().map(|a| a.to_string()).collect(),
                            ),
                        )
                    })
                    .collect(),
                leaves: tree
                    .leaves()
                    .iter()
                    .map(|l| (tree.name(*l).to_string(), tree.leaf(*l).unwrap().utilities()))
                    .collect(),
                edges: tree
                    .nodes()
                    .iter()
                    .flat_map(|n| {
                        tree.branches(*n).into_iter().map(|(a, c)| {
                            (tree.name(*n).to_string(), a.to_string(), tree.name(c).to_string())
                        })
                    })
                    .collect(),
                sets: tree
                    .info_sets()
                    .iter()
                    .map(|s| s.iter().map(|m| tree.name(*m).to_string()).collect())
                    .collect(),
            }
        }
    }

    /// root (1: blank, blank) → decision nodes of player 2 sharing one move
    fn shared_move() -> Efg {
        let mut efg = Efg::new("shared");
        let p1 = efg.add_player("1");
        let p2 = efg.add_player("2");
        efg.append_move(0, p1, ["", ""]).unwrap();
        let m = efg.append_move(1, p2, ["up", ""]).unwrap();
        efg.append_infoset(2, m).unwrap();
        for (i, node) in [3, 4, 5, 6].into_iter().enumerate() {
            let o = efg.add_outcome("", vec![i as Utility, -(i as Utility)]);
            efg.set_outcome(node, o).unwrap();
        }
        efg.set_label(5, "named").unwrap();
        efg
    }

    #[test]
    fn blank_labels_get_defaults() {
        let tree = Tree::try_from(&shared_move()).unwrap();
        let root = tree.tree_root();
        assert_eq!(tree.name(root), ROOT_NAME);
        let actions = tree.node(root).unwrap().actions().to_vec();
        assert_eq!(actions, vec![Action::from("Action 1"), Action::from("Action 2")]);
        let child = tree.follow(root, &Action::from("Action 1")).unwrap();
        let labels = tree.node(child).unwrap().actions().to_vec();
        assert_eq!(labels, vec![Action::from("up"), Action::from("Action 1")]);
        assert!(tree.find("named").is_some());
        assert!(tree.find(&format!("{} 1", NODE_PREFIX)).is_some());
        assert_eq!(tree.leaves().len(), 4);
    }
    #[test]
    fn shared_moves_become_info_sets() {
        let tree = Tree::try_from(&shared_move()).unwrap();
        assert_eq!(tree.info_sets().len(), 2);
        assert!(!tree.perfect_info());
        assert!(tree.info_sets().iter().any(|s| s.len() == 2));
    }
    #[test]
    fn terminal_needs_outcome() {
        let mut efg = shared_move();
        efg.nodes[4].outcome = None;
        assert!(matches!(Tree::try_from(&efg), Err(Error::MissingOutcome { node: 4 })));
    }
    #[test]
    fn outcome_on_decision_node() {
        let mut efg = shared_move();
        efg.nodes[1].outcome = Some(0);
        assert!(matches!(Tree::try_from(&efg), Err(Error::Malformed(_))));
    }
    #[test]
    fn children_match_actions() {
        let mut efg = shared_move();
        efg.nodes[1].children.pop();
        assert!(matches!(Tree::try_from(&efg), Err(Error::Malformed(_))));
    }
    #[test]
    fn payoffs_match_players() {
        let mut efg = shared_move();
        efg.outcomes[2].payoffs.push(0.);
        assert!(matches!(Tree::try_from(&efg), Err(Error::Malformed(_))));
    }
    #[test]
    fn shared_children_are_rejected() {
        let mut efg = shared_move();
        efg.nodes[2].children = efg.nodes[1].children.clone();
        assert!(matches!(Tree::try_from(&efg), Err(Error::NotATree(_))));
    }
    #[test]
    fn repeated_action_labels() {
        let mut efg = shared_move();
        efg.infosets[1].actions = vec!["up".into(), "up".into()];
        assert!(matches!(
            Tree::try_from(&efg),
            Err(Error::AmbiguousAction { .. })
        ));
    }
    #[test]
    fn players_who_never_move_are_kept() {
        let mut efg = Efg::new("");
        let p1 = efg.add_player("1");
        efg.add_player("2");
        efg.append_move(0, p1, ["L", "R"]).unwrap();
        for (node, u) in [(1, 3.), (2, 1.)] {
            let o = efg.add_outcome("", vec![u, -u]);
            efg.set_outcome(node, o).unwrap();
        }
        let tree = Tree::try_from(&efg).unwrap();
        assert_eq!(tree.players(), &[Player::from("1"), Player::from("2")]);
        assert_eq!(tree.nodes().len(), 1);
        assert!(tree.perfect_info());
    }
    #[test]
    fn export_import_preserves_shape() {
        let mut draft = Draft::default();
        let leaves = (0..4)
            .map(|i| draft.leaf([("A", i as Utility), ("B", 2. * i as Utility)]))
            .collect::<Vec<_>>();
        let n1 = draft.branch(Player::from("B"), [("X", leaves[0]), ("Y", leaves[1])]).unwrap();
        let n2 = draft.branch(Player::from("B"), [("Y", leaves[3]), ("X", leaves[2])]).unwrap();
        let root = draft.branch(Player::from("A"), [("C", n1), ("D", n2)]).unwrap();
        let mut tree = Tree::grow(draft, root).unwrap();
        tree.set_info_set(&[n1, n2]).unwrap();
        let back = Tree::try_from(&Efg::from(&tree)).unwrap();
        let (before, after) = (Shape::from(&tree), Shape::from(&back));
        assert_eq!(before.players, after.players);
        assert_eq!(before.leaves, after.leaves);
        assert_eq!(before.edges, after.edges);
        assert_eq!(before.sets, after.sets);
    }
    #[test]
    fn random_round_trips() {
        for seed in 0..32 {
            let tree = Tree::seeded(seed);
            let back = Tree::try_from(&Efg::from(&tree)).unwrap();
            assert_eq!(Shape::from(&tree), Shape::from(&back));
        }
    }
    #[test]
    fn json_round_trips() {
        let tree = Tree::seeded(7);
        let json = Efg::from(&tree).to_json().unwrap();
        let efg = Efg::from_json(&json).unwrap();
        let back = Tree::try_from(&efg).unwrap();
        assert_eq!(Shape::from(&tree), Shape::from(&back));
    }
}
