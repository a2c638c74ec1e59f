use super::*;
use crate::*;
use petgraph::graph::NodeIndex;
use std::collections::HashMap;

/// Export walks the information-set graph layer by layer.
///
/// The first member of a set to be placed defines its move; every later
/// member attaches to that same move. A member whose parent move is not
/// in place yet waits in `pending` until it is, which covers sets whose
/// members sit at different depths.
impl From<&Tree> for Efg {
    fn from(tree: &Tree) -> Self {
        let mut export = Export::new(tree);
        let ref graph = tree.info_graph();
        let ref start = tree
            .info_set(tree.tree_root())
            .cloned()
            .unwrap_or_else(|| InfoSet::from(tree.tree_root()));
        let mut pending = Vec::<(InfoSet, NodeIndex)>::new();
        for layer in graph.layers(start) {
            for set in layer {
                pending.extend(set.iter().map(|m| (set.clone(), *m)));
            }
            loop {
                let before = pending.len();
                pending.retain(|(set, member)| !export.place(set, *member));
                if pending.is_empty() || pending.len() == before {
                    break;
                }
            }
        }
        if !pending.is_empty() {
            unreachable!("every decision node descends from the root");
        }
        export.finish()
    }
}

struct Export<'t> {
    tree: &'t Tree,
    efg: Efg,
    players: HashMap<&'t Player, usize>,
    placed: HashMap<NodeIndex, usize>,
    moves: HashMap<InfoSet, usize>,
}

impl<'t> Export<'t> {
    fn new(tree: &'t Tree) -> Self {
        let mut efg = Efg::new(tree.name(tree.tree_root()));
        let players = tree
            .players()
            .iter()
            .map(|p| (p, efg.add_player(p.name())))
            .collect();
        let placed = HashMap::from([(tree.tree_root(), efg.root())]);
        Self {
            tree,
            efg,
            players,
            placed,
            moves: HashMap::new(),
        }
    }

    /// open or attach the move of `member`, then place its children.
    /// false while the member's own slot is still unknown.
    fn place(&mut self, set: &InfoSet, member: NodeIndex) -> bool {
        let Some(at) = self.placed.get(&member).copied() else {
            return false;
        };
        let tree = self.tree;
        let node = tree.node(member).expect("info sets hold decision nodes");
        let infoset = match self.moves.get(set).copied() {
            Some(infoset) => {
                self.efg
                    .append_infoset(at, infoset)
                    .expect("members are placed once");
                infoset
            }
            None => {
                let player = node
                    .player()
                    .and_then(|p| self.players.get(p))
                    .copied()
                    .unwrap_or_default();
                let infoset = self
                    .efg
                    .append_move(at, player, node.actions().iter().map(Action::label))
                    .expect("members are placed once");
                self.efg
                    .set_infoset_label(infoset, set.describe(tree.graph()))
                    .expect("infoset was just created");
                self.moves.insert(set.clone(), infoset);
                infoset
            }
        };
        self.efg
            .set_label(at, tree.name(member))
            .expect("member was placed");
        let slots = self.efg.nodes[at].children.clone();
        for (label, slot) in self.efg.infosets[infoset].actions.iter().zip(slots) {
            if let Some(child) = tree.follow(member, &Action::from(label.as_str())) {
                self.placed.insert(child, slot);
            }
        }
        true
    }

    /// one outcome per leaf, named after it
    fn finish(mut self) -> Efg {
        let tree = self.tree;
        for &leaf in tree.leaves() {
            let at = self.placed[&leaf];
            let name = tree.name(leaf);
            let payoffs = tree
                .leaf(leaf)
                .map(|l| {
                    tree.players()
                        .iter()
                        .map(|p| l.payoff(p).unwrap_or_default())
                        .collect()
                })
                .unwrap_or_default();
            let outcome = self.efg.add_outcome(name, payoffs);
            self.efg.set_outcome(at, outcome).expect("outcome was just added");
            self.efg.set_label(at, name).expect("leaf was placed");
        }
        log::debug!(
            "exported {} nodes across {} infosets",
            self.efg.nodes.len(),
            self.efg.infosets.len()
        );
        self.efg
    }
}
