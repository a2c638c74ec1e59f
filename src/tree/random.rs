use super::*;
use crate::*;
use petgraph::graph::NodeIndex;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Deepest level at which a random tree still branches.
const RANDOM_DEPTH: usize = 4;
/// Widest fan-out of a random decision node.
const RANDOM_WIDTH: usize = 3;
/// Chance that a random child is a decision node rather than a leaf.
const RANDOM_GROWTH: f64 = 0.6;
/// Chance that a random node joins an existing compatible information set.
const RANDOM_MERGE: f64 = 0.4;

impl Arbitrary for Tree {
    fn random() -> Self {
        Self::seeded(rand::random())
    }
}

impl Tree {
    /// A reproducible random two-player game with integer payoffs
    /// and a random, valid grouping into information sets.
    pub fn seeded(seed: u64) -> Self {
        let ref mut rng = SmallRng::seed_from_u64(seed);
        let players = [Player::from("P1"), Player::from("P2")];
        let mut draft = Draft::default();
        let root = draft.insert(Node::new(players[0].clone()));
        let mut queue = vec![(root, 0)];
        while let Some((parent, depth)) = queue.pop() {
            let width = rng.random_range(2..=RANDOM_WIDTH);
            for a in 0..width {
                let child = match depth + 1 < RANDOM_DEPTH && rng.random_bool(RANDOM_GROWTH) {
                    true => {
                        let player = players[rng.random_range(0..players.len())].clone();
                        let child = draft.insert(Node::new(player));
                        queue.push((child, depth + 1));
                        child
                    }
                    false => draft.leaf(
                        players
                            .iter()
                            .map(|p| (p.clone(), rng.random_range(-5..=5) as Utility)),
                    ),
                };
                draft
                    .assign(parent, format!("a{}", a), child)
                    .unwrap_or_else(|e| unreachable!("random drafts only assign to nodes: {}", e));
            }
        }
        let mut tree =
            Self::grow(draft, root).unwrap_or_else(|e| unreachable!("random drafts form trees: {}", e));
        let mut groups: Vec<Vec<NodeIndex>> = Vec::new();
        for &node in tree.nodes() {
            let compatible = groups.iter().position(|g| {
                let (a, b) = (tree.node(g[0]), tree.node(node));
                a.map(Node::player) == b.map(Node::player) && a.map(Node::support) == b.map(Node::support)
            });
            match compatible {
                Some(i) if rng.random_bool(RANDOM_MERGE) => groups[i].push(node),
                _ => groups.push(vec![node]),
            }
        }
        for group in groups.into_iter().filter(|g| g.len() > 1) {
            tree.set_info_set(&group)
                .unwrap_or_else(|e| unreachable!("groups share player and actions: {}", e));
        }
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_trees_are_reproducible_two_player_games() {
        for seed in 0..64 {
            let tree = Tree::seeded(seed);
            assert_eq!(tree.players(), &[Player::from("P1"), Player::from("P2")]);
            assert_eq!(tree.nodes(), Tree::seeded(seed).nodes());
            assert_eq!(tree.info_sets(), Tree::seeded(seed).info_sets());
        }
    }
}
