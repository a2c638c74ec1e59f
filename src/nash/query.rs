use crate::*;

/// All equilibria `engine` reports for `tree`.
///
/// Only two-player games are supported; anything else fails before the
/// engine is consulted.
pub fn solve(tree: &Tree, engine: &impl Engine) -> Result<Vec<Equilibrium>> {
    let players = tree.players().len();
    if players != SOLVER_PLAYERS {
        return Err(Error::NotImplemented { players });
    }
    let ref game = Efg::from(tree);
    log::info!(
        "solving {} nodes across {} information sets",
        tree.nodes().len(),
        tree.info_sets().len()
    );
    let equilibria = engine
        .solve(game)?
        .iter()
        .map(|profile| interpret(game, profile))
        .collect::<Result<Vec<Equilibrium>>>()?;
    log::info!("found {} equilibria", equilibria.len());
    Ok(equilibria)
}

impl Tree {
    /// equilibria from Gambit, configured from the environment
    pub fn obtain_nash(&self) -> Result<Vec<Equilibrium>> {
        self.obtain_nash_with(&Gambit::from_env())
    }
    pub fn obtain_nash_with(&self, engine: &impl Engine) -> Result<Vec<Equilibrium>> {
        solve(self, engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// hands back canned profiles and counts calls
    struct Canned {
        profiles: Vec<Vec<Probability>>,
        calls: Cell<usize>,
    }

    impl Canned {
        fn new(profiles: Vec<Vec<Probability>>) -> Self {
            Self {
                profiles,
                calls: Cell::new(0),
            }
        }
    }

    impl Engine for Canned {
        fn solve(&self, _: &Efg) -> Result<Vec<Vec<Probability>>> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.profiles.clone())
        }
    }

    /// matching pennies, second mover blind to the first
    fn pennies() -> Tree {
        let mut draft = Draft::default();
        let win = |draft: &mut Draft, a: Utility| draft.leaf([("1", a), ("2", -a)]);
        let (hh, ht, th, tt) = (
            win(&mut draft, 1.),
            win(&mut draft, -1.),
            win(&mut draft, -1.),
            win(&mut draft, 1.),
        );
        let h = draft.branch(Player::from("2"), [("H", hh), ("T", ht)]).unwrap();
        let t = draft.branch(Player::from("2"), [("H", th), ("T", tt)]).unwrap();
        let root = draft.branch(Player::from("1"), [("H", h), ("T", t)]).unwrap();
        let mut tree = Tree::grow(draft, root).unwrap();
        tree.set_info_set(&[h, t]).unwrap();
        tree
    }

    #[test]
    fn keys_by_node_names() {
        let engine = Canned::new(vec![vec![0.5, 0.5, 0.5, 0.5]]);
        let equilibria = pennies().obtain_nash_with(&engine).unwrap();
        assert_eq!(equilibria.len(), 1);
        let ref eq = equilibria[0];
        assert_eq!(eq[&Player::from("1")][ROOT_NAME][&Action::from("H")], 0.5);
        assert_eq!(eq[&Player::from("2")].len(), 2);
        assert!(eq[&Player::from("2")].contains_key("Node 1"));
        assert!(eq[&Player::from("2")].contains_key("Node 2"));
    }
    #[test]
    fn three_players_fail_fast() {
        let mut draft = Draft::default();
        let l = draft.leaf([("A", 0.), ("B", 0.), ("C", 0.)]);
        let r = draft.leaf([("A", 1.), ("B", 1.), ("C", 1.)]);
        let c = draft.branch(Player::from("C"), [("x", l)]).unwrap();
        let b = draft.branch(Player::from("B"), [("y", c)]).unwrap();
        let root = draft.branch(Player::from("A"), [("L", b), ("R", r)]).unwrap();
        let tree = Tree::grow(draft, root).unwrap();
        let engine = Canned::new(vec![]);
        assert!(matches!(
            solve(&tree, &engine),
            Err(Error::NotImplemented { players: 3 })
        ));
        assert_eq!(engine.calls.get(), 0);
    }
    #[test]
    fn one_player_fails_fast() {
        let mut draft = Draft::default();
        let l = draft.leaf([("A", 0.)]);
        let root = draft.branch(Player::from("A"), [("L", l)]).unwrap();
        let tree = Tree::grow(draft, root).unwrap();
        let engine = Canned::new(vec![]);
        assert!(matches!(
            tree.obtain_nash_with(&engine),
            Err(Error::NotImplemented { players: 1 })
        ));
        assert_eq!(engine.calls.get(), 0);
    }
    #[test]
    fn bad_profiles_surface() {
        let engine = Canned::new(vec![vec![1., 0.]]);
        assert!(matches!(
            pennies().obtain_nash_with(&engine),
            Err(Error::Engine(_))
        ));
    }
    #[test]
    fn no_equilibria_is_empty() {
        let engine = Canned::new(vec![]);
        assert!(pennies().obtain_nash_with(&engine).unwrap().is_empty());
        assert_eq!(engine.calls.get(), 1);
    }
}
