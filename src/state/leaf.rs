use super::*;
use crate::Utility;
use petgraph::graph::NodeIndex;
use std::collections::BTreeMap;

/// A terminal payoff vector, keyed by player.
#[derive(Debug, Clone, Default)]
pub struct Leaf {
    name: Option<String>,
    payoffs: BTreeMap<Player, Utility>,
    parent: Option<NodeIndex>,
}

impl Leaf {
    pub fn new<P>(payoffs: impl IntoIterator<Item = (P, Utility)>) -> Self
    where
        P: Into<Player>,
    {
        Self {
            payoffs: payoffs.into_iter().map(|(p, u)| (p.into(), u)).collect(),
            ..Self::default()
        }
    }
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }
    pub fn payoffs(&self) -> &BTreeMap<Player, Utility> {
        &self.payoffs
    }
    pub fn payoff(&self, player: &Player) -> Option<Utility> {
        self.payoffs.get(player).copied()
    }
    /// payoffs ordered by player name
    pub fn utilities(&self) -> Vec<Utility> {
        self.payoffs.values().copied().collect()
    }
    /// every player of the game is paid a finite amount
    pub fn audit(&self, players: &[Player]) -> Result<(), String> {
        if let Some((p, u)) = self.payoffs.iter().find(|(_, u)| !u.is_finite()) {
            return Err(format!("payoff {} to {} is not finite", u, p));
        }
        if let Some(p) = players.iter().find(|p| !self.payoffs.contains_key(*p)) {
            return Err(format!("no payoff for {}", p));
        }
        Ok(())
    }

    pub(crate) fn rename(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }
    pub(crate) fn adopt(&mut self, parent: NodeIndex) {
        self.parent = Some(parent);
    }
}

impl std::fmt::Display for Leaf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let utilities = self
            .utilities()
            .iter()
            .map(|u| u.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        match &self.name {
            Some(name) => write!(f, "{} ({})", name, utilities),
            None => write!(f, "({})", utilities),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utilities_follow_player_names() {
        let leaf = Leaf::new([("Zed", 1.), ("Amy", 2.), ("Max", 3.)]);
        assert_eq!(leaf.utilities(), vec![2., 3., 1.]);
        assert_eq!(leaf.payoff(&Player::from("Zed")), Some(1.));
    }
    #[test]
    fn audit_rejects_missing_and_nonfinite() {
        let ref players = [Player::from("A"), Player::from("B")];
        assert!(Leaf::new([("A", 1.), ("B", 2.)]).audit(players).is_ok());
        assert!(Leaf::new([("A", 1.)]).audit(players).is_err());
        assert!(Leaf::new([("B", 2.)]).audit(players).is_err());
        assert!(Leaf::new([("A", f64::NAN), ("B", 2.)]).audit(players).is_err());
        assert!(Leaf::new([("A", 1.), ("B", f64::INFINITY)]).audit(players).is_err());
    }
}
