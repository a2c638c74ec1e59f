use crate::*;
use std::collections::BTreeMap;

/// Player → decision-node name → action → probability.
///
/// Every member of an information set carries the set's distribution.
/// Names are the only key, so a player's decision nodes that share a
/// name must play the same distribution, or interpretation fails.
pub type Equilibrium = BTreeMap<Player, BTreeMap<String, BTreeMap<Action, Probability>>>;

/// Map a flat behaviour profile back onto the names of `game`.
///
/// The profile is read player by player, each player's moves in
/// creation order, each move's actions in order. Its length must match
/// exactly and every move's probabilities must sum to one.
pub fn interpret(game: &Efg, profile: &[Probability]) -> Result<Equilibrium> {
    let expected = game.profile_len();
    if profile.len() != expected {
        log::warn!("rejecting profile of length {}", profile.len());
        return Err(anyhow::anyhow!(
            "profile has {} entries, expected {}",
            profile.len(),
            expected
        )
        .into());
    }
    let mut equilibrium = Equilibrium::new();
    let mut cursor = profile.iter().copied();
    for (p, name) in game.players.iter().enumerate() {
        let strategy = equilibrium.entry(Player::from(name.as_str())).or_default();
        for k in game.infosets_of(p) {
            let ref infoset = game.infosets[k];
            let distribution = infoset
                .actions
                .iter()
                .map(|a| Action::from(a.as_str()))
                .zip(cursor.by_ref())
                .collect::<BTreeMap<Action, Probability>>();
            let total = distribution.values().sum::<Probability>();
            if (total - 1.).abs() > SOLVER_TOLERANCE
                || distribution.values().any(|x| *x < -SOLVER_TOLERANCE)
            {
                log::warn!("rejecting profile that sums to {} at {}", total, infoset.label);
                return Err(anyhow::anyhow!(
                    "probabilities at {} sum to {}",
                    infoset.label,
                    total
                )
                .into());
            }
            for member in game.members(k) {
                let ref label = game.nodes[member].label;
                match strategy.insert(label.clone(), distribution.clone()) {
                    Some(previous) if previous != distribution => {
                        log::warn!("rejecting profile with clashing names at {}", label);
                        return Err(anyhow::anyhow!(
                            "decision nodes named {} play different distributions",
                            label
                        )
                        .into());
                    }
                    _ => {}
                }
            }
        }
    }
    Ok(equilibrium)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1 picks L or R at the root, 2 moves at both children without seeing it
    fn blind() -> Efg {
        let mut efg = Efg::new("blind");
        let p1 = efg.add_player("1");
        let p2 = efg.add_player("2");
        efg.append_move(0, p1, ["L", "R"]).unwrap();
        let m = efg.append_move(1, p2, ["l", "r"]).unwrap();
        efg.append_infoset(2, m).unwrap();
        efg.set_label(0, "root").unwrap();
        efg.set_label(1, "left").unwrap();
        efg.set_label(2, "right").unwrap();
        efg
    }

    #[test]
    fn members_share_a_distribution() {
        let eq = interpret(&blind(), &[1., 0., 0.25, 0.75]).unwrap();
        let p2 = &eq[&Player::from("2")];
        assert_eq!(p2.len(), 2);
        assert_eq!(p2["left"], p2["right"]);
        assert_eq!(p2["left"][&Action::from("r")], 0.75);
        assert_eq!(eq[&Player::from("1")]["root"][&Action::from("L")], 1.);
    }
    #[test]
    fn clashing_names_are_rejected() {
        let mut efg = Efg::new("clash");
        let p1 = efg.add_player("1");
        let p2 = efg.add_player("2");
        efg.append_move(0, p1, ["L", "R"]).unwrap();
        efg.append_move(1, p2, ["l", "r"]).unwrap();
        efg.append_move(2, p2, ["l", "r"]).unwrap();
        efg.set_label(1, "same").unwrap();
        efg.set_label(2, "same").unwrap();
        assert!(matches!(
            interpret(&efg, &[1., 0., 0.25, 0.75, 0.5, 0.5]),
            Err(Error::Engine(_))
        ));
        let eq = interpret(&efg, &[1., 0., 0.25, 0.75, 0.25, 0.75]).unwrap();
        assert_eq!(eq[&Player::from("2")].len(), 1);
    }
    #[test]
    fn length_must_match() {
        assert!(matches!(interpret(&blind(), &[1., 0., 1.]), Err(Error::Engine(_))));
    }
    #[test]
    fn moves_must_sum_to_one() {
        assert!(matches!(
            interpret(&blind(), &[0.5, 0.4, 0., 1.]),
            Err(Error::Engine(_))
        ));
        assert!(interpret(&blind(), &[0.5 + 1e-9, 0.5, 0., 1.]).is_ok());
    }
}
