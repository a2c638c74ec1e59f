use super::*;

/// Gambit `.efg` version 2 text, the input format of the command-line
/// solvers. Nodes are written in preorder. Moves are numbered per player
/// and outcomes globally, both from 1, with 0 meaning none.
impl std::fmt::Display for Efg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let players = self
            .players
            .iter()
            .map(|p| quote(p))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(f, "EFG 2 R {} {{ {} }}", quote(&self.title), players)?;
        writeln!(f, "\"\"")?;
        writeln!(f)?;
        let numbers = self.numbers();
        for i in self.preorder() {
            let ref node = self.nodes[i];
            match (node.infoset, node.outcome) {
                (Some(k), _) => {
                    let ref infoset = self.infosets[k];
                    let actions = infoset
                        .actions
                        .iter()
                        .map(|a| quote(a))
                        .collect::<Vec<_>>()
                        .join(" ");
                    writeln!(
                        f,
                        "p {} {} {} {} {{ {} }} 0",
                        quote(&node.label),
                        infoset.player + 1,
                        numbers[k],
                        quote(&infoset.label),
                        actions
                    )?;
                }
                (None, Some(o)) => {
                    let ref outcome = self.outcomes[o];
                    let payoffs = outcome
                        .payoffs
                        .iter()
                        .map(|u| u.to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    writeln!(
                        f,
                        "t {} {} {} {{ {} }}",
                        quote(&node.label),
                        o + 1,
                        quote(&outcome.label),
                        payoffs
                    )?;
                }
                (None, None) => writeln!(f, "t {} 0", quote(&node.label))?,
            }
        }
        Ok(())
    }
}

impl Efg {
    /// per-player move number of each infoset, in creation order
    fn numbers(&self) -> Vec<usize> {
        let mut counts = vec![0; self.players.len()];
        self.infosets
            .iter()
            .map(|i| match counts.get_mut(i.player) {
                Some(count) => {
                    *count += 1;
                    *count
                }
                None => 0,
            })
            .collect()
    }
}

fn quote(label: &str) -> String {
    format!("\"{}\"", label.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::*;

    #[test]
    fn writes_gambit_text() {
        let mut efg = Efg::new("matching \"pennies\"");
        let p1 = efg.add_player("1");
        let p2 = efg.add_player("2");
        efg.append_move(0, p1, ["H", "T"]).unwrap();
        let m = efg.append_move(1, p2, ["h", "t"]).unwrap();
        efg.append_infoset(2, m).unwrap();
        efg.set_infoset_label(m, "(a, b)").unwrap();
        for (node, u) in [(3, 1.), (4, -1.), (5, -1.), (6, 1.)] {
            let o = efg.add_outcome("", vec![u, -u]);
            efg.set_outcome(node, o).unwrap();
        }
        let text = efg.to_string();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], r#"EFG 2 R "matching \"pennies\"" { "1" "2" }"#);
        assert_eq!(lines[3], r#"p "" 1 1 "" { "H" "T" } 0"#);
        assert_eq!(lines[4], r#"p "" 2 1 "(a, b)" { "h" "t" } 0"#);
        assert_eq!(lines[5], r#"t "" 1 "" { 1, -1 }"#);
        assert_eq!(lines[7], r#"p "" 2 1 "(a, b)" { "h" "t" } 0"#);
        assert_eq!(lines[9], r#"t "" 4 "" { 1, -1 }"#);
        assert_eq!(lines.len(), 10);
    }
    #[test]
    fn escapes_backslashes_before_quotes() {
        assert_eq!(quote(r#"a\b"#), r#""a\\b""#);
        assert_eq!(quote(r#"end\"#), r#""end\\""#);
        assert_eq!(quote(r#"say "hi""#), r#""say \"hi\"""#);
    }
    #[test]
    fn numbers_moves_per_player() {
        let mut efg = Efg::new("");
        let p1 = efg.add_player("1");
        let p2 = efg.add_player("2");
        efg.append_move(0, p1, ["L", "R"]).unwrap();
        efg.append_move(1, p2, ["x"]).unwrap();
        efg.append_move(2, p1, ["y"]).unwrap();
        assert_eq!(efg.numbers(), vec![1, 1, 2]);
    }
}
