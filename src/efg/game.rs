use crate::*;

/// A game tree in the shape an external equilibrium engine expects.
///
/// Mirrors Gambit's object model: nodes are stored flat with node 0 as
/// the root; a decision node points at a shared *move* ([`EfgInfoset`])
/// that owns the player and action labels; a terminal node points at an
/// [`EfgOutcome`] carrying one payoff per player, in player order.
/// Blank labels are the empty string.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Efg {
    pub title: String,
    pub players: Vec<String>,
    pub nodes: Vec<EfgNode>,
    pub infosets: Vec<EfgInfoset>,
    pub outcomes: Vec<EfgOutcome>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EfgNode {
    pub label: String,
    pub infoset: Option<usize>,
    pub children: Vec<usize>,
    pub outcome: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EfgInfoset {
    pub label: String,
    pub player: usize,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EfgOutcome {
    pub label: String,
    pub payoffs: Vec<Utility>,
}

impl Default for Efg {
    fn default() -> Self {
        Self::new("")
    }
}

impl Efg {
    /// an empty game holding only an unlabelled root
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            players: Vec::new(),
            nodes: vec![EfgNode::default()],
            infosets: Vec::new(),
            outcomes: Vec::new(),
        }
    }
    pub fn root(&self) -> usize {
        0
    }
    pub fn add_player(&mut self, label: impl Into<String>) -> usize {
        self.players.push(label.into());
        self.players.len() - 1
    }
    /// open a new move at a childless node, one child per action
    pub fn append_move<S>(
        &mut self,
        node: usize,
        player: usize,
        actions: impl IntoIterator<Item = S>,
    ) -> Result<usize>
    where
        S: Into<String>,
    {
        if player >= self.players.len() {
            return Err(Error::Malformed(format!("no player {}", player)));
        }
        self.vacant(node)?;
        self.infosets.push(EfgInfoset {
            label: String::new(),
            player,
            actions: actions.into_iter().map(Into::into).collect(),
        });
        let infoset = self.infosets.len() - 1;
        self.append_infoset(node, infoset)?;
        Ok(infoset)
    }
    /// attach an existing move at a childless node, one child per action
    pub fn append_infoset(&mut self, node: usize, infoset: usize) -> Result<()> {
        let width = self
            .infosets
            .get(infoset)
            .map(|i| i.actions.len())
            .ok_or_else(|| Error::Malformed(format!("no infoset {}", infoset)))?;
        self.vacant(node)?;
        let first = self.nodes.len();
        self.nodes
            .extend(std::iter::repeat_with(EfgNode::default).take(width));
        self.nodes[node].infoset = Some(infoset);
        self.nodes[node].children = (first..first + width).collect();
        Ok(())
    }
    fn vacant(&self, node: usize) -> Result<()> {
        match self.nodes.get(node) {
            None => Err(Error::Malformed(format!("no node {}", node))),
            Some(n) if n.infoset.is_some() || !n.children.is_empty() => {
                Err(Error::Malformed(format!("node {} already has a move", node)))
            }
            Some(_) => Ok(()),
        }
    }
    pub fn add_outcome(&mut self, label: impl Into<String>, payoffs: Vec<Utility>) -> usize {
        self.outcomes.push(EfgOutcome {
            label: label.into(),
            payoffs,
        });
        self.outcomes.len() - 1
    }
    pub fn set_outcome(&mut self, node: usize, outcome: usize) -> Result<()> {
        if outcome >= self.outcomes.len() {
            return Err(Error::Malformed(format!("no outcome {}", outcome)));
        }
        self.nodes
            .get_mut(node)
            .map(|n| n.outcome = Some(outcome))
            .ok_or_else(|| Error::Malformed(format!("no node {}", node)))
    }
    pub fn set_label(&mut self, node: usize, label: impl Into<String>) -> Result<()> {
        self.nodes
            .get_mut(node)
            .map(|n| n.label = label.into())
            .ok_or_else(|| Error::Malformed(format!("no node {}", node)))
    }
    pub fn set_infoset_label(&mut self, infoset: usize, label: impl Into<String>) -> Result<()> {
        self.infosets
            .get_mut(infoset)
            .map(|i| i.label = label.into())
            .ok_or_else(|| Error::Malformed(format!("no infoset {}", infoset)))
    }
    pub fn is_terminal(&self, node: usize) -> bool {
        self.nodes
            .get(node)
            .map(|n| n.children.is_empty())
            .unwrap_or(true)
    }
    /// nodes reachable from the root in preorder
    pub fn preorder(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![self.root()];
        while let Some(node) = stack.pop() {
            if std::mem::replace(&mut seen[node], true) {
                continue;
            }
            order.push(node);
            stack.extend(
                self.nodes[node]
                    .children
                    .iter()
                    .rev()
                    .filter(|c| **c < self.nodes.len()),
            );
        }
        order
    }
    /// nodes attached to `infoset`, in preorder
    pub fn members(&self, infoset: usize) -> Vec<usize> {
        self.preorder()
            .into_iter()
            .filter(|n| self.nodes[*n].infoset == Some(infoset))
            .collect()
    }
    /// moves of `player`, in creation order
    pub fn infosets_of(&self, player: usize) -> Vec<usize> {
        self.infosets
            .iter()
            .enumerate()
            .filter(|(_, i)| i.player == player)
            .map(|(i, _)| i)
            .collect()
    }
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Malformed(e.to_string()))
    }
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Malformed(e.to_string()))
    }
    /// total action count across every move, in profile order
    pub fn profile_len(&self) -> usize {
        (0..self.players.len())
            .flat_map(|p| self.infosets_of(p))
            .map(|i| self.infosets[i].actions.len())
            .sum()
    }
}
