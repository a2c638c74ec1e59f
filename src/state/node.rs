use super::*;
use petgraph::graph::NodeIndex;

/// A decision point.
///
/// Children are not stored here: they live as outgoing edges of the
/// enclosing graph, one per action, so the node itself only records
/// the ordered action labels it offers and who chooses among them.
///
/// A node is complete once it has a player, at least one action, a
/// child under every action, and (unless it is the root) a parent.
#[derive(Debug, Clone, Default)]
pub struct Node {
    name: Option<String>,
    player: Option<Player>,
    actions: Vec<Action>,
    parent: Option<NodeIndex>,
}

impl Node {
    /// A node owned by `player` whose actions arrive with its children.
    pub fn new(player: Player) -> Self {
        Self {
            player: Some(player),
            ..Self::default()
        }
    }
    /// A node with no owner yet. Never complete until one is given.
    pub fn unowned() -> Self {
        Self::default()
    }
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
    /// declare actions up front, children to be assigned later
    pub fn with_actions<A>(mut self, actions: impl IntoIterator<Item = A>) -> Self
    where
        A: Into<Action>,
    {
        self.actions = actions.into_iter().map(Into::into).collect();
        self
    }
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }
    /// first position of an action label
    pub fn position(&self, action: &Action) -> Option<usize> {
        self.actions.iter().position(|a| a == action)
    }
    /// the action labels as an unordered set
    pub fn support(&self) -> std::collections::BTreeSet<&Action> {
        self.actions.iter().collect()
    }

    pub(crate) fn rename(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }
    pub(crate) fn adopt(&mut self, parent: NodeIndex) {
        self.parent = Some(parent);
    }
    pub(crate) fn offer(&mut self, action: Action) {
        if self.position(&action).is_none() {
            self.actions.push(action);
        }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.name, &self.player) {
            (Some(name), Some(player)) => write!(f, "{} ({})", name, player),
            (Some(name), None) => write!(f, "{}", name),
            (None, Some(player)) => write!(f, "unnamed ({})", player),
            (None, None) => write!(f, "unnamed"),
        }
    }
}
