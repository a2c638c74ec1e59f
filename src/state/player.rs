/// A named participant.
///
/// Identity is the name: two players with the same name are the same
/// player, and players order alphabetically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Player(String);

impl Player {
    pub fn name(&self) -> &str {
        &self.0
    }
    /// blank names cannot be told apart in the external tree
    pub fn is_valid(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

impl From<&str> for Player {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}
impl From<String> for Player {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
