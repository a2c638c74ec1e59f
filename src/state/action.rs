/// The label on an edge out of a decision node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Action(String);

impl Action {
    pub fn label(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Action {
    fn from(label: &str) -> Self {
        Self(label.to_string())
    }
}
impl From<String> for Action {
    fn from(label: String) -> Self {
        Self(label)
    }
}
impl From<&Action> for Action {
    fn from(action: &Action) -> Self {
        action.clone()
    }
}

impl PartialEq<str> for Action {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
impl PartialEq<&str> for Action {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
