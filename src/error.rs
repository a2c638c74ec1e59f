//! Error taxonomy shared by construction, partitioning and conversion.
//!
//! Every failure is raised where it is detected and leaves the receiver
//! untouched: construction, information-set mutation and conversion are
//! each all-or-nothing.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    // structural
    #[error("relationship between nodes does not correspond to a tree: {0}")]
    NotATree(String),

    #[error("node {node} is not complete: missing {missing}")]
    Incomplete { node: String, missing: &'static str },

    #[error("leaf {leaf} cannot take children")]
    Childless { leaf: String },

    #[error("action '{action}' is offered more than once at node {node}")]
    AmbiguousAction { node: String, action: String },

    // type-class
    #[error("cannot assign an invalid player to node {node}")]
    InvalidPlayer { node: String },

    #[error("invalid leaf payoff mapping at {leaf}: {reason}")]
    InvalidPayoffs { leaf: String, reason: String },

    // partition
    #[error("all nodes in the same information set must have the same player")]
    InconsistentPlayer,

    #[error("all nodes in the same information set must have the same actions")]
    InconsistentActions,

    #[error("nodes {0:?} do not form an existing information set")]
    NotAGroup(Vec<String>),

    #[error("index {0} is not a decision node of this tree")]
    UnknownNode(usize),

    // import
    #[error("terminal node {node} in the external tree has no outcome")]
    MissingOutcome { node: usize },

    #[error("malformed external tree: {0}")]
    Malformed(String),

    // capability
    #[error("nash equilibrium for games with {players} players has not been implemented")]
    NotImplemented { players: usize },

    #[error("equilibrium engine did not finish within {0:?}")]
    Timeout(std::time::Duration),

    #[error("equilibrium engine failed: {0:#}")]
    Engine(#[from] anyhow::Error),
}
