//! Information sets.
//!
//! - `infoset`: One group of indistinguishable decision nodes
//! - `partition`: The mutable partition of all decision nodes into groups
//! - `graph`: The condensed graph of groups, derived on demand

mod graph;
mod infoset;
mod partition;

pub use graph::*;
pub use infoset::*;
pub use partition::*;
