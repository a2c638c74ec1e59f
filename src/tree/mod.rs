//! Validated game trees.
//!
//! - `builder`: Tree-property validation of a caller-built draft
//! - `namer`: Default names for anything left unnamed
//! - `tree`: The finished, immutable-topology game
//! - `random`: Random trees for tests and benchmarks

mod builder;
mod namer;
mod random;
mod tree;

pub use builder::*;
pub use namer::*;
pub use tree::*;
