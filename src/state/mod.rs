//! State primitives for extensive-form games.
//!
//! This module defines the entities a caller wires together:
//! - Players (named identities)
//! - Actions (edge labels)
//! - Nodes (decision points) and Leaves (payoff vectors)
//! - The Draft arena in which they are assembled before validation

mod action;
mod draft;
mod leaf;
mod node;
mod player;
mod vertex;

pub use action::*;
pub use draft::*;
pub use leaf::*;
pub use node::*;
pub use player::*;
pub use vertex::*;
