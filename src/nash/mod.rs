//! Nash equilibria through an external solver.
//!
//! - `engine`: The [`Engine`] seam and the Gambit command-line solver
//! - `profile`: Flat solver output → per-player [`Equilibrium`]
//! - `query`: [`solve`] and `Tree::obtain_nash`

mod engine;
mod profile;
mod query;

pub use engine::*;
pub use profile::*;
pub use query::*;
