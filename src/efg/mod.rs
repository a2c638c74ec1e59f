//! The external solver's tree format and conversion to and from it.
//!
//! - `game`: The foreign tree: players, moves, outcomes
//! - `export`: [`crate::Tree`] → [`Efg`]
//! - `import`: [`Efg`] → [`crate::Tree`]
//! - `text`: Gambit `.efg` rendering consumed by the engine

mod export;
mod game;
mod import;
mod text;

pub use game::*;
