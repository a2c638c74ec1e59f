//! Extensive-form games.
//!
//! A game is a tree of decision [`Node`]s ending in payoff [`Leaf`]s,
//! grouped into information sets that encode what the acting player
//! cannot tell apart.
//!
//! # Module Structure
//!
//! - `state`: Players, nodes, leaves and the user-built [`Draft`] arena
//! - `tree`: Validation ([`TreeBuilder`]), default naming ([`Namer`]) and the finished [`Tree`]
//! - `info`: The information-set [`Partition`] and its condensed [`InfoGraph`]
//! - `efg`: The external [`Efg`] tree and conversion in both directions
//! - `nash`: Equilibrium queries against an external [`Engine`]

mod efg;
mod error;
mod info;
mod nash;
mod state;
mod tree;

pub use efg::*;
pub use error::*;
pub use info::*;
pub use nash::*;
pub use state::*;
pub use tree::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Terminal payoffs. Must be finite.
pub type Utility = f64;
/// Behaviour-strategy weights reported by the equilibrium engine.
pub type Probability = f64;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and benchmarking.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// DEFAULT NAMES
// Assigned once, at construction, to entities left unnamed by the caller.
// ============================================================================
/// Name given to an unnamed root.
pub const ROOT_NAME: &str = "Tree Root";
/// Prefix for unnamed decision nodes, numbered in traversal order.
pub const NODE_PREFIX: &str = "Node";
/// Prefix for unnamed leaves, numbered in encounter order.
pub const LEAF_PREFIX: &str = "Leaf";
/// Prefix for blank action labels found in an imported tree.
pub const ACTION_PREFIX: &str = "Action";

// ============================================================================
// EQUILIBRIUM ENGINE
// ============================================================================
/// Command-line LCP solver shipped with Gambit.
pub const SOLVER_PROGRAM: &str = "gambit-lcp";
/// Hard limit on a single engine invocation.
pub const SOLVER_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);
/// Slack allowed when checking that a decision point's probabilities sum to one.
pub const SOLVER_TOLERANCE: Probability = 1e-6;
/// The LCP algorithm class only handles two-player games.
pub const SOLVER_PLAYERS: usize = 2;
/// Polling interval while waiting on the engine process.
pub const SOLVER_POLL: std::time::Duration = std::time::Duration::from_millis(10);

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize terminal logging at INFO level.
/// Safe to call more than once; later calls are no-ops.
pub fn log() {
    static ONCE: std::sync::Once = std::sync::Once::new();
    ONCE.call_once(|| {
        let config = simplelog::ConfigBuilder::new()
            .set_location_level(log::LevelFilter::Off)
            .set_target_level(log::LevelFilter::Off)
            .set_thread_level(log::LevelFilter::Off)
            .build();
        let _ = simplelog::TermLogger::init(
            log::LevelFilter::Info,
            config,
            simplelog::TerminalMode::Mixed,
            simplelog::ColorChoice::Auto,
        );
    });
}

/// Parse duration string like "30s", "5m", "2h", "1d" into Duration.
/// Anything else, including values that overflow, yields None.
pub fn parse_duration(s: &str) -> Option<std::time::Duration> {
    let s = s.trim();
    let (at, unit) = s.char_indices().last()?;
    let value = s[..at].parse::<u64>().ok()?;
    let scale = match unit {
        's' => 1,
        'm' => 60,
        'h' => 3600,
        'd' => 86400,
        _ => return None,
    };
    value.checked_mul(scale).map(std::time::Duration::from_secs)
}
