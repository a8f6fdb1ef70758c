//! Monte-Carlo tree search for Hex
//!
//! Two time-bounded searchers over the same primitives:
//! - [`UctPlayer`]: plain UCT with uniformly random rollouts
//! - [`AmafPlayer`]: UCT with All-Moves-As-First statistics and a fixed
//!   opening book
//!
//! Both build a fresh tree per decision and drop it when the move is
//! returned; nothing is reused across turns.

use std::time::Duration;

pub mod amaf;
pub mod book;
pub mod rollout;
pub mod search;
pub mod tree;

pub use amaf::AmafPlayer;
pub use search::UctPlayer;
pub use tree::{NodeId, SearchNode, SearchTree};

/// Search configuration shared by both MCTS variants.
#[derive(Clone, Debug)]
pub struct MctsConfig {
    /// Wall-clock budget per decision. Checked between iterations only; a
    /// rollout in flight always completes.
    pub time_budget: Duration,
    /// UCB1 exploration constant `c`; selection weighs the exploration term
    /// by `2c`.
    pub exploration: f64,
    /// RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Optional hard cap on iterations. Seeded runs capped this way are
    /// exactly reproducible, which wall-clock time alone cannot guarantee.
    pub max_iterations: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_secs(3),
            exploration: std::f64::consts::FRAC_1_SQRT_2,
            seed: None,
            max_iterations: None,
        }
    }
}
