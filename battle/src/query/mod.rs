//! Query helpers over tracked state
//!
//! Type matchup math used when scoring a board position.

mod matchup;

pub use matchup::{best_stab_multiplier, matchup_edge};
