//! Board state tracking and domain types for replay analysis.
//!
//! `vgccorner-battle` sits between `vgccorner-protocol` (wire format) and the
//! analysis engine:
//!
//! ```text
//! vgccorner-protocol (wire format)
//!        │
//!        ▼
//! vgccorner-battle (domain types + events + tracking) ← THIS CRATE
//!        │
//!        ├─> vgccorner-team (archetype classification)
//!        └─> vgccorner-replay (scoring, detection, summaries)
//! ```
//!
//! # Main Types
//!
//! ## Domain Types
//! - [`Type`] - Pokemon types with effectiveness chart
//! - [`Status`] - Non-volatile status conditions
//! - [`Weather`], [`Terrain`], [`SideCondition`] - Field conditions
//! - [`PokemonState`], [`SideState`], [`FieldState`] - Live board pieces
//!
//! ## Events
//! - [`BattleEvent`] / [`EventKind`] - One classified log line
//! - [`EventResult`] - Outcome annotations with a priority order
//!
//! ## State Tracking
//! - [`BoardTracker`] - Applies events and takes [`BoardState`] snapshots
//!
//! # Example Usage
//!
//! ```ignore
//! use vgccorner_battle::{BoardTracker, Player};
//!
//! let mut tracker = BoardTracker::new();
//! tracker.update(&message);
//! if let Some(faint) = tracker.apply_event(&event)? {
//!     // damage dropped a pokemon to zero
//! }
//! let board = tracker.snapshot();
//! println!("{} left", board.side(Player::P1).total_left);
//! ```

pub mod dex;
pub mod events;
pub mod query;
pub mod tracking;
pub mod types;

// Re-export main types at crate root for convenience
pub use events::{
    BattleEvent, Effectiveness, EventKind, EventResult, MoveImpact, SpeedControl, StatChange,
};
pub use tracking::{
    ActiveView, BoardState, BoardTracker, FieldView, RosterEntry, SideView, TrackError,
};
pub use types::{
    FieldState, PokemonIdentity, PokemonState, Room, SideCondition, SideConditionState, SideState,
    Status, Terrain, Type, Weather, TYPE_CHART,
};

// Re-export commonly used protocol types
pub use vgccorner_protocol::{GameType, Player};
