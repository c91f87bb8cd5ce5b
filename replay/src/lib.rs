//! Replay analysis engine.
//!
//! Turns a raw Pokemon Showdown replay log into a [`Battle`]: per-turn
//! board snapshots, classified events, damage and healing totals, a
//! position score per side, turning points and ranked key moments.
//!
//! ```text
//! raw log ─> LogTokenizer ─> classify ⇄ BoardTracker ─> TurnBuilder
//!                                                         │
//!          Battle <─ assemble <─ stats / detect <─ score ─┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use vgccorner_replay::{analyze_log, AnalysisOptions};
//!
//! let analysis = analyze_log(&raw, &AnalysisOptions::with_replay_id("gen9vgc2024regg-123"))?;
//! println!("{} won in {} turns", analysis.battle.winner.as_str(), analysis.battle.turns.len());
//! ```

mod aggregate;
mod classify;
mod context;
pub mod detect;
mod error;
pub mod model;
pub mod score;
pub mod stats;
mod summary;

pub use context::{analyze_log, Analysis, AnalysisOptions, Diagnostics};
pub use error::AnalysisError;
pub use summary::battle_id;
pub use model::{
    Action, ActionKind, Battle, BattleStats, EffectivenessBreakdown, KeyMoment, MomentType,
    Momentum, PlayerStats, PlayerSummary, PokemonSummary, PositionScore, Turn, TurningPoint,
    Winner,
};

// Re-exported for consumers that only depend on this crate
pub use vgccorner_battle::{
    BattleEvent, BoardState, EventKind, EventResult, MoveImpact, Player, SpeedControl, StatChange,
    Status,
};
pub use vgccorner_team::{Archetype, TeamClassification};
