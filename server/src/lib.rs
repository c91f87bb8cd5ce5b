//! HTTP API for Showdown replay analysis
//!
//! Replays are fetched from the replay host (or submitted as raw logs),
//! analysed with [`vgccorner_replay::analyze_log`] and kept in memory.
//! Concurrent requests for the same replay share one analysis.

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod replay_id;
pub mod routes;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::ApiError;
pub use fetch::{FetchError, ReplayListing, ReplaySource, ShowdownReplays};
pub use logging::{LogFormat, init_logging};
pub use replay_id::ReplayId;
pub use routes::router;
pub use state::{AppState, Settings};
