//! Board state tracking from classified events

mod apply;
mod board;
mod error;
mod snapshot;

pub use board::BoardTracker;
pub use error::TrackError;
pub use snapshot::{ActiveView, BoardState, FieldView, RosterEntry, SideView};
