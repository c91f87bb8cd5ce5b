//! Domain types for board state tracking

mod conditions;
mod field;
mod pokemon;
mod pokemon_type;
mod side;
mod status;

pub use conditions::{SideCondition, SideConditionState, Terrain, Weather};
pub use field::{FieldState, Room};
pub use pokemon::{species_matches, PokemonIdentity, PokemonState};
pub use pokemon_type::{Type, TYPE_CHART};
pub use side::{SideState, DEFAULT_ROSTER_CAPACITY};
pub use status::Status;
