use thiserror::Error;
use vgccorner_protocol::Player;

/// A per-event inconsistency. The offending event is skipped and
/// tracking continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackError {
    #[error("{player} has no pokemon named {name:?}")]
    UnknownPokemon { player: Player, name: String },

    #[error("{0} has not been introduced")]
    UnknownSide(Player),

    #[error("{player}'s {name} has already fainted")]
    FaintedPokemon { player: Player, name: String },

    #[error("{player} revealed more pokemon than their roster holds")]
    RosterFull { player: Player },
}
