//! Wire-level handling of Pokemon Showdown replay logs.
//!
//! Two layers live here:
//!
//! - [`tokenizer`] splits a raw log into `(turn, line)` pairs grouped by the
//!   `|turn|N` markers, rejecting logs whose turn ordering cannot be trusted.
//! - [`server`] turns a single protocol line into a typed [`ServerMessage`].

use thiserror::Error;

pub mod server;
pub mod tokenizer;

pub use server::{
    parse_server_message, GameType, HpStatus, Player, PokemonDetails, PokemonIdent, ServerMessage,
    Side, Stat,
};
pub use tokenizer::{LogTokenizer, TokenizedLine, TurnLines};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid message format: {0}")]
    InvalidFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Empty message")]
    EmptyMessage,

    #[error("Malformed turn marker on line {line}: {value:?}")]
    MalformedTurn { line: usize, value: String },

    #[error("Turn marker on line {line} out of order: expected {expected}, found {found}")]
    NonMonotonicTurn {
        line: usize,
        expected: u32,
        found: u32,
    },
}
