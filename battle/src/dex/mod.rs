//! Built-in species and move typing
//!
//! Only what the scorer and the stats pass need: the types of common
//! competitive species and the type of common moves. Lookups accept
//! display names ("Flutter Mane") or ids ("fluttermane").

mod moves;
mod species;

pub use moves::move_type;
pub use species::species_types;

/// Lowercase alphanumeric id, the form Showdown uses for keys
pub fn to_id(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
