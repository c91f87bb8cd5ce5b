//! Global field state

use super::conditions::{Terrain, Weather};

/// Conditions that affect both sides at once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub weather: Option<Weather>,
    pub terrain: Option<Terrain>,

    /// Slower pokemon move first
    pub trick_room: bool,
    pub magic_room: bool,
    pub wonder_room: bool,
    pub gravity: bool,
}

/// Pseudo-weather conditions tracked as booleans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Room {
    TrickRoom,
    MagicRoom,
    WonderRoom,
    Gravity,
}

impl Room {
    pub fn from_protocol(condition: &str) -> Option<Self> {
        let clean = condition.strip_prefix("move: ").unwrap_or(condition);
        match clean.to_lowercase().replace([' ', '-'], "").as_str() {
            "trickroom" => Some(Room::TrickRoom),
            "magicroom" => Some(Room::MagicRoom),
            "wonderroom" => Some(Room::WonderRoom),
            "gravity" => Some(Room::Gravity),
            _ => None,
        }
    }
}

impl FieldState {
    pub fn new() -> Self {
        Self::default()
    }

    fn room_mut(&mut self, room: Room) -> &mut bool {
        match room {
            Room::TrickRoom => &mut self.trick_room,
            Room::MagicRoom => &mut self.magic_room,
            Room::WonderRoom => &mut self.wonder_room,
            Room::Gravity => &mut self.gravity,
        }
    }

    /// Turn a room on or off. Returns whether anything changed.
    pub fn set_room(&mut self, room: Room, active: bool) -> bool {
        let slot = self.room_mut(room);
        let changed = *slot != active;
        *slot = active;
        changed
    }
}
