//! Owned board snapshots
//!
//! A [`BoardState`] is a deep copy; later tracker mutations never reach
//! a snapshot that has already been taken.

use std::collections::BTreeMap;

use serde::Serialize;
use vgccorner_protocol::Player;

use super::board::BoardTracker;
use crate::types::{PokemonState, SideCondition, SideState, Status, Terrain, Weather};

/// An active pokemon as seen after a turn
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveView {
    pub species: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// Slot index (0 = a)
    pub position: usize,
    pub hp: u32,
    pub max_hp: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    pub is_lead: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tera_type: Option<String>,
    pub terastallized: bool,
}

/// One roster member
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub name: String,
    pub species: String,
    pub hp_percent: u32,
    pub fainted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    pub revealed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SideView {
    pub name: String,
    pub active: Vec<ActiveView>,
    /// Names of roster members still able to battle
    pub alive: Vec<String>,
    pub roster: Vec<RosterEntry>,
    pub losses: usize,
    pub total_left: usize,
    pub roster_size: usize,
    pub conditions: BTreeMap<SideCondition, u8>,
}

impl SideView {
    fn empty() -> Self {
        Self {
            name: String::new(),
            active: Vec::new(),
            alive: Vec::new(),
            roster: Vec::new(),
            losses: 0,
            total_left: 0,
            roster_size: 0,
            conditions: BTreeMap::new(),
        }
    }

    fn from_side(side: &SideState) -> Self {
        let active = side
            .get_active()
            .map(|(slot, poke)| active_view(slot, poke))
            .collect();

        let roster = side
            .pokemon
            .iter()
            .map(|p| RosterEntry {
                name: p.name().to_string(),
                species: p.identity.species.clone(),
                hp_percent: p.hp_percent(),
                fainted: p.fainted,
                status: p.status,
                revealed: p.revealed,
            })
            .collect();

        Self {
            name: side.username.clone(),
            active,
            alive: side.alive_names(),
            roster,
            losses: side.losses,
            total_left: side.total_left(),
            roster_size: side.roster_size(),
            conditions: side
                .conditions
                .iter()
                .map(|(cond, state)| (*cond, state.layers))
                .collect(),
        }
    }

    /// Roster entries that count towards this side's standing
    ///
    /// With bring-N-of-6 previews only revealed members are known to be
    /// in the battle.
    pub fn counted_roster(&self) -> impl Iterator<Item = &RosterEntry> {
        let exact = self.roster.len() <= self.roster_size;
        self.roster.iter().filter(move |e| exact || e.revealed)
    }
}

fn active_view(slot: usize, poke: &PokemonState) -> ActiveView {
    ActiveView {
        species: poke.identity.species.clone(),
        nickname: poke.identity.nickname.clone(),
        position: slot,
        hp: poke.hp_current,
        max_hp: poke.hp_max.unwrap_or(100),
        status: poke.status,
        is_lead: poke.is_lead,
        tera_type: poke.tera_type.clone(),
        terastallized: poke.terastallized,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<Weather>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terrain: Option<Terrain>,
    pub trick_room: bool,
}

/// The whole board after a turn resolves
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    pub player1: SideView,
    pub player2: SideView,
    pub field: FieldView,
}

impl BoardState {
    pub fn side(&self, player: Player) -> &SideView {
        match player {
            Player::P1 => &self.player1,
            Player::P2 => &self.player2,
        }
    }
}

impl BoardTracker {
    /// Deep copy of the current board
    pub fn snapshot(&self) -> BoardState {
        let view = |p: Player| self.get_side(p).map_or_else(SideView::empty, SideView::from_side);
        BoardState {
            player1: view(Player::P1),
            player2: view(Player::P2),
            field: FieldView {
                weather: self.field.weather,
                terrain: self.field.terrain,
                trick_room: self.field.trick_room,
            },
        }
    }
}
