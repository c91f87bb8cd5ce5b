//! Output model of one analysed battle
//!
//! Everything here is plain data, built once by the summary assembler and
//! never mutated afterwards. Field names serialize in camelCase for the
//! presentation layer; maps are `BTreeMap` so output is byte-stable.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use vgccorner_battle::{
    BattleEvent, BoardState, EventResult, GameType, MoveImpact, Player, Status,
};
use vgccorner_team::TeamClassification;

/// One fully analysed battle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Battle {
    pub id: String,
    pub format: String,
    pub timestamp: DateTime<Utc>,
    /// Seconds between the first and last `|t:|` stamps
    pub duration: u64,
    pub player1: PlayerSummary,
    pub player2: PlayerSummary,
    pub winner: Winner,
    pub turns: Vec<Turn>,
    pub stats: BattleStats,
    pub key_moments: Vec<KeyMoment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_type: Option<GameType>,
    pub generation: u8,
    pub rated: bool,
    pub rules: Vec<String>,
}

impl Battle {
    pub fn player(&self, player: Player) -> &PlayerSummary {
        match player {
            Player::P1 => &self.player1,
            Player::P2 => &self.player2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Player1,
    Player2,
    Draw,
}

impl Winner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Winner::Player1 => "player1",
            Winner::Player2 => "player2",
            Winner::Draw => "draw",
        }
    }
}

impl From<Player> for Winner {
    fn from(player: Player) -> Self {
        match player {
            Player::P1 => Winner::Player1,
            Player::P2 => Winner::Player2,
        }
    }
}

/// A player as they stood when the battle ended
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u32>,
    pub team: Vec<PokemonSummary>,
    /// Index into `team` of the pokemon in the first active slot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<usize>,
    pub losses: usize,
    pub total_left: usize,
    pub roster_size: usize,
    pub archetype: TeamClassification,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonSummary {
    pub id: String,
    pub name: String,
    pub species: String,
    pub level: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<char>,
    pub ability: String,
    pub item: String,
    /// Empty when the pokemon never showed a tera type
    pub tera_type: String,
    pub moves: Vec<String>,
    #[serde(rename = "currentHP")]
    pub current_hp: u32,
    #[serde(rename = "maxHP")]
    pub max_hp: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    pub happiness: u8,
    pub shiny: bool,
    pub fainted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    pub turn_number: u32,
    pub actions: Vec<Action>,
    pub events: Vec<BattleEvent>,
    /// Percentage points dealt by each player this turn
    pub damage_dealt: BTreeMap<Player, u32>,
    /// Percentage points restored to each player's side this turn
    pub healing_done: BTreeMap<Player, u32>,
    pub state_after: BoardState,
    pub position_score: Option<PositionScore>,
}

/// Something a player chose to do
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub player: Player,
    #[serde(flatten)]
    pub kind: ActionKind,
    pub pokemon: String,
    /// Position within the turn, starting at 0
    pub order: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "actionType", rename_all = "lowercase")]
pub enum ActionKind {
    #[serde(rename_all = "camelCase")]
    Move {
        move_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        move_type: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        target: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        result: Option<EventResult>,
        impact: MoveImpact,
    },
    #[serde(rename_all = "camelCase")]
    Switch { switch_to: String },
    #[serde(rename_all = "camelCase")]
    Item { item: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Momentum {
    Player1,
    Player2,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionScore {
    pub player1_score: f64,
    pub player2_score: f64,
    pub momentum_player: Momentum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentType {
    Switch,
    Ko,
    Status,
    Weather,
    TurningPoint,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMoment {
    pub turn_number: u32,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: MomentType,
    /// 1 (minor) to 10 (decisive)
    pub significance: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurningPoint {
    pub turn_number: u32,
    pub player1_score_before: f64,
    pub player1_score_after: f64,
    pub player2_score_before: f64,
    pub player2_score_after: f64,
    /// Change in player 1's score; positive favors player 1
    pub momentum_shift: f64,
    pub significance: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleStats {
    pub total_turns: usize,
    pub move_frequency: BTreeMap<String, u32>,
    pub type_coverage: BTreeMap<String, u32>,
    pub switches: u32,
    pub critical_hits: u32,
    pub super_effective: u32,
    pub not_very_effective: u32,
    pub avg_damage_per_turn: f64,
    pub avg_heal_per_turn: f64,
    pub player1_stats: PlayerStats,
    pub player2_stats: PlayerStats,
    pub turning_points: Vec<TurningPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub move_count: u32,
    pub switch_count: u32,
    pub damage_dealt: u32,
    pub damage_taken: u32,
    pub healing_done: u32,
    pub healing_received: u32,
    pub moves_by_type: BTreeMap<String, u32>,
    pub effectiveness: EffectivenessBreakdown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectivenessBreakdown {
    pub super_effective: u32,
    pub not_very_effective: u32,
    pub neutral: u32,
}

/// Round to two decimals for stable output
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
