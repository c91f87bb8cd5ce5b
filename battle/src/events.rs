//! Classified battle events
//!
//! A [`BattleEvent`] is one protocol line after classification: what
//! happened, who did it, to whom, and how it turned out. The board
//! tracker consumes these through a single transition function, and the
//! replay engine derives actions, damage totals and key moments from them.

use serde::Serialize;
use vgccorner_protocol::Player;

use crate::types::{SideCondition, Status, Terrain, Weather};

/// Outcome annotation attached to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventResult {
    Faint,
    CriticalHit,
    Miss,
    SuperEffective,
    NotVeryEffective,
    Immune,
    Fail,
    Success,
}

impl EventResult {
    /// Higher wins when several markers follow the same move
    pub fn priority(&self) -> u8 {
        match self {
            EventResult::Faint => 6,
            EventResult::CriticalHit => 5,
            EventResult::Miss => 4,
            EventResult::SuperEffective | EventResult::NotVeryEffective | EventResult::Immune => 3,
            EventResult::Fail => 2,
            EventResult::Success => 1,
        }
    }

    /// Keep whichever of the current and incoming results ranks higher
    pub fn merge(current: Option<EventResult>, incoming: EventResult) -> EventResult {
        match current {
            Some(existing) if existing.priority() >= incoming.priority() => existing,
            _ => incoming,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventResult::Faint => "faint",
            EventResult::CriticalHit => "critical-hit",
            EventResult::Miss => "miss",
            EventResult::SuperEffective => "super-effective",
            EventResult::NotVeryEffective => "not-very-effective",
            EventResult::Immune => "immune",
            EventResult::Fail => "fail",
            EventResult::Success => "success",
        }
    }
}

/// Type effectiveness reported by the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Effectiveness {
    SuperEffective,
    NotVeryEffective,
    Immune,
}

impl Effectiveness {
    pub fn result(&self) -> EventResult {
        match self {
            Effectiveness::SuperEffective => EventResult::SuperEffective,
            Effectiveness::NotVeryEffective => EventResult::NotVeryEffective,
            Effectiveness::Immune => EventResult::Immune,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Effectiveness::SuperEffective => "It's super effective",
            Effectiveness::NotVeryEffective => "It's not very effective",
            Effectiveness::Immune => "It doesn't affect the target",
        }
    }
}

/// Speed control applied by a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpeedControl {
    Flinch,
    TrickRoom,
    Tailwind,
    SpeedDrop,
    Paralysis,
}

/// A stat stage change caused by a move
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatChange {
    pub pokemon: String,
    pub stat: String,
    /// Negative for drops
    pub stages: i8,
}

/// What a move did, gathered from the lines that follow it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveImpact {
    /// Percentage points taken off the targets
    pub damage_dealt: u32,
    /// Percentage points restored, e.g. by draining moves
    pub healing_done: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_inflicted: Option<Status>,
    pub fainted: Vec<String>,
    pub stat_changes: Vec<StatChange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_set: Option<Weather>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terrain_set: Option<Terrain>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_control: Option<SpeedControl>,
    pub protect: bool,
}

/// Kind-specific payload of a [`BattleEvent`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EventKind {
    #[serde(rename_all = "camelCase")]
    Move {
        move_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        target_side: Option<Player>,
        critical: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        effectiveness: Option<Effectiveness>,
        missed: bool,
        failed: bool,
        /// Dealt damage to at least one target
        hit: bool,
        spread: bool,
        impact: MoveImpact,
    },

    #[serde(rename_all = "camelCase")]
    Switch {
        species: String,
        level: u8,
        slot: usize,
        hp: u32,
        max_hp: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        gender: Option<char>,
        shiny: bool,
        /// Dragged in by an opponent's move
        forced: bool,
        /// Filled a slot left empty by a faint
        replacement: bool,
        /// Sent out before the first turn
        lead: bool,
    },

    #[serde(rename_all = "camelCase")]
    Faint {
        /// Members the side still has standing afterwards
        remaining: usize,
    },

    #[serde(rename_all = "camelCase")]
    Damage {
        /// Percentage points lost
        amount: u32,
        hp: u32,
        max_hp: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        source: Option<String>,
    },

    #[serde(rename_all = "camelCase")]
    Heal {
        /// Percentage points restored
        amount: u32,
        hp: u32,
        max_hp: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        source: Option<String>,
    },

    /// Stat stage change; `stages` is negative for drops
    #[serde(rename_all = "camelCase")]
    Boost { stat: String, stages: i8 },

    #[serde(rename_all = "camelCase")]
    Status {
        /// `None` when the status was cured
        status: Option<Status>,
        #[serde(skip_serializing_if = "Option::is_none")]
        previous: Option<Status>,
    },

    #[serde(rename_all = "camelCase")]
    Weather {
        /// `None` when the weather ended
        weather: Option<Weather>,
        #[serde(skip_serializing_if = "Option::is_none")]
        previous: Option<Weather>,
    },

    #[serde(rename_all = "camelCase")]
    Terrain {
        terrain: Option<Terrain>,
        #[serde(skip_serializing_if = "Option::is_none")]
        previous: Option<Terrain>,
    },

    /// Rooms and other whole-field pseudo weather
    #[serde(rename_all = "camelCase")]
    Field { condition: String, removed: bool },

    #[serde(rename_all = "camelCase")]
    Hazard {
        condition: SideCondition,
        removed: bool,
    },

    #[serde(rename_all = "camelCase")]
    Terastallize { tera_type: String },

    #[serde(rename_all = "camelCase")]
    Item { item: String, consumed: bool },

    #[serde(rename_all = "camelCase")]
    Other { raw: String },
}

impl EventKind {
    /// Tag used in the serialized `type` field
    pub fn tag(&self) -> &'static str {
        match self {
            EventKind::Move { .. } => "move",
            EventKind::Switch { .. } => "switch",
            EventKind::Faint { .. } => "faint",
            EventKind::Damage { .. } => "damage",
            EventKind::Heal { .. } => "heal",
            EventKind::Boost { .. } => "boost",
            EventKind::Status { .. } => "status",
            EventKind::Weather { .. } => "weather",
            EventKind::Terrain { .. } => "terrain",
            EventKind::Field { .. } => "field",
            EventKind::Hazard { .. } => "hazard",
            EventKind::Terastallize { .. } => "terastallize",
            EventKind::Item { .. } => "item",
            EventKind::Other { .. } => "other",
        }
    }
}

/// One classified log line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleEvent {
    #[serde(flatten)]
    pub kind: EventKind,

    /// Acting pokemon's display name (empty for field-wide events)
    pub pokemon: String,

    /// Short verb phrase, e.g. the move name or "switched in"
    pub action: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<EventResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    #[serde(rename = "playerSide", skip_serializing_if = "Option::is_none")]
    pub side: Option<Player>,
}

impl BattleEvent {
    pub fn new(kind: EventKind, pokemon: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            kind,
            pokemon: pokemon.into(),
            action: action.into(),
            target: None,
            result: None,
            details: None,
            side: None,
        }
    }

    pub fn with_side(mut self, side: Player) -> Self {
        self.side = Some(side);
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Raise the result if `incoming` ranks higher than what is recorded
    pub fn annotate(&mut self, incoming: EventResult) {
        self.result = Some(EventResult::merge(self.result, incoming));
    }

    /// Unclassified line kept for completeness
    pub fn other(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self::new(EventKind::Other { raw: raw.clone() }, "", raw)
    }

    pub fn is_move(&self) -> bool {
        matches!(self.kind, EventKind::Move { .. })
    }
}
