//! Shared types for battle protocol messages

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// One of the two players in a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    #[serde(rename = "player1")]
    P1,
    #[serde(rename = "player2")]
    P2,
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::P1, Player::P2];

    /// Parse a protocol player id ("p1", "p2")
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "p1" => Some(Player::P1),
            "p2" => Some(Player::P2),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Player::P1 => "p1",
            Player::P2 => "p2",
        }
    }

    /// Identifier used in analysis output ("player1", "player2")
    pub fn label(&self) -> &'static str {
        match self {
            Player::P1 => "player1",
            Player::P2 => "player2",
        }
    }

    pub fn opponent(&self) -> Player {
        match self {
            Player::P1 => Player::P2,
            Player::P2 => Player::P1,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Player::P1 => 0,
            Player::P2 => 1,
        }
    }

    fn from_prefix(s: &str) -> Option<Self> {
        if s.starts_with("p1") {
            Some(Player::P1)
        } else if s.starts_with("p2") {
            Some(Player::P2)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Pokemon identifier in the form "POSITION: NAME" (e.g., "p1a: Pikachu")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonIdent {
    /// Player who owns this pokemon
    pub player: Player,
    /// Position letter (a, b, c for active slots, or None if inactive)
    pub position: Option<char>,
    /// Pokemon's name/nickname
    pub name: String,
}

impl PokemonIdent {
    /// Parse a pokemon ID string like "p1a: Pikachu" or "p1: Pikachu"
    pub fn parse(s: &str) -> Option<Self> {
        let (pos_part, name) = s.split_once(": ")?;
        let player = Player::from_prefix(pos_part)?;
        let position = pos_part.chars().nth(2);

        if name.is_empty() {
            return None;
        }

        Some(PokemonIdent {
            player,
            position,
            name: name.to_string(),
        })
    }

    /// Active slot index (a = 0, b = 1, c = 2)
    pub fn slot(&self) -> Option<usize> {
        match self.position? {
            'a' => Some(0),
            'b' => Some(1),
            'c' => Some(2),
            _ => None,
        }
    }
}

impl std::fmt::Display for PokemonIdent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.position {
            Some(pos) => write!(f, "{}{}: {}", self.player.as_str(), pos, self.name),
            None => write!(f, "{}: {}", self.player.as_str(), self.name),
        }
    }
}

/// Pokemon details string (species, level, gender, shiny, tera)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PokemonDetails {
    pub species: String,
    pub level: Option<u8>,
    pub gender: Option<char>,
    pub shiny: bool,
    pub tera_type: Option<String>,
}

impl PokemonDetails {
    /// Parse a details string like "Pikachu, L50, M, shiny" or "Urshifu-*"
    pub fn parse(s: &str) -> Self {
        let mut details = PokemonDetails::default();
        let mut parts = s.split(", ");

        if let Some(species) = parts.next() {
            details.species = species.trim().to_string();
        }

        for part in parts {
            if let Some(level_str) = part.strip_prefix('L') {
                details.level = level_str.parse().ok();
            } else if part == "M" {
                details.gender = Some('M');
            } else if part == "F" {
                details.gender = Some('F');
            } else if part == "shiny" {
                details.shiny = true;
            } else if let Some(tera) = part.strip_prefix("tera:") {
                details.tera_type = Some(tera.to_string());
            }
        }

        details
    }
}

/// HP and status condition (e.g., "100/100", "50/100 slp", "0 fnt")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HpStatus {
    /// Current HP (as raw value or percentage depending on context)
    pub current: u32,
    /// Max HP (if known)
    pub max: Option<u32>,
    /// Status condition (slp, par, brn, psn, tox, frz, fnt)
    pub status: Option<String>,
}

impl HpStatus {
    /// Parse an HP status string like "100/100", "50/100 slp", or "0 fnt"
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split_whitespace();
        let hp_part = parts.next()?;
        let status = parts.next().map(|s| s.to_string());

        if let Some((current_str, max_str)) = hp_part.split_once('/') {
            Some(HpStatus {
                current: current_str.parse().ok()?,
                max: Some(max_str.parse().ok()?),
                status,
            })
        } else {
            Some(HpStatus {
                current: hp_part.parse().ok()?,
                max: None,
                status,
            })
        }
    }

    /// Whether this reading reports the pokemon as fainted
    pub fn is_fainted(&self) -> bool {
        self.current == 0 || self.status.as_deref() == Some("fnt")
    }

    /// HP as a 0-100 percentage, rounding to nearest and never reporting
    /// 0 for a pokemon that is still standing
    pub fn percent(&self) -> u32 {
        if self.is_fainted() {
            return 0;
        }
        match self.max {
            Some(0) => 0,
            Some(max) => {
                let pct = (self.current * 100 + max / 2) / max;
                pct.clamp(1, 100)
            }
            None => self.current.min(100),
        }
    }
}

/// Game type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    Singles,
    Doubles,
    Triples,
}

impl GameType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "singles" => Some(GameType::Singles),
            "doubles" => Some(GameType::Doubles),
            "triples" => Some(GameType::Triples),
            _ => None,
        }
    }

    /// Number of active slots per side
    pub fn active_slots(&self) -> usize {
        match self {
            GameType::Singles => 1,
            GameType::Doubles => 2,
            GameType::Triples => 3,
        }
    }
}

/// Stat abbreviation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
    Accuracy,
    Evasion,
}

impl Stat {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "atk" => Some(Stat::Atk),
            "def" => Some(Stat::Def),
            "spa" => Some(Stat::Spa),
            "spd" => Some(Stat::Spd),
            "spe" => Some(Stat::Spe),
            "accuracy" => Some(Stat::Accuracy),
            "evasion" => Some(Stat::Evasion),
            _ => None,
        }
    }

    /// Protocol abbreviation, as accepted by [`Stat::parse`]
    pub fn id(&self) -> &'static str {
        match self {
            Stat::Atk => "atk",
            Stat::Def => "def",
            Stat::Spa => "spa",
            Stat::Spd => "spd",
            Stat::Spe => "spe",
            Stat::Accuracy => "accuracy",
            Stat::Evasion => "evasion",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stat::Atk => "Attack",
            Stat::Def => "Defense",
            Stat::Spa => "Sp. Atk",
            Stat::Spd => "Sp. Def",
            Stat::Spe => "Speed",
            Stat::Accuracy => "accuracy",
            Stat::Evasion => "evasiveness",
        }
    }
}

/// Side of the field (for side conditions), e.g. "p1: Alice"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Side {
    pub player: Player,
    pub raw: String,
}

impl Side {
    pub fn parse(s: &str) -> Option<Self> {
        let player = Player::from_prefix(s)?;

        Some(Side {
            player,
            raw: s.to_string(),
        })
    }
}

/// Helper to parse a pokemon identifier from message parts
pub fn parse_pokemon(parts: &[&str], index: usize) -> Result<PokemonIdent, anyhow::Error> {
    parts
        .get(index)
        .and_then(|s| PokemonIdent::parse(s))
        .ok_or_else(|| ParseError::MissingField("pokemon".to_string()).into())
}

/// Helper to parse PokemonDetails from message parts
pub fn parse_details(parts: &[&str], index: usize) -> PokemonDetails {
    parts
        .get(index)
        .map(|s| PokemonDetails::parse(s))
        .unwrap_or_default()
}

/// Helper to parse HpStatus from message parts
pub fn parse_hp_status(parts: &[&str], index: usize) -> Option<HpStatus> {
    parts.get(index).and_then(|s| HpStatus::parse(s))
}

/// Value of a `[from] EFFECT` tag, if present
pub fn parse_from(parts: &[&str]) -> Option<String> {
    parts
        .iter()
        .find_map(|p| p.strip_prefix("[from]").map(|s| s.trim().to_string()))
}

/// Pokemon named by an `[of] POKEMON` tag, if present
pub fn parse_of(parts: &[&str]) -> Option<PokemonIdent> {
    parts
        .iter()
        .find_map(|p| p.strip_prefix("[of]"))
        .and_then(|s| PokemonIdent::parse(s.trim()))
}
