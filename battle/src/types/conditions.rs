//! Field and side conditions

use serde::{Deserialize, Serialize};

use super::pokemon_type::Type;

/// Strip a "move: " / "ability: " prefix and squash to a lowercase id
fn normalize(s: &str) -> String {
    let clean = s
        .strip_prefix("move: ")
        .or_else(|| s.strip_prefix("ability: "))
        .unwrap_or(s);

    clean
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Weather conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Weather {
    Sun,
    Rain,
    Sand,
    Hail,
    Snow,
    HarshSun,
    HeavyRain,
    StrongWinds,
}

impl Weather {
    /// Parse from protocol string; "none" and unknown names give `None`
    pub fn from_protocol(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "sunnyday" | "sun" | "harshsunlight" => Some(Weather::Sun),
            "raindance" | "rain" => Some(Weather::Rain),
            "sandstorm" | "sand" => Some(Weather::Sand),
            "hail" => Some(Weather::Hail),
            "snow" | "snowscape" => Some(Weather::Snow),
            "desolateland" | "harshsun" => Some(Weather::HarshSun),
            "primordialsea" | "heavyrain" => Some(Weather::HeavyRain),
            "deltastream" | "strongwinds" => Some(Weather::StrongWinds),
            _ => None,
        }
    }

    /// Whether a pokemon of these types is powered up or protected by the weather
    pub fn favors(&self, types: &[Type]) -> bool {
        let favored = match self {
            Weather::Sun | Weather::HarshSun => Type::Fire,
            Weather::Rain | Weather::HeavyRain => Type::Water,
            Weather::Sand => Type::Rock,
            Weather::Hail | Weather::Snow => Type::Ice,
            Weather::StrongWinds => Type::Flying,
        };
        types.contains(&favored)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Weather::Sun => "Sun",
            Weather::Rain => "Rain",
            Weather::Sand => "Sandstorm",
            Weather::Hail => "Hail",
            Weather::Snow => "Snow",
            Weather::HarshSun => "Harsh Sun",
            Weather::HeavyRain => "Heavy Rain",
            Weather::StrongWinds => "Strong Winds",
        }
    }
}

impl std::fmt::Display for Weather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Terrain conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Terrain {
    Electric,
    Grassy,
    Misty,
    Psychic,
}

impl Terrain {
    pub fn from_protocol(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "electricterrain" => Some(Terrain::Electric),
            "grassyterrain" => Some(Terrain::Grassy),
            "mistyterrain" => Some(Terrain::Misty),
            "psychicterrain" => Some(Terrain::Psychic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Terrain::Electric => "Electric Terrain",
            Terrain::Grassy => "Grassy Terrain",
            Terrain::Misty => "Misty Terrain",
            Terrain::Psychic => "Psychic Terrain",
        }
    }
}

impl std::fmt::Display for Terrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Side conditions (hazards, screens, speed control)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum SideCondition {
    Reflect,
    LightScreen,
    AuroraVeil,

    Spikes,
    ToxicSpikes,
    StealthRock,
    StickyWeb,

    Tailwind,
    Safeguard,
    Mist,
    WideGuard,
    QuickGuard,
}

impl SideCondition {
    pub fn from_protocol(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "reflect" => Some(SideCondition::Reflect),
            "lightscreen" => Some(SideCondition::LightScreen),
            "auroraveil" => Some(SideCondition::AuroraVeil),
            "spikes" => Some(SideCondition::Spikes),
            "toxicspikes" => Some(SideCondition::ToxicSpikes),
            "stealthrock" => Some(SideCondition::StealthRock),
            "stickyweb" => Some(SideCondition::StickyWeb),
            "tailwind" => Some(SideCondition::Tailwind),
            "safeguard" => Some(SideCondition::Safeguard),
            "mist" => Some(SideCondition::Mist),
            "wideguard" => Some(SideCondition::WideGuard),
            "quickguard" => Some(SideCondition::QuickGuard),
            _ => None,
        }
    }

    /// Maximum stackable layers
    pub fn max_layers(&self) -> u8 {
        match self {
            SideCondition::Spikes => 3,
            SideCondition::ToxicSpikes => 2,
            _ => 1,
        }
    }

    pub fn is_screen(&self) -> bool {
        matches!(
            self,
            SideCondition::Reflect | SideCondition::LightScreen | SideCondition::AuroraVeil
        )
    }

    pub fn is_hazard(&self) -> bool {
        matches!(
            self,
            SideCondition::Spikes
                | SideCondition::ToxicSpikes
                | SideCondition::StealthRock
                | SideCondition::StickyWeb
        )
    }

    /// Conditions that help the side that owns them
    pub fn is_beneficial(&self) -> bool {
        self.is_screen() || *self == SideCondition::Tailwind
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SideCondition::Reflect => "Reflect",
            SideCondition::LightScreen => "Light Screen",
            SideCondition::AuroraVeil => "Aurora Veil",
            SideCondition::Spikes => "Spikes",
            SideCondition::ToxicSpikes => "Toxic Spikes",
            SideCondition::StealthRock => "Stealth Rock",
            SideCondition::StickyWeb => "Sticky Web",
            SideCondition::Tailwind => "Tailwind",
            SideCondition::Safeguard => "Safeguard",
            SideCondition::Mist => "Mist",
            SideCondition::WideGuard => "Wide Guard",
            SideCondition::QuickGuard => "Quick Guard",
        }
    }
}

impl std::fmt::Display for SideCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Layer count for a side condition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideConditionState {
    pub layers: u8,
}

impl SideConditionState {
    pub fn new() -> Self {
        Self { layers: 1 }
    }

    /// Add a layer, returns true if one was added
    pub fn add_layer(&mut self, condition: SideCondition) -> bool {
        if self.layers < condition.max_layers() {
            self.layers += 1;
            true
        } else {
            false
        }
    }
}
