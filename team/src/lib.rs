//! Team archetype classification for doubles formats.
//!
//! Works from whatever a replay discloses about a team: species, revealed
//! moves, abilities and items. Nothing is inferred beyond that, so a team
//! whose Trick Room setter never clicked the move is not a Trick Room team
//! as far as this crate is concerned.
//!
//! ```
//! use vgccorner_team::{classify_team, Archetype, TeamMember};
//!
//! let team = vec![
//!     TeamMember::new("Torkoal").with_ability("Drought"),
//!     TeamMember::new("Lilligant-Hisui").with_moves(["Leaf Storm", "After You"]),
//! ];
//! let classification = classify_team(&team);
//! assert_eq!(classification.archetype, Archetype::SunOffense);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// What is known about one team member
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamMember {
    pub species: String,
    /// Nickname or species, as the log names it
    pub name: String,
    pub ability: Option<String>,
    pub item: Option<String>,
    pub moves: Vec<String>,
}

impl TeamMember {
    pub fn new(species: impl Into<String>) -> Self {
        let species = species.into();
        Self {
            name: species.clone(),
            species,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_ability(mut self, ability: impl Into<String>) -> Self {
        self.ability = Some(ability.into());
        self
    }

    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.item = Some(item.into());
        self
    }

    pub fn with_moves<I, S>(mut self, moves: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.moves = moves.into_iter().map(Into::into).collect();
        self
    }
}

/// Weather a team sets up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherKind {
    Sun,
    Rain,
    Sand,
    Snow,
}

/// Team archetypes, in classification priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Archetype {
    HardTrickRoom,
    TailRoom,
    SunOffense,
    RainOffense,
    BalanceBros,
    PsySpam,
    TailwindHyperOffense,
    Tailwind,
    TrickRoom,
    Sun,
    Rain,
    Sand,
    Snow,
    Unclassified,
}

impl Archetype {
    pub const ALL: [Archetype; 14] = [
        Archetype::HardTrickRoom,
        Archetype::TailRoom,
        Archetype::SunOffense,
        Archetype::RainOffense,
        Archetype::BalanceBros,
        Archetype::PsySpam,
        Archetype::TailwindHyperOffense,
        Archetype::Tailwind,
        Archetype::TrickRoom,
        Archetype::Sun,
        Archetype::Rain,
        Archetype::Sand,
        Archetype::Snow,
        Archetype::Unclassified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::HardTrickRoom => "Hard Trick Room",
            Archetype::TailRoom => "TailRoom",
            Archetype::SunOffense => "Sun Offense",
            Archetype::RainOffense => "Rain Offense",
            Archetype::BalanceBros => "Balance Bros",
            Archetype::PsySpam => "Psy-Spam",
            Archetype::TailwindHyperOffense => "Tailwind Hyper Offense",
            Archetype::Tailwind => "Tailwind",
            Archetype::TrickRoom => "Trick Room",
            Archetype::Sun => "Sun",
            Archetype::Rain => "Rain",
            Archetype::Sand => "Sand",
            Archetype::Snow => "Snow",
            Archetype::Unclassified => "Unclassified",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Archetype::HardTrickRoom => {
                "A team built around Trick Room with multiple setters for reliability"
            }
            Archetype::TailRoom => {
                "A flexible team that can operate under both Tailwind and Trick Room"
            }
            Archetype::SunOffense => {
                "An offensive team utilizing sun weather to power up Fire-type attacks"
            }
            Archetype::RainOffense => {
                "An offensive team utilizing rain weather to power up Water-type attacks"
            }
            Archetype::BalanceBros => {
                "A balanced team featuring Incineroar and Rillaboom for defensive synergy"
            }
            Archetype::PsySpam => {
                "A team focused on Psychic Terrain with Expanding Force for massive spread damage"
            }
            Archetype::TailwindHyperOffense => {
                "An aggressive team using Tailwind and Choice items for overwhelming speed and power"
            }
            Archetype::Tailwind => "A speed-based team utilizing Tailwind for speed control",
            Archetype::TrickRoom => "A team utilizing Trick Room for speed control",
            Archetype::Sun => "A team utilizing sun weather",
            Archetype::Rain => "A team utilizing rain weather",
            Archetype::Sand => "A team utilizing sandstorm weather",
            Archetype::Snow => "A team utilizing snow weather",
            Archetype::Unclassified => "A team that doesn't fit standard VGC archetypes",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Archetype {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown archetype: {0}")]
pub struct UnknownArchetype(pub String);

impl FromStr for Archetype {
    type Err = UnknownArchetype;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Archetype::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownArchetype(s.to_string()))
    }
}

/// Result of [`classify_team`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamClassification {
    pub archetype: Archetype,
    pub description: &'static str,
    pub tags: Vec<String>,
    pub trick_room_users: Vec<String>,
    pub tailwind_users: Vec<String>,
    pub weather_setters: Vec<String>,
    pub psychic_terrain_users: Vec<String>,
    pub choice_users: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherKind>,
}

/// Lowercase with spaces and punctuation removed
fn to_id(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn ability_weather(ability: &str) -> Option<WeatherKind> {
    match to_id(ability).as_str() {
        "drought" => Some(WeatherKind::Sun),
        "drizzle" => Some(WeatherKind::Rain),
        "sandstream" => Some(WeatherKind::Sand),
        "snowwarning" => Some(WeatherKind::Snow),
        _ => None,
    }
}

fn is_choice_item(item: &str) -> bool {
    matches!(
        to_id(item).as_str(),
        "choicespecs" | "choiceband" | "choicescarf"
    )
}

/// Classify a team by its revealed speed control, weather and cores
pub fn classify_team(team: &[TeamMember]) -> TeamClassification {
    let mut c = TeamClassification {
        archetype: Archetype::Unclassified,
        description: "",
        tags: Vec::new(),
        trick_room_users: Vec::new(),
        tailwind_users: Vec::new(),
        weather_setters: Vec::new(),
        psychic_terrain_users: Vec::new(),
        choice_users: Vec::new(),
        weather: None,
    };

    let mut has_incineroar = false;
    let mut has_rillaboom = false;
    let mut expanding_force_users = 0usize;

    for member in team {
        let species = to_id(&member.species);
        has_incineroar |= species.contains("incineroar");
        has_rillaboom |= species.contains("rillaboom");

        // Abilities set weather unconditionally; the last setter wins
        if let Some(weather) = member.ability.as_deref().and_then(ability_weather) {
            c.weather = Some(weather);
            c.weather_setters.push(member.name.clone());
        }

        if member.item.as_deref().is_some_and(is_choice_item) {
            c.choice_users.push(member.name.clone());
        }

        for mv in &member.moves {
            match to_id(mv).as_str() {
                "trickroom" => c.trick_room_users.push(member.name.clone()),
                "tailwind" => c.tailwind_users.push(member.name.clone()),
                "sunnyday" => {
                    c.weather = c.weather.or(Some(WeatherKind::Sun));
                    c.weather_setters.push(member.name.clone());
                }
                "raindance" => {
                    c.weather = c.weather.or(Some(WeatherKind::Rain));
                    c.weather_setters.push(member.name.clone());
                }
                "psychicterrain" => c.psychic_terrain_users.push(member.name.clone()),
                "expandingforce" => expanding_force_users += 1,
                _ => {}
            }
        }
    }

    let trick_room = !c.trick_room_users.is_empty();
    let tailwind = !c.tailwind_users.is_empty();
    let choice = !c.choice_users.is_empty();
    let balance_bros = has_incineroar && has_rillaboom;
    let psy_spam = !c.psychic_terrain_users.is_empty() && expanding_force_users > 0;

    c.archetype = if c.trick_room_users.len() >= 2 {
        Archetype::HardTrickRoom
    } else if tailwind && trick_room {
        Archetype::TailRoom
    } else if c.weather == Some(WeatherKind::Sun) {
        Archetype::SunOffense
    } else if c.weather == Some(WeatherKind::Rain) {
        Archetype::RainOffense
    } else if balance_bros {
        Archetype::BalanceBros
    } else if psy_spam {
        Archetype::PsySpam
    } else if tailwind && choice {
        Archetype::TailwindHyperOffense
    } else if tailwind {
        Archetype::Tailwind
    } else if trick_room {
        Archetype::TrickRoom
    } else {
        match c.weather {
            Some(WeatherKind::Sand) => Archetype::Sand,
            Some(WeatherKind::Snow) => Archetype::Snow,
            Some(WeatherKind::Sun) => Archetype::Sun,
            Some(WeatherKind::Rain) => Archetype::Rain,
            None => Archetype::Unclassified,
        }
    };
    c.description = c.archetype.description();

    let flags = [
        (trick_room, "Trick Room"),
        (tailwind, "Tailwind"),
        (choice, "Choice Items"),
        (balance_bros, "Balance Bros"),
        (!c.psychic_terrain_users.is_empty(), "Psychic Terrain"),
    ];
    c.tags = flags
        .into_iter()
        .filter(|(on, _)| *on)
        .map(|(_, tag)| tag.to_string())
        .collect();
    if let Some(weather) = c.weather {
        let tag = match weather {
            WeatherKind::Sun => "Sun",
            WeatherKind::Rain => "Rain",
            WeatherKind::Sand => "Sand",
            WeatherKind::Snow => "Snow",
        };
        c.tags.push(tag.to_string());
    }

    c
}
