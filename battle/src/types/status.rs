//! Non-volatile status conditions

use serde::{Deserialize, Serialize};

/// Major status (persists through switching, at most one at a time)
///
/// Serialized with the protocol's three-letter codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "brn")]
    Burn,
    #[serde(rename = "frz")]
    Freeze,
    #[serde(rename = "par")]
    Paralysis,
    #[serde(rename = "psn")]
    Poison,
    #[serde(rename = "tox")]
    BadPoison,
    #[serde(rename = "slp")]
    Sleep,
}

impl Status {
    /// Parse from protocol string ("brn", "frz", "par", "psn", "tox", "slp")
    ///
    /// "fnt" is not a status; fainting is tracked separately.
    pub fn from_protocol(s: &str) -> Option<Self> {
        match s.trim() {
            "brn" => Some(Status::Burn),
            "frz" => Some(Status::Freeze),
            "par" => Some(Status::Paralysis),
            "psn" => Some(Status::Poison),
            "tox" => Some(Status::BadPoison),
            "slp" => Some(Status::Sleep),
            _ => None,
        }
    }

    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Burn => "Burn",
            Status::Freeze => "Freeze",
            Status::Paralysis => "Paralysis",
            Status::Poison => "Poison",
            Status::BadPoison => "Toxic",
            Status::Sleep => "Sleep",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
