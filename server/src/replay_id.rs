//! Replay identifiers
//!
//! Public ids look like `gen9vgc2024regg-2171234567`; private ones carry a
//! password suffix, `gen9vgc2024regg-2171234567-k3b9x2pw`. Full replay URLs
//! are reduced to the id before validation.

use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReplayId {
    id: String,
    private: bool,
}

impl ReplayId {
    pub fn as_str(&self) -> &str {
        &self.id
    }

    pub fn is_private(&self) -> bool {
        self.private
    }
}

impl fmt::Display for ReplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl FromStr for ReplayId {
    type Err = ApiError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let id = reduce_url(input.trim());
        let invalid = || ApiError::InvalidInput(format!("Invalid replay id: {input}"));

        let parts: Vec<&str> = id.split('-').collect();
        let (format, number, password) = match parts.as_slice() {
            [format, number] => (*format, *number, None),
            [format, number, password] => (*format, *number, Some(*password)),
            _ => return Err(invalid()),
        };

        if !is_id_segment(format) || number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        if let Some(password) = password {
            let secret = password.strip_suffix("pw").ok_or_else(invalid)?;
            if !is_id_segment(secret) {
                return Err(invalid());
            }
        }

        Ok(ReplayId {
            id: id.to_string(),
            private: password.is_some(),
        })
    }
}

fn is_id_segment(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
}

/// `https://replay.pokemonshowdown.com/<id>.log?p2#x` → `<id>`
fn reduce_url(input: &str) -> &str {
    let without_query = input.split(['?', '#']).next().unwrap_or_default();
    let last = without_query
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    last.strip_suffix(".log")
        .or_else(|| last.strip_suffix(".json"))
        .unwrap_or(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_id() {
        let id: ReplayId = "gen9vgc2024regg-2171234567".parse().unwrap();
        assert_eq!(id.as_str(), "gen9vgc2024regg-2171234567");
        assert!(!id.is_private());
    }

    #[test]
    fn test_private_id() {
        let id: ReplayId = "gen9vgc2024regg-2171234567-k3b9x2pw".parse().unwrap();
        assert!(id.is_private());
        assert_eq!(id.to_string(), "gen9vgc2024regg-2171234567-k3b9x2pw");
    }

    #[test]
    fn test_urls_reduce_to_id() {
        for url in [
            "https://replay.pokemonshowdown.com/gen9vgc2024regg-2171234567",
            "https://replay.pokemonshowdown.com/gen9vgc2024regg-2171234567/",
            "https://replay.pokemonshowdown.com/gen9vgc2024regg-2171234567.log",
            "replay.pokemonshowdown.com/gen9vgc2024regg-2171234567?p2",
            "  gen9vgc2024regg-2171234567  ",
        ] {
            let id: ReplayId = url.parse().unwrap();
            assert_eq!(id.as_str(), "gen9vgc2024regg-2171234567", "{url}");
        }
    }

    #[test]
    fn test_rejects_invalid() {
        for bad in [
            "",
            "gen9vgc2024regg",
            "gen9vgc2024regg-",
            "gen9vgc2024regg-abc",
            "Gen9VGC-123",
            "gen9vgc-123-secret",
            "gen9vgc-123-pw",
            "gen9vgc-123-abcpw-4",
            "gen9 vgc-123",
        ] {
            let err = bad.parse::<ReplayId>().unwrap_err();
            assert_eq!(err.code(), "INVALID_REQUEST", "{bad}");
        }
    }
}
