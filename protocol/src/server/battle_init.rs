//! Battle initialization message parsers
//!
//! These lines make up the preamble of a replay: who is playing, the format,
//! and the team preview.

use super::battle::{GameType, Player, PokemonDetails};
use super::ServerMessage;
use anyhow::Result;

fn parse_player_id(parts: &[&str]) -> Result<Player> {
    parts
        .get(2)
        .and_then(|s| Player::parse(s))
        .ok_or_else(|| anyhow::anyhow!("Missing player"))
}

/// Parse |player|PLAYER|USERNAME|AVATAR|RATING
pub fn parse_player(parts: &[&str]) -> Result<ServerMessage> {
    let player = parse_player_id(parts)?;
    let username = parts.get(3).unwrap_or(&"").to_string();
    let avatar = parts.get(4).unwrap_or(&"").to_string();
    let rating = parts.get(5).and_then(|s| s.parse().ok());

    Ok(ServerMessage::BattlePlayer {
        player,
        username,
        avatar,
        rating,
    })
}

/// Parse |teamsize|PLAYER|NUMBER
pub fn parse_teamsize(parts: &[&str]) -> Result<ServerMessage> {
    let player = parse_player_id(parts)?;
    let size = parts
        .get(3)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| anyhow::anyhow!("Missing team size"))?;

    Ok(ServerMessage::TeamSize { player, size })
}

/// Parse |gametype|GAMETYPE
pub fn parse_gametype(parts: &[&str]) -> Result<ServerMessage> {
    let game_type = parts
        .get(2)
        .and_then(|s| GameType::parse(s))
        .ok_or_else(|| anyhow::anyhow!("Missing game type"))?;

    Ok(ServerMessage::GameType(game_type))
}

/// Parse |gen|GENNUM
pub fn parse_gen(parts: &[&str]) -> Result<ServerMessage> {
    let generation = parts
        .get(2)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| anyhow::anyhow!("Missing generation"))?;

    Ok(ServerMessage::Gen(generation))
}

/// Parse |tier|FORMATNAME
pub fn parse_tier(parts: &[&str]) -> Result<ServerMessage> {
    let format = parts.get(2).unwrap_or(&"").to_string();
    Ok(ServerMessage::Tier(format))
}

/// Parse |rated| or |rated|MESSAGE
pub fn parse_rated(parts: &[&str]) -> Result<ServerMessage> {
    let message = parts
        .get(2)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());
    Ok(ServerMessage::Rated(message))
}

/// Parse |rule|RULE: DESCRIPTION
pub fn parse_rule(parts: &[&str]) -> Result<ServerMessage> {
    let rule = parts.get(2).unwrap_or(&"").to_string();
    Ok(ServerMessage::Rule(rule))
}

/// Parse |poke|PLAYER|DETAILS|ITEM
pub fn parse_poke(parts: &[&str]) -> Result<ServerMessage> {
    let player = parse_player_id(parts)?;
    let details = parts
        .get(3)
        .map(|s| PokemonDetails::parse(s))
        .filter(|d| !d.species.is_empty())
        .ok_or_else(|| anyhow::anyhow!("Missing pokemon details"))?;
    let has_item = parts.get(4).is_some_and(|s| *s == "item");

    Ok(ServerMessage::Poke {
        player,
        details,
        has_item,
    })
}

/// Parse |teampreview or |teampreview|NUMBER
pub fn parse_teampreview(parts: &[&str]) -> Result<ServerMessage> {
    let count = parts.get(2).and_then(|s| s.parse().ok());
    Ok(ServerMessage::TeamPreview(count))
}

/// Parse |t:|UNIX_TIMESTAMP
pub fn parse_timestamp(parts: &[&str]) -> Result<ServerMessage> {
    let seconds = parts
        .get(2)
        .and_then(|s| s.trim().parse().ok())
        .ok_or_else(|| anyhow::anyhow!("Missing timestamp"))?;

    Ok(ServerMessage::Timestamp(seconds))
}
