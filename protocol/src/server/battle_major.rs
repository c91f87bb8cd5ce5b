//! Major battle action message parsers
//!
//! These are the primary actions in battle: moves, switches, faints, etc.

use super::battle::{parse_details, parse_from, parse_hp_status, parse_pokemon, PokemonIdent};
use super::ServerMessage;
use anyhow::Result;

/// Parse |move|POKEMON|MOVE|TARGET with optional tags
pub fn parse_move(parts: &[&str]) -> Result<ServerMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let move_name = parts
        .get(3)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow::anyhow!("Missing move name"))?
        .to_string();
    let target = parts.get(4).and_then(|s| PokemonIdent::parse(s));

    let mut miss = false;
    let mut still = false;
    let mut spread = false;

    for part in parts.iter().skip(5) {
        if *part == "[miss]" {
            miss = true;
        } else if *part == "[still]" {
            still = true;
        } else if part.starts_with("[spread]") {
            spread = true;
        }
    }

    Ok(ServerMessage::Move {
        pokemon,
        move_name,
        target,
        miss,
        still,
        spread,
        from: parse_from(parts),
    })
}

/// Parse |switch|POKEMON|DETAILS|HP STATUS
pub fn parse_switch(parts: &[&str]) -> Result<ServerMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let details = parse_details(parts, 3);
    let hp_status = parse_hp_status(parts, 4);

    Ok(ServerMessage::Switch {
        pokemon,
        details,
        hp_status,
    })
}

/// Parse |drag|POKEMON|DETAILS|HP STATUS
pub fn parse_drag(parts: &[&str]) -> Result<ServerMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let details = parse_details(parts, 3);
    let hp_status = parse_hp_status(parts, 4);

    Ok(ServerMessage::Drag {
        pokemon,
        details,
        hp_status,
    })
}

/// Parse |replace|POKEMON|DETAILS|HP STATUS
pub fn parse_replace(parts: &[&str]) -> Result<ServerMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let details = parse_details(parts, 3);
    let hp_status = parse_hp_status(parts, 4);

    Ok(ServerMessage::Replace {
        pokemon,
        details,
        hp_status,
    })
}

/// Parse |detailschange|POKEMON|DETAILS|HP STATUS
pub fn parse_detailschange(parts: &[&str]) -> Result<ServerMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let details = parse_details(parts, 3);
    let hp_status = parse_hp_status(parts, 4);

    Ok(ServerMessage::DetailsChange {
        pokemon,
        details,
        hp_status,
    })
}

/// Parse |cant|POKEMON|REASON or |cant|POKEMON|REASON|MOVE
pub fn parse_cant(parts: &[&str]) -> Result<ServerMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let reason = parts.get(3).unwrap_or(&"").to_string();
    let move_name = parts.get(4).map(|s| s.to_string());

    Ok(ServerMessage::Cant {
        pokemon,
        reason,
        move_name,
    })
}

/// Parse |faint|POKEMON
pub fn parse_faint(parts: &[&str]) -> Result<ServerMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    Ok(ServerMessage::Faint(pokemon))
}
