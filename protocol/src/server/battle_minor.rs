//! Minor battle action message parsers
//!
//! These are secondary effects in battle: damage, stat changes, status, etc.
//! In the official client, they're usually displayed in smaller font.

use super::battle::{
    parse_from, parse_hp_status, parse_of, parse_pokemon, PokemonIdent, Side, Stat,
};
use super::ServerMessage;
use anyhow::Result;

fn parse_side(parts: &[&str]) -> Result<Side> {
    parts
        .get(2)
        .and_then(|s| Side::parse(s))
        .ok_or_else(|| anyhow::anyhow!("Missing side"))
}

fn parse_stat_change(parts: &[&str]) -> Result<(PokemonIdent, Stat, i8)> {
    let pokemon = parse_pokemon(parts, 2)?;
    let stat = parts
        .get(3)
        .and_then(|s| Stat::parse(s))
        .ok_or_else(|| anyhow::anyhow!("Missing stat"))?;
    let amount = parts
        .get(4)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| anyhow::anyhow!("Missing amount"))?;

    Ok((pokemon, stat, amount))
}

/// Parse |-damage|POKEMON|HP STATUS with optional [from]EFFECT|[of]SOURCE
pub fn parse_damage(parts: &[&str]) -> Result<ServerMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let hp_status = parse_hp_status(parts, 3);

    Ok(ServerMessage::Damage {
        pokemon,
        hp_status,
        from: parse_from(parts),
        of: parse_of(parts),
    })
}

/// Parse |-heal|POKEMON|HP STATUS with optional [from]EFFECT|[of]SOURCE
pub fn parse_heal(parts: &[&str]) -> Result<ServerMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let hp_status = parse_hp_status(parts, 3);

    Ok(ServerMessage::Heal {
        pokemon,
        hp_status,
        from: parse_from(parts),
        of: parse_of(parts),
    })
}

/// Parse |-sethp|POKEMON|HP
pub fn parse_sethp(parts: &[&str]) -> Result<ServerMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let hp_status = parse_hp_status(parts, 3);

    Ok(ServerMessage::SetHp { pokemon, hp_status })
}

/// Parse |-status|POKEMON|STATUS
pub fn parse_status(parts: &[&str]) -> Result<ServerMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let status = parts.get(3).unwrap_or(&"").to_string();

    Ok(ServerMessage::Status {
        pokemon,
        status,
        from: parse_from(parts),
    })
}

/// Parse |-curestatus|POKEMON|STATUS
pub fn parse_curestatus(parts: &[&str]) -> Result<ServerMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let status = parts.get(3).unwrap_or(&"").to_string();

    Ok(ServerMessage::CureStatus { pokemon, status })
}

/// Parse |-cureteam|POKEMON
pub fn parse_cureteam(parts: &[&str]) -> Result<ServerMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    Ok(ServerMessage::CureTeam(pokemon))
}

/// Parse |-boost|POKEMON|STAT|AMOUNT
pub fn parse_boost(parts: &[&str]) -> Result<ServerMessage> {
    let (pokemon, stat, amount) = parse_stat_change(parts)?;
    Ok(ServerMessage::Boost {
        pokemon,
        stat,
        amount,
    })
}

/// Parse |-unboost|POKEMON|STAT|AMOUNT
pub fn parse_unboost(parts: &[&str]) -> Result<ServerMessage> {
    let (pokemon, stat, amount) = parse_stat_change(parts)?;
    Ok(ServerMessage::Unboost {
        pokemon,
        stat,
        amount,
    })
}

/// Parse |-weather|WEATHER with optional [upkeep], [from]EFFECT, [of]SOURCE
pub fn parse_weather(parts: &[&str]) -> Result<ServerMessage> {
    let weather = parts.get(2).unwrap_or(&"none").to_string();
    let upkeep = parts.iter().any(|p| *p == "[upkeep]");

    Ok(ServerMessage::Weather {
        weather,
        upkeep,
        from: parse_from(parts),
        of: parse_of(parts),
    })
}

/// Parse |-fieldstart|CONDITION with optional [of]SOURCE
pub fn parse_fieldstart(parts: &[&str]) -> Result<ServerMessage> {
    let condition = parts.get(2).unwrap_or(&"").to_string();
    Ok(ServerMessage::FieldStart {
        condition,
        of: parse_of(parts),
    })
}

/// Parse |-fieldend|CONDITION
pub fn parse_fieldend(parts: &[&str]) -> Result<ServerMessage> {
    let condition = parts.get(2).unwrap_or(&"").to_string();
    Ok(ServerMessage::FieldEnd(condition))
}

/// Parse |-sidestart|SIDE|CONDITION
pub fn parse_sidestart(parts: &[&str]) -> Result<ServerMessage> {
    let side = parse_side(parts)?;
    let condition = parts.get(3).unwrap_or(&"").to_string();

    Ok(ServerMessage::SideStart { side, condition })
}

/// Parse |-sideend|SIDE|CONDITION
pub fn parse_sideend(parts: &[&str]) -> Result<ServerMessage> {
    let side = parse_side(parts)?;
    let condition = parts.get(3).unwrap_or(&"").to_string();

    Ok(ServerMessage::SideEnd { side, condition })
}

/// Parse |-crit|POKEMON
pub fn parse_crit(parts: &[&str]) -> Result<ServerMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    Ok(ServerMessage::Crit(pokemon))
}

/// Parse |-supereffective|POKEMON
pub fn parse_supereffective(parts: &[&str]) -> Result<ServerMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    Ok(ServerMessage::SuperEffective(pokemon))
}

/// Parse |-resisted|POKEMON
pub fn parse_resisted(parts: &[&str]) -> Result<ServerMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    Ok(ServerMessage::Resisted(pokemon))
}

/// Parse |-immune|POKEMON
pub fn parse_immune(parts: &[&str]) -> Result<ServerMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    Ok(ServerMessage::Immune(pokemon))
}

/// Parse |-miss|SOURCE|TARGET
pub fn parse_miss(parts: &[&str]) -> Result<ServerMessage> {
    let source = parse_pokemon(parts, 2)?;
    let target = parts.get(3).and_then(|s| PokemonIdent::parse(s));

    Ok(ServerMessage::Miss { source, target })
}

/// Parse |-fail|POKEMON|ACTION
pub fn parse_fail(parts: &[&str]) -> Result<ServerMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let action = parts.get(3).map(|s| s.to_string());

    Ok(ServerMessage::Fail { pokemon, action })
}

/// Parse |-item|POKEMON|ITEM with optional [from]EFFECT
pub fn parse_item(parts: &[&str]) -> Result<ServerMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let item = parts.get(3).unwrap_or(&"").to_string();

    Ok(ServerMessage::Item {
        pokemon,
        item,
        from: parse_from(parts),
    })
}

/// Parse |-enditem|POKEMON|ITEM with optional [from]EFFECT or [eat]
pub fn parse_enditem(parts: &[&str]) -> Result<ServerMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let item = parts.get(3).unwrap_or(&"").to_string();
    let eat = parts.iter().any(|p| *p == "[eat]");

    Ok(ServerMessage::EndItem {
        pokemon,
        item,
        from: parse_from(parts),
        eat,
    })
}

/// Parse |-ability|POKEMON|ABILITY with optional [from]EFFECT
pub fn parse_ability(parts: &[&str]) -> Result<ServerMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let ability = parts.get(3).unwrap_or(&"").to_string();

    Ok(ServerMessage::Ability {
        pokemon,
        ability,
        from: parse_from(parts),
    })
}

/// Parse |-terastallize|POKEMON|TYPE
pub fn parse_terastallize(parts: &[&str]) -> Result<ServerMessage> {
    let pokemon = parse_pokemon(parts, 2)?;
    let tera_type = parts
        .get(3)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow::anyhow!("Missing tera type"))?
        .to_string();

    Ok(ServerMessage::Terastallize { pokemon, tera_type })
}

/// Parse |-activate|EFFECT (with optional Pokemon and other fields)
pub fn parse_activate(parts: &[&str]) -> Result<ServerMessage> {
    // First part might be a Pokemon or an effect
    let pokemon = parts.get(2).and_then(|s| PokemonIdent::parse(s));
    let effect = if pokemon.is_some() {
        parts.get(3).unwrap_or(&"").to_string()
    } else {
        parts.get(2).unwrap_or(&"").to_string()
    };

    Ok(ServerMessage::Activate { pokemon, effect })
}
