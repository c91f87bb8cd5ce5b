//! Typed parsing of individual battle log lines

mod battle;
mod battle_init;
mod battle_major;
mod battle_minor;
mod battle_progress;

pub use battle::{
    parse_details, parse_from, parse_hp_status, parse_of, parse_pokemon, GameType, HpStatus,
    Player, PokemonDetails, PokemonIdent, Side, Stat,
};

use anyhow::Result;

use crate::tokenizer::unescape_line;

#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    // === Battle initialization ===
    BattlePlayer {
        player: Player,
        username: String,
        avatar: String,
        rating: Option<u32>,
    },
    TeamSize {
        player: Player,
        size: u8,
    },
    GameType(GameType),
    Gen(u8),
    Tier(String),
    Rated(Option<String>),
    Rule(String),
    ClearPoke,
    Poke {
        player: Player,
        details: PokemonDetails,
        has_item: bool,
    },
    TeamPreview(Option<u8>),
    BattleStart,
    Timestamp(i64),

    // === Battle progress ===
    Turn(u32),
    Upkeep,
    Win(String),
    Tie,

    // === Major actions ===
    Move {
        pokemon: PokemonIdent,
        move_name: String,
        target: Option<PokemonIdent>,
        miss: bool,
        still: bool,
        spread: bool,
        from: Option<String>,
    },
    Switch {
        pokemon: PokemonIdent,
        details: PokemonDetails,
        hp_status: Option<HpStatus>,
    },
    Drag {
        pokemon: PokemonIdent,
        details: PokemonDetails,
        hp_status: Option<HpStatus>,
    },
    Replace {
        pokemon: PokemonIdent,
        details: PokemonDetails,
        hp_status: Option<HpStatus>,
    },
    DetailsChange {
        pokemon: PokemonIdent,
        details: PokemonDetails,
        hp_status: Option<HpStatus>,
    },
    Faint(PokemonIdent),
    Cant {
        pokemon: PokemonIdent,
        reason: String,
        move_name: Option<String>,
    },

    // === Minor actions ===
    Damage {
        pokemon: PokemonIdent,
        hp_status: Option<HpStatus>,
        from: Option<String>,
        of: Option<PokemonIdent>,
    },
    Heal {
        pokemon: PokemonIdent,
        hp_status: Option<HpStatus>,
        from: Option<String>,
        of: Option<PokemonIdent>,
    },
    SetHp {
        pokemon: PokemonIdent,
        hp_status: Option<HpStatus>,
    },
    Status {
        pokemon: PokemonIdent,
        status: String,
        from: Option<String>,
    },
    CureStatus {
        pokemon: PokemonIdent,
        status: String,
    },
    CureTeam(PokemonIdent),
    Boost {
        pokemon: PokemonIdent,
        stat: Stat,
        amount: i8,
    },
    Unboost {
        pokemon: PokemonIdent,
        stat: Stat,
        amount: i8,
    },
    Weather {
        weather: String,
        upkeep: bool,
        from: Option<String>,
        of: Option<PokemonIdent>,
    },
    FieldStart {
        condition: String,
        of: Option<PokemonIdent>,
    },
    FieldEnd(String),
    SideStart {
        side: Side,
        condition: String,
    },
    SideEnd {
        side: Side,
        condition: String,
    },
    Crit(PokemonIdent),
    SuperEffective(PokemonIdent),
    Resisted(PokemonIdent),
    Immune(PokemonIdent),
    Miss {
        source: PokemonIdent,
        target: Option<PokemonIdent>,
    },
    Fail {
        pokemon: PokemonIdent,
        action: Option<String>,
    },
    Item {
        pokemon: PokemonIdent,
        item: String,
        from: Option<String>,
    },
    EndItem {
        pokemon: PokemonIdent,
        item: String,
        from: Option<String>,
        eat: bool,
    },
    Ability {
        pokemon: PokemonIdent,
        ability: String,
        from: Option<String>,
    },
    Terastallize {
        pokemon: PokemonIdent,
        tera_type: String,
    },
    Activate {
        pokemon: Option<PokemonIdent>,
        effect: String,
    },

    /// Any line whose command is not modelled above
    Raw(String),
}

/// Parse a single log line into a ServerMessage
///
/// Unknown commands and non-protocol text become [`ServerMessage::Raw`].
/// A known command whose required fields are missing or unparseable is an error.
pub fn parse_server_message(line: &str) -> Result<ServerMessage> {
    let line = unescape_line(line.trim());
    let line = line.as_ref();

    if line.is_empty() {
        return Ok(ServerMessage::Raw(String::new()));
    }

    if !line.starts_with('|') {
        return Ok(ServerMessage::Raw(line.to_string()));
    }

    let parts: Vec<&str> = line.split('|').collect();

    if parts.len() < 2 {
        return Ok(ServerMessage::Raw(line.to_string()));
    }

    match parts[1] {
        // Initialization
        "player" => battle_init::parse_player(&parts),
        "teamsize" => battle_init::parse_teamsize(&parts),
        "gametype" => battle_init::parse_gametype(&parts),
        "gen" => battle_init::parse_gen(&parts),
        "tier" => battle_init::parse_tier(&parts),
        "rated" => battle_init::parse_rated(&parts),
        "rule" => battle_init::parse_rule(&parts),
        "clearpoke" => Ok(ServerMessage::ClearPoke),
        "poke" => battle_init::parse_poke(&parts),
        "teampreview" => battle_init::parse_teampreview(&parts),
        "start" => Ok(ServerMessage::BattleStart),
        "t:" => battle_init::parse_timestamp(&parts),

        // Progress
        "turn" => battle_progress::parse_turn(&parts),
        "upkeep" => Ok(ServerMessage::Upkeep),
        "win" => battle_progress::parse_win(&parts),
        "tie" => Ok(ServerMessage::Tie),

        // Major actions
        "move" => battle_major::parse_move(&parts),
        "switch" => battle_major::parse_switch(&parts),
        "drag" => battle_major::parse_drag(&parts),
        "replace" => battle_major::parse_replace(&parts),
        "detailschange" => battle_major::parse_detailschange(&parts),
        "faint" => battle_major::parse_faint(&parts),
        "cant" => battle_major::parse_cant(&parts),

        // Minor actions
        "-damage" => battle_minor::parse_damage(&parts),
        "-heal" => battle_minor::parse_heal(&parts),
        "-sethp" => battle_minor::parse_sethp(&parts),
        "-status" => battle_minor::parse_status(&parts),
        "-curestatus" => battle_minor::parse_curestatus(&parts),
        "-cureteam" => battle_minor::parse_cureteam(&parts),
        "-boost" => battle_minor::parse_boost(&parts),
        "-unboost" => battle_minor::parse_unboost(&parts),
        "-weather" => battle_minor::parse_weather(&parts),
        "-fieldstart" => battle_minor::parse_fieldstart(&parts),
        "-fieldend" => battle_minor::parse_fieldend(&parts),
        "-sidestart" => battle_minor::parse_sidestart(&parts),
        "-sideend" => battle_minor::parse_sideend(&parts),
        "-crit" => battle_minor::parse_crit(&parts),
        "-supereffective" => battle_minor::parse_supereffective(&parts),
        "-resisted" => battle_minor::parse_resisted(&parts),
        "-immune" => battle_minor::parse_immune(&parts),
        "-miss" => battle_minor::parse_miss(&parts),
        "-fail" => battle_minor::parse_fail(&parts),
        "-item" => battle_minor::parse_item(&parts),
        "-enditem" => battle_minor::parse_enditem(&parts),
        "-ability" => battle_minor::parse_ability(&parts),
        "-terastallize" => battle_minor::parse_terastallize(&parts),
        "-activate" => battle_minor::parse_activate(&parts),

        _ => Ok(ServerMessage::Raw(line.to_string())),
    }
}
