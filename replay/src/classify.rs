//! Event classification
//!
//! Maps each typed protocol line to a [`BattleEvent`], a marker that
//! annotates the turn's most recent move, or nothing at all for lines
//! whose only effect is on battle metadata. Classification reads the
//! tracker as it stood *before* the line is applied: whether a pokemon
//! had already fainted, what its HP was, which slot it fills.

use vgccorner_battle::dex::to_id;
use vgccorner_battle::{
    BattleEvent, BoardTracker, Effectiveness, EventKind, EventResult, MoveImpact, PokemonState,
    SideCondition, SpeedControl, Status, Terrain, Weather,
};
use vgccorner_protocol::{HpStatus, Player, PokemonDetails, PokemonIdent, ServerMessage, Stat};

/// What a single line turned into
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Classified {
    Event(BattleEvent),
    /// Outcome marker for the latest move (`-crit`, `-miss`, ...)
    Marker(Marker),
    /// Metadata or bookkeeping only
    Absorbed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Marker {
    Critical,
    Effectiveness(Effectiveness),
    Miss,
    Fail,
}

pub(crate) fn classify(msg: &ServerMessage, raw: &str, tracker: &BoardTracker) -> Classified {
    match msg {
        ServerMessage::BattlePlayer { .. }
        | ServerMessage::TeamSize { .. }
        | ServerMessage::GameType(_)
        | ServerMessage::Gen(_)
        | ServerMessage::Tier(_)
        | ServerMessage::Rated(_)
        | ServerMessage::Rule(_)
        | ServerMessage::ClearPoke
        | ServerMessage::Poke { .. }
        | ServerMessage::TeamPreview(_)
        | ServerMessage::BattleStart
        | ServerMessage::Timestamp(_)
        | ServerMessage::Turn(_)
        | ServerMessage::Upkeep
        | ServerMessage::Win(_)
        | ServerMessage::Tie => Classified::Absorbed,

        ServerMessage::Move {
            pokemon,
            move_name,
            target,
            miss,
            still: _,
            spread,
            from: _,
        } => {
            let mut event = BattleEvent::new(
                EventKind::Move {
                    move_name: move_name.clone(),
                    target_side: target.as_ref().map(|t| t.player),
                    critical: false,
                    effectiveness: None,
                    missed: *miss,
                    failed: false,
                    hit: false,
                    spread: *spread,
                    impact: initial_impact(move_name),
                },
                pokemon.name.clone(),
                move_name.clone(),
            )
            .with_side(pokemon.player);
            if let Some(target) = target {
                event = event.with_target(target.name.clone());
            }
            if *miss {
                event.annotate(EventResult::Miss);
            }
            Classified::Event(event)
        }

        ServerMessage::Switch {
            pokemon,
            details,
            hp_status,
        } => Classified::Event(switch_event(tracker, pokemon, details, hp_status.as_ref(), false)),

        ServerMessage::Drag {
            pokemon,
            details,
            hp_status,
        } => Classified::Event(switch_event(tracker, pokemon, details, hp_status.as_ref(), true)),

        ServerMessage::Faint(pokemon) => {
            let known = tracker.find_pokemon(pokemon.player, &pokemon.name);
            if known.is_some_and(|p| p.fainted) {
                // Already fainted through a zero-HP damage line
                return Classified::Absorbed;
            }
            let remaining = tracker
                .get_side(pokemon.player)
                .map_or(0, |side| side.total_left().saturating_sub(1));
            Classified::Event(
                BattleEvent::new(EventKind::Faint { remaining }, pokemon.name.clone(), "fainted")
                    .with_side(pokemon.player),
            )
        }

        ServerMessage::Damage {
            pokemon,
            hp_status,
            from,
            of: _,
        } => match hp_status {
            Some(hp) => Classified::Event(damage_event(tracker, pokemon, hp, from.clone())),
            None => Classified::Event(BattleEvent::other(raw)),
        },

        ServerMessage::Heal {
            pokemon,
            hp_status,
            from,
            of: _,
        } => match hp_status {
            Some(hp) => Classified::Event(heal_event(tracker, pokemon, hp, from.clone())),
            None => Classified::Event(BattleEvent::other(raw)),
        },

        ServerMessage::SetHp { pokemon, hp_status } => {
            let Some(hp) = hp_status else {
                return Classified::Event(BattleEvent::other(raw));
            };
            let before = tracker
                .find_pokemon(pokemon.player, &pokemon.name)
                .map_or(100, PokemonState::hp_percent);
            if hp.percent() < before {
                Classified::Event(damage_event(tracker, pokemon, hp, None))
            } else {
                Classified::Event(heal_event(tracker, pokemon, hp, None))
            }
        }

        ServerMessage::Status {
            pokemon,
            status,
            from: _,
        } => match Status::from_protocol(status) {
            Some(status) => {
                let previous = tracker
                    .find_pokemon(pokemon.player, &pokemon.name)
                    .and_then(|p| p.status);
                Classified::Event(
                    BattleEvent::new(
                        EventKind::Status {
                            status: Some(status),
                            previous,
                        },
                        pokemon.name.clone(),
                        format!("was inflicted with {status}"),
                    )
                    .with_side(pokemon.player),
                )
            }
            None => Classified::Event(BattleEvent::other(raw)),
        },

        ServerMessage::CureStatus { pokemon, status: _ } => {
            let previous = tracker
                .find_pokemon(pokemon.player, &pokemon.name)
                .and_then(|p| p.status);
            Classified::Event(
                BattleEvent::new(
                    EventKind::Status {
                        status: None,
                        previous,
                    },
                    pokemon.name.clone(),
                    "was cured",
                )
                .with_side(pokemon.player),
            )
        }

        ServerMessage::Boost {
            pokemon,
            stat,
            amount,
        } => Classified::Event(boost_event(pokemon, *stat, *amount)),

        ServerMessage::Unboost {
            pokemon,
            stat,
            amount,
        } => Classified::Event(boost_event(pokemon, *stat, amount.saturating_neg())),

        ServerMessage::Weather {
            weather,
            upkeep,
            from: _,
            of,
        } => {
            if *upkeep {
                return Classified::Absorbed;
            }
            let next = Weather::from_protocol(weather);
            let previous = tracker.field.weather;
            if next == previous {
                return Classified::Absorbed;
            }
            let action = match (next, previous) {
                (Some(w), _) => format!("{w} started"),
                (None, Some(w)) => format!("{w} ended"),
                (None, None) => "weather cleared".to_string(),
            };
            let event = BattleEvent::new(
                EventKind::Weather {
                    weather: next,
                    previous,
                },
                of.as_ref().map(|p| p.name.clone()).unwrap_or_default(),
                action,
            );
            Classified::Event(match of {
                Some(source) => event.with_side(source.player),
                None => event,
            })
        }

        ServerMessage::FieldStart { condition, of } => {
            let event = match Terrain::from_protocol(condition) {
                Some(terrain) => BattleEvent::new(
                    EventKind::Terrain {
                        terrain: Some(terrain),
                        previous: tracker.field.terrain,
                    },
                    "",
                    format!("{terrain} started"),
                ),
                None => BattleEvent::new(
                    EventKind::Field {
                        condition: effect_name(condition).to_string(),
                        removed: false,
                    },
                    "",
                    format!("{} started", effect_name(condition)),
                ),
            };
            Classified::Event(match of {
                Some(source) => BattleEvent {
                    pokemon: source.name.clone(),
                    ..event
                },
                None => event,
            })
        }

        ServerMessage::FieldEnd(condition) => Classified::Event(match Terrain::from_protocol(condition) {
            Some(terrain) => BattleEvent::new(
                EventKind::Terrain {
                    terrain: None,
                    previous: tracker.field.terrain,
                },
                "",
                format!("{terrain} ended"),
            ),
            None => BattleEvent::new(
                EventKind::Field {
                    condition: effect_name(condition).to_string(),
                    removed: true,
                },
                "",
                format!("{} ended", effect_name(condition)),
            ),
        }),

        ServerMessage::SideStart { side, condition } => {
            side_condition_event(raw, side.player, condition, false)
        }

        ServerMessage::SideEnd { side, condition } => {
            side_condition_event(raw, side.player, condition, true)
        }

        ServerMessage::Crit(_) => Classified::Marker(Marker::Critical),
        ServerMessage::SuperEffective(_) => {
            Classified::Marker(Marker::Effectiveness(Effectiveness::SuperEffective))
        }
        ServerMessage::Resisted(_) => {
            Classified::Marker(Marker::Effectiveness(Effectiveness::NotVeryEffective))
        }
        ServerMessage::Immune(_) => Classified::Marker(Marker::Effectiveness(Effectiveness::Immune)),
        ServerMessage::Miss { .. } => Classified::Marker(Marker::Miss),
        ServerMessage::Fail { .. } => Classified::Marker(Marker::Fail),

        ServerMessage::Item {
            pokemon,
            item,
            from: _,
        } => Classified::Event(item_event(pokemon, item, false)),

        ServerMessage::EndItem {
            pokemon,
            item,
            from: _,
            eat: _,
        } => Classified::Event(item_event(pokemon, item, true)),

        ServerMessage::Terastallize { pokemon, tera_type } => Classified::Event(
            BattleEvent::new(
                EventKind::Terastallize {
                    tera_type: tera_type.clone(),
                },
                pokemon.name.clone(),
                format!("terastallized into {tera_type}"),
            )
            .with_side(pokemon.player),
        ),

        // Blank and bare `|` spacer lines
        ServerMessage::Raw(line) if line.trim_matches('|').trim().is_empty() => Classified::Absorbed,

        // Known lines with no modelled effect are still kept on the turn
        _ => Classified::Event(BattleEvent::other(raw)),
    }
}

fn switch_event(
    tracker: &BoardTracker,
    pokemon: &PokemonIdent,
    details: &PokemonDetails,
    hp_status: Option<&HpStatus>,
    forced: bool,
) -> BattleEvent {
    let slot = pokemon.slot().unwrap_or(0);
    let lead = tracker.turn == 0;
    let replacement = !lead
        && !forced
        && tracker
            .get_side(pokemon.player)
            .is_some_and(|side| side.active(slot).is_none());
    let (hp, max_hp) = hp_status.map_or((100, 100), |hp| {
        (hp.current, hp.max.unwrap_or(100))
    });

    let action = if forced { "was dragged out" } else { "switched in" };
    BattleEvent::new(
        EventKind::Switch {
            species: details.species.clone(),
            level: details.level.unwrap_or(100),
            slot,
            hp,
            max_hp,
            gender: details.gender,
            shiny: details.shiny,
            forced,
            replacement,
            lead,
        },
        pokemon.name.clone(),
        action,
    )
    .with_side(pokemon.player)
}

/// Roster entry as the tracker knew it before this line
fn known<'a>(tracker: &'a BoardTracker, pokemon: &PokemonIdent) -> Option<&'a PokemonState> {
    tracker.find_pokemon(pokemon.player, &pokemon.name)
}

fn reading(tracker: &BoardTracker, pokemon: &PokemonIdent, hp: &HpStatus) -> (u32, u32) {
    let max = hp
        .max
        .or_else(|| known(tracker, pokemon).and_then(|p| p.hp_max))
        .unwrap_or(100);
    let current = if hp.is_fainted() { 0 } else { hp.current };
    (current, max)
}

fn damage_event(
    tracker: &BoardTracker,
    pokemon: &PokemonIdent,
    hp: &HpStatus,
    source: Option<String>,
) -> BattleEvent {
    let (current, max_hp) = reading(tracker, pokemon, hp);
    let before = known(tracker, pokemon).map_or(100, PokemonState::hp_percent);
    let after = HpStatus {
        current,
        max: Some(max_hp),
        status: hp.status.clone(),
    }
    .percent();

    let action = match &source {
        Some(source) => format!("took damage from {}", effect_name(source)),
        None => "took damage".to_string(),
    };
    BattleEvent::new(
        EventKind::Damage {
            amount: before.saturating_sub(after),
            hp: current,
            max_hp,
            source,
        },
        pokemon.name.clone(),
        action,
    )
    .with_side(pokemon.player)
}

fn heal_event(
    tracker: &BoardTracker,
    pokemon: &PokemonIdent,
    hp: &HpStatus,
    source: Option<String>,
) -> BattleEvent {
    let (current, max_hp) = reading(tracker, pokemon, hp);
    let before = known(tracker, pokemon).map_or(100, PokemonState::hp_percent);
    let after = HpStatus {
        current,
        max: Some(max_hp),
        status: None,
    }
    .percent();

    let action = match &source {
        Some(source) => format!("restored HP from {}", effect_name(source)),
        None => "restored HP".to_string(),
    };
    BattleEvent::new(
        EventKind::Heal {
            amount: after.saturating_sub(before),
            hp: current,
            max_hp,
            source,
        },
        pokemon.name.clone(),
        action,
    )
    .with_side(pokemon.player)
}

fn side_condition_event(
    raw: &str,
    player: Player,
    condition: &str,
    removed: bool,
) -> Classified {
    let Some(condition) = SideCondition::from_protocol(condition) else {
        return Classified::Event(BattleEvent::other(raw));
    };
    let action = if removed {
        format!("{condition} ended")
    } else {
        format!("{condition} started")
    };
    Classified::Event(
        BattleEvent::new(EventKind::Hazard { condition, removed }, "", action).with_side(player),
    )
}

fn boost_event(pokemon: &PokemonIdent, stat: Stat, stages: i8) -> BattleEvent {
    let action = match stages {
        0 => format!("{} did not change", stat.as_str()),
        s if s > 0 => format!("{} rose by {s}", stat.as_str()),
        s => format!("{} fell by {}", stat.as_str(), s.unsigned_abs()),
    };
    BattleEvent::new(
        EventKind::Boost {
            stat: stat.id().to_string(),
            stages,
        },
        pokemon.name.clone(),
        action,
    )
    .with_side(pokemon.player)
}

fn item_event(pokemon: &PokemonIdent, item: &str, consumed: bool) -> BattleEvent {
    let action = if consumed {
        format!("used its {item}")
    } else {
        format!("revealed {item}")
    };
    BattleEvent::new(
        EventKind::Item {
            item: item.to_string(),
            consumed,
        },
        pokemon.name.clone(),
        action,
    )
    .with_side(pokemon.player)
}

/// Strip "move: " / "item: " style prefixes from effect names
pub(crate) fn effect_name(effect: &str) -> &str {
    effect
        .split_once(": ")
        .map_or(effect, |(_, name)| name)
        .trim()
}

const PROTECTION_MOVES: &[&str] = &[
    "protect",
    "detect",
    "spikyshield",
    "kingsshield",
    "banefulbunker",
    "silktrap",
    "burningbulwark",
    "obstruct",
    "maxguard",
];

fn speed_control(move_id: &str) -> Option<SpeedControl> {
    match move_id {
        "fakeout" => Some(SpeedControl::Flinch),
        "trickroom" => Some(SpeedControl::TrickRoom),
        "tailwind" => Some(SpeedControl::Tailwind),
        "icywind" | "electroweb" => Some(SpeedControl::SpeedDrop),
        "thunderwave" => Some(SpeedControl::Paralysis),
        _ => None,
    }
}

/// Impact known from the move alone; the rest is filled in as the
/// following lines arrive
pub(crate) fn initial_impact(move_name: &str) -> MoveImpact {
    let id = to_id(move_name);
    MoveImpact {
        protect: PROTECTION_MOVES.contains(&id.as_str()),
        speed_control: speed_control(&id),
        ..MoveImpact::default()
    }
}

/// Move-specific note shown with the outcome
fn move_note(move_name: &str, landed: bool) -> Option<&'static str> {
    let id = to_id(move_name);
    if PROTECTION_MOVES.contains(&id.as_str()) {
        return landed.then_some("Protected");
    }
    let note = match id.as_str() {
        "fakeout" => "Target flinched",
        "trickroom" => "Dimensions twisted",
        "tailwind" => "Tailwind blew",
        "icywind" | "electroweb" => "Speed dropped",
        "thunderwave" => "Target was paralyzed",
        _ => return None,
    };
    landed.then_some(note)
}

/// Free-text impact summary for a move event
pub(crate) fn describe_move(kind: &EventKind) -> Option<String> {
    let EventKind::Move {
        move_name,
        critical,
        effectiveness,
        missed,
        failed,
        ..
    } = kind
    else {
        return None;
    };

    let mut parts = Vec::new();
    if *critical {
        parts.push("Critical Hit");
    }
    if let Some(effectiveness) = effectiveness {
        parts.push(effectiveness.message());
    }
    if *missed {
        parts.push("But it missed");
    }
    if *failed {
        parts.push("But it failed");
    }
    let landed = !missed && !failed && *effectiveness != Some(Effectiveness::Immune);
    if let Some(note) = move_note(move_name, landed) {
        parts.push(note);
    }

    (!parts.is_empty()).then(|| parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vgccorner_protocol::parse_server_message;

    fn tracker() -> BoardTracker {
        let mut tracker = BoardTracker::new();
        for line in [
            "|player|p1|Alice|1|",
            "|player|p2|Bob|2|",
            "|gametype|doubles",
        ] {
            tracker.update(&parse_server_message(line).unwrap());
        }
        for line in [
            "|switch|p1a: Incineroar|Incineroar, L50, M|100/100",
            "|switch|p2a: Rillaboom|Rillaboom, L50, F|100/100",
        ] {
            let msg = parse_server_message(line).unwrap();
            let Classified::Event(event) = classify(&msg, line, &tracker) else {
                panic!("switch should classify as an event");
            };
            tracker.apply_event(&event).unwrap();
        }
        tracker.begin_turn(1);
        tracker
    }

    fn run(tracker: &BoardTracker, line: &str) -> Classified {
        classify(&parse_server_message(line).unwrap(), line, tracker)
    }

    fn event(tracker: &BoardTracker, line: &str) -> BattleEvent {
        match run(tracker, line) {
            Classified::Event(event) => event,
            other => panic!("expected an event for {line}, got {other:?}"),
        }
    }

    #[test]
    fn test_metadata_lines_are_absorbed() {
        let tracker = tracker();
        assert_eq!(run(&tracker, "|upkeep"), Classified::Absorbed);
        assert_eq!(run(&tracker, "|t:|1700000000"), Classified::Absorbed);
        assert_eq!(run(&tracker, "|win|Alice"), Classified::Absorbed);
    }

    #[test]
    fn test_move_event() {
        let tracker = tracker();
        let moved = event(&tracker, "|move|p1a: Incineroar|Fake Out|p2a: Rillaboom");
        assert_eq!(moved.side, Some(Player::P1));
        assert_eq!(moved.pokemon, "Incineroar");
        assert_eq!(moved.action, "Fake Out");
        assert_eq!(moved.target.as_deref(), Some("Rillaboom"));
        assert!(matches!(
            moved.kind,
            EventKind::Move {
                target_side: Some(Player::P2),
                ..
            }
        ));
        assert_eq!(moved.result, None);
    }

    #[test]
    fn test_move_with_miss_tag() {
        let tracker = tracker();
        let missed = event(
            &tracker,
            "|move|p1a: Incineroar|Flare Blitz|p2a: Rillaboom|[miss]",
        );
        assert_eq!(missed.result, Some(EventResult::Miss));
    }

    #[test]
    fn test_result_markers() {
        let tracker = tracker();
        assert_eq!(
            run(&tracker, "|-crit|p2a: Rillaboom"),
            Classified::Marker(Marker::Critical)
        );
        assert_eq!(
            run(&tracker, "|-supereffective|p2a: Rillaboom"),
            Classified::Marker(Marker::Effectiveness(Effectiveness::SuperEffective))
        );
        assert_eq!(
            run(&tracker, "|-immune|p2a: Rillaboom"),
            Classified::Marker(Marker::Effectiveness(Effectiveness::Immune))
        );
    }

    #[test]
    fn test_damage_amount_uses_prior_hp() {
        let tracker = tracker();
        let damage = event(&tracker, "|-damage|p2a: Rillaboom|45/100");
        match damage.kind {
            EventKind::Damage {
                amount, hp, source, ..
            } => {
                assert_eq!(amount, 55);
                assert_eq!(hp, 45);
                assert_eq!(source, None);
            }
            other => panic!("unexpected kind {other:?}"),
        }
        assert_eq!(damage.side, Some(Player::P2));
    }

    #[test]
    fn test_damage_to_zero() {
        let tracker = tracker();
        let ko = event(&tracker, "|-damage|p2a: Rillaboom|0 fnt");
        assert!(matches!(
            ko.kind,
            EventKind::Damage {
                amount: 100,
                hp: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_redundant_faint_is_absorbed() {
        let mut tracker = tracker();
        let ko = event(&tracker, "|-damage|p2a: Rillaboom|0 fnt");
        let implicit = tracker.apply_event(&ko).unwrap();
        assert!(implicit.is_some());
        assert_eq!(run(&tracker, "|faint|p2a: Rillaboom"), Classified::Absorbed);
    }

    #[test]
    fn test_status_records_previous() {
        let tracker = tracker();
        let burn = event(&tracker, "|-status|p2a: Rillaboom|brn");
        assert!(matches!(
            burn.kind,
            EventKind::Status {
                status: Some(Status::Burn),
                previous: None
            }
        ));
    }

    #[test]
    fn test_weather_upkeep_is_absorbed() {
        let tracker = tracker();
        assert_eq!(
            run(&tracker, "|-weather|SunnyDay|[upkeep]"),
            Classified::Absorbed
        );
        let drought = event(
            &tracker,
            "|-weather|SunnyDay|[from] ability: Drought|[of] p1a: Incineroar",
        );
        assert!(matches!(
            drought.kind,
            EventKind::Weather {
                weather: Some(Weather::Sun),
                previous: None
            }
        ));
    }

    #[test]
    fn test_terrain_and_rooms() {
        let tracker = tracker();
        let terrain = event(&tracker, "|-fieldstart|move: Grassy Terrain");
        assert!(matches!(
            terrain.kind,
            EventKind::Terrain {
                terrain: Some(Terrain::Grassy),
                ..
            }
        ));

        let room = event(&tracker, "|-fieldstart|move: Trick Room|[of] p1a: Incineroar");
        assert_eq!(room.pokemon, "Incineroar");
        assert!(matches!(
            room.kind,
            EventKind::Field { ref condition, removed: false } if condition == "Trick Room"
        ));
    }

    #[test]
    fn test_unmodelled_lines_become_other() {
        let tracker = tracker();
        let chat = event(&tracker, "|j|☆Alice");
        assert!(matches!(chat.kind, EventKind::Other { .. }));
        let activate = event(&tracker, "|-activate|p1a: Incineroar|move: Protect");
        assert!(matches!(activate.kind, EventKind::Other { .. }));
    }

    #[test]
    fn test_stat_changes() {
        let tracker = tracker();
        let boost = event(&tracker, "|-boost|p1a: Incineroar|atk|1");
        assert_eq!(
            boost.kind,
            EventKind::Boost {
                stat: "atk".to_string(),
                stages: 1
            }
        );
        assert_eq!(boost.action, "Attack rose by 1");
        assert_eq!(boost.side, Some(Player::P1));

        let drop = event(&tracker, "|-unboost|p2a: Rillaboom|spe|2");
        assert_eq!(
            drop.kind,
            EventKind::Boost {
                stat: "spe".to_string(),
                stages: -2
            }
        );
        assert_eq!(drop.action, "Speed fell by 2");
    }

    #[test]
    fn test_initial_impact() {
        let protect = initial_impact("Protect");
        assert!(protect.protect);
        assert_eq!(protect.speed_control, None);

        assert_eq!(initial_impact("Icy Wind").speed_control, Some(SpeedControl::SpeedDrop));
        assert_eq!(initial_impact("Fake Out").speed_control, Some(SpeedControl::Flinch));
        assert_eq!(initial_impact("Knock Off"), MoveImpact::default());
    }

    #[test]
    fn test_describe_move() {
        let kind = EventKind::Move {
            move_name: "Fake Out".to_string(),
            target_side: Some(Player::P2),
            critical: true,
            effectiveness: Some(Effectiveness::SuperEffective),
            missed: false,
            failed: false,
            hit: true,
            spread: false,
            impact: MoveImpact::default(),
        };
        assert_eq!(
            describe_move(&kind).as_deref(),
            Some("Critical Hit, It's super effective, Target flinched")
        );

        let failed = EventKind::Move {
            move_name: "Protect".to_string(),
            target_side: None,
            critical: false,
            effectiveness: None,
            missed: false,
            failed: true,
            hit: false,
            spread: false,
            impact: MoveImpact::default(),
        };
        assert_eq!(describe_move(&failed).as_deref(), Some("But it failed"));

        let plain = EventKind::Move {
            move_name: "Knock Off".to_string(),
            target_side: Some(Player::P2),
            critical: false,
            effectiveness: None,
            missed: false,
            failed: false,
            hit: true,
            spread: false,
            impact: MoveImpact::default(),
        };
        assert_eq!(describe_move(&plain), None);
    }

    #[test]
    fn test_effect_name() {
        assert_eq!(effect_name("item: Life Orb"), "Life Orb");
        assert_eq!(effect_name("Stealth Rock"), "Stealth Rock");
    }
}
