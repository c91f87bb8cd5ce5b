use vgccorner_replay::{
    analyze_log, ActionKind, AnalysisError, AnalysisOptions, EventKind, EventResult, MomentType,
    MoveImpact, Player, Status, Winner,
};

const LOG: &str = r#"|j|☆Alice
|j|☆Bob
|t:|1700000000
|gametype|singles
|player|p1|Alice|1|1500
|player|p2|Bob|2|1480
|teamsize|p1|3
|teamsize|p2|3
|gen|9
|tier|[Gen 9] Battle Stadium Singles
|rated|
|rule|Species Clause: Limit one of each Pokémon
|clearpoke
|poke|p1|Charizard, L50, M|item
|poke|p1|Blastoise, L50, M|item
|poke|p1|Pikachu, L50, F|item
|poke|p2|Venusaur, L50, F|item
|poke|p2|Incineroar, L50, M|item
|poke|p2|Amoonguss, L50, F|item
|teampreview
|
|start
|switch|p1a: Charizard|Charizard, L50, M|100/100
|switch|p2a: Venusaur|Venusaur, L50, F|100/100
|turn|1
|
|t:|1700000020
|move|p1a: Charizard|Flamethrower|p2a: Venusaur
|-supereffective|p2a: Venusaur
|-damage|p2a: Venusaur|30/100
|move|p2a: Venusaur|Sleep Powder|p1a: Charizard
|-status|p1a: Charizard|slp
|
|upkeep
|turn|2
|
|cant|p1a: Charizard|slp
|move|p2a: Venusaur|Giga Drain|p1a: Charizard
|-resisted|p1a: Charizard
|-damage|p1a: Charizard|85/100
|-heal|p2a: Venusaur|37/100|[from] drain|[of] p1a: Charizard
|
|upkeep
|turn|3
|
|-curestatus|p1a: Charizard|slp|[msg]
|move|p1a: Charizard|Flamethrower|p2a: Venusaur
|-supereffective|p2a: Venusaur
|-crit|p2a: Venusaur
|-damage|p2a: Venusaur|0 fnt
|faint|p2a: Venusaur
|
|upkeep
|switch|p2a: Incineroar|Incineroar, L50, M|100/100
|turn|4
|
|switch|p1a: Blastoise|Blastoise, L50, M|100/100
|move|p2a: Incineroar|Flare Blitz|p1a: Blastoise
|-resisted|p1a: Blastoise
|-damage|p1a: Blastoise|78/100
|-damage|p2a: Incineroar|93/100|[from] Recoil
|
|upkeep
|turn|5
|
|move|p1a: Blastoise|Hydro Pump|p2a: Incineroar
|-supereffective|p2a: Incineroar
|-damage|p2a: Incineroar|0 fnt
|faint|p2a: Incineroar
|
|upkeep
|switch|p2a: Amoonguss|Amoonguss, L50, F|100/100
|turn|6
|
|move|p2a: Amoonguss|Spore|p1a: Blastoise
|-status|p1a: Blastoise|slp
|cant|p1a: Blastoise|slp
|
|upkeep
|turn|7
|
|switch|p1a: Charizard|Charizard, L50, M|85/100
|move|p2a: Amoonguss|Pollen Puff|p1a: Charizard
|-damage|p1a: Charizard|70/100
|
|upkeep
|turn|8
|
|move|p1a: Charizard|Air Slash|p2a: Amoonguss
|-supereffective|p2a: Amoonguss
|-damage|p2a: Amoonguss|0 fnt
|faint|p2a: Amoonguss
|
|t:|1700000300
|win|Alice
"#;

fn analyze(raw: &str) -> vgccorner_replay::Analysis {
    analyze_log(raw, &AnalysisOptions::default()).expect("log should analyse")
}

#[test]
fn test_turns_are_gapless_and_one_based() {
    let battle = analyze(LOG).battle;
    assert_eq!(battle.turns.len(), 8);
    for (i, turn) in battle.turns.iter().enumerate() {
        assert_eq!(turn.turn_number, i as u32 + 1);
    }
    assert_eq!(battle.stats.total_turns, 8);
}

#[test]
fn test_scores_in_range() {
    let battle = analyze(LOG).battle;
    for turn in &battle.turns {
        let score = turn.position_score.expect("both rosters are known");
        assert!((0.0..=100.0).contains(&score.player1_score));
        assert!((0.0..=100.0).contains(&score.player2_score));
    }
    let last = battle.turns.last().unwrap().position_score.unwrap();
    assert_eq!(last.player2_score, 0.0);
}

#[test]
fn test_roster_invariant_every_turn() {
    let battle = analyze(LOG).battle;
    let mut previous_left = [usize::MAX, usize::MAX];
    for turn in &battle.turns {
        for player in Player::BOTH {
            let side = turn.state_after.side(player);
            assert_eq!(side.roster_size, 3);
            assert_eq!(side.losses + side.total_left, side.roster_size);
            assert!(side.total_left <= previous_left[player.index()]);
            previous_left[player.index()] = side.total_left;
        }
    }
}

#[test]
fn test_fainting_is_irreversible() {
    let battle = analyze(LOG).battle;
    let mut fainted: Vec<(Player, String)> = Vec::new();
    for turn in &battle.turns {
        for player in Player::BOTH {
            for entry in &turn.state_after.side(player).roster {
                let key = (player, entry.name.clone());
                if fainted.contains(&key) {
                    assert!(entry.fainted, "{} came back on turn {}", entry.name, turn.turn_number);
                    assert_eq!(entry.hp_percent, 0);
                } else if entry.fainted {
                    fainted.push(key);
                }
            }
        }
    }
    assert_eq!(fainted.len(), 3);
}

#[test]
fn test_ko_moment_and_losses() {
    let battle = analyze(LOG).battle;
    let before = battle.turns[1].state_after.side(Player::P2);
    let after = battle.turns[2].state_after.side(Player::P2);
    assert_eq!((before.losses, before.total_left), (0, 3));
    assert_eq!((after.losses, after.total_left), (1, 2));

    let ko = battle
        .key_moments
        .iter()
        .find(|m| m.kind == MomentType::Ko && m.turn_number == 3)
        .expect("ko moment on turn 3");
    assert_eq!(ko.description, "Bob's Venusaur fainted");
    assert_eq!(ko.significance, 6);

    // Last pokemon standing ranks first
    assert_eq!(battle.key_moments[0].kind, MomentType::Ko);
    assert_eq!(battle.key_moments[0].turn_number, 8);
    assert_eq!(battle.key_moments[0].significance, 10);
}

#[test]
fn test_key_moments_are_ranked() {
    let battle = analyze(LOG).battle;
    for pair in battle.key_moments.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.significance > b.significance
                || (a.significance == b.significance && a.turn_number <= b.turn_number)
        );
    }
    // Leads never produce switch moments
    assert!(battle
        .key_moments
        .iter()
        .filter(|m| m.kind == MomentType::Switch)
        .all(|m| m.turn_number >= 3));
}

#[test]
fn test_turning_points_bounded_and_surfaced() {
    let battle = analyze(LOG).battle;
    let points = &battle.stats.turning_points;
    assert!(points.len() <= battle.turns.len() - 1);
    for point in points {
        assert!(point.momentum_shift.abs() > 15.0);
        assert!((1..=10).contains(&point.significance));
        assert!(battle
            .key_moments
            .iter()
            .any(|m| m.kind == MomentType::TurningPoint && m.turn_number == point.turn_number));
    }
}

#[test]
fn test_move_annotations() {
    let battle = analyze(LOG).battle;
    let turn3 = &battle.turns[2];
    let flamethrower = turn3.events.iter().find(|e| e.is_move()).unwrap();
    assert_eq!(flamethrower.result, Some(EventResult::Faint));
    assert_eq!(
        flamethrower.details.as_deref(),
        Some("Critical Hit, It's super effective")
    );

    // The explicit |faint| after 0 HP is not counted twice
    let faints = turn3
        .events
        .iter()
        .filter(|e| matches!(e.kind, EventKind::Faint { .. }))
        .count();
    assert_eq!(faints, 1);

    let giga_drain = battle.turns[1].events.iter().find(|e| e.is_move()).unwrap();
    assert_eq!(giga_drain.result, Some(EventResult::NotVeryEffective));
}

fn impact_of(event: &vgccorner_replay::BattleEvent) -> &MoveImpact {
    match &event.kind {
        EventKind::Move { impact, .. } => impact,
        other => panic!("expected a move, got {other:?}"),
    }
}

#[test]
fn test_move_impacts() {
    let battle = analyze(LOG).battle;

    let turn1: Vec<_> = battle.turns[0].events.iter().filter(|e| e.is_move()).collect();
    assert_eq!(impact_of(turn1[0]).damage_dealt, 70);
    assert_eq!(impact_of(turn1[1]).status_inflicted, Some(Status::Sleep));
    assert_eq!(impact_of(turn1[1]).damage_dealt, 0);

    let giga_drain = battle.turns[1].events.iter().find(|e| e.is_move()).unwrap();
    assert_eq!(impact_of(giga_drain).damage_dealt, 15);
    assert_eq!(impact_of(giga_drain).healing_done, 7);

    let ko = battle.turns[2].events.iter().find(|e| e.is_move()).unwrap();
    assert_eq!(impact_of(ko).fainted, vec!["Venusaur".to_string()]);

    // Recoil lands on the user and is not part of the impact
    let flare_blitz = battle.turns[3].events.iter().find(|e| e.is_move()).unwrap();
    assert_eq!(impact_of(flare_blitz).damage_dealt, 22);

    // Actions carry the same record
    match &battle.turns[1].actions[0].kind {
        ActionKind::Move { impact, .. } => assert_eq!(impact.healing_done, 7),
        other => panic!("unexpected action {other:?}"),
    }
}

#[test]
fn test_damage_and_healing_attribution() {
    let battle = analyze(LOG).battle;
    assert_eq!(battle.turns[0].damage_dealt[&Player::P1], 70);
    assert_eq!(battle.turns[0].damage_dealt[&Player::P2], 0);
    assert_eq!(battle.turns[1].damage_dealt[&Player::P2], 15);
    assert_eq!(battle.turns[1].healing_done[&Player::P2], 7);

    // Recoil is not damage dealt by the opponent
    assert_eq!(battle.turns[3].damage_dealt[&Player::P2], 22);
    assert_eq!(battle.turns[3].damage_dealt[&Player::P1], 0);
    // Venusaur healed to 37 before the KO
    assert_eq!(battle.stats.player2_stats.damage_taken, 70 + 37 + 7 + 93 + 100);
}

#[test]
fn test_actions_follow_log_order() {
    let battle = analyze(LOG).battle;
    let actions = &battle.turns[3].actions;
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0].player, Player::P1);
    assert!(matches!(&actions[0].kind, ActionKind::Switch { switch_to } if switch_to == "Blastoise"));
    assert_eq!(actions[1].order, 1);
    assert!(matches!(&actions[1].kind, ActionKind::Move { move_name, .. } if move_name == "Flare Blitz"));
}

#[test]
fn test_board_snapshot_contents() {
    let battle = analyze(LOG).battle;
    let p1 = battle.turns[6].state_after.side(Player::P1);
    assert_eq!(p1.active.len(), 1);
    assert_eq!(p1.active[0].species, "Charizard");
    assert!(p1.active[0].is_lead);
    assert_eq!(p1.active[0].hp, 70);

    // Turn 1's snapshot still shows Venusaur standing
    let p2 = battle.turns[0].state_after.side(Player::P2);
    assert_eq!(p2.alive.len(), 3);
}

#[test]
fn test_summary_metadata() {
    let analysis = analyze(LOG);
    let battle = analysis.battle;
    assert_eq!(battle.winner, Winner::Player1);
    assert_eq!(battle.format, "[Gen 9] Battle Stadium Singles");
    assert_eq!(battle.timestamp.timestamp(), 1_700_000_000);
    assert_eq!(battle.duration, 300);
    assert_eq!(battle.generation, 9);
    assert!(battle.rated);
    assert_eq!(battle.player1.name, "Alice");
    assert_eq!(battle.player1.rating, Some(1500));
    assert_eq!(battle.player2.losses, 3);
    assert_eq!(battle.player2.total_left, 0);

    let charizard = &battle.player1.team[0];
    assert_eq!(charizard.moves, vec!["Flamethrower", "Air Slash"]);
    assert_eq!(charizard.current_hp, 70);
    assert_eq!(charizard.happiness, 255);
    assert!(!charizard.fainted);

    assert_eq!(battle.stats.move_frequency["flamethrower"], 2);
    assert_eq!(battle.stats.switches, 4);
    assert_eq!(analysis.diagnostics.skipped_lines, 0);
    assert_eq!(analysis.diagnostics.unparsed_lines, 0);
}

#[test]
fn test_battle_id() {
    let with_id = analyze_log(LOG, &AnalysisOptions::with_replay_id("gen9bss-1234")).unwrap();
    assert_eq!(with_id.battle.id, "gen9bss-1234");

    let a = analyze(LOG).battle.id;
    let b = analyze(LOG).battle.id;
    assert_eq!(a, b);
    assert_ne!(a, analyze(&LOG.replace("|win|Alice", "|win|Bob")).battle.id);
}

#[test]
fn test_idempotent_output() {
    let first = serde_json::to_string(&analyze(LOG).battle).unwrap();
    let second = serde_json::to_string(&analyze(LOG).battle).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_serialized_shape() {
    let json = serde_json::to_value(analyze(LOG).battle).unwrap();
    assert_eq!(json["winner"], "player1");
    assert_eq!(json["turns"][0]["turnNumber"], 1);
    assert!(json["turns"][0]["stateAfter"]["player1"]["active"].is_array());
    assert_eq!(json["turns"][0]["positionScore"]["momentumPlayer"], "player1");
    assert_eq!(json["turns"][0]["events"][0]["type"], "move");
    assert_eq!(json["turns"][0]["events"][0]["playerSide"], "player1");
    assert_eq!(json["player1"]["team"][0]["currentHP"], 70);
    assert_eq!(json["player1"]["archetype"]["archetype"], "Unclassified");
    assert!(json["keyMoments"].is_array());
    assert!(json["stats"]["moveFrequency"].is_object());
}

#[test]
fn test_explicit_winner_beats_scores() {
    let battle = analyze(&LOG.replace("|win|Alice", "|win|Bob")).battle;
    let last = battle.turns.last().unwrap().position_score.unwrap();
    assert!(last.player1_score > last.player2_score);
    assert_eq!(battle.winner, Winner::Player2);
}

#[test]
fn test_tie_and_implicit_winner() {
    let tie = analyze(&LOG.replace("|win|Alice", "|tie")).battle;
    assert_eq!(tie.winner, Winner::Draw);

    let implicit = analyze(&LOG.replace("|win|Alice\n", "")).battle;
    assert_eq!(implicit.winner, Winner::Player1);
}

#[test]
fn test_incomplete_log() {
    let cut = LOG.find("|turn|8").unwrap();
    let err = analyze_log(&LOG[..cut], &AnalysisOptions::default()).unwrap_err();
    assert_eq!(err, AnalysisError::IncompleteLog);
    assert_eq!(err.code(), "INCOMPLETE_LOG");
}

#[test]
fn test_unparseable_line_is_skipped() {
    let noisy = LOG.replace("|turn|4\n", "|turn|4\n|-damage|nobody|50/100\n");
    let clean = analyze(LOG);
    let analysis = analyze(&noisy);
    assert_eq!(analysis.diagnostics.unparsed_lines, 1);
    assert_eq!(analysis.battle.turns, clean.battle.turns);
}

#[test]
fn test_unknown_pokemon_is_skipped() {
    let noisy = LOG.replace("|turn|5\n", "|turn|5\n|-damage|p2a: Mew|50/100\n");
    let clean = analyze(LOG);
    let analysis = analyze(&noisy);
    assert_eq!(analysis.diagnostics.skipped_lines, 1);
    assert_eq!(analysis.diagnostics.unknown_pokemon, 1);
    assert_eq!(analysis.battle.turns, clean.battle.turns);
}

#[test]
fn test_malformed_turn_markers() {
    let err = analyze_log(&LOG.replace("|turn|3\n", "|turn|three\n"), &AnalysisOptions::default())
        .unwrap_err();
    assert!(matches!(err, AnalysisError::MalformedLog(_)));
    assert_eq!(err.code(), "MALFORMED_LOG");

    let err = analyze_log(&LOG.replace("|turn|4\n", "|turn|5\n"), &AnalysisOptions::default())
        .unwrap_err();
    assert!(matches!(err, AnalysisError::MalformedLog(_)));
}

#[test]
fn test_empty_and_turnless_logs() {
    assert_eq!(
        analyze_log("  \n", &AnalysisOptions::default()),
        Err(AnalysisError::EmptyLog)
    );

    let preamble = &LOG[..LOG.find("|turn|1").unwrap()];
    assert_eq!(
        analyze_log(preamble, &AnalysisOptions::default()),
        Err(AnalysisError::NoTurns)
    );
}

const UNDECLARED_ROSTER_LOG: &str = r#"|player|p1|Alice|1|
|player|p2|Bob|2|
|gametype|singles
|gen|9
|tier|[Gen 9] Custom Game
|start
|switch|p1a: Garchomp|Garchomp, L50, M|100/100
|switch|p2a: Eevee|Eevee, L50, F|100/100
|turn|1
|move|p1a: Garchomp|Earthquake|p2a: Eevee
|-damage|p2a: Eevee|0 fnt
|faint|p2a: Eevee
|upkeep
|switch|p2a: Snorlax|Snorlax, L50, M|100/100
|turn|2
|move|p2a: Snorlax|Body Slam|p1a: Garchomp
|-damage|p1a: Garchomp|60/100
|upkeep
|turn|3
|win|Alice
"#;

#[test]
fn test_roster_without_teamsize_never_grows() {
    let battle = analyze(UNDECLARED_ROSTER_LOG).battle;
    let mut previous_left = usize::MAX;
    for turn in &battle.turns {
        let side = turn.state_after.side(Player::P2);
        assert_eq!(side.roster_size, 6, "turn {}", turn.turn_number);
        assert!(side.total_left <= previous_left, "totalLeft rose on turn {}", turn.turn_number);
        previous_left = side.total_left;

        // Losing the only revealed member is not a wipe
        let score = turn.position_score.expect("both sides have sent something out");
        assert!(score.player2_score > 0.0);
    }
    assert_eq!(battle.turns[0].state_after.player2.total_left, 5);
    assert_eq!(battle.turns[1].state_after.player2.total_left, 5);
}
