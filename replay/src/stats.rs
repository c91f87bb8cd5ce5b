//! Battle-wide aggregates over the finished turn series

use vgccorner_battle::dex::{move_type, to_id};
use vgccorner_battle::{Effectiveness, EventKind, Player};

use crate::model::{round2, ActionKind, BattleStats, PlayerStats, Turn, TurningPoint};

pub fn compute_stats(turns: &[Turn], turning_points: Vec<TurningPoint>) -> BattleStats {
    let mut stats = BattleStats {
        total_turns: turns.len(),
        turning_points,
        ..BattleStats::default()
    };

    let mut total_damage = 0u32;
    let mut total_healing = 0u32;

    for turn in turns {
        for player in Player::BOTH {
            let dealt = turn.damage_dealt.get(&player).copied().unwrap_or(0);
            let healed = turn.healing_done.get(&player).copied().unwrap_or(0);
            total_damage += dealt;
            total_healing += healed;

            let ps = player_stats(&mut stats, player);
            ps.damage_dealt += dealt;
            ps.healing_done += healed;
        }

        for action in &turn.actions {
            if let ActionKind::Switch { .. } = action.kind {
                stats.switches += 1;
                player_stats(&mut stats, action.player).switch_count += 1;
            }
        }

        for event in &turn.events {
            let Some(side) = event.side else { continue };
            match &event.kind {
                EventKind::Move {
                    move_name,
                    critical,
                    effectiveness,
                    hit,
                    ..
                } => {
                    *stats.move_frequency.entry(to_id(move_name)).or_default() += 1;
                    if *critical {
                        stats.critical_hits += 1;
                    }
                    match effectiveness {
                        Some(Effectiveness::SuperEffective) => stats.super_effective += 1,
                        Some(Effectiveness::NotVeryEffective) => stats.not_very_effective += 1,
                        _ => {}
                    }

                    let kind = move_type(move_name).map(|t| t.as_str().to_string());
                    if let Some(kind) = &kind {
                        *stats.type_coverage.entry(kind.clone()).or_default() += 1;
                    }

                    let ps = player_stats(&mut stats, side);
                    ps.move_count += 1;
                    if let Some(kind) = kind {
                        *ps.moves_by_type.entry(kind).or_default() += 1;
                    }
                    match effectiveness {
                        Some(Effectiveness::SuperEffective) => ps.effectiveness.super_effective += 1,
                        Some(Effectiveness::NotVeryEffective) => {
                            ps.effectiveness.not_very_effective += 1
                        }
                        Some(Effectiveness::Immune) => {}
                        None if *hit => ps.effectiveness.neutral += 1,
                        None => {}
                    }
                }
                EventKind::Damage { amount, .. } => {
                    player_stats(&mut stats, side).damage_taken += amount;
                }
                EventKind::Heal { amount, .. } => {
                    player_stats(&mut stats, side).healing_received += amount;
                }
                _ => {}
            }
        }
    }

    if !turns.is_empty() {
        let count = turns.len() as f64;
        stats.avg_damage_per_turn = round2(f64::from(total_damage) / count);
        stats.avg_heal_per_turn = round2(f64::from(total_healing) / count);
    }
    stats
}

fn player_stats(stats: &mut BattleStats, player: Player) -> &mut PlayerStats {
    match player {
        Player::P1 => &mut stats.player1_stats,
        Player::P2 => &mut stats.player2_stats,
    }
}
