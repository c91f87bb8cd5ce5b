//! Turning points and key moments
//!
//! Read-only passes over the finished turn series. Turning points come
//! from the score series, key moments from the classified events; both
//! end up ranked in a single key moment list.

use vgccorner_battle::{BattleEvent, EventKind, Player, Status};

use crate::model::{round2, KeyMoment, MomentType, Turn, TurningPoint};

/// Minimum swing in player 1's score that counts as a turning point
pub const TURNING_POINT_THRESHOLD: f64 = 15.0;

/// Score points per significance step
const SIGNIFICANCE_STEP: f64 = 5.0;

/// Consecutive scored turns whose player 1 score swung past the threshold
pub fn detect_turning_points(turns: &[Turn]) -> Vec<TurningPoint> {
    turns
        .windows(2)
        .filter_map(|pair| {
            let before = pair[0].position_score?;
            let after = pair[1].position_score?;
            let shift = after.player1_score - before.player1_score;
            if shift.abs() <= TURNING_POINT_THRESHOLD {
                return None;
            }
            Some(TurningPoint {
                turn_number: pair[1].turn_number,
                player1_score_before: before.player1_score,
                player1_score_after: after.player1_score,
                player2_score_before: before.player2_score,
                player2_score_after: after.player2_score,
                momentum_shift: round2(shift),
                significance: shift_significance(shift),
            })
        })
        .collect()
}

fn shift_significance(shift: f64) -> u8 {
    (shift.abs() / SIGNIFICANCE_STEP).ceil().clamp(1.0, 10.0) as u8
}

/// Display names for moment descriptions
#[derive(Debug, Clone, Copy)]
pub struct PlayerNames<'a> {
    pub player1: &'a str,
    pub player2: &'a str,
}

impl<'a> PlayerNames<'a> {
    fn get(&self, player: Option<Player>) -> &'a str {
        match player {
            Some(Player::P1) => self.player1,
            Some(Player::P2) => self.player2,
            None => "",
        }
    }
}

/// Ranked key moments: significance descending, then turn, then log order
pub fn detect_key_moments(
    turns: &[Turn],
    turning_points: &[TurningPoint],
    names: PlayerNames<'_>,
) -> Vec<KeyMoment> {
    let mut moments: Vec<KeyMoment> = turns
        .iter()
        .flat_map(|turn| {
            turn.events
                .iter()
                .filter_map(move |event| event_moment(turn.turn_number, event, names))
        })
        .collect();

    moments.extend(turning_points.iter().map(|tp| {
        let toward = if tp.momentum_shift > 0.0 {
            names.player1
        } else {
            names.player2
        };
        KeyMoment {
            turn_number: tp.turn_number,
            description: format!(
                "Momentum swung toward {toward} ({:+.1})",
                tp.momentum_shift
            ),
            kind: MomentType::TurningPoint,
            significance: tp.significance,
        }
    }));

    // Stable sort keeps log order for ties
    moments.sort_by(|a, b| {
        b.significance
            .cmp(&a.significance)
            .then(a.turn_number.cmp(&b.turn_number))
    });
    moments
}

fn status_significance(status: Status) -> u8 {
    match status {
        Status::Sleep | Status::Freeze => 5,
        Status::BadPoison | Status::Paralysis => 4,
        Status::Burn | Status::Poison => 3,
    }
}

fn event_moment(turn_number: u32, event: &BattleEvent, names: PlayerNames<'_>) -> Option<KeyMoment> {
    let owner = names.get(event.side);
    let moment = |kind, significance, description: String| KeyMoment {
        turn_number,
        description,
        kind,
        significance,
    };

    match &event.kind {
        EventKind::Faint { remaining } => {
            let significance = match remaining {
                0 => 10,
                1 => 8,
                _ => 6,
            };
            Some(moment(
                MomentType::Ko,
                significance,
                format!("{owner}'s {} fainted", event.pokemon),
            ))
        }

        EventKind::Switch {
            forced,
            replacement,
            lead,
            ..
        } => {
            if *lead {
                return None;
            }
            let (significance, description) = if *forced {
                (4, format!("{owner}'s {} was dragged out", event.pokemon))
            } else if *replacement {
                (2, format!("{owner} sent out {}", event.pokemon))
            } else {
                (3, format!("{owner} switched to {}", event.pokemon))
            };
            Some(moment(MomentType::Switch, significance, description))
        }

        EventKind::Status {
            status: Some(status),
            previous,
        } if *previous != Some(*status) => Some(moment(
            MomentType::Status,
            status_significance(*status),
            format!("{owner}'s {} was inflicted with {status}", event.pokemon),
        )),

        EventKind::Weather { weather, previous } => Some(match (weather, previous) {
            (Some(weather), _) => moment(MomentType::Weather, 4, format!("{weather} started")),
            (None, Some(previous)) => moment(MomentType::Weather, 2, format!("{previous} ended")),
            (None, None) => return None,
        }),

        EventKind::Terrain { terrain, previous } => Some(match (terrain, previous) {
            (Some(terrain), _) => moment(MomentType::Weather, 4, format!("{terrain} started")),
            (None, Some(previous)) => moment(MomentType::Weather, 2, format!("{previous} ended")),
            (None, None) => return None,
        }),

        _ => None,
    }
}
