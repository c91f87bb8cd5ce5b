//! Position scoring
//!
//! Each side gets an independent 0-100 score from the post-turn board:
//!
//! ```text
//! score = clamp(BASE + SPREAD * (ROSTER_WEIGHT * r + HP_WEIGHT * h) + matchup + field, 0, 100)
//! ```
//!
//! where `r` is the fraction of the roster still standing and `h` the
//! fraction of total roster HP remaining. Members not yet revealed count
//! at full HP. `matchup` and `field` never look at the side's own HP, so
//! the score only ever rises with `r` and `h`.

use vgccorner_battle::dex::species_types;
use vgccorner_battle::query::matchup_edge;
use vgccorner_battle::{ActiveView, BoardState, FieldView, Player, SideView, Type};

use crate::model::{round2, Momentum, PositionScore};

/// Score gap inside which neither side holds momentum
pub const NEUTRAL_BAND: f64 = 5.0;

const BASE: f64 = 10.0;
const SPREAD: f64 = 80.0;
const ROSTER_WEIGHT: f64 = 0.5;
const HP_WEIGHT: f64 = 0.5;

/// Points per doubling of type advantage
const MATCHUP_SCALE: f64 = 2.5;
const MATCHUP_LIMIT: f64 = 5.0;

const FIELD_STEP: f64 = 1.5;
const FIELD_LIMIT: f64 = 5.0;

/// Score both sides of a board. `None` until both rosters are known.
pub fn score_position(board: &BoardState) -> Option<PositionScore> {
    let player1_score = side_score(board, Player::P1)?;
    let player2_score = side_score(board, Player::P2)?;

    Some(PositionScore {
        player1_score,
        player2_score,
        momentum_player: momentum(player1_score, player2_score),
    })
}

pub fn momentum(player1_score: f64, player2_score: f64) -> Momentum {
    let diff = player1_score - player2_score;
    if diff > NEUTRAL_BAND {
        Momentum::Player1
    } else if diff < -NEUTRAL_BAND {
        Momentum::Player2
    } else {
        Momentum::Neutral
    }
}

fn side_score(board: &BoardState, player: Player) -> Option<f64> {
    let own = board.side(player);
    let opp = board.side(player.opponent());
    if own.roster_size == 0 {
        return None;
    }
    if own.total_left == 0 {
        return Some(0.0);
    }

    let standing = SPREAD * (ROSTER_WEIGHT * roster_fraction(own) + HP_WEIGHT * hp_fraction(own));
    let score = BASE + standing + matchup(own, opp) + field(own, &board.field);
    Some(round2(score.clamp(0.0, 100.0)))
}

fn roster_fraction(side: &SideView) -> f64 {
    side.total_left as f64 / side.roster_size as f64
}

fn hp_fraction(side: &SideView) -> f64 {
    let mut seen = 0usize;
    let mut hp = 0u32;
    for entry in side.counted_roster() {
        seen += 1;
        if !entry.fainted {
            hp += entry.hp_percent;
        }
    }
    let unseen = side.roster_size.saturating_sub(seen) as u32;
    let total = f64::from(hp + unseen * 100);
    (total / (side.roster_size as f64 * 100.0)).min(1.0)
}

/// Defensive typing, accounting for terastallization
fn active_types(active: &ActiveView) -> Option<Vec<Type>> {
    if active.terastallized {
        if let Some(tera) = active.tera_type.as_deref().and_then(Type::from_protocol) {
            return Some(vec![tera]);
        }
    }
    species_types(&active.species).map(<[Type]>::to_vec)
}

fn matchup(own: &SideView, opp: &SideView) -> f64 {
    let mut total = 0.0;
    let mut pairs = 0u32;

    for mine in own.active.iter().filter_map(active_types) {
        for theirs in opp.active.iter().filter_map(active_types) {
            if let Some(edge) = matchup_edge(&mine, &theirs) {
                total += f64::from(edge) * MATCHUP_SCALE;
                pairs += 1;
            }
        }
    }

    if pairs == 0 {
        return 0.0;
    }
    (total / f64::from(pairs)).clamp(-MATCHUP_LIMIT, MATCHUP_LIMIT)
}

fn field(own: &SideView, field: &FieldView) -> f64 {
    let mut adjust = 0.0;

    if let Some(weather) = field.weather {
        let favored = own
            .active
            .iter()
            .filter_map(active_types)
            .filter(|types| weather.favors(types))
            .count();
        adjust += FIELD_STEP * favored as f64;
    }

    for (condition, layers) in &own.conditions {
        if condition.is_hazard() {
            adjust -= FIELD_STEP * f64::from(*layers);
        } else if condition.is_beneficial() {
            adjust += FIELD_STEP;
        }
    }

    adjust.clamp(-FIELD_LIMIT, FIELD_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use vgccorner_battle::{RosterEntry, SideCondition, Weather};

    fn entry(species: &str, hp_percent: u32) -> RosterEntry {
        RosterEntry {
            name: species.to_string(),
            species: species.to_string(),
            hp_percent,
            fainted: hp_percent == 0,
            status: None,
            revealed: true,
        }
    }

    fn active(species: &str, hp: u32) -> ActiveView {
        ActiveView {
            species: species.to_string(),
            nickname: None,
            position: 0,
            hp,
            max_hp: 100,
            status: None,
            is_lead: true,
            tera_type: None,
            terastallized: false,
        }
    }

    fn side(roster: Vec<RosterEntry>, roster_size: usize, lead: Option<ActiveView>) -> SideView {
        let losses = roster.iter().filter(|e| e.fainted).count();
        SideView {
            name: "Someone".to_string(),
            active: lead.into_iter().collect(),
            alive: roster
                .iter()
                .filter(|e| !e.fainted)
                .map(|e| e.name.clone())
                .collect(),
            roster,
            losses,
            total_left: roster_size - losses,
            roster_size,
            conditions: BTreeMap::new(),
        }
    }

    fn board(player1: SideView, player2: SideView) -> BoardState {
        BoardState {
            player1,
            player2,
            field: FieldView::default(),
        }
    }

    fn fresh() -> SideView {
        side(vec![entry("Pikachu", 100)], 4, None)
    }

    #[test]
    fn test_even_board_is_neutral() {
        let score = score_position(&board(fresh(), fresh())).unwrap();
        assert_eq!(score.player1_score, 90.0);
        assert_eq!(score.player2_score, 90.0);
        assert_eq!(score.momentum_player, Momentum::Neutral);
    }

    #[test]
    fn test_no_roster_information() {
        let empty = side(Vec::new(), 0, None);
        assert!(score_position(&board(fresh(), empty)).is_none());
    }

    #[test]
    fn test_wiped_side_scores_zero() {
        let wiped = side(vec![entry("Pikachu", 0)], 1, None);
        let score = score_position(&board(fresh(), wiped)).unwrap();
        assert_eq!(score.player2_score, 0.0);
        assert_eq!(score.momentum_player, Momentum::Player1);
    }

    #[test]
    fn test_monotonic_in_own_hp_and_roster() {
        let opponent = side(vec![entry("Charizard", 70)], 4, Some(active("Charizard", 70)));
        let mut last = -1.0;
        for hp in [0, 10, 40, 70, 100] {
            let mut roster = vec![entry("Venusaur", hp), entry("Blastoise", 100)];
            if hp == 0 {
                roster[0].fainted = true;
            }
            let own = side(roster, 4, Some(active("Blastoise", 100)));
            let score = score_position(&board(own, opponent.clone())).unwrap();
            assert!(score.player1_score >= last);
            last = score.player1_score;
        }
    }

    #[test]
    fn test_scores_stay_in_range() {
        let mut strong = side(vec![entry("Charizard", 100)], 1, Some(active("Charizard", 100)));
        strong.conditions.insert(SideCondition::Tailwind, 1);
        strong.conditions.insert(SideCondition::Reflect, 1);
        let mut weak = side(
            vec![entry("Venusaur", 1), entry("Pikachu", 0)],
            2,
            Some(active("Venusaur", 1)),
        );
        weak.conditions.insert(SideCondition::Spikes, 3);
        weak.conditions.insert(SideCondition::StealthRock, 1);

        let mut state = board(strong, weak);
        state.field.weather = Some(Weather::Sun);
        let score = score_position(&state).unwrap();
        for value in [score.player1_score, score.player2_score] {
            assert!((0.0..=100.0).contains(&value));
        }
        // 90 standing, +2.5 matchup, +4.5 field
        assert_eq!(score.player1_score, 97.0);
        assert_eq!(score.momentum_player, Momentum::Player1);
    }

    #[test]
    fn test_type_matchup_favors_advantaged_side() {
        let water = side(vec![entry("Blastoise", 100)], 4, Some(active("Blastoise", 100)));
        let fire = side(vec![entry("Charizard", 100)], 4, Some(active("Charizard", 100)));
        let score = score_position(&board(water, fire)).unwrap();
        assert!(score.player1_score > score.player2_score);
    }

    #[test]
    fn test_momentum_band() {
        assert_eq!(momentum(60.0, 55.0), Momentum::Neutral);
        assert_eq!(momentum(60.1, 55.0), Momentum::Player1);
        assert_eq!(momentum(40.0, 45.5), Momentum::Player2);
    }
}
