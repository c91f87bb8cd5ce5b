//! Per-turn assembly
//!
//! A [`TurnBuilder`] collects one turn's events in log order, folds
//! result markers into the move they follow, and on `finish` derives the
//! action list and damage/healing totals around a board snapshot.

use std::collections::BTreeMap;

use vgccorner_battle::dex::{move_type, to_id};
use vgccorner_battle::{
    BattleEvent, BoardState, EventKind, EventResult, Player, SideCondition, SpeedControl,
    StatChange,
};

use crate::classify::{describe_move, effect_name, Marker};
use crate::model::{Action, ActionKind, PositionScore, Turn};

/// Damage sources a pokemon inflicts on itself
const SELF_INFLICTED: &[&str] = &[
    "recoil",
    "lifeorb",
    "confusion",
    "mindblown",
    "steelbeam",
    "chloroblast",
    "struggle",
    "highjumpkick",
    "jumpkick",
    "substitute",
];

pub(crate) fn is_self_inflicted(source: &str) -> bool {
    let id = to_id(effect_name(source));
    SELF_INFLICTED.contains(&id.as_str())
}

fn is_drain(source: &str) -> bool {
    to_id(effect_name(source)) == "drain"
}

#[derive(Debug)]
pub(crate) struct TurnBuilder {
    number: u32,
    events: Vec<BattleEvent>,
    last_move: Option<usize>,
}

impl TurnBuilder {
    pub(crate) fn new(number: u32) -> Self {
        Self {
            number,
            events: Vec::new(),
            last_move: None,
        }
    }

    pub(crate) fn number(&self) -> u32 {
        self.number
    }

    /// Residual effects start; markers no longer belong to a move
    pub(crate) fn end_of_actions(&mut self) {
        self.last_move = None;
    }

    /// Annotate the latest move. Returns false when there is none.
    pub(crate) fn mark(&mut self, marker: Marker) -> bool {
        let Some(event) = self.last_move.and_then(|idx| self.events.get_mut(idx)) else {
            return false;
        };
        let EventKind::Move {
            critical,
            effectiveness,
            missed,
            failed,
            ..
        } = &mut event.kind
        else {
            return false;
        };

        let result = match marker {
            Marker::Critical => {
                *critical = true;
                EventResult::CriticalHit
            }
            Marker::Effectiveness(e) => {
                *effectiveness = Some(e);
                e.result()
            }
            Marker::Miss => {
                *missed = true;
                EventResult::Miss
            }
            Marker::Fail => {
                *failed = true;
                EventResult::Fail
            }
        };
        event.annotate(result);
        true
    }

    pub(crate) fn push(&mut self, event: BattleEvent) {
        match &event.kind {
            EventKind::Move { .. } => self.last_move = Some(self.events.len()),
            // Entry effects (Intimidate, weather abilities) are not the move's doing
            EventKind::Switch { .. } => self.last_move = None,
            EventKind::Faint { .. } => self.credit_faint(&event),
            _ => self.record_impact(&event),
        }
        self.events.push(event);
    }

    fn last_move_mut(&mut self) -> Option<&mut BattleEvent> {
        self.last_move.and_then(|idx| self.events.get_mut(idx))
    }

    /// Fold an event that follows a move into that move's impact
    fn record_impact(&mut self, event: &BattleEvent) {
        let Some(mover) = self.last_move_mut() else {
            return;
        };
        // Weather and terrain from an ability name the ability holder
        let by_mover = event.pokemon.is_empty() || event.pokemon == mover.pokemon;
        let EventKind::Move { hit, impact, .. } = &mut mover.kind else {
            return;
        };

        match &event.kind {
            EventKind::Damage {
                amount,
                source: None,
                ..
            } => {
                *hit = true;
                impact.damage_dealt += amount;
            }
            EventKind::Heal { amount, source, .. }
                if source.as_deref().is_none_or(is_drain) =>
            {
                impact.healing_done += amount;
            }
            EventKind::Status {
                status: Some(status),
                previous,
            } if *previous != Some(*status) => impact.status_inflicted = Some(*status),
            EventKind::Boost { stat, stages } => impact.stat_changes.push(StatChange {
                pokemon: event.pokemon.clone(),
                stat: stat.clone(),
                stages: *stages,
            }),
            EventKind::Weather {
                weather: Some(weather),
                ..
            } if by_mover => impact.weather_set = Some(*weather),
            EventKind::Terrain {
                terrain: Some(terrain),
                ..
            } if by_mover => impact.terrain_set = Some(*terrain),
            EventKind::Field {
                condition,
                removed: false,
            } if condition == "Trick Room" => impact.speed_control = Some(SpeedControl::TrickRoom),
            EventKind::Hazard {
                condition: SideCondition::Tailwind,
                removed: false,
            } => impact.speed_control = Some(SpeedControl::Tailwind),
            _ => {}
        }
    }

    /// A faint right after a move that targeted the fainted pokemon is
    /// that move's result
    fn credit_faint(&mut self, faint: &BattleEvent) {
        let Some(event) = self.last_move_mut() else {
            return;
        };
        let EventKind::Move {
            target_side,
            spread,
            ..
        } = &event.kind
        else {
            return;
        };

        let targeted = event.target.as_deref() == Some(faint.pokemon.as_str())
            && *target_side == faint.side;
        let caught_in_spread = *spread && event.side != faint.side;
        if !(targeted || caught_in_spread) {
            return;
        }

        event.annotate(EventResult::Faint);
        if let EventKind::Move { impact, .. } = &mut event.kind {
            impact.fainted.push(faint.pokemon.clone());
        }
    }

    pub(crate) fn finish(
        mut self,
        state_after: BoardState,
        position_score: Option<PositionScore>,
    ) -> Turn {
        for event in &mut self.events {
            if let EventKind::Move { hit, .. } = event.kind {
                if let Some(details) = describe_move(&event.kind) {
                    event.details = Some(details);
                }
                if hit && event.result.is_none() {
                    event.result = Some(EventResult::Success);
                }
            }
        }

        let actions = derive_actions(&self.events);
        let (damage_dealt, healing_done) = tally(&self.events);

        Turn {
            turn_number: self.number,
            actions,
            events: self.events,
            damage_dealt,
            healing_done,
            state_after,
            position_score,
        }
    }
}

fn derive_actions(events: &[BattleEvent]) -> Vec<Action> {
    events
        .iter()
        .filter_map(|event| {
            let player = event.side?;
            let kind = match &event.kind {
                EventKind::Move {
                    move_name, impact, ..
                } => ActionKind::Move {
                    move_name: move_name.clone(),
                    move_type: move_type(move_name).map(|t| t.as_str().to_string()),
                    target: event.target.clone(),
                    result: event.result,
                    impact: impact.clone(),
                },
                EventKind::Switch { species, lead, .. } if !lead => ActionKind::Switch {
                    switch_to: species.clone(),
                },
                // Reveals (Frisk, Trick) are not item use
                EventKind::Item {
                    item,
                    consumed: true,
                } => ActionKind::Item { item: item.clone() },
                _ => return None,
            };
            Some((player, kind, event.pokemon.clone()))
        })
        .enumerate()
        .map(|(order, (player, kind, pokemon))| Action {
            player,
            kind,
            pokemon,
            order,
        })
        .collect()
}

fn empty_totals() -> BTreeMap<Player, u32> {
    Player::BOTH.into_iter().map(|p| (p, 0)).collect()
}

/// Damage is credited to the opponent of the damaged side; healing to the
/// healed side
fn tally(events: &[BattleEvent]) -> (BTreeMap<Player, u32>, BTreeMap<Player, u32>) {
    let mut damage = empty_totals();
    let mut healing = empty_totals();

    for event in events {
        let Some(side) = event.side else { continue };
        match &event.kind {
            EventKind::Damage { amount, source, .. } => {
                if source.as_deref().is_some_and(is_self_inflicted) {
                    continue;
                }
                *damage.entry(side.opponent()).or_default() += amount;
            }
            EventKind::Heal { amount, .. } => {
                *healing.entry(side).or_default() += amount;
            }
            _ => {}
        }
    }

    (damage, healing)
}
