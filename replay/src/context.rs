//! The per-analysis context and the `analyze_log` entry point
//!
//! One [`AnalysisContext`] exists per call. It owns the tracker, the turn
//! being built and the diagnostics counters, so concurrent analyses never
//! share state.

use serde::Serialize;
use tracing::{debug, warn};
use vgccorner_battle::{BattleEvent, BoardTracker, Player, TrackError};
use vgccorner_protocol::{parse_server_message, LogTokenizer, ServerMessage, TokenizedLine};

use crate::aggregate::TurnBuilder;
use crate::classify::{classify, Classified};
use crate::detect::{detect_key_moments, detect_turning_points, PlayerNames};
use crate::error::AnalysisError;
use crate::model::{Battle, Turn};
use crate::score::score_position;
use crate::stats::compute_stats;
use crate::summary::{assemble, determine_winner, Sections, Timestamps};

/// Per-call inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Used as the battle id when present
    pub replay_id: Option<String>,
}

impl AnalysisOptions {
    pub fn with_replay_id(replay_id: impl Into<String>) -> Self {
        Self {
            replay_id: Some(replay_id.into()),
        }
    }
}

/// Recovered problems, counted but never fatal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    /// Events the tracker rejected
    pub skipped_lines: usize,
    /// Rejections caused by a pokemon missing from the roster
    pub unknown_pokemon: usize,
    /// Lines the protocol parser could not read
    pub unparsed_lines: usize,
}

/// A finished analysis
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub battle: Battle,
    pub diagnostics: Diagnostics,
}

struct AnalysisContext {
    tracker: BoardTracker,
    turn: TurnBuilder,
    turns: Vec<Turn>,
    timestamps: Timestamps,
    diagnostics: Diagnostics,
}

impl AnalysisContext {
    fn new() -> Self {
        Self {
            tracker: BoardTracker::new(),
            turn: TurnBuilder::new(0),
            turns: Vec::new(),
            timestamps: Timestamps::default(),
            diagnostics: Diagnostics::default(),
        }
    }

    fn begin_turn(&mut self, number: u32) {
        self.tracker.begin_turn(number);
        self.turn = TurnBuilder::new(number);
    }

    fn process_line(&mut self, line: &TokenizedLine<'_>) {
        let msg = match parse_server_message(line.raw) {
            Ok(msg) => msg,
            Err(e) => {
                warn!(
                    turn = line.turn,
                    line = line.line_no,
                    raw = line.raw,
                    error = %e,
                    "Skipping unparseable line"
                );
                self.diagnostics.unparsed_lines += 1;
                return;
            }
        };

        match msg {
            ServerMessage::Timestamp(seconds) => self.timestamps.record(seconds),
            ServerMessage::Upkeep => self.turn.end_of_actions(),
            _ => {}
        }

        self.tracker.update(&msg);

        match classify(&msg, line.raw, &self.tracker) {
            Classified::Absorbed => {}
            Classified::Marker(marker) => {
                if !self.turn.mark(marker) {
                    // Nothing to annotate (ability immunities, status fails)
                    self.record(line, BattleEvent::other(line.raw));
                }
            }
            Classified::Event(event) => self.record(line, event),
        }
    }

    fn record(&mut self, line: &TokenizedLine<'_>, event: BattleEvent) {
        match self.tracker.apply_event(&event) {
            Ok(implicit) => {
                self.turn.push(event);
                if let Some(faint) = implicit {
                    self.turn.push(faint);
                }
            }
            Err(e) => {
                warn!(
                    turn = line.turn,
                    line = line.line_no,
                    raw = line.raw,
                    error = %e,
                    "Skipping event the board could not apply"
                );
                self.diagnostics.skipped_lines += 1;
                if matches!(e, TrackError::UnknownPokemon { .. }) {
                    self.diagnostics.unknown_pokemon += 1;
                }
            }
        }
    }

    /// Close the current turn with a snapshot and score
    fn finish_turn(&mut self) {
        let builder = std::mem::replace(&mut self.turn, TurnBuilder::new(0));
        if builder.number() == 0 {
            // Preamble: leads are on the board, nothing to report
            return;
        }
        let state_after = self.tracker.snapshot();
        let position_score = score_position(&state_after);
        self.turns.push(builder.finish(state_after, position_score));
    }
}

/// Analyse one raw replay log
///
/// Fatal problems (empty input, untrustworthy turn order, no outcome)
/// return an error; problems with individual lines are skipped and
/// counted in [`Diagnostics`].
pub fn analyze_log(raw: &str, options: &AnalysisOptions) -> Result<Analysis, AnalysisError> {
    if raw.trim().is_empty() {
        return Err(AnalysisError::EmptyLog);
    }

    let mut ctx = AnalysisContext::new();
    for group in LogTokenizer::new(raw).turns() {
        let group = group?;
        ctx.begin_turn(group.turn);
        for line in &group.lines {
            ctx.process_line(line);
        }
        ctx.finish_turn();
    }

    if ctx.turns.is_empty() {
        return Err(AnalysisError::NoTurns);
    }

    let winner = determine_winner(&ctx.tracker)?;

    let names = PlayerNames {
        player1: ctx
            .tracker
            .get_side(Player::P1)
            .map_or("", |s| s.username.as_str()),
        player2: ctx
            .tracker
            .get_side(Player::P2)
            .map_or("", |s| s.username.as_str()),
    };
    let turning_points = detect_turning_points(&ctx.turns);
    let key_moments = detect_key_moments(&ctx.turns, &turning_points, names);
    let stats = compute_stats(&ctx.turns, turning_points);

    debug!(
        turns = ctx.turns.len(),
        key_moments = key_moments.len(),
        winner = winner.as_str(),
        skipped = ctx.diagnostics.skipped_lines,
        unparsed = ctx.diagnostics.unparsed_lines,
        "Analysed replay log"
    );

    let battle = assemble(
        raw,
        options.replay_id.as_deref(),
        &ctx.tracker,
        ctx.timestamps,
        winner,
        Sections {
            turns: ctx.turns,
            stats,
            key_moments,
        },
    );

    Ok(Analysis {
        battle,
        diagnostics: ctx.diagnostics,
    })
}
