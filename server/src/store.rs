//! Completed analyses, keyed by battle id

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use vgccorner_replay::{Battle, Diagnostics, Winner};

/// Wall-clock cost of the analysis that produced a stored battle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timings {
    pub parse_time_ms: u64,
    pub analysis_time_ms: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredReplay {
    pub battle: Battle,
    pub diagnostics: Diagnostics,
    pub is_private: bool,
    pub timings: Timings,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayListItem {
    pub id: String,
    pub format: String,
    pub timestamp: DateTime<Utc>,
    pub duration: u64,
    pub winner: Winner,
    pub player1: String,
    pub player2: String,
    pub total_turns: usize,
    pub is_private: bool,
}

impl From<&StoredReplay> for ReplayListItem {
    fn from(stored: &StoredReplay) -> Self {
        let battle = &stored.battle;
        ReplayListItem {
            id: battle.id.clone(),
            format: battle.format.clone(),
            timestamp: battle.timestamp,
            duration: battle.duration,
            winner: battle.winner,
            player1: battle.player1.name.clone(),
            player2: battle.player2.name.clone(),
            total_turns: battle.stats.total_turns,
            is_private: stored.is_private,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayFilter {
    /// Matches either player
    pub username: Option<String>,
    pub format: Option<String>,
    pub is_private: Option<bool>,
}

impl ReplayFilter {
    fn matches(&self, stored: &StoredReplay) -> bool {
        let battle = &stored.battle;
        if let Some(username) = self.username.as_deref().map(to_id) {
            if to_id(&battle.player1.name) != username && to_id(&battle.player2.name) != username {
                return false;
            }
        }
        if let Some(format) = self.format.as_deref().map(to_id) {
            if to_id(&battle.format) != format {
                return false;
            }
        }
        self.is_private.is_none_or(|private| private == stored.is_private)
    }
}

#[derive(Debug, Default)]
pub struct ReplayStore {
    replays: DashMap<String, Arc<StoredReplay>>,
}

impl ReplayStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<Arc<StoredReplay>> {
        self.replays.get(id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn insert(&self, replay: StoredReplay) -> Arc<StoredReplay> {
        let replay = Arc::new(replay);
        self.replays
            .insert(replay.battle.id.clone(), Arc::clone(&replay));
        replay
    }

    pub fn len(&self) -> usize {
        self.replays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replays.is_empty()
    }

    /// Newest first; returns the page and the total number of matches
    pub fn list(
        &self,
        filter: &ReplayFilter,
        limit: usize,
        offset: usize,
    ) -> (Vec<ReplayListItem>, usize) {
        let mut matches: Vec<ReplayListItem> = self
            .replays
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| ReplayListItem::from(entry.value().as_ref()))
            .collect();
        matches.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));

        let total = matches.len();
        let page = matches.into_iter().skip(offset).take(limit).collect();
        (page, total)
    }
}

fn to_id(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
