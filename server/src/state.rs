//! Shared server state and the analysis operations behind the routes

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::future::join_all;
use tracing::{info, warn};
use vgccorner_replay::{AnalysisOptions, analyze_log, battle_id};

use crate::cache::{Abandoned, SingleFlight};
use crate::config::{DEFAULT_MAX_LOG_BYTES, ServerConfig};
use crate::error::ApiError;
use crate::fetch::ReplaySource;
use crate::replay_id::ReplayId;
use crate::store::{ReplayStore, StoredReplay, Timings};

pub const DEFAULT_USER_LIMIT: usize = 1;
pub const MAX_USER_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub fetch_timeout: Duration,
    pub max_log_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(10),
            max_log_bytes: DEFAULT_MAX_LOG_BYTES,
        }
    }
}

impl From<&ServerConfig> for Settings {
    fn from(config: &ServerConfig) -> Self {
        Self {
            fetch_timeout: config.fetch_timeout(),
            max_log_bytes: config.max_log_bytes,
        }
    }
}

type Outcome = Result<Arc<StoredReplay>, ApiError>;

/// A completed analysis and whether this request reused another's work
#[derive(Debug, Clone)]
pub struct Analyzed {
    pub replay: Arc<StoredReplay>,
    pub cached: bool,
}

pub struct AppState {
    source: Arc<dyn ReplaySource>,
    store: Arc<ReplayStore>,
    flights: SingleFlight<Outcome>,
    settings: Settings,
}

impl AppState {
    pub fn new(source: Arc<dyn ReplaySource>, settings: Settings) -> Self {
        Self {
            source,
            store: Arc::new(ReplayStore::new()),
            flights: SingleFlight::new(),
            settings,
        }
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn store(&self) -> &ReplayStore {
        &self.store
    }

    pub fn in_flight(&self) -> usize {
        self.flights.in_flight()
    }

    /// Analyse a replay from the host, reusing stored or in-flight work
    pub async fn analyze_replay(&self, id: &ReplayId, is_private: bool) -> Result<Analyzed, ApiError> {
        if let Some(replay) = self.store.get(id.as_str()) {
            return Ok(Analyzed { replay, cached: true });
        }

        let source = Arc::clone(&self.source);
        let store = Arc::clone(&self.store);
        let settings = self.settings;
        let id = id.clone();
        let key = id.as_str().to_string();
        self.coalesce(&key, move || async move {
            let started = Instant::now();
            let raw = fetch_with_timeout(source.as_ref(), &id, settings.fetch_timeout).await?;
            check_size(&raw, settings.max_log_bytes)?;
            let stored = run_analysis(raw, Some(id.to_string()), is_private, started).await?;
            Ok(store.insert(stored))
        })
        .await
    }

    /// Analyse a submitted log
    pub async fn analyze_raw(&self, raw: String, is_private: bool) -> Result<Analyzed, ApiError> {
        check_size(&raw, self.settings.max_log_bytes)?;
        let key = battle_id(&raw);
        if let Some(replay) = self.store.get(&key) {
            return Ok(Analyzed { replay, cached: true });
        }

        let store = Arc::clone(&self.store);
        self.coalesce(&key, move || async move {
            let stored = run_analysis(raw, None, is_private, Instant::now()).await?;
            Ok(store.insert(stored))
        })
        .await
    }

    /// Analyse a user's most recent replays in a format, returning the newest
    pub async fn analyze_user(
        &self,
        username: &str,
        format: &str,
        limit: usize,
    ) -> Result<Analyzed, ApiError> {
        let limit = limit.clamp(1, MAX_USER_LIMIT);
        let listings = tokio::time::timeout(
            self.settings.fetch_timeout,
            self.source.search(username, format),
        )
        .await
        .map_err(|_| ApiError::UpstreamFetchFailure("replay search timed out".to_string()))??;

        let ids: Vec<ReplayId> = listings
            .iter()
            .filter_map(|listing| match listing.id.parse::<ReplayId>() {
                Ok(id) => Some(id),
                Err(e) => {
                    warn!(id = %listing.id, error = %e, "Ignoring search result");
                    None
                }
            })
            .take(limit)
            .collect();
        if ids.is_empty() {
            return Err(ApiError::NotFound(format!(
                "No replays found for {username} in {format}"
            )));
        }

        info!(username, format, count = ids.len(), "Analysing user replays");
        let mut results = join_all(ids.iter().map(|id| self.analyze_replay(id, id.is_private())))
            .await
            .into_iter();
        results
            .next()
            .unwrap_or_else(|| Err(ApiError::Internal("no analysis results".to_string())))
    }

    /// Stored analysis by battle id, analysing replay ids not yet seen
    pub async fn resolve(&self, id: &str) -> Result<Analyzed, ApiError> {
        if let Some(replay) = self.store.get(id) {
            return Ok(Analyzed { replay, cached: true });
        }
        match id.parse::<ReplayId>() {
            Ok(replay_id) => {
                let is_private = replay_id.is_private();
                self.analyze_replay(&replay_id, is_private).await
            }
            Err(_) => Err(ApiError::NotFound(format!("Replay not found: {id}"))),
        }
    }

    async fn coalesce<F, Fut>(&self, key: &str, make: F) -> Result<Analyzed, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Outcome> + Send + 'static,
    {
        let (outcome, joined) = self
            .flights
            .run(key, make)
            .await
            .map_err(|Abandoned| ApiError::Cancelled)?;
        outcome.map(|replay| Analyzed {
            replay,
            cached: joined,
        })
    }
}

async fn fetch_with_timeout(
    source: &dyn ReplaySource,
    id: &ReplayId,
    timeout: Duration,
) -> Result<String, ApiError> {
    match tokio::time::timeout(timeout, source.fetch_log(id)).await {
        Ok(fetched) => Ok(fetched?),
        Err(_) => {
            warn!(%id, ?timeout, "Replay fetch timed out");
            Err(ApiError::UpstreamFetchFailure(format!(
                "timed out after {}s",
                timeout.as_secs_f64()
            )))
        }
    }
}

fn check_size(raw: &str, max: usize) -> Result<(), ApiError> {
    if raw.len() > max {
        return Err(ApiError::InvalidInput(format!(
            "Replay log exceeds the maximum size of {max} bytes"
        )));
    }
    Ok(())
}

async fn run_analysis(
    raw: String,
    replay_id: Option<String>,
    is_private: bool,
    started: Instant,
) -> Result<StoredReplay, ApiError> {
    let (result, parse_time) = tokio::task::spawn_blocking(move || {
        let parse_start = Instant::now();
        let result = analyze_log(&raw, &AnalysisOptions { replay_id });
        (result, parse_start.elapsed())
    })
    .await
    .map_err(|e| ApiError::Internal(format!("analysis task failed: {e}")))?;

    let analysis = result?;
    info!(
        battle = %analysis.battle.id,
        turns = analysis.battle.turns.len(),
        skipped = analysis.diagnostics.skipped_lines,
        unparsed = analysis.diagnostics.unparsed_lines,
        "Analysed battle"
    );
    Ok(StoredReplay {
        battle: analysis.battle,
        diagnostics: analysis.diagnostics,
        is_private,
        timings: Timings {
            parse_time_ms: millis(parse_time),
            analysis_time_ms: millis(started.elapsed()),
        },
    })
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
