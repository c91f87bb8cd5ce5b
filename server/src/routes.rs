//! HTTP routes
//!
//! - `POST /api/showdown/analyze`
//! - `GET /api/showdown/replays`
//! - `GET /api/showdown/replays/{id}`
//! - `GET /api/showdown/replays/{id}/turns`
//! - `GET /healthz`

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vgccorner_replay::{Battle, BattleEvent, BoardState, PositionScore, TeamClassification, Winner};

use crate::error::ApiError;
use crate::replay_id::ReplayId;
use crate::state::{AppState, Analyzed, DEFAULT_USER_LIMIT};
use crate::store::{ReplayFilter, ReplayListItem};

pub const DEFAULT_PAGE_LIMIT: usize = 10;
pub const MAX_PAGE_LIMIT: usize = 100;

/// Room for JSON escaping around a maximum-size raw log
const BODY_OVERHEAD: usize = 64 * 1024;

pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = state
        .settings()
        .max_log_bytes
        .saturating_mul(2)
        .saturating_add(BODY_OVERHEAD);

    Router::new()
        .route("/healthz", get(health))
        .route("/api/showdown/analyze", post(analyze))
        .route("/api/showdown/replays", get(list_replays))
        .route("/api/showdown/replays/{id}", get(get_replay))
        .route("/api/showdown/replays/{id}/turns", get(get_turns))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub analysis_type: String,
    pub replay_id: Option<String>,
    pub username: Option<String>,
    pub format: Option<String>,
    pub limit: Option<usize>,
    pub raw_log: Option<String>,
    #[serde(default)]
    pub is_private: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResponseMetadata {
    parse_time_ms: u64,
    analysis_time_ms: u64,
    cached: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeResponse<'a> {
    status: &'static str,
    battle_id: &'a str,
    data: &'a Battle,
    metadata: ResponseMetadata,
}

fn analysis_response(analyzed: &Analyzed) -> Response {
    let replay = &analyzed.replay;
    Json(AnalyzeResponse {
        status: "success",
        battle_id: &replay.battle.id,
        data: &replay.battle,
        metadata: ResponseMetadata {
            parse_time_ms: replay.timings.parse_time_ms,
            analysis_time_ms: replay.timings.analysis_time_ms,
            cached: analyzed.cached,
        },
    })
    .into_response()
}

/// `Some` only for a non-blank value
fn provided(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

async fn analyze(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = body.map_err(|e| {
        debug!(error = %e, "Rejected analyze body");
        ApiError::InvalidInput("Invalid request body".to_string())
    })?;

    let analyzed = match req.analysis_type.as_str() {
        "replayId" => {
            let raw_id = provided(req.replay_id).ok_or_else(|| {
                ApiError::InvalidInput("replayId is required for replayId analysis".to_string())
            })?;
            let id: ReplayId = raw_id.parse()?;
            info!(replay = %id, "Analyse replay requested");
            let is_private = req.is_private || id.is_private();
            state.analyze_replay(&id, is_private).await?
        }
        "username" => {
            let (Some(username), Some(format)) = (provided(req.username), provided(req.format))
            else {
                return Err(ApiError::InvalidInput(
                    "username and format are required for username analysis".to_string(),
                ));
            };
            let limit = req.limit.unwrap_or(DEFAULT_USER_LIMIT);
            state.analyze_user(&username, &format, limit).await?
        }
        "rawLog" => {
            let raw = req.raw_log.filter(|raw| !raw.trim().is_empty()).ok_or_else(|| {
                ApiError::InvalidInput("rawLog is required for rawLog analysis".to_string())
            })?;
            info!(bytes = raw.len(), "Analyse raw log requested");
            state.analyze_raw(raw, req.is_private).await?
        }
        _ => {
            return Err(ApiError::InvalidInput(
                "analysisType must be one of: replayId, username, rawLog".to_string(),
            ));
        }
    };

    Ok(analysis_response(&analyzed))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub username: Option<String>,
    pub format: Option<String>,
    pub is_private: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[derive(Debug, Serialize)]
struct Pagination {
    limit: usize,
    offset: usize,
    total: usize,
}

#[derive(Debug, Serialize)]
struct ListResponse {
    status: &'static str,
    data: Vec<ReplayListItem>,
    pagination: Pagination,
}

impl ListQuery {
    /// Out-of-range or unparseable paging values fall back to defaults
    fn page(&self) -> (usize, usize) {
        let limit = self
            .limit
            .as_deref()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|v| (1..=MAX_PAGE_LIMIT).contains(v))
            .unwrap_or(DEFAULT_PAGE_LIMIT);
        let offset = self
            .offset
            .as_deref()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(0);
        (limit, offset)
    }

    fn filter(self) -> ReplayFilter {
        ReplayFilter {
            username: provided(self.username),
            format: provided(self.format),
            is_private: provided(self.is_private).map(|v| v == "true"),
        }
    }
}

async fn list_replays(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Json<ListResponse> {
    let (limit, offset) = query.page();
    let filter = query.filter();
    debug!(?filter, limit, offset, "Listing replays");

    let (data, total) = state.store().list(&filter, limit, offset);
    Json(ListResponse {
        status: "success",
        data,
        pagination: Pagination {
            limit,
            offset,
            total,
        },
    })
}

async fn get_replay(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let analyzed = state.resolve(&id).await?;
    Ok(analysis_response(&analyzed))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TurnDetail<'a> {
    turn_number: u32,
    events: &'a [BattleEvent],
    board_state: &'a BoardState,
    #[serde(skip_serializing_if = "Option::is_none")]
    position_score: Option<PositionScore>,
}

#[derive(Debug, Serialize)]
struct ArchetypeInfo<'a> {
    archetype: &'static str,
    description: &'static str,
    tags: &'a [String],
}

impl<'a> From<&'a TeamClassification> for ArchetypeInfo<'a> {
    fn from(classification: &'a TeamClassification) -> Self {
        ArchetypeInfo {
            archetype: classification.archetype.as_str(),
            description: classification.description,
            tags: &classification.tags,
        }
    }
}

#[derive(Debug, Serialize)]
struct Archetypes<'a> {
    player1: ArchetypeInfo<'a>,
    player2: ArchetypeInfo<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TurnsResponse<'a> {
    status: &'static str,
    battle_id: &'a str,
    format: &'a str,
    player1: &'a str,
    player2: &'a str,
    winner: Winner,
    turns: Vec<TurnDetail<'a>>,
    archetypes: Archetypes<'a>,
}

async fn get_turns(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let analyzed = state.resolve(&id).await?;
    let battle = &analyzed.replay.battle;

    let turns = battle
        .turns
        .iter()
        .map(|turn| TurnDetail {
            turn_number: turn.turn_number,
            events: &turn.events,
            board_state: &turn.state_after,
            position_score: turn.position_score,
        })
        .collect();

    Ok(Json(TurnsResponse {
        status: "success",
        battle_id: &battle.id,
        format: &battle.format,
        player1: &battle.player1.name,
        player2: &battle.player2.name,
        winner: battle.winner,
        turns,
        archetypes: Archetypes {
            player1: (&battle.player1.archetype).into(),
            player2: (&battle.player2.archetype).into(),
        },
    })
    .into_response())
}
