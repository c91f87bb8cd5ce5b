//! Raw log acquisition from the replay host

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::error::ApiError;
use crate::replay_id::ReplayId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Replay not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Upstream(String),
}

impl From<FetchError> for ApiError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::NotFound(id) => ApiError::NotFound(format!("Replay not found: {id}")),
            FetchError::Upstream(msg) => ApiError::UpstreamFetchFailure(msg),
        }
    }
}

/// One search hit, newest first in search results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayListing {
    pub id: String,
    pub upload_time: i64,
}

/// Where raw replay logs come from
#[async_trait]
pub trait ReplaySource: Send + Sync {
    async fn fetch_log(&self, id: &ReplayId) -> Result<String, FetchError>;

    /// A user's replays in one format, newest first
    async fn search(&self, username: &str, format: &str) -> Result<Vec<ReplayListing>, FetchError>;
}

/// Fetches from a Showdown-compatible replay host
pub struct ShowdownReplays {
    client: reqwest::Client,
    host: String,
}

impl ShowdownReplays {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            host: host.into().trim_end_matches('/').to_string(),
        }
    }

    async fn get(&self, url: &str, what: &str) -> Result<reqwest::Response, FetchError> {
        debug!(url, "Fetching from replay host");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Upstream(format!("request failed: {e}")))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(FetchError::NotFound(what.to_string())),
            status if !status.is_success() => Err(FetchError::Upstream(format!(
                "replay host returned {status}"
            ))),
            _ => Ok(response),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchEntry {
    id: String,
    uploadtime: i64,
    #[serde(default)]
    password: Option<String>,
}

impl From<SearchEntry> for ReplayListing {
    fn from(entry: SearchEntry) -> Self {
        let id = match entry.password {
            Some(password) if !password.is_empty() => format!("{}-{password}pw", entry.id),
            _ => entry.id,
        };
        ReplayListing {
            id,
            upload_time: entry.uploadtime,
        }
    }
}

#[async_trait]
impl ReplaySource for ShowdownReplays {
    async fn fetch_log(&self, id: &ReplayId) -> Result<String, FetchError> {
        let url = format!("{}/{id}.log", self.host);
        let response = self.get(&url, id.as_str()).await?;
        response
            .text()
            .await
            .map_err(|e| FetchError::Upstream(format!("failed to read replay log: {e}")))
    }

    async fn search(&self, username: &str, format: &str) -> Result<Vec<ReplayListing>, FetchError> {
        let url = format!("{}/search.json", self.host);
        let response = self
            .client
            .get(&url)
            .query(&[("user", username), ("format", format)])
            .send()
            .await
            .map_err(|e| FetchError::Upstream(format!("search failed: {e}")))?;
        if !response.status().is_success() {
            return Err(FetchError::Upstream(format!(
                "replay search returned {}",
                response.status()
            )));
        }

        let entries: Vec<SearchEntry> = response
            .json()
            .await
            .map_err(|e| FetchError::Upstream(format!("invalid search response: {e}")))?;
        let mut listings: Vec<ReplayListing> = entries.into_iter().map(Into::into).collect();
        listings.sort_by(|a, b| b.upload_time.cmp(&a.upload_time));
        Ok(listings)
    }
}
