use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use vgccorner_replay::AnalysisError;

/// Failures surfaced to API callers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Failed to fetch replay: {0}")]
    UpstreamFetchFailure(String),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Analysis was cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "INVALID_REQUEST",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::UpstreamFetchFailure(_) => "UPSTREAM_FETCH_FAILURE",
            ApiError::Analysis(e) => e.code(),
            ApiError::Cancelled => "CANCELLED",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) | ApiError::Analysis(AnalysisError::EmptyLog) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UpstreamFetchFailure(_) => StatusCode::BAD_GATEWAY,
            ApiError::Analysis(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            ApiError::UpstreamFetchFailure(details) => ErrorBody {
                error: "Failed to fetch replay".to_string(),
                code: self.code(),
                details: Some(details.clone()),
            },
            ApiError::Analysis(e) => ErrorBody {
                error: "Failed to analyze battle log".to_string(),
                code: self.code(),
                details: Some(e.to_string()),
            },
            ApiError::Internal(_) => ErrorBody {
                error: "Internal server error".to_string(),
                code: self.code(),
                details: None,
            },
            _ => ErrorBody {
                error: self.to_string(),
                code: self.code(),
                details: None,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!(error = %detail, "Request failed");
        }
        (self.status(), Json(self.body())).into_response()
    }
}
