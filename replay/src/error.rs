use thiserror::Error;
use vgccorner_protocol::ParseError;

/// Fatal analysis failures; no partial result is produced
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Replay log is empty")]
    EmptyLog,

    #[error("Malformed log: {0}")]
    MalformedLog(#[from] ParseError),

    #[error("Malformed log: no turns found")]
    NoTurns,

    #[error("Incomplete log: no winner could be determined")]
    IncompleteLog,
}

impl AnalysisError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AnalysisError::EmptyLog => "INVALID_REQUEST",
            AnalysisError::MalformedLog(_) | AnalysisError::NoTurns => "MALFORMED_LOG",
            AnalysisError::IncompleteLog => "INCOMPLETE_LOG",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AnalysisError::EmptyLog.code(), "INVALID_REQUEST");
        assert_eq!(AnalysisError::NoTurns.code(), "MALFORMED_LOG");
        assert_eq!(AnalysisError::IncompleteLog.code(), "INCOMPLETE_LOG");

        let err: AnalysisError = ParseError::MalformedTurn {
            line: 7,
            value: "two".to_string(),
        }
        .into();
        assert_eq!(err.code(), "MALFORMED_LOG");
        assert!(err.to_string().contains("line 7"));
    }
}
