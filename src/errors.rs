//! Error types for the tutorbuddy agent pipeline
//!
//! Parse failures (equations, answers) are never errors: they surface as
//! `None` fields plus explanatory text so the pipeline keeps flowing. The
//! variants here cover the conditions that genuinely stop a stage.

use thiserror::Error;

/// Main error type for the tutoring pipeline
#[derive(Error, Debug)]
pub enum CoachError {
    /// A stage was invoked before the stage that produces its input
    /// (e.g. grading a quiz before one was generated). The one hard
    /// error in the pipeline; everything else degrades to a default.
    #[error("No pending {what} found for user '{user_id}' - run the earlier stage first")]
    MissingPriorState { user_id: String, what: String },

    /// Expansion hook errors (always swallowed at the call site)
    #[error("Expansion hook error: {0}")]
    HookError(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors (memory store, config)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Memory store errors not covered by I/O
    #[error("Memory store error: {0}")]
    StorageError(String),

    /// Generic errors with context
    #[error("Coach error: {0}")]
    Generic(String),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, CoachError>;

/// Convert anyhow errors to CoachError
impl From<anyhow::Error> for CoachError {
    fn from(err: anyhow::Error) -> Self {
        CoachError::Generic(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_prior_state_display() {
        let err = CoachError::MissingPriorState {
            user_id: "student_001".to_string(),
            what: "quiz".to_string(),
        };
        assert!(err.to_string().contains("student_001"));
        assert!(err.to_string().contains("quiz"));
    }

    #[test]
    fn test_hook_error_display() {
        let err = CoachError::HookError("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
    }
}
