//! Error types for the Aide assistant.

use thiserror::Error;

/// Main error type for assistant operations.
///
/// Every variant except [`AssistantError::Internal`] is recovered by the
/// response coordinator and turned into a user-facing message.
#[derive(Error, Debug, Clone)]
pub enum AssistantError {
    /// A lookup (e.g. geocoding) had no match.
    #[error("No match found for '{query}'")]
    LookupNotFound { query: String },

    /// A network or service-layer failure in an external collaborator.
    #[error("{service} unavailable: {message}")]
    ServiceUnavailable { service: String, message: String },

    /// An utterance could not be turned into a complete command.
    #[error("Parse failure: {message}")]
    ParseFailure { message: String },

    /// An external call did not finish within its time budget.
    #[error("Operation timed out after {duration_ms}ms: {message}")]
    Timeout { duration_ms: u64, message: String },

    /// Session configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Internal error (should not happen).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AssistantError {
    /// Shorthand for a [`AssistantError::ServiceUnavailable`].
    pub fn unavailable(service: impl Into<String>, message: impl ToString) -> Self {
        AssistantError::ServiceUnavailable {
            service: service.into(),
            message: message.to_string(),
        }
    }

    /// Returns true if this error is recoverable.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            AssistantError::InvalidConfig(_) | AssistantError::Internal(_)
        )
    }
}

/// Convenience Result type for assistant operations.
pub type Result<T> = std::result::Result<T, AssistantError>;

impl From<serde_json::Error> for AssistantError {
    fn from(err: serde_json::Error) -> Self {
        AssistantError::InvalidConfig(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable() {
        assert!(AssistantError::LookupNotFound { query: "x".into() }.is_recoverable());
        assert!(AssistantError::unavailable("weather", "boom").is_recoverable());
        assert!(AssistantError::Timeout { duration_ms: 10, message: "slow".into() }.is_recoverable());
        assert!(!AssistantError::Internal("bug".into()).is_recoverable());
    }

    #[test]
    fn test_display() {
        let err = AssistantError::unavailable("news feed", "connection refused");
        assert_eq!(err.to_string(), "news feed unavailable: connection refused");
    }
}
