//! Error types for store access and application plumbing.
//!
//! The managed store cannot distinguish network, auth and constraint
//! failures at this layer — they all collapse into `StoreError`. Callers
//! log and surface a simple message; mutations are never auto-retried.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store request failed ({status}): {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Not signed in or session expired")]
    AuthExpired,

    #[error("Expected exactly one row, got {0}")]
    Cardinality(usize),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid store URL: {0}")]
    Url(#[from] url::ParseError),
}

impl StoreError {
    /// Returns true if a read may be retried. Only transport-level
    /// failures and throttling/server statuses qualify.
    pub fn is_retryable(&self) -> bool {
        match self {
            StoreError::Http(err) => err.is_timeout() || err.is_connect(),
            StoreError::RequestFailed { status, .. } => {
                *status == 408 || *status == 429 || *status >= 500
            }
            _ => false,
        }
    }
}

/// Top-level application error for config loading and CLI plumbing.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_errors_are_retryable() {
        let err = StoreError::RequestFailed {
            status: 503,
            message: "unavailable".into(),
        };
        assert!(err.is_retryable());

        let err = StoreError::RequestFailed {
            status: 429,
            message: "slow down".into(),
        };
        assert!(err.is_retryable());
    }

    #[test]
    fn test_client_errors_are_not_retryable() {
        let err = StoreError::RequestFailed {
            status: 409,
            message: "conflict".into(),
        };
        assert!(!err.is_retryable());
        assert!(!StoreError::AuthExpired.is_retryable());
        assert!(!StoreError::Cardinality(2).is_retryable());
    }
}
