//! Error types for counselcal operations.

use thiserror::Error;

/// Errors that can occur in counselcal operations.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Proxy request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Proxy error: {0}")]
    Proxy(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for counselcal operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;
