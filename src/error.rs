//! Error types for the trendlab collector
//!
//! Fetch failures get their own enum because the collector treats every
//! variant identically at the fetch boundary: log and move on to the next
//! combination. The unified [`Error`] wraps everything that can stop a run
//! before it starts (config, I/O, export).

use thiserror::Error;

/// Errors that can occur while talking to the DataLab API
///
/// Transport failures map to [`Http`] and [`Timeout`], non-2xx responses
/// to [`Status`], and malformed response bodies to [`Payload`].
///
/// [`Http`]: FetchError::Http
/// [`Timeout`]: FetchError::Timeout
/// [`Status`]: FetchError::Status
/// [`Payload`]: FetchError::Payload
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP transport error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timed out
    #[error("request timed out")]
    Timeout,

    /// Non-success status code from the service
    #[error("service returned status {0}")]
    Status(u16),

    /// Response body did not match the expected shape
    #[error("malformed response payload: {0}")]
    Payload(String),
}

/// Unified error type for the trendlab crate
#[derive(Error, Debug)]
pub enum Error {
    /// Fetch-specific errors
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Invalid date range
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV export errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::Status(500);
        assert_eq!(err.to_string(), "service returned status 500");

        let err = FetchError::Payload("missing field `results`".to_string());
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn test_fetch_error_wraps_into_unified() {
        let err: Error = FetchError::Timeout.into();
        assert!(matches!(err, Error::Fetch(FetchError::Timeout)));
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("missing NAVER_CLIENT_ID");
        assert!(matches!(err, Error::Config(_)));
    }
}
