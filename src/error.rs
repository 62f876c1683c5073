//! Error types for octoflow
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for octoflow
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    /// I/O-level failure of a request (connect refused, timeout, reset).
    /// The requester retries these up to its budget; after exhaustion the
    /// last one is surfaced unchanged.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response with the decoded error body message. Never retried.
    #[error("HTTP request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Max retries ({max_retries}) exceeded")]
    MaxRetriesExceeded { max_retries: u32 },

    // ============================================================================
    // Pagination Errors
    // ============================================================================
    /// Malformed `Link` header fragment. Aborts the pagination run.
    #[error("Failed to parse Link header: {message}")]
    LinkParse { message: String },

    /// No usable "last" link to derive page URLs from. Fatal to the
    /// parallel strategies only.
    #[error("Pagination error: {message}")]
    Pagination { message: String },

    // ============================================================================
    // Decoding Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an API error from a status code and decoded message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a Link header parse error
    pub fn link_parse(message: impl Into<String>) -> Self {
        Self::LinkParse {
            message: message.into(),
        }
    }

    /// Create a pagination error
    pub fn pagination(message: impl Into<String>) -> Self {
        Self::Pagination {
            message: message.into(),
        }
    }

    /// Check whether this error is a transient network failure, i.e. one
    /// that is worth retrying. API-level rejections are permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Http(e) => is_transient_request_error(e),
            Error::MaxRetriesExceeded { .. } => true,
            _ => false,
        }
    }
}

/// Classify a reqwest error as transient (I/O-level) or not.
///
/// Body decode failures also surface as `reqwest::Error` but happen after a
/// successful exchange and must not be retried.
pub(crate) fn is_transient_request_error(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect() || error.is_request()
}

/// Result type alias for octoflow
pub type Result<T> = std::result::Result<T, Error>;
