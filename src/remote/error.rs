//! Remote listing error types
//!
//! # Error Types
//!
//! - **`InvalidEndpoint`**: The configured base URL cannot address the listing.
//!   Raised only while building a fetcher and treated as fatal.
//! - **`NetworkError`**: Transport failure talking to the endpoint
//! - **`StatusError`**: The endpoint answered with a non-success status
//! - **`DecodeError`**: The body is not a JSON array of well-formed photos
//!
//! Everything except `InvalidEndpoint` is recoverable by retrying.

use thiserror::Error;

/// Errors raised while building or using a page fetcher
#[derive(Debug, Error)]
pub enum FetchError {
    /// Base URL is not an absolute http(s) URL
    #[error("Invalid listing endpoint: {0}")]
    InvalidEndpoint(String),

    /// Transport-level failure
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("Server responded with {0}")]
    StatusError(reqwest::StatusCode),

    /// Malformed body or a record missing a required field
    #[error("Could not decode photos: {0}")]
    DecodeError(#[from] serde_json::Error),
}

impl FetchError {
    /// Whether a later retry of the same request can succeed
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidEndpoint(_))
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
