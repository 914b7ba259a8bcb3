//! Favorites store error types
//!
//! # Error Types
//!
//! - **`SledError`**: Errors from the underlying sled embedded database
//! - **`DecodeError`**: Failures when deserializing a stored record
//! - **`EncodeError`**: Failures when serializing a record for storage
//! - **`InvalidKey`**: A stored key that is not an encoded photo id
//! - **`NotFound`**: Lookup of a photo id that is not a favorite

use thiserror::Error;

use crate::photo::PhotoId;

/// Favorites store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    SledError(#[from] sled::Error),

    /// Represents a bincode decoding error
    #[error("Error while decoding favorite: {0}")]
    DecodeError(#[from] bincode::error::DecodeError),

    /// Represents a bincode encoding error
    #[error("Error while encoding favorite: {0}")]
    EncodeError(#[from] bincode::error::EncodeError),

    /// Stored key has the wrong width
    #[error("Invalid favorites key of {0} bytes")]
    InvalidKey(usize),

    /// Photo is not in the favorites store
    #[error("Photo {0} is not a favorite")]
    NotFound(PhotoId),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
