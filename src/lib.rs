//! PhotoEase - a paginated photo browser with local favorites
//!
//! This library provides the state engine behind the photo browser: a
//! paginated remote listing, a durable favorites store, live title search
//! over the loaded photos, and a broadcaster that keeps several open lists
//! consistent when a favorite is toggled in one of them.
//!
//! The presentation layer only talks to [`list::ListController`]: it reads
//! rows, loading flags and the error message, and sends fetch, refresh,
//! search and toggle commands.

use thiserror::Error;

pub mod cli;
pub mod commands;
pub mod config;
pub mod events;
pub mod favorites;
pub mod list;
pub mod output;
pub mod photo;
pub mod remote;

#[cfg(test)]
pub mod testing;

pub use events::{FavoriteBus, FavoriteChange, FavoriteListener};
pub use favorites::{FavoriteRecord, FavoritesDb, FavoritesStore, MemoryFavorites};
pub use list::{FetchOutcome, ListController, ListMode, PhotoRow, Reconciliation};
pub use photo::Photo;
pub use remote::{HttpFetcher, PageFetcher, PageRequest};

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum PhotoEaseError {
    /// Favorites store error
    #[error("Favorites error: {0}")]
    StoreError(#[from] favorites::StoreError),
    /// Remote listing error
    #[error("Remote error: {0}")]
    FetchError(#[from] remote::FetchError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// A list could not load anything to show
    #[error("Could not load photos: {0}")]
    LoadFailed(String),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
