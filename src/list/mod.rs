//! Photo list state
//!
//! A [`ListController`] owns the state of one open list: which source it
//! reads (remote pages or the favorites store), the pages loaded so far, the
//! active search query, the loading flags, and the last error. It is the
//! whole command surface a presentation layer needs.

pub mod controller;
pub mod search;

use crate::photo::{Photo, PhotoId};

pub use controller::{ListController, PendingFetch};

/// Photos requested per remote page
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Largest accepted page size
pub const MAX_PAGE_SIZE: usize = 1000;

/// Which source a list reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListMode {
    /// Paginated remote listing
    #[default]
    All,
    /// Everything in the favorites store, unpaginated
    Favorite,
}

impl ListMode {
    /// Screen title for this list
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::All => "Photo List",
            Self::Favorite => "Photo List (Favorite)",
        }
    }
}

/// Loading indicator state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadingStatus {
    pub is_loading: bool,
    /// Set when the current (or last) load appends a page rather than replacing
    pub is_load_more: bool,
}

/// Observable part of a list's state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListStatus {
    pub loading: LoadingStatus,
    pub error_message: Option<String>,
    /// Latest reaction to a favorite change made by another list
    pub last_reconciliation: Option<Reconciliation>,
}

/// A photo as displayed, with its favorite mark
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRow {
    pub photo: Photo,
    pub is_favorite: bool,
}

impl PhotoRow {
    #[must_use]
    pub const fn new(photo: Photo, is_favorite: bool) -> Self {
        Self { photo, is_favorite }
    }
}

/// Result of a fetch command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Dropped by the reentrancy guard
    Skipped,
    /// Source returned this many photos
    Loaded(usize),
    /// Source failed; see the list's error message
    Failed,
}

/// How a list reacted to a favorite change made by another list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// A single row's favorite mark changed in place
    RowUpdated {
        id: PhotoId,
        /// Position in the filtered view, if the row is currently visible
        index: Option<usize>,
    },
    /// Favorites list was reloaded from the store
    Refreshed,
}
