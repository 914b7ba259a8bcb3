//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI
//! args and runs against a [`Session`].

use std::sync::Arc;

use crate::events::FavoriteBus;
use crate::favorites::FavoritesStore;
use crate::list::{ListController, ListMode};
use crate::remote::PageFetcher;

pub mod browse;
pub mod config;
pub mod favorites;

pub use browse::execute as browse;
pub use config::execute as config;

/// Collaborators shared by every list opened during one run
pub struct Session<F> {
    pub fetcher: F,
    pub store: Arc<dyn FavoritesStore>,
    pub bus: FavoriteBus,
    pub page_size: usize,
    pub quiet: bool,
}

impl<F: PageFetcher + Clone> Session<F> {
    #[must_use]
    pub fn new(fetcher: F, store: Arc<dyn FavoritesStore>, page_size: usize, quiet: bool) -> Self {
        Self {
            fetcher,
            store,
            bus: FavoriteBus::new(),
            page_size,
            quiet,
        }
    }

    /// Open a list on this session's fetcher, store and bus
    #[must_use]
    pub fn open_list(&self, mode: ListMode) -> ListController<F> {
        ListController::new(mode, self.fetcher.clone(), Arc::clone(&self.store), &self.bus)
            .with_page_size(self.page_size)
    }
}
