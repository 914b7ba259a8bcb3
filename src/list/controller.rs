//! Pagination and mode state machine for one open photo list
//!
//! # Paging
//!
//! In [`ListMode::All`] the controller walks the remote listing in windows of
//! `page_size`. `current_page` is advanced *before* a load-more request and
//! rolled back if that request fails, so a failed load-more is net-zero.
//! A page shorter than `page_size` means the listing is exhausted and
//! [`ListController::can_load_more`] stays false until the next refresh.
//!
//! In [`ListMode::Favorite`] paging does not apply: every fetch replaces the
//! rows with the full contents of the favorites store.
//!
//! # Reentrancy
//!
//! Only one load runs at a time. A fetch or refresh arriving while
//! `is_loading` is set is dropped (not queued) and reports
//! [`FetchOutcome::Skipped`].
//!
//! # Favorites across lists
//!
//! Every controller subscribes to the shared [`FavoriteBus`] when created.
//! Toggling a favorite publishes the change, and every other open list has
//! reconciled before [`ListController::toggle_favorite`] returns: a remote
//! list updates the affected row, the favorites list reloads from the store.
//! The latest reaction is published as [`ListStatus::last_reconciliation`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use super::search::filter_rows;
use super::{
    DEFAULT_PAGE_SIZE, FetchOutcome, ListMode, ListStatus, LoadingStatus, MAX_PAGE_SIZE, PhotoRow,
    Reconciliation,
};
use crate::events::{FavoriteBus, FavoriteChange, FavoriteListener, FavoriteSubscription, SubscriberId};
use crate::favorites::{FavoritesStore, StoreError};
use crate::photo::{Photo, PhotoId};
use crate::remote::{FetchError, PageFetcher, PageRequest};

/// A remote page load that has been started but not yet applied
///
/// Produced by [`ListController::begin_fetch`]; hand it back to
/// [`ListController::complete_fetch`] of the same list together with the
/// fetch result. Completing consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingFetch {
    owner: SubscriberId,
    request: PageRequest,
    refresh: bool,
    load_more: bool,
}

impl PendingFetch {
    /// Window the caller should fetch
    #[must_use]
    pub const fn request(&self) -> PageRequest {
        self.request
    }
}

#[derive(Debug)]
struct ListState {
    page_size: usize,
    current_page: usize,
    last_page_load_count: Option<usize>,
    accumulated: Vec<PhotoRow>,
    filtered: Vec<PhotoRow>,
    query: String,
}

impl ListState {
    const fn new() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            current_page: 0,
            last_page_load_count: None,
            accumulated: Vec::new(),
            filtered: Vec::new(),
            query: String::new(),
        }
    }

    const fn reset_paging(&mut self) {
        self.current_page = 0;
        self.last_page_load_count = None;
    }

    fn apply_query(&mut self) {
        self.filtered = filter_rows(&self.accumulated, &self.query);
    }

    /// Set the mark on every row with `id`; returns the first filtered index, if any row matched
    fn set_row_favorite(&mut self, id: PhotoId, is_favorite: bool) -> Option<Option<usize>> {
        let mut matched = false;
        for row in self.accumulated.iter_mut().filter(|row| row.photo.id == id) {
            row.is_favorite = is_favorite;
            matched = true;
        }
        if !matched {
            return None;
        }

        let mut first = None;
        for (index, row) in self.filtered.iter_mut().enumerate() {
            if row.photo.id == id {
                row.is_favorite = is_favorite;
                first.get_or_insert(index);
            }
        }
        Some(first)
    }
}

/// The part of a list other lists reach through the bus
///
/// The state lock is never held while the store is called.
struct ListShared {
    mode: ListMode,
    store: Arc<dyn FavoritesStore>,
    state: Mutex<ListState>,
    status: watch::Sender<ListStatus>,
}

impl ListShared {
    fn lock(&self) -> MutexGuard<'_, ListState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_favorite(&self, id: PhotoId) -> bool {
        self.store.contains(id).unwrap_or_else(|error| {
            tracing::warn!(%error, id, "favorite lookup failed");
            false
        })
    }

    fn row_for(&self, photo: Photo) -> PhotoRow {
        let is_favorite = self.is_favorite(photo.id);
        PhotoRow::new(photo, is_favorite)
    }

    fn set_loading(&self, loading: LoadingStatus) {
        self.status.send_modify(|status| status.loading = loading);
    }

    fn load_favorites(&self) -> FetchOutcome {
        self.set_loading(LoadingStatus {
            is_loading: true,
            is_load_more: false,
        });
        let idle = LoadingStatus::default();

        match self.store.get_all() {
            Ok(records) => {
                let mut rows: Vec<PhotoRow> = records
                    .iter()
                    .map(|record| PhotoRow::new(record.to_photo(), true))
                    .collect();
                rows.sort_by_key(|row| row.photo.id);
                let count = rows.len();
                {
                    let mut state = self.lock();
                    state.accumulated = rows;
                    state.last_page_load_count = Some(count);
                    state.apply_query();
                }
                self.status.send_modify(|status| {
                    status.loading = idle;
                    status.error_message = None;
                });
                FetchOutcome::Loaded(count)
            }
            Err(error) => {
                tracing::warn!(%error, "favorites failed to load");
                self.status.send_modify(|status| {
                    status.loading = idle;
                    status.error_message = Some(error.to_string());
                });
                FetchOutcome::Failed
            }
        }
    }

    fn reload_favorites(&self) -> FetchOutcome {
        self.lock().reset_paging();
        self.load_favorites()
    }
}

impl FavoriteListener for ListShared {
    fn favorite_changed(&self, change: &FavoriteChange) {
        let reconciliation = match self.mode {
            ListMode::Favorite => {
                self.reload_favorites();
                tracing::debug!(id = change.photo.id, "favorites list refreshed");
                Reconciliation::Refreshed
            }
            ListMode::All => {
                let id = change.photo.id;
                let is_favorite = self.store.contains(id).unwrap_or_else(|error| {
                    tracing::warn!(%error, id, "favorite lookup failed, trusting announcement");
                    change.is_favorite
                });
                let Some(index) = self.lock().set_row_favorite(id, is_favorite) else {
                    return;
                };
                tracing::debug!(id, ?index, "row favorite mark updated");
                Reconciliation::RowUpdated { id, index }
            }
        };
        self.status
            .send_modify(|status| status.last_reconciliation = Some(reconciliation));
    }
}

/// State and commands of one photo list
pub struct ListController<F> {
    fetcher: F,
    bus: FavoriteBus,
    shared: Arc<ListShared>,
    subscription: FavoriteSubscription,
}

impl<F: PageFetcher> ListController<F> {
    /// Open a list in `mode` and subscribe it to `bus`
    ///
    /// Nothing is loaded until the first [`fetch`](Self::fetch) or
    /// [`refresh`](Self::refresh).
    #[must_use]
    pub fn new(mode: ListMode, fetcher: F, store: Arc<dyn FavoritesStore>, bus: &FavoriteBus) -> Self {
        let (status, _) = watch::channel(ListStatus::default());
        let shared = Arc::new(ListShared {
            mode,
            store,
            state: Mutex::new(ListState::new()),
            status,
        });
        let subscription = bus.subscribe(&shared);
        Self {
            fetcher,
            bus: bus.clone(),
            shared,
            subscription,
        }
    }

    /// Use `page_size` photos per remote page, clamped to `1..=MAX_PAGE_SIZE`
    #[must_use]
    pub fn with_page_size(self, page_size: usize) -> Self {
        self.shared.lock().page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Load photos from the list's source
    ///
    /// In `All` mode `load_more` advances to the next page and `refresh`
    /// replaces the loaded rows instead of appending. In `Favorite` mode both
    /// flags are ignored and the favorites store is reloaded.
    ///
    /// Failures never clear loaded rows; they are reported through
    /// [`error_message`](Self::error_message).
    pub async fn fetch(&mut self, refresh: bool, load_more: bool) -> FetchOutcome {
        match self.shared.mode {
            ListMode::All => {
                let Some(pending) = self.begin_fetch(refresh, load_more) else {
                    return FetchOutcome::Skipped;
                };
                let result = self.fetcher.fetch_page(pending.request).await;
                self.complete_fetch(pending, result)
            }
            ListMode::Favorite => self.shared.load_favorites(),
        }
    }

    /// Reset paging and reload from the first page
    pub async fn refresh(&mut self) -> FetchOutcome {
        if self.is_loading() {
            tracing::debug!("refresh dropped, list is already loading");
            return FetchOutcome::Skipped;
        }
        self.shared.lock().reset_paging();
        self.fetch(true, false).await
    }

    /// Load the page after the last one
    pub async fn load_more(&mut self) -> FetchOutcome {
        self.fetch(false, true).await
    }

    /// Start a remote page load, or `None` if the request is dropped
    ///
    /// Lets a caller run the request itself and report back with
    /// [`complete_fetch`](Self::complete_fetch). Returns `None` in
    /// `Favorite` mode or while another load is in flight.
    pub fn begin_fetch(&mut self, refresh: bool, load_more: bool) -> Option<PendingFetch> {
        if self.shared.mode != ListMode::All {
            return None;
        }
        if self.is_loading() {
            tracing::debug!(load_more, refresh, "fetch dropped, list is already loading");
            return None;
        }

        let request = {
            let mut state = self.shared.lock();
            if load_more {
                state.current_page += 1;
            }
            PageRequest::for_page(state.current_page, state.page_size)
        };
        tracing::debug!(
            offset = request.offset,
            limit = request.limit,
            "loading photo page"
        );
        self.shared.set_loading(LoadingStatus {
            is_loading: true,
            is_load_more: load_more,
        });

        Some(PendingFetch {
            owner: self.subscription.id(),
            request,
            refresh,
            load_more,
        })
    }

    /// Apply the result of a load started with [`begin_fetch`](Self::begin_fetch)
    ///
    /// A completion that does not belong to this list's in-flight load is
    /// ignored and reports [`FetchOutcome::Skipped`].
    pub fn complete_fetch(
        &mut self,
        pending: PendingFetch,
        result: Result<Vec<Photo>, FetchError>,
    ) -> FetchOutcome {
        if pending.owner != self.subscription.id() || !self.is_loading() {
            tracing::debug!(offset = pending.request.offset, "stale page completion ignored");
            return FetchOutcome::Skipped;
        }
        let loading = LoadingStatus {
            is_loading: false,
            is_load_more: pending.load_more,
        };

        match result {
            Ok(photos) => {
                let count = photos.len();
                let rows: Vec<PhotoRow> = photos.into_iter().map(|p| self.shared.row_for(p)).collect();
                {
                    let mut state = self.shared.lock();
                    if pending.refresh {
                        state.accumulated.clear();
                    }
                    state.accumulated.extend(rows);
                    state.accumulated.sort_by_key(|row| row.photo.id);
                    state.last_page_load_count = Some(count);
                    state.apply_query();
                }
                self.shared.status.send_modify(|status| {
                    status.loading = loading;
                    status.error_message = None;
                });
                FetchOutcome::Loaded(count)
            }
            Err(error) => {
                tracing::warn!(%error, offset = pending.request.offset, "photo page failed to load");
                {
                    let mut state = self.shared.lock();
                    if pending.load_more {
                        state.current_page = state.current_page.saturating_sub(1);
                    }
                    state.last_page_load_count = None;
                }
                self.shared.status.send_modify(|status| {
                    status.loading = loading;
                    status.error_message = Some(error.to_string());
                });
                FetchOutcome::Failed
            }
        }
    }

    /// Whether a load-more request is worth issuing now
    ///
    /// Always false for the favorites list and while loading. Otherwise
    /// requires at least one loaded photo, and either an unknown last page
    /// size (nothing completed yet, or the last load failed) or a full page.
    #[must_use]
    pub fn can_load_more(&self) -> bool {
        if self.shared.mode != ListMode::All || self.is_loading() {
            return false;
        }
        let state = self.shared.lock();
        !state.accumulated.is_empty()
            && state
                .last_page_load_count
                .is_none_or(|count| count >= state.page_size)
    }

    /// Filter loaded rows by title; an empty query shows everything
    pub fn search(&mut self, query: &str) {
        let mut state = self.shared.lock();
        query.clone_into(&mut state.query);
        state.apply_query();
    }

    /// Add or remove `photo` from favorites and tell the other lists
    ///
    /// The favorites list reloads itself right away; a remote list updates
    /// its own row mark. Every other subscribed list has reconciled by the
    /// time this returns.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the favorites store rejects the change. Nothing
    /// is published in that case.
    pub fn toggle_favorite(&mut self, photo: &Photo, mark_favorite: bool) -> Result<(), StoreError> {
        if mark_favorite {
            self.shared.store.add(photo)?;
        } else {
            self.shared.store.remove(photo.id)?;
        }

        if self.shared.mode == ListMode::Favorite {
            self.shared.reload_favorites();
        } else {
            self.shared.lock().set_row_favorite(photo.id, mark_favorite);
        }

        self.bus.publish(FavoriteChange {
            photo: photo.clone(),
            is_favorite: mark_favorite,
            origin: self.subscription.id(),
        });
        Ok(())
    }

    /// Clear the error message once it has been shown
    pub fn dismiss_error(&mut self) {
        self.shared
            .status
            .send_if_modified(|status| status.error_message.take().is_some());
    }

    /// Watch loading flags, error message and reconciliations as they change
    #[must_use]
    pub fn observe_status(&self) -> watch::Receiver<ListStatus> {
        self.shared.status.subscribe()
    }

    #[must_use]
    pub fn mode(&self) -> ListMode {
        self.shared.mode
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.shared.lock().page_size
    }

    #[must_use]
    pub fn current_page(&self) -> usize {
        self.shared.lock().current_page
    }

    /// Size of the last completed page; `None` before the first load or after a failure
    #[must_use]
    pub fn last_page_load_count(&self) -> Option<usize> {
        self.shared.lock().last_page_load_count
    }

    /// Snapshot of the rows that match the active search query
    #[must_use]
    pub fn filtered_rows(&self) -> Vec<PhotoRow> {
        self.shared.lock().filtered.clone()
    }

    #[must_use]
    pub fn filtered_photos(&self) -> Vec<Photo> {
        self.shared
            .lock()
            .filtered
            .iter()
            .map(|row| row.photo.clone())
            .collect()
    }

    /// Snapshot of every loaded row, ascending by id, regardless of the search query
    #[must_use]
    pub fn accumulated_rows(&self) -> Vec<PhotoRow> {
        self.shared.lock().accumulated.clone()
    }

    /// Number of loaded rows, regardless of the search query
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.shared.lock().accumulated.len()
    }

    #[must_use]
    pub fn query(&self) -> String {
        self.shared.lock().query.clone()
    }

    #[must_use]
    pub fn loading_status(&self) -> LoadingStatus {
        self.shared.status.borrow().loading
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading_status().is_loading
    }

    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.shared.status.borrow().error_message.clone()
    }

    #[must_use]
    pub fn last_reconciliation(&self) -> Option<Reconciliation> {
        self.shared.status.borrow().last_reconciliation
    }

    #[must_use]
    pub const fn subscriber_id(&self) -> SubscriberId {
        self.subscription.id()
    }

    /// Current favorite state of `id` according to the store
    #[must_use]
    pub fn is_favorite(&self, id: PhotoId) -> bool {
        self.shared.is_favorite(id)
    }
}
