//! Testing utilities for photoease
//!
//! Provides a temporary sled-backed favorites store and a scripted
//! [`PageFetcher`] that answers from a queue instead of the network.
//!
//! Only available when compiled with `cfg(test)`.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use reqwest::StatusCode;
use tempfile::TempDir;

use crate::favorites::FavoritesDb;
use crate::photo::{Photo, PhotoId};
use crate::remote::{FetchError, PageFetcher, PageRequest};

/// Favorites database in a temporary directory, removed on drop
pub struct TestFavoritesDb {
    db: FavoritesDb,
    _dir: TempDir,
}

impl TestFavoritesDb {
    /// # Panics
    /// Panics if the temporary directory or the database cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db = FavoritesDb::open(dir.path().join("favorites")).expect("Failed to open test database");
        Self { db, _dir: dir }
    }

    #[must_use]
    pub const fn db(&self) -> &FavoritesDb {
        &self.db
    }
}

enum Scripted {
    Page(Vec<Photo>),
    Failure(StatusCode),
}

#[derive(Default)]
struct Script {
    responses: VecDeque<Scripted>,
    requests: Vec<PageRequest>,
}

/// Fetcher that replays queued pages and failures
///
/// Clones share the same script, so a test can keep one handle while the
/// controller owns another. An exhausted script answers with empty pages.
#[derive(Clone, Default)]
pub struct ScriptedFetcher {
    script: Arc<Mutex<Script>>,
}

impl ScriptedFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_page(&self, photos: Vec<Photo>) {
        self.lock().responses.push_back(Scripted::Page(photos));
    }

    pub fn push_failure(&self, status: StatusCode) {
        self.lock().responses.push_back(Scripted::Failure(status));
    }

    /// Every request received so far, oldest first
    #[must_use]
    pub fn requests(&self) -> Vec<PageRequest> {
        self.lock().requests.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PageFetcher for ScriptedFetcher {
    async fn fetch_page(&self, request: PageRequest) -> Result<Vec<Photo>, FetchError> {
        let mut script = self.lock();
        script.requests.push(request);
        match script.responses.pop_front() {
            Some(Scripted::Page(photos)) => Ok(photos),
            Some(Scripted::Failure(status)) => Err(FetchError::StatusError(status)),
            None => Ok(Vec::new()),
        }
    }
}

/// Photos with the given ids, titled `photo <id>`
#[must_use]
pub fn photos(ids: &[PhotoId]) -> Vec<Photo> {
    ids.iter()
        .map(|&id| {
            Photo::new(1 + (id - 1).max(0) / 50, id, format!("photo {id}")).with_urls(
                Some(&format!("https://dummyimage.com/600/{id:06x}")),
                Some(&format!("https://dummyimage.com/150/{id:06x}")),
            )
        })
        .collect()
}

/// A full remote page: ids `page * size + 1 ..= (page + 1) * size`
#[must_use]
pub fn photo_page(page: usize, size: usize) -> Vec<Photo> {
    let first = (page * size) as PhotoId + 1;
    let ids: Vec<PhotoId> = (first..first + size as PhotoId).collect();
    photos(&ids)
}
