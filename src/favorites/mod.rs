//! Favorites store
//!
//! Favorites live independently of the paginated remote list: one record per
//! favorited photo, keyed by photo id. The list controller only talks to the
//! [`FavoritesStore`] trait, so the sled-backed [`FavoritesDb`] can be swapped
//! for [`MemoryFavorites`] in tests or throwaway sessions.

use bincode::{Decode, Encode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::photo::{Photo, PhotoId};

pub mod db;
pub mod error;
pub mod memory;
pub mod types;

pub use db::FavoritesDb;
pub use error::StoreError;
pub use memory::MemoryFavorites;
pub use types::PhotoKey;

/// Persisted copy of a favorited photo
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FavoriteRecord {
    pub album_id: i64,
    pub id: PhotoId,
    pub title: String,
    pub url: Option<String>,
    pub thumbnail_url: Option<String>,
    /// Unix timestamp (seconds) of when the photo was favorited
    pub favorited_at: i64,
}

impl FavoriteRecord {
    /// Snapshot `photo` as a favorite created at `at`
    #[must_use]
    pub fn from_photo(photo: &Photo, at: DateTime<Utc>) -> Self {
        Self {
            album_id: photo.album_id,
            id: photo.id,
            title: photo.title.clone(),
            url: photo.url.as_ref().map(ToString::to_string),
            thumbnail_url: photo.thumbnail_url.as_ref().map(ToString::to_string),
            favorited_at: at.timestamp(),
        }
    }

    /// Rebuild the display record; stored URLs are normalized again
    #[must_use]
    pub fn to_photo(&self) -> Photo {
        Photo::new(self.album_id, self.id, self.title.clone())
            .with_urls(self.url.as_deref(), self.thumbnail_url.as_deref())
    }

    #[must_use]
    pub fn favorited_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.favorited_at, 0)
    }
}

impl From<&Photo> for FavoriteRecord {
    fn from(photo: &Photo) -> Self {
        Self::from_photo(photo, Utc::now())
    }
}

impl From<&FavoriteRecord> for Photo {
    fn from(record: &FavoriteRecord) -> Self {
        record.to_photo()
    }
}

/// Read/write contract the list controller needs from a favorites backend
///
/// Mutations must be visible to `contains` and `get_all` on the same store
/// immediately. `contains` is called once per displayed row and must be a
/// keyed lookup, not a scan.
pub trait FavoritesStore: Send + Sync {
    /// All favorites, ascending by photo id
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read or a record cannot be decoded.
    fn get_all(&self) -> Result<Vec<FavoriteRecord>, StoreError>;

    /// Single favorite by id
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read or the record cannot be decoded.
    fn get(&self, id: PhotoId) -> Result<Option<FavoriteRecord>, StoreError>;

    /// Mark `photo` as a favorite, replacing any previous record for its id
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the record cannot be encoded or written.
    fn add(&self, photo: &Photo) -> Result<(), StoreError>;

    /// Remove a favorite; returns whether a record existed
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend write fails.
    fn remove(&self, id: PhotoId) -> Result<bool, StoreError>;

    /// # Errors
    ///
    /// Returns `StoreError` if the backend lookup fails.
    fn contains(&self, id: PhotoId) -> Result<bool, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_photo_keeps_fields() {
        let photo = Photo::new(2, 51, "ut esse iure")
            .with_urls(Some("https://dummyimage.com/600/8e973b"), Some("https://dummyimage.com/150/8e973b"));
        let at = DateTime::from_timestamp(1_740_000_000, 0).unwrap();
        let record = FavoriteRecord::from_photo(&photo, at);

        assert_eq!(record.album_id, 2);
        assert_eq!(record.id, 51);
        assert_eq!(record.url.as_deref(), Some("https://dummyimage.com/600/8e973b"));
        assert_eq!(record.favorited_at(), Some(at));
        assert_eq!(record.to_photo(), photo);
    }

    #[test]
    fn test_record_without_urls() {
        let photo = Photo::new(1, 1, "Photo Title");
        let record = FavoriteRecord::from(&photo);
        assert!(record.url.is_none());
        assert!(record.thumbnail_url.is_none());
        assert_eq!(Photo::from(&record), photo);
    }

    #[test]
    fn test_stored_urls_are_renormalized() {
        let record = FavoriteRecord {
            album_id: 1,
            id: 1,
            title: "legacy".into(),
            url: Some("https://via.placeholder.com/600/92c952".into()),
            thumbnail_url: Some(String::new()),
            favorited_at: 0,
        };
        let photo = record.to_photo();
        assert_eq!(photo.url.unwrap().as_str(), "https://dummyimage.com/600/92c952");
        assert!(photo.thumbnail_url.is_none());
    }
}
