//! sled-backed favorites store
//!
//! Uses a single sled tree:
//! - `favorites`: [`PhotoKey`] -> bincode-encoded [`FavoriteRecord`]

use std::path::Path;

use sled::{Db, Tree};

use super::{FavoriteRecord, FavoritesStore, PhotoKey, StoreError};
use crate::photo::{Photo, PhotoId};

/// Durable favorites store on top of an embedded sled database
pub struct FavoritesDb {
    db: Db,
    favorites: Tree,
}

impl FavoritesDb {
    /// Opens or creates a favorites database at the specified path
    ///
    /// # Examples
    /// ```no_run
    /// use photoease::favorites::FavoritesDb;
    /// let db = FavoritesDb::open("favorites_db").unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database or its tree cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        let favorites = db.open_tree("favorites")?;
        Ok(Self { db, favorites })
    }

    /// Number of stored favorites
    #[must_use]
    pub fn count(&self) -> usize {
        self.favorites.len()
    }

    /// Remove every favorite
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the tree cannot be cleared.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.favorites.clear()?;
        Ok(())
    }

    /// Flush pending writes to disk
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if sled fails to flush.
    pub fn flush(&self) -> Result<(), StoreError> {
        self.db.flush()?;
        Ok(())
    }

    fn decode(bytes: &[u8]) -> Result<FavoriteRecord, StoreError> {
        let (record, _): (FavoriteRecord, usize) =
            bincode::decode_from_slice(bytes, bincode::config::standard())?;
        Ok(record)
    }
}

impl FavoritesStore for FavoritesDb {
    fn get_all(&self) -> Result<Vec<FavoriteRecord>, StoreError> {
        let mut records = Vec::with_capacity(self.favorites.len());
        for entry in &self.favorites {
            let (key, value) = entry?;
            let key = PhotoKey::from_bytes(&key)?;
            let record = Self::decode(&value)?;
            debug_assert_eq!(key.id(), record.id);
            records.push(record);
        }
        Ok(records)
    }

    fn get(&self, id: PhotoId) -> Result<Option<FavoriteRecord>, StoreError> {
        match self.favorites.get(PhotoKey::new(id))? {
            Some(value) => Ok(Some(Self::decode(&value)?)),
            None => Ok(None),
        }
    }

    fn add(&self, photo: &Photo) -> Result<(), StoreError> {
        let record = FavoriteRecord::from(photo);
        let value = bincode::encode_to_vec(&record, bincode::config::standard())?;
        self.favorites.insert(PhotoKey::new(photo.id), value)?;
        tracing::debug!(id = photo.id, "stored favorite");
        Ok(())
    }

    fn remove(&self, id: PhotoId) -> Result<bool, StoreError> {
        let existed = self.favorites.remove(PhotoKey::new(id))?.is_some();
        if !existed {
            tracing::debug!(id, "no favorite to remove");
        }
        Ok(existed)
    }

    fn contains(&self, id: PhotoId) -> Result<bool, StoreError> {
        Ok(self.favorites.contains_key(PhotoKey::new(id))?)
    }
}
