//! In-memory favorites store
//!
//! Same contract as [`FavoritesDb`](super::FavoritesDb) without persistence.
//! Useful for tests and for sessions that must not touch disk.

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::{FavoriteRecord, FavoritesStore, StoreError};
use crate::photo::{Photo, PhotoId};

#[derive(Debug, Default)]
pub struct MemoryFavorites {
    records: RwLock<BTreeMap<PhotoId, FavoriteRecord>>,
}

impl MemoryFavorites {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `photos`
    #[must_use]
    pub fn with_photos<'a>(photos: impl IntoIterator<Item = &'a Photo>) -> Self {
        let records = photos
            .into_iter()
            .map(|photo| (photo.id, FavoriteRecord::from(photo)))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Every write is a single map operation, so a poisoned map is still whole.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<PhotoId, FavoriteRecord>> {
        self.records.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, BTreeMap<PhotoId, FavoriteRecord>> {
        self.records.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl FavoritesStore for MemoryFavorites {
    fn get_all(&self) -> Result<Vec<FavoriteRecord>, StoreError> {
        Ok(self.read().values().cloned().collect())
    }

    fn get(&self, id: PhotoId) -> Result<Option<FavoriteRecord>, StoreError> {
        Ok(self.read().get(&id).cloned())
    }

    fn add(&self, photo: &Photo) -> Result<(), StoreError> {
        self.write().insert(photo.id, FavoriteRecord::from(photo));
        Ok(())
    }

    fn remove(&self, id: PhotoId) -> Result<bool, StoreError> {
        Ok(self.write().remove(&id).is_some())
    }

    fn contains(&self, id: PhotoId) -> Result<bool, StoreError> {
        Ok(self.read().contains_key(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_contract() {
        let store = MemoryFavorites::new();
        assert!(store.is_empty());

        store.add(&Photo::new(1, 20, "b")).unwrap();
        store.add(&Photo::new(1, 10, "a")).unwrap();

        assert!(store.contains(10).unwrap());
        let ids: Vec<PhotoId> = store.get_all().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![10, 20]);

        assert!(store.remove(10).unwrap());
        assert!(!store.remove(10).unwrap());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_with_photos() {
        let photos = [Photo::new(1, 3, "c"), Photo::new(1, 1, "a")];
        let store = MemoryFavorites::with_photos(&photos);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(3).unwrap().unwrap().title, "c");
    }
}
