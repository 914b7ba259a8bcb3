//! Key encoding for the favorites tree
//!
//! sled orders keys by their raw bytes. Photo ids are signed, so the key is
//! the big-endian id with its sign bit flipped: byte order then matches
//! numeric order and a full scan of the tree yields favorites ascending by id.

use super::error::StoreError;
use crate::photo::PhotoId;

const SIGN_BIT: u64 = 1 << 63;

/// Order-preserving database key for a photo id
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PhotoKey([u8; 8]);

impl PhotoKey {
    #[must_use]
    pub const fn new(id: PhotoId) -> Self {
        Self(((id as u64) ^ SIGN_BIT).to_be_bytes())
    }

    /// # Errors
    ///
    /// Returns `StoreError::InvalidKey` if `bytes` is not exactly eight bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StoreError> {
        let raw: [u8; 8] = bytes
            .try_into()
            .map_err(|_| StoreError::InvalidKey(bytes.len()))?;
        Ok(Self(raw))
    }

    #[must_use]
    pub const fn id(&self) -> PhotoId {
        (u64::from_be_bytes(self.0) ^ SIGN_BIT) as PhotoId
    }
}

impl AsRef<[u8]> for PhotoKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<PhotoId> for PhotoKey {
    fn from(id: PhotoId) -> Self {
        Self::new(id)
    }
}
