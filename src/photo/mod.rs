//! Photo record and its decoding rules
//!
//! A [`Photo`] is decoded with two different levels of strictness:
//!
//! - `albumId`, `id` and `title` are required and must have the right JSON
//!   type. A record that breaks this is rejected as a whole.
//! - `url` and `thumbnailUrl` are optional and lenient. Missing, `null`,
//!   non-string, or invalid values all decode to `None` (see [`normalize`]).

pub mod normalize;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

pub use normalize::normalize_url;

/// Identifier of a photo in the remote listing and in the favorites store
pub type PhotoId = i64;

/// A single photo as shown in a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub album_id: i64,
    pub id: PhotoId,
    pub title: String,
    #[serde(default, deserialize_with = "lenient_url")]
    pub url: Option<Url>,
    #[serde(default, deserialize_with = "lenient_url")]
    pub thumbnail_url: Option<Url>,
}

impl Photo {
    /// Create a photo without image URLs
    #[must_use]
    pub fn new(album_id: i64, id: PhotoId, title: impl Into<String>) -> Self {
        Self {
            album_id,
            id,
            title: title.into(),
            url: None,
            thumbnail_url: None,
        }
    }

    /// Attach image URLs, normalizing both the same way decoding does
    #[must_use]
    pub fn with_urls(mut self, url: Option<&str>, thumbnail_url: Option<&str>) -> Self {
        self.url = url.and_then(normalize_url);
        self.thumbnail_url = thumbnail_url.and_then(normalize_url);
        self
    }

    /// Case-insensitive substring match against the title
    ///
    /// `needle` is expected to be lowercased already.
    #[must_use]
    pub fn title_contains(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
    }
}

/// Whatever the remote sent for a URL field; only strings are considered
#[derive(Deserialize)]
#[serde(untagged)]
enum RawUrl {
    Text(String),
    Other(IgnoredAny),
}

fn lenient_url<'de, D>(deserializer: D) -> Result<Option<Url>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawUrl>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawUrl::Text(text)) => normalize_url(&text),
        Some(RawUrl::Other(_)) | None => None,
    })
}
