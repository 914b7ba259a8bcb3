//! Remote photo listing
//!
//! One HTTP GET per page against `<base>/photos?_start={offset}&_limit={limit}`.
//! The response must be a JSON array of photo records; a single record that
//! fails strict decoding fails the whole page.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::photo::normalize::parse_web_url;
use crate::photo::{Photo, PhotoId};

pub mod error;

pub use error::FetchError;

/// Default listing host
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Window of the remote listing to retrieve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
}

impl PageRequest {
    /// Request for zero-based `page` with `page_size` items per page
    ///
    /// The offset saturates instead of overflowing.
    #[must_use]
    pub const fn for_page(page: usize, page_size: usize) -> Self {
        Self {
            offset: page.saturating_mul(page_size),
            limit: page_size,
        }
    }
}

/// Source of photo pages
///
/// The list controller is generic over this trait so tests can script
/// responses without a network.
pub trait PageFetcher {
    /// Fetch the photos in `[offset, offset + limit)`
    fn fetch_page(
        &self,
        request: PageRequest,
    ) -> impl Future<Output = Result<Vec<Photo>, FetchError>>;
}

/// Decode a listing response body
///
/// # Errors
///
/// Returns `FetchError::DecodeError` if the body is not a JSON array or any
/// element is missing `albumId`, `id` or `title` (or has the wrong type).
pub fn decode_page(body: &[u8]) -> Result<Vec<Photo>, FetchError> {
    Ok(serde_json::from_slice(body)?)
}

/// Decode a single-photo response body
///
/// # Errors
///
/// Returns `FetchError::DecodeError` if the body is not one well-formed
/// photo object.
pub fn decode_photo(body: &[u8]) -> Result<Photo, FetchError> {
    Ok(serde_json::from_slice(body)?)
}

/// reqwest-backed fetcher for the photo listing
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base: Url,
    endpoint: Url,
}

impl HttpFetcher {
    /// Build a fetcher for `base_url`
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidEndpoint` if `base_url` is not an absolute
    /// http(s) URL with a host, or `FetchError::NetworkError` if the HTTP
    /// client cannot be constructed.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut base = parse_web_url(base_url)
            .ok_or_else(|| FetchError::InvalidEndpoint(base_url.to_string()))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base
            .join("photos")
            .map_err(|e| FetchError::InvalidEndpoint(format!("{base_url}: {e}")))?;

        let mut builder = Client::builder().user_agent(concat!("photoease/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base,
            endpoint,
        })
    }

    /// Listing endpoint without query parameters
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Full URL requested for `request`
    #[must_use]
    pub fn page_url(&self, request: PageRequest) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("_start", &request.offset.to_string())
            .append_pair("_limit", &request.limit.to_string());
        url
    }

    /// Fetch a single photo by id from `<base>/photos/{id}`
    ///
    /// # Errors
    ///
    /// Returns `FetchError` on transport failure, a non-success status
    /// (404 for unknown ids), or a malformed record.
    pub async fn fetch_photo(&self, id: PhotoId) -> Result<Photo, FetchError> {
        let url = self.photo_url(id)?;
        tracing::debug!(%url, "requesting single photo");
        let body = self.get(url).await?;
        decode_photo(&body)
    }

    /// URL of the single photo `id`
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidEndpoint` if the URL cannot be joined.
    pub fn photo_url(&self, id: PhotoId) -> Result<Url, FetchError> {
        self.base
            .join(&format!("photos/{id}"))
            .map_err(|e| FetchError::InvalidEndpoint(e.to_string()))
    }

    async fn get(&self, url: Url) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::StatusError(status));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, request: PageRequest) -> Result<Vec<Photo>, FetchError> {
        tracing::debug!(
            offset = request.offset,
            limit = request.limit,
            "requesting photo page"
        );
        let body = self.get(self.page_url(request)).await?;
        let photos = decode_page(&body)?;
        tracing::debug!(count = photos.len(), "received photo page");
        Ok(photos)
    }
}
