//! URL normalization for photo records
//!
//! Image URLs coming from the listing endpoint (or read back from the
//! favorites store) are never trusted. Each raw string goes through two
//! steps:
//!
//! 1. The retired placeholder host is rewritten to its replacement
//!    (plain textual substitution, not a redirect rule).
//! 2. The result must parse as an absolute `http`/`https` URL with a
//!    non-empty host.
//!
//! Anything that fails either step becomes `None`. This path never errors.

use url::Url;

/// Image host that no longer serves placeholder images
pub const DEPRECATED_PLACEHOLDER_HOST: &str = "via.placeholder.com";

/// Host that serves the same placeholder paths today
pub const REPLACEMENT_PLACEHOLDER_HOST: &str = "dummyimage.com";

/// Rewrite the deprecated placeholder host wherever it appears in `raw`
#[must_use]
pub fn replace_placeholder_host(raw: &str) -> String {
    raw.replace(DEPRECATED_PLACEHOLDER_HOST, REPLACEMENT_PLACEHOLDER_HOST)
}

/// Parse `raw` as a web URL, rejecting other schemes and empty hosts
#[must_use]
pub fn parse_web_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    match url.host_str() {
        Some(host) if !host.is_empty() => Some(url),
        _ => None,
    }
}

/// Full normalization: host substitution followed by validation
///
/// # Examples
/// ```
/// use photoease::photo::normalize::normalize_url;
///
/// let url = normalize_url("https://via.placeholder.com/700/92c952").unwrap();
/// assert_eq!(url.as_str(), "https://dummyimage.com/700/92c952");
///
/// assert!(normalize_url("htp://invalid-url").is_none());
/// ```
#[must_use]
pub fn normalize_url(raw: &str) -> Option<Url> {
    let rewritten = replace_placeholder_host(raw);
    let parsed = parse_web_url(&rewritten);
    if parsed.is_none() {
        tracing::trace!(raw, "dropping unusable image url");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_placeholder_host() {
        assert_eq!(
            replace_placeholder_host("https://via.placeholder.com/150/771796"),
            "https://dummyimage.com/150/771796"
        );
    }

    #[test]
    fn test_replace_leaves_other_hosts_untouched() {
        let raw = "https://images.example.org/150/771796";
        assert_eq!(replace_placeholder_host(raw), raw);
    }

    #[test]
    fn test_parse_web_url_accepts_http_and_https() {
        assert!(parse_web_url("http://dummyimage.com/600/92c952").is_some());
        assert!(parse_web_url("https://dummyimage.com/600/92c952").is_some());
    }

    #[test]
    fn test_parse_web_url_rejects_other_schemes() {
        assert!(parse_web_url("htp://invalid-url").is_none());
        assert!(parse_web_url("htps://invalid-url").is_none());
        assert!(parse_web_url("ftp://dummyimage.com/600").is_none());
        assert!(parse_web_url("file:///etc/passwd").is_none());
    }

    #[test]
    fn test_parse_web_url_rejects_relative_and_garbage() {
        assert!(parse_web_url("/600/92c952").is_none());
        assert!(parse_web_url("not a url").is_none());
        assert!(parse_web_url("").is_none());
    }

    #[test]
    fn test_normalize_url_substitutes_then_validates() {
        let url = normalize_url("https://via.placeholder.com/600/92c952").unwrap();
        assert_eq!(url.host_str(), Some("dummyimage.com"));
        assert_eq!(url.path(), "/600/92c952");
    }

    #[test]
    fn test_normalize_url_invalid_after_substitution() {
        assert!(normalize_url("htp://via.placeholder.com/600").is_none());
    }
}
