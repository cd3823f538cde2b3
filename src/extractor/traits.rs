use crate::extractor::models::{Headers, MediaMeta};
use crate::utils::error::ResolveError;
use async_trait::async_trait;
use url::Url;

/// Core trait for all platform extractors
///
/// This trait isolates the application from the specific platform being resolved.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Source name reported for this platform (e.g., "bilibili")
    fn id(&self) -> &'static str;

    /// Host suffixes served by this extractor
    fn domains(&self) -> &'static [&'static str];

    /// Whether the platform is primarily a music service
    fn is_music_platform(&self) -> bool {
        false
    }

    /// Checks if this extractor can handle the given URL
    fn supports(&self, url: &str) -> bool {
        let Some(host) = host_of(url) else {
            return false;
        };
        self.domains()
            .iter()
            .any(|domain| host == *domain || host.ends_with(&format!(".{domain}")))
    }

    /// Resolves the URL into a normalized media descriptor
    async fn extract_info(&self, url: &str) -> Result<MediaMeta, ResolveError>;
}

/// HTTP transport used by the extractors
///
/// Timeouts and cancellation are the implementation's concern; its errors are
/// passed to the caller unchanged.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `url` and return the body as text
    async fn fetch(&self, url: &str, headers: &Headers) -> Result<String, ResolveError>;

    /// Follow the redirect chain of `url` and return the final location
    async fn resolve_redirect(&self, url: &str, headers: &Headers) -> Result<String, ResolveError>;
}

/// Lowercased host of an absolute http(s) URL
pub(crate) fn host_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    parsed.host_str().map(|host| host.to_ascii_lowercase())
}
