//! Bilibili video resolution
//!
//! The video page normally embeds the DASH stream list (`__playinfo__`) and the
//! descriptive state (`__INITIAL_STATE__`). When the stream list is missing the
//! extractor switches entirely to the public web API.

pub mod api;
pub mod page_state;
pub mod policy;
pub mod schema;

use crate::extractor::http::ReqwestFetcher;
use crate::extractor::models::{Headers, MediaMeta};
use crate::extractor::traits::{host_of, Extractor, Fetcher};
use crate::utils::config::ResolverSettings;
use crate::utils::error::ResolveError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const SOURCE_NAME: &str = "bilibili";
pub const ALBUM: &str = "Bilibili";
/// Bitrate reported for page-state audio, which carries no usable bandwidth
pub const NOMINAL_BITRATE: u32 = 128;

const DOMAINS: &[&str] = &["bilibili.com", "b23.tv"];
const SHORT_DOMAINS: &[&str] = &["b23.tv"];

/// How a page will be resolved, decided once from the fetched HTML
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Page embeds the stream bundle
    PageState { stream_bundle: String },
    /// Stream bundle missing, use the web API
    Api,
}

impl Strategy {
    pub fn select(html: &str) -> Self {
        match page_state::find_stream_bundle(html) {
            Some(stream_bundle) => Strategy::PageState { stream_bundle },
            None => Strategy::Api,
        }
    }
}

/// Extractor for bilibili.com videos and b23.tv short links
pub struct BilibiliExtractor {
    fetcher: Arc<dyn Fetcher>,
    settings: ResolverSettings,
}

impl BilibiliExtractor {
    /// Create an extractor backed by a `reqwest` client
    pub fn new(settings: ResolverSettings) -> Result<Self, ResolveError> {
        settings.validate()?;
        let fetcher = ReqwestFetcher::new(&settings)?;
        Ok(Self::with_fetcher(Arc::new(fetcher), settings))
    }

    /// Create an extractor over any transport
    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>, settings: ResolverSettings) -> Self {
        Self { fetcher, settings }
    }

    /// Expand a short link; the original URL is kept when the lookup fails
    pub async fn expand_short_link(&self, url: &str) -> String {
        let is_short = host_of(url)
            .map(|host| SHORT_DOMAINS.iter().any(|d| host == *d))
            .unwrap_or(false);
        if !is_short {
            return url.to_string();
        }

        let mut headers = Headers::new();
        headers.insert("user-agent".to_string(), self.settings.mobile_user_agent.clone());
        match self.fetcher.resolve_redirect(url, &headers).await {
            Ok(target) => {
                info!("Expanded short link {} -> {}", url, target);
                target
            }
            Err(e) => {
                warn!("Failed to expand short link {}: {}", url, e);
                url.to_string()
            }
        }
    }

    /// Resolve a video URL into a media descriptor
    pub async fn resolve(&self, url: &str) -> Result<MediaMeta, ResolveError> {
        let page_url = self.expand_short_link(url).await;
        let html = page_state::fetch_page(self.fetcher.as_ref(), &page_url, &self.settings).await?;

        match Strategy::select(&html) {
            Strategy::PageState { stream_bundle } => {
                debug!("Using embedded page state for {}", page_url);
                page_state::assemble(&html, &stream_bundle, &page_url, &self.settings)
            }
            Strategy::Api => {
                warn!("No playinfo in {}, falling back to the web API", page_url);
                api::extract(self.fetcher.as_ref(), &page_url, &self.settings).await
            }
        }
    }
}

#[async_trait]
impl Extractor for BilibiliExtractor {
    fn id(&self) -> &'static str {
        SOURCE_NAME
    }

    fn domains(&self) -> &'static [&'static str] {
        DOMAINS
    }

    async fn extract_info(&self, url: &str) -> Result<MediaMeta, ResolveError> {
        self.resolve(url).await
    }
}
