use crate::extractor::models::MediaMeta;
use crate::extractor::traits::Extractor;
use crate::utils::error::ResolveError;
use std::sync::Arc;
use tracing::debug;

/// The Extractor Registry
///
/// This struct holds the available platform extractors and routes each URL
/// to the first one whose domains match it.
pub struct ExtractorRegistry {
    extractors: Vec<Arc<dyn Extractor>>,
}

impl ExtractorRegistry {
    pub fn new(extractors: Vec<Arc<dyn Extractor>>) -> Self {
        Self { extractors }
    }

    /// Find the extractor serving a given URL
    pub fn find_extractor(&self, url: &str) -> Option<&Arc<dyn Extractor>> {
        let found = self.extractors.iter().find(|e| e.supports(url));
        if let Some(extractor) = found {
            debug!("Routing to extractor: {}", extractor.id());
        }
        found
    }

    /// Resolve the URL with the matching extractor
    pub async fn extract_info(&self, url: &str) -> Result<MediaMeta, ResolveError> {
        let extractor = self
            .find_extractor(url)
            .ok_or_else(|| ResolveError::UnsupportedUrl(url.to_string()))?;
        extractor.extract_info(url).await
    }
}
