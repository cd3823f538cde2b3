//! reqwest-backed transport

use crate::extractor::models::Headers;
use crate::extractor::traits::Fetcher;
use crate::utils::config::ResolverSettings;
use crate::utils::error::ResolveError;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use tracing::debug;

/// Default [`Fetcher`] over a shared `reqwest::Client`
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    /// Build a client honouring the configured timeout
    pub fn new(settings: &ResolverSettings) -> Result<Self, ResolveError> {
        let client = Client::builder()
            .user_agent(&settings.desktop_user_agent)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .use_rustls_tls()
            .build()?;

        Ok(Self { client })
    }

    fn get(&self, url: &str, headers: &Headers) -> RequestBuilder {
        headers
            .iter()
            .fold(self.client.get(url), |req, (name, value)| {
                req.header(name.as_str(), value.as_str())
            })
    }
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str, headers: &Headers) -> Result<String, ResolveError> {
        debug!("GET {}", url);
        let response = self.get(url, headers).send().await?;

        if !response.status().is_success() {
            return Err(ResolveError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    async fn resolve_redirect(&self, url: &str, headers: &Headers) -> Result<String, ResolveError> {
        debug!("Resolving redirect for {}", url);
        let response = self.get(url, headers).send().await?;
        Ok(response.url().to_string())
    }
}
