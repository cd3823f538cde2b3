//! Error handling for bililoader

use thiserror::Error;

/// Main error type for URL resolution
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("no audio data")]
    NoAudioData,

    #[error("bvid not found")]
    ContentIdNotFound,

    /// Upstream API refused the request; carries its message untouched
    #[error("{0}")]
    Upstream(String),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unsupported URL: {0}")]
    UnsupportedUrl(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
