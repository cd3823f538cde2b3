//! Resolver configuration

use crate::utils::error::ResolveError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const UA_MAC: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";
pub const UA_ANDROID: &str = "Mozilla/5.0 (Linux; Android 10; Pixel 4) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Mobile Safari/537.36";

/// Resolver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// User agent for page, API and stream requests
    pub desktop_user_agent: String,

    /// User agent for short-link expansion
    pub mobile_user_agent: String,

    /// Base URL of the public API
    pub api_base: String,

    /// Per-request timeout (seconds)
    pub timeout_secs: u64,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            desktop_user_agent: UA_MAC.to_string(),
            mobile_user_agent: UA_ANDROID.to_string(),
            api_base: "https://api.bilibili.com".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ResolverSettings {
    /// Load settings from a JSON file; absent fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        let settings: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse settings in {}", path.display()))?;
        settings.validate()?;
        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if given, else from the default location if it exists
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => match default_settings_path() {
                Some(path) if path.exists() => Self::load(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn validate(&self) -> Result<(), ResolveError> {
        if self.desktop_user_agent.trim().is_empty() || self.mobile_user_agent.trim().is_empty() {
            return Err(ResolveError::Config("user agent must not be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(ResolveError::Config("timeout must be at least 1 second".to_string()));
        }
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(ResolveError::Config(format!(
                "api base must be an http(s) URL: {}",
                self.api_base
            )));
        }
        Ok(())
    }

    /// API base without a trailing slash
    pub fn api_root(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }
}

/// `<config_dir>/bililoader/settings.json`
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("bililoader").join("settings.json"))
}
