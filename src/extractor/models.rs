//! Normalized media descriptor shared by all extractors

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const RATIO_360: &str = "360";
pub const RATIO_480: &str = "480";
pub const RATIO_720: &str = "720";
pub const RATIO_1080: &str = "1080";
pub const RATIO_1080_PLUS: &str = "1080+";
pub const RATIO_UNKNOWN: &str = "unknown";

/// Request headers the consumer must send when fetching the streams
pub type Headers = BTreeMap<String, String>;

/// Kind of resource a descriptor points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Audio,
    Video,
}

/// Resolved media information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaMeta {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub artist: String,
    pub album: String,
    /// Length in seconds
    pub duration: u64,
    #[serde(default)]
    pub cover_url: String,
    #[serde(default)]
    pub headers: Headers,
    pub resource_type: ResourceType,
    #[serde(default)]
    pub audios: Vec<Audio>,
    #[serde(default)]
    pub videos: Vec<Video>,
}

/// Audio stream candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audio {
    pub url: String,
    /// Kilobits per second
    pub bitrate: u32,
}

/// Video stream candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub ratio: String,
    /// Video-only stream, audio has to be muxed in separately
    pub need_extra_audio: bool,
}
