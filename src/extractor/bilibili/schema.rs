//! Upstream JSON shapes
//!
//! The embedded page state and the public API share most of their structure, so
//! the named types here are reused by both extraction paths.

use crate::extractor::bilibili::policy;
use crate::utils::error::ResolveError;
use serde::{Deserialize, Deserializer};

/// Upstream sends `null` for empty lists
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Owner {
    pub mid: u64,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Staff {
    pub mid: u64,
    pub title: String,
    pub name: String,
}

/// Descriptive part of a video: `videoData` in the page state, `data` in the view endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VideoDetail {
    pub bvid: String,
    pub cid: u64,
    pub title: String,
    pub desc: String,
    pub pic: String,
    pub duration: u64,
    pub owner: Owner,
    #[serde(deserialize_with = "null_as_default")]
    pub staff: Vec<Staff>,
}

impl VideoDetail {
    /// Display artist derived from owner and staff credits
    pub fn artist(&self) -> String {
        let staff: Vec<&str> = self.staff.iter().map(|s| s.name.as_str()).collect();
        policy::resolve_artist(&self.owner.name, staff.as_slice())
    }
}

/// One DASH representation (audio or video)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashTrack {
    /// Quality id for video tracks, codec id for audio tracks
    pub id: u32,
    /// Read from `baseUrl` only; upstream also sends a snake_case copy
    pub base_url: String,
    /// Bits per second
    pub bandwidth: u64,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Dash {
    /// Seconds
    pub duration: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub video: Vec<DashTrack>,
    #[serde(deserialize_with = "null_as_default")]
    pub audio: Vec<DashTrack>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlayData {
    pub dash: Dash,
}

/// `window.__playinfo__` payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StreamBundle {
    pub data: PlayData,
}

impl StreamBundle {
    /// Decode failure is fatal for the page-state path
    pub fn parse(raw: &str) -> Result<Self, ResolveError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn dash(&self) -> &Dash {
        &self.data.dash
    }
}

/// `window.__INITIAL_STATE__` payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DescriptiveBundle {
    #[serde(rename = "videoData")]
    pub video_data: VideoDetail,
}

impl DescriptiveBundle {
    /// Caller decides how to degrade on failure
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Envelope common to every API endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Default + Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: T,
}

impl<T> ApiResponse<T>
where
    T: Default + for<'de> Deserialize<'de>,
{
    /// Decode the envelope; a non-zero code is returned as the upstream message
    pub fn parse(raw: &str) -> Result<T, ResolveError> {
        let response: ApiResponse<T> = serde_json::from_str(raw)?;
        if response.code != 0 {
            return Err(ResolveError::Upstream(response.message));
        }
        Ok(response.data)
    }
}

pub type ViewResponse = ApiResponse<VideoDetail>;
pub type PlayUrlResponse = ApiResponse<PlayData>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_bundle_parses_playinfo() {
        let raw = r#"{"code":0,"message":"0","data":{"quality":80,"dash":{
            "duration":212,
            "video":[{"id":80,"baseUrl":"https://upos/v80.m4s","bandwidth":2000000,"width":1920,"height":1080}],
            "audio":[{"id":30280,"baseUrl":"https://upos/a.m4s","bandwidth":192000}]}}}"#;
        let bundle = StreamBundle::parse(raw).unwrap();
        assert_eq!(bundle.dash().duration, 212);
        assert_eq!(bundle.dash().video[0].width, 1920);
        assert_eq!(bundle.dash().audio[0].base_url, "https://upos/a.m4s");
    }

    #[test]
    fn test_track_with_camel_and_snake_keys() {
        let raw = r#"{"data":{"dash":{"duration":5,"video":[],"audio":[{"id":30280,
            "baseUrl":"https://upos/a.m4s","base_url":"https://upos/a.m4s",
            "backupUrl":["https://bak/a.m4s"],"backup_url":["https://bak/a.m4s"],
            "bandwidth":192000}]}}}"#;
        let bundle = StreamBundle::parse(raw).unwrap();
        assert_eq!(bundle.dash().audio[0].base_url, "https://upos/a.m4s");
        assert_eq!(bundle.dash().audio[0].bandwidth, 192000);

        let play = r#"{"code":0,"message":"0","data":{"dash":{"video":[{"id":64,
            "baseUrl":"https://upos/v64.m4s","base_url":"https://mirror/v64.m4s","width":1280}]}}}"#;
        let data = PlayUrlResponse::parse(play).unwrap();
        assert_eq!(data.dash.video[0].base_url, "https://upos/v64.m4s");
    }

    #[test]
    fn test_null_lists_become_empty() {
        let raw = r#"{"data":{"dash":{"duration":1,"video":null,"audio":null}}}"#;
        let bundle = StreamBundle::parse(raw).unwrap();
        assert!(bundle.dash().audio.is_empty());
        assert!(bundle.dash().video.is_empty());

        let detail: VideoDetail = serde_json::from_str(r#"{"title":"t","staff":null}"#).unwrap();
        assert!(detail.staff.is_empty());
    }

    #[test]
    fn test_stream_bundle_rejects_garbage() {
        assert!(matches!(
            StreamBundle::parse("{not json"),
            Err(ResolveError::Decode(_))
        ));
    }

    #[test]
    fn test_descriptive_bundle_reads_video_data() {
        let raw = r#"{"aid":1,"videoData":{"title":"Song","desc":"d","pic":"https://i0/cover.jpg",
            "owner":{"mid":7,"name":"uploader"},"staff":[{"mid":1,"title":"UP","name":"A"}]}}"#;
        let bundle = DescriptiveBundle::parse(raw).unwrap();
        assert_eq!(bundle.video_data.title, "Song");
        assert_eq!(bundle.video_data.pic, "https://i0/cover.jpg");
        assert_eq!(bundle.video_data.artist(), "A");
    }

    #[test]
    fn test_api_response_error_code_passes_message() {
        let raw = r#"{"code":-404,"message":"啥都木有","ttl":1,"data":null}"#;
        match ViewResponse::parse(raw) {
            Err(ResolveError::Upstream(message)) => assert_eq!(message, "啥都木有"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_api_response_ok() {
        let raw = r#"{"code":0,"message":"0","data":{"bvid":"BV1xx","cid":42,"title":"t"}}"#;
        let detail = ViewResponse::parse(raw).unwrap();
        assert_eq!(detail.cid, 42);
        assert_eq!(detail.artist(), "unknown");
    }
}
