//! Primary path: scrape the state blobs embedded in the video page

use crate::extractor::bilibili::policy;
use crate::extractor::bilibili::schema::{DescriptiveBundle, StreamBundle};
use crate::extractor::bilibili::{ALBUM, NOMINAL_BITRATE};
use crate::extractor::models::{Audio, Headers, MediaMeta, ResourceType};
use crate::extractor::traits::Fetcher;
use crate::utils::config::ResolverSettings;
use crate::utils::error::ResolveError;
use crate::utils::text::{hash, regex_single_match, regex_single_match_or};
use tracing::{debug, warn};

const PLAYINFO_PATTERN: &str = r"window.__playinfo__=(.+?)</script";
const INITIAL_STATE_PATTERN: &str = r"__INITIAL_STATE__=(.+?);\(function";
const TITLE_PATTERN: &str = r#"<h1 title="(.+?)""#;

/// Download the video page as a desktop browser
pub async fn fetch_page(
    fetcher: &dyn Fetcher,
    page_url: &str,
    settings: &ResolverSettings,
) -> Result<String, ResolveError> {
    let mut headers = Headers::new();
    headers.insert("user-agent".to_string(), settings.desktop_user_agent.clone());
    fetcher.fetch(page_url, &headers).await
}

/// Raw `__playinfo__` JSON, if the page embeds one
pub fn find_stream_bundle(html: &str) -> Option<String> {
    regex_single_match(html, PLAYINFO_PATTERN)
}

/// Build the descriptor from an already located stream bundle
pub fn assemble(
    html: &str,
    stream_json: &str,
    page_url: &str,
    settings: &ResolverSettings,
) -> Result<MediaMeta, ResolveError> {
    let stream = StreamBundle::parse(stream_json)?;
    let dash = stream.dash();
    let first_audio = dash.audio.first().ok_or(ResolveError::NoAudioData)?;

    let descriptive = descriptive_bundle(html);
    let (title, description) = match &descriptive {
        Some(bundle) => (
            bundle.video_data.title.clone(),
            bundle.video_data.desc.clone(),
        ),
        None => (
            regex_single_match_or(html, TITLE_PATTERN, hash(page_url)),
            String::new(),
        ),
    };
    let detail = descriptive.map(|b| b.video_data).unwrap_or_default();

    let mut headers = Headers::new();
    headers.insert("user-agent".to_string(), settings.desktop_user_agent.clone());
    headers.insert("referer".to_string(), page_url.to_string());

    debug!(
        "Page state has {} audio and {} video tracks",
        dash.audio.len(),
        dash.video.len()
    );

    Ok(MediaMeta {
        title,
        description,
        artist: detail.artist(),
        album: ALBUM.to_string(),
        duration: dash.duration,
        cover_url: detail.pic,
        headers,
        resource_type: ResourceType::Video,
        audios: vec![Audio {
            url: first_audio.base_url.clone(),
            bitrate: NOMINAL_BITRATE,
        }],
        videos: dash.video.iter().map(policy::video_candidate).collect(),
    })
}

/// Metadata blob; missing or malformed state only degrades the title
fn descriptive_bundle(html: &str) -> Option<DescriptiveBundle> {
    let Some(raw) = regex_single_match(html, INITIAL_STATE_PATTERN) else {
        warn!("Page has no initial state, deriving title from markup");
        return None;
    };
    match DescriptiveBundle::parse(&raw) {
        Ok(bundle) => Some(bundle),
        Err(e) => {
            warn!("Failed to parse initial state: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::bilibili::fixtures::{page_html, PLAYINFO, PAGE_URL};

    #[test]
    fn test_find_stream_bundle() {
        let html = page_html(Some(PLAYINFO), None);
        assert_eq!(find_stream_bundle(&html).as_deref(), Some(PLAYINFO));
        assert!(find_stream_bundle("<html><body>nothing</body></html>").is_none());
    }

    #[test]
    fn test_assemble_full_page() {
        let state = concat!(
            r#"{"videoData":{"title":"Night Drive","desc":"lofi","pic":"https://i0.hdslb.com/cover.jpg","#,
            r#""owner":{"mid":1,"name":"owner"},"staff":[{"mid":2,"name":"Alice"},{"mid":3,"name":"Bob"}]}}"#
        );
        let html = page_html(Some(PLAYINFO), Some(state));
        let meta = assemble(&html, PLAYINFO, PAGE_URL, &ResolverSettings::default()).unwrap();

        assert_eq!(meta.title, "Night Drive");
        assert_eq!(meta.description, "lofi");
        assert_eq!(meta.artist, "Alice, Bob");
        assert_eq!(meta.album, "Bilibili");
        assert_eq!(meta.cover_url, "https://i0.hdslb.com/cover.jpg");
        assert_eq!(meta.duration, 185);
        assert_eq!(meta.resource_type, ResourceType::Video);
        assert_eq!(meta.audios.len(), 1);
        assert_eq!(meta.audios[0].url, "https://upos.example/audio-low.m4s");
        assert_eq!(meta.audios[0].bitrate, 128);
        assert_eq!(meta.videos.len(), 2);
        assert_eq!(meta.videos[0].ratio, "1080");
        assert_eq!(meta.videos[1].ratio, "unknown");
        assert!(meta.videos.iter().all(|v| v.need_extra_audio));
        assert_eq!(meta.headers.get("referer").map(String::as_str), Some(PAGE_URL));
    }

    #[test]
    fn test_missing_state_uses_h1_title() {
        let html = format!(
            r#"<h1 title="Fallback Title" class="video-title"></h1>{}"#,
            page_html(Some(PLAYINFO), None)
        );
        let meta = assemble(&html, PLAYINFO, PAGE_URL, &ResolverSettings::default()).unwrap();
        assert_eq!(meta.title, "Fallback Title");
        assert_eq!(meta.artist, "unknown");
        assert!(meta.cover_url.is_empty());
    }

    #[test]
    fn test_broken_state_uses_url_hash() {
        let html = page_html(Some(PLAYINFO), Some("{broken"));
        let meta = assemble(&html, PLAYINFO, PAGE_URL, &ResolverSettings::default()).unwrap();
        assert_eq!(meta.title, hash(PAGE_URL));
    }

    #[test]
    fn test_empty_audio_is_fatal() {
        let playinfo = r#"{"data":{"dash":{"duration":10,"video":[],"audio":[]}}}"#;
        let html = page_html(Some(playinfo), None);
        let err = assemble(&html, playinfo, PAGE_URL, &ResolverSettings::default()).unwrap_err();
        assert!(matches!(err, ResolveError::NoAudioData));
        assert_eq!(err.to_string(), "no audio data");
    }

    #[test]
    fn test_undecodable_stream_bundle_is_fatal() {
        let err = assemble("", "{oops", PAGE_URL, &ResolverSettings::default()).unwrap_err();
        assert!(matches!(err, ResolveError::Decode(_)));
    }

    #[test]
    fn test_page_audio_bitrate_is_nominal() {
        // the highest-bandwidth track is not picked and its bandwidth is not used
        let html = page_html(Some(PLAYINFO), None);
        let meta = assemble(&html, PLAYINFO, PAGE_URL, &ResolverSettings::default()).unwrap();
        assert_eq!(meta.audios[0].url, "https://upos.example/audio-low.m4s");
        assert_eq!(meta.audios[0].bitrate, NOMINAL_BITRATE);
    }
}
