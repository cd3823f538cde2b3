//! Fallback path: assemble the descriptor from the public web API

use crate::extractor::bilibili::policy;
use crate::extractor::bilibili::schema::{PlayUrlResponse, ViewResponse};
use crate::extractor::bilibili::ALBUM;
use crate::extractor::models::{Headers, MediaMeta, ResourceType};
use crate::extractor::traits::Fetcher;
use crate::utils::config::ResolverSettings;
use crate::utils::error::ResolveError;
use crate::utils::text::regex_single_match;
use tracing::{debug, info};

const BVID_PATTERN: &str = r"(BV[a-zA-Z0-9]+)";

/// 1080P requested, DASH with every optional stream flag
const PLAY_QUALITY: u32 = 80;
const PLAY_FORMAT: u32 = 4048;

/// Content identifier (BV id) embedded in a video URL
pub fn extract_bvid(url: &str) -> Option<String> {
    regex_single_match(url, BVID_PATTERN)
}

pub async fn extract(
    fetcher: &dyn Fetcher,
    page_url: &str,
    settings: &ResolverSettings,
) -> Result<MediaMeta, ResolveError> {
    let bvid = extract_bvid(page_url).ok_or(ResolveError::ContentIdNotFound)?;
    info!("Resolving {} through the web API", bvid);

    let mut headers = Headers::new();
    headers.insert("user-agent".to_string(), settings.desktop_user_agent.clone());

    let view_url = format!(
        "{}/x/web-interface/view?bvid={}",
        settings.api_root(),
        bvid
    );
    let detail = ViewResponse::parse(&fetcher.fetch(&view_url, &headers).await?)?;
    debug!("View response: cid={} title={:?}", detail.cid, detail.title);

    headers.insert("referer".to_string(), page_url.to_string());
    let play_url = format!(
        "{}/x/player/playurl?bvid={}&cid={}&qn={}&fnval={}",
        settings.api_root(),
        bvid,
        detail.cid,
        PLAY_QUALITY,
        PLAY_FORMAT
    );
    let play = PlayUrlResponse::parse(&fetcher.fetch(&play_url, &headers).await?)?;

    // no audio is tolerated here, unlike the page-state path
    let audios: Vec<_> = policy::select_best_audio(&play.dash.audio)
        .map(policy::audio_from_bandwidth)
        .into_iter()
        .collect();
    debug!(
        "Playback response: {} audio candidates, {} video tracks",
        play.dash.audio.len(),
        play.dash.video.len()
    );

    Ok(MediaMeta {
        artist: detail.artist(),
        title: detail.title,
        description: detail.desc,
        album: ALBUM.to_string(),
        duration: play.dash.duration,
        cover_url: detail.pic,
        headers,
        resource_type: ResourceType::Video,
        audios,
        videos: play.dash.video.iter().map(policy::video_candidate).collect(),
    })
}
