//! Normalization rules shared by the page-state and API paths

use crate::extractor::bilibili::schema::DashTrack;
use crate::extractor::models::{
    Audio, Video, RATIO_1080, RATIO_1080_PLUS, RATIO_360, RATIO_480, RATIO_720, RATIO_UNKNOWN,
};

pub const UNKNOWN_ARTIST: &str = "unknown";

/// Quality id → resolution label
const RATIO_TABLE: [(u32, &str); 5] = [
    (16, RATIO_360),
    (32, RATIO_480),
    (64, RATIO_720),
    (80, RATIO_1080),
    (112, RATIO_1080_PLUS),
];

/// Staff names joined in order when present, otherwise the owner name.
pub fn resolve_artist<S: AsRef<str>>(owner: &str, staff: &[S]) -> String {
    let name = if staff.is_empty() {
        owner.to_string()
    } else {
        staff
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<_>>()
            .join(", ")
    };

    if name.trim().is_empty() {
        UNKNOWN_ARTIST.to_string()
    } else {
        name
    }
}

/// Label for a video quality id; unmapped ids give [`RATIO_UNKNOWN`]
pub fn ratio_by_id(id: u32) -> &'static str {
    RATIO_TABLE
        .iter()
        .find(|(quality, _)| *quality == id)
        .map(|(_, label)| *label)
        .unwrap_or(RATIO_UNKNOWN)
}

/// Highest-bandwidth track; the first one wins a tie.
///
/// Tracks reporting zero bandwidth are never picked.
pub fn select_best_audio(tracks: &[DashTrack]) -> Option<&DashTrack> {
    let mut best: Option<&DashTrack> = None;
    let mut max_bandwidth = 0;
    for track in tracks {
        if track.bandwidth > max_bandwidth {
            max_bandwidth = track.bandwidth;
            best = Some(track);
        }
    }
    best
}

/// Audio candidate with bitrate taken from the track bandwidth
pub fn audio_from_bandwidth(track: &DashTrack) -> Audio {
    Audio {
        url: track.base_url.clone(),
        bitrate: u32::try_from(track.bandwidth / 1000).unwrap_or(u32::MAX),
    }
}

/// Video-only candidate; the audio track is muxed in by the consumer
pub fn video_candidate(track: &DashTrack) -> Video {
    Video {
        url: track.base_url.clone(),
        width: track.width,
        height: track.height,
        ratio: ratio_by_id(track.id).to_string(),
        need_extra_audio: true,
    }
}
