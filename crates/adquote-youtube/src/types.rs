//! YouTube Data API v3 response types.
//!
//! Only the fields the valuation needs are modeled. The API returns all
//! count statistics as JSON strings, and omits counts a channel has
//! hidden (e.g. like counts), so every count is an `Option<String>`
//! parsed through [`parse_count`] with a 0 default.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Parse an optional string-encoded count, defaulting absent or
/// malformed values to 0.
#[must_use]
pub(crate) fn parse_count(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.parse().ok()).unwrap_or(0)
}

// ---------------------------------------------------------------------------
// channels
// ---------------------------------------------------------------------------

/// List envelope for the `channels` endpoint.
#[derive(Debug, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelItem>,
}

/// One channel resource with the parts the valuation requests.
#[derive(Debug, Deserialize)]
pub struct ChannelItem {
    pub id: String,
    pub snippet: ChannelSnippet,
    pub statistics: ChannelStatistics,
    #[serde(rename = "contentDetails")]
    pub content_details: ChannelContentDetails,
}

#[derive(Debug, Deserialize)]
pub struct ChannelSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "publishedAt")]
    pub published_at: DateTime<Utc>,
}

/// Lifetime counts, string-encoded on the wire.
#[derive(Debug, Deserialize)]
pub struct ChannelStatistics {
    #[serde(rename = "subscriberCount")]
    pub subscriber_count: Option<String>,
    #[serde(rename = "videoCount")]
    pub video_count: Option<String>,
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelContentDetails {
    #[serde(rename = "relatedPlaylists")]
    pub related_playlists: RelatedPlaylists,
}

#[derive(Debug, Deserialize)]
pub struct RelatedPlaylists {
    pub uploads: String,
}

// ---------------------------------------------------------------------------
// playlistItems
// ---------------------------------------------------------------------------

/// List envelope for the `playlistItems` endpoint.
#[derive(Debug, Deserialize)]
pub struct PlaylistItemsResponse {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistItem {
    #[serde(rename = "contentDetails")]
    pub content_details: PlaylistItemContentDetails,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistItemContentDetails {
    #[serde(rename = "videoId")]
    pub video_id: String,
}

// ---------------------------------------------------------------------------
// videos
// ---------------------------------------------------------------------------

/// List envelope for the `videos` endpoint.
#[derive(Debug, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
pub struct VideoItem {
    pub snippet: VideoSnippet,
    pub statistics: VideoStatistics,
}

#[derive(Debug, Deserialize)]
pub struct VideoSnippet {
    pub title: String,
    #[serde(rename = "publishedAt")]
    pub published_at: DateTime<Utc>,
}

/// Per-video counts, string-encoded; like/comment counts are omitted
/// when the uploader hides them.
#[derive(Debug, Deserialize)]
pub struct VideoStatistics {
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    #[serde(rename = "likeCount")]
    pub like_count: Option<String>,
    #[serde(rename = "commentCount")]
    pub comment_count: Option<String>,
}
