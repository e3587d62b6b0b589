use chrono::{DateTime, Utc};
use serde::Serialize;

/// Identity and presentation metadata for a channel.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelProfile {
    /// Canonical channel id (`UC…`).
    pub id: String,
    pub title: String,
    /// Channel description, truncated upstream for display only.
    pub description: String,
    /// When the channel was created.
    pub published_at: DateTime<Utc>,
    /// Playlist id holding the channel's uploads, newest first.
    pub uploads_playlist_id: String,
}

/// Public lifetime statistics for a channel.
///
/// All counts are as reported by the statistics source; missing fields
/// default to 0 there, not here.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChannelStats {
    pub subscriber_count: u64,
    pub video_count: u64,
    pub total_view_count: u64,
}

/// Statistics for one sampled video.
#[derive(Debug, Clone, Serialize)]
pub struct VideoStats {
    pub title: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub published_at: DateTime<Utc>,
}

/// Everything fetched for one valuation request: channel identity,
/// lifetime statistics, and the recent-video sample.
///
/// Immutable per request: the valuation pipeline never mutates its
/// input snapshot, so repeated runs over the same snapshot are
/// byte-identical.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelSnapshot {
    pub profile: ChannelProfile,
    pub stats: ChannelStats,
    pub videos: Vec<VideoStats>,
}
