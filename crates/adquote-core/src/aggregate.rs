//! Pure aggregation of a recent-video sample.
//!
//! Turns raw per-video statistics into the floor-divided averages and
//! engagement rate the pricing engine consumes. An empty sample is an
//! error, never a zero estimate; a channel with no recent-video data
//! cannot be valued.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::types::VideoStats;

/// Window for the recency-adjusted view average.
const RECENT_WINDOW_DAYS: i64 = 90;

/// Errors from video-sample aggregation.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// The statistics source returned no recent videos for the channel.
    #[error("no recent-video data available for this channel")]
    EmptyVideoSample,
}

/// Averages derived from the recent-video sample.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VideoAggregate {
    /// Floor-divided mean views across the sample.
    pub avg_views: u64,
    pub avg_likes: u64,
    pub avg_comments: u64,
    /// Mean per-video engagement rate, percent. A zero-view video
    /// contributes 0 but stays in the denominator.
    pub engagement_rate: f64,
    /// Floor-divided mean views over sampled videos published within the
    /// last 90 days. `None` when no sampled video falls in the window.
    pub recent_90day_avg_views: Option<u64>,
}

/// Engagement rate for one video: `(likes + comments) / views * 100`,
/// rounded to 2 decimals. Zero views yields 0 rather than dividing.
#[must_use]
pub fn video_engagement_rate(video: &VideoStats) -> f64 {
    if video.views == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let rate = (video.likes + video.comments) as f64 / video.views as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}

/// Aggregate a recent-video sample into the averages used for valuation.
///
/// `now` anchors the 90-day recency window; passing it in keeps the
/// function deterministic under test.
///
/// # Errors
///
/// Returns [`AggregateError::EmptyVideoSample`] when `videos` is empty.
pub fn aggregate_videos(
    videos: &[VideoStats],
    now: DateTime<Utc>,
) -> Result<VideoAggregate, AggregateError> {
    if videos.is_empty() {
        return Err(AggregateError::EmptyVideoSample);
    }

    let n = videos.len() as u64;
    let avg_views = videos.iter().map(|v| v.views).sum::<u64>() / n;
    let avg_likes = videos.iter().map(|v| v.likes).sum::<u64>() / n;
    let avg_comments = videos.iter().map(|v| v.comments).sum::<u64>() / n;

    #[allow(clippy::cast_precision_loss)]
    let engagement_rate =
        videos.iter().map(video_engagement_rate).sum::<f64>() / videos.len() as f64;

    let cutoff = now - Duration::days(RECENT_WINDOW_DAYS);
    let recent: Vec<u64> = videos
        .iter()
        .filter(|v| v.published_at >= cutoff)
        .map(|v| v.views)
        .collect();
    let recent_90day_avg_views = if recent.is_empty() {
        None
    } else {
        Some(recent.iter().sum::<u64>() / recent.len() as u64)
    };

    Ok(VideoAggregate {
        avg_views,
        avg_likes,
        avg_comments,
        engagement_rate,
        recent_90day_avg_views,
    })
}

/// Whole days between channel creation and `now`.
///
/// Returns `None` when the creation date is in the future or less than a
/// full day old, so callers fall back to the coarse video-count rule.
#[must_use]
pub fn channel_age_days(published_at: DateTime<Utc>, now: DateTime<Utc>) -> Option<u32> {
    let days = (now - published_at).num_days();
    u32::try_from(days).ok().filter(|&d| d > 0)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn video(views: u64, likes: u64, comments: u64, days_ago: i64, now: DateTime<Utc>) -> VideoStats {
        VideoStats {
            title: format!("video-{views}"),
            views,
            likes,
            comments,
            published_at: now - Duration::days(days_ago),
        }
    }

    fn test_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_sample_is_an_error() {
        let result = aggregate_videos(&[], test_now());
        assert!(
            matches!(result, Err(AggregateError::EmptyVideoSample)),
            "expected EmptyVideoSample, got {result:?}"
        );
    }

    #[test]
    fn averages_use_floor_division() {
        let now = test_now();
        let videos = vec![video(10, 3, 1, 5, now), video(11, 4, 2, 6, now)];
        let agg = aggregate_videos(&videos, now).unwrap();
        // (10 + 11) / 2 = 10 floored
        assert_eq!(agg.avg_views, 10);
        assert_eq!(agg.avg_likes, 3);
        assert_eq!(agg.avg_comments, 1);
    }

    #[test]
    fn zero_view_video_counts_as_zero_but_stays_in_denominator() {
        let now = test_now();
        let videos = vec![video(1000, 80, 20, 5, now), video(0, 50, 50, 6, now)];
        let agg = aggregate_videos(&videos, now).unwrap();
        // First video: (80+20)/1000*100 = 10.0; second contributes 0.
        assert!(
            (agg.engagement_rate - 5.0).abs() < 1e-9,
            "expected 5.0, got {}",
            agg.engagement_rate
        );
    }

    #[test]
    fn per_video_rate_rounds_to_two_decimals() {
        let now = test_now();
        let v = video(3, 1, 0, 5, now);
        // 1/3*100 = 33.333… -> 33.33
        assert!((video_engagement_rate(&v) - 33.33).abs() < 1e-9);
    }

    #[test]
    fn recent_average_windows_to_ninety_days() {
        let now = test_now();
        let videos = vec![
            video(12_000, 0, 0, 10, now),
            video(8_000, 0, 0, 30, now),
            video(100, 0, 0, 200, now),
        ];
        let agg = aggregate_videos(&videos, now).unwrap();
        assert_eq!(agg.recent_90day_avg_views, Some(10_000));
        // The old video still participates in the overall average.
        assert_eq!(agg.avg_views, (12_000 + 8_000 + 100) / 3);
    }

    #[test]
    fn no_videos_in_window_yields_none() {
        let now = test_now();
        let videos = vec![video(5_000, 100, 10, 120, now), video(4_000, 90, 9, 365, now)];
        let agg = aggregate_videos(&videos, now).unwrap();
        assert_eq!(agg.recent_90day_avg_views, None);
    }

    #[test]
    fn channel_age_in_whole_days() {
        let now = test_now();
        let published = now - Duration::days(400);
        assert_eq!(channel_age_days(published, now), Some(400));
    }

    #[test]
    fn channel_age_none_for_future_or_same_day() {
        let now = test_now();
        assert_eq!(channel_age_days(now + Duration::days(1), now), None);
        assert_eq!(channel_age_days(now, now), None);
    }

    #[test]
    fn aggregation_is_order_independent() {
        let now = test_now();
        let a = vec![
            video(1_000, 50, 5, 5, now),
            video(2_000, 60, 6, 10, now),
            video(3_000, 70, 7, 15, now),
        ];
        let mut b = a.clone();
        b.reverse();
        let agg_a = aggregate_videos(&a, now).unwrap();
        let agg_b = aggregate_videos(&b, now).unwrap();
        assert_eq!(agg_a.avg_views, agg_b.avg_views);
        assert_eq!(agg_a.avg_likes, agg_b.avg_likes);
        assert_eq!(agg_a.avg_comments, agg_b.avg_comments);
        assert!((agg_a.engagement_rate - agg_b.engagement_rate).abs() < 1e-12);
        assert_eq!(agg_a.recent_90day_avg_views, agg_b.recent_90day_avg_views);
    }
}
