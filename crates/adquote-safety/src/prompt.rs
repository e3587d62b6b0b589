//! Prompt construction for the brand-safety assessment.

use std::fmt::Write as _;

use adquote_core::format::thousands;
use adquote_core::VideoStats;

/// How many recent videos are summarized in the prompt.
const MAX_PROMPT_VIDEOS: usize = 5;

/// Titles are truncated to this many characters in the prompt.
const MAX_TITLE_CHARS: usize = 50;

/// Everything the prompt needs about the channel under assessment.
#[derive(Debug, Clone)]
pub struct SafetyContext<'a> {
    pub channel_title: &'a str,
    pub subscriber_count: u64,
    pub avg_views: u64,
    /// Mean engagement rate, percent.
    pub engagement_rate: f64,
    /// The computed recommended price, for the ad-effect section.
    pub final_cost: u64,
    pub videos: &'a [VideoStats],
}

/// Build the assessment prompt: channel summary, recent videos, the
/// six-category rubric, and the required JSON output shape.
#[must_use]
pub fn build_prompt(context: &SafetyContext<'_>) -> String {
    let mut video_lines = String::new();
    for (i, video) in context.videos.iter().take(MAX_PROMPT_VIDEOS).enumerate() {
        let title: String = video.title.chars().take(MAX_TITLE_CHARS).collect();
        let _ = writeln!(
            video_lines,
            "{}. title: {title}, views: {}, likes: {}, comments: {}",
            i + 1,
            thousands(video.views),
            thousands(video.likes),
            thousands(video.comments),
        );
    }

    format!(
        r#"Assess the following YouTube channel against the brand-safety checklist below.

## Channel
- name: {title}
- subscribers: {subs}
- average views: {views}
- average engagement rate: {rate:.2}%
- quoted ad price: {cost}

## Recent videos
{videos}
## Checklist (score each category 0-100, with sub-scores and an issues list)

1. Content Safety: sexual content, violence, hate speech, language.
2. Legal & Ethics: copyright, misinformation, illegal activity, ad disclosure.
3. Reputation Risk: past controversies, political/religious stances, subscriber sentiment.
4. Community Health: comment management, subscriber authenticity, influencer associations.
5. Brand Fit: value alignment, competitor history, past ad quality.
6. Additional Checks: transparency, content consistency, platform compliance.

Also include: an overall score, a risk assessment (level, red flags,
concerns), a recommendation (action, reason), an ad-effect prediction
(min/avg/max views with a 2-3 sentence summary), and a detailed analysis
(target audience, strengths, weaknesses).

Respond with exactly one JSON object in this shape and nothing else:
{{
  "content_safety": {{"score": 0, "sexual_content": 0, "violence": 0, "hate_speech": 0, "language": 0, "issues": []}},
  "legal_ethics": {{"score": 0, "copyright": 0, "misinformation": 0, "illegal_activity": 0, "ad_disclosure": 0, "issues": []}},
  "reputation": {{"score": 0, "past_controversies": 0, "political_religious": 0, "subscriber_sentiment": 0, "issues": []}},
  "community": {{"score": 0, "comment_management": 0, "subscriber_authenticity": 0, "influencer_associations": 0, "issues": []}},
  "brand_fit": {{"score": 0, "value_alignment": 0, "competitor_history": 0, "ad_quality": 0, "issues": []}},
  "additional_checks": {{"score": 0, "transparency": 0, "content_consistency": 0, "platform_compliance": 0, "issues": []}},
  "overall_score": 0,
  "risk_assessment": {{"level": "low", "red_flags": [], "concerns": []}},
  "recommendation": {{"action": "proceed", "reason": ""}},
  "ad_effect": {{"views_prediction": {{"min": 0, "avg": 0, "max": 0}}, "summary": ""}},
  "detailed_analysis": {{"target_audience": "", "strengths": [], "weaknesses": []}}
}}"#,
        title = context.channel_title,
        subs = thousands(context.subscriber_count),
        views = thousands(context.avg_views),
        rate = context.engagement_rate,
        cost = thousands(context.final_cost),
        videos = video_lines,
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn video(title: &str, views: u64) -> VideoStats {
        VideoStats {
            title: title.to_string(),
            views,
            likes: views / 20,
            comments: views / 200,
            published_at: Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap(),
        }
    }

    fn context(videos: &[VideoStats]) -> SafetyContext<'_> {
        SafetyContext {
            channel_title: "Test Channel",
            subscriber_count: 50_000,
            avg_views: 8_000,
            engagement_rate: 5.5,
            final_cost: 2_244_000,
            videos,
        }
    }

    #[test]
    fn prompt_contains_channel_summary_and_price() {
        let videos = vec![video("First video", 8_000)];
        let prompt = build_prompt(&context(&videos));
        assert!(prompt.contains("Test Channel"));
        assert!(prompt.contains("50,000"));
        assert!(prompt.contains("5.50%"));
        assert!(prompt.contains("2,244,000"));
    }

    #[test]
    fn prompt_caps_video_list_at_five() {
        let videos: Vec<VideoStats> =
            (0..10).map(|i| video(&format!("video {i}"), 1_000)).collect();
        let prompt = build_prompt(&context(&videos));
        assert!(prompt.contains("5. title: video 4"));
        assert!(!prompt.contains("6. title:"), "prompt listed more than 5 videos");
    }

    #[test]
    fn long_titles_are_truncated() {
        let long = "x".repeat(120);
        let videos = vec![video(&long, 1_000)];
        let prompt = build_prompt(&context(&videos));
        assert!(prompt.contains(&"x".repeat(50)));
        assert!(!prompt.contains(&"x".repeat(51)));
    }

    #[test]
    fn prompt_demands_a_single_json_object() {
        let videos = vec![video("v", 1_000)];
        let prompt = build_prompt(&context(&videos));
        assert!(prompt.contains("exactly one JSON object"));
        assert!(prompt.contains("\"overall_score\""));
    }
}
