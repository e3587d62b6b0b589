//! Valuation run: fetch, aggregate, price, optionally assess, render.
//!
//! YouTube failures are fatal (no data means no price). The brand-safety
//! assessment is advisory: any failure there is logged and the report is
//! rendered without it.

use anyhow::Context as _;
use chrono::Utc;
use serde::Serialize;

use adquote_core::{
    aggregate_videos, channel_age_days, AppConfig, ChannelProfile, ChannelSnapshot, ChannelStats,
    VideoAggregate,
};
use adquote_pricing::{estimate_regional, PricingConfig, PricingInput, RegionalEstimate};
use adquote_safety::{BrandSafetyReport, GeminiClient, SafetyContext};
use adquote_youtube::{extract_channel_ref, YoutubeClient, YoutubeError};

use crate::{render, Cli};

/// The full valuation output: everything the pipeline computed, in one
/// serializable document.
#[derive(Debug, Serialize)]
pub struct ValuationReport {
    pub profile: ChannelProfile,
    pub stats: ChannelStats,
    pub channel_age_days: Option<u32>,
    pub aggregate: VideoAggregate,
    pub estimate: RegionalEstimate,
    pub assessment: Option<BrandSafetyReport>,
}

pub async fn run(cli: &Cli, config: &AppConfig) -> anyhow::Result<()> {
    let channel = extract_channel_ref(&cli.channel)
        .context("could not extract a channel id or handle from the given URL")?;

    let max_videos = cli.max_videos.unwrap_or(config.max_videos);
    let cpm_rate = cli.cpm.unwrap_or(config.cpm_rate);

    let client = YoutubeClient::new(&config.youtube_api_key, config.youtube_timeout_secs)
        .context("failed to construct the YouTube client")?;

    let snapshot = client
        .fetch_channel_snapshot(&channel, max_videos)
        .await
        .map_err(|e| match &e {
            YoutubeError::ChannelNotFound(_) | YoutubeError::NoRecentVideos(_) => {
                anyhow::Error::new(e).context("the channel has no usable data to price")
            }
            YoutubeError::Http(_) => {
                anyhow::Error::new(e).context("the YouTube Data API could not be reached")
            }
            _ => anyhow::Error::new(e).context("YouTube Data API request failed"),
        })?;

    let now = Utc::now();
    let aggregate = aggregate_videos(&snapshot.videos, now)?;
    let age = channel_age_days(snapshot.profile.published_at, now);

    let input = PricingInput::from_snapshot(&snapshot.stats, &aggregate, age);
    let estimate = estimate_regional(&input, &PricingConfig { cpm_rate });

    let assessment = if cli.no_assessment {
        None
    } else {
        fetch_assessment(config, &snapshot, &aggregate, &estimate).await
    };

    let report = ValuationReport {
        profile: snapshot.profile,
        stats: snapshot.stats,
        channel_age_days: age,
        aggregate,
        estimate,
        assessment,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::render_text(&report));
    }
    Ok(())
}

/// Run the advisory brand-safety call. Every failure mode degrades to
/// `None` with a warning; the price stands either way.
async fn fetch_assessment(
    config: &AppConfig,
    snapshot: &ChannelSnapshot,
    aggregate: &VideoAggregate,
    estimate: &RegionalEstimate,
) -> Option<BrandSafetyReport> {
    let Some(api_key) = config.gemini_api_key.as_deref() else {
        tracing::debug!("no Gemini API key configured, skipping assessment");
        return None;
    };

    let client = match GeminiClient::new(api_key, config.safety_timeout_secs) {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(error = %e, "could not construct the assessment client");
            return None;
        }
    };

    let context = SafetyContext {
        channel_title: &snapshot.profile.title,
        subscriber_count: snapshot.stats.subscriber_count,
        avg_views: aggregate.avg_views,
        engagement_rate: aggregate.engagement_rate,
        final_cost: estimate.final_cost,
        videos: &snapshot.videos,
    };

    match client.generate_assessment(&context).await {
        Ok(report) => Some(report),
        Err(e) => {
            tracing::warn!(error = %e, "brand-safety assessment unavailable");
            None
        }
    }
}
