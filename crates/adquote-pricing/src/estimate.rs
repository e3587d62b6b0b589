//! Cost estimators: CPM economics, tier floors, and the regional wrapper.

use adquote_core::{ChannelStats, VideoAggregate};
use serde::Serialize;

use crate::engagement::{evaluate_engagement, EngagementAssessment};
use crate::premium::{evaluate_premium, PremiumFactors};
use crate::tier::InfluencerTier;

/// Default CPM rate: currency units per 1,000 views.
pub const DEFAULT_CPM_RATE: u64 = 30_000;

/// Explicit pricing parameters, passed per call. No globals.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PricingConfig {
    /// Currency units per 1,000 views.
    pub cpm_rate: u64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            cpm_rate: DEFAULT_CPM_RATE,
        }
    }
}

/// Everything the valuation pipeline needs, already validated
/// non-negative by construction (unsigned counts).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PricingInput {
    pub subscriber_count: u64,
    pub video_count: u64,
    pub channel_age_days: Option<u32>,
    pub avg_views: u64,
    pub avg_likes: u64,
    pub avg_comments: u64,
    /// Mean per-video engagement rate, percent.
    pub engagement_rate: f64,
    pub recent_90day_avg_views: Option<u64>,
}

impl PricingInput {
    /// Assemble a pricing input from fetched channel statistics and the
    /// aggregated video sample.
    #[must_use]
    pub fn from_snapshot(
        stats: &ChannelStats,
        aggregate: &VideoAggregate,
        channel_age_days: Option<u32>,
    ) -> Self {
        Self {
            subscriber_count: stats.subscriber_count,
            video_count: stats.video_count,
            channel_age_days,
            avg_views: aggregate.avg_views,
            avg_likes: aggregate.avg_likes,
            avg_comments: aggregate.avg_comments,
            engagement_rate: aggregate.engagement_rate,
            recent_90day_avg_views: aggregate.recent_90day_avg_views,
        }
    }
}

/// Which candidate won the base-cost selection.
///
/// Carried as an explicit tag so downstream stages never re-derive the
/// winner by comparing floats. Ties go to the tier floor, so
/// "floor-bound" and "base equals floor" coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseCostSource {
    TierFloor,
    Cpm,
    RecentCpm,
}

/// Global (benchmark-market) estimate with every intermediate exposed.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GlobalEstimate {
    pub tier: InfluencerTier,
    pub cpm_rate: u64,
    /// CPM-derived cost over the overall average views, floored.
    pub base_cost_cpm: u64,
    /// CPM-derived cost over the recent 90-day average, when available
    /// and non-zero.
    pub recent_cpm_cost: Option<u64>,
    pub tier_floor: u64,
    /// The selected base, floored for display.
    pub base_cost: u64,
    pub base_cost_source: BaseCostSource,
    pub engagement: EngagementAssessment,
    /// `floor(base_cost * engagement.final_multiplier)`.
    pub final_cost: u64,
}

/// Regional estimate: the global figure adjusted for the local market,
/// with the channel premium folded in when the tier floor was binding.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RegionalEstimate {
    pub global: GlobalEstimate,
    pub premium: PremiumFactors,
    /// Whether the premium composite was applied. True iff the global
    /// base was floor-bound: a CPM-bound base already prices in real
    /// view volume, and re-applying growth/health would double-count.
    pub premium_applied: bool,
    /// Regional adjustment in hundredths over 100 (0.85 or 0.75).
    pub region_adjustment: f64,
    pub final_cost: u64,
    /// `floor(final_cost * 0.85)`.
    pub min_cost: u64,
    /// `floor(final_cost * 1.15)`.
    pub max_cost: u64,
}

fn saturate_u64(value: u128) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

/// Global CPM-benchmark estimate.
///
/// Order is load-bearing: CPM base, recent-window CPM base, tier floor,
/// max-selection with an explicit source tag, then the combined
/// engagement multiplier, flooring once at the end.
#[must_use]
pub fn estimate_global(input: &PricingInput, config: &PricingConfig) -> GlobalEstimate {
    let tier = InfluencerTier::classify(input.subscriber_count);

    // avg_views / 1000 * cpm_rate, held in milliunits so the division by
    // 1000 never truncates.
    let cpm_milli = u128::from(input.avg_views) * u128::from(config.cpm_rate);
    let recent_milli = input
        .recent_90day_avg_views
        .filter(|&v| v > 0)
        .map(|v| u128::from(v) * u128::from(config.cpm_rate));

    let tier_floor = tier.floor_cost();
    let floor_milli = u128::from(tier_floor) * 1_000;

    let mut base_milli = floor_milli;
    let mut base_cost_source = BaseCostSource::TierFloor;
    if cpm_milli > base_milli {
        base_milli = cpm_milli;
        base_cost_source = BaseCostSource::Cpm;
    }
    if let Some(recent) = recent_milli {
        if recent > base_milli {
            base_milli = recent;
            base_cost_source = BaseCostSource::RecentCpm;
        }
    }

    let engagement = evaluate_engagement(input.engagement_rate, input.avg_likes, input.avg_comments);

    // floor(base * multiplier): milliunits * ten-thousandths / 1e7.
    let final_cost =
        saturate_u64(base_milli * u128::from(engagement.final_multiplier_e4) / 10_000_000);

    GlobalEstimate {
        tier,
        cpm_rate: config.cpm_rate,
        base_cost_cpm: saturate_u64(cpm_milli / 1_000),
        recent_cpm_cost: recent_milli.map(|m| saturate_u64(m / 1_000)),
        tier_floor,
        base_cost: saturate_u64(base_milli / 1_000),
        base_cost_source,
        engagement,
        final_cost,
    }
}

/// Regional estimate wrapping [`estimate_global`].
///
/// Applies the channel-premium composite only when the global stage was
/// floor-bound, then the subscriber-bracket regional adjustment, and
/// derives the ±15% range around the final figure.
#[must_use]
pub fn estimate_regional(input: &PricingInput, config: &PricingConfig) -> RegionalEstimate {
    let global = estimate_global(input, config);

    let premium = evaluate_premium(
        input.subscriber_count,
        input.avg_views,
        input.avg_comments,
        input.recent_90day_avg_views,
        input.video_count,
        input.channel_age_days,
    );

    let premium_applied = global.base_cost_source == BaseCostSource::TierFloor;
    let premium_milli: u128 = if premium_applied {
        u128::from(premium.composite_milli)
    } else {
        1_000
    };

    let region_centi = global.tier.region_adjustment_centi();

    // floor(global_final * premium * region): thousandths * hundredths.
    let final_cost = saturate_u64(
        u128::from(global.final_cost) * premium_milli * u128::from(region_centi) / 100_000,
    );

    let min_cost = saturate_u64(u128::from(final_cost) * 85 / 100);
    let max_cost = saturate_u64(u128::from(final_cost) * 115 / 100);

    #[allow(clippy::cast_precision_loss)]
    let region_adjustment = region_centi as f64 / 100.0;
    RegionalEstimate {
        global,
        premium,
        premium_applied,
        region_adjustment,
        final_cost,
        min_cost,
        max_cost,
    }
}
