//! Channel premium: independent reputation/trend signals composed into
//! one multiplier.
//!
//! Four multipliers (health, growth trend, upload consistency, fan
//! loyalty), each bounded, each neutral when its input signal is absent.
//! The composite is their product, rounded to 3 decimals, and only ever
//! applied when the tier floor (not the CPM curve) was the binding price.

use serde::Serialize;

use crate::health::{evaluate_health, ChannelHealth};

/// Growth-rate bands, descending percent thresholds, multiplier in
/// hundredths. The stable zone [-10, 10) collapses to neutral.
const GROWTH_BANDS: [(f64, u64, &str); 5] = [
    (50.0, 115, "surging (50%+)"),
    (20.0, 110, "growing (20-50%)"),
    (10.0, 105, "improving (10-20%)"),
    (-10.0, 100, "stable (±10%)"),
    (-20.0, 95, "softening (-10 to -20%)"),
];

const GROWTH_FLOOR: (u64, &str) = (90, "declining (-20%+)");

/// Upload-frequency bands on uploads per week, descending.
const CONSISTENCY_BANDS: [(f64, u64, &str); 3] = [
    (2.0, 105, "2+ uploads/week"),
    (1.0, 100, "1+ upload/week"),
    (0.5, 95, "0.5+ uploads/week"),
];

const CONSISTENCY_FLOOR: (u64, &str) = (90, "under 0.5 uploads/week");

/// Loyalty bands on comments as a percent of views, descending.
const LOYALTY_BANDS: [(f64, u64, &str); 3] = [
    (0.5, 110, "highly loyal"),
    (0.3, 105, "loyal"),
    (0.1, 100, "typical"),
];

const LOYALTY_FLOOR: (u64, &str) = (97, "passive");

/// Growth trend: recent 90-day average views against the overall average.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GrowthAssessment {
    /// Percent change of the recent average over the overall average.
    /// `None` when there is no recent window or no overall average.
    pub growth_rate: Option<f64>,
    pub multiplier: f64,
    pub status: &'static str,
    #[serde(skip)]
    pub(crate) multiplier_centi: u64,
}

/// Upload consistency from channel age and catalog size.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ConsistencyAssessment {
    /// Uploads per week; `None` when channel age is unknown and the
    /// coarse video-count rule was used instead.
    pub uploads_per_week: Option<f64>,
    pub multiplier: f64,
    pub status: &'static str,
    #[serde(skip)]
    pub(crate) multiplier_centi: u64,
}

/// Fan loyalty from the comment/view ratio.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LoyaltyAssessment {
    /// Comments as a percent of views. 0 when there is no view data.
    pub comment_view_ratio: f64,
    pub multiplier: f64,
    pub status: &'static str,
    #[serde(skip)]
    pub(crate) multiplier_centi: u64,
}

/// Summary band for the composite premium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PremiumSummary {
    Excellent,
    Good,
    Average,
    Caution,
}

impl PremiumSummary {
    /// Classify the composite by its percent delta from neutral, in
    /// thousandths (exactly the composite's 3-decimal precision).
    fn from_composite_milli(composite_milli: u64) -> Self {
        let delta_milli = i64::try_from(composite_milli).unwrap_or(i64::MAX) - 1_000;
        if delta_milli > 100 {
            Self::Excellent
        } else if delta_milli > 0 {
            Self::Good
        } else if delta_milli > -100 {
            Self::Average
        } else {
            Self::Caution
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Average => "average",
            Self::Caution => "caution",
        }
    }
}

/// The four premium sub-scores and their composite.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PremiumFactors {
    pub health: ChannelHealth,
    pub growth: GrowthAssessment,
    pub consistency: ConsistencyAssessment,
    pub loyalty: LoyaltyAssessment,
    /// Product of the four multipliers, rounded to 3 decimals.
    pub composite: f64,
    pub summary: PremiumSummary,
    #[serde(skip)]
    pub(crate) composite_milli: u64,
}

/// Growth trend against the recent 90-day window.
///
/// Neutral with an insufficient-data status when no recent window exists
/// or the overall average is zero.
#[must_use]
pub fn evaluate_growth(avg_views: u64, recent_90day_avg_views: Option<u64>) -> GrowthAssessment {
    let Some(recent) = recent_90day_avg_views else {
        return GrowthAssessment {
            growth_rate: None,
            multiplier: 1.0,
            status: "insufficient data",
            multiplier_centi: 100,
        };
    };
    if avg_views == 0 {
        return GrowthAssessment {
            growth_rate: None,
            multiplier: 1.0,
            status: "insufficient data",
            multiplier_centi: 100,
        };
    }

    #[allow(clippy::cast_precision_loss)]
    let growth_rate = (recent as f64 - avg_views as f64) / avg_views as f64 * 100.0;

    let (multiplier_centi, status) = GROWTH_BANDS
        .iter()
        .find(|(threshold, _, _)| growth_rate >= *threshold)
        .map_or(GROWTH_FLOOR, |&(_, centi, label)| (centi, label));

    #[allow(clippy::cast_precision_loss)]
    let multiplier = multiplier_centi as f64 / 100.0;
    GrowthAssessment {
        growth_rate: Some(growth_rate),
        multiplier,
        status,
        multiplier_centi,
    }
}

/// Upload consistency.
///
/// With a known, positive channel age the signal is uploads per week;
/// without one, a coarser rule on the raw catalog size.
#[must_use]
pub fn evaluate_consistency(
    video_count: u64,
    channel_age_days: Option<u32>,
) -> ConsistencyAssessment {
    if let Some(age_days) = channel_age_days.filter(|&d| d > 0) {
        #[allow(clippy::cast_precision_loss)]
        let uploads_per_week = video_count as f64 / (f64::from(age_days) / 7.0);
        let (multiplier_centi, status) = CONSISTENCY_BANDS
            .iter()
            .find(|(threshold, _, _)| uploads_per_week >= *threshold)
            .map_or(CONSISTENCY_FLOOR, |&(_, centi, label)| (centi, label));
        #[allow(clippy::cast_precision_loss)]
        let multiplier = multiplier_centi as f64 / 100.0;
        return ConsistencyAssessment {
            uploads_per_week: Some(uploads_per_week),
            multiplier,
            status,
            multiplier_centi,
        };
    }

    let (multiplier_centi, status) = if video_count >= 200 {
        (105, "200+ videos")
    } else if video_count >= 50 {
        (100, "50+ videos")
    } else {
        (95, "under 50 videos")
    };
    #[allow(clippy::cast_precision_loss)]
    let multiplier = multiplier_centi as f64 / 100.0;
    ConsistencyAssessment {
        uploads_per_week: None,
        multiplier,
        status,
        multiplier_centi,
    }
}

/// Fan loyalty from comments per view.
///
/// Neutral when there is no view data to ratio against.
#[must_use]
pub fn evaluate_loyalty(avg_views: u64, avg_comments: u64) -> LoyaltyAssessment {
    if avg_views == 0 {
        return LoyaltyAssessment {
            comment_view_ratio: 0.0,
            multiplier: 1.0,
            status: "no view data",
            multiplier_centi: 100,
        };
    }

    #[allow(clippy::cast_precision_loss)]
    let comment_view_ratio = avg_comments as f64 / avg_views as f64 * 100.0;

    let (multiplier_centi, status) = LOYALTY_BANDS
        .iter()
        .find(|(threshold, _, _)| comment_view_ratio >= *threshold)
        .map_or(LOYALTY_FLOOR, |&(_, centi, label)| (centi, label));

    #[allow(clippy::cast_precision_loss)]
    let multiplier = multiplier_centi as f64 / 100.0;
    LoyaltyAssessment {
        comment_view_ratio,
        multiplier,
        status,
        multiplier_centi,
    }
}

/// Compose the four premium sub-scores.
///
/// The composite is `health * growth * consistency * loyalty`, rounded
/// half-up to 3 decimals (computed exactly in scaled integers).
#[must_use]
pub fn evaluate_premium(
    subscriber_count: u64,
    avg_views: u64,
    avg_comments: u64,
    recent_90day_avg_views: Option<u64>,
    video_count: u64,
    channel_age_days: Option<u32>,
) -> PremiumFactors {
    let health = evaluate_health(subscriber_count, avg_views);
    let growth = evaluate_growth(avg_views, recent_90day_avg_views);
    let consistency = evaluate_consistency(video_count, channel_age_days);
    let loyalty = evaluate_loyalty(avg_views, avg_comments);

    // Product scale: tenths * hundredths^3 = 1e7; round to thousandths.
    let product_e7 = health.multiplier_deci
        * growth.multiplier_centi
        * consistency.multiplier_centi
        * loyalty.multiplier_centi;
    let composite_milli = (product_e7 + 5_000) / 10_000;

    #[allow(clippy::cast_precision_loss)]
    let composite = composite_milli as f64 / 1_000.0;

    PremiumFactors {
        health,
        growth,
        consistency,
        loyalty,
        composite,
        summary: PremiumSummary::from_composite_milli(composite_milli),
        composite_milli,
    }
}
