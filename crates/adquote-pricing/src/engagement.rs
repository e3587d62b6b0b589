//! Engagement quality: how hard the audience interacts, and how.

use serde::Serialize;

/// Engagement-rate bands, descending percent thresholds, multiplier in
/// hundredths.
const RATE_BANDS: [(f64, u64, &str); 6] = [
    (10.0, 150, "exceptional (10%+)"),
    (7.0, 130, "very high (7-10%)"),
    (5.0, 120, "high (5-7%)"),
    (3.0, 110, "good (3-5%)"),
    (2.0, 100, "average (2-3%)"),
    (1.0, 90, "low (1-2%)"),
];

const RATE_FLOOR: (u64, &str) = (85, "very low (<1%)");

/// Combined engagement verdict: rate multiplier x quality multiplier.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EngagementAssessment {
    /// Mean per-video engagement rate, percent.
    pub engagement_rate: f64,
    pub rate_multiplier: f64,
    pub rate_level: &'static str,
    /// Average comments per like. 0 when the like count is 0.
    pub comment_like_ratio: f64,
    pub quality_multiplier: f64,
    pub quality_level: &'static str,
    /// `rate_multiplier * quality_multiplier`.
    pub final_multiplier: f64,
    /// Exact combined multiplier in ten-thousandths, used for cost math.
    #[serde(skip)]
    pub(crate) final_multiplier_e4: u64,
}

/// Rate multiplier (hundredths) and level for an engagement rate.
pub(crate) fn rate_multiplier_centi(engagement_rate: f64) -> (u64, &'static str) {
    RATE_BANDS
        .iter()
        .find(|(threshold, _, _)| engagement_rate >= *threshold)
        .map_or(RATE_FLOOR, |&(_, centi, label)| (centi, label))
}

/// Quality multiplier (hundredths) from the comment/like ratio.
///
/// A high ratio marks a conversational community; a very low one marks
/// event-driven, passive approval. Zero likes carry no signal either way,
/// so they take the neutral branch, not the low-quality one.
pub(crate) fn quality_multiplier_centi(
    avg_likes: u64,
    avg_comments: u64,
) -> (f64, u64, &'static str) {
    if avg_likes == 0 {
        return (0.0, 100, "no like signal");
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = avg_comments as f64 / avg_likes as f64;
    if ratio >= 0.15 {
        (ratio, 110, "conversational community")
    } else if ratio < 0.05 {
        (ratio, 90, "event-driven / low quality")
    } else {
        (ratio, 100, "normal range")
    }
}

/// Evaluate both engagement sub-scores and combine them multiplicatively.
#[must_use]
pub fn evaluate_engagement(
    engagement_rate: f64,
    avg_likes: u64,
    avg_comments: u64,
) -> EngagementAssessment {
    let (rate_centi, rate_level) = rate_multiplier_centi(engagement_rate);
    let (comment_like_ratio, quality_centi, quality_level) =
        quality_multiplier_centi(avg_likes, avg_comments);

    let final_multiplier_e4 = rate_centi * quality_centi;

    #[allow(clippy::cast_precision_loss)]
    let (rate_multiplier, quality_multiplier, final_multiplier) = (
        rate_centi as f64 / 100.0,
        quality_centi as f64 / 100.0,
        final_multiplier_e4 as f64 / 10_000.0,
    );

    EngagementAssessment {
        engagement_rate,
        rate_multiplier,
        rate_level,
        comment_like_ratio,
        quality_multiplier,
        quality_level,
        final_multiplier,
        final_multiplier_e4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_bands_resolve_upper_at_exact_thresholds() {
        for (rate, expected) in [
            (10.0, 150),
            (7.0, 130),
            (5.0, 120),
            (3.0, 110),
            (2.0, 100),
            (1.0, 90),
            (0.99, 85),
            (0.0, 85),
        ] {
            let (centi, _) = rate_multiplier_centi(rate);
            assert_eq!(centi, expected, "rate {rate}");
        }
    }

    #[test]
    fn quality_boundary_at_five_percent_is_normal() {
        // ratio exactly 0.05: not < 0.05, so the neutral band.
        let (ratio, centi, level) = quality_multiplier_centi(800, 40);
        assert!((ratio - 0.05).abs() < 1e-12);
        assert_eq!(centi, 100);
        assert_eq!(level, "normal range");
    }

    #[test]
    fn quality_boundary_at_fifteen_percent_is_conversational() {
        let (ratio, centi, _) = quality_multiplier_centi(400, 60);
        assert!((ratio - 0.15).abs() < 1e-12);
        assert_eq!(centi, 110);
    }

    #[test]
    fn quality_below_five_percent_is_low() {
        let (_, centi, level) = quality_multiplier_centi(1_000, 40);
        assert_eq!(centi, 90);
        assert_eq!(level, "event-driven / low quality");
    }

    #[test]
    fn zero_likes_take_the_neutral_branch() {
        // Ratio is literally 0 (< 0.05), but an absent signal is neutral,
        // not low quality.
        let (ratio, centi, level) = quality_multiplier_centi(0, 50);
        assert!((ratio - 0.0).abs() < f64::EPSILON);
        assert_eq!(centi, 100, "expected neutral multiplier, got {centi}");
        assert_eq!(level, "no like signal");
    }

    #[test]
    fn multipliers_combine_multiplicatively() {
        // 5.5% rate -> 1.2; ratio 40/400 = 0.10 -> 1.0.
        let a = evaluate_engagement(5.5, 400, 40);
        assert_eq!(a.final_multiplier_e4, 12_000);
        assert!((a.final_multiplier - 1.2).abs() < 1e-9);
        assert_eq!(a.rate_level, "high (5-7%)");
        assert_eq!(a.quality_level, "normal range");
    }

    #[test]
    fn best_case_combination() {
        // 12% rate -> 1.5; ratio 0.2 -> 1.1; combined 1.65.
        let a = evaluate_engagement(12.0, 100, 20);
        assert_eq!(a.final_multiplier_e4, 16_500);
    }
}
