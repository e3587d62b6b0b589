//! Channel health: how much of the subscriber base still shows up.

use serde::Serialize;

/// Health bands, descending. Ratio is average views as a percent of
/// subscribers; `>=` against each threshold in order. The 15 and 10 bands
/// share a multiplier but are distinct levels.
const HEALTH_BANDS: [(f64, u64, &str); 7] = [
    (30.0, 12, "peak health"),
    (20.0, 11, "very healthy"),
    (15.0, 10, "healthy"),
    (10.0, 10, "normal"),
    (7.0, 8, "mild decline"),
    (5.0, 7, "decline"),
    (3.0, 5, "dying"),
];

/// Multiplier (tenths) and label for the implicit below-3 band.
const HEALTH_FLOOR: (u64, &str) = (3, "dead");

/// Health grade for a channel: views-to-subscribers ratio mapped to a
/// tier-floor adjustment multiplier and a label.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChannelHealth {
    /// Average views as a percent of subscriber count.
    pub ratio: f64,
    pub multiplier: f64,
    pub level: &'static str,
    #[serde(skip)]
    pub(crate) multiplier_deci: u64,
}

/// Grade channel health from subscribers and average views.
///
/// A channel with zero subscribers has ratio 0 and lands in the lowest
/// band rather than dividing.
#[must_use]
pub fn evaluate_health(subscriber_count: u64, avg_views: u64) -> ChannelHealth {
    let ratio = if subscriber_count == 0 {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let r = avg_views as f64 / subscriber_count as f64 * 100.0;
        r
    };

    let (multiplier_deci, level) = HEALTH_BANDS
        .iter()
        .find(|(threshold, _, _)| ratio >= *threshold)
        .map_or(HEALTH_FLOOR, |&(_, deci, label)| (deci, label));

    #[allow(clippy::cast_precision_loss)]
    let multiplier = multiplier_deci as f64 / 10.0;
    ChannelHealth {
        ratio,
        multiplier,
        level,
        multiplier_deci,
    }
}
