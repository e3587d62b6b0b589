//! Audience-size tier classification.

use serde::Serialize;

/// Subscriber-count breakpoints, ascending. A count equal to a breakpoint
/// belongs to the bracket above it.
const TIER_BREAKPOINTS: [u64; 4] = [10_000, 100_000, 500_000, 1_000_000];

/// Named audience-size bracket for an influencer channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum InfluencerTier {
    Nano,
    Micro,
    MidTier,
    Macro,
    Mega,
}

impl InfluencerTier {
    /// Classify a subscriber count into a tier.
    ///
    /// Strict `<` against each breakpoint in ascending order, falling
    /// through to [`InfluencerTier::Mega`]; exactly 10,000 subscribers is
    /// already Micro.
    #[must_use]
    pub fn classify(subscriber_count: u64) -> Self {
        if subscriber_count < TIER_BREAKPOINTS[0] {
            Self::Nano
        } else if subscriber_count < TIER_BREAKPOINTS[1] {
            Self::Micro
        } else if subscriber_count < TIER_BREAKPOINTS[2] {
            Self::MidTier
        } else if subscriber_count < TIER_BREAKPOINTS[3] {
            Self::Macro
        } else {
            Self::Mega
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Nano => "Nano",
            Self::Micro => "Micro",
            Self::MidTier => "Mid-tier",
            Self::Macro => "Macro",
            Self::Mega => "Mega",
        }
    }

    /// Human-readable subscriber range for the tier.
    #[must_use]
    pub fn range_label(self) -> &'static str {
        match self {
            Self::Nano => "1K-10K",
            Self::Micro => "10K-100K",
            Self::MidTier => "100K-500K",
            Self::Macro => "500K-1M",
            Self::Mega => "1M+",
        }
    }

    /// Minimum guaranteed price for the bracket, in whole currency units.
    #[must_use]
    pub fn floor_cost(self) -> u64 {
        match self {
            Self::Nano => 350_000,
            Self::Micro => 2_000_000,
            Self::MidTier => 4_000_000,
            Self::Macro => 10_000_000,
            Self::Mega => 15_000_000,
        }
    }

    /// Regional adjustment for the bracket, in hundredths.
    ///
    /// Smaller channels are more active in the regional market, so they
    /// keep 85% of the global figure; larger brackets are adjusted to 75%.
    #[must_use]
    pub(crate) fn region_adjustment_centi(self) -> u64 {
        match self {
            Self::Nano | Self::Micro => 85,
            Self::MidTier | Self::Macro | Self::Mega => 75,
        }
    }
}

impl std::fmt::Display for InfluencerTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
