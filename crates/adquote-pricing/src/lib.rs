//! Advertising-fee valuation engine.
//!
//! A deterministic, side-effect-free pipeline from aggregated channel
//! statistics to a recommended price and confidence range. Every stage
//! returns its intermediate values so the final figure is fully auditable.
//!
//! Money flows through scaled integer arithmetic (milliunits for cost,
//! hundredths/thousandths for multipliers): the floor and rounding rules
//! are exact, and re-running the pipeline over the same input is
//! byte-identical. The `f64` multiplier fields on the output structs are
//! for display and serialization only.

pub mod engagement;
pub mod estimate;
pub mod health;
pub mod premium;
pub mod tier;

pub use engagement::{evaluate_engagement, EngagementAssessment};
pub use estimate::{
    estimate_global, estimate_regional, BaseCostSource, GlobalEstimate, PricingConfig,
    PricingInput, RegionalEstimate, DEFAULT_CPM_RATE,
};
pub use health::{evaluate_health, ChannelHealth};
pub use premium::{
    evaluate_premium, ConsistencyAssessment, GrowthAssessment, LoyaltyAssessment, PremiumFactors,
    PremiumSummary,
};
pub use tier::InfluencerTier;
