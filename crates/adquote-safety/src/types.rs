//! Structured brand-safety report types.
//!
//! Models the JSON document the generative model is instructed to emit.
//! Parsing is deliberately lenient: category sub-scores vary by category
//! and are captured as a flattened map, optional sections may be absent,
//! and unknown extra keys are ignored; the model does not always follow
//! the schema to the letter.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One scored rubric category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryScore {
    /// Category score, 0-100.
    pub score: u32,
    /// Free-text risks found in this category.
    #[serde(default)]
    pub issues: Vec<String>,
    /// Category-specific sub-scores (e.g. `violence`, `copyright`).
    #[serde(flatten)]
    pub subscores: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// `low` / `medium` / `high` as emitted by the model.
    pub level: String,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub concerns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Suggested action, e.g. `proceed` / `caution` / `avoid`.
    pub action: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ViewsPrediction {
    pub min: u64,
    pub avg: u64,
    pub max: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdEffect {
    pub views_prediction: ViewsPrediction,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedAnalysis {
    pub target_audience: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
}

/// The full six-category assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandSafetyReport {
    pub content_safety: CategoryScore,
    pub legal_ethics: CategoryScore,
    pub reputation: CategoryScore,
    pub community: CategoryScore,
    pub brand_fit: CategoryScore,
    pub additional_checks: CategoryScore,
    /// Overall score, 0-100.
    pub overall_score: u32,
    pub risk_assessment: RiskAssessment,
    pub recommendation: Recommendation,
    #[serde(default)]
    pub ad_effect: Option<AdEffect>,
    #[serde(default)]
    pub detailed_analysis: Option<DetailedAnalysis>,
}

impl BrandSafetyReport {
    /// The six categories with display names, in rubric order.
    #[must_use]
    pub fn categories(&self) -> [(&'static str, &CategoryScore); 6] {
        [
            ("Content Safety", &self.content_safety),
            ("Legal & Ethics", &self.legal_ethics),
            ("Reputation Risk", &self.reputation),
            ("Community Health", &self.community),
            ("Brand Fit", &self.brand_fit),
            ("Additional Checks", &self.additional_checks),
        ]
    }
}
