//! Text rendering of the valuation report.
//!
//! The audit trail mirrors the pipeline stage by stage so a reader can
//! reproduce the final figure by hand from the printed intermediates.

use std::fmt::Write as _;

use adquote_core::format::thousands;
use adquote_pricing::BaseCostSource;

use crate::run::ValuationReport;

/// Render the full report as human-readable text.
#[must_use]
pub fn render_text(report: &ValuationReport) -> String {
    let mut out = String::new();
    let estimate = &report.estimate;
    let global = &estimate.global;

    let _ = writeln!(out, "== {} ==", report.profile.title);
    let _ = writeln!(
        out,
        "subscribers: {}  videos: {}  total views: {}",
        thousands(report.stats.subscriber_count),
        thousands(report.stats.video_count),
        thousands(report.stats.total_view_count),
    );
    if let Some(age) = report.channel_age_days {
        let _ = writeln!(out, "channel age: {age} days");
    }
    let _ = writeln!(
        out,
        "sample: avg views {}  avg likes {}  avg comments {}",
        thousands(report.aggregate.avg_views),
        thousands(report.aggregate.avg_likes),
        thousands(report.aggregate.avg_comments),
    );
    if let Some(recent) = report.aggregate.recent_90day_avg_views {
        let _ = writeln!(out, "recent 90-day avg views: {}", thousands(recent));
    }

    let _ = writeln!(out, "\n-- global estimate --");
    let _ = writeln!(
        out,
        "tier: {} ({} subscribers), floor {}",
        global.tier.name(),
        global.tier.range_label(),
        thousands(global.tier_floor),
    );
    let _ = writeln!(
        out,
        "cpm base ({} per 1,000 views): {}",
        thousands(global.cpm_rate),
        thousands(global.base_cost_cpm),
    );
    if let Some(recent) = global.recent_cpm_cost {
        let _ = writeln!(out, "recent-window cpm base: {}", thousands(recent));
    }
    let _ = writeln!(
        out,
        "base cost: {} ({})",
        thousands(global.base_cost),
        source_label(global.base_cost_source),
    );
    let engagement = &global.engagement;
    let _ = writeln!(
        out,
        "engagement: {:.2}% -> x{:.2} ({})",
        engagement.engagement_rate, engagement.rate_multiplier, engagement.rate_level,
    );
    let _ = writeln!(
        out,
        "comment quality: ratio {:.3} -> x{:.2} ({})",
        engagement.comment_like_ratio, engagement.quality_multiplier, engagement.quality_level,
    );
    let _ = writeln!(out, "global cost: {}", thousands(global.final_cost));

    let _ = writeln!(out, "\n-- channel premium --");
    let premium = &estimate.premium;
    let _ = writeln!(
        out,
        "health: ratio {:.1}% -> x{:.2} ({})",
        premium.health.ratio, premium.health.multiplier, premium.health.level,
    );
    match premium.growth.growth_rate {
        Some(rate) => {
            let _ = writeln!(
                out,
                "growth: {rate:+.1}% -> x{:.2} ({})",
                premium.growth.multiplier, premium.growth.status,
            );
        }
        None => {
            let _ = writeln!(out, "growth: x1.00 ({})", premium.growth.status);
        }
    }
    match premium.consistency.uploads_per_week {
        Some(per_week) => {
            let _ = writeln!(
                out,
                "consistency: {per_week:.1} uploads/week -> x{:.2} ({})",
                premium.consistency.multiplier, premium.consistency.status,
            );
        }
        None => {
            let _ = writeln!(
                out,
                "consistency: x{:.2} ({})",
                premium.consistency.multiplier, premium.consistency.status,
            );
        }
    }
    let _ = writeln!(
        out,
        "loyalty: ratio {:.2}% -> x{:.2} ({})",
        premium.loyalty.comment_view_ratio, premium.loyalty.multiplier, premium.loyalty.status,
    );
    let _ = writeln!(
        out,
        "composite: x{:.3} ({}){}",
        premium.composite,
        premium.summary.label(),
        if estimate.premium_applied {
            ""
        } else {
            ", not applied (cpm-bound base)"
        },
    );

    let _ = writeln!(out, "\n-- regional estimate --");
    let _ = writeln!(out, "regional adjustment: x{:.2}", estimate.region_adjustment);
    let _ = writeln!(out, "recommended price: {}", thousands(estimate.final_cost));
    let _ = writeln!(
        out,
        "range: {} - {}",
        thousands(estimate.min_cost),
        thousands(estimate.max_cost),
    );

    if let Some(assessment) = &report.assessment {
        let _ = writeln!(out, "\n-- brand safety --");
        let _ = writeln!(out, "overall score: {}/100", assessment.overall_score);
        for (name, category) in assessment.categories() {
            let _ = writeln!(out, "{name}: {}/100", category.score);
            for issue in &category.issues {
                let _ = writeln!(out, "  - {issue}");
            }
        }
        let _ = writeln!(out, "risk level: {}", assessment.risk_assessment.level);
        for flag in &assessment.risk_assessment.red_flags {
            let _ = writeln!(out, "  red flag: {flag}");
        }
        let _ = writeln!(
            out,
            "recommendation: {} ({})",
            assessment.recommendation.action, assessment.recommendation.reason,
        );
        if let Some(effect) = &assessment.ad_effect {
            let _ = writeln!(
                out,
                "predicted ad views: {} / {} / {} (min/avg/max)",
                thousands(effect.views_prediction.min),
                thousands(effect.views_prediction.avg),
                thousands(effect.views_prediction.max),
            );
            let _ = writeln!(out, "{}", effect.summary);
        }
        if let Some(analysis) = &assessment.detailed_analysis {
            let _ = writeln!(out, "target audience: {}", analysis.target_audience);
            for strength in &analysis.strengths {
                let _ = writeln!(out, "  strength: {strength}");
            }
            for weakness in &analysis.weaknesses {
                let _ = writeln!(out, "  weakness: {weakness}");
            }
        }
    } else {
        let _ = writeln!(out, "\nAI assessment unavailable");
    }

    out
}

fn source_label(source: BaseCostSource) -> &'static str {
    match source {
        BaseCostSource::TierFloor => "tier floor",
        BaseCostSource::Cpm => "cpm over average views",
        BaseCostSource::RecentCpm => "cpm over recent 90-day views",
    }
}
