//! Star rating derivation.
//!
//! Stage two of the pipeline: with the population snapshot frozen, each
//! dimension's raw score turns into a star rating plus a confidence
//! interval, and the four ratings aggregate into an overall rating with
//! operational ceilings.

pub mod aggregator;
pub mod classifier;
pub mod confidence;

use chrono::NaiveDate;

use crate::config::RatingConfig;
use crate::core::{round2, Dimension, DimensionRating, Facility};
use crate::stats::PopulationStats;

/// Derive one dimension's rating for one facility.
///
/// `ascending_percentile` is the facility's 0-based rank percentile,
/// low score → 0.0. That orientation is what the record stores; the
/// classifier works on risk-ranked percentiles, so Health & Safety is
/// re-oriented before classification (high raw score = low risk).
pub fn rate_dimension(
    dimension: Dimension,
    facility: &Facility,
    raw_score: f64,
    ascending_percentile: f64,
    stats: &PopulationStats,
    config: &RatingConfig,
    as_of: NaiveDate,
) -> DimensionRating {
    let risk_ranked = match dimension {
        Dimension::HealthSafety => 1.0 - ascending_percentile,
        _ => ascending_percentile,
    };
    let (stars, method) =
        classifier::classify(dimension, raw_score, risk_ranked, stats, config);
    let confidence = confidence::dimension_confidence(
        dimension,
        facility.inspection_count(),
        facility.years_in_operation(as_of),
        &config.confidence,
    );
    DimensionRating {
        stars,
        percentile: round2(ascending_percentile),
        raw_score: round2(raw_score),
        confidence: round2(confidence),
        method,
    }
}
