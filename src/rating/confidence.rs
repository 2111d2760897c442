//! Confidence interval estimation.
//!
//! Every rating carries a half-width in star units describing how much
//! evidence backs it. The base interval widens with sparse inspection
//! history and short tenure; each dimension blends those two signals
//! with its own mix, and nothing exceeds the configured cap.

use std::collections::BTreeMap;

use crate::config::{ConfidenceConfig, DimensionWeights};
use crate::core::{Dimension, DimensionRating};

/// Interval half-width for one dimension of one facility.
pub fn dimension_confidence(
    dimension: Dimension,
    inspection_count: usize,
    tenure_years: u32,
    config: &ConfidenceConfig,
) -> f64 {
    let multiplier = config.mix(dimension).blend(
        config.inspections.for_count(inspection_count),
        config.tenure.for_years(tenure_years),
    );
    (config.base * multiplier).min(config.cap)
}

/// Interval half-width for the overall rating: the dimension weights
/// applied to the per-dimension intervals, under the same cap.
pub fn overall_confidence(
    ratings: &BTreeMap<Dimension, DimensionRating>,
    weights: &DimensionWeights,
    config: &ConfidenceConfig,
) -> f64 {
    let blended: f64 = ratings
        .iter()
        .map(|(dimension, rating)| weights.get(*dimension) * rating.confidence)
        .sum();
    blended.min(config.cap)
}
