//! Threshold classification onto the nine-level star scale.
//!
//! Three strategies coexist:
//! - percentile banding, the primary path, with nine evenly spaced cuts
//!   so ratings distribute uniformly across the population;
//! - raw-score banding against per-dimension cut tables, used when the
//!   population gives percentiles no spread to work with, and always
//!   used for the overall blend;
//! - z-score banding, a configurable alternate kept for populations
//!   rated under the legacy policy.
//!
//! Every path maps out-of-range input to the lowest level; a rating
//! outside the nine levels cannot leave this module.

use crate::config::RatingConfig;
use crate::core::{BandingMethod, Dimension, Stars};
use crate::stats::PopulationStats;

/// Band a percentile onto the star scale with cuts at k/9.
///
/// The percentile argument follows the risk-ranked convention used
/// throughout the classifier interface: for Health & Safety a high
/// percentile means high risk, so that dimension is direction-reversed
/// here before banding. No other dimension reverses.
pub fn band_percentile(dimension: Dimension, percentile: f64) -> Stars {
    if !percentile.is_finite() {
        return Stars::MIN;
    }
    let oriented = match dimension {
        Dimension::HealthSafety => 1.0 - percentile,
        _ => percentile,
    };
    let index = (oriented.clamp(0.0, 1.0) * Stars::LEVELS as f64).floor() as usize;
    Stars::from_band_index(index.min(Stars::LEVELS - 1))
}

/// Band a raw score against the dimension's absolute cut table.
pub fn band_raw_score(dimension: Dimension, raw_score: f64, config: &RatingConfig) -> Stars {
    config.thresholds.raw_table(dimension).band(raw_score)
}

/// Band a standard score against the z cut table.
pub fn band_z_score(z: f64, config: &RatingConfig) -> Stars {
    config.thresholds.zscore.band(z)
}

/// Band the weighted overall blend (in star units) against the overall
/// cut table. The blend is never averaged-then-rounded.
pub fn band_overall(blend: f64, config: &RatingConfig) -> Stars {
    config.thresholds.overall.band(blend)
}

/// Decide which strategy classifies this dimension score.
///
/// Process scores sitting exactly on a baseline belong to the large
/// no-signal cluster where ascending rank is an artifact of input
/// order, not quality; they band by raw score instead.
pub fn select_strategy(dimension: Dimension, raw_score: f64, config: &RatingConfig) -> BandingMethod {
    if dimension == Dimension::Process && is_process_baseline(raw_score, config) {
        return BandingMethod::RawScore;
    }
    config.thresholds.banding.method()
}

fn is_process_baseline(raw_score: f64, config: &RatingConfig) -> bool {
    raw_score == config.process.curriculum_baseline
        || raw_score == config.process.default_baseline
}

/// Classify one dimension of one facility.
///
/// `percentile` is risk-ranked for Health & Safety (see
/// [`band_percentile`]); `stats` backs the z-score path.
pub fn classify(
    dimension: Dimension,
    raw_score: f64,
    percentile: f64,
    stats: &PopulationStats,
    config: &RatingConfig,
) -> (Stars, BandingMethod) {
    let method = select_strategy(dimension, raw_score, config);
    let stars = match method {
        BandingMethod::Percentile => band_percentile(dimension, percentile),
        BandingMethod::RawScore => band_raw_score(dimension, raw_score, config),
        BandingMethod::ZScore => band_z_score(stats.z_score(raw_score), config),
    };
    (stars, method)
}
