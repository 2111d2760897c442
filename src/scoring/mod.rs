//! Raw dimension scoring.
//!
//! Stage one of the pipeline: each facility is scored on four quality
//! dimensions, independently of every other facility. All scorers are
//! pure functions of the facility, the config, and the as-of date, and
//! every score lands in [0, 10].

pub mod health_safety;
pub mod management;
pub mod process;
pub mod structural;
pub mod text;

use chrono::NaiveDate;

use crate::config::RatingConfig;
use crate::core::errors::Result;
use crate::core::{Facility, RawScoreSet};

/// Clamp a raw score onto the 0-10 scale. Non-finite values collapse to
/// zero so a bad config cannot leak NaN into population statistics.
pub(crate) fn clamp_score(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, 10.0)
}

/// Score one facility on all four dimensions.
pub fn score_facility(
    facility: &Facility,
    config: &RatingConfig,
    as_of: NaiveDate,
) -> Result<RawScoreSet> {
    Ok(RawScoreSet {
        health_safety: health_safety::score(facility, &config.health_safety)?,
        structural: structural::score(facility, &config.structural, as_of),
        process: process::score(facility, &config.process),
        management: management::score(facility, &config.management, as_of),
    })
}
