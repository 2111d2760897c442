//! Management quality raw scoring.
//!
//! Management quality is inferred from the operational track record:
//! how long the facility has held its license, how its violation count
//! compares to its inspection count, and whether it accumulates
//! administrative findings or operates under permit conditions.

use chrono::NaiveDate;

use super::clamp_score;
use crate::config::ManagementScoring;
use crate::core::Facility;

pub fn score(facility: &Facility, config: &ManagementScoring, as_of: NaiveDate) -> f64 {
    let years = facility.years_in_operation(as_of);
    let mut score = config.tenure.for_years(years);

    let inspections = facility.inspection_count();
    if inspections > config.inspection_bonus_threshold {
        score += config.inspection_bonus;
    }

    // Denominator floors at one so unvisited facilities do not divide
    // by zero; the missing history is penalized separately below.
    let ratio = facility.violation_count() as f64 / inspections.max(1) as f64;
    score += config.ratio_adjustment(ratio);

    let admin_violations = facility
        .violations
        .iter()
        .filter(|v| v.category.is_administrative())
        .count();
    score -= config.admin_penalty(admin_violations);

    if facility.permit_condition {
        score -= config.permit_condition_penalty;
    }

    if inspections == 0 {
        score -= config.no_inspection_penalty;
    }

    clamp_score(score)
}
