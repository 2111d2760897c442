//! Structural quality raw scoring.
//!
//! Structure here means the physical and organizational shape of the
//! program: licensed capacity, the age groups served, and the ratio /
//! group-size record. Everything is an adjustment against a neutral
//! baseline, so an average facility with no signals lands mid-scale.

use chrono::NaiveDate;

use super::{clamp_score, text};
use crate::config::StructuralScoring;
use crate::core::Facility;

pub fn score(facility: &Facility, config: &StructuralScoring, as_of: NaiveDate) -> f64 {
    let mut score = config.baseline + config.capacity_adjustment(facility.capacity);

    let services = text::normalize(&format!(
        "{} {}",
        facility.ages_served, facility.program_services
    ));

    if text::contains_any(&config.age_group_keywords, &services) {
        // Infant/toddler rooms are the hardest to run well: a clean
        // record there is a bonus, a matching violation outweighs it.
        let age_group_violation = facility.violations.iter().any(|v| {
            text::contains_any(&config.age_group_keywords, &text::normalize(&v.description))
        });
        if age_group_violation {
            score -= config.infant_violation_penalty;
        } else {
            score += config.infant_bonus;
        }
    }

    let ratio_violations: Vec<_> = facility
        .violations
        .iter()
        .filter(|v| text::contains_any(&config.ratio_keywords, &text::normalize(&v.description)))
        .collect();

    score -= config.ratio_penalty(ratio_violations.len());
    if ratio_violations
        .iter()
        .any(|v| v.is_within(as_of, config.recent_window_months))
    {
        score -= config.recent_ratio_penalty;
    }

    clamp_score(score)
}
