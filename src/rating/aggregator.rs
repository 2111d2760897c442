//! Overall rating aggregation.
//!
//! The overall rating blends the four discretized dimension ratings by
//! weight, re-bands the blend through the overall cut table, then
//! applies operational ceilings. Ceilings take a `min()` against the
//! banded rating, so they can only ever lower it.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::config::RatingConfig;
use crate::core::{Dimension, DimensionRating, Facility, Stars};
use crate::rating::classifier;

/// Weighted blend of the dimension star values, in star units.
pub fn weighted_blend(
    ratings: &BTreeMap<Dimension, DimensionRating>,
    config: &RatingConfig,
) -> f64 {
    ratings
        .iter()
        .map(|(dimension, rating)| config.weights.get(*dimension) * rating.stars.value())
        .sum()
}

/// Overall rating for one facility: blend, re-band, then ceilings.
///
/// The blend is banded through the overall cut table rather than
/// rounded, so the overall scale keeps the same nine levels as the
/// dimensions.
pub fn overall_rating(
    facility: &Facility,
    ratings: &BTreeMap<Dimension, DimensionRating>,
    config: &RatingConfig,
    as_of: NaiveDate,
) -> Stars {
    let banded = classifier::band_overall(weighted_blend(ratings, config), config);
    apply_ceilings(facility, banded, config, as_of)
}

/// Clamp a banded rating under every ceiling the facility trips.
pub fn apply_ceilings(
    facility: &Facility,
    rating: Stars,
    config: &RatingConfig,
    as_of: NaiveDate,
) -> Stars {
    let ceilings = &config.ceilings;
    let mut capped = rating;

    if !facility.is_active() {
        capped = capped.min(Stars::from_value(ceilings.inactive));
    }
    if facility.has_high_risk_violation()
        && facility.has_violation_within(as_of, ceilings.recent_window_months)
    {
        capped = capped.min(Stars::from_value(ceilings.elevated_risk));
    }
    if facility
        .risk_score
        .is_some_and(|score| score >= ceilings.critical_risk_score)
    {
        capped = capped.min(Stars::from_value(ceilings.critical_risk));
    }

    capped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BandingMethod, OperatingStatus, RiskLevel, Violation};

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn facility(id: &str) -> Facility {
        Facility {
            id: id.into(),
            name: String::new(),
            capacity: Some(60),
            ages_served: String::new(),
            hours: String::new(),
            program_services: String::new(),
            permit_condition: false,
            status: Default::default(),
            license_issued: date(2018, 3, 15).into(),
            risk_score: None,
            risk_level_counts: None,
            violations: Vec::new(),
            inspections: Vec::new(),
        }
    }

    fn high_risk_violation(on: NaiveDate) -> Violation {
        Violation {
            risk_level: Some(RiskLevel::High),
            activity_date: Some(on),
            ..Default::default()
        }
    }

    fn ratings(values: [f64; 4]) -> BTreeMap<Dimension, DimensionRating> {
        Dimension::ALL
            .into_iter()
            .zip(values)
            .map(|(dimension, value)| {
                (
                    dimension,
                    DimensionRating {
                        stars: Stars::from_value(value),
                        percentile: 0.5,
                        raw_score: 5.0,
                        confidence: 0.5,
                        method: BandingMethod::Percentile,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn blend_is_rebanded_not_rounded() {
        let config = RatingConfig::default();
        let f = facility("f1");
        // 0.4*5.0 + 0.25*3.5 + 0.2*3.5 + 0.15*4.5 = 4.25, between the
        // 4.2 and 4.7 cuts: 4.5 stars.
        let overall = overall_rating(&f, &ratings([5.0, 3.5, 3.5, 4.5]), &config, as_of());
        assert_eq!(overall.value(), 4.5);

        // A uniform panel maps straight through.
        let overall = overall_rating(&f, &ratings([5.0; 4]), &config, as_of());
        assert_eq!(overall.value(), 5.0);
        let overall = overall_rating(&f, &ratings([1.0; 4]), &config, as_of());
        assert_eq!(overall.value(), 1.0);
    }

    #[test]
    fn inactive_facility_is_capped() {
        let config = RatingConfig::default();
        let mut f = facility("f1");
        f.status = OperatingStatus::Inactive;
        let overall = overall_rating(&f, &ratings([5.0; 4]), &config, as_of());
        assert_eq!(overall.value(), 2.0);
    }

    #[test]
    fn high_risk_with_recent_violation_is_capped() {
        let config = RatingConfig::default();
        let mut f = facility("f1");
        f.violations = vec![high_risk_violation(date(2025, 2, 10))];
        let overall = overall_rating(&f, &ratings([5.0; 4]), &config, as_of());
        assert_eq!(overall.value(), 4.0);
    }

    #[test]
    fn stale_high_risk_violation_does_not_cap() {
        let config = RatingConfig::default();
        let mut f = facility("f1");
        // High risk on record, but nothing inside the recency window.
        f.violations = vec![high_risk_violation(date(2021, 2, 10))];
        let overall = overall_rating(&f, &ratings([5.0; 4]), &config, as_of());
        assert_eq!(overall.value(), 5.0);
    }

    #[test]
    fn critical_risk_score_is_capped() {
        let config = RatingConfig::default();
        let mut f = facility("f1");
        f.risk_score = Some(95.0);
        let overall = overall_rating(&f, &ratings([5.0; 4]), &config, as_of());
        assert_eq!(overall.value(), 2.5);

        f.risk_score = Some(89.9);
        let overall = overall_rating(&f, &ratings([5.0; 4]), &config, as_of());
        assert_eq!(overall.value(), 5.0);
    }

    #[test]
    fn ceilings_never_raise() {
        let config = RatingConfig::default();
        let mut f = facility("f1");
        f.status = OperatingStatus::Closed;
        f.risk_score = Some(99.0);
        // Already below every ceiling: stays put.
        let overall = overall_rating(&f, &ratings([1.0; 4]), &config, as_of());
        assert_eq!(overall.value(), 1.0);
    }

    #[test]
    fn overlapping_ceilings_take_the_lowest() {
        let config = RatingConfig::default();
        let mut f = facility("f1");
        f.status = OperatingStatus::Inactive; // caps at 2.0
        f.risk_score = Some(95.0); // caps at 2.5
        let overall = overall_rating(&f, &ratings([5.0; 4]), &config, as_of());
        assert_eq!(overall.value(), 2.0);
    }
}
