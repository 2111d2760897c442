//! Health & safety raw scoring.
//!
//! The preferred signal is the composite risk score computed by the
//! licensing authority (0-100, higher is riskier), mapped linearly onto
//! the 0-10 scale. Facilities without one are scored by weighted
//! deductions for each violation's assigned risk level.

use super::clamp_score;
use crate::config::HealthSafetyScoring;
use crate::core::errors::{Error, Result};
use crate::core::{Dimension, Facility, RiskLevel};

pub fn score(facility: &Facility, config: &HealthSafetyScoring) -> Result<f64> {
    if let Some(risk) = facility.risk_score {
        if !risk.is_finite() {
            return Err(Error::scoring(
                facility.id.as_str(),
                Dimension::HealthSafety,
                format!("composite risk score is not a number: {risk}"),
            ));
        }
        return Ok(clamp_score(config.base - risk * config.risk_score_factor));
    }

    let mut score = config.base;
    for level in RiskLevel::ALL {
        let count = f64::from(facility.risk_level_count(level));
        score -= count * config.deductions.get(level);
    }
    Ok(clamp_score(score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{RiskLevelCounts, Violation};

    fn facility(id: &str) -> Facility {
        Facility {
            id: id.into(),
            name: String::new(),
            capacity: None,
            ages_served: String::new(),
            hours: String::new(),
            program_services: String::new(),
            permit_condition: false,
            status: Default::default(),
            license_issued: None,
            risk_score: None,
            risk_level_counts: None,
            violations: Vec::new(),
            inspections: Vec::new(),
        }
    }

    #[test]
    fn composite_risk_score_maps_linearly() {
        let config = HealthSafetyScoring::default();
        let mut f = facility("f1");

        f.risk_score = Some(0.0);
        assert_eq!(score(&f, &config).unwrap(), 10.0);

        f.risk_score = Some(35.0);
        assert_eq!(score(&f, &config).unwrap(), 6.5);

        f.risk_score = Some(100.0);
        assert_eq!(score(&f, &config).unwrap(), 0.0);

        // Out-of-range composites clamp instead of escaping the scale.
        f.risk_score = Some(130.0);
        assert_eq!(score(&f, &config).unwrap(), 0.0);
    }

    #[test]
    fn non_finite_risk_score_is_a_scoring_error() {
        let config = HealthSafetyScoring::default();
        let mut f = facility("f1");
        f.risk_score = Some(f64::NAN);
        assert!(score(&f, &config).is_err());
    }

    #[test]
    fn deductions_apply_per_risk_level() {
        let config = HealthSafetyScoring::default();
        let mut f = facility("f1");
        f.violations = vec![
            Violation {
                risk_level: Some(RiskLevel::High),
                ..Default::default()
            },
            Violation {
                risk_level: Some(RiskLevel::Medium),
                ..Default::default()
            },
            Violation {
                risk_level: Some(RiskLevel::Low),
                ..Default::default()
            },
            // Unleveled violations deduct nothing here; they are picked
            // up by the other dimensions.
            Violation::default(),
        ];
        // 10.0 - 2.0 - 0.5 - 0.2
        assert!((score(&f, &config).unwrap() - 7.3).abs() < 1e-9);
    }

    #[test]
    fn preaggregated_counters_take_precedence() {
        let config = HealthSafetyScoring::default();
        let mut f = facility("f1");
        f.risk_level_counts = Some(RiskLevelCounts {
            high: 2,
            medium_high: 1,
            ..Default::default()
        });
        f.violations = vec![Violation {
            risk_level: Some(RiskLevel::Low),
            ..Default::default()
        }];
        // 10.0 - 2*2.0 - 1.0; the violation list is ignored.
        assert!((score(&f, &config).unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn heavy_histories_clamp_to_zero() {
        let config = HealthSafetyScoring::default();
        let mut f = facility("f1");
        f.risk_level_counts = Some(RiskLevelCounts {
            high: 9,
            ..Default::default()
        });
        assert_eq!(score(&f, &config).unwrap(), 0.0);
    }

    #[test]
    fn clean_facility_scores_base() {
        let config = HealthSafetyScoring::default();
        assert_eq!(score(&facility("f1"), &config).unwrap(), 10.0);
    }
}
