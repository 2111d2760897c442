//! Process quality raw scoring.
//!
//! Process quality is what happens during the day: curriculum,
//! accreditation, program focus areas, and violations that touch the
//! daily experience (supervision, discipline, rest). It is the least
//! observable dimension, so the signals are keyword-driven and the
//! baseline splits on whether a curriculum is described at all.

use super::{clamp_score, text};
use crate::config::ProcessScoring;
use crate::core::{Facility, Violation};

pub fn score(facility: &Facility, config: &ProcessScoring) -> f64 {
    let services = text::normalize(&facility.program_services);

    let describes_curriculum = config
        .curriculum_rules
        .iter()
        .any(|rule| rule.matches(&services));
    let mut score = if describes_curriculum {
        config.curriculum_baseline
    } else {
        config.default_baseline
    };

    score += text::capped_bonus(&config.curriculum_rules, &services, config.curriculum_bonus_cap);
    score += text::capped_bonus(
        &config.accreditation_rules,
        &services,
        config.accreditation_bonus_cap,
    );
    score += text::capped_bonus(&config.focus_rules, &services, config.focus_bonus_cap);

    let process_violations = facility
        .violations
        .iter()
        .filter(|v| is_process_related(v, config))
        .count();
    let penalty =
        (process_violations as f64 * config.violation_penalty).min(config.violation_penalty_cap);

    clamp_score(score - penalty)
}

fn is_process_related(violation: &Violation, config: &ProcessScoring) -> bool {
    violation.category.is_process_related()
        || text::contains_any(
            &config.violation_keywords,
            &text::normalize(&violation.description),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ViolationCategory;

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
    fn no_curriculum_uses_the_lower_baseline() {
        let config = ProcessScoring::default();
        let mut f = facility("f1");
        f.program_services = "Meals, transportation to local schools".to_string();
        assert_eq!(score(&f, &config), 4.5);
    }

    #[test]
    fn curriculum_mention_lifts_baseline_and_earns_its_bonus() {
        let config = ProcessScoring::default();
        let mut f = facility("f1");
        f.program_services = "Play-based curriculum".to_string();
        // 5.5 baseline + 0.3 generic curriculum bonus
        assert!((score(&f, &config) - 5.8).abs() < 1e-9);
    }

    #[test]
    fn established_method_earns_more_but_the_cap_holds() {
        let config = ProcessScoring::default();
        let mut f = facility("f1");
        f.program_services = "Montessori curriculum with STEM enrichment".to_string();
        // Bonus would be 0.8 + 0.5 + 0.3 = 1.6; capped at 1.0.
        assert!((score(&f, &config) - 6.5).abs() < 1e-9);
    }

    #[test]
    fn accreditation_and_focus_areas_stack() {
        let config = ProcessScoring::default();
        let mut f = facility("f1");
        f.program_services =
            "NAEYC accredited program, bilingual immersion, outdoor classroom".to_string();
        // No curriculum wording: baseline 4.5.
        // Accreditation: naeyc 1.0 + other "accredit" 0.4 = 1.4, capped 1.2.
        // Focus: language 0.2 + outdoor 0.2 = 0.4.
        assert!((score(&f, &config) - 6.1).abs() < 1e-9);
    }

    #[test]
    fn process_violations_deduct_and_saturate() {
        let config = ProcessScoring::default();
        let mut f = facility("f1");
        f.violations = vec![
            Violation {
                category: ViolationCategory::ChildWellBeing,
                ..Default::default()
            },
            Violation {
                category: ViolationCategory::SleepRest,
                ..Default::default()
            },
            Violation {
                description: "Inadequate supervision during outdoor play".to_string(),
                ..Default::default()
            },
        ];
        // 4.5 - 3 * 0.4
        assert!((score(&f, &config) - 3.3).abs() < 1e-9);

        // Eight process violations would be -3.2; the cap stops at -2.0.
        f.violations = (0..8)
            .map(|_| Violation {
                category: ViolationCategory::SleepRest,
                ..Default::default()
            })
            .collect();
        assert!((score(&f, &config) - 2.5).abs() < 1e-9);
    }

    #[test]
    fn unrelated_violations_do_not_touch_process() {
        let config = ProcessScoring::default();
        let mut f = facility("f1");
        f.violations = vec![Violation {
            category: ViolationCategory::Paperwork,
            description: "Enrollment forms incomplete".to_string(),
            ..Default::default()
        }];
        assert_eq!(score(&f, &config), 4.5);
    }
}
