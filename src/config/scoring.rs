//! Scoring configuration for facility quality ratings
//!
//! This module contains the configuration types that drive raw dimension
//! scoring:
//! - Dimension weights for the overall blend
//! - Health & safety risk deductions
//! - Structural capacity bands and ratio penalties
//! - Process curriculum/accreditation keyword rules
//! - Management tenure baselines and violation-ratio bands

use crate::core::{Dimension, RiskLevel};
use crate::scoring::text::KeywordRule;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Weights for blending dimension ratings into the overall rating
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DimensionWeights {
    /// Weight for health & safety (0.0-1.0)
    #[serde(default = "default_health_safety_weight")]
    pub health_safety: f64,

    /// Weight for structural quality (0.0-1.0)
    #[serde(default = "default_structural_weight")]
    pub structural: f64,

    /// Weight for process quality (0.0-1.0)
    #[serde(default = "default_process_weight")]
    pub process: f64,

    /// Weight for management quality (0.0-1.0)
    #[serde(default = "default_management_weight")]
    pub management: f64,
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self {
            health_safety: default_health_safety_weight(),
            structural: default_structural_weight(),
            process: default_process_weight(),
            management: default_management_weight(),
        }
    }
}

impl DimensionWeights {
    // Pure function: Check if a weight is in valid range
    pub fn is_valid_weight(weight: f64) -> bool {
        (0.0..=1.0).contains(&weight)
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::HealthSafety => self.health_safety,
            Dimension::Structural => self.structural,
            Dimension::Process => self.process,
            Dimension::Management => self.management,
        }
    }

    pub fn as_map(&self) -> BTreeMap<Dimension, f64> {
        Dimension::ALL.iter().map(|&d| (d, self.get(d))).collect()
    }

    /// Validate that weights sum to 1.0 (with small tolerance for floating point)
    pub fn validate(&self) -> Result<(), String> {
        for dimension in Dimension::ALL {
            let weight = self.get(dimension);
            if !Self::is_valid_weight(weight) {
                return Err(format!(
                    "{} weight must be between 0.0 and 1.0",
                    dimension
                ));
            }
        }

        let sum: f64 = Dimension::ALL.iter().map(|&d| self.get(d)).sum();
        if (sum - 1.0).abs() > 0.001 {
            return Err(format!(
                "Dimension weights must sum to 1.0, but sum to {:.3}",
                sum
            ));
        }

        Ok(())
    }

    /// Normalize weights to ensure they sum to 1.0
    pub fn normalize(&mut self) {
        let sum = self.health_safety + self.structural + self.process + self.management;
        if sum > 0.0 && (sum - 1.0).abs() > 0.001 {
            self.health_safety /= sum;
            self.structural /= sum;
            self.process /= sum;
            self.management /= sum;
        }
    }
}

// Default weights for the overall blend - safety dominates parent-facing risk
pub fn default_health_safety_weight() -> f64 {
    0.40 // 40% weight - monitoring findings are the strongest quality signal
}
pub fn default_structural_weight() -> f64 {
    0.25 // 25% weight for capacity, ratios, and physical environment
}
pub fn default_process_weight() -> f64 {
    0.20 // 20% weight for curriculum and daily program quality
}
pub fn default_management_weight() -> f64 {
    0.15 // 15% weight for operational track record
}

/// Deduction per violation at each risk level, applied against the
/// health & safety base when no composite risk score is available
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskDeductions {
    /// Deduction per high-risk violation (default: 2.0)
    #[serde(default = "default_high_deduction")]
    pub high: f64,

    /// Deduction per medium-high violation (default: 1.0)
    #[serde(default = "default_medium_high_deduction")]
    pub medium_high: f64,

    /// Deduction per medium violation (default: 0.5)
    #[serde(default = "default_medium_deduction")]
    pub medium: f64,

    /// Deduction per medium-low violation (default: 0.3)
    #[serde(default = "default_medium_low_deduction")]
    pub medium_low: f64,

    /// Deduction per low-risk violation (default: 0.2)
    #[serde(default = "default_low_deduction")]
    pub low: f64,
}

impl Default for RiskDeductions {
    fn default() -> Self {
        Self {
            high: default_high_deduction(),
            medium_high: default_medium_high_deduction(),
            medium: default_medium_deduction(),
            medium_low: default_medium_low_deduction(),
            low: default_low_deduction(),
        }
    }
}

impl RiskDeductions {
    pub fn get(&self, level: RiskLevel) -> f64 {
        match level {
            RiskLevel::High => self.high,
            RiskLevel::MediumHigh => self.medium_high,
            RiskLevel::Medium => self.medium,
            RiskLevel::MediumLow => self.medium_low,
            RiskLevel::Low => self.low,
        }
    }
}

pub fn default_high_deduction() -> f64 {
    2.0 // A handful of high-risk findings should exhaust the scale
}
pub fn default_medium_high_deduction() -> f64 {
    1.0
}
pub fn default_medium_deduction() -> f64 {
    0.5
}
pub fn default_medium_low_deduction() -> f64 {
    0.3
}
pub fn default_low_deduction() -> f64 {
    0.2
}

/// Health & safety raw scoring configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthSafetyScoring {
    /// Starting score before deductions (default: 10.0)
    #[serde(default = "default_health_safety_base")]
    pub base: f64,

    /// Points deducted per composite risk score unit (default: 0.1)
    ///
    /// Risk scores arrive on a 0-100 scale, higher meaning riskier, so
    /// the default maps 0 -> 10.0 and 100 -> 0.0.
    #[serde(default = "default_risk_score_factor")]
    pub risk_score_factor: f64,

    /// Per-level deductions used when no composite risk score is present
    #[serde(default)]
    pub deductions: RiskDeductions,
}

impl Default for HealthSafetyScoring {
    fn default() -> Self {
        Self {
            base: default_health_safety_base(),
            risk_score_factor: default_risk_score_factor(),
            deductions: RiskDeductions::default(),
        }
    }
}

pub fn default_health_safety_base() -> f64 {
    10.0
}
pub fn default_risk_score_factor() -> f64 {
    0.1
}

/// One capacity band: facilities at or under `max_capacity` children
/// receive `adjustment` points
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CapacityBand {
    pub max_capacity: u32,
    pub adjustment: f64,
}

/// Structural quality raw scoring configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StructuralScoring {
    /// Starting score before adjustments (default: 5.0)
    #[serde(default = "default_structural_baseline")]
    pub baseline: f64,

    /// Capacity bands in ascending order; the first band whose
    /// max_capacity covers the facility applies
    #[serde(default = "default_capacity_bands")]
    pub capacity_bands: Vec<CapacityBand>,

    /// Adjustment for facilities larger than every band (default: -0.5)
    #[serde(default = "default_over_capacity_adjustment")]
    pub over_capacity_adjustment: f64,

    /// Keywords identifying infant/toddler care in service descriptions
    /// and age-group problems in violation narratives
    #[serde(default = "default_age_group_keywords")]
    pub age_group_keywords: Vec<String>,

    /// Bonus for serving infants/toddlers with a clean age-group record
    /// (default: 0.5)
    #[serde(default = "default_infant_bonus")]
    pub infant_bonus: f64,

    /// Penalty when infant/toddler care coincides with an age-group
    /// violation (default: 0.75)
    #[serde(default = "default_infant_violation_penalty")]
    pub infant_violation_penalty: f64,

    /// Keywords identifying ratio and group-size violations
    #[serde(default = "default_ratio_keywords")]
    pub ratio_keywords: Vec<String>,

    /// Penalty for exactly one ratio violation (default: 1.0)
    #[serde(default = "default_ratio_penalty_one")]
    pub ratio_penalty_one: f64,

    /// Penalty for exactly two ratio violations (default: 2.0)
    #[serde(default = "default_ratio_penalty_two")]
    pub ratio_penalty_two: f64,

    /// Penalty for three or more ratio violations (default: 3.0)
    #[serde(default = "default_ratio_penalty_three_plus")]
    pub ratio_penalty_three_plus: f64,

    /// Extra penalty when any ratio violation falls inside the recency
    /// window (default: 0.5)
    #[serde(default = "default_recent_ratio_penalty")]
    pub recent_ratio_penalty: f64,

    /// Recency window in months for the extra ratio penalty (default: 12)
    #[serde(default = "default_recent_window_months")]
    pub recent_window_months: u32,
}

impl Default for StructuralScoring {
    fn default() -> Self {
        Self {
            baseline: default_structural_baseline(),
            capacity_bands: default_capacity_bands(),
            over_capacity_adjustment: default_over_capacity_adjustment(),
            age_group_keywords: default_age_group_keywords(),
            infant_bonus: default_infant_bonus(),
            infant_violation_penalty: default_infant_violation_penalty(),
            ratio_keywords: default_ratio_keywords(),
            ratio_penalty_one: default_ratio_penalty_one(),
            ratio_penalty_two: default_ratio_penalty_two(),
            ratio_penalty_three_plus: default_ratio_penalty_three_plus(),
            recent_ratio_penalty: default_recent_ratio_penalty(),
            recent_window_months: default_recent_window_months(),
        }
    }
}

impl StructuralScoring {
    /// Capacity adjustment for a facility, or 0.0 when capacity is unknown.
    pub fn capacity_adjustment(&self, capacity: Option<u32>) -> f64 {
        let Some(capacity) = capacity else {
            return 0.0;
        };
        self.capacity_bands
            .iter()
            .find(|band| capacity <= band.max_capacity)
            .map(|band| band.adjustment)
            .unwrap_or(self.over_capacity_adjustment)
    }

    /// Escalating penalty for the given count of ratio violations.
    pub fn ratio_penalty(&self, count: usize) -> f64 {
        match count {
            0 => 0.0,
            1 => self.ratio_penalty_one,
            2 => self.ratio_penalty_two,
            _ => self.ratio_penalty_three_plus,
        }
    }
}

pub fn default_structural_baseline() -> f64 {
    5.0
}
pub fn default_capacity_bands() -> Vec<CapacityBand> {
    vec![
        // Home-scale settings rate best on environment quality
        CapacityBand {
            max_capacity: 12,
            adjustment: 0.75,
        },
        CapacityBand {
            max_capacity: 50,
            adjustment: 0.5,
        },
        CapacityBand {
            max_capacity: 100,
            adjustment: 0.0,
        },
        CapacityBand {
            max_capacity: 150,
            adjustment: -0.25,
        },
    ]
}
pub fn default_over_capacity_adjustment() -> f64 {
    -0.5
}
pub fn default_age_group_keywords() -> Vec<String> {
    to_strings(&["infant", "toddler", "0-17 months", "newborn"])
}
pub fn default_infant_bonus() -> f64 {
    0.5 // Serving the hardest age group well is a structural strength
}
pub fn default_infant_violation_penalty() -> f64 {
    0.75
}
pub fn default_ratio_keywords() -> Vec<String> {
    to_strings(&["ratio", "group size", "capacity", "too many children"])
}
pub fn default_ratio_penalty_one() -> f64 {
    1.0
}
pub fn default_ratio_penalty_two() -> f64 {
    2.0
}
pub fn default_ratio_penalty_three_plus() -> f64 {
    3.0
}
pub fn default_recent_ratio_penalty() -> f64 {
    0.5
}
pub fn default_recent_window_months() -> u32 {
    12
}

/// Process quality raw scoring configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcessScoring {
    /// Starting score when the program describes a curriculum (default: 5.5)
    #[serde(default = "default_curriculum_baseline")]
    pub curriculum_baseline: f64,

    /// Starting score otherwise (default: 4.5)
    #[serde(default = "default_process_baseline")]
    pub default_baseline: f64,

    /// Curriculum method rules, strongest first; matched weights sum up
    /// to the curriculum bonus cap
    #[serde(default = "default_curriculum_rules")]
    pub curriculum_rules: Vec<KeywordRule>,

    /// Cap on the summed curriculum bonus (default: 1.0)
    #[serde(default = "default_curriculum_bonus_cap")]
    pub curriculum_bonus_cap: f64,

    /// Accreditation rules, strongest first
    #[serde(default = "default_accreditation_rules")]
    pub accreditation_rules: Vec<KeywordRule>,

    /// Cap on the summed accreditation bonus (default: 1.2)
    #[serde(default = "default_accreditation_bonus_cap")]
    pub accreditation_bonus_cap: f64,

    /// Program focus areas, each worth its rule weight
    #[serde(default = "default_focus_rules")]
    pub focus_rules: Vec<KeywordRule>,

    /// Cap on the summed focus-area bonus (default: 0.6)
    #[serde(default = "default_focus_bonus_cap")]
    pub focus_bonus_cap: f64,

    /// Keywords marking a violation narrative as process-related
    #[serde(default = "default_process_violation_keywords")]
    pub violation_keywords: Vec<String>,

    /// Penalty per process-related violation (default: 0.4)
    #[serde(default = "default_process_violation_penalty")]
    pub violation_penalty: f64,

    /// Cap on the total process-violation penalty (default: 2.0)
    #[serde(default = "default_process_penalty_cap")]
    pub violation_penalty_cap: f64,
}

impl Default for ProcessScoring {
    fn default() -> Self {
        Self {
            curriculum_baseline: default_curriculum_baseline(),
            default_baseline: default_process_baseline(),
            curriculum_rules: default_curriculum_rules(),
            curriculum_bonus_cap: default_curriculum_bonus_cap(),
            accreditation_rules: default_accreditation_rules(),
            accreditation_bonus_cap: default_accreditation_bonus_cap(),
            focus_rules: default_focus_rules(),
            focus_bonus_cap: default_focus_bonus_cap(),
            violation_keywords: default_process_violation_keywords(),
            violation_penalty: default_process_violation_penalty(),
            violation_penalty_cap: default_process_penalty_cap(),
        }
    }
}

pub fn default_curriculum_baseline() -> f64 {
    5.5
}
pub fn default_process_baseline() -> f64 {
    4.5
}
pub fn default_curriculum_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule::new(
            "established method",
            &[
                "montessori",
                "reggio",
                "waldorf",
                "highscope",
                "high scope",
                "creative curriculum",
            ],
            0.8,
        ),
        KeywordRule::new("stem", &["stem", "steam"], 0.5),
        KeywordRule::new(
            "general curriculum",
            &["curriculum", "school readiness", "kindergarten prep"],
            0.3,
        ),
    ]
}
pub fn default_curriculum_bonus_cap() -> f64 {
    1.0
}
pub fn default_accreditation_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule::new("national", &["naeyc", "necpa", "nafcc"], 1.0),
        KeywordRule::new(
            "state",
            &["rising star", "quality rated", "state accredit"],
            0.6,
        ),
        KeywordRule::new("other", &["accredit"], 0.4),
    ]
}
pub fn default_accreditation_bonus_cap() -> f64 {
    1.2
}
pub fn default_focus_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule::new(
            "language",
            &["bilingual", "dual language", "language immersion", "spanish"],
            0.2,
        ),
        KeywordRule::new("inclusion", &["special needs", "inclusive", "inclusion"], 0.2),
        KeywordRule::new("arts", &["music", "art program", "creative expression"], 0.2),
        KeywordRule::new("outdoor", &["outdoor", "nature", "garden"], 0.2),
    ]
}
pub fn default_focus_bonus_cap() -> f64 {
    0.6
}
pub fn default_process_violation_keywords() -> Vec<String> {
    to_strings(&[
        "supervision",
        "discipline",
        "activity plan",
        "lesson plan",
        "developmentally appropriate",
        "nap",
        "sleep",
    ])
}
pub fn default_process_violation_penalty() -> f64 {
    0.4
}
pub fn default_process_penalty_cap() -> f64 {
    2.0
}

/// Baseline management score by years of operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TenureBaselines {
    /// 0-1 years (default: 4.0)
    #[serde(default = "default_tenure_new")]
    pub new_facility: f64,

    /// 2-4 years (default: 4.5)
    #[serde(default = "default_tenure_developing")]
    pub developing: f64,

    /// 5-9 years (default: 5.0)
    #[serde(default = "default_tenure_established")]
    pub established: f64,

    /// 10+ years (default: 5.5)
    #[serde(default = "default_tenure_veteran")]
    pub veteran: f64,
}

impl Default for TenureBaselines {
    fn default() -> Self {
        Self {
            new_facility: default_tenure_new(),
            developing: default_tenure_developing(),
            established: default_tenure_established(),
            veteran: default_tenure_veteran(),
        }
    }
}

impl TenureBaselines {
    pub fn for_years(&self, years: u32) -> f64 {
        match years {
            0..=1 => self.new_facility,
            2..=4 => self.developing,
            5..=9 => self.established,
            _ => self.veteran,
        }
    }
}

pub fn default_tenure_new() -> f64 {
    4.0
}
pub fn default_tenure_developing() -> f64 {
    4.5
}
pub fn default_tenure_established() -> f64 {
    5.0
}
pub fn default_tenure_veteran() -> f64 {
    5.5
}

/// Management quality raw scoring configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManagementScoring {
    /// Baseline by tenure
    #[serde(default)]
    pub tenure: TenureBaselines,

    /// Inspections required for the deep-history bonus (default: 10)
    #[serde(default = "default_inspection_bonus_threshold")]
    pub inspection_bonus_threshold: usize,

    /// Bonus for a deep inspection history (default: 0.5)
    #[serde(default = "default_inspection_bonus")]
    pub inspection_bonus: f64,

    /// Violations-per-inspection ratio above which the severe penalty
    /// applies (default: 3.0 -> -2.0)
    #[serde(default = "default_ratio_severe")]
    pub ratio_severe: f64,
    #[serde(default = "default_ratio_severe_penalty")]
    pub ratio_severe_penalty: f64,

    /// (default: 2.0 -> -1.5)
    #[serde(default = "default_ratio_high")]
    pub ratio_high: f64,
    #[serde(default = "default_ratio_high_penalty")]
    pub ratio_high_penalty: f64,

    /// (default: 1.0 -> -1.0)
    #[serde(default = "default_ratio_elevated")]
    pub ratio_elevated: f64,
    #[serde(default = "default_ratio_elevated_penalty")]
    pub ratio_elevated_penalty: f64,

    /// (default: 0.5 -> -0.5)
    #[serde(default = "default_ratio_moderate")]
    pub ratio_moderate: f64,
    #[serde(default = "default_ratio_moderate_penalty")]
    pub ratio_moderate_penalty: f64,

    /// Ratio below which the clean-record bonus applies
    /// (default: 0.3 -> +0.5)
    #[serde(default = "default_ratio_clean")]
    pub ratio_clean: f64,
    #[serde(default = "default_ratio_clean_bonus")]
    pub ratio_clean_bonus: f64,

    /// Administrative violation count tiers (default: 5 -> -1.5,
    /// 3 -> -1.0, 1 -> -0.5)
    #[serde(default = "default_admin_many")]
    pub admin_many: usize,
    #[serde(default = "default_admin_many_penalty")]
    pub admin_many_penalty: f64,
    #[serde(default = "default_admin_several")]
    pub admin_several: usize,
    #[serde(default = "default_admin_several_penalty")]
    pub admin_several_penalty: f64,
    #[serde(default = "default_admin_some_penalty")]
    pub admin_some_penalty: f64,

    /// Penalty for operating under a permit condition (default: 0.5)
    #[serde(default = "default_permit_condition_penalty")]
    pub permit_condition_penalty: f64,

    /// Penalty when the facility has no inspection history (default: 1.0)
    #[serde(default = "default_no_inspection_penalty")]
    pub no_inspection_penalty: f64,
}

impl Default for ManagementScoring {
    fn default() -> Self {
        Self {
            tenure: TenureBaselines::default(),
            inspection_bonus_threshold: default_inspection_bonus_threshold(),
            inspection_bonus: default_inspection_bonus(),
            ratio_severe: default_ratio_severe(),
            ratio_severe_penalty: default_ratio_severe_penalty(),
            ratio_high: default_ratio_high(),
            ratio_high_penalty: default_ratio_high_penalty(),
            ratio_elevated: default_ratio_elevated(),
            ratio_elevated_penalty: default_ratio_elevated_penalty(),
            ratio_moderate: default_ratio_moderate(),
            ratio_moderate_penalty: default_ratio_moderate_penalty(),
            ratio_clean: default_ratio_clean(),
            ratio_clean_bonus: default_ratio_clean_bonus(),
            admin_many: default_admin_many(),
            admin_many_penalty: default_admin_many_penalty(),
            admin_several: default_admin_several(),
            admin_several_penalty: default_admin_several_penalty(),
            admin_some_penalty: default_admin_some_penalty(),
            permit_condition_penalty: default_permit_condition_penalty(),
            no_inspection_penalty: default_no_inspection_penalty(),
        }
    }
}

impl ManagementScoring {
    /// Signed adjustment for the violations-per-inspection ratio.
    pub fn ratio_adjustment(&self, ratio: f64) -> f64 {
        if ratio > self.ratio_severe {
            -self.ratio_severe_penalty
        } else if ratio > self.ratio_high {
            -self.ratio_high_penalty
        } else if ratio > self.ratio_elevated {
            -self.ratio_elevated_penalty
        } else if ratio > self.ratio_moderate {
            -self.ratio_moderate_penalty
        } else if ratio < self.ratio_clean {
            self.ratio_clean_bonus
        } else {
            0.0
        }
    }

    /// Penalty for the administrative violation count.
    pub fn admin_penalty(&self, count: usize) -> f64 {
        if count >= self.admin_many {
            self.admin_many_penalty
        } else if count >= self.admin_several {
            self.admin_several_penalty
        } else if count >= 1 {
            self.admin_some_penalty
        } else {
            0.0
        }
    }
}

pub fn default_inspection_bonus_threshold() -> usize {
    10
}
pub fn default_inspection_bonus() -> f64 {
    0.5
}
pub fn default_ratio_severe() -> f64 {
    3.0
}
pub fn default_ratio_severe_penalty() -> f64 {
    2.0
}
pub fn default_ratio_high() -> f64 {
    2.0
}
pub fn default_ratio_high_penalty() -> f64 {
    1.5
}
pub fn default_ratio_elevated() -> f64 {
    1.0
}
pub fn default_ratio_elevated_penalty() -> f64 {
    1.0
}
pub fn default_ratio_moderate() -> f64 {
    0.5
}
pub fn default_ratio_moderate_penalty() -> f64 {
    0.5
}
pub fn default_ratio_clean() -> f64 {
    0.3
}
pub fn default_ratio_clean_bonus() -> f64 {
    0.5
}
pub fn default_admin_many() -> usize {
    5
}
pub fn default_admin_many_penalty() -> f64 {
    1.5
}
pub fn default_admin_several() -> usize {
    3
}
pub fn default_admin_several_penalty() -> f64 {
    1.0
}
pub fn default_admin_some_penalty() -> f64 {
    0.5
}
pub fn default_permit_condition_penalty() -> f64 {
    0.5
}
pub fn default_no_inspection_penalty() -> f64 {
    1.0
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        let weights = DimensionWeights::default();
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn weights_out_of_range_rejected() {
        let weights = DimensionWeights {
            health_safety: 1.2,
            structural: -0.2,
            process: 0.0,
            management: 0.0,
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn weights_normalize_to_unit_sum() {
        let mut weights = DimensionWeights {
            health_safety: 2.0,
            structural: 1.0,
            process: 0.5,
            management: 0.5,
        };
        weights.normalize();
        let sum: f64 = Dimension::ALL.iter().map(|&d| weights.get(d)).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!((weights.health_safety - 0.5).abs() < 1e-9);
    }

    #[test]
    fn capacity_bands_pick_first_covering_band() {
        let config = StructuralScoring::default();
        assert_eq!(config.capacity_adjustment(Some(8)), 0.75);
        assert_eq!(config.capacity_adjustment(Some(12)), 0.75);
        assert_eq!(config.capacity_adjustment(Some(13)), 0.5);
        assert_eq!(config.capacity_adjustment(Some(100)), 0.0);
        assert_eq!(config.capacity_adjustment(Some(151)), -0.5);
        assert_eq!(config.capacity_adjustment(None), 0.0);
    }

    #[test]
    fn ratio_penalties_escalate() {
        let config = StructuralScoring::default();
        assert_eq!(config.ratio_penalty(0), 0.0);
        assert_eq!(config.ratio_penalty(1), 1.0);
        assert_eq!(config.ratio_penalty(2), 2.0);
        assert_eq!(config.ratio_penalty(7), 3.0);
    }

    #[test]
    fn tenure_baselines_by_band() {
        let tenure = TenureBaselines::default();
        assert_eq!(tenure.for_years(0), 4.0);
        assert_eq!(tenure.for_years(1), 4.0);
        assert_eq!(tenure.for_years(2), 4.5);
        assert_eq!(tenure.for_years(4), 4.5);
        assert_eq!(tenure.for_years(5), 5.0);
        assert_eq!(tenure.for_years(9), 5.0);
        assert_eq!(tenure.for_years(25), 5.5);
    }

    #[test]
    fn management_ratio_adjustment_bands() {
        let config = ManagementScoring::default();
        assert_eq!(config.ratio_adjustment(4.0), -2.0);
        assert_eq!(config.ratio_adjustment(2.5), -1.5);
        assert_eq!(config.ratio_adjustment(1.5), -1.0);
        assert_eq!(config.ratio_adjustment(0.75), -0.5);
        assert_eq!(config.ratio_adjustment(0.4), 0.0);
        assert_eq!(config.ratio_adjustment(0.1), 0.5);
        assert_eq!(config.ratio_adjustment(0.0), 0.5);
    }

    #[test]
    fn admin_penalty_tiers() {
        let config = ManagementScoring::default();
        assert_eq!(config.admin_penalty(0), 0.0);
        assert_eq!(config.admin_penalty(1), 0.5);
        assert_eq!(config.admin_penalty(3), 1.0);
        assert_eq!(config.admin_penalty(5), 1.5);
        assert_eq!(config.admin_penalty(12), 1.5);
    }

    #[test]
    fn scoring_config_round_trips_through_toml() {
        let config = ProcessScoring::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: ProcessScoring = toml::from_str(&text).unwrap();
        assert_eq!(config, parsed);
    }
}
