//! Confidence interval configuration
//!
//! Confidence is reported as a half-width in star units: a base interval
//! widened by how little evidence backs the rating. Sparse inspection
//! history and short tenure both widen the interval; each dimension
//! blends the two signals with its own mix.

use crate::core::Dimension;
use serde::{Deserialize, Serialize};

/// Interval multipliers by inspection count. Counts past the last field
/// use the last field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InspectionMultipliers {
    /// No inspections on record (default: 2.0)
    #[serde(default = "default_inspections_zero")]
    pub zero: f64,

    /// One inspection (default: 1.8)
    #[serde(default = "default_inspections_one")]
    pub one: f64,

    /// Two inspections (default: 1.6)
    #[serde(default = "default_inspections_two")]
    pub two: f64,

    /// Three inspections (default: 1.4)
    #[serde(default = "default_inspections_three")]
    pub three: f64,

    /// Four inspections (default: 1.2)
    #[serde(default = "default_inspections_four")]
    pub four: f64,

    /// Five or more inspections (default: 1.0)
    #[serde(default = "default_inspections_five_plus")]
    pub five_plus: f64,
}

impl Default for InspectionMultipliers {
    fn default() -> Self {
        Self {
            zero: default_inspections_zero(),
            one: default_inspections_one(),
            two: default_inspections_two(),
            three: default_inspections_three(),
            four: default_inspections_four(),
            five_plus: default_inspections_five_plus(),
        }
    }
}

impl InspectionMultipliers {
    pub fn for_count(&self, count: usize) -> f64 {
        match count {
            0 => self.zero,
            1 => self.one,
            2 => self.two,
            3 => self.three,
            4 => self.four,
            _ => self.five_plus,
        }
    }
}

pub fn default_inspections_zero() -> f64 {
    2.0 // An unrated history doubles the interval
}
pub fn default_inspections_one() -> f64 {
    1.8
}
pub fn default_inspections_two() -> f64 {
    1.6
}
pub fn default_inspections_three() -> f64 {
    1.4
}
pub fn default_inspections_four() -> f64 {
    1.2
}
pub fn default_inspections_five_plus() -> f64 {
    1.0
}

/// Interval multipliers by whole years in operation. Tenure past the
/// last field uses the last field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TenureMultipliers {
    /// Under a year (default: 1.6)
    #[serde(default = "default_tenure_zero")]
    pub zero: f64,

    /// One year (default: 1.45)
    #[serde(default = "default_tenure_one")]
    pub one: f64,

    /// Two years (default: 1.3)
    #[serde(default = "default_tenure_two")]
    pub two: f64,

    /// Three years (default: 1.15)
    #[serde(default = "default_tenure_three")]
    pub three: f64,

    /// Four or more years (default: 1.0)
    #[serde(default = "default_tenure_four_plus")]
    pub four_plus: f64,
}

impl Default for TenureMultipliers {
    fn default() -> Self {
        Self {
            zero: default_tenure_zero(),
            one: default_tenure_one(),
            two: default_tenure_two(),
            three: default_tenure_three(),
            four_plus: default_tenure_four_plus(),
        }
    }
}

impl TenureMultipliers {
    pub fn for_years(&self, years: u32) -> f64 {
        match years {
            0 => self.zero,
            1 => self.one,
            2 => self.two,
            3 => self.three,
            _ => self.four_plus,
        }
    }
}

pub fn default_tenure_zero() -> f64 {
    1.6
}
pub fn default_tenure_one() -> f64 {
    1.45
}
pub fn default_tenure_two() -> f64 {
    1.3
}
pub fn default_tenure_three() -> f64 {
    1.15
}
pub fn default_tenure_four_plus() -> f64 {
    1.0
}

/// How much each evidence signal counts for one dimension's interval.
/// The two weights sum to 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ConfidenceMix {
    pub inspection: f64,
    pub tenure: f64,
}

impl ConfidenceMix {
    pub fn blend(&self, inspection_multiplier: f64, tenure_multiplier: f64) -> f64 {
        self.inspection * inspection_multiplier + self.tenure * tenure_multiplier
    }
}

/// Confidence interval configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfidenceConfig {
    /// Interval half-width before widening, in star units (default: 0.5)
    #[serde(default = "default_confidence_base")]
    pub base: f64,

    /// Hard cap on any interval, in star units (default: 2.0)
    #[serde(default = "default_confidence_cap")]
    pub cap: f64,

    #[serde(default)]
    pub inspections: InspectionMultipliers,

    #[serde(default)]
    pub tenure: TenureMultipliers,

    /// Health & safety leans on inspection evidence (default: 0.7/0.3)
    #[serde(default = "default_health_safety_mix")]
    pub health_safety_mix: ConfidenceMix,

    /// (default: 0.5/0.5)
    #[serde(default = "default_structural_mix")]
    pub structural_mix: ConfidenceMix,

    /// (default: 0.5/0.5)
    #[serde(default = "default_process_mix")]
    pub process_mix: ConfidenceMix,

    /// Management leans on tenure (default: 0.3/0.7)
    #[serde(default = "default_management_mix")]
    pub management_mix: ConfidenceMix,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            base: default_confidence_base(),
            cap: default_confidence_cap(),
            inspections: InspectionMultipliers::default(),
            tenure: TenureMultipliers::default(),
            health_safety_mix: default_health_safety_mix(),
            structural_mix: default_structural_mix(),
            process_mix: default_process_mix(),
            management_mix: default_management_mix(),
        }
    }
}

impl ConfidenceConfig {
    pub fn mix(&self, dimension: Dimension) -> ConfidenceMix {
        match dimension {
            Dimension::HealthSafety => self.health_safety_mix,
            Dimension::Structural => self.structural_mix,
            Dimension::Process => self.process_mix,
            Dimension::Management => self.management_mix,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base <= 0.0 {
            return Err("confidence base must be positive".to_string());
        }
        if self.cap < self.base {
            return Err("confidence cap must be at least the base".to_string());
        }
        for dimension in Dimension::ALL {
            let mix = self.mix(dimension);
            if (mix.inspection + mix.tenure - 1.0).abs() > 0.001 {
                return Err(format!(
                    "{} confidence mix must sum to 1.0",
                    dimension
                ));
            }
        }
        Ok(())
    }
}

pub fn default_confidence_base() -> f64 {
    0.5
}
pub fn default_confidence_cap() -> f64 {
    2.0
}
pub fn default_health_safety_mix() -> ConfidenceMix {
    ConfidenceMix {
        inspection: 0.7,
        tenure: 0.3,
    }
}
pub fn default_structural_mix() -> ConfidenceMix {
    ConfidenceMix {
        inspection: 0.5,
        tenure: 0.5,
    }
}
pub fn default_process_mix() -> ConfidenceMix {
    ConfidenceMix {
        inspection: 0.5,
        tenure: 0.5,
    }
}
pub fn default_management_mix() -> ConfidenceMix {
    ConfidenceMix {
        inspection: 0.3,
        tenure: 0.7,
    }
}
