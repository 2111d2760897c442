//! Banding thresholds for the nine-level star scale
//!
//! Cut tables are descending: a value at or above `cuts[0]` bands to
//! 5.0 stars, at or above `cuts[1]` to 4.5, and so on down to 1.0 for
//! values below every cut.

use crate::core::{BandingMethod, Dimension, Stars};
use serde::{Deserialize, Serialize};

/// Primary banding strategy for dimension ratings.
///
/// Raw-score banding is not selectable as a primary strategy; it is the
/// fallback for degenerate populations and the only path for the
/// overall blend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BandingStrategy {
    #[default]
    Percentile,
    ZScore,
}

impl BandingStrategy {
    pub fn method(self) -> BandingMethod {
        match self {
            BandingStrategy::Percentile => BandingMethod::Percentile,
            BandingStrategy::ZScore => BandingMethod::ZScore,
        }
    }
}

/// Eight descending cut points mapping a value onto the nine star levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BandTable(pub [f64; 8]);

impl BandTable {
    /// Band a value: the first cut the value reaches wins, scanning from
    /// the top. Non-finite values band to the lowest level.
    pub fn band(&self, value: f64) -> Stars {
        if !value.is_finite() {
            return Stars::MIN;
        }
        for (i, cut) in self.0.iter().enumerate() {
            if value >= *cut {
                return Stars::from_band_index(8 - i);
            }
        }
        Stars::MIN
    }

    pub fn is_descending(&self) -> bool {
        self.0.windows(2).all(|pair| pair[0] > pair[1])
    }
}

/// Threshold configuration for all banding strategies
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThresholdsConfig {
    /// Strategy used for dimension banding when the population supports
    /// it (default: percentile)
    #[serde(default)]
    pub banding: BandingStrategy,

    /// Raw-score cuts per dimension, used as the fallback path
    #[serde(default = "default_health_safety_cuts")]
    pub health_safety: BandTable,
    #[serde(default = "default_structural_cuts")]
    pub structural: BandTable,
    #[serde(default = "default_process_cuts")]
    pub process: BandTable,
    #[serde(default = "default_management_cuts")]
    pub management: BandTable,

    /// Cuts in star units for re-banding the weighted overall blend
    #[serde(default = "default_overall_cuts")]
    pub overall: BandTable,

    /// Cuts in standard deviations for z-score banding
    #[serde(default = "default_zscore_cuts")]
    pub zscore: BandTable,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            banding: BandingStrategy::default(),
            health_safety: default_health_safety_cuts(),
            structural: default_structural_cuts(),
            process: default_process_cuts(),
            management: default_management_cuts(),
            overall: default_overall_cuts(),
            zscore: default_zscore_cuts(),
        }
    }
}

impl ThresholdsConfig {
    pub fn raw_table(&self, dimension: Dimension) -> &BandTable {
        match dimension {
            Dimension::HealthSafety => &self.health_safety,
            Dimension::Structural => &self.structural,
            Dimension::Process => &self.process,
            Dimension::Management => &self.management,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let tables = [
            ("health_safety", &self.health_safety),
            ("structural", &self.structural),
            ("process", &self.process),
            ("management", &self.management),
            ("overall", &self.overall),
            ("zscore", &self.zscore),
        ];
        for (name, table) in tables {
            if !table.is_descending() {
                return Err(format!("{} cuts must be strictly descending", name));
            }
        }
        Ok(())
    }
}

// Health & safety holds the strictest curve: a facility needs a
// near-clean record to reach the top bands on raw score alone.
pub fn default_health_safety_cuts() -> BandTable {
    BandTable([9.5, 9.0, 8.5, 8.0, 7.0, 6.0, 5.0, 4.0])
}
pub fn default_structural_cuts() -> BandTable {
    BandTable([7.5, 6.75, 6.0, 5.0, 4.25, 3.5, 2.75, 2.0])
}
pub fn default_process_cuts() -> BandTable {
    BandTable([7.0, 6.25, 5.5, 4.5, 3.75, 3.0, 2.25, 1.5])
}
pub fn default_management_cuts() -> BandTable {
    BandTable([7.0, 6.5, 5.5, 4.75, 4.0, 3.25, 2.5, 1.75])
}
pub fn default_overall_cuts() -> BandTable {
    BandTable([4.7, 4.2, 3.8, 3.4, 3.0, 2.6, 2.2, 1.8])
}
pub fn default_zscore_cuts() -> BandTable {
    BandTable([1.5, 1.0, 0.5, 0.2, -0.2, -0.5, -1.0, -1.5])
}

/// Post-banding ceilings on the overall rating. Ceilings only ever
/// lower a rating.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CeilingConfig {
    /// Ceiling for facilities not currently operating (default: 2.0)
    #[serde(default = "default_inactive_ceiling")]
    pub inactive: f64,

    /// Ceiling when a high-risk violation coincides with any violation
    /// inside the recency window (default: 4.0)
    #[serde(default = "default_elevated_risk_ceiling")]
    pub elevated_risk: f64,

    /// Recency window in months for the elevated-risk ceiling
    /// (default: 12)
    #[serde(default = "default_ceiling_window_months")]
    pub recent_window_months: u32,

    /// Composite risk score at or above which the critical ceiling
    /// applies (default: 90.0)
    #[serde(default = "default_critical_risk_score")]
    pub critical_risk_score: f64,

    /// Ceiling for critical-risk facilities (default: 2.5)
    #[serde(default = "default_critical_risk_ceiling")]
    pub critical_risk: f64,
}

impl Default for CeilingConfig {
    fn default() -> Self {
        Self {
            inactive: default_inactive_ceiling(),
            elevated_risk: default_elevated_risk_ceiling(),
            recent_window_months: default_ceiling_window_months(),
            critical_risk_score: default_critical_risk_score(),
            critical_risk: default_critical_risk_ceiling(),
        }
    }
}

pub fn default_inactive_ceiling() -> f64 {
    2.0
}
pub fn default_elevated_risk_ceiling() -> f64 {
    4.0
}
pub fn default_ceiling_window_months() -> u32 {
    12
}
pub fn default_critical_risk_score() -> f64 {
    90.0
}
pub fn default_critical_risk_ceiling() -> f64 {
    2.5
}
