// Sub-modules
mod confidence;
mod loader;
mod parallel;
mod scoring;
mod thresholds;

use serde::{Deserialize, Serialize};

// Re-export scoring types
pub use scoring::{
    default_health_safety_weight, default_management_weight, default_process_weight,
    default_structural_weight, CapacityBand, DimensionWeights, HealthSafetyScoring,
    ManagementScoring, ProcessScoring, RiskDeductions, StructuralScoring, TenureBaselines,
};

// Re-export threshold types
pub use thresholds::{
    default_overall_cuts, default_zscore_cuts, BandTable, BandingStrategy, CeilingConfig,
    ThresholdsConfig,
};

// Re-export confidence types
pub use confidence::{
    ConfidenceConfig, ConfidenceMix, InspectionMultipliers, TenureMultipliers,
};

// Re-export parallel config types
pub use parallel::ParallelConfig;

// Re-export loader functions
pub use loader::{
    directory_ancestors, load_config, load_config_from_path, parse_and_validate_config,
    CONFIG_FILE_NAME,
};

/// Complete rating configuration, loaded once per run and treated as
/// immutable for the duration of the batch.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RatingConfig {
    /// Dimension weights for the overall blend
    #[serde(default)]
    pub weights: DimensionWeights,

    /// Raw scoring knobs per dimension
    #[serde(default)]
    pub health_safety: HealthSafetyScoring,
    #[serde(default)]
    pub structural: StructuralScoring,
    #[serde(default)]
    pub process: ProcessScoring,
    #[serde(default)]
    pub management: ManagementScoring,

    /// Banding strategy and cut tables
    #[serde(default)]
    pub thresholds: ThresholdsConfig,

    /// Confidence interval tables
    #[serde(default)]
    pub confidence: ConfidenceConfig,

    /// Overall rating ceilings
    #[serde(default)]
    pub ceilings: CeilingConfig,

    /// Stage fan-out controls
    #[serde(default)]
    pub parallel: ParallelConfig,
}

impl RatingConfig {
    /// Validate every section that carries cross-field invariants.
    pub fn validate(&self) -> Result<(), String> {
        self.weights.validate()?;
        self.thresholds.validate()?;
        self.confidence.validate()?;
        Ok(())
    }
}
