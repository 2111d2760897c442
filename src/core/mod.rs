pub mod errors;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stable identifier for a facility, as issued by the licensing authority.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacilityId(pub String);

impl FacilityId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FacilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for FacilityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for FacilityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Licensing status of a facility at snapshot time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatingStatus {
    Active,
    Inactive,
    Closed,
}

impl Default for OperatingStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// Category assigned to a violation by the licensing authority.
///
/// Snapshots from upstream systems carry categories we do not model;
/// those deserialize as `Unknown` rather than failing the facility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCategory {
    Safety,
    Health,
    ChildWellBeing,
    SleepRest,
    Transportation,
    Facility,
    Administrative,
    Paperwork,
    #[serde(other)]
    Unknown,
}

impl Default for ViolationCategory {
    fn default() -> Self {
        Self::Unknown
    }
}

impl ViolationCategory {
    /// Administrative and paperwork findings count against management,
    /// not against child-facing quality.
    pub fn is_administrative(self) -> bool {
        matches!(self, Self::Administrative | Self::Paperwork)
    }

    /// Categories that reflect day-to-day program quality.
    pub fn is_process_related(self) -> bool {
        matches!(self, Self::ChildWellBeing | Self::SleepRest)
    }
}

/// Risk level assigned to a violation, highest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    High,
    MediumHigh,
    Medium,
    MediumLow,
    Low,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 5] = [
        RiskLevel::High,
        RiskLevel::MediumHigh,
        RiskLevel::Medium,
        RiskLevel::MediumLow,
        RiskLevel::Low,
    ];
}

/// A single violation found during monitoring.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    #[serde(default)]
    pub category: ViolationCategory,
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub activity_date: Option<NaiveDate>,
    #[serde(default)]
    pub corrected: bool,
}

impl Violation {
    /// True when the violation is dated inside the trailing `months`
    /// window ending at `as_of`. Undated violations are never recent.
    pub fn is_within(&self, as_of: NaiveDate, months: u32) -> bool {
        match (self.activity_date, as_of.checked_sub_months(Months::new(months))) {
            (Some(date), Some(cutoff)) => date >= cutoff,
            _ => false,
        }
    }
}

/// A monitoring visit. Only the date matters for rating purposes;
/// findings arrive separately as violations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Inspection {
    #[serde(default)]
    pub activity_date: Option<NaiveDate>,
}

/// Pre-aggregated violation counts by risk level.
///
/// Some upstream snapshots ship these counters instead of (or alongside)
/// the full violation list; when present they take precedence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskLevelCounts {
    #[serde(default)]
    pub high: u32,
    #[serde(default)]
    pub medium_high: u32,
    #[serde(default)]
    pub medium: u32,
    #[serde(default)]
    pub medium_low: u32,
    #[serde(default)]
    pub low: u32,
}

impl RiskLevelCounts {
    pub fn get(&self, level: RiskLevel) -> u32 {
        match level {
            RiskLevel::High => self.high,
            RiskLevel::MediumHigh => self.medium_high,
            RiskLevel::Medium => self.medium,
            RiskLevel::MediumLow => self.medium_low,
            RiskLevel::Low => self.low,
        }
    }
}

/// A facility as it appears in the input snapshot.
///
/// Every field beyond the identifier is optional in upstream data;
/// absent values contribute nothing to scoring.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Facility {
    pub id: FacilityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub ages_served: String,
    #[serde(default)]
    pub hours: String,
    #[serde(default)]
    pub program_services: String,
    #[serde(default)]
    pub permit_condition: bool,
    #[serde(default)]
    pub status: OperatingStatus,
    #[serde(default)]
    pub license_issued: Option<NaiveDate>,
    #[serde(default)]
    pub risk_score: Option<f64>,
    #[serde(default)]
    pub risk_level_counts: Option<RiskLevelCounts>,
    #[serde(default)]
    pub violations: Vec<Violation>,
    #[serde(default)]
    pub inspections: Vec<Inspection>,
}

impl Facility {
    pub fn is_active(&self) -> bool {
        self.status == OperatingStatus::Active
    }

    /// Whole years of licensed operation as of the given date.
    /// Unknown issuance dates count as zero years.
    pub fn years_in_operation(&self, as_of: NaiveDate) -> u32 {
        self.license_issued
            .and_then(|issued| as_of.years_since(issued))
            .unwrap_or(0)
    }

    pub fn inspection_count(&self) -> usize {
        self.inspections.len()
    }

    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    /// Violations dated within the trailing `months` window ending at `as_of`.
    /// Undated violations are excluded; the window is inclusive of its start.
    pub fn recent_violation_count(&self, as_of: NaiveDate, months: u32) -> usize {
        self.violations
            .iter()
            .filter(|v| v.is_within(as_of, months))
            .count()
    }

    pub fn has_violation_within(&self, as_of: NaiveDate, months: u32) -> bool {
        self.recent_violation_count(as_of, months) > 0
    }

    pub fn has_high_risk_violation(&self) -> bool {
        if let Some(counts) = &self.risk_level_counts {
            if counts.high > 0 {
                return true;
            }
        }
        self.violations
            .iter()
            .any(|v| v.risk_level == Some(RiskLevel::High))
    }

    /// Violation count at a risk level, preferring pre-aggregated counters
    /// over a tally of the violation list.
    pub fn risk_level_count(&self, level: RiskLevel) -> u32 {
        if let Some(counts) = &self.risk_level_counts {
            return counts.get(level);
        }
        self.violations
            .iter()
            .filter(|v| v.risk_level == Some(level))
            .count() as u32
    }
}

/// The four quality dimensions every facility is rated on.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    HealthSafety,
    Structural,
    Process,
    Management,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::HealthSafety,
        Dimension::Structural,
        Dimension::Process,
        Dimension::Management,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Dimension::HealthSafety => "health & safety",
            Dimension::Structural => "structural",
            Dimension::Process => "process",
            Dimension::Management => "management",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw scores for one facility, one value per dimension, each in [0, 10].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawScoreSet {
    pub health_safety: f64,
    pub structural: f64,
    pub process: f64,
    pub management: f64,
}

impl RawScoreSet {
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::HealthSafety => self.health_safety,
            Dimension::Structural => self.structural,
            Dimension::Process => self.process,
            Dimension::Management => self.management,
        }
    }

    pub fn entries(&self) -> [(Dimension, f64); 4] {
        [
            (Dimension::HealthSafety, self.health_safety),
            (Dimension::Structural, self.structural),
            (Dimension::Process, self.process),
            (Dimension::Management, self.management),
        ]
    }
}

/// A star rating on the nine-level half-step scale from 1.0 to 5.0.
///
/// The representation is the band index (0 = 1.0 stars, 8 = 5.0 stars),
/// so equality and ordering are exact. Serialized as the star value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Stars(u8);

impl Stars {
    pub const LEVELS: usize = 9;

    pub const MIN: Stars = Stars(0);
    pub const MAX: Stars = Stars(8);

    /// Band index 0..=8, clamped.
    pub fn from_band_index(index: usize) -> Self {
        Stars(index.min(8) as u8)
    }

    /// Snap an arbitrary value down to the nearest half step, clamped to
    /// the scale. Non-finite input maps to the lowest level.
    pub fn from_value(value: f64) -> Self {
        if !value.is_finite() {
            return Stars::MIN;
        }
        let index = ((value - 1.0) / 0.5).floor();
        if index < 0.0 {
            Stars::MIN
        } else if index > 8.0 {
            Stars::MAX
        } else {
            Stars(index as u8)
        }
    }

    pub fn band_index(&self) -> usize {
        self.0 as usize
    }

    pub fn value(&self) -> f64 {
        1.0 + 0.5 * f64::from(self.0)
    }
}

impl From<f64> for Stars {
    fn from(value: f64) -> Self {
        Stars::from_value(value)
    }
}

impl From<Stars> for f64 {
    fn from(stars: Stars) -> f64 {
        stars.value()
    }
}

impl fmt::Display for Stars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.value())
    }
}

/// How a dimension's stars were derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandingMethod {
    Percentile,
    RawScore,
    ZScore,
}

impl fmt::Display for BandingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BandingMethod::Percentile => "percentile",
            BandingMethod::RawScore => "raw_score",
            BandingMethod::ZScore => "z_score",
        };
        f.write_str(label)
    }
}

/// Published rating for one dimension of one facility.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DimensionRating {
    pub stars: Stars,
    /// Ascending-rank percentile of the raw score within the run's
    /// population, in [0, 1).
    pub percentile: f64,
    pub raw_score: f64,
    /// Confidence interval half-width in star units, in [0, 2].
    pub confidence: f64,
    pub method: BandingMethod,
}

/// How the overall rating was computed, recorded alongside each record so
/// published ratings stay explainable after config changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Methodology {
    pub as_of: NaiveDate,
    /// Primary banding strategy the run was configured with.
    pub banding: BandingMethod,
    pub weights: BTreeMap<Dimension, f64>,
}

/// The published rating for one facility, replaced wholesale on each run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub facility_id: FacilityId,
    pub name: String,
    pub overall: Stars,
    pub overall_confidence: f64,
    pub dimensions: BTreeMap<Dimension, DimensionRating>,
    pub risk_score: Option<f64>,
    pub total_violations: usize,
    pub recent_violations: usize,
    pub years_in_operation: u32,
    pub inspection_count: usize,
    pub methodology: Methodology,
}

/// Round to one decimal place for published star-unit values.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places for percentiles, raw scores, and confidence.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
