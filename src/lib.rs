// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod progress;
pub mod rating;
pub mod scoring;
pub mod stats;

// Re-export commonly used types
pub use crate::core::{
    BandingMethod, Dimension, DimensionRating, Facility, FacilityId, Inspection, Methodology,
    OperatingStatus, RatingRecord, RawScoreSet, RiskLevel, Stars, Violation, ViolationCategory,
};

pub use crate::config::RatingConfig;

pub use crate::core::errors::{Error, Result};

pub use crate::io::{JsonFileSink, MemorySink, RatingSink};

pub use crate::pipeline::{RatingEngine, RunOutcome, RunSummary, StageTimings};

pub use crate::stats::{PopulationSnapshot, PopulationStats};
