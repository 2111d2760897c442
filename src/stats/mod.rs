//! Population statistics for one batch run.
//!
//! This is the pipeline's synchronization barrier: percentiles are
//! population-relative ranks, so nothing here can be computed until
//! every facility in the run has a raw score. Once built, a snapshot is
//! frozen and shared read-only with the classification stage.

use crate::core::{Dimension, RawScoreSet};

/// Rank statistics for one dimension across the full population.
#[derive(Debug, Clone)]
pub struct PopulationStats {
    /// Percentile per facility, indexed by the facility's position in
    /// the scored input.
    percentiles: Vec<f64>,
    mean: f64,
    std_dev: f64,
}

impl PopulationStats {
    /// Build rank statistics from raw scores in input order.
    ///
    /// Percentile is the 0-based ascending rank divided by population
    /// size: the lowest score gets 0.0 and the highest (n-1)/n. The
    /// sort is stable, so facilities with identical scores keep their
    /// input order and receive distinct, reproducible percentiles.
    pub fn from_scores(scores: &[f64]) -> Self {
        let n = scores.len();
        if n == 0 {
            return Self {
                percentiles: Vec::new(),
                mean: 0.0,
                std_dev: 0.0,
            };
        }

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| {
            scores[a]
                .partial_cmp(&scores[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut percentiles = vec![0.0; n];
        for (rank, &index) in order.iter().enumerate() {
            percentiles[index] = rank as f64 / n as f64;
        }

        let mean = scores.iter().sum::<f64>() / n as f64;
        // Population variance (divide by N): the run covers the whole
        // population, it is not a sample of one.
        let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n as f64;

        Self {
            percentiles,
            mean,
            std_dev: variance.sqrt(),
        }
    }

    pub fn len(&self) -> usize {
        self.percentiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.percentiles.is_empty()
    }

    /// Percentile of the facility at `index` in the scored input.
    pub fn percentile(&self, index: usize) -> f64 {
        self.percentiles.get(index).copied().unwrap_or(0.0)
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Standard score of a value against this population. A population
    /// with no spread has no meaningful direction, so it yields 0.
    pub fn z_score(&self, value: f64) -> f64 {
        if self.std_dev == 0.0 {
            return 0.0;
        }
        (value - self.mean) / self.std_dev
    }
}

/// Frozen population statistics for all four dimensions.
#[derive(Debug, Clone)]
pub struct PopulationSnapshot {
    health_safety: PopulationStats,
    structural: PopulationStats,
    process: PopulationStats,
    management: PopulationStats,
}

impl PopulationSnapshot {
    /// Build the snapshot from every scored facility, in input order.
    pub fn from_score_sets(score_sets: &[RawScoreSet]) -> Self {
        let collect = |dimension: Dimension| {
            let scores: Vec<f64> = score_sets.iter().map(|s| s.get(dimension)).collect();
            PopulationStats::from_scores(&scores)
        };
        Self {
            health_safety: collect(Dimension::HealthSafety),
            structural: collect(Dimension::Structural),
            process: collect(Dimension::Process),
            management: collect(Dimension::Management),
        }
    }

    pub fn stats(&self, dimension: Dimension) -> &PopulationStats {
        match dimension {
            Dimension::HealthSafety => &self.health_safety,
            Dimension::Structural => &self.structural,
            Dimension::Process => &self.process,
            Dimension::Management => &self.management,
        }
    }

    pub fn percentile(&self, dimension: Dimension, index: usize) -> f64 {
        self.stats(dimension).percentile(index)
    }

    pub fn len(&self) -> usize {
        self.health_safety.len()
    }

    pub fn is_empty(&self) -> bool {
        self.health_safety.is_empty()
    }
}
