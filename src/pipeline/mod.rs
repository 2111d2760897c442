//! The batch rating pipeline.
//!
//! A run has two parallel fan-out stages around a hard barrier:
//!
//! 1. **Scoring**: every facility gets a raw score per dimension,
//!    independently of every other facility. A facility that cannot be
//!    scored is logged and skipped, never fatal.
//! 2. **Barrier**: population statistics are frozen over all stage-one
//!    scores. No record exists before this point, because percentiles
//!    need the whole population.
//! 3. **Rating**: each scored facility is classified, given confidence
//!    intervals, aggregated under ceilings, and upserted into the sink.
//!
//! Given the same input order, config, and as-of date, a rerun produces
//! identical records.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use rayon::prelude::*;

use crate::config::{ParallelConfig, RatingConfig};
use crate::core::errors::Result;
use crate::core::{round2, Dimension, Facility, Methodology, RatingRecord, RawScoreSet, Stars};
use crate::io::RatingSink;
use crate::progress::{ProgressConfig, TEMPLATE_RATING, TEMPLATE_SCORING};
use crate::rating::{aggregator, confidence, rate_dimension};
use crate::scoring::score_facility;
use crate::stats::PopulationSnapshot;

/// Wall-clock timings for the pipeline stages.
#[derive(Debug, Clone, Default)]
pub struct StageTimings {
    pub scoring: Duration,
    pub statistics: Duration,
    pub rating: Duration,
    pub total: Duration,
}

/// Counts and timings for one batch run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Facilities in the input snapshot.
    pub total: usize,
    /// Facilities that made it all the way to a record.
    pub scored: usize,
    /// Facilities dropped by stage-one scoring failures.
    pub skipped: usize,
    /// How many facilities landed on each overall star level.
    pub star_distribution: BTreeMap<Stars, usize>,
    pub timings: StageTimings,
}

/// A finished batch run: records in input order plus the summary.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub records: Vec<RatingRecord>,
    pub summary: RunSummary,
}

/// A facility that survived stage one, with its rank slot in the
/// population.
struct ScoredFacility<'a> {
    rank: usize,
    facility: &'a Facility,
    scores: RawScoreSet,
}

/// Drives one batch end to end.
pub struct RatingEngine {
    config: RatingConfig,
    as_of: NaiveDate,
    progress: ProgressConfig,
}

impl RatingEngine {
    pub fn new(config: RatingConfig, as_of: NaiveDate) -> Self {
        Self {
            config,
            as_of,
            progress: ProgressConfig::hidden(),
        }
    }

    pub fn with_progress(mut self, progress: ProgressConfig) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// Run the full pipeline, upserting every record into `sink`.
    pub fn run<S: RatingSink + ?Sized>(
        &self,
        facilities: &[Facility],
        sink: &S,
    ) -> Result<RunOutcome> {
        let started = Instant::now();
        let mut timings = StageTimings::default();

        let stage_started = Instant::now();
        let scored = self.scoring_stage(facilities);
        timings.scoring = stage_started.elapsed();

        let skipped = facilities.len() - scored.len();
        if skipped > 0 {
            log::warn!("{} of {} facilities skipped", skipped, facilities.len());
        }

        // The barrier: freeze the population before any classification.
        let stage_started = Instant::now();
        let score_sets: Vec<RawScoreSet> = scored.iter().map(|s| s.scores).collect();
        let snapshot = PopulationSnapshot::from_score_sets(&score_sets);
        timings.statistics = stage_started.elapsed();

        let stage_started = Instant::now();
        let records = self.rating_stage(&scored, &snapshot, sink)?;
        timings.rating = stage_started.elapsed();

        timings.total = started.elapsed();

        let mut star_distribution: BTreeMap<Stars, usize> = BTreeMap::new();
        for record in &records {
            *star_distribution.entry(record.overall).or_insert(0) += 1;
        }

        Ok(RunOutcome {
            summary: RunSummary {
                total: facilities.len(),
                scored: records.len(),
                skipped,
                star_distribution,
                timings,
            },
            records,
        })
    }

    fn scoring_stage<'a>(&self, facilities: &'a [Facility]) -> Vec<ScoredFacility<'a>> {
        let bar = self
            .progress
            .bar(facilities.len() as u64, TEMPLATE_SCORING, "Scoring");
        let op = |facility: &'a Facility| {
            let result = match score_facility(facility, &self.config, self.as_of) {
                Ok(scores) => Some((facility, scores)),
                Err(e) => {
                    log::warn!("skipping facility {}: {}", facility.id, e);
                    None
                }
            };
            bar.inc(1);
            result
        };
        let outputs = fan_out(facilities, &self.config.parallel, op);
        bar.finish_and_clear();

        // Rank slots are positions among the scored, in input order;
        // skipped facilities give up their slot entirely.
        outputs
            .into_iter()
            .flatten()
            .enumerate()
            .map(|(rank, (facility, scores))| ScoredFacility {
                rank,
                facility,
                scores,
            })
            .collect()
    }

    fn rating_stage<S: RatingSink + ?Sized>(
        &self,
        scored: &[ScoredFacility<'_>],
        snapshot: &PopulationSnapshot,
        sink: &S,
    ) -> Result<Vec<RatingRecord>> {
        let bar = self
            .progress
            .bar(scored.len() as u64, TEMPLATE_RATING, "Rating");
        let op = |entry: &ScoredFacility<'_>| -> Result<RatingRecord> {
            let record = self.build_record(entry, snapshot);
            sink.upsert(record.clone())?;
            bar.inc(1);
            Ok(record)
        };
        let outputs = fan_out(scored, &self.config.parallel, op);
        bar.finish_and_clear();
        outputs.into_iter().collect()
    }

    fn build_record(&self, entry: &ScoredFacility<'_>, snapshot: &PopulationSnapshot) -> RatingRecord {
        let facility = entry.facility;
        let mut dimensions = BTreeMap::new();
        for dimension in Dimension::ALL {
            let rating = rate_dimension(
                dimension,
                facility,
                entry.scores.get(dimension),
                snapshot.percentile(dimension, entry.rank),
                snapshot.stats(dimension),
                &self.config,
                self.as_of,
            );
            dimensions.insert(dimension, rating);
        }

        let overall = aggregator::overall_rating(facility, &dimensions, &self.config, self.as_of);
        let overall_confidence = round2(confidence::overall_confidence(
            &dimensions,
            &self.config.weights,
            &self.config.confidence,
        ));

        RatingRecord {
            facility_id: facility.id.clone(),
            name: facility.name.clone(),
            overall,
            overall_confidence,
            dimensions,
            risk_score: facility.risk_score,
            total_violations: facility.violation_count(),
            recent_violations: facility
                .recent_violation_count(self.as_of, self.config.ceilings.recent_window_months),
            years_in_operation: facility.years_in_operation(self.as_of),
            inspection_count: facility.inspection_count(),
            methodology: Methodology {
                as_of: self.as_of,
                banding: self.config.thresholds.banding.method(),
                weights: self.config.weights.as_map(),
            },
        }
    }
}

/// Fan an operation out over items, preserving input order.
///
/// Sequential for disabled or trivial inputs, a single parallel pass
/// when everything fits one batch, and chunked parallel passes for
/// large populations.
fn fan_out<'a, I, T, F>(items: &'a [I], config: &ParallelConfig, op: F) -> Vec<T>
where
    I: Sync,
    T: Send,
    F: Fn(&'a I) -> T + Sync + Send,
{
    if !config.enabled || items.len() <= 1 {
        items.iter().map(&op).collect()
    } else {
        let batch_size = config.effective_batch_size();

        if items.len() <= batch_size {
            items.par_iter().map(&op).collect()
        } else {
            items
                .chunks(batch_size)
                .flat_map(|chunk| chunk.par_iter().map(&op).collect::<Vec<_>>())
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemorySink;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn facility(id: &str, risk_score: f64) -> Facility {
        Facility {
            id: id.into(),
            name: format!("Facility {}", id),
            capacity: Some(40),
            ages_served: String::new(),
            hours: String::new(),
            program_services: String::new(),
            permit_condition: false,
            status: Default::default(),
            license_issued: NaiveDate::from_ymd_opt(2019, 1, 1),
            risk_score: Some(risk_score),
            risk_level_counts: None,
            violations: Vec::new(),
            inspections: Vec::new(),
        }
    }

    fn population() -> Vec<Facility> {
        (0..9)
            .map(|i| facility(&format!("F-{}", i), 85.0 - 10.0 * i as f64))
            .collect()
    }

    #[test]
    fn rerun_produces_identical_records() {
        let engine = RatingEngine::new(RatingConfig::default(), as_of());
        let facilities = population();

        let sink = MemorySink::new();
        let first = engine.run(&facilities, &sink).unwrap();
        let second = engine.run(&facilities, &sink).unwrap();

        assert_eq!(first.records, second.records);
        assert_eq!(
            serde_json::to_string(&first.records).unwrap(),
            serde_json::to_string(&second.records).unwrap()
        );
    }

    #[test]
    fn parallel_and_sequential_runs_agree() {
        let facilities = population();
        let as_of = as_of();

        let sequential = {
            let mut config = RatingConfig::default();
            config.parallel = ParallelConfig::sequential();
            RatingEngine::new(config, as_of)
                .run(&facilities, &MemorySink::new())
                .unwrap()
        };
        let parallel = {
            let mut config = RatingConfig::default();
            config.parallel.batch_size = Some(3); // force the chunked path
            RatingEngine::new(config, as_of)
                .run(&facilities, &MemorySink::new())
                .unwrap()
        };

        assert_eq!(sequential.records, parallel.records);
    }

    #[test]
    fn unscorable_facility_is_skipped_not_fatal() {
        let engine = RatingEngine::new(RatingConfig::default(), as_of());
        let mut facilities = population();
        facilities[4].risk_score = Some(f64::NAN);

        let sink = MemorySink::new();
        let outcome = engine.run(&facilities, &sink).unwrap();

        assert_eq!(outcome.summary.total, 9);
        assert_eq!(outcome.summary.scored, 8);
        assert_eq!(outcome.summary.skipped, 1);
        assert_eq!(sink.len(), 8);
        assert!(sink.get(&"F-4".into()).is_none());
    }

    #[test]
    fn percentiles_span_the_whole_population() {
        let engine = RatingEngine::new(RatingConfig::default(), as_of());
        let facilities = population();

        let sink = MemorySink::new();
        let outcome = engine.run(&facilities, &sink).unwrap();

        // Nine distinct health & safety raw scores spread evenly over
        // the nine bands: riskiest lands on 1.0, safest on 5.0.
        let stars_of = |id: &str| {
            outcome
                .records
                .iter()
                .find(|r| r.facility_id.as_str() == id)
                .unwrap()
                .dimensions[&Dimension::HealthSafety]
                .stars
                .value()
        };
        assert_eq!(stars_of("F-0"), 1.0);
        assert_eq!(stars_of("F-8"), 5.0);
    }

    #[test]
    fn star_distribution_accounts_for_every_record() {
        let engine = RatingEngine::new(RatingConfig::default(), as_of());
        let facilities = population();

        let outcome = engine.run(&facilities, &MemorySink::new()).unwrap();
        let counted: usize = outcome.summary.star_distribution.values().sum();
        assert_eq!(counted, outcome.summary.scored);
    }

    #[test]
    fn empty_snapshot_runs_clean() {
        let engine = RatingEngine::new(RatingConfig::default(), as_of());
        let outcome = engine.run(&[], &MemorySink::new()).unwrap();
        assert_eq!(outcome.summary.total, 0);
        assert!(outcome.records.is_empty());
    }
}
