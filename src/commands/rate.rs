//! The `rate` command: run one full rating batch over a facility
//! snapshot and upsert the results into a rating store.

use crate::config::{self, ParallelConfig, RatingConfig};
use crate::io::{self, JsonFileSink, RatingSink};
use crate::pipeline::{RatingEngine, RunSummary};
use crate::progress::ProgressConfig;
use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use colored::Colorize;
use std::path::PathBuf;

/// Configuration for the rate command, assembled from CLI arguments.
#[derive(Debug, Clone)]
pub struct RateConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub config: Option<PathBuf>,
    pub as_of: Option<NaiveDate>,
    pub no_parallel: bool,
    pub jobs: usize,
    pub quiet: bool,
}

pub fn rate_facilities(cmd: RateConfig) -> Result<()> {
    let config = build_rating_config(&cmd);
    configure_thread_pool(&config.parallel);

    let as_of = cmd.as_of.unwrap_or_else(|| Utc::now().date_naive());

    let facilities = io::load_facilities(&cmd.input)
        .with_context(|| format!("Failed to load facilities from {}", cmd.input.display()))?;
    if facilities.is_empty() {
        println!("No facilities in {}; nothing to rate.", cmd.input.display());
        return Ok(());
    }

    let sink = JsonFileSink::open(&cmd.output)
        .with_context(|| format!("Failed to open rating store {}", cmd.output.display()))?;

    let engine =
        RatingEngine::new(config, as_of).with_progress(ProgressConfig::from_env(cmd.quiet));
    let outcome = engine.run(&facilities, &sink)?;

    sink.flush()
        .with_context(|| format!("Failed to write rating store {}", cmd.output.display()))?;

    print_run_summary(&outcome.summary, &cmd.output, sink.len(), as_of);

    Ok(())
}

/// Load the rating configuration and apply CLI overrides.
fn build_rating_config(cmd: &RateConfig) -> RatingConfig {
    let mut config = match &cmd.config {
        Some(path) => config::load_config_from_path(path),
        None => config::load_config(),
    };

    if cmd.no_parallel {
        config.parallel.enabled = false;
    }
    if cmd.jobs > 0 {
        config.parallel.max_concurrency = Some(cmd.jobs);
    }

    config
}

/// Configure rayon's global thread pool once at startup.
fn configure_thread_pool(parallel: &ParallelConfig) {
    if !parallel.enabled {
        return;
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(jobs) = parallel.max_concurrency {
        builder = builder.num_threads(jobs);
    }

    if let Err(e) = builder.build_global() {
        // Already configured - this is fine, just ignore
        log::debug!("Thread pool already configured: {}", e);
    }
}

/// Print the end-of-run summary block.
fn print_run_summary(summary: &RunSummary, output: &PathBuf, stored: usize, as_of: NaiveDate) {
    println!();
    println!(
        "{}",
        format!(
            "Rated {} of {} facilities (as of {})",
            summary.scored, summary.total, as_of
        )
        .bright_white()
        .bold()
    );
    if summary.skipped > 0 {
        println!(
            "{}",
            format!("Skipped {} with unusable data", summary.skipped).yellow()
        );
    }

    if !summary.star_distribution.is_empty() {
        println!();
        println!("Star distribution:");
        let widest = summary
            .star_distribution
            .values()
            .copied()
            .max()
            .unwrap_or(1)
            .max(1);
        for (stars, count) in &summary.star_distribution {
            let bar_len = (count * 30).div_ceil(widest);
            println!(
                "  {} {:>6}  {}",
                stars.to_string().bright_yellow(),
                count.to_string().bright_cyan(),
                "█".repeat(bar_len)
            );
        }
    }

    println!();
    println!("Timings:");
    println!("  Scoring:    {:?}", summary.timings.scoring);
    println!("  Statistics: {:?}", summary.timings.statistics);
    println!("  Rating:     {:?}", summary.timings.rating);
    println!("  Total:      {:?}", summary.timings.total);

    println!();
    println!(
        "{} rating records in {}",
        stored,
        output.display().to_string().bright_green()
    );
}
