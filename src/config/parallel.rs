//! Parallelism configuration for batch rating runs.
//!
//! Both pipeline stages fan facilities out across rayon's thread pool;
//! this module controls whether they do and in what chunk sizes.

use serde::{Deserialize, Serialize};

/// Default value for parallel processing enabled
fn default_enabled() -> bool {
    true
}

/// Default batch size for chunked processing
fn default_batch_size() -> usize {
    256
}

/// Configuration for parallel processing of rating stages.
///
/// When enabled, facilities are scored and classified concurrently
/// using rayon's thread pool. Population statistics are always built
/// sequentially between the two stages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParallelConfig {
    /// Enable parallel processing (default: true)
    ///
    /// When disabled, facilities are processed sequentially.
    /// Useful for debugging or when running in constrained environments.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Maximum concurrent facility computations (default: num_cpus)
    ///
    /// If None, uses all available CPU cores.
    #[serde(default)]
    pub max_concurrency: Option<usize>,

    /// Batch size for chunked processing (default: 256)
    ///
    /// Large populations are processed in batches to bound memory and
    /// enable progress reporting.
    #[serde(default = "default_batch_size_option")]
    pub batch_size: Option<usize>,
}

fn default_batch_size_option() -> Option<usize> {
    Some(default_batch_size())
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_concurrency: None,
            batch_size: Some(default_batch_size()),
        }
    }
}

impl ParallelConfig {
    /// Create a new parallel config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with parallel processing disabled.
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Get the effective concurrency level.
    ///
    /// Returns the configured max_concurrency, or the number of
    /// available CPU cores if not specified.
    pub fn effective_concurrency(&self) -> usize {
        self.max_concurrency.unwrap_or_else(num_cpus)
    }

    /// Get the effective batch size.
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.unwrap_or(default_batch_size())
    }
}

/// Returns the number of available CPU cores.
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1)
}
