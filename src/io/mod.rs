//! Input and output edges of the pipeline.

pub mod sink;
pub mod supplier;

pub use sink::{JsonFileSink, MemorySink, RatingSink};
pub use supplier::load_facilities;

use anyhow::Result;
use std::fs;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}
