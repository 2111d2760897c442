//! Facility snapshot loading.
//!
//! The input to a batch run is a JSON array of facility objects, one
//! file per snapshot. Optional fields may be absent; elements that do
//! not deserialize at all are logged and skipped so one malformed
//! facility never blocks a batch.

use std::fs;
use std::path::Path;

use crate::core::errors::{Error, Result};
use crate::core::Facility;

/// Load a facility snapshot from a JSON array file.
pub fn load_facilities(path: &Path) -> Result<Vec<Facility>> {
    let content = fs::read_to_string(path).map_err(|e| Error::Supplier {
        message: format!("failed to read snapshot: {}", e),
        path: Some(path.to_path_buf()),
        source: Some(e),
    })?;
    parse_facilities(&content, path)
}

fn parse_facilities(content: &str, path: &Path) -> Result<Vec<Facility>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(content)
        .map_err(|e| Error::supplier(format!("snapshot is not a JSON array: {}", e), path))?;

    let mut facilities = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<Facility>(value) {
            Ok(facility) => facilities.push(facility),
            Err(e) => {
                log::warn!(
                    "skipping undecodable facility at index {} in {}: {}",
                    index,
                    path.display(),
                    e
                );
            }
        }
    }
    Ok(facilities)
}
