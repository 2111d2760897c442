//! Rating record sinks.
//!
//! A sink receives finished records during stage two and persists them
//! on flush. Methods take `&self` so worker threads can upsert
//! concurrently; implementations guard their own state.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::errors::{Error, Result};
use crate::core::{FacilityId, RatingRecord};

/// Where finished rating records go.
pub trait RatingSink: Send + Sync {
    /// Insert or replace the record for its facility.
    fn upsert(&self, record: RatingRecord) -> Result<()>;

    /// Persist everything received so far.
    fn flush(&self) -> Result<()>;

    /// Number of records currently held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Description of the sink for logs and error messages.
    fn description(&self) -> String;
}

/// File-backed sink: a pretty-printed JSON array ordered by facility id,
/// rewritten wholesale on flush.
///
/// Opening the sink loads any records already in the file, so a
/// facility absent from the next run keeps its previous record.
#[derive(Debug)]
pub struct JsonFileSink {
    path: PathBuf,
    records: Mutex<BTreeMap<FacilityId, RatingRecord>>,
}

impl JsonFileSink {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = match fs::read_to_string(&path) {
            Ok(content) => {
                let existing: Vec<RatingRecord> =
                    serde_json::from_str(&content).map_err(|e| {
                        Error::Sink(format!(
                            "existing store {} is unreadable: {}",
                            path.display(),
                            e
                        ))
                    })?;
                existing
                    .into_iter()
                    .map(|record| (record.facility_id.clone(), record))
                    .collect()
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(Error::Sink(format!(
                    "failed to open store {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RatingSink for JsonFileSink {
    fn upsert(&self, record: RatingRecord) -> Result<()> {
        self.records
            .lock()
            .insert(record.facility_id.clone(), record);
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        let records: Vec<RatingRecord> = self.records.lock().values().cloned().collect();
        let json = serde_json::to_string_pretty(&records)?;
        fs::write(&self.path, json).map_err(|e| {
            Error::Sink(format!(
                "failed to write store {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(())
    }

    fn len(&self) -> usize {
        self.records.lock().len()
    }

    fn description(&self) -> String {
        format!("json:{}", self.path.display())
    }
}

/// In-memory sink for tests and dry runs.
#[derive(Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<BTreeMap<FacilityId, RatingRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records held, in facility-id order.
    pub fn records(&self) -> Vec<RatingRecord> {
        self.records.lock().values().cloned().collect()
    }

    pub fn get(&self, id: &FacilityId) -> Option<RatingRecord> {
        self.records.lock().get(id).cloned()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl RatingSink for MemorySink {
    fn upsert(&self, record: RatingRecord) -> Result<()> {
        self.records
            .lock()
            .insert(record.facility_id.clone(), record);
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn len(&self) -> usize {
        self.records.lock().len()
    }

    fn description(&self) -> String {
        "memory".to_string()
    }
}
