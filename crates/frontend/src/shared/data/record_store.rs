//! One-shot, memoized access to the consumer dataset.
//!
//! The first call to [`RecordStore::records`] fetches and parses the dataset;
//! every later call returns the same snapshot without touching the source.
//! A failed load is terminal for the session: the snapshot stays empty and
//! the error is kept next to it so views can say why.

use async_trait::async_trait;
use contracts::shared::analytics::DataLoadError;
use contracts::shared::consumer::{parse_records, ConsumerRecord};
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Where the raw dataset body comes from.
#[async_trait(?Send)]
pub trait RecordSource {
    async fn fetch(&self) -> Result<String, DataLoadError>;

    /// Human readable origin, for log lines.
    fn describe(&self) -> String;
}

/// Snapshot handed to the views. Cloning is cheap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedRecords {
    pub records: Arc<[ConsumerRecord]>,
    pub error: Option<DataLoadError>,
    /// Array items that were not objects
    pub skipped: usize,
}

impl LoadedRecords {
    fn failed(error: DataLoadError) -> Self {
        Self {
            records: Arc::from(Vec::new()),
            error: Some(error),
            skipped: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub struct RecordStore<S> {
    source: S,
    cell: OnceCell<LoadedRecords>,
}

impl<S: RecordSource> RecordStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cell: OnceCell::new(),
        }
    }

    /// The loaded snapshot, fetching it on first use.
    pub async fn records(&self) -> LoadedRecords {
        if let Some(loaded) = self.cached() {
            return loaded;
        }

        let loaded = self.load().await;
        // A concurrent first load may have won the race; keep its result
        match self.cell.try_insert(loaded) {
            Ok(stored) => stored.clone(),
            Err((stored, _)) => stored.clone(),
        }
    }

    /// Snapshot if the load already finished.
    pub fn cached(&self) -> Option<LoadedRecords> {
        self.cell.get().cloned()
    }

    async fn load(&self) -> LoadedRecords {
        let origin = self.source.describe();
        let body = match self.source.fetch().await {
            Ok(body) => body,
            Err(e) => {
                log::error!("Failed to load consumer data from {}: {}", origin, e);
                return LoadedRecords::failed(e);
            }
        };

        match parse_records(&body) {
            Ok(parsed) => {
                if parsed.skipped > 0 {
                    log::warn!(
                        "Skipped {} non-object items in consumer data from {}",
                        parsed.skipped,
                        origin
                    );
                }
                log::info!(
                    "Loaded {} consumer records from {}",
                    parsed.records.len(),
                    origin
                );
                LoadedRecords {
                    records: Arc::from(parsed.records),
                    error: None,
                    skipped: parsed.skipped,
                }
            }
            Err(e) => {
                log::error!("Failed to parse consumer data from {}: {}", origin, e);
                LoadedRecords::failed(e)
            }
        }
    }
}
