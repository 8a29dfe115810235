use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The dataset file could not be fetched or read.
///
/// Recovered by the record store as an empty snapshot; views render a
/// "no data" state instead of propagating it.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum DataLoadError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error: {status}")]
    Http { status: u16 },

    #[error("Failed to parse dataset: {0}")]
    Parse(String),

    #[error("Dataset is not a JSON array")]
    NotAnArray,
}

/// Contract violations of the aggregation layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    /// An operation that needs at least one key was called on an empty table.
    #[error("No data: {0} is empty")]
    NoData(&'static str),
}
