pub mod http_source;
pub mod record_store;

pub use http_source::HttpRecordSource;
pub use record_store::{LoadedRecords, RecordSource, RecordStore};
