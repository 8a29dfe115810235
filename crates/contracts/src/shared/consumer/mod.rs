pub mod parse;
pub mod record;

pub use parse::{parse_records, ParsedRecords};
pub use record::ConsumerRecord;
