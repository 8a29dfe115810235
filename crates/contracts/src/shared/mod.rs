pub mod analytics;
pub mod consumer;
pub mod format;
