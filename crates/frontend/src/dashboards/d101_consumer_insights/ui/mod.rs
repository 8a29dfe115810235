pub mod dashboard;

pub use dashboard::ConsumerInsightsDashboard;
