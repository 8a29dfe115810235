pub mod dashboard;
pub mod insights;

pub use dashboard::OverviewDashboard;
