pub mod dashboard;

pub use dashboard::SalesHeatmapDashboard;
