pub mod d100_overview;
pub mod d101_consumer_insights;
pub mod d102_sales_heatmap;
pub mod d103_trends;
pub mod d104_detail;

pub use d100_overview::ui::OverviewDashboard;
pub use d101_consumer_insights::ui::ConsumerInsightsDashboard;
pub use d102_sales_heatmap::ui::SalesHeatmapDashboard;
pub use d103_trends::ui::TrendsDashboard;
pub use d104_detail::ui::DetailDashboard;
