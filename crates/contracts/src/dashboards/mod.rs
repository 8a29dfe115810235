pub mod common;
pub mod d100_overview;
pub mod d101_consumer_insights;
pub mod d102_sales_heatmap;
pub mod d103_trends;
pub mod d104_detail;
