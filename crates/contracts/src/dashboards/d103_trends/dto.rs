use crate::dashboards::common::{breakdown, ranked_breakdown, BreakdownRow};
use crate::shared::analytics::{
    group_by_dimension, overall_stat, round_half_up, top_entity, Dimension, Measure, Metric,
};
use crate::shared::consumer::ConsumerRecord;
use serde::{Deserialize, Serialize};

/// Brands drawn in the brand trend chart
pub const BRAND_CHART_LIMIT: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendsResponse {
    pub total_revenue: f64,
    pub average_spend: Option<i64>,
    /// Age bracket with the most consumers
    pub top_age_group: Option<String>,
    /// Channel with the largest total spend
    pub top_channel: Option<String>,
    /// Age brackets in bracket order, with average spend
    pub age_trends: Vec<BreakdownRow>,
    /// Brands by total spend, descending
    pub brand_trends: Vec<BreakdownRow>,
    /// Channels by total spend, descending
    pub channel_trends: Vec<BreakdownRow>,
    /// Dark / Milk / Premium spend, unclassified brands excluded
    pub family_totals: Vec<BreakdownRow>,
}

impl TrendsResponse {
    pub fn from_records(records: &[ConsumerRecord]) -> Self {
        let total = records.len();
        let ages = group_by_dimension(records, Dimension::AgeBracket, Measure::Spend);
        let brands = group_by_dimension(records, Dimension::Brand, Measure::Spend);
        let channels = group_by_dimension(records, Dimension::Channel, Measure::Spend);
        let families = group_by_dimension(records, Dimension::BrandFamily, Measure::Spend);
        let spend = overall_stat(records, Measure::Spend);

        Self {
            total_revenue: spend.sum,
            average_spend: spend.average().map(|a| round_half_up(a, 0) as i64),
            top_age_group: top_entity(&ages, Metric::Count).ok().map(|kv| kv.key),
            top_channel: top_entity(&channels, Metric::Sum).ok().map(|kv| kv.key),
            age_trends: breakdown(&ages, total),
            brand_trends: ranked_breakdown(&brands, total, Metric::Sum),
            channel_trends: ranked_breakdown(&channels, total, Metric::Sum),
            family_totals: breakdown(&families, total),
        }
    }

    /// Revenue in thousands with one decimal, as on the revenue card.
    pub fn revenue_thousands(&self) -> f64 {
        round_half_up(self.total_revenue / 1000.0, 1)
    }

    pub fn brand_chart(&self) -> &[BreakdownRow] {
        let end = self.brand_trends.len().min(BRAND_CHART_LIMIT);
        &self.brand_trends[..end]
    }
}
