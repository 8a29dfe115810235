use crate::dashboards::common::{ranked_breakdown, BreakdownRow};
use crate::shared::analytics::{
    compute_intensity, group_by_dimension, overall_stat, ranked_top_n, round_half_up, top_entity,
    Dimension, Intensity, KeyValue, Measure, Metric,
};
use crate::shared::consumer::ConsumerRecord;
use crate::shared::format::{format_inr, format_thousands};
use serde::{Deserialize, Serialize};

/// Regions shown on the overview heat panel
pub const REGIONAL_HEAT_LIMIT: usize = 4;
/// Occasions shown on the overview occasion chart
pub const OCCASION_LIMIT: usize = 6;

/// Headline cards. `None` renders as "N/A".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverviewKpis {
    pub total_consumers: usize,
    pub total_revenue: f64,
    /// Whole rupees
    pub average_spend: Option<i64>,
    /// Brand with the most consumers
    pub popular_brand: Option<KeyValue>,
    /// Region with the most consumers
    pub top_region: Option<KeyValue>,
}

impl OverviewKpis {
    pub fn from_records(records: &[ConsumerRecord]) -> Self {
        let spend = overall_stat(records, Measure::Spend);
        let brands = group_by_dimension(records, Dimension::Brand, Measure::Spend);
        let regions = group_by_dimension(records, Dimension::Region, Measure::Spend);
        Self {
            total_consumers: records.len(),
            total_revenue: spend.sum,
            average_spend: spend.average().map(|a| round_half_up(a, 0) as i64),
            popular_brand: top_entity(&brands, Metric::Count).ok(),
            top_region: top_entity(&regions, Metric::Count).ok(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Rising,
    Insight,
    Alert,
    Prediction,
}

/// One card of the insights panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
}

impl Insight {
    fn new(kind: InsightKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Insight cards derived from the record set. A card whose statistic has no
/// data is left out.
pub fn build_insights(records: &[ConsumerRecord]) -> Vec<Insight> {
    let mut insights = Vec::new();
    let brands = group_by_dimension(records, Dimension::Brand, Measure::Spend);
    let regions = group_by_dimension(records, Dimension::Region, Measure::Spend);
    let moods = group_by_dimension(records, Dimension::Mood, Measure::Spend);
    let spend = overall_stat(records, Measure::Spend);
    let satisfaction = overall_stat(records, Measure::Satisfaction);

    if let Ok(top) = top_entity(&brands, Metric::Count) {
        insights.push(Insight::new(
            InsightKind::Rising,
            format!("{} Leading", top.key),
            format!(
                "{} is the most preferred brand with {} purchases",
                top.key,
                format_thousands(top.value as i64)
            ),
        ));
    }
    if let Some(avg) = spend.average() {
        insights.push(Insight::new(
            InsightKind::Insight,
            "Average Spending",
            format!("Consumers spend an average of {} per purchase", format_inr(avg)),
        ));
    }
    if let Ok(top) = top_entity(&regions, Metric::Count) {
        insights.push(Insight::new(
            InsightKind::Alert,
            "Regional Leader",
            format!(
                "{} has the highest purchase volume with {} transactions",
                top.key,
                format_thousands(top.value as i64)
            ),
        ));
    }
    if let Ok(top) = top_entity(&moods, Metric::Count) {
        insights.push(Insight::new(
            InsightKind::Prediction,
            "Consumer Mood",
            format!(
                "Most purchases made when feeling {} ({} purchases)",
                top.key,
                format_thousands(top.value as i64)
            ),
        ));
    }
    if let Some(avg) = satisfaction.measured_average() {
        insights.push(Insight::new(
            InsightKind::Rising,
            "Satisfaction Score",
            format!("Average customer satisfaction: {:.1}/5", round_half_up(avg, 1)),
        ));
    }
    insights
}

/// Region cell of the overview heat panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionHeat {
    pub region: String,
    pub sales: f64,
    pub consumers: u64,
    pub intensity: Intensity,
}

/// Top regions by total spend, each with its intensity against the leader.
pub fn regional_heat(records: &[ConsumerRecord], limit: usize) -> Vec<RegionHeat> {
    let regions = group_by_dimension(records, Dimension::Region, Measure::Spend);
    let top = ranked_top_n(&regions, limit, Metric::Sum);
    let values: Vec<(&str, f64)> = top.iter().map(|kv| (kv.key.as_str(), kv.value)).collect();
    let map = compute_intensity(&values);

    map.entries
        .into_iter()
        .map(|intensity| RegionHeat {
            region: intensity.entity.clone(),
            sales: intensity.value,
            consumers: regions.get(&intensity.entity).map(|s| s.count).unwrap_or(0),
            intensity,
        })
        .collect()
}

/// Everything the overview page renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverviewResponse {
    pub kpis: OverviewKpis,
    pub insights: Vec<Insight>,
    /// Brands by consumer count, descending
    pub brand_shares: Vec<BreakdownRow>,
    /// Brands by total spend, descending
    pub brand_sales: Vec<BreakdownRow>,
    /// Regions by total spend, descending
    pub regional_spending: Vec<BreakdownRow>,
    pub regional_heat: Vec<RegionHeat>,
    /// Most frequent occasions
    pub occasions: Vec<BreakdownRow>,
    /// Dark / Milk / Premium spend
    pub families: Vec<BreakdownRow>,
}

impl OverviewResponse {
    pub fn from_records(records: &[ConsumerRecord]) -> Self {
        let total = records.len();
        let brands = group_by_dimension(records, Dimension::Brand, Measure::Spend);
        let regions = group_by_dimension(records, Dimension::Region, Measure::Spend);
        let occasions = group_by_dimension(records, Dimension::Occasion, Measure::Spend);
        let families = group_by_dimension(records, Dimension::BrandFamily, Measure::Spend);

        let mut occasions = ranked_breakdown(&occasions, total, Metric::Count);
        occasions.truncate(OCCASION_LIMIT);

        Self {
            kpis: OverviewKpis::from_records(records),
            insights: build_insights(records),
            brand_shares: ranked_breakdown(&brands, total, Metric::Count),
            brand_sales: ranked_breakdown(&brands, total, Metric::Sum),
            regional_spending: ranked_breakdown(&regions, total, Metric::Sum),
            regional_heat: regional_heat(records, REGIONAL_HEAT_LIMIT),
            occasions,
            families: ranked_breakdown(&families, total, Metric::Sum),
        }
    }
}
