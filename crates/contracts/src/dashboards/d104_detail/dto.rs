use crate::dashboards::common::{breakdown, ranked_breakdown, BreakdownRow};
use crate::shared::analytics::{
    group_by_dimension, overall_stat, round_half_up, Dimension, Measure, Metric, RecordFilter,
};
use crate::shared::consumer::ConsumerRecord;
use serde::{Deserialize, Serialize};

/// Drill-down request: which subset to analyse and how to title it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailRequest {
    pub title: String,
    pub description: String,
    pub filter: RecordFilter,
}

/// Analytics of the records selected by a [`RecordFilter`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailResponse {
    pub filter: RecordFilter,
    pub total_revenue: f64,
    pub total_consumers: usize,
    pub average_spend: Option<i64>,
    pub regions: Vec<BreakdownRow>,
    /// Age brackets in bracket order
    pub age_groups: Vec<BreakdownRow>,
    pub genders: Vec<BreakdownRow>,
    pub channels: Vec<BreakdownRow>,
    /// Brands by revenue, descending
    pub brands: Vec<BreakdownRow>,
}

impl DetailResponse {
    pub fn from_records(records: &[ConsumerRecord], filter: &RecordFilter) -> Self {
        let selected = filter.apply(records);
        let total = selected.len();
        let table = |dimension: Dimension| {
            group_by_dimension(&selected, dimension, Measure::Spend)
        };
        let spend = overall_stat(&selected, Measure::Spend);

        Self {
            filter: filter.clone(),
            total_revenue: spend.sum,
            total_consumers: total,
            average_spend: spend.average().map(|a| round_half_up(a, 0) as i64),
            regions: breakdown(&table(Dimension::Region), total),
            age_groups: breakdown(&table(Dimension::AgeBracket), total),
            genders: breakdown(&table(Dimension::Gender), total),
            channels: breakdown(&table(Dimension::Channel), total),
            brands: ranked_breakdown(&table(Dimension::Brand), total, Metric::Sum),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_consumers == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shopper(brand: &str, region: &str, gender: &str, spend: f64) -> ConsumerRecord {
        ConsumerRecord {
            brand_preference: Some(brand.to_string()),
            gender: Some(gender.to_string()),
            age: Some(30),
            ..ConsumerRecord::with_region_spend(region, spend)
        }
    }

    fn sample() -> Vec<ConsumerRecord> {
        vec![
            shopper("KitKat", "North", "Male", 100.0),
            shopper("Amul Dark", "North", "Female", 300.0),
            shopper("KitKat", "South", "Female", 200.0),
        ]
    }

    #[test]
    fn test_brand_drilldown() {
        let detail = DetailResponse::from_records(&sample(), &RecordFilter::brand("KitKat"));
        assert_eq!(detail.total_consumers, 2);
        assert_eq!(detail.total_revenue, 300.0);
        assert_eq!(detail.average_spend, Some(150));
        let regions: Vec<_> = detail
            .regions
            .iter()
            .map(|r| (r.key.as_str(), r.total_spend))
            .collect();
        assert_eq!(regions, vec![("North", 100.0), ("South", 200.0)]);
        assert_eq!(detail.age_groups[0].key, "21-30");
        assert_eq!(detail.age_groups[0].consumers, 2);
    }

    #[test]
    fn test_region_drilldown_brands_by_revenue() {
        let detail = DetailResponse::from_records(&sample(), &RecordFilter::region("North"));
        let brands: Vec<_> = detail.brands.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(brands, vec!["Amul Dark", "KitKat"]);
        assert_eq!(detail.genders.len(), 2);
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let detail = DetailResponse::from_records(&sample(), &RecordFilter::default());
        assert_eq!(detail.total_consumers, 3);
    }

    #[test]
    fn test_no_match() {
        let detail = DetailResponse::from_records(&sample(), &RecordFilter::brand("Toblerone"));
        assert!(detail.is_empty());
        assert_eq!(detail.average_spend, None);
        assert!(detail.brands.is_empty());
    }
}
