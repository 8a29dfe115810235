//! Grouping and reduction primitives shared by every dashboard.
//!
//! All functions are pure: they read the record snapshot and return freshly
//! built tables. Nothing is cached between calls.

use super::bucketing::AgeBracket;
use super::dimension::{Dimension, Measure, Metric};
use super::error::AnalyticsError;
use super::stat_table::{KeyValue, Stat, StatTable};
use crate::shared::consumer::ConsumerRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Partition `records` by `key_fn`, accumulating `measure` into each group.
/// Records for which `key_fn` returns `None` are left out.
pub fn group_by<F>(records: &[ConsumerRecord], key_fn: F, measure: Measure) -> StatTable
where
    F: Fn(&ConsumerRecord) -> Option<String>,
{
    let mut table = StatTable::new();
    for record in records {
        if let Some(key) = key_fn(record) {
            table.accumulate(key, measure.value(record));
        }
    }
    table
}

/// [`group_by`] on a record dimension. Age brackets come back in bracket
/// order rather than first-seen order.
pub fn group_by_dimension(
    records: &[ConsumerRecord],
    dimension: Dimension,
    measure: Measure,
) -> StatTable {
    let table = group_by(records, |r| dimension.key(r), measure);
    match dimension {
        Dimension::AgeBracket => {
            let order: Vec<&str> = AgeBracket::ALL.iter().map(|b| b.label()).collect();
            table.reordered(order.as_slice())
        }
        _ => table,
    }
}

/// `measure` over the whole record set, ungrouped.
pub fn overall_stat(records: &[ConsumerRecord], measure: Measure) -> Stat {
    let mut stat = Stat::default();
    for record in records {
        stat.record(measure.value(record));
    }
    stat
}

/// Key with the largest `metric`. Ties go to the key seen first.
pub fn top_entity(table: &StatTable, metric: Metric) -> Result<KeyValue, AnalyticsError> {
    let mut best: Option<(&str, f64)> = None;
    for row in table.iter() {
        let value = row.stat.metric(metric);
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((row.key.as_str(), value)),
        }
    }
    best.map(|(key, value)| KeyValue::new(key, value))
        .ok_or(AnalyticsError::NoData("stat table"))
}

/// Share of `total_records` per key, in percent, one decimal, half-up.
pub fn percentage_share(table: &StatTable, total_records: usize) -> Vec<KeyValue> {
    if total_records == 0 {
        return Vec::new();
    }
    table
        .iter()
        .map(|row| {
            let percent = row.stat.count as f64 * 100.0 / total_records as f64;
            KeyValue::new(row.key.clone(), round_half_up(percent, 1))
        })
        .collect()
}

/// Average measure per key (`sum / count`), unrounded. A keyed record
/// without a measure value still counts towards its key.
pub fn average_per_key(table: &StatTable) -> Vec<KeyValue> {
    table
        .iter()
        .filter_map(|row| row.stat.average().map(|avg| KeyValue::new(row.key.clone(), avg)))
        .collect()
}

/// Average per key rounded to whole rupees for display.
pub fn rounded_average_per_key(table: &StatTable) -> Vec<(String, i64)> {
    average_per_key(table)
        .into_iter()
        .map(|kv| (kv.key, round_half_up(kv.value, 0) as i64))
        .collect()
}

/// Top `n` keys by `metric`, descending. Equal values keep table order.
pub fn ranked_top_n(table: &StatTable, n: usize, metric: Metric) -> Vec<KeyValue> {
    let mut ranked: Vec<KeyValue> = table
        .iter()
        .map(|row| KeyValue::new(row.key.clone(), row.stat.metric(metric)))
        .collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.value.total_cmp(&a.value));
    ranked.truncate(n);
    ranked
}

/// Round half-up (towards +inf) to `decimals` places.
pub fn round_half_up(value: f64, decimals: u32) -> f64 {
    let scaled = value * 10f64.powi(decimals as i32);
    // A few ulps of the scaled value absorb representation error on inputs
    // like 2.675; fractions further than that below .5 still round down.
    let nudge = scaled.abs() * f64::EPSILON * 4.0;
    (scaled + 0.5 + nudge).floor() / 10f64.powi(decimals as i32)
}

// ---------------------------------------------------------------------------
// Cross tabulation
// ---------------------------------------------------------------------------

/// Two-level grouping: one `Stat` per (row key, column key) pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrossTable {
    pub row_keys: Vec<String>,
    pub column_keys: Vec<String>,
    cells: HashMap<(String, String), Stat>,
}

impl CrossTable {
    /// Stat of one cell; an empty `Stat` when no record fell into it.
    pub fn cell(&self, row: &str, column: &str) -> Stat {
        self.cells
            .get(&(row.to_string(), column.to_string()))
            .copied()
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Group by two dimensions at once. Row and column keys keep first-seen
/// order; a record missing either key is left out.
pub fn cross_tab(
    records: &[ConsumerRecord],
    row_dimension: Dimension,
    column_dimension: Dimension,
    measure: Measure,
) -> CrossTable {
    let mut rows = StatTable::new();
    let mut columns = StatTable::new();
    let mut cells: HashMap<(String, String), Stat> = HashMap::new();

    for record in records {
        let (Some(row), Some(column)) = (row_dimension.key(record), column_dimension.key(record))
        else {
            continue;
        };
        let value = measure.value(record);
        rows.accumulate(row.clone(), value);
        columns.accumulate(column.clone(), value);
        cells.entry((row, column)).or_default().record(value);
    }

    CrossTable {
        row_keys: rows.keys().map(str::to_string).collect(),
        column_keys: columns.keys().map(str::to_string).collect(),
        cells,
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Narrow the record set for a drill-down view. Empty filter keeps all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl RecordFilter {
    pub fn brand(brand: impl Into<String>) -> Self {
        Self {
            brand: Some(brand.into()),
            region: None,
        }
    }

    pub fn region(region: impl Into<String>) -> Self {
        Self {
            brand: None,
            region: Some(region.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.brand.is_none() && self.region.is_none()
    }

    pub fn matches(&self, record: &ConsumerRecord) -> bool {
        let brand_ok = match &self.brand {
            Some(b) => record.brand_preference.as_deref() == Some(b.as_str()),
            None => true,
        };
        let region_ok = match &self.region {
            Some(r) => record.region.as_deref() == Some(r.as_str()),
            None => true,
        };
        brand_ok && region_ok
    }

    pub fn apply(&self, records: &[ConsumerRecord]) -> Vec<ConsumerRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region_records() -> Vec<ConsumerRecord> {
        vec![
            ConsumerRecord::with_region_spend("North", 100.0),
            ConsumerRecord::with_region_spend("North", 300.0),
            ConsumerRecord::with_region_spend("South", 200.0),
        ]
    }

    fn brand_record(brand: &str, region: &str, spend: f64) -> ConsumerRecord {
        ConsumerRecord {
            brand_preference: Some(brand.to_string()),
            region: Some(region.to_string()),
            average_spend_inr: Some(spend),
            ..Default::default()
        }
    }

    #[test]
    fn test_region_scenario() {
        let records = region_records();
        let table = group_by_dimension(&records, Dimension::Region, Measure::Spend);

        let north = table.get("North").unwrap();
        assert_eq!((north.count, north.sum), (2, 400.0));
        let south = table.get("South").unwrap();
        assert_eq!((south.count, south.sum), (1, 200.0));

        assert_eq!(
            top_entity(&table, Metric::Count).unwrap(),
            KeyValue::new("North", 2.0)
        );
        assert_eq!(
            rounded_average_per_key(&table),
            vec![("North".to_string(), 200), ("South".to_string(), 200)]
        );
    }

    #[test]
    fn test_counts_cover_keyed_records() {
        let mut records = region_records();
        records.push(ConsumerRecord::default());
        records.push(ConsumerRecord {
            average_spend_inr: Some(50.0),
            ..Default::default()
        });

        let table = group_by_dimension(&records, Dimension::Region, Measure::Spend);
        let keyed = records.iter().filter(|r| r.region.is_some()).count() as u64;
        assert_eq!(table.total_count(), keyed);
        assert_eq!(table.total_count(), 3);
    }

    #[test]
    fn test_empty_records_give_empty_tables() {
        let records: Vec<ConsumerRecord> = Vec::new();
        for dimension in [
            Dimension::Gender,
            Dimension::Region,
            Dimension::Brand,
            Dimension::AgeBracket,
            Dimension::BrandFamily,
            Dimension::Mood,
        ] {
            assert!(group_by_dimension(&records, dimension, Measure::Spend).is_empty());
        }
        let table = StatTable::new();
        assert_eq!(
            top_entity(&table, Metric::Count),
            Err(AnalyticsError::NoData("stat table"))
        );
        assert!(percentage_share(&table, 0).is_empty());
        assert!(ranked_top_n(&table, 5, Metric::Sum).is_empty());
        assert!(cross_tab(&records, Dimension::Brand, Dimension::Region, Measure::Spend).is_empty());
    }

    #[test]
    fn test_top_entity_tie_goes_to_first_key() {
        let records = vec![
            brand_record("Galaxy", "East", 10.0),
            brand_record("Amul", "East", 10.0),
            brand_record("Amul", "West", 10.0),
            brand_record("Galaxy", "West", 10.0),
        ];
        let table = group_by_dimension(&records, Dimension::Brand, Measure::Spend);
        assert_eq!(top_entity(&table, Metric::Count).unwrap().key, "Galaxy");
        assert_eq!(top_entity(&table, Metric::Sum).unwrap().key, "Galaxy");
    }

    #[test]
    fn test_percentage_share() {
        let mut records = Vec::new();
        for region in ["A", "A", "B", "C", "C", "C"] {
            records.push(ConsumerRecord::with_region_spend(region, 1.0));
        }
        let table = group_by_dimension(&records, Dimension::Region, Measure::Spend);
        let share = percentage_share(&table, records.len());
        assert_eq!(
            share,
            vec![
                KeyValue::new("A", 33.3),
                KeyValue::new("B", 16.7),
                KeyValue::new("C", 50.0),
            ]
        );
    }

    #[test]
    fn test_percentage_share_sums_to_hundred() {
        let mut records = Vec::new();
        for i in 0..97 {
            let region = format!("R{}", i % 7);
            records.push(ConsumerRecord::with_region_spend(&region, 1.0));
        }
        let table = group_by_dimension(&records, Dimension::Region, Measure::Spend);
        let share = percentage_share(&table, records.len());
        let total: f64 = share.iter().map(|kv| kv.value).sum();
        assert!((total - 100.0).abs() <= 0.1 * share.len() as f64, "total {total}");
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(14.5, 0), 15.0);
        assert_eq!(round_half_up(14.49, 0), 14.0);
        assert_eq!(round_half_up(12.25, 1), 12.3);
        assert_eq!(round_half_up(1.45, 1), 1.5);
        assert_eq!(round_half_up(0.0, 1), 0.0);
        assert_eq!(round_half_up(-2.5, 0), -2.0);
        assert_eq!(round_half_up(2.675, 2), 2.68);
    }

    #[test]
    fn test_round_half_up_just_below_half() {
        assert_eq!(round_half_up(0.4999999999, 0), 0.0);
        assert_eq!(round_half_up(0.0499999999, 1), 0.0);
        assert_eq!(round_half_up(1_000_000.4999, 0), 1_000_000.0);
        assert_eq!(round_half_up(1_000_000.5, 0), 1_000_001.0);
    }

    #[test]
    fn test_average_per_key_unrounded() {
        let records = vec![
            ConsumerRecord::with_region_spend("North", 100.0),
            ConsumerRecord::with_region_spend("North", 101.0),
        ];
        let table = group_by_dimension(&records, Dimension::Region, Measure::Spend);
        assert_eq!(average_per_key(&table), vec![KeyValue::new("North", 100.5)]);
        assert_eq!(rounded_average_per_key(&table), vec![("North".to_string(), 101)]);
    }

    #[test]
    fn test_average_counts_keyed_records_without_spend() {
        let records = vec![
            ConsumerRecord::with_region_spend("North", 100.0),
            ConsumerRecord {
                region: Some("North".to_string()),
                ..Default::default()
            },
        ];
        let table = group_by_dimension(&records, Dimension::Region, Measure::Spend);
        let north = table.get("North").unwrap();
        assert_eq!((north.count, north.sum), (2, 100.0));
        assert_eq!(average_per_key(&table), vec![KeyValue::new("North", 50.0)]);
        assert_eq!(rounded_average_per_key(&table), vec![("North".to_string(), 50)]);
    }

    #[test]
    fn test_ranked_top_n_is_stable() {
        let records = vec![
            brand_record("Kinder", "N", 50.0),
            brand_record("Galaxy", "N", 100.0),
            brand_record("Amul", "N", 50.0),
            brand_record("Bournville", "N", 100.0),
            brand_record("Munch", "N", 10.0),
        ];
        let table = group_by_dimension(&records, Dimension::Brand, Measure::Spend);
        let ranked = ranked_top_n(&table, 4, Metric::Sum);
        let keys: Vec<_> = ranked.iter().map(|kv| kv.key.as_str()).collect();
        assert_eq!(keys, vec!["Galaxy", "Bournville", "Kinder", "Amul"]);

        let by_count = ranked_top_n(&table, 10, Metric::Count);
        let keys: Vec<_> = by_count.iter().map(|kv| kv.key.as_str()).collect();
        assert_eq!(keys, vec!["Kinder", "Galaxy", "Amul", "Bournville", "Munch"]);
    }

    #[test]
    fn test_age_brackets_in_bracket_order() {
        let ages = [65, 15, 34, 15, 8];
        let records: Vec<_> = ages
            .iter()
            .map(|a| ConsumerRecord {
                age: Some(*a),
                average_spend_inr: Some(100.0),
                ..Default::default()
            })
            .collect();
        let table = group_by_dimension(&records, Dimension::AgeBracket, Measure::Spend);
        let keys: Vec<_> = table.keys().collect();
        assert_eq!(keys, vec!["13-20", "31-40", "60+"]);
        assert_eq!(table.get("13-20").unwrap().count, 2);
        // age 8 has no bracket
        assert_eq!(table.total_count(), 4);
    }

    #[test]
    fn test_family_totals_exclude_unclassified() {
        let records = vec![
            brand_record("Amul Dark", "N", 100.0),
            brand_record("Dairy Milk", "N", 50.0),
            brand_record("Snickers", "N", 999.0),
        ];
        let table = group_by_dimension(&records, Dimension::BrandFamily, Measure::Spend);
        assert_eq!(table.len(), 2);
        assert_eq!(table.total_sum(), 150.0);
        assert!(table.get("Unclassified").is_none());
    }

    #[test]
    fn test_cross_tab() {
        let records = vec![
            brand_record("Amul", "North", 100.0),
            brand_record("Amul", "South", 50.0),
            brand_record("Galaxy", "North", 70.0),
            brand_record("Amul", "North", 30.0),
        ];
        let grid = cross_tab(&records, Dimension::Brand, Dimension::Region, Measure::Spend);
        assert_eq!(grid.row_keys, vec!["Amul", "Galaxy"]);
        assert_eq!(grid.column_keys, vec!["North", "South"]);
        assert_eq!(grid.cell("Amul", "North").sum, 130.0);
        assert_eq!(grid.cell("Amul", "North").count, 2);
        assert_eq!(grid.cell("Galaxy", "South"), Stat::default());
    }

    #[test]
    fn test_record_filter() {
        let records = vec![
            brand_record("Amul", "North", 100.0),
            brand_record("Galaxy", "North", 70.0),
            brand_record("Amul", "South", 50.0),
        ];
        assert_eq!(RecordFilter::brand("Amul").apply(&records).len(), 2);
        assert_eq!(RecordFilter::region("North").apply(&records).len(), 2);
        assert_eq!(RecordFilter::default().apply(&records).len(), 3);
        let both = RecordFilter {
            brand: Some("Amul".to_string()),
            region: Some("South".to_string()),
        };
        assert_eq!(both.apply(&records).len(), 1);
    }
}
