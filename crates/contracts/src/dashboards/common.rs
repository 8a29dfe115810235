use crate::shared::analytics::{percentage_share, ranked_top_n, round_half_up, Metric, StatTable};
use serde::{Deserialize, Serialize};

/// One line of a breakdown table (chart bar / pie slice).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownRow {
    pub key: String,
    pub consumers: u64,
    /// Share of all records, one decimal
    pub share_percent: f64,
    pub total_spend: f64,
    /// Whole rupees, `total_spend / consumers`
    pub average_spend: Option<i64>,
}

/// Breakdown rows in table order.
pub fn breakdown(table: &StatTable, total_records: usize) -> Vec<BreakdownRow> {
    let shares = percentage_share(table, total_records);
    table
        .iter()
        .enumerate()
        .map(|(i, row)| BreakdownRow {
            key: row.key.clone(),
            consumers: row.stat.count,
            share_percent: shares.get(i).map(|s| s.value).unwrap_or(0.0),
            total_spend: row.stat.sum,
            average_spend: row.stat.average().map(|a| round_half_up(a, 0) as i64),
        })
        .collect()
}

/// Breakdown rows sorted descending by `metric`; ties keep table order.
pub fn ranked_breakdown(table: &StatTable, total_records: usize, metric: Metric) -> Vec<BreakdownRow> {
    let order: Vec<String> = ranked_top_n(table, table.len(), metric)
        .into_iter()
        .map(|kv| kv.key)
        .collect();
    breakdown(&table.reordered(order.as_slice()), total_records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> StatTable {
        let mut table = StatTable::new();
        table.accumulate("Online".to_string(), Some(100.0));
        table.accumulate("Store".to_string(), Some(300.0));
        table.accumulate("Online".to_string(), Some(151.0));
        table.accumulate("Store".to_string(), None);
        table
    }

    #[test]
    fn test_breakdown() {
        let rows = breakdown(&table(), 4);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key, "Online");
        assert_eq!(rows[0].consumers, 2);
        assert_eq!(rows[0].share_percent, 50.0);
        assert_eq!(rows[0].average_spend, Some(126));
        // the Store record without spend counts as a consumer
        assert_eq!(rows[1].consumers, 2);
        assert_eq!(rows[1].average_spend, Some(150));
    }

    #[test]
    fn test_ranked_breakdown() {
        let rows = ranked_breakdown(&table(), 4, Metric::Sum);
        assert_eq!(rows[0].key, "Store");
        assert_eq!(rows[0].share_percent, 50.0);
        // equal counts keep table order
        let rows = ranked_breakdown(&table(), 4, Metric::Count);
        let keys: Vec<_> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["Online", "Store"]);
    }
}
