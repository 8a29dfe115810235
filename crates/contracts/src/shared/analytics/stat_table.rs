use super::dimension::Metric;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde::Deserialize;
use std::collections::HashMap;

/// Aggregate of one group.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, Deserialize)]
pub struct Stat {
    /// Records carrying this key
    pub count: u64,
    /// Sum of the measure over those records
    pub sum: f64,
    /// Records that contributed a measure value to `sum`
    pub measured: u64,
}

impl Stat {
    /// `sum / count`. A keyed record without a measure value counts as 0;
    /// `None` for an empty group.
    pub fn average(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }

    /// `sum / measured`, ignoring records that carried no measure value.
    /// Used for ratings, where a missing score is not a zero.
    pub fn measured_average(&self) -> Option<f64> {
        if self.measured == 0 {
            None
        } else {
            Some(self.sum / self.measured as f64)
        }
    }

    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Count => self.count as f64,
            Metric::Sum => self.sum,
        }
    }

    /// Count one record, adding `value` to the sum when present.
    pub fn record(&mut self, value: Option<f64>) {
        self.count += 1;
        if let Some(v) = value {
            self.sum += v;
            self.measured += 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct StatRow {
    pub key: String,
    #[serde(flatten)]
    pub stat: Stat,
}

/// A key with one derived number (share, average, rank value).
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: f64,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Grouped statistics keyed by a dimension value.
///
/// Rows keep the order in which their keys were first seen; tie-breaks and
/// stable rankings downstream depend on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatTable {
    rows: Vec<StatRow>,
    index: HashMap<String, usize>,
}

impl StatTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one record under `key`, adding `value` to the sum when present.
    pub fn accumulate(&mut self, key: String, value: Option<f64>) {
        let idx = match self.index.get(&key) {
            Some(idx) => *idx,
            None => {
                self.index.insert(key.clone(), self.rows.len());
                self.rows.push(StatRow {
                    key,
                    stat: Stat::default(),
                });
                self.rows.len() - 1
            }
        };
        self.rows[idx].stat.record(value);
    }

    pub fn get(&self, key: &str) -> Option<&Stat> {
        self.index.get(key).map(|idx| &self.rows[*idx].stat)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatRow> {
        self.rows.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of records that had a key.
    pub fn total_count(&self) -> u64 {
        self.rows.iter().map(|r| r.stat.count).sum()
    }

    pub fn total_sum(&self) -> f64 {
        self.rows.iter().map(|r| r.stat.sum).sum()
    }

    /// Rebuild the table with rows in `order`; keys not listed keep their
    /// relative order after the listed ones, listed keys with no row are
    /// skipped.
    pub fn reordered<S: AsRef<str>>(&self, order: &[S]) -> Self {
        let mut result = StatTable::new();
        for key in order {
            if let Some(row) = self.index.get(key.as_ref()).map(|idx| &self.rows[*idx]) {
                result.push_row(row.clone());
            }
        }
        for row in &self.rows {
            if !result.index.contains_key(&row.key) {
                result.push_row(row.clone());
            }
        }
        result
    }

    fn push_row(&mut self, row: StatRow) {
        self.index.insert(row.key.clone(), self.rows.len());
        self.rows.push(row);
    }
}

impl Serialize for StatTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulate_keeps_first_seen_order() {
        let mut table = StatTable::new();
        table.accumulate("South".to_string(), Some(10.0));
        table.accumulate("North".to_string(), Some(5.0));
        table.accumulate("South".to_string(), None);

        let keys: Vec<_> = table.keys().collect();
        assert_eq!(keys, vec!["South", "North"]);

        let south = table.get("South").unwrap();
        assert_eq!(south.count, 2);
        assert_eq!(south.sum, 10.0);
        assert_eq!(south.measured, 1);
        assert_eq!(south.average(), Some(5.0));
        assert_eq!(south.measured_average(), Some(10.0));
        assert_eq!(table.total_count(), 3);
    }

    #[test]
    fn test_reordered() {
        let mut table = StatTable::new();
        for key in ["60+", "13-20", "Other", "21-30"] {
            table.accumulate(key.to_string(), Some(1.0));
        }
        let ordered = table.reordered(&["13-20", "21-30", "31-40", "60+"]);
        let keys: Vec<_> = ordered.keys().collect();
        assert_eq!(keys, vec!["13-20", "21-30", "60+", "Other"]);
        assert_eq!(ordered.get("Other").unwrap().count, 1);
    }

    #[test]
    fn test_serializes_as_row_list() {
        let mut table = StatTable::new();
        table.accumulate("North".to_string(), Some(100.0));
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"key": "North", "count": 1, "sum": 100.0, "measured": 1}])
        );
    }

    #[test]
    fn test_average_without_measure() {
        let stat = Stat {
            count: 3,
            sum: 0.0,
            measured: 0,
        };
        assert_eq!(stat.average(), Some(0.0));
        assert_eq!(stat.measured_average(), None);
        assert_eq!(Stat::default().average(), None);
    }
}
