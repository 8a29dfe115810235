use crate::dashboards::common::{breakdown, ranked_breakdown, BreakdownRow};
use crate::shared::analytics::{
    cross_tab, group_by_dimension, overall_stat, round_half_up, top_entity, Dimension, KeyValue,
    Measure, Metric,
};
use crate::shared::consumer::ConsumerRecord;
use serde::{Deserialize, Serialize};

/// Most common value of each behavioral dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsumerHighlights {
    pub total_consumers: usize,
    pub average_spend: Option<i64>,
    pub top_brand: Option<KeyValue>,
    pub top_channel: Option<KeyValue>,
    pub top_mood: Option<KeyValue>,
    pub top_occasion: Option<KeyValue>,
    /// Region with the most consumers
    pub top_region: Option<KeyValue>,
    /// Share of all consumers living in `top_region`, one decimal
    pub top_region_share: Option<f64>,
    /// Average spend inside `top_region`, whole rupees
    pub top_region_average_spend: Option<i64>,
}

/// Brand mix of one region: each brand's share of the region's consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionBrandMix {
    pub region: String,
    /// Fractions in `[0, 1]`, three decimals, brands in first-seen order
    pub brands: Vec<KeyValue>,
}

/// One bar of the satisfaction histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SatisfactionBar {
    /// `floor(score)`
    pub score: u8,
    pub consumers: u64,
}

/// Demographic and behavioral breakdowns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsumerInsightsResponse {
    pub highlights: ConsumerHighlights,
    /// Age brackets in bracket order
    pub age_groups: Vec<BreakdownRow>,
    pub genders: Vec<BreakdownRow>,
    pub regions: Vec<BreakdownRow>,
    pub brands: Vec<BreakdownRow>,
    pub channels: Vec<BreakdownRow>,
    pub frequencies: Vec<BreakdownRow>,
    pub moods: Vec<BreakdownRow>,
    /// Occasions by consumer count, descending
    pub occasions: Vec<BreakdownRow>,
    /// Ascending by score
    pub satisfaction: Vec<SatisfactionBar>,
    pub brand_mix: Vec<RegionBrandMix>,
}

impl ConsumerHighlights {
    pub fn from_records(records: &[ConsumerRecord]) -> Self {
        let top = |dimension: Dimension| {
            let table = group_by_dimension(records, dimension, Measure::Spend);
            top_entity(&table, Metric::Count).ok()
        };
        let regions = group_by_dimension(records, Dimension::Region, Measure::Spend);
        let top_region = top_entity(&regions, Metric::Count).ok();
        let region_stat = top_region
            .as_ref()
            .and_then(|kv| regions.get(&kv.key))
            .copied();

        Self {
            total_consumers: records.len(),
            average_spend: overall_stat(records, Measure::Spend)
                .average()
                .map(|a| round_half_up(a, 0) as i64),
            top_brand: top(Dimension::Brand),
            top_channel: top(Dimension::Channel),
            top_mood: top(Dimension::Mood),
            top_occasion: top(Dimension::Occasion),
            top_region_share: region_stat
                .filter(|_| !records.is_empty())
                .map(|s| round_half_up(s.count as f64 * 100.0 / records.len() as f64, 1)),
            top_region_average_spend: region_stat
                .and_then(|s| s.average())
                .map(|a| round_half_up(a, 0) as i64),
            top_region,
        }
    }
}

/// Per region, each brand's fraction of that region's keyed records.
pub fn brand_mix(records: &[ConsumerRecord]) -> Vec<RegionBrandMix> {
    let table = cross_tab(records, Dimension::Region, Dimension::Brand, Measure::Spend);
    table
        .row_keys
        .iter()
        .map(|region| {
            let cells: Vec<(&String, u64)> = table
                .column_keys
                .iter()
                .map(|brand| (brand, table.cell(region, brand).count))
                .filter(|(_, count)| *count > 0)
                .collect();
            let total: u64 = cells.iter().map(|(_, count)| count).sum();
            RegionBrandMix {
                region: region.clone(),
                brands: cells
                    .into_iter()
                    .map(|(brand, count)| {
                        KeyValue::new(brand.clone(), round_half_up(count as f64 / total as f64, 3))
                    })
                    .collect(),
            }
        })
        .collect()
}

fn satisfaction_histogram(records: &[ConsumerRecord]) -> Vec<SatisfactionBar> {
    let table = group_by_dimension(records, Dimension::Satisfaction, Measure::Spend);
    let mut bars: Vec<SatisfactionBar> = table
        .iter()
        .filter_map(|row| {
            row.key.parse::<u8>().ok().map(|score| SatisfactionBar {
                score,
                consumers: row.stat.count,
            })
        })
        .collect();
    bars.sort_by_key(|bar| bar.score);
    bars
}

impl ConsumerInsightsResponse {
    pub fn from_records(records: &[ConsumerRecord]) -> Self {
        let total = records.len();
        let table = |dimension: Dimension| {
            breakdown(&group_by_dimension(records, dimension, Measure::Spend), total)
        };
        let occasions = group_by_dimension(records, Dimension::Occasion, Measure::Spend);

        Self {
            highlights: ConsumerHighlights::from_records(records),
            age_groups: table(Dimension::AgeBracket),
            genders: table(Dimension::Gender),
            regions: table(Dimension::Region),
            brands: table(Dimension::Brand),
            channels: table(Dimension::Channel),
            frequencies: table(Dimension::PurchaseFrequency),
            moods: table(Dimension::Mood),
            occasions: ranked_breakdown(&occasions, total, Metric::Count),
            satisfaction: satisfaction_histogram(records),
            brand_mix: brand_mix(records),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn consumer(age: u32, gender: &str, region: &str, brand: &str, score: f64) -> ConsumerRecord {
        ConsumerRecord {
            age: Some(age),
            gender: Some(gender.to_string()),
            region: Some(region.to_string()),
            brand_preference: Some(brand.to_string()),
            purchase_channel: Some("Online".to_string()),
            mood: Some("Happy".to_string()),
            occasion: Some("Gift".to_string()),
            average_spend_inr: Some(100.0),
            satisfaction_score: Some(score),
            ..Default::default()
        }
    }

    fn sample() -> Vec<ConsumerRecord> {
        vec![
            consumer(65, "Female", "North", "KitKat", 4.7),
            consumer(18, "Male", "North", "Amul Dark", 3.2),
            consumer(25, "Female", "South", "KitKat", 4.0),
            consumer(19, "Female", "North", "KitKat", 4.9),
        ]
    }

    #[test]
    fn test_highlights() {
        let highlights = ConsumerHighlights::from_records(&sample());
        assert_eq!(highlights.total_consumers, 4);
        assert_eq!(highlights.average_spend, Some(100));
        assert_eq!(highlights.top_brand, Some(KeyValue::new("KitKat", 3.0)));
        assert_eq!(highlights.top_channel, Some(KeyValue::new("Online", 4.0)));
        assert_eq!(highlights.top_region, Some(KeyValue::new("North", 3.0)));
        assert_eq!(highlights.top_region_share, Some(75.0));
        assert_eq!(highlights.top_region_average_spend, Some(100));
    }

    #[test]
    fn test_highlights_empty() {
        let highlights = ConsumerHighlights::from_records(&[]);
        assert_eq!(highlights, ConsumerHighlights::default());
    }

    #[test]
    fn test_age_groups_in_bracket_order() {
        let response = ConsumerInsightsResponse::from_records(&sample());
        let keys: Vec<_> = response.age_groups.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["13-20", "21-30", "60+"]);
        assert_eq!(response.age_groups[0].consumers, 2);
        assert_eq!(response.age_groups[0].share_percent, 50.0);
    }

    #[test]
    fn test_satisfaction_histogram_floors_scores() {
        let response = ConsumerInsightsResponse::from_records(&sample());
        assert_eq!(
            response.satisfaction,
            vec![
                SatisfactionBar { score: 3, consumers: 1 },
                SatisfactionBar { score: 4, consumers: 3 },
            ]
        );
    }

    #[test]
    fn test_brand_mix() {
        let mix = brand_mix(&sample());
        assert_eq!(mix.len(), 2);
        assert_eq!(mix[0].region, "North");
        assert_eq!(
            mix[0].brands,
            vec![KeyValue::new("KitKat", 0.667), KeyValue::new("Amul Dark", 0.333)]
        );
        assert_eq!(mix[1].brands, vec![KeyValue::new("KitKat", 1.0)]);
    }

    #[test]
    fn test_counts_sum_to_keyed_records() {
        let mut records = sample();
        records.push(ConsumerRecord::default());
        let response = ConsumerInsightsResponse::from_records(&records);
        let total: u64 = response.genders.iter().map(|r| r.consumers).sum();
        assert_eq!(total, 4);
    }
}
