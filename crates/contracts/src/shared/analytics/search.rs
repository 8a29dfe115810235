//! Header search: a flat catalog of aggregate facts, rebuilt on demand.

use super::aggregate::{group_by_dimension, overall_stat, percentage_share, RecordFilter};
use super::dimension::{Dimension, Measure};
use super::stat_table::{Stat, StatTable};
use crate::shared::consumer::ConsumerRecord;
use crate::shared::format::{format_inr, format_percent, format_thousands};
use serde::{Deserialize, Serialize};

/// Dashboard view a search hit leads to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetView {
    #[default]
    Dashboard,
    ConsumerInsights,
    SalesHeatmap,
    Trends,
    Detail,
}

impl TargetView {
    pub const ALL: [TargetView; 5] = [
        TargetView::Dashboard,
        TargetView::ConsumerInsights,
        TargetView::SalesHeatmap,
        TargetView::Trends,
        TargetView::Detail,
    ];

    /// Value used in the `?view=` query parameter.
    pub fn slug(&self) -> &'static str {
        match self {
            TargetView::Dashboard => "dashboard",
            TargetView::ConsumerInsights => "consumer-insights",
            TargetView::SalesHeatmap => "sales-heatmap",
            TargetView::Trends => "trends",
            TargetView::Detail => "detail",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.slug() == slug)
    }

    pub fn title(&self) -> &'static str {
        match self {
            TargetView::Dashboard => "Dashboard",
            TargetView::ConsumerInsights => "Consumer Insights",
            TargetView::SalesHeatmap => "Sales Heatmap",
            TargetView::Trends => "Trends",
            TargetView::Detail => "Detail",
        }
    }
}

/// Facet of a search entry. Index order follows the declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchCategory {
    Brand,
    Region,
    AgeGroup,
    Channel,
    Insight,
}

impl SearchCategory {
    pub fn label(&self) -> &'static str {
        match self {
            SearchCategory::Brand => "Brand",
            SearchCategory::Region => "Region",
            SearchCategory::AgeGroup => "Age Group",
            SearchCategory::Channel => "Channel",
            SearchCategory::Insight => "Insight",
        }
    }
}

/// Data carried to the target view when an entry is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchPayload {
    Brand {
        brand: String,
        consumers: u64,
        share_percent: f64,
        revenue: f64,
    },
    Region {
        region: String,
        consumers: u64,
        average_spend: Option<f64>,
        revenue: f64,
    },
    AgeGroup {
        bracket: String,
        consumers: u64,
    },
    Channel {
        channel: String,
        revenue: f64,
    },
    Fact {
        value: String,
    },
}

impl SearchPayload {
    /// Drill-down filter for brand and region hits.
    pub fn filter(&self) -> Option<RecordFilter> {
        match self {
            SearchPayload::Brand { brand, .. } => Some(RecordFilter::brand(brand.clone())),
            SearchPayload::Region { region, .. } => Some(RecordFilter::region(region.clone())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchEntry {
    pub title: String,
    pub description: String,
    pub category: SearchCategory,
    pub target_view: TargetView,
    pub payload: SearchPayload,
    /// Extra lowercase terms the entry answers to
    pub keywords: Vec<String>,
}

impl SearchEntry {
    /// `needle` must already be trimmed and lowercased.
    fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.category.label().to_lowercase().contains(needle)
            || self.keywords.iter().any(|k| k.contains(needle))
    }
}

/// The statistic tables the index is built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchAggregates {
    pub total_records: usize,
    pub brands: StatTable,
    pub regions: StatTable,
    pub age_groups: StatTable,
    pub channels: StatTable,
    /// Spend over the whole record set
    pub spend: Stat,
    /// Satisfaction over the whole record set
    pub satisfaction: Stat,
}

impl SearchAggregates {
    pub fn from_records(records: &[ConsumerRecord]) -> Self {
        Self {
            total_records: records.len(),
            brands: group_by_dimension(records, Dimension::Brand, Measure::Spend),
            regions: group_by_dimension(records, Dimension::Region, Measure::Spend),
            age_groups: group_by_dimension(records, Dimension::AgeBracket, Measure::Spend),
            channels: group_by_dimension(records, Dimension::Channel, Measure::Spend),
            spend: overall_stat(records, Measure::Spend),
            satisfaction: overall_stat(records, Measure::Satisfaction),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_records == 0
    }
}

fn keywords(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Build the catalog: brands, regions, age groups, channels, then the
/// fixed keyword facts.
pub fn build_index(aggregates: &SearchAggregates) -> Vec<SearchEntry> {
    if aggregates.is_empty() {
        return Vec::new();
    }

    let mut index = Vec::new();
    let shares = percentage_share(&aggregates.brands, aggregates.total_records);

    for (row, share) in aggregates.brands.iter().zip(shares.iter()) {
        index.push(SearchEntry {
            title: row.key.clone(),
            description: format!(
                "{} of consumers, {} total spend",
                format_percent(share.value),
                format_inr(row.stat.sum)
            ),
            category: SearchCategory::Brand,
            target_view: TargetView::Detail,
            payload: SearchPayload::Brand {
                brand: row.key.clone(),
                consumers: row.stat.count,
                share_percent: share.value,
                revenue: row.stat.sum,
            },
            keywords: keywords(&["brand", "share", "revenue"]),
        });
    }

    for row in aggregates.regions.iter() {
        let average = row.stat.average();
        index.push(SearchEntry {
            title: row.key.clone(),
            description: format!(
                "Average spend {} across {} consumers",
                average.map(format_inr).unwrap_or_else(|| "N/A".to_string()),
                format_thousands(row.stat.count as i64)
            ),
            category: SearchCategory::Region,
            target_view: TargetView::Detail,
            payload: SearchPayload::Region {
                region: row.key.clone(),
                consumers: row.stat.count,
                average_spend: average,
                revenue: row.stat.sum,
            },
            keywords: keywords(&["region", "average", "spend"]),
        });
    }

    for row in aggregates.age_groups.iter() {
        index.push(SearchEntry {
            title: format!("Age {}", row.key),
            description: format!("{} consumers", format_thousands(row.stat.count as i64)),
            category: SearchCategory::AgeGroup,
            target_view: TargetView::ConsumerInsights,
            payload: SearchPayload::AgeGroup {
                bracket: row.key.clone(),
                consumers: row.stat.count,
            },
            keywords: keywords(&["age", "demographic"]),
        });
    }

    for row in aggregates.channels.iter() {
        index.push(SearchEntry {
            title: row.key.clone(),
            description: format!("{} revenue through {}", format_inr(row.stat.sum), row.key),
            category: SearchCategory::Channel,
            target_view: TargetView::Trends,
            payload: SearchPayload::Channel {
                channel: row.key.clone(),
                revenue: row.stat.sum,
            },
            keywords: keywords(&["channel", "revenue"]),
        });
    }

    index.extend(keyword_facts(aggregates));
    index
}

fn keyword_facts(aggregates: &SearchAggregates) -> Vec<SearchEntry> {
    let mut facts = Vec::new();

    let mut fact = |title: &str, value: String, words: &[&str]| {
        facts.push(SearchEntry {
            title: title.to_string(),
            description: value.clone(),
            category: SearchCategory::Insight,
            target_view: TargetView::Dashboard,
            payload: SearchPayload::Fact { value },
            keywords: keywords(words),
        });
    };

    fact(
        "Total Revenue",
        format_inr(aggregates.spend.sum),
        &["revenue", "sales", "total"],
    );
    if let Some(avg) = aggregates.spend.average() {
        fact("Average Spend", format_inr(avg), &["average", "spend"]);
    }
    fact(
        "Total Consumers",
        format_thousands(aggregates.total_records as i64),
        &["consumers", "customers", "total"],
    );
    if let Some(avg) = aggregates.satisfaction.measured_average() {
        fact(
            "Customer Satisfaction",
            format!("{:.1}/5", avg),
            &["satisfaction", "rating", "average"],
        );
    }

    facts
}

/// Case-insensitive substring search. Results keep index order; a blank
/// query returns nothing.
pub fn query(index: &[SearchEntry], text: &str) -> Vec<SearchEntry> {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    index
        .iter()
        .filter(|entry| entry.matches(&needle))
        .cloned()
        .collect()
}
