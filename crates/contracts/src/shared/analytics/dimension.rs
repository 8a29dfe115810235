use super::bucketing::{age_to_bracket, brand_to_family, satisfaction_bucket, BrandFamily};
use crate::shared::consumer::ConsumerRecord;
use serde::{Deserialize, Serialize};

/// Record field (or derived classification) a table is grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Gender,
    Region,
    Brand,
    PurchaseFrequency,
    Channel,
    Occasion,
    Mood,
    AgeBracket,
    BrandFamily,
    Satisfaction,
}

impl Dimension {
    /// Grouping key of `record`, `None` when the record has no usable value.
    pub fn key(&self, record: &ConsumerRecord) -> Option<String> {
        match self {
            Dimension::Gender => record.gender.clone(),
            Dimension::Region => record.region.clone(),
            Dimension::Brand => record.brand_preference.clone(),
            Dimension::PurchaseFrequency => record.purchase_frequency.clone(),
            Dimension::Channel => record.purchase_channel.clone(),
            Dimension::Occasion => record.occasion.clone(),
            Dimension::Mood => record.mood.clone(),
            Dimension::AgeBracket => record
                .age
                .and_then(age_to_bracket)
                .map(|b| b.label().to_string()),
            // Unclassified brands stay out of family totals
            Dimension::BrandFamily => record
                .brand_preference
                .as_deref()
                .map(brand_to_family)
                .filter(|f| *f != BrandFamily::Unclassified)
                .map(|f| f.label().to_string()),
            Dimension::Satisfaction => record
                .satisfaction_score
                .and_then(satisfaction_bucket)
                .map(|s| s.to_string()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Gender => "Gender",
            Dimension::Region => "Region",
            Dimension::Brand => "Brand",
            Dimension::PurchaseFrequency => "Purchase Frequency",
            Dimension::Channel => "Channel",
            Dimension::Occasion => "Occasion",
            Dimension::Mood => "Mood",
            Dimension::AgeBracket => "Age Group",
            Dimension::BrandFamily => "Chocolate Type",
            Dimension::Satisfaction => "Satisfaction",
        }
    }
}

/// Numeric field accumulated into `Stat::sum`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    #[default]
    Spend,
    Satisfaction,
}

impl Measure {
    pub fn value(&self, record: &ConsumerRecord) -> Option<f64> {
        match self {
            Measure::Spend => record.average_spend_inr,
            Measure::Satisfaction => record.satisfaction_score,
        }
    }
}

/// Which aggregate a ranking or top-entity lookup compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Count,
    Sum,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_keys() {
        let record = ConsumerRecord {
            age: Some(45),
            brand_preference: Some("Ferrero Rocher".to_string()),
            satisfaction_score: Some(3.9),
            ..Default::default()
        };
        assert_eq!(Dimension::AgeBracket.key(&record).as_deref(), Some("41-50"));
        assert_eq!(Dimension::BrandFamily.key(&record).as_deref(), Some("Premium"));
        assert_eq!(Dimension::Satisfaction.key(&record).as_deref(), Some("3"));
        assert_eq!(Dimension::Region.key(&record), None);
    }

    #[test]
    fn test_unclassified_brand_has_no_family_key() {
        let record = ConsumerRecord {
            brand_preference: Some("Snickers".to_string()),
            ..Default::default()
        };
        assert_eq!(Dimension::Brand.key(&record).as_deref(), Some("Snickers"));
        assert_eq!(Dimension::BrandFamily.key(&record), None);
    }

    #[test]
    fn test_measures() {
        let record = ConsumerRecord {
            age: Some(30),
            average_spend_inr: Some(120.0),
            ..Default::default()
        };
        assert_eq!(Measure::Spend.value(&record), Some(120.0));
        assert_eq!(Measure::Satisfaction.value(&record), None);
    }
}
