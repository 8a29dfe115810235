use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

/// One row of the chocolate consumer survey.
///
/// Every field is optional: a value that is missing, `null`, of the wrong
/// type or outside its documented domain is read as absent for that field
/// only, so the rest of the record still feeds the other dimensions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsumerRecord {
    #[serde(default, deserialize_with = "lenient_age")]
    pub age: Option<u32>,
    #[serde(default, deserialize_with = "lenient_category")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient_category")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "lenient_category")]
    pub brand_preference: Option<String>,
    #[serde(default, deserialize_with = "lenient_category")]
    pub purchase_frequency: Option<String>,
    /// Average spend in Indian Rupees, never negative
    #[serde(default, deserialize_with = "lenient_spend")]
    pub average_spend_inr: Option<f64>,
    #[serde(default, deserialize_with = "lenient_category")]
    pub purchase_channel: Option<String>,
    #[serde(default, deserialize_with = "lenient_category")]
    pub occasion: Option<String>,
    #[serde(default, deserialize_with = "lenient_category")]
    pub mood: Option<String>,
    /// Score in `[0, 5]`
    #[serde(default, deserialize_with = "lenient_satisfaction")]
    pub satisfaction_score: Option<f64>,
}

impl ConsumerRecord {
    /// Builder used by tests and fixtures: a record with only region and spend.
    pub fn with_region_spend(region: &str, spend: f64) -> Self {
        Self {
            region: Some(region.to_string()),
            average_spend_inr: Some(spend),
            ..Default::default()
        }
    }
}

/// Reads any JSON value and keeps it only if it converts into `T`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_category<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = lenient(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

fn lenient_age<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    // Ages arrive as JSON numbers, sometimes written as `34.0`.
    let value: Option<f64> = lenient(deserializer)?;
    Ok(value
        .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0 && *v <= u32::MAX as f64)
        .map(|v| v as u32))
}

fn lenient_spend<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<f64> = lenient(deserializer)?;
    Ok(value.filter(|v| v.is_finite() && *v >= 0.0))
}

fn lenient_satisfaction<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<f64> = lenient(deserializer)?;
    Ok(value.filter(|v| (0.0..=5.0).contains(v)))
}
