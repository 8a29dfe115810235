use serde::{Deserialize, Serialize};

/// Heat band of a value relative to the largest value of its result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IntensityTier {
    Low,
    Medium,
    High,
    Highest,
}

impl IntensityTier {
    pub const ALL: [IntensityTier; 4] = [
        IntensityTier::Low,
        IntensityTier::Medium,
        IntensityTier::High,
        IntensityTier::Highest,
    ];

    /// Band of a ratio in `[0, 1]`.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 0.75 {
            IntensityTier::Highest
        } else if ratio >= 0.5 {
            IntensityTier::High
        } else if ratio >= 0.25 {
            IntensityTier::Medium
        } else {
            IntensityTier::Low
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            IntensityTier::Low => "#22c55e",
            IntensityTier::Medium => "#eab308",
            IntensityTier::High => "#ea580c",
            IntensityTier::Highest => "#dc2626",
        }
    }

    /// Legend text, e.g. `"Medium (25-50%)"`.
    pub fn legend(&self) -> &'static str {
        match self {
            IntensityTier::Low => "Low (0-25%)",
            IntensityTier::Medium => "Medium (25-50%)",
            IntensityTier::High => "High (50-75%)",
            IntensityTier::Highest => "Highest (75-100%)",
        }
    }
}

/// Normalized value of one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intensity {
    pub entity: String,
    pub value: f64,
    /// `value / max`, in `[0, 1]`
    pub ratio: f64,
    pub tier: IntensityTier,
    pub color: String,
}

impl Intensity {
    /// Ratio as a whole percentage, for labels.
    pub fn percent(&self) -> u32 {
        (self.ratio * 100.0).round() as u32
    }
}

/// Intensities in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntensityMap {
    pub entries: Vec<Intensity>,
}

impl IntensityMap {
    pub fn get(&self, entity: &str) -> Option<&Intensity> {
        self.entries.iter().find(|e| e.entity == entity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Normalize `values` against their maximum.
///
/// When the set is empty or its maximum is not positive every ratio is 0.
/// Negative and non-finite values count as 0.
pub fn compute_intensity<S: AsRef<str>>(values: &[(S, f64)]) -> IntensityMap {
    let clean = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
    let max = values
        .iter()
        .map(|(_, v)| clean(*v))
        .fold(0.0_f64, f64::max);

    let entries = values
        .iter()
        .map(|(entity, value)| {
            let ratio = if max > 0.0 {
                (clean(*value) / max).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let tier = IntensityTier::from_ratio(ratio);
            Intensity {
                entity: entity.as_ref().to_string(),
                value: *value,
                ratio,
                tier,
                color: tier.color().to_string(),
            }
        })
        .collect();

    IntensityMap { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratios_and_tiers() {
        let map = compute_intensity(&[
            ("North", 400.0),
            ("South", 200.0),
            ("East", 100.0),
            ("West", 0.0),
        ]);
        let north = map.get("North").unwrap();
        assert_eq!(north.ratio, 1.0);
        assert_eq!(north.tier, IntensityTier::Highest);
        assert_eq!(north.color, "#dc2626");
        assert_eq!(map.get("South").unwrap().tier, IntensityTier::High);
        assert_eq!(map.get("East").unwrap().tier, IntensityTier::Medium);
        assert_eq!(map.get("West").unwrap().tier, IntensityTier::Low);
        assert_eq!(map.get("South").unwrap().percent(), 50);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(IntensityTier::from_ratio(0.0), IntensityTier::Low);
        assert_eq!(IntensityTier::from_ratio(0.2499), IntensityTier::Low);
        assert_eq!(IntensityTier::from_ratio(0.25), IntensityTier::Medium);
        assert_eq!(IntensityTier::from_ratio(0.5), IntensityTier::High);
        assert_eq!(IntensityTier::from_ratio(0.75), IntensityTier::Highest);
        assert_eq!(IntensityTier::from_ratio(1.0), IntensityTier::Highest);
    }

    #[test]
    fn test_empty_and_all_zero() {
        let empty: [(&str, f64); 0] = [];
        assert!(compute_intensity(&empty).is_empty());

        let map = compute_intensity(&[("a", 0.0), ("b", 0.0)]);
        for entry in &map.entries {
            assert_eq!(entry.ratio, 0.0);
            assert!(!entry.ratio.is_nan());
            assert_eq!(entry.tier, IntensityTier::Low);
        }
    }

    #[test]
    fn test_monotonic() {
        let values = [
            ("a", 13.0),
            ("b", 970.0),
            ("c", 250.0),
            ("d", 251.0),
            ("e", 740.0),
            ("f", 0.5),
        ];
        let map = compute_intensity(&values);
        for x in &map.entries {
            for y in &map.entries {
                if x.value > y.value {
                    assert!(x.ratio >= y.ratio);
                    assert!(x.tier >= y.tier);
                }
            }
        }
    }

    #[test]
    fn test_scaling_invariance() {
        let values = [("a", 120.0), ("b", 300.0), ("c", 75.0), ("d", 226.0)];
        let base = compute_intensity(&values);
        for factor in [2.0, 10.0, 0.5, 1000.0] {
            let scaled: Vec<(&str, f64)> = values.iter().map(|(k, v)| (*k, v * factor)).collect();
            let map = compute_intensity(&scaled);
            for (a, b) in base.entries.iter().zip(map.entries.iter()) {
                assert!((a.ratio - b.ratio).abs() < 1e-12);
                assert_eq!(a.tier, b.tier);
            }
        }
    }

    #[test]
    fn test_negative_and_nan_treated_as_zero() {
        let map = compute_intensity(&[("a", -50.0), ("b", f64::NAN), ("c", 10.0)]);
        assert_eq!(map.get("a").unwrap().ratio, 0.0);
        assert_eq!(map.get("b").unwrap().ratio, 0.0);
        assert_eq!(map.get("c").unwrap().ratio, 1.0);
    }
}
