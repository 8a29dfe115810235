use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Age brackets
// ---------------------------------------------------------------------------

/// Demographic age bracket. Bounds are inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgeBracket {
    #[serde(rename = "13-20")]
    Teens,
    #[serde(rename = "21-30")]
    Twenties,
    #[serde(rename = "31-40")]
    Thirties,
    #[serde(rename = "41-50")]
    Forties,
    #[serde(rename = "51-60")]
    Fifties,
    #[serde(rename = "60+")]
    Senior,
}

impl AgeBracket {
    /// Display order, youngest first.
    pub const ALL: [AgeBracket; 6] = [
        AgeBracket::Teens,
        AgeBracket::Twenties,
        AgeBracket::Thirties,
        AgeBracket::Forties,
        AgeBracket::Fifties,
        AgeBracket::Senior,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AgeBracket::Teens => "13-20",
            AgeBracket::Twenties => "21-30",
            AgeBracket::Thirties => "31-40",
            AgeBracket::Forties => "41-50",
            AgeBracket::Fifties => "51-60",
            AgeBracket::Senior => "60+",
        }
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify an age. Ages below 13 are outside the surveyed population and
/// have no bracket; every age above 60 lands in `60+`.
pub fn age_to_bracket(age: u32) -> Option<AgeBracket> {
    match age {
        0..=12 => None,
        13..=20 => Some(AgeBracket::Teens),
        21..=30 => Some(AgeBracket::Twenties),
        31..=40 => Some(AgeBracket::Thirties),
        41..=50 => Some(AgeBracket::Forties),
        51..=60 => Some(AgeBracket::Fifties),
        _ => Some(AgeBracket::Senior),
    }
}

// ---------------------------------------------------------------------------
// Brand families
// ---------------------------------------------------------------------------

/// Coarse chocolate type derived from the brand name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrandFamily {
    Dark,
    Milk,
    Premium,
    Unclassified,
}

/// Families in match priority order, each with its name tokens.
const FAMILY_KEYWORDS: [(BrandFamily, &[&str]); 3] = [
    (BrandFamily::Dark, &["Dark", "Amul"]),
    (BrandFamily::Milk, &["Dairy", "KitKat", "5 Star"]),
    (BrandFamily::Premium, &["Ferrero", "Toblerone"]),
];

impl BrandFamily {
    /// Families that take part in family-level totals.
    pub const CLASSIFIED: [BrandFamily; 3] =
        [BrandFamily::Dark, BrandFamily::Milk, BrandFamily::Premium];

    pub fn label(&self) -> &'static str {
        match self {
            BrandFamily::Dark => "Dark",
            BrandFamily::Milk => "Milk",
            BrandFamily::Premium => "Premium",
            BrandFamily::Unclassified => "Unclassified",
        }
    }
}

impl fmt::Display for BrandFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Case-sensitive substring match; the first family in priority order wins.
pub fn brand_to_family(brand: &str) -> BrandFamily {
    FAMILY_KEYWORDS
        .iter()
        .find(|(_, tokens)| tokens.iter().any(|t| brand.contains(t)))
        .map(|(family, _)| *family)
        .unwrap_or(BrandFamily::Unclassified)
}

// ---------------------------------------------------------------------------
// Satisfaction
// ---------------------------------------------------------------------------

/// Whole-star bucket of a satisfaction score (`4.7` -> `4`).
pub fn satisfaction_bucket(score: f64) -> Option<u8> {
    if (0.0..=5.0).contains(&score) {
        Some(score.floor() as u8)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket_boundaries() {
        assert_eq!(age_to_bracket(13), Some(AgeBracket::Teens));
        assert_eq!(age_to_bracket(20), Some(AgeBracket::Teens));
        assert_eq!(age_to_bracket(21), Some(AgeBracket::Twenties));
        assert_eq!(age_to_bracket(30), Some(AgeBracket::Twenties));
        assert_eq!(age_to_bracket(31), Some(AgeBracket::Thirties));
        assert_eq!(age_to_bracket(41), Some(AgeBracket::Forties));
        assert_eq!(age_to_bracket(50), Some(AgeBracket::Forties));
        assert_eq!(age_to_bracket(60), Some(AgeBracket::Fifties));
        assert_eq!(age_to_bracket(61), Some(AgeBracket::Senior));
        assert_eq!(age_to_bracket(120), Some(AgeBracket::Senior));
    }

    #[test]
    fn test_brackets_partition_surveyed_ages() {
        for age in 13..=120u32 {
            let matching: Vec<_> = AgeBracket::ALL
                .iter()
                .filter(|b| {
                    let (lo, hi) = match b {
                        AgeBracket::Teens => (13, 20),
                        AgeBracket::Twenties => (21, 30),
                        AgeBracket::Thirties => (31, 40),
                        AgeBracket::Forties => (41, 50),
                        AgeBracket::Fifties => (51, 60),
                        AgeBracket::Senior => (61, u32::MAX),
                    };
                    (lo..=hi).contains(&age)
                })
                .collect();
            assert_eq!(matching.len(), 1, "age {age}");
            assert_eq!(age_to_bracket(age), Some(*matching[0]), "age {age}");
        }
    }

    #[test]
    fn test_below_domain_has_no_bracket() {
        assert_eq!(age_to_bracket(0), None);
        assert_eq!(age_to_bracket(12), None);
    }

    #[test]
    fn test_brand_family_priority() {
        assert_eq!(brand_to_family("Amul Dark"), BrandFamily::Dark);
        assert_eq!(brand_to_family("Amul"), BrandFamily::Dark);
        assert_eq!(brand_to_family("Cadbury Dairy Milk"), BrandFamily::Milk);
        assert_eq!(brand_to_family("Nestle KitKat"), BrandFamily::Milk);
        assert_eq!(brand_to_family("5 Star"), BrandFamily::Milk);
        assert_eq!(brand_to_family("Ferrero Rocher"), BrandFamily::Premium);
        assert_eq!(brand_to_family("Toblerone"), BrandFamily::Premium);
        // Dark is checked before Milk
        assert_eq!(brand_to_family("Dairy Milk Dark"), BrandFamily::Dark);
    }

    #[test]
    fn test_brand_family_unclassified() {
        assert_eq!(brand_to_family("Snickers"), BrandFamily::Unclassified);
        assert_eq!(brand_to_family(""), BrandFamily::Unclassified);
        // Matching is case-sensitive
        assert_eq!(brand_to_family("amul dark"), BrandFamily::Unclassified);
    }

    #[test]
    fn test_satisfaction_bucket() {
        assert_eq!(satisfaction_bucket(0.0), Some(0));
        assert_eq!(satisfaction_bucket(4.7), Some(4));
        assert_eq!(satisfaction_bucket(5.0), Some(5));
        assert_eq!(satisfaction_bucket(5.1), None);
        assert_eq!(satisfaction_bucket(-0.5), None);
    }
}
