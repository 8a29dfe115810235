pub mod aggregate;
pub mod bucketing;
pub mod dimension;
pub mod error;
pub mod intensity;
pub mod search;
pub mod stat_table;

pub use aggregate::*;
pub use bucketing::{age_to_bracket, brand_to_family, satisfaction_bucket, AgeBracket, BrandFamily};
pub use dimension::{Dimension, Measure, Metric};
pub use error::{AnalyticsError, DataLoadError};
pub use intensity::{compute_intensity, Intensity, IntensityMap, IntensityTier};
pub use search::{
    build_index, query, SearchAggregates, SearchCategory, SearchEntry, SearchPayload, TargetView,
};
pub use stat_table::{KeyValue, Stat, StatRow, StatTable};
