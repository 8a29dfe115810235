use crate::shared::analytics::{
    compute_intensity, cross_tab, overall_stat, ranked_top_n, top_entity, Dimension,
    IntensityTier, KeyValue, Measure, Metric, StatTable,
};
use crate::shared::consumer::ConsumerRecord;
use serde::{Deserialize, Serialize};

/// Brands listed in the "Top Performers" panel
pub const TOP_PERFORMERS: usize = 3;

/// One brand x region cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatCell {
    pub region: String,
    pub sales: f64,
    pub consumers: u64,
    /// Relative to the largest cell of the grid
    pub ratio: f64,
    pub tier: IntensityTier,
    pub color: String,
}

impl HeatCell {
    /// No record fell into the cell; rendered greyed out.
    pub fn is_empty(&self) -> bool {
        self.consumers == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapRow {
    pub brand: String,
    /// One cell per region, in `SalesHeatmapResponse::regions` order
    pub cells: Vec<HeatCell>,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendItem {
    pub tier: IntensityTier,
    pub label: String,
    pub color: String,
}

/// Brand with the largest spend inside one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalLeader {
    pub region: String,
    pub brand: String,
    pub sales: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesHeatmapResponse {
    /// Column order: regions in first-seen order
    pub regions: Vec<String>,
    /// Row order: brands in first-seen order
    pub rows: Vec<HeatmapRow>,
    pub total_sales: f64,
    /// Brand with the largest total spend
    pub top_brand: Option<String>,
    pub top_performers: Vec<KeyValue>,
    pub regional_leaders: Vec<RegionalLeader>,
    pub legend: Vec<LegendItem>,
}

impl SalesHeatmapResponse {
    pub fn active_brands(&self) -> usize {
        self.rows.len()
    }

    pub fn from_records(records: &[ConsumerRecord]) -> Self {
        let grid = cross_tab(records, Dimension::Brand, Dimension::Region, Measure::Spend);

        // Row-major, so entries line up with the nested loop below
        let mut flat: Vec<(&str, f64)> = Vec::new();
        for brand in &grid.row_keys {
            for region in &grid.column_keys {
                flat.push((region.as_str(), grid.cell(brand, region).sum));
            }
        }
        let intensity = compute_intensity(&flat);

        let mut totals = StatTable::new();
        let mut rows = Vec::with_capacity(grid.row_keys.len());
        let mut cursor = intensity.entries.iter();
        for brand in &grid.row_keys {
            let mut cells = Vec::with_capacity(grid.column_keys.len());
            for region in &grid.column_keys {
                let stat = grid.cell(brand, region);
                let Some(entry) = cursor.next() else { break };
                cells.push(HeatCell {
                    region: region.clone(),
                    sales: stat.sum,
                    consumers: stat.count,
                    ratio: entry.ratio,
                    tier: entry.tier,
                    color: entry.color.clone(),
                });
            }
            let total = cells.iter().map(|c| c.sales).sum();
            totals.accumulate(brand.clone(), Some(total));
            rows.push(HeatmapRow {
                brand: brand.clone(),
                cells,
                total,
            });
        }

        let regional_leaders = grid
            .column_keys
            .iter()
            .filter_map(|region| {
                let mut column = StatTable::new();
                for brand in &grid.row_keys {
                    let stat = grid.cell(brand, region);
                    if stat.count > 0 {
                        column.accumulate(brand.clone(), Some(stat.sum));
                    }
                }
                top_entity(&column, Metric::Sum).ok().map(|kv| RegionalLeader {
                    region: region.clone(),
                    brand: kv.key,
                    sales: kv.value,
                })
            })
            .collect();

        Self {
            regions: grid.column_keys.clone(),
            total_sales: overall_stat(records, Measure::Spend).sum,
            top_brand: top_entity(&totals, Metric::Sum).ok().map(|kv| kv.key),
            top_performers: ranked_top_n(&totals, TOP_PERFORMERS, Metric::Sum),
            regional_leaders,
            legend: legend(),
            rows,
        }
    }
}

pub fn legend() -> Vec<LegendItem> {
    IntensityTier::ALL
        .iter()
        .map(|tier| LegendItem {
            tier: *tier,
            label: tier.legend().to_string(),
            color: tier.color().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(brand: &str, region: &str, spend: f64) -> ConsumerRecord {
        ConsumerRecord {
            brand_preference: Some(brand.to_string()),
            ..ConsumerRecord::with_region_spend(region, spend)
        }
    }

    fn sample() -> Vec<ConsumerRecord> {
        vec![
            sale("KitKat", "North", 400.0),
            sale("Amul Dark", "North", 100.0),
            sale("KitKat", "South", 150.0),
            sale("Ferrero Rocher", "East", 50.0),
            sale("Amul Dark", "East", 250.0),
        ]
    }

    #[test]
    fn test_grid_shape_and_tiers() {
        let response = SalesHeatmapResponse::from_records(&sample());
        assert_eq!(response.regions, vec!["North", "South", "East"]);
        assert_eq!(response.active_brands(), 3);
        assert_eq!(response.total_sales, 950.0);

        let kitkat = &response.rows[0];
        assert_eq!(kitkat.brand, "KitKat");
        assert_eq!(kitkat.total, 550.0);
        assert_eq!(kitkat.cells[0].tier, IntensityTier::Highest);
        assert_eq!(kitkat.cells[0].color, "#dc2626");
        assert_eq!(kitkat.cells[1].tier, IntensityTier::Medium);
        assert!(kitkat.cells[2].is_empty());
        assert_eq!(kitkat.cells[2].tier, IntensityTier::Low);

        let amul = &response.rows[1];
        assert_eq!(amul.cells[2].sales, 250.0);
        assert_eq!(amul.cells[2].tier, IntensityTier::High);
    }

    #[test]
    fn test_rankings() {
        let response = SalesHeatmapResponse::from_records(&sample());
        assert_eq!(response.top_brand.as_deref(), Some("KitKat"));
        let performers: Vec<_> = response.top_performers.iter().map(|kv| kv.key.as_str()).collect();
        assert_eq!(performers, vec!["KitKat", "Amul Dark", "Ferrero Rocher"]);

        let leaders: Vec<_> = response
            .regional_leaders
            .iter()
            .map(|l| (l.region.as_str(), l.brand.as_str()))
            .collect();
        assert_eq!(
            leaders,
            vec![("North", "KitKat"), ("South", "KitKat"), ("East", "Amul Dark")]
        );
    }

    #[test]
    fn test_empty() {
        let response = SalesHeatmapResponse::from_records(&[]);
        assert!(response.rows.is_empty());
        assert!(response.regions.is_empty());
        assert_eq!(response.top_brand, None);
        assert_eq!(response.total_sales, 0.0);
        assert_eq!(response.legend.len(), 4);
    }

    #[test]
    fn test_legend() {
        let labels: Vec<_> = legend().into_iter().map(|l| l.label).collect();
        assert_eq!(
            labels,
            vec!["Low (0-25%)", "Medium (25-50%)", "High (50-75%)", "Highest (75-100%)"]
        );
    }
}
