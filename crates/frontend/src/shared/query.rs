//! Page query string: which view is open, the drill-down filter, and the
//! config overrides that have to survive URL rewrites.

use contracts::shared::analytics::{RecordFilter, TargetView};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<String>,
}

impl PageQuery {
    /// Parse `location.search`; garbage yields the empty query.
    pub fn parse(search: &str) -> Self {
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default()
    }

    /// Open view; unknown or missing slugs fall back to the dashboard.
    /// A detail view without a filter has nothing to show and falls back too.
    pub fn target_view(&self) -> TargetView {
        let view = self
            .view
            .as_deref()
            .and_then(TargetView::from_slug)
            .unwrap_or_default();
        if view == TargetView::Detail && self.filter().is_empty() {
            TargetView::Dashboard
        } else {
            view
        }
    }

    pub fn filter(&self) -> RecordFilter {
        RecordFilter {
            brand: self.brand.clone(),
            region: self.region.clone(),
        }
    }

    /// Same overrides, new navigation state.
    pub fn navigate(&self, view: TargetView, filter: Option<&RecordFilter>) -> Self {
        let filter = filter.cloned().unwrap_or_default();
        Self {
            view: Some(view.slug().to_string()),
            brand: filter.brand,
            region: filter.region,
            data: self.data.clone(),
            log: self.log.clone(),
        }
    }

    /// `?view=...` form for `history.replaceState`.
    pub fn to_search(&self) -> String {
        format!("?{}", serde_qs::to_string(self).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_view_and_filter() {
        let query = PageQuery::parse("?view=detail&brand=Amul%20Dark");
        assert_eq!(query.target_view(), TargetView::Detail);
        assert_eq!(query.filter(), RecordFilter::brand("Amul Dark"));
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(PageQuery::parse("").target_view(), TargetView::Dashboard);
        assert_eq!(
            PageQuery::parse("?view=forecast").target_view(),
            TargetView::Dashboard
        );
        assert_eq!(
            PageQuery::parse("?view=detail").target_view(),
            TargetView::Dashboard
        );
        assert_eq!(
            PageQuery::parse("?view=sales-heatmap").target_view(),
            TargetView::SalesHeatmap
        );
    }

    #[test]
    fn test_navigate_keeps_overrides() {
        let query = PageQuery::parse("?view=trends&data=%2Fsmall.json");
        let next = query.navigate(TargetView::Detail, Some(&RecordFilter::region("North")));
        assert_eq!(next.data.as_deref(), Some("/small.json"));
        assert_eq!(next.region.as_deref(), Some("North"));

        let back = PageQuery::parse(&next.to_search());
        assert_eq!(back, next);

        let plain = next.navigate(TargetView::Trends, None);
        assert_eq!(plain.region, None);
        assert!(plain.to_search().starts_with("?view=trends&data="));
        assert!(!plain.to_search().contains("region"));
    }
}
