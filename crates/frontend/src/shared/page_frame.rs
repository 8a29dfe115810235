//! PageFrame: standard root wrapper for every dashboard view.
//!
//! Sets `id="{view}--dashboard"` and `data-page-category` on the root element
//! so a view can be found from the DOM inspector.

use leptos::prelude::*;

/// Analytical dashboard view.
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// Drill-down view of a record subset.
pub const PAGE_CAT_DETAIL: &str = "detail";

#[component]
pub fn PageFrame(
    /// HTML id in format `{view}--{category}`, e.g. `"d102_sales_heatmap--dashboard"`.
    page_id: &'static str,
    /// One of the PAGE_CAT_* constants.
    category: &'static str,
    children: Children,
) -> impl IntoView {
    let class = match category {
        PAGE_CAT_DETAIL => "page page--detail",
        _ => "page page--dashboard",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            {children()}
        </div>
    }
}
