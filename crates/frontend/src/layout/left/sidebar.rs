//! Sidebar navigation between the dashboard views.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::config::AppConfig;
use crate::shared::icons::icon;
use contracts::shared::analytics::TargetView;
use contracts::shared::format::format_thousands;
use leptos::prelude::*;

/// (view, icon)
const MENU_ITEMS: [(TargetView, &str); 4] = [
    (TargetView::Dashboard, "layout-dashboard"),
    (TargetView::Trends, "trending-up"),
    (TargetView::ConsumerInsights, "users"),
    (TargetView::SalesHeatmap, "map"),
];

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let config = expect_context::<AppConfig>();

    let data_status = move || {
        ctx.records.with(|loaded| match loaded {
            None => "Loading data…".to_string(),
            Some(loaded) if loaded.error.is_some() => "Data unavailable".to_string(),
            Some(loaded) => format!("{} records", format_thousands(loaded.records.len() as i64)),
        })
    };

    view! {
        <div class="app-sidebar__content">
            {MENU_ITEMS
                .iter()
                .map(|(view, icon_name)| {
                    let view = *view;
                    view! {
                        <div
                            class="app-sidebar__item"
                            class:app-sidebar__item--active=move || ctx.view.get() == view
                            style:padding-left="12px"
                            on:click=move |_| ctx.open_view(view)
                        >
                            <div class="app-sidebar__item-content">
                                {icon(icon_name)}
                                <span>{view.title()}</span>
                            </div>
                        </div>
                    }
                })
                .collect_view()}

            <div class="app-sidebar__footer" title=config.data.url.clone()>
                {icon("database")}
                <span>{data_status}</span>
            </div>
        </div>
    }
}
