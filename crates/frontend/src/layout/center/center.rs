use crate::dashboards::{
    ConsumerInsightsDashboard, DetailDashboard, OverviewDashboard, SalesHeatmapDashboard,
    TrendsDashboard,
};
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::data_state::DataState;
use contracts::shared::analytics::TargetView;
use leptos::prelude::*;

/// Content area: data status banner and the active view.
#[component]
pub fn Center() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();

    let active = move || match ctx.view.get() {
        TargetView::Dashboard => view! { <OverviewDashboard /> }.into_any(),
        TargetView::ConsumerInsights => view! { <ConsumerInsightsDashboard /> }.into_any(),
        TargetView::SalesHeatmap => view! { <SalesHeatmapDashboard /> }.into_any(),
        TargetView::Trends => view! { <TrendsDashboard /> }.into_any(),
        // A detail view without a request shows the overview instead
        TargetView::Detail => match ctx.detail.get() {
            Some(request) => view! { <DetailDashboard request=request /> }.into_any(),
            None => view! { <OverviewDashboard /> }.into_any(),
        },
    };

    view! {
        <div data-zone="center" class="app-content" style="flex: 1; overflow: auto;">
            <DataState />
            {active}
        </div>
    }
}
