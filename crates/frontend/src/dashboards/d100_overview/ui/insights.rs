use crate::shared::icons::icon;
use contracts::dashboards::d100_overview::{Insight, InsightKind, RegionHeat};
use contracts::shared::format::{format_inr, format_thousands};
use leptos::prelude::*;

fn kind_icon(kind: InsightKind) -> &'static str {
    match kind {
        InsightKind::Rising => "trending-up",
        InsightKind::Insight => "sparkles",
        InsightKind::Alert => "alert-circle",
        InsightKind::Prediction => "smile",
    }
}

fn kind_class(kind: InsightKind) -> &'static str {
    match kind {
        InsightKind::Rising => "insight insight--rising",
        InsightKind::Insight => "insight insight--insight",
        InsightKind::Alert => "insight insight--alert",
        InsightKind::Prediction => "insight insight--prediction",
    }
}

#[component]
pub fn InsightsPanel(#[prop(into)] insights: Signal<Vec<Insight>>) -> impl IntoView {
    view! {
        <div class="card">
            <h3 class="card__title">"AI Insights"</h3>
            {move || insights.get().into_iter().map(|insight| view! {
                <div class=kind_class(insight.kind)>
                    <div class="insight__icon">{icon(kind_icon(insight.kind))}</div>
                    <div>
                        <div class="insight__title">{insight.title}</div>
                        <div class="insight__description">{insight.description}</div>
                    </div>
                </div>
            }).collect_view()}
        </div>
    }
}

#[component]
pub fn RegionalHeatPanel(
    #[prop(into)] regions: Signal<Vec<RegionHeat>>,
    on_select: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="card">
            <h3 class="card__title">"Regional Heatmap"</h3>
            <div class="heat-grid">
                {move || regions.get().into_iter().map(|heat| {
                    let region = heat.region.clone();
                    view! {
                        <div
                            class="heat-grid__cell"
                            style:background-color=heat.intensity.color.clone()
                            on:click=move |_| on_select.run(region.clone())
                        >
                            <div class="heat-grid__name">{heat.region.clone()}</div>
                            <div class="heat-grid__value">{format_inr(heat.sales)}</div>
                            <div class="heat-grid__meta">
                                {format!(
                                    "{}% intensity, {} consumers",
                                    heat.intensity.percent(),
                                    format_thousands(heat.consumers as i64)
                                )}
                            </div>
                        </div>
                    }
                }).collect_view()}
            </div>
        </div>
    }
}
