use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::stat_card::{or_not_available, StatCard};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DASHBOARD};
use contracts::dashboards::d102_sales_heatmap::{HeatCell, SalesHeatmapResponse};
use contracts::shared::format::{format_inr, format_thousands};
use leptos::prelude::*;

fn cell_view(cell: HeatCell) -> AnyView {
    let title = format!(
        "{}: {} from {} consumers ({:.0}% of peak)",
        cell.region,
        format_inr(cell.sales),
        format_thousands(cell.consumers as i64),
        cell.ratio * 100.0
    );
    if cell.is_empty() {
        return view! {
            <td class="heatmap__cell heatmap__cell--empty" title=title>"—"</td>
        }
        .into_any();
    }
    view! {
        <td class="heatmap__cell" style:background-color=cell.color title=title>
            {format_inr(cell.sales)}
        </td>
    }
    .into_any()
}

#[component]
pub fn SalesHeatmapDashboard() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let records = ctx.snapshot();
    let data = Memo::new(move |_| records.with(|r| SalesHeatmapResponse::from_records(r)));

    view! {
        <PageFrame page_id="d102_sales_heatmap--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader
                title="Sales Heatmap Analytics"
                subtitle="Sales performance across brands and regions".to_string()
            >
                {()}
            </PageHeader>

            <div class="stat-grid">
                <StatCard
                    label="Total Sales"
                    icon_name="trending-up"
                    value=Signal::derive(move || data.with(|d| format_inr(d.total_sales)))
                />
                <StatCard
                    label="Top Brand"
                    icon_name="award"
                    value=Signal::derive(move || or_not_available(data.with(|d| d.top_brand.clone())))
                />
                <StatCard
                    label="Active Brands"
                    icon_name="layout-dashboard"
                    value=Signal::derive(move || data.with(|d| d.active_brands().to_string()))
                />
                <StatCard
                    label="Market Coverage"
                    icon_name="map"
                    value=Signal::derive(move || data.with(|d| format!("{} Regions", d.regions.len())))
                />
            </div>

            <div class="card">
                <h3 class="card__title">"Brand Performance Heatmap"</h3>
                {move || data.with(|d| {
                    if d.rows.is_empty() {
                        return view! { <div class="breakdown__empty">"No data"</div> }.into_any();
                    }
                    view! {
                        <table class="heatmap">
                            <thead>
                                <tr>
                                    <th>"Brand"</th>
                                    {d.regions.iter().map(|r| view! { <th>{r.clone()}</th> }).collect_view()}
                                    <th>"Total"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {d.rows.iter().map(|row| view! {
                                    <tr>
                                        <td class="heatmap__brand">{row.brand.clone()}</td>
                                        {row.cells.iter().cloned().map(cell_view).collect_view()}
                                        <td class="heatmap__total">{format_inr(row.total)}</td>
                                    </tr>
                                }).collect_view()}
                            </tbody>
                        </table>
                    }.into_any()
                })}
                <div class="heatmap__legend">
                    <span>"Sales Intensity:"</span>
                    {move || data.with(|d| d.legend.iter().map(|item| view! {
                        <span class="heatmap__legend-item">
                            <span class="heatmap__swatch" style:background-color=item.color.clone()></span>
                            {item.label.clone()}
                        </span>
                    }).collect_view())}
                </div>
            </div>

            <div class="dashboard-grid">
                <div class="card">
                    <h3 class="card__title">"Top Performers"</h3>
                    {move || data.with(|d| d.top_performers.iter().enumerate().map(|(i, kv)| view! {
                        <div class="rank-row">
                            <span class="rank-row__place">{format!("#{}", i + 1)}</span>
                            <span class="rank-row__name">{kv.key.clone()}</span>
                            <span class="rank-row__value">{format_inr(kv.value)}</span>
                        </div>
                    }).collect_view())}
                </div>
                <div class="card">
                    <h3 class="card__title">"Regional Leaders"</h3>
                    {move || data.with(|d| d.regional_leaders.iter().map(|leader| view! {
                        <div class="rank-row">
                            <span class="rank-row__name">{leader.region.clone()}</span>
                            <span class="rank-row__value">{leader.brand.clone()}</span>
                        </div>
                    }).collect_view())}
                </div>
            </div>
        </PageFrame>
    }
}
