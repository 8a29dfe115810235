use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::breakdown_table::{BarMetric, BreakdownTable};
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::stat_card::{or_not_available, StatCard};
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DETAIL};
use contracts::dashboards::d104_detail::{DetailRequest, DetailResponse};
use contracts::shared::analytics::TargetView;
use contracts::shared::format::{format_inr, format_thousands};
use leptos::prelude::*;

/// Drill-down analytics of the records matching `request.filter`.
#[component]
pub fn DetailDashboard(request: DetailRequest) -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let records = ctx.snapshot();
    let filter = request.filter.clone();
    let data = Memo::new(move |_| records.with(|r| DetailResponse::from_records(r, &filter)));

    let subtitle = if request.description.is_empty() {
        None
    } else {
        Some(request.description.clone())
    };

    view! {
        <PageFrame page_id="d104_detail--detail" category=PAGE_CAT_DETAIL>
            <PageHeader title=format!("{} - Detailed Analytics", request.title) subtitle=subtitle>
                <button class="back-btn" on:click=move |_| ctx.open_view(TargetView::Dashboard)>
                    {icon("arrow-left")}
                    "Back"
                </button>
            </PageHeader>

            <Show
                when=move || !data.with(|d| d.is_empty())
                fallback=|| view! { <div class="data-state data-state--empty">"No records match this selection"</div> }
            >
                <div class="stat-grid">
                    <StatCard
                        label="Total Revenue"
                        icon_name="trending-up"
                        value=Signal::derive(move || data.with(|d| format_inr(d.total_revenue)))
                    />
                    <StatCard
                        label="Total Consumers"
                        icon_name="users"
                        value=Signal::derive(move || data.with(|d| format_thousands(d.total_consumers as i64)))
                    />
                    <StatCard
                        label="Average Spend"
                        icon_name="wallet"
                        value=Signal::derive(move || or_not_available(data.with(|d| d.average_spend.map(|a| format_inr(a as f64)))))
                    />
                </div>

                <div class="dashboard-grid">
                    <BreakdownTable
                        title="Regional Revenue"
                        key_label="Region"
                        rows=Signal::derive(move || data.with(|d| d.regions.clone()))
                        bar=BarMetric::TotalSpend
                        show_spend=true
                    />
                    <BreakdownTable
                        title="Age Distribution"
                        key_label="Age"
                        rows=Signal::derive(move || data.with(|d| d.age_groups.clone()))
                        bar=BarMetric::Consumers
                    />
                    <BreakdownTable
                        title="Gender Distribution"
                        key_label="Gender"
                        rows=Signal::derive(move || data.with(|d| d.genders.clone()))
                        bar=BarMetric::Consumers
                    />
                    <BreakdownTable
                        title="Channel Performance"
                        key_label="Channel"
                        rows=Signal::derive(move || data.with(|d| d.channels.clone()))
                        bar=BarMetric::TotalSpend
                        show_spend=true
                    />
                    <BreakdownTable
                        title="Brand Revenue"
                        key_label="Brand"
                        rows=Signal::derive(move || data.with(|d| d.brands.clone()))
                        bar=BarMetric::TotalSpend
                        show_spend=true
                    />
                </div>
            </Show>
        </PageFrame>
    }
}
