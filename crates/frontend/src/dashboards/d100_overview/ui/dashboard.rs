use super::insights::{InsightsPanel, RegionalHeatPanel};
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::breakdown_table::{BarMetric, BreakdownTable};
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::records_table::RecordsTable;
use crate::shared::components::stat_card::{or_not_available, StatCard};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DASHBOARD};
use contracts::dashboards::d104_detail::DetailRequest;
use contracts::dashboards::d100_overview::OverviewResponse;
use contracts::shared::analytics::RecordFilter;
use contracts::shared::format::{format_inr, format_thousands};
use leptos::prelude::*;

#[component]
pub fn OverviewDashboard() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let records = ctx.snapshot();
    let data = Memo::new(move |_| records.with(|r| OverviewResponse::from_records(r)));

    let kpis = move || data.with(|d| d.kpis.clone());

    let open_brand = Callback::new(move |brand: String| {
        ctx.open_detail(DetailRequest {
            title: brand.clone(),
            description: "Brand drill-down".to_string(),
            filter: RecordFilter::brand(brand),
        })
    });
    let open_region = Callback::new(move |region: String| {
        ctx.open_detail(DetailRequest {
            title: format!("{} Region", region),
            description: "Regional drill-down".to_string(),
            filter: RecordFilter::region(region),
        })
    });

    view! {
        <PageFrame page_id="d100_overview--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader
                title="Chocolate Trend Consumption Analyzer"
                subtitle="Analytics from chocolate consumption data".to_string()
            >
                {()}
            </PageHeader>

            <div class="stat-grid">
                <StatCard
                    label="Total Consumers"
                    icon_name="users"
                    value=Signal::derive(move || format_thousands(kpis().total_consumers as i64))
                    subtitle=Signal::derive(move || Some(format!("{} revenue", format_inr(kpis().total_revenue))))
                />
                <StatCard
                    label="Average Spend"
                    icon_name="wallet"
                    value=Signal::derive(move || or_not_available(kpis().average_spend.map(|a| format_inr(a as f64))))
                />
                <StatCard
                    label="Popular Brand"
                    icon_name="award"
                    value=Signal::derive(move || or_not_available(kpis().popular_brand.map(|kv| kv.key)))
                />
                <StatCard
                    label="Top Region"
                    icon_name="map"
                    value=Signal::derive(move || or_not_available(kpis().top_region.map(|kv| kv.key)))
                />
            </div>

            <div class="dashboard-grid">
                <InsightsPanel insights=Signal::derive(move || data.with(|d| d.insights.clone())) />
                <RegionalHeatPanel
                    regions=Signal::derive(move || data.with(|d| d.regional_heat.clone()))
                    on_select=open_region
                />
            </div>

            <div class="dashboard-grid">
                <BreakdownTable
                    title="Brand Preference"
                    key_label="Brand"
                    rows=Signal::derive(move || data.with(|d| d.brand_shares.clone()))
                    bar=BarMetric::Consumers
                    on_select=open_brand
                />
                <BreakdownTable
                    title="Brand Sales"
                    key_label="Brand"
                    rows=Signal::derive(move || data.with(|d| d.brand_sales.clone()))
                    bar=BarMetric::TotalSpend
                    show_spend=true
                    on_select=open_brand
                />
            </div>

            <div class="dashboard-grid">
                <BreakdownTable
                    title="Regional Spending"
                    key_label="Region"
                    rows=Signal::derive(move || data.with(|d| d.regional_spending.clone()))
                    bar=BarMetric::TotalSpend
                    show_spend=true
                    on_select=open_region
                />
                <BreakdownTable
                    title="Chocolate Type Consumption"
                    key_label="Type"
                    rows=Signal::derive(move || data.with(|d| d.families.clone()))
                    bar=BarMetric::TotalSpend
                    show_spend=true
                />
                <BreakdownTable
                    title="Top Occasions"
                    key_label="Occasion"
                    rows=Signal::derive(move || data.with(|d| d.occasions.clone()))
                    bar=BarMetric::Consumers
                />
            </div>

            <RecordsTable records=records />
        </PageFrame>
    }
}
