use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::breakdown_table::{BarMetric, BreakdownTable};
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::stat_card::{or_not_available, StatCard};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DASHBOARD};
use contracts::dashboards::d103_trends::TrendsResponse;
use contracts::shared::format::format_inr;
use leptos::prelude::*;

#[component]
pub fn TrendsDashboard() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let records = ctx.snapshot();
    let data = Memo::new(move |_| records.with(|r| TrendsResponse::from_records(r)));

    view! {
        <PageFrame page_id="d103_trends--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader
                title="Market Trends"
                subtitle="Trend analysis of chocolate consumption patterns".to_string()
            >
                {()}
            </PageHeader>

            <div class="stat-grid">
                <StatCard
                    label="Total Revenue"
                    icon_name="trending-up"
                    value=Signal::derive(move || data.with(|d| format!("₹{:.1}K", d.revenue_thousands())))
                />
                <StatCard
                    label="Average Spend"
                    icon_name="wallet"
                    value=Signal::derive(move || or_not_available(data.with(|d| d.average_spend.map(|a| format_inr(a as f64)))))
                />
                <StatCard
                    label="Top Age Group"
                    icon_name="users"
                    value=Signal::derive(move || or_not_available(data.with(|d| d.top_age_group.clone())))
                />
                <StatCard
                    label="Top Channel"
                    icon_name="award"
                    value=Signal::derive(move || or_not_available(data.with(|d| d.top_channel.clone())))
                />
            </div>

            <div class="dashboard-grid">
                <BreakdownTable
                    title="Spending by Age Group"
                    key_label="Age"
                    rows=Signal::derive(move || data.with(|d| d.age_trends.clone()))
                    bar=BarMetric::AverageSpend
                    show_spend=true
                />
                <BreakdownTable
                    title="Brand Performance"
                    key_label="Brand"
                    rows=Signal::derive(move || data.with(|d| d.brand_chart().to_vec()))
                    bar=BarMetric::TotalSpend
                    show_spend=true
                />
                <BreakdownTable
                    title="Channel Performance"
                    key_label="Channel"
                    rows=Signal::derive(move || data.with(|d| d.channel_trends.clone()))
                    bar=BarMetric::TotalSpend
                    show_spend=true
                />
                <BreakdownTable
                    title="Chocolate Type Totals"
                    key_label="Type"
                    rows=Signal::derive(move || data.with(|d| d.family_totals.clone()))
                    bar=BarMetric::TotalSpend
                    show_spend=true
                />
            </div>
        </PageFrame>
    }
}
