use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::breakdown_table::{BarMetric, BreakdownTable};
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::stat_card::{or_not_available, StatCard};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DASHBOARD};
use contracts::dashboards::common::BreakdownRow;
use contracts::dashboards::d101_consumer_insights::{
    ConsumerInsightsResponse, RegionBrandMix, SatisfactionBar,
};
use contracts::shared::format::{format_inr, format_percent, format_thousands};
use leptos::prelude::*;

type Pick = fn(&ConsumerInsightsResponse) -> &Vec<BreakdownRow>;

fn breakdown_signal(data: Memo<ConsumerInsightsResponse>, pick: Pick) -> Signal<Vec<BreakdownRow>> {
    Signal::derive(move || data.with(|d| pick(d).clone()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InsightsTab {
    Demographics,
    Behavior,
}

#[component]
fn SatisfactionChart(#[prop(into)] bars: Signal<Vec<SatisfactionBar>>) -> impl IntoView {
    view! {
        <div class="card">
            <h3 class="card__title">"Satisfaction Scores"</h3>
            {move || {
                let bars = bars.get();
                let max = bars.iter().map(|b| b.consumers).max().unwrap_or(0).max(1);
                bars.into_iter().map(|bar| {
                    let width = bar.consumers * 100 / max;
                    view! {
                        <div class="hbar">
                            <span class="hbar__label">{format!("{} ★", bar.score)}</span>
                            <div class="hbar__track">
                                <div class="hbar__fill" style:width=format!("{}%", width)></div>
                            </div>
                            <span class="hbar__value">{format_thousands(bar.consumers as i64)}</span>
                        </div>
                    }
                }).collect_view()
            }}
        </div>
    }
}

#[component]
fn BrandMixTable(#[prop(into)] mix: Signal<Vec<RegionBrandMix>>) -> impl IntoView {
    view! {
        <div class="card">
            <h3 class="card__title">"Brand Preference by Region"</h3>
            {move || mix.get().into_iter().map(|region| view! {
                <div class="brand-mix">
                    <div class="brand-mix__region">{region.region}</div>
                    <div class="brand-mix__brands">
                        {region.brands.into_iter().map(|kv| view! {
                            <span class="brand-mix__brand">
                                {format!("{} {}", kv.key, format_percent(kv.value * 100.0))}
                            </span>
                        }).collect_view()}
                    </div>
                </div>
            }).collect_view()}
        </div>
    }
}

#[component]
pub fn ConsumerInsightsDashboard() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let records = ctx.snapshot();
    let data = Memo::new(move |_| records.with(|r| ConsumerInsightsResponse::from_records(r)));
    let (tab, set_tab) = signal(InsightsTab::Demographics);

    let highlights = move || data.with(|d| d.highlights.clone());
    let rows = move |pick: Pick| breakdown_signal(data, pick);

    view! {
        <PageFrame page_id="d101_consumer_insights--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader
                title="Consumer Insights"
                subtitle="Who buys chocolate, where, and why".to_string()
            >
                <button
                    class="tab-btn"
                    class:tab-btn--active=move || tab.get() == InsightsTab::Demographics
                    on:click=move |_| set_tab.set(InsightsTab::Demographics)
                >
                    "Demographics"
                </button>
                <button
                    class="tab-btn"
                    class:tab-btn--active=move || tab.get() == InsightsTab::Behavior
                    on:click=move |_| set_tab.set(InsightsTab::Behavior)
                >
                    "Behavior"
                </button>
            </PageHeader>

            <div class="stat-grid">
                <StatCard
                    label="Top Region"
                    icon_name="map"
                    value=Signal::derive(move || or_not_available(highlights().top_region.map(|kv| kv.key)))
                    subtitle=Signal::derive(move || {
                        let h = highlights();
                        h.top_region_share.map(|share| {
                            format!(
                                "{} of consumers, avg {}",
                                format_percent(share),
                                or_not_available(h.top_region_average_spend.map(|a| format_inr(a as f64)))
                            )
                        })
                    })
                />
                <StatCard
                    label="Top Channel"
                    icon_name="wallet"
                    value=Signal::derive(move || or_not_available(highlights().top_channel.map(|kv| kv.key)))
                />
                <StatCard
                    label="Common Mood"
                    icon_name="smile"
                    value=Signal::derive(move || or_not_available(highlights().top_mood.map(|kv| kv.key)))
                />
                <StatCard
                    label="Top Occasion"
                    icon_name="sparkles"
                    value=Signal::derive(move || or_not_available(highlights().top_occasion.map(|kv| kv.key)))
                />
            </div>

            <Show
                when=move || tab.get() == InsightsTab::Demographics
                fallback=move || view! {
                    <div class="dashboard-grid">
                        <BreakdownTable
                            title="Purchase Frequency"
                            key_label="Frequency"
                            rows=rows(|d| &d.frequencies)
                            bar=BarMetric::Consumers
                        />
                        <BreakdownTable
                            title="Occasions"
                            key_label="Occasion"
                            rows=rows(|d| &d.occasions)
                            bar=BarMetric::Consumers
                        />
                        <BreakdownTable
                            title="Mood"
                            key_label="Mood"
                            rows=rows(|d| &d.moods)
                            bar=BarMetric::Consumers
                        />
                        <BreakdownTable
                            title="Purchase Channel"
                            key_label="Channel"
                            rows=rows(|d| &d.channels)
                            bar=BarMetric::TotalSpend
                            show_spend=true
                        />
                        <SatisfactionChart bars=Signal::derive(move || data.with(|d| d.satisfaction.clone())) />
                    </div>
                }
            >
                <div class="dashboard-grid">
                    <BreakdownTable
                        title="Age Groups"
                        key_label="Age"
                        rows=rows(|d| &d.age_groups)
                        bar=BarMetric::AverageSpend
                        show_spend=true
                    />
                    <BreakdownTable
                        title="Gender"
                        key_label="Gender"
                        rows=rows(|d| &d.genders)
                        bar=BarMetric::Consumers
                    />
                    <BreakdownTable
                        title="Regional Spending"
                        key_label="Region"
                        rows=rows(|d| &d.regions)
                        bar=BarMetric::AverageSpend
                        show_spend=true
                    />
                    <BreakdownTable
                        title="Brands"
                        key_label="Brand"
                        rows=rows(|d| &d.brands)
                        bar=BarMetric::Consumers
                    />
                    <BrandMixTable mix=Signal::derive(move || data.with(|d| d.brand_mix.clone())) />
                </div>
            </Show>
        </PageFrame>
    }
}
