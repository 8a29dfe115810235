use contracts::dashboards::common::BreakdownRow;
use contracts::shared::analytics::compute_intensity;
use contracts::shared::format::{format_inr, format_percent, format_thousands};
use leptos::prelude::*;

/// Column the inline bars are scaled by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarMetric {
    Consumers,
    TotalSpend,
    AverageSpend,
}

impl BarMetric {
    fn value(&self, row: &BreakdownRow) -> f64 {
        match self {
            BarMetric::Consumers => row.consumers as f64,
            BarMetric::TotalSpend => row.total_spend,
            BarMetric::AverageSpend => row.average_spend.unwrap_or(0) as f64,
        }
    }
}

/// Bar width per row in whole percent of the largest row.
pub fn bar_percents(rows: &[BreakdownRow], metric: BarMetric) -> Vec<u32> {
    let values: Vec<(&str, f64)> = rows
        .iter()
        .map(|row| (row.key.as_str(), metric.value(row)))
        .collect();
    compute_intensity(&values)
        .entries
        .iter()
        .map(|e| e.percent())
        .collect()
}

#[component]
pub fn BreakdownTable(
    title: &'static str,
    /// Header of the key column
    key_label: &'static str,
    #[prop(into)]
    rows: Signal<Vec<BreakdownRow>>,
    bar: BarMetric,
    /// Show total and average spend columns
    #[prop(optional)]
    show_spend: bool,
    /// Called with the row key when a row is clicked
    #[prop(optional)]
    on_select: Option<Callback<String>>,
) -> impl IntoView {
    view! {
        <div class="card breakdown">
            <h3 class="card__title">{title}</h3>
            {move || {
                let rows = rows.get();
                if rows.is_empty() {
                    return view! { <div class="breakdown__empty">"No data"</div> }.into_any();
                }
                let widths = bar_percents(&rows, bar);
                view! {
                    <table class="breakdown__table">
                        <thead>
                            <tr>
                                <th>{key_label}</th>
                                <th class="num">"Consumers"</th>
                                <th class="num">"Share"</th>
                                {show_spend.then(|| view! {
                                    <th class="num">"Total Spend"</th>
                                    <th class="num">"Avg Spend"</th>
                                })}
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {rows.into_iter().zip(widths).map(|(row, width)| {
                                let key = row.key.clone();
                                let average = row
                                    .average_spend
                                    .map(|a| format_inr(a as f64))
                                    .unwrap_or_else(|| "N/A".to_string());
                                view! {
                                    <tr
                                        class:breakdown__row--link=on_select.is_some()
                                        on:click=move |_| {
                                            if let Some(cb) = on_select {
                                                cb.run(key.clone());
                                            }
                                        }
                                    >
                                        <td>{row.key.clone()}</td>
                                        <td class="num">{format_thousands(row.consumers as i64)}</td>
                                        <td class="num">{format_percent(row.share_percent)}</td>
                                        {show_spend.then(|| view! {
                                            <td class="num">{format_inr(row.total_spend)}</td>
                                            <td class="num">{average.clone()}</td>
                                        })}
                                        <td class="breakdown__bar-cell">
                                            <div class="breakdown__bar" style:width=format!("{}%", width)></div>
                                        </td>
                                    </tr>
                                }
                            }).collect_view()}
                        </tbody>
                    </table>
                }.into_any()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(key: &str, consumers: u64, total_spend: f64) -> BreakdownRow {
        BreakdownRow {
            key: key.to_string(),
            consumers,
            share_percent: 0.0,
            total_spend,
            average_spend: None,
        }
    }

    #[test]
    fn test_bar_percents() {
        let rows = vec![row("a", 4, 100.0), row("b", 1, 400.0), row("c", 2, 0.0)];
        assert_eq!(bar_percents(&rows, BarMetric::Consumers), vec![100, 25, 50]);
        assert_eq!(bar_percents(&rows, BarMetric::TotalSpend), vec![25, 100, 0]);
        assert_eq!(bar_percents(&rows, BarMetric::AverageSpend), vec![0, 0, 0]);
    }
}
