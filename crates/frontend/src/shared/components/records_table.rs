use super::pagination_controls::{page_range, total_pages, PaginationControls};
use contracts::shared::consumer::ConsumerRecord;
use contracts::shared::format::format_inr;
use leptos::prelude::*;
use std::sync::Arc;

const PAGE_SIZE: usize = 25;

fn cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "—".to_string())
}

/// Raw survey rows, paged.
#[component]
pub fn RecordsTable(#[prop(into)] records: Signal<Arc<[ConsumerRecord]>>) -> impl IntoView {
    let (page, set_page) = signal(0usize);
    let total_count = Signal::derive(move || records.with(|r| r.len()));
    let pages = Signal::derive(move || total_pages(total_count.get(), PAGE_SIZE));

    // Back to the first page when the snapshot changes
    Effect::new(move |_| {
        records.track();
        set_page.set(0);
    });

    view! {
        <div class="card records">
            <h3 class="card__title">"Consumer Records"</h3>
            <table class="records__table">
                <thead>
                    <tr>
                        <th class="num">"Age"</th>
                        <th>"Gender"</th>
                        <th>"Region"</th>
                        <th>"Brand"</th>
                        <th class="num">"Spend"</th>
                        <th class="num">"Satisfaction"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        records.with(|records| {
                            let range = page_range(records.len(), page.get(), PAGE_SIZE);
                            records[range]
                                .iter()
                                .map(|r| {
                                    view! {
                                        <tr>
                                            <td class="num">{r.age.map(|a| a.to_string()).unwrap_or_default()}</td>
                                            <td>{cell(&r.gender)}</td>
                                            <td>{cell(&r.region)}</td>
                                            <td>{cell(&r.brand_preference)}</td>
                                            <td class="num">{r.average_spend_inr.map(format_inr).unwrap_or_default()}</td>
                                            <td class="num">{r.satisfaction_score.map(|s| format!("{:.1}", s)).unwrap_or_default()}</td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        })
                    }}
                </tbody>
            </table>
            <PaginationControls
                current_page=page
                total_pages=pages
                total_count=total_count
                on_page_change=Callback::new(move |p| set_page.set(p))
            />
        </div>
    }
}
