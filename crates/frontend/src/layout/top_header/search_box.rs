use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use contracts::shared::analytics::{build_index, query, SearchAggregates, SearchEntry};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// Hits shown in the dropdown
const MAX_RESULTS: usize = 8;
const DEBOUNCE_MS: u32 = 200;

/// Wrap case-insensitive occurrences of `needle` in a highlight span.
pub fn highlight_matches(text: &str, needle: &str) -> AnyView {
    let needle = needle.trim().to_lowercase();
    let text_lower = text.to_lowercase();
    // Lowercasing changed byte offsets; byte slicing would be wrong
    if needle.is_empty() || text_lower.len() != text.len() || !text_lower.contains(&needle) {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let mut parts: Vec<AnyView> = Vec::new();
    let mut last_pos = 0;
    while let Some(pos) = text_lower[last_pos..].find(&needle) {
        let start = last_pos + pos;
        let end = start + needle.len();
        if start > last_pos {
            parts.push(view! { <span>{text[last_pos..start].to_string()}</span> }.into_any());
        }
        parts.push(view! { <mark class="search__match">{text[start..end].to_string()}</mark> }.into_any());
        last_pos = end;
    }
    if last_pos < text.len() {
        parts.push(view! { <span>{text[last_pos..].to_string()}</span> }.into_any());
    }

    view! { <>{parts}</> }.into_any()
}

#[component]
pub fn SearchBox() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();

    let (input_value, set_input_value) = signal(String::new());
    let (needle, set_needle) = signal(String::new());
    let debounce = StoredValue::new_local(None::<Timeout>);

    // Rebuilt only when the snapshot changes
    let index = Memo::new(move |_| {
        ctx.records.with(|loaded| match loaded {
            Some(loaded) => build_index(&SearchAggregates::from_records(&loaded.records)),
            None => Vec::new(),
        })
    });

    let results = Memo::new(move |_| {
        let text = needle.get();
        index.with(|index| {
            let mut hits = query(index, &text);
            hits.truncate(MAX_RESULTS);
            hits
        })
    });

    let on_input = move |value: String| {
        set_input_value.set(value.clone());
        // Dropping the pending timeout cancels it
        let timeout = Timeout::new(DEBOUNCE_MS, move || set_needle.set(value));
        debounce.set_value(Some(timeout));
    };

    let clear = move || {
        debounce.set_value(None);
        set_input_value.set(String::new());
        set_needle.set(String::new());
    };

    let select = move |entry: SearchEntry| {
        log::debug!("search hit selected: {}", entry.title);
        ctx.open_entry(&entry);
        clear();
    };

    view! {
        <div class="search">
            <div class="search__field">
                {icon("search")}
                <input
                    type="text"
                    class="search__input"
                    placeholder="Search brands, regions, insights..."
                    prop:value=move || input_value.get()
                    on:input=move |ev| on_input(event_target_value(&ev))
                    on:keydown=move |ev| {
                        if ev.key() == "Escape" {
                            clear();
                        }
                    }
                />
                <Show when=move || !input_value.get().is_empty()>
                    <button class="search__clear" on:click=move |_| clear() title="Clear">
                        {icon("x")}
                    </button>
                </Show>
            </div>

            <Show when=move || !needle.get().trim().is_empty()>
                <div class="search__results">
                    {move || {
                        let hits = results.get();
                        if hits.is_empty() {
                            return view! { <div class="search__empty">"No matches"</div> }.into_any();
                        }
                        let text = needle.get();
                        hits.into_iter()
                            .map(|entry| {
                                let title = highlight_matches(&entry.title, &text);
                                let category = entry.category.label();
                                let description = entry.description.clone();
                                view! {
                                    <div class="search__item" on:click=move |_| select(entry.clone())>
                                        <div class="search__item-title">{title}</div>
                                        <div class="search__item-meta">
                                            <span class="search__item-category">{category}</span>
                                            <span>{description}</span>
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                </div>
            </Show>
        </div>
    }
}
