use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use leptos::prelude::*;

/// Loading and failure banner above the active view.
#[component]
pub fn DataState() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();

    move || {
        ctx.records.with(|loaded| match loaded {
            None => view! {
                <div class="data-state data-state--loading">"Loading data…"</div>
            }
            .into_any(),
            Some(loaded) => match &loaded.error {
                Some(e) => {
                    let message = e.to_string();
                    view! {
                        <div class="data-state data-state--error">
                            {icon("alert-circle")}
                            <strong>"Data unavailable: "</strong>
                            {message}
                        </div>
                    }
                    .into_any()
                }
                None if loaded.is_empty() => view! {
                    <div class="data-state data-state--empty">"The dataset contains no records"</div>
                }
                .into_any(),
                None => view! { <></> }.into_any(),
            },
        })
    }
}
