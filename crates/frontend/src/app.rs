use crate::layout::global_context::AppGlobalContext;
use crate::layout::Shell;
use crate::shared::config::AppConfig;
use crate::shared::data::{HttpRecordSource, RecordStore};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let ctx = AppGlobalContext::new();
    provide_context(ctx);

    let store = RecordStore::new(HttpRecordSource::new(config.data.url.clone()));
    provide_context(config);

    // Restore `?view=` and start mirroring navigation into the URL
    ctx.init_router_integration();

    spawn_local(async move {
        let loaded = store.records().await;
        ctx.records.set(Some(loaded));
    });

    view! { <Shell /> }
}
