use crate::shared::data::LoadedRecords;
use crate::shared::query::PageQuery;
use contracts::dashboards::d104_detail::DetailRequest;
use contracts::shared::analytics::{RecordFilter, SearchEntry, TargetView};
use contracts::shared::consumer::ConsumerRecord;
use leptos::prelude::*;
use std::sync::Arc;
use web_sys::window;

/// App-wide UI state shared through context.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub view: RwSignal<TargetView>,
    /// Set while the detail view is open
    pub detail: RwSignal<Option<DetailRequest>>,
    pub left_open: RwSignal<bool>,
    /// `None` until the first load finished
    pub records: RwSignal<Option<LoadedRecords>>,
    query: StoredValue<PageQuery>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            view: RwSignal::new(TargetView::Dashboard),
            detail: RwSignal::new(None),
            left_open: RwSignal::new(true),
            records: RwSignal::new(None),
            query: StoredValue::new(PageQuery::default()),
        }
    }

    /// Restore the view from `?view=` and keep the URL in sync afterwards.
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let query = PageQuery::parse(&search);
        let view = query.target_view();
        if view == TargetView::Detail {
            self.detail.set(Some(detail_request_for(&query.filter())));
        }
        self.view.set(view);
        self.query.set_value(query);

        let this = *self;
        Effect::new(move |_| {
            let view = this.view.get();
            let filter = this.detail.with(|d| d.as_ref().map(|d| d.filter.clone()));
            let next = this
                .query
                .with_value(|q| q.navigate(view, filter.as_ref()));
            let new_url = next.to_search();
            this.query.set_value(next);

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();

            if current_search != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });
    }

    pub fn open_view(&self, view: TargetView) {
        log::debug!("open_view: {}", view.slug());
        if view != TargetView::Detail {
            self.detail.set(None);
        }
        self.view.set(view);
    }

    /// Drill down into the records matching `request.filter`.
    pub fn open_detail(&self, request: DetailRequest) {
        log::debug!("open_detail: {:?}", request.filter);
        self.detail.set(Some(request));
        self.view.set(TargetView::Detail);
    }

    /// Navigate to the view a search hit points at.
    pub fn open_entry(&self, entry: &SearchEntry) {
        match entry.payload.filter() {
            Some(filter) => self.open_detail(DetailRequest {
                title: entry.title.clone(),
                description: entry.description.clone(),
                filter,
            }),
            None => self.open_view(entry.target_view),
        }
    }

    /// Loaded records; empty while loading or after a failed load.
    pub fn snapshot(&self) -> Signal<Arc<[ConsumerRecord]>> {
        let records = self.records;
        Signal::derive(move || {
            records.with(|loaded| match loaded {
                Some(loaded) => loaded.records.clone(),
                None => Arc::from(Vec::new()),
            })
        })
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Title for a drill-down restored from the URL.
pub fn detail_request_for(filter: &RecordFilter) -> DetailRequest {
    let title = match (&filter.brand, &filter.region) {
        (Some(brand), Some(region)) => format!("{} in {}", brand, region),
        (Some(brand), None) => brand.clone(),
        (None, Some(region)) => format!("{} Region", region),
        (None, None) => "All Consumers".to_string(),
    };
    DetailRequest {
        title,
        description: String::new(),
        filter: filter.clone(),
    }
}
