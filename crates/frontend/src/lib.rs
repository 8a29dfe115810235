pub mod app;
pub mod dashboards;
pub mod layout;
pub mod shared;

use leptos::prelude::*;
use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();

    let config = match shared::config::load_page_config() {
        Ok(config) => config,
        Err(e) => {
            _ = console_log::init_with_level(log::Level::Error);
            log::error!("Failed to load config: {:#}", e);
            return;
        }
    };

    // initializes logging using the `log` crate
    _ = console_log::init_with_level(config.log_level());

    leptos::mount::mount_to_body(move || view! { <app::App config=config /> });
}

#[wasm_bindgen(start)]
pub fn start() {
    hydrate();
}
