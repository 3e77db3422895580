//! Well Map Web App (Leptos + WASM + Leaflet)

mod app;
mod api;
mod components;
mod config;
mod map;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Well Map 起動");
    leptos::mount::mount_to_body(app::App);
}
