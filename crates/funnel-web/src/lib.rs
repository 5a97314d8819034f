//! Starter funnel web front end
//!
//! Leptos-based WASM landing page with the two-step lead dialog.

mod api;
mod app;
mod components;
mod pages;

pub use app::App;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
