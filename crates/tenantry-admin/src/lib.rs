//! Tenantry Admin UI
//!
//! A Leptos-based console for tenant branding, platform settings, users
//! and billing.

pub mod api;
pub mod app;
pub mod components;
pub mod pages;

use wasm_bindgen::prelude::*;

/// Initialize and mount the Leptos application
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    let _ = console_log::init_with_level(log::Level::Debug);

    log::info!("Tenantry console {} starting...", tenantry_core::VERSION);

    leptos::mount_to_body(app::App);
}
