//! # nafas
//!
//! Leptos + WASM client for the Nafas recovery and reflection community.
//!
//! This crate contains the routed pages, the navigation chrome, the session
//! gate that decides what a visitor may see, and the magic-link auth client.
//! Browser-only code sits behind the `csr` feature; the rest builds and tests
//! natively.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;

/// WASM entry point: install console logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    let _ = console_log::init_with_level(level);
    log::info!("nafas {} starting", env!("CARGO_PKG_VERSION"));
    leptos::mount::mount_to_body(app::App);
}
