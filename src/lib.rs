//! # site-enhance
//!
//! Leptos + WASM enhancement layer for a static marketing site: smooth
//! in-page scrolling, scroll-spy nav highlighting, reveal-on-scroll
//! animations, a validated contact form with a simulated send, a persisted
//! dark-mode toggle, lazy-image fade-in and toast notifications.
//!
//! Behavior logic compiles natively and is unit tested without a browser;
//! the `csr` feature adds the web-sys bindings and the wasm start function.

pub mod app;
pub mod behaviors;
pub mod components;
pub mod config;
pub mod error;
pub mod styles;
pub mod util;

/// Wasm entry point: logging, panic hook, then `app::boot`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    // Async submit handlers are spawned before or without any mounted view.
    let _ = leptos::task::Executor::init_wasm_bindgen();

    if let Err(e) = app::boot() {
        leptos::logging::warn!("site enhancements disabled: {e}");
    }
}
