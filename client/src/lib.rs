//! # client
//!
//! Leptos + WASM front-end for the Campfire camping marketplace.
//!
//! This crate owns the client-side session: it validates the backend session
//! on load, keeps a single reactive `Session` for every page, logs out idle
//! users, and gates routes by role, by auth-flow progress, and (for Travel
//! Buddy) by a per-user remote feature flag. The backend remains the
//! authority on every request; these checks only decide what to render.

pub mod app;
pub mod components;
pub mod config;
pub mod guard;
pub mod net;
pub mod pages;
pub mod paths;
pub mod session;
pub mod state;
pub mod travel_buddy;

/// WASM entry point: hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
