//! # market-ui
//!
//! WASM controllers for the storefront's server-rendered pages: login and
//! signup dialogs, CSRF-protected form posts, and the listing detail dialog.
//!
//! The crate binds to markup the server already rendered instead of owning
//! the view tree. Elements are resolved once at startup into explicit
//! bindings (`page::dom`) and handed to the controllers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `controllers` hold the behavior and talk to three seams: `page::Page`
//! (DOM surface), `net::http::Transport` (one HTTP exchange) and
//! `net::csrf::CookieSource` (cookie string). Browser implementations of the
//! seams are compiled only with the `hydrate` feature; native builds keep the
//! pure logic so it can be tested without a browser.

pub mod config;
pub mod controllers;
pub mod net;
pub mod page;
pub mod state;

#[cfg(feature = "hydrate")]
mod wiring;

#[cfg(test)]
mod test_support;

/// WASM entry point: resolve page bindings and attach the controllers.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    wiring::install();
}
