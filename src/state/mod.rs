//! Client-side UI state models.
//!
//! DESIGN
//! ======
//! State is plain data so it can be unit-tested natively; the browser page
//! wraps it in signals and mirrors it onto the DOM.

pub mod listing;
pub mod modal;
pub mod request_guard;
