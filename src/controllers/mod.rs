//! Event-level behavior for the storefront page.
//!
//! Each public controller method corresponds to one user gesture and issues
//! at most one request.

pub mod auth;
pub mod catalog;
