//! Networking modules for the storefront endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` defines the transport seam and wire request/response shapes,
//! `csrf` reads the anti-forgery token from the cookie jar, `api` builds the
//! endpoint calls on top of both, and `types` holds the JSON payloads.

pub mod api;
pub mod csrf;
pub mod http;
pub mod types;
