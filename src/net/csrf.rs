//! CSRF token lookup.
//!
//! The token is read from the cookie jar on every call; nothing is cached so
//! a rotated cookie takes effect on the very next request. An absent cookie
//! yields an empty token and the server rejects the request.

#[cfg(test)]
#[path = "csrf_test.rs"]
mod csrf_test;

use percent_encoding::percent_decode_str;

/// Source of the raw `document.cookie` string.
pub trait CookieSource {
    fn cookie_string(&self) -> String;
}

/// Find cookie `name` in a `document.cookie` string and URL-decode its value.
///
/// Matches the first `name=value` pair that starts the string or follows
/// `"; "`. The value runs up to the next `;` and must be non-empty. Percent
/// escapes are decoded; `+` is kept as-is. Returns an empty string when no
/// pair matches.
#[must_use]
pub fn cookie_value(cookies: &str, name: &str) -> String {
    cookies
        .split("; ")
        .filter_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
        .map(|rest| rest.split(';').next().unwrap_or_default())
        .find(|value| !value.is_empty())
        .map(|value| percent_decode_str(value).decode_utf8_lossy().into_owned())
        .unwrap_or_default()
}

/// Cookie jar of the current document.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserCookies;

#[cfg(feature = "hydrate")]
impl CookieSource for BrowserCookies {
    fn cookie_string(&self) -> String {
        use wasm_bindgen::JsCast;

        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.dyn_into::<web_sys::HtmlDocument>().ok())
            .and_then(|doc| doc.cookie().ok())
            .unwrap_or_default()
    }
}
