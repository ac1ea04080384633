//! Storefront endpoint calls.
//!
//! `post_form` is the CSRF-aware POST every state-changing call goes through:
//! the token is read from the cookie jar at call time and sent in the CSRF
//! header alongside a form-encoded body. Callers get the raw response back and
//! decide what a status means.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here retries or swallows a failed exchange; `NetError` propagates
//! to the controller that issued the call.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::csrf::{CookieSource, cookie_value};
use super::http::{ApiRequest, ApiResponse, NetError, Transport};
use super::types::ListingDetail;
use crate::config::{CsrfNames, Endpoints};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";

/// Ordered `(name, value)` pairs read from a submitted form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `application/x-www-form-urlencoded` body (spaces become `+`).
    #[must_use]
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter())
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Result of a listing detail lookup.
#[derive(Clone, Debug, PartialEq)]
pub enum ListingFetch {
    Found(ListingDetail),
    /// Server says the session is not authenticated (401).
    Unauthorized,
    /// Any other non-2xx status.
    Unavailable(u16),
}

/// Endpoint client bound to a transport and a cookie jar.
pub struct StorefrontApi<T, C> {
    transport: T,
    cookies: C,
    csrf: CsrfNames,
    endpoints: Endpoints,
}

impl<T: Transport, C: CookieSource> StorefrontApi<T, C> {
    pub fn new(transport: T, cookies: C, csrf: CsrfNames, endpoints: Endpoints) -> Self {
        Self { transport, cookies, csrf, endpoints }
    }

    /// Current CSRF token, decoded from the cookie jar.
    pub fn csrf_token(&self) -> String {
        cookie_value(&self.cookies.cookie_string(), &self.csrf.cookie)
    }

    /// CSRF-aware form POST.
    ///
    /// # Errors
    ///
    /// Returns `NetError::Transport` if the exchange itself fails.
    pub async fn post_form(&self, path: &str, fields: &FormFields) -> Result<ApiResponse, NetError> {
        let request = ApiRequest::post(path, fields.encode())
            .with_header("Content-Type", FORM_CONTENT_TYPE)
            .with_header(self.csrf.header.as_str(), self.csrf_token());
        self.transport.send(request).await
    }

    /// `POST /accounts/login-json/` with the login form fields.
    ///
    /// # Errors
    ///
    /// Returns `NetError::Transport` if the exchange fails.
    pub async fn login(&self, fields: &FormFields) -> Result<ApiResponse, NetError> {
        self.post_form(&self.endpoints.login, fields).await
    }

    /// `POST /accounts/signup-json/` with the signup form fields.
    ///
    /// # Errors
    ///
    /// Returns `NetError::Transport` if the exchange fails.
    pub async fn signup(&self, fields: &FormFields) -> Result<ApiResponse, NetError> {
        self.post_form(&self.endpoints.signup, fields).await
    }

    /// `POST /accounts/logout-json/` with an empty body.
    ///
    /// # Errors
    ///
    /// Returns `NetError::Transport` if the exchange fails.
    pub async fn logout(&self) -> Result<ApiResponse, NetError> {
        self.post_form(&self.endpoints.logout, &FormFields::new()).await
    }

    /// `GET /api/listings/{id}/`.
    ///
    /// # Errors
    ///
    /// Returns `NetError::Transport` if the exchange fails and
    /// `NetError::Decode` if a 2xx body is not a listing record.
    pub async fn fetch_listing(&self, id: &str) -> Result<ListingFetch, NetError> {
        let resp = self
            .transport
            .send(ApiRequest::get(self.endpoints.listing(id)))
            .await?;
        if resp.is_unauthorized() {
            return Ok(ListingFetch::Unauthorized);
        }
        if !resp.is_success() {
            return Ok(ListingFetch::Unavailable(resp.status));
        }
        Ok(ListingFetch::Found(resp.json()?))
    }
}
