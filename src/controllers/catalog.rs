//! Listing-link clicks and the product detail dialog.
//!
//! Unauthenticated visitors are sent to the login dialog without a round
//! trip. A 401 from the detail endpoint does the same, covering a stale auth
//! flag. Every other non-2xx status is dropped silently.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use std::rc::Rc;

use leptos::logging::{log, warn};

use crate::net::api::{ListingFetch, StorefrontApi};
use crate::net::csrf::CookieSource;
use crate::net::http::{NetError, Transport};
use crate::page::{ListingLink, Page};
use crate::state::listing::ListingView;
use crate::state::modal::DialogKind;
use crate::state::request_guard::RequestGuard;

/// Which branch a listing click ended in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListingOutcome {
    /// Page flag says anonymous; login dialog opened, nothing fetched.
    LoginRequired,
    /// Server answered 401; login dialog opened.
    Unauthorized,
    /// Product dialog opened and filled.
    Rendered,
    /// Non-2xx, non-401 status; nothing changed.
    Ignored { status: u16 },
    /// A newer click was issued before this response arrived.
    Superseded,
    /// The link carried no listing id; nothing fetched.
    MissingId,
}

pub struct CatalogController<P, T, C> {
    page: Rc<P>,
    api: Rc<StorefrontApi<T, C>>,
    guard: RequestGuard,
    currency: String,
}

impl<P: Page, T: Transport, C: CookieSource> CatalogController<P, T, C> {
    pub fn new(page: Rc<P>, api: Rc<StorefrontApi<T, C>>, currency: impl Into<String>) -> Self {
        Self {
            page,
            api,
            guard: RequestGuard::default(),
            currency: currency.into(),
        }
    }

    /// Handle a click on `link`, taking whatever id it carries right now.
    ///
    /// # Errors
    ///
    /// Same as [`Self::open_listing`].
    pub async fn open_link(&self, link: &impl ListingLink) -> Result<ListingOutcome, NetError> {
        let id = link.listing_id();
        self.open_listing(id.as_deref()).await
    }

    /// Handle a click on the listing link carrying `id`.
    ///
    /// # Errors
    ///
    /// Returns `NetError::Transport` if the GET failed and `NetError::Decode`
    /// if a 2xx body was not a listing record. Nothing is rendered then.
    pub async fn open_listing(&self, id: Option<&str>) -> Result<ListingOutcome, NetError> {
        if !self.page.is_authenticated() {
            self.page.open_dialog(DialogKind::Login);
            return Ok(ListingOutcome::LoginRequired);
        }
        let Some(id) = id.map(str::trim).filter(|id| !id.is_empty()) else {
            warn!("listing link without an id");
            return Ok(ListingOutcome::MissingId);
        };

        let ticket = self.guard.issue();
        let fetched = self.api.fetch_listing(id).await?;
        if !self.guard.is_current(ticket) {
            log!("dropping stale response for listing {id}");
            return Ok(ListingOutcome::Superseded);
        }

        match fetched {
            ListingFetch::Unauthorized => {
                self.page.open_dialog(DialogKind::Login);
                Ok(ListingOutcome::Unauthorized)
            }
            ListingFetch::Unavailable(status) => {
                log!("listing {id} unavailable: {status}");
                Ok(ListingOutcome::Ignored { status })
            }
            ListingFetch::Found(detail) => {
                let view = ListingView::from_detail(&detail, &self.currency);
                self.page.open_dialog(DialogKind::Product);
                self.page.render_listing(&view);
                Ok(ListingOutcome::Rendered)
            }
        }
    }
}
