//! Presentation model for the product dialog.

#[cfg(test)]
#[path = "listing_test.rs"]
mod listing_test;

use crate::net::types::ListingDetail;

/// Everything the product dialog displays, already formatted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingView {
    pub title: String,
    /// Currency prefix followed by the price text, e.g. `"$9.99"`.
    pub price: String,
    pub description: String,
    pub show_exchange: bool,
    /// `Some(src)` shows the image; `None` hides it.
    pub image: Option<String>,
    pub category: Option<String>,
    pub vendor: Option<String>,
}

impl ListingView {
    #[must_use]
    pub fn from_detail(detail: &ListingDetail, currency: &str) -> Self {
        Self {
            title: detail.title.clone().unwrap_or_default(),
            price: format!("{currency}{}", detail.price.as_str()),
            description: detail.description.clone().unwrap_or_default(),
            show_exchange: detail.has_exchange(),
            image: detail.image_url().map(str::to_owned),
            category: detail.category.clone(),
            vendor: detail.vendor.clone(),
        }
    }
}
