//! Page binding configuration.
//!
//! Every element id, class, attribute and endpoint the controllers depend on
//! is named here once. The defaults match the storefront templates; a page can
//! override any subset by embedding JSON in
//! `<script type="application/json" id="market-ui-config">`.
//!
//! DESIGN
//! ======
//! Each section is `#[serde(default)]` so a partial override only has to name
//! the fields it changes.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

/// Id of the optional `<script>` element carrying a JSON override.
pub const CONFIG_ELEMENT_ID: &str = "market-ui-config";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid binding config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Role → element-name mapping for the whole page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BindingConfig {
    pub dialogs: DialogNames,
    pub controls: ControlNames,
    pub product: ProductNames,
    pub catalog: CatalogNames,
    pub csrf: CsrfNames,
    pub endpoints: Endpoints,
}

impl BindingConfig {
    /// Parse a (possibly partial) JSON override on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the JSON is malformed or a field has
    /// the wrong type.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Dialog element ids plus the class/attribute markers shared by all dialogs.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DialogNames {
    pub login: String,
    pub signup: String,
    pub product: String,
    /// Class carried by every dialog on the page.
    pub class: String,
    /// Class whose presence means "hidden".
    pub hidden_class: String,
    /// Attribute flagging an element as a close control.
    pub close_attr: String,
}

impl Default for DialogNames {
    fn default() -> Self {
        Self {
            login: "loginModal".to_owned(),
            signup: "signupModal".to_owned(),
            product: "productModal".to_owned(),
            class: "modal".to_owned(),
            hidden_class: "hidden".to_owned(),
            close_attr: "data-close".to_owned(),
        }
    }
}

/// Ids of the buttons, forms and error slots driven by the auth controller.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ControlNames {
    pub login_open: String,
    pub signup_open: String,
    pub logout: String,
    pub login_form: String,
    pub signup_form: String,
    pub login_error: String,
    pub signup_error: String,
}

impl Default for ControlNames {
    fn default() -> Self {
        Self {
            login_open: "loginOpen".to_owned(),
            signup_open: "signupOpen".to_owned(),
            logout: "logoutBtn".to_owned(),
            login_form: "loginForm".to_owned(),
            signup_form: "signupForm".to_owned(),
            login_error: "loginErr".to_owned(),
            signup_error: "signupErr".to_owned(),
        }
    }
}

/// Ids of the product dialog's content slots.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProductNames {
    pub title: String,
    pub price: String,
    pub description: String,
    pub exchange: String,
    pub image: String,
    /// Optional slot; skipped when the page has no such element.
    pub category: String,
    /// Optional slot; skipped when the page has no such element.
    pub vendor: String,
}

impl Default for ProductNames {
    fn default() -> Self {
        Self {
            title: "pm_title".to_owned(),
            price: "pm_price".to_owned(),
            description: "pm_desc".to_owned(),
            exchange: "pm_exchange".to_owned(),
            image: "pm_img".to_owned(),
            category: "pm_category".to_owned(),
            vendor: "pm_vendor".to_owned(),
        }
    }
}

/// Listing-link markers and the body-level auth flag.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogNames {
    pub link_class: String,
    pub id_attr: String,
    /// Attribute on `<body>`; `"1"` means authenticated.
    pub auth_attr: String,
    /// Prefix placed in front of the price text.
    pub currency: String,
}

impl Default for CatalogNames {
    fn default() -> Self {
        Self {
            link_class: "listing-link".to_owned(),
            id_attr: "data-id".to_owned(),
            auth_attr: "data-auth".to_owned(),
            currency: "$".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CsrfNames {
    pub cookie: String,
    pub header: String,
}

impl Default for CsrfNames {
    fn default() -> Self {
        Self {
            cookie: "csrftoken".to_owned(),
            header: "X-CSRFToken".to_owned(),
        }
    }
}

/// Server endpoints consumed by the controllers.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub login: String,
    pub signup: String,
    pub logout: String,
    /// Listing detail path is `{listing_prefix}{id}/`.
    pub listing_prefix: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login: "/accounts/login-json/".to_owned(),
            signup: "/accounts/signup-json/".to_owned(),
            logout: "/accounts/logout-json/".to_owned(),
            listing_prefix: "/api/listings/".to_owned(),
        }
    }
}

impl Endpoints {
    #[must_use]
    pub fn listing(&self, id: &str) -> String {
        format!("{}{id}/", self.listing_prefix)
    }
}
