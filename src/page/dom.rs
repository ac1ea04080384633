//! Browser `Page` over the server-rendered markup.
//!
//! `Bindings::resolve` looks every element up exactly once. After that the
//! controllers only ever touch the page through `DomPage`.
//!
//! DESIGN
//! ======
//! Dialog visibility lives in a `RwSignal<ModalState>`; an effect mirrors it
//! onto the hidden class of each bound dialog. Dialog-class elements that are
//! not bound to a role are hidden directly by `close_all_dialogs`.

use std::rc::Rc;

use leptos::logging::warn;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement};

use super::{ErrorSlot, ListingLink, Page};
use crate::config::{BindingConfig, ProductNames};
use crate::state::listing::ListingView;
use crate::state::modal::{DialogKind, ModalState};

#[derive(Debug, thiserror::Error)]
pub enum BindError {
    #[error("document has no <body>")]
    NoBody,
    #[error("required element #{0} not found")]
    Missing(String),
    #[error("element #{0} is not a {1}")]
    WrongType(String, &'static str),
}

/// Content slots of the product dialog.
pub struct ProductSlots {
    title: Element,
    price: Element,
    description: Element,
    exchange: HtmlElement,
    image: HtmlImageElement,
    category: Option<Element>,
    vendor: Option<Element>,
}

impl ProductSlots {
    /// # Errors
    ///
    /// Returns `BindError` if one of the required slots is absent or has the
    /// wrong element type.
    pub fn resolve(document: &Document, names: &ProductNames) -> Result<Self, BindError> {
        Ok(Self {
            title: required(document, &names.title)?,
            price: required(document, &names.price)?,
            description: required(document, &names.description)?,
            exchange: typed(document, &names.exchange, "HTMLElement")?,
            image: typed(document, &names.image, "HTMLImageElement")?,
            category: document.get_element_by_id(&names.category),
            vendor: document.get_element_by_id(&names.vendor),
        })
    }
}

/// Every element the page controllers act on, resolved once at startup.
pub struct Bindings {
    body: HtmlElement,
    login: Element,
    signup: Option<Element>,
    product: Option<(Element, ProductSlots)>,
    /// Dialog-class elements not bound to a role.
    unbound: Vec<Element>,
    login_error: Option<Element>,
    signup_error: Option<Element>,
}

impl Bindings {
    /// Resolve the page bindings.
    ///
    /// Only the body and the login dialog are required; the catalog is
    /// disabled when the product dialog or its slots are missing.
    ///
    /// # Errors
    ///
    /// Returns `BindError` if a required element is missing.
    pub fn resolve(document: &Document, config: &BindingConfig) -> Result<Self, BindError> {
        let body = document.body().ok_or(BindError::NoBody)?;
        let dialogs = &config.dialogs;
        let login = required(document, &dialogs.login)?;
        let signup = document.get_element_by_id(&dialogs.signup);
        let product = match document.get_element_by_id(&dialogs.product) {
            Some(dialog) => match ProductSlots::resolve(document, &config.product) {
                Ok(slots) => Some((dialog, slots)),
                Err(err) => {
                    warn!("product dialog disabled: {err}");
                    None
                }
            },
            None => None,
        };

        let bound = [&dialogs.login, &dialogs.signup, &dialogs.product];
        let unbound = select_all(document, &format!(".{}", dialogs.class))
            .into_iter()
            .filter(|el| !bound.iter().any(|id| el.id() == **id))
            .collect();

        Ok(Self {
            body,
            login,
            signup,
            product,
            unbound,
            login_error: document.get_element_by_id(&config.controls.login_error),
            signup_error: document.get_element_by_id(&config.controls.signup_error),
        })
    }

    #[must_use]
    pub fn has_product_dialog(&self) -> bool {
        self.product.is_some()
    }
}

pub struct DomPage {
    bindings: Bindings,
    hidden_class: String,
    auth_attr: String,
    modals: RwSignal<ModalState>,
}

impl DomPage {
    #[must_use]
    pub fn new(bindings: Bindings, config: &BindingConfig) -> Rc<Self> {
        let page = Rc::new(Self {
            bindings,
            hidden_class: config.dialogs.hidden_class.clone(),
            auth_attr: config.catalog.auth_attr.clone(),
            modals: RwSignal::new(ModalState::default()),
        });
        let mirror = Rc::clone(&page);
        Effect::new(move || {
            let state = mirror.modals.get();
            for kind in DialogKind::ALL {
                if let Some(dialog) = mirror.dialog(kind) {
                    mirror.set_hidden(dialog, !state.is_visible(kind));
                }
            }
        });
        page
    }

    #[must_use]
    pub fn has_product_dialog(&self) -> bool {
        self.bindings.has_product_dialog()
    }

    fn dialog(&self, kind: DialogKind) -> Option<&Element> {
        match kind {
            DialogKind::Login => Some(&self.bindings.login),
            DialogKind::Signup => self.bindings.signup.as_ref(),
            DialogKind::Product => self.bindings.product.as_ref().map(|(dialog, _)| dialog),
        }
    }

    fn set_hidden(&self, element: &Element, hidden: bool) {
        let classes = element.class_list();
        let result = if hidden {
            classes.add_1(&self.hidden_class)
        } else {
            classes.remove_1(&self.hidden_class)
        };
        if let Err(err) = result {
            warn!("could not toggle #{}: {err:?}", element.id());
        }
    }
}

impl Page for DomPage {
    fn is_authenticated(&self) -> bool {
        self.bindings.body.get_attribute(&self.auth_attr).as_deref() == Some("1")
    }

    fn open_dialog(&self, kind: DialogKind) {
        if self.dialog(kind).is_none() {
            warn!("no {kind:?} dialog on this page");
            return;
        }
        self.modals.update(|state| state.open(kind));
    }

    fn close_all_dialogs(&self) {
        self.modals.update(ModalState::close_all);
        for dialog in &self.bindings.unbound {
            self.set_hidden(dialog, true);
        }
    }

    fn set_error_text(&self, slot: ErrorSlot, text: &str) {
        let target = match slot {
            ErrorSlot::Login => self.bindings.login_error.as_ref(),
            ErrorSlot::Signup => self.bindings.signup_error.as_ref(),
        };
        match target {
            Some(el) => el.set_text_content(Some(text)),
            None => warn!("no {slot:?} error slot for: {text}"),
        }
    }

    fn render_listing(&self, view: &ListingView) {
        let Some((_, slots)) = self.bindings.product.as_ref() else {
            return;
        };
        slots.title.set_text_content(Some(&view.title));
        slots.price.set_text_content(Some(&view.price));
        slots.description.set_text_content(Some(&view.description));
        set_shown(&slots.exchange, view.show_exchange);
        match view.image.as_deref() {
            Some(src) => {
                slots.image.set_src(src);
                set_shown(&slots.image, true);
            }
            None => set_shown(&slots.image, false),
        }
        if let Some(el) = &slots.category {
            el.set_text_content(view.category.as_deref());
        }
        if let Some(el) = &slots.vendor {
            el.set_text_content(view.vendor.as_deref());
        }
    }

    fn reload(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(err) = window.location().reload() {
            warn!("reload failed: {err:?}");
        }
    }
}

/// Clear or set `display: none` inline.
fn set_shown(element: &HtmlElement, shown: bool) {
    let result = element
        .style()
        .set_property("display", if shown { "" } else { "none" });
    if let Err(err) = result {
        warn!("could not set display on #{}: {err:?}", element.id());
    }
}

fn required(document: &Document, id: &str) -> Result<Element, BindError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| BindError::Missing(id.to_owned()))
}

fn typed<T: JsCast>(document: &Document, id: &str, kind: &'static str) -> Result<T, BindError> {
    required(document, id)?
        .dyn_into::<T>()
        .map_err(|_| BindError::WrongType(id.to_owned(), kind))
}

/// All elements matching `selector`; an invalid selector matches nothing.
/// Catalog link element; the id attribute is re-read on every click.
pub struct DomLink {
    element: Element,
    id_attr: String,
}

impl DomLink {
    #[must_use]
    pub fn new(element: Element, id_attr: impl Into<String>) -> Self {
        Self { element, id_attr: id_attr.into() }
    }

    #[must_use]
    pub fn element(&self) -> &Element {
        &self.element
    }
}

impl ListingLink for DomLink {
    fn listing_id(&self) -> Option<String> {
        self.element.get_attribute(&self.id_attr)
    }
}

pub fn select_all(document: &Document, selector: &str) -> Vec<Element> {
    let list = match document.query_selector_all(selector) {
        Ok(list) => list,
        Err(err) => {
            warn!("bad selector {selector}: {err:?}");
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}
