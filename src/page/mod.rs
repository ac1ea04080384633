//! The DOM surface the controllers act on.
//!
//! SYSTEM CONTEXT
//! ==============
//! Controllers never look elements up themselves. They call into a `Page`,
//! which in the browser is `dom::DomPage` built once from resolved bindings.

#[cfg(feature = "hydrate")]
pub mod dom;

use crate::state::listing::ListingView;
use crate::state::modal::DialogKind;

/// Inline error slots inside the auth dialogs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSlot {
    Login,
    Signup,
}

/// A catalog link carrying a listing id.
pub trait ListingLink {
    /// Current id, read from the link at the moment of the call.
    fn listing_id(&self) -> Option<String>;
}

pub trait Page {
    /// Server-rendered auth flag (`<body data-auth="1">`).
    fn is_authenticated(&self) -> bool;

    fn open_dialog(&self, kind: DialogKind);

    /// Hide every dialog on the page.
    fn close_all_dialogs(&self);

    fn set_error_text(&self, slot: ErrorSlot, text: &str);

    /// Fill the product dialog's slots. Does not change visibility.
    fn render_listing(&self, view: &ListingView);

    /// Request a full page reload.
    fn reload(&self);
}
