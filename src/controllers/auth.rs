//! Login, signup and logout.
//!
//! Success on any of these reloads the whole page so the server-rendered
//! markup reflects the new session. Failure surfaces one fixed message per
//! form; the server's reason is not shown.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::rc::Rc;

use leptos::logging::warn;

use crate::net::api::{FormFields, StorefrontApi};
use crate::net::csrf::CookieSource;
use crate::net::http::{NetError, Transport};
use crate::page::{ErrorSlot, Page};
use crate::state::modal::DialogKind;

pub const LOGIN_ERROR: &str = "Invalid credentials";
pub const SIGNUP_ERROR: &str = "Please check fields";

/// What a form submission ended in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Reloaded,
    Rejected { status: u16 },
}

#[derive(Clone, Copy)]
enum AuthForm {
    Login,
    Signup,
}

impl AuthForm {
    const fn slot(self) -> ErrorSlot {
        match self {
            Self::Login => ErrorSlot::Login,
            Self::Signup => ErrorSlot::Signup,
        }
    }

    const fn message(self) -> &'static str {
        match self {
            Self::Login => LOGIN_ERROR,
            Self::Signup => SIGNUP_ERROR,
        }
    }
}

pub struct AuthController<P, T, C> {
    page: Rc<P>,
    api: Rc<StorefrontApi<T, C>>,
}

impl<P: Page, T: Transport, C: CookieSource> AuthController<P, T, C> {
    pub fn new(page: Rc<P>, api: Rc<StorefrontApi<T, C>>) -> Self {
        Self { page, api }
    }

    pub fn open_login(&self) {
        self.page.open_dialog(DialogKind::Login);
    }

    pub fn open_signup(&self) {
        self.page.open_dialog(DialogKind::Signup);
    }

    /// Any close control hides every dialog, not just its own.
    pub fn close_dialogs(&self) {
        self.page.close_all_dialogs();
    }

    /// Submit the login form.
    ///
    /// # Errors
    ///
    /// Returns `NetError::Transport` if the POST could not be made; the page
    /// is left untouched in that case.
    pub async fn submit_login(&self, fields: FormFields) -> Result<SubmitOutcome, NetError> {
        let resp = self.api.login(&fields).await?;
        Ok(self.finish(AuthForm::Login, resp.is_success(), resp.status))
    }

    /// Submit the signup form.
    ///
    /// # Errors
    ///
    /// Returns `NetError::Transport` if the POST could not be made.
    pub async fn submit_signup(&self, fields: FormFields) -> Result<SubmitOutcome, NetError> {
        let resp = self.api.signup(&fields).await?;
        Ok(self.finish(AuthForm::Signup, resp.is_success(), resp.status))
    }

    /// Log out and reload whatever the server answered.
    ///
    /// # Errors
    ///
    /// Returns `NetError::Transport` if the POST could not be made; no reload
    /// happens then.
    pub async fn logout(&self) -> Result<(), NetError> {
        let resp = self.api.logout().await?;
        if !resp.is_success() {
            warn!("logout answered {}; reloading anyway", resp.status);
        }
        self.page.reload();
        Ok(())
    }

    fn finish(&self, form: AuthForm, ok: bool, status: u16) -> SubmitOutcome {
        if ok {
            self.page.reload();
            return SubmitOutcome::Reloaded;
        }
        self.page.set_error_text(form.slot(), form.message());
        SubmitOutcome::Rejected { status }
    }
}
