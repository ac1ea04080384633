//! In-memory `Page`, `Transport` and `CookieSource` for native tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use futures::channel::oneshot;

use crate::config::{CsrfNames, Endpoints};
use crate::net::api::StorefrontApi;
use crate::net::csrf::CookieSource;
use crate::net::http::{ApiRequest, ApiResponse, NetError, Transport};
use crate::page::{ErrorSlot, ListingLink, Page};
use crate::state::listing::ListingView;
use crate::state::modal::{DialogKind, ModalState};

#[derive(Default)]
pub struct FakePage {
    pub authenticated: Cell<bool>,
    pub modals: RefCell<ModalState>,
    pub errors: RefCell<HashMap<ErrorSlot, String>>,
    pub rendered: RefCell<Vec<ListingView>>,
    pub reloads: Cell<u32>,
}

impl FakePage {
    pub fn signed_in() -> Self {
        let page = Self::default();
        page.authenticated.set(true);
        page
    }

    pub fn is_visible(&self, kind: DialogKind) -> bool {
        self.modals.borrow().is_visible(kind)
    }

    pub fn error(&self, slot: ErrorSlot) -> Option<String> {
        self.errors.borrow().get(&slot).cloned()
    }

    pub fn last_rendered(&self) -> Option<ListingView> {
        self.rendered.borrow().last().cloned()
    }
}

impl Page for FakePage {
    fn is_authenticated(&self) -> bool {
        self.authenticated.get()
    }

    fn open_dialog(&self, kind: DialogKind) {
        self.modals.borrow_mut().open(kind);
    }

    fn close_all_dialogs(&self) {
        self.modals.borrow_mut().close_all();
    }

    fn set_error_text(&self, slot: ErrorSlot, text: &str) {
        self.errors.borrow_mut().insert(slot, text.to_owned());
    }

    fn render_listing(&self, view: &ListingView) {
        self.rendered.borrow_mut().push(view.clone());
    }

    fn reload(&self) {
        self.reloads.set(self.reloads.get() + 1);
    }
}

enum Scripted {
    Ready(Result<ApiResponse, NetError>),
    Pending(oneshot::Receiver<Result<ApiResponse, NetError>>),
}

/// Records every request and answers from a script, in order.
#[derive(Default)]
pub struct FakeTransport {
    pub requests: RefCell<Vec<ApiRequest>>,
    script: RefCell<VecDeque<Scripted>>,
}

impl FakeTransport {
    pub fn respond(&self, status: u16, body: &str) {
        self.script
            .borrow_mut()
            .push_back(Scripted::Ready(Ok(ApiResponse::new(status, body))));
    }

    pub fn fail(&self, message: &str) {
        self.script
            .borrow_mut()
            .push_back(Scripted::Ready(Err(NetError::Transport(message.to_owned()))));
    }

    /// Script a response the test completes later through the returned sender.
    pub fn defer(&self) -> oneshot::Sender<Result<ApiResponse, NetError>> {
        let (tx, rx) = oneshot::channel();
        self.script.borrow_mut().push_back(Scripted::Pending(rx));
        tx
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn request(&self, index: usize) -> ApiRequest {
        self.requests.borrow()[index].clone()
    }
}

impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, NetError> {
        self.requests.borrow_mut().push(request);
        let next = self.script.borrow_mut().pop_front();
        match next {
            Some(Scripted::Ready(result)) => result,
            Some(Scripted::Pending(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(NetError::Transport("response dropped".to_owned()))),
            None => Err(NetError::Transport("no scripted response".to_owned())),
        }
    }
}

/// Listing link whose id a test can change between clicks.
#[derive(Default)]
pub struct FakeLink {
    pub id: RefCell<Option<String>>,
}

impl FakeLink {
    pub fn with_id(id: &str) -> Self {
        Self { id: RefCell::new(Some(id.to_owned())) }
    }

    pub fn set(&self, id: Option<&str>) {
        *self.id.borrow_mut() = id.map(str::to_owned);
    }
}

impl ListingLink for FakeLink {
    fn listing_id(&self) -> Option<String> {
        self.id.borrow().clone()
    }
}

/// Cookie jar whose contents a test can rewrite between calls.
#[derive(Default)]
pub struct FakeCookies {
    pub jar: RefCell<String>,
}

impl FakeCookies {
    pub fn set(&self, raw: &str) {
        *self.jar.borrow_mut() = raw.to_owned();
    }
}

impl CookieSource for Rc<FakeCookies> {
    fn cookie_string(&self) -> String {
        self.jar.borrow().clone()
    }
}

impl Transport for Rc<FakeTransport> {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, NetError> {
        <FakeTransport as Transport>::send(self, request).await
    }
}

pub type FakeApi = StorefrontApi<Rc<FakeTransport>, Rc<FakeCookies>>;

/// Page, transport and cookie jar wired into one API client.
pub struct Harness {
    pub page: Rc<FakePage>,
    pub transport: Rc<FakeTransport>,
    pub cookies: Rc<FakeCookies>,
    pub api: Rc<FakeApi>,
}

impl Harness {
    pub fn new(page: FakePage) -> Self {
        let transport = Rc::new(FakeTransport::default());
        let cookies = Rc::new(FakeCookies::default());
        let api = Rc::new(StorefrontApi::new(
            Rc::clone(&transport),
            Rc::clone(&cookies),
            CsrfNames::default(),
            Endpoints::default(),
        ));
        Self { page: Rc::new(page), transport, cookies, api }
    }
}
