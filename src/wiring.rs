//! Startup: resolve bindings, build controllers, attach listeners.
//!
//! Each listener translates one DOM event into one controller call. Async
//! calls run as local tasks; their errors are logged and otherwise dropped,
//! so a failed request leaves the page as it was.

use std::rc::Rc;

use any_spawner::Executor;
use leptos::logging::{error, log, warn};
use leptos::prelude::Owner;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, EventTarget, FormData, HtmlFormElement};

use crate::config::{BindingConfig, CONFIG_ELEMENT_ID};
use crate::controllers::auth::AuthController;
use crate::controllers::catalog::CatalogController;
use crate::net::api::{FormFields, StorefrontApi};
use crate::net::csrf::BrowserCookies;
use crate::net::http::BrowserTransport;
use crate::page::ListingLink;
use crate::page::dom::{Bindings, DomLink, DomPage, select_all};

type Api = StorefrontApi<BrowserTransport, BrowserCookies>;
type Auth = AuthController<DomPage, BrowserTransport, BrowserCookies>;
type Catalog = CatalogController<DomPage, BrowserTransport, BrowserCookies>;

pub(crate) fn install() {
    if let Err(err) = Executor::init_wasm_bindgen() {
        warn!("executor already initialised: {err:?}");
    }
    // Effects created below belong to this owner; `set` keeps it alive.
    Owner::new().set();

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        error!("market-ui: no document");
        return;
    };
    let config = read_config(&document);
    let bindings = match Bindings::resolve(&document, &config) {
        Ok(bindings) => bindings,
        Err(err) => {
            error!("market-ui: {err}");
            return;
        }
    };

    let page = DomPage::new(bindings, &config);
    let api: Rc<Api> = Rc::new(StorefrontApi::new(
        BrowserTransport,
        BrowserCookies,
        config.csrf.clone(),
        config.endpoints.clone(),
    ));

    let auth = Rc::new(AuthController::new(Rc::clone(&page), Rc::clone(&api)));
    attach_auth(&document, &config, &auth);

    if page.has_product_dialog() {
        let catalog = Rc::new(CatalogController::new(
            Rc::clone(&page),
            Rc::clone(&api),
            config.catalog.currency.clone(),
        ));
        attach_catalog(&document, &config, &catalog);
    }
    log!("market-ui attached");
}

fn read_config(document: &Document) -> BindingConfig {
    let Some(raw) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return BindingConfig::default();
    };
    BindingConfig::from_json(&raw).unwrap_or_else(|err| {
        warn!("{err}; using default bindings");
        BindingConfig::default()
    })
}

fn attach_auth(document: &Document, config: &BindingConfig, auth: &Rc<Auth>) {
    let controls = &config.controls;

    if let Some(button) = document.get_element_by_id(&controls.login_open) {
        let auth = Rc::clone(auth);
        listen(&button, "click", move |_| auth.open_login());
    }
    if let Some(button) = document.get_element_by_id(&controls.signup_open) {
        let auth = Rc::clone(auth);
        listen(&button, "click", move |_| auth.open_signup());
    }
    for control in select_all(document, &format!("[{}]", config.dialogs.close_attr)) {
        let auth = Rc::clone(auth);
        listen(&control, "click", move |_| auth.close_dialogs());
    }

    if let Some(form) = form_by_id(document, &controls.login_form) {
        let auth = Rc::clone(auth);
        let source = form.clone();
        listen(&form, "submit", move |ev: Event| {
            ev.prevent_default();
            let fields = form_fields(&source);
            let auth = Rc::clone(&auth);
            spawn_local(async move {
                if let Err(err) = auth.submit_login(fields).await {
                    error!("login: {err}");
                }
            });
        });
    }
    if let Some(form) = form_by_id(document, &controls.signup_form) {
        let auth = Rc::clone(auth);
        let source = form.clone();
        listen(&form, "submit", move |ev: Event| {
            ev.prevent_default();
            let fields = form_fields(&source);
            let auth = Rc::clone(&auth);
            spawn_local(async move {
                if let Err(err) = auth.submit_signup(fields).await {
                    error!("signup: {err}");
                }
            });
        });
    }

    if let Some(button) = document.get_element_by_id(&controls.logout) {
        let auth = Rc::clone(auth);
        listen(&button, "click", move |_| {
            let auth = Rc::clone(&auth);
            spawn_local(async move {
                if let Err(err) = auth.logout().await {
                    error!("logout: {err}");
                }
            });
        });
    }
}

fn attach_catalog(document: &Document, config: &BindingConfig, catalog: &Rc<Catalog>) {
    for element in select_all(document, &format!(".{}", config.catalog.link_class)) {
        let catalog = Rc::clone(catalog);
        let link = Rc::new(DomLink::new(element, config.catalog.id_attr.as_str()));
        let target = link.element().clone();
        listen(&target, "click", move |ev: Event| {
            ev.prevent_default();
            let catalog = Rc::clone(&catalog);
            let link = Rc::clone(&link);
            spawn_local(async move {
                let result = catalog.open_link(link.as_ref()).await;
                let id = link.listing_id();
                match result {
                    Ok(outcome) => log!("listing {id:?}: {outcome:?}"),
                    Err(err) => error!("listing {id:?}: {err}"),
                }
            });
        });
    }
}

fn form_by_id(document: &Document, id: &str) -> Option<HtmlFormElement> {
    let element: Element = document.get_element_by_id(id)?;
    match element.dyn_into::<HtmlFormElement>() {
        Ok(form) => Some(form),
        Err(_) => {
            warn!("#{id} is not a <form>");
            None
        }
    }
}

/// String entries of a form, in document order. File inputs are skipped.
fn form_fields(form: &HtmlFormElement) -> FormFields {
    let mut fields = FormFields::new();
    let data = match FormData::new_with_form(form) {
        Ok(data) => data,
        Err(err) => {
            warn!("could not read form #{}: {err:?}", form.id());
            return fields;
        }
    };
    let Ok(Some(entries)) = js_sys::try_iter(&data) else {
        return fields;
    };
    for entry in entries.flatten() {
        let pair = js_sys::Array::from(&entry);
        if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
            fields.push(name, value);
        }
    }
    fields
}

/// Attach `handler` for `event` for the lifetime of the page.
fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(err) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        warn!("could not listen for {event}: {err:?}");
    }
    closure.forget();
}
