use std::rc::Rc;

use futures::executor::block_on;

use super::*;
use crate::net::http::ApiResponse;
use crate::test_support::{FakeCookies, FakeLink, FakePage, FakeTransport, Harness};

type Controller = CatalogController<FakePage, Rc<FakeTransport>, Rc<FakeCookies>>;

fn controller(h: &Harness) -> Controller {
    CatalogController::new(Rc::clone(&h.page), Rc::clone(&h.api), "$")
}

const WIDGET: &str =
    r#"{"title": "Widget", "price": 9.99, "description": "", "exchange": false, "image": null}"#;

// =============================================================
// Auth short-circuits
// =============================================================

#[test]
fn anonymous_click_opens_login_without_request() {
    let h = Harness::new(FakePage::default());

    let outcome = block_on(controller(&h).open_listing(Some("5"))).unwrap();

    assert_eq!(outcome, ListingOutcome::LoginRequired);
    assert_eq!(h.transport.request_count(), 0);
    assert_eq!(h.page.modals.borrow().visible(), vec![DialogKind::Login]);
}

#[test]
fn server_401_opens_login_not_product() {
    let h = Harness::new(FakePage::signed_in());
    h.transport.respond(401, r#"{"ok": false, "requires_login": true}"#);

    let outcome = block_on(controller(&h).open_listing(Some("5"))).unwrap();

    assert_eq!(outcome, ListingOutcome::Unauthorized);
    assert!(h.page.is_visible(DialogKind::Login));
    assert!(!h.page.is_visible(DialogKind::Product));
    assert!(h.page.last_rendered().is_none());
}

// =============================================================
// Rendering
// =============================================================

#[test]
fn ok_response_renders_product_dialog() {
    let h = Harness::new(FakePage::signed_in());
    h.transport.respond(200, WIDGET);

    let outcome = block_on(controller(&h).open_listing(Some("5"))).unwrap();

    assert_eq!(outcome, ListingOutcome::Rendered);
    assert_eq!(h.transport.request(0).path, "/api/listings/5/");
    assert_eq!(h.page.modals.borrow().visible(), vec![DialogKind::Product]);
    let view = h.page.last_rendered().unwrap();
    assert_eq!(view.title, "Widget");
    assert_eq!(view.price, "$9.99");
    assert_eq!(view.description, "");
    assert!(!view.show_exchange);
    assert_eq!(view.image, None);
}

#[test]
fn exchange_and_image_fields_are_rendered() {
    let h = Harness::new(FakePage::signed_in());
    h.transport.respond(
        200,
        r#"{"ok": true, "title": "Bike", "price": "120.00", "exchange": true,
            "description": "Road bike", "image": "/media/listings/bike.jpg",
            "category": "Sports", "vendor": "kim"}"#,
    );

    block_on(controller(&h).open_listing(Some("9"))).unwrap();

    let view = h.page.last_rendered().unwrap();
    assert_eq!(view.price, "$120.00");
    assert_eq!(view.description, "Road bike");
    assert!(view.show_exchange);
    assert_eq!(view.image.as_deref(), Some("/media/listings/bike.jpg"));
    assert_eq!(view.category.as_deref(), Some("Sports"));
    assert_eq!(view.vendor.as_deref(), Some("kim"));
}

#[test]
fn other_failure_status_changes_nothing() {
    let h = Harness::new(FakePage::signed_in());
    h.transport.respond(404, "");

    let outcome = block_on(controller(&h).open_listing(Some("5"))).unwrap();

    assert_eq!(outcome, ListingOutcome::Ignored { status: 404 });
    assert!(h.page.modals.borrow().visible().is_empty());
    assert!(h.page.last_rendered().is_none());
}

#[test]
fn undecodable_body_is_an_error_and_renders_nothing() {
    let h = Harness::new(FakePage::signed_in());
    h.transport.respond(200, "not json");

    let result = block_on(controller(&h).open_listing(Some("5")));

    assert!(matches!(result, Err(NetError::Decode(_))));
    assert!(!h.page.is_visible(DialogKind::Product));
}

#[test]
fn transport_failure_propagates() {
    let h = Harness::new(FakePage::signed_in());
    h.transport.fail("dns");
    assert!(matches!(
        block_on(controller(&h).open_listing(Some("5"))),
        Err(NetError::Transport(_))
    ));
}

#[test]
fn missing_id_issues_no_request() {
    let h = Harness::new(FakePage::signed_in());
    let catalog = controller(&h);
    assert_eq!(block_on(catalog.open_listing(None)).unwrap(), ListingOutcome::MissingId);
    assert_eq!(block_on(catalog.open_listing(Some("  "))).unwrap(), ListingOutcome::MissingId);
    assert_eq!(h.transport.request_count(), 0);
}

#[test]
fn each_click_issues_exactly_one_request() {
    let h = Harness::new(FakePage::signed_in());
    let catalog = controller(&h);
    h.transport.respond(200, WIDGET);
    h.transport.respond(200, WIDGET);
    block_on(catalog.open_listing(Some("1"))).unwrap();
    block_on(catalog.open_listing(Some("2"))).unwrap();
    assert_eq!(h.transport.request_count(), 2);
    assert_eq!(h.transport.request(1).path, "/api/listings/2/");
}

#[test]
fn link_id_is_read_at_click_time() {
    let h = Harness::new(FakePage::signed_in());
    h.transport.respond(200, WIDGET);
    h.transport.respond(200, WIDGET);
    let catalog = controller(&h);
    let link = FakeLink::with_id("1");

    block_on(catalog.open_link(&link)).unwrap();
    link.set(Some("2"));
    block_on(catalog.open_link(&link)).unwrap();

    assert_eq!(h.transport.request(0).path, "/api/listings/1/");
    assert_eq!(h.transport.request(1).path, "/api/listings/2/");
}

#[test]
fn link_that_loses_its_id_issues_no_request() {
    let h = Harness::new(FakePage::signed_in());
    let link = FakeLink::with_id("7");
    link.set(None);

    let outcome = block_on(controller(&h).open_link(&link)).unwrap();

    assert_eq!(outcome, ListingOutcome::MissingId);
    assert_eq!(h.transport.request_count(), 0);
}

// =============================================================
// In-flight responses
// =============================================================

#[test]
fn superseded_response_is_dropped() {
    let h = Harness::new(FakePage::signed_in());
    let catalog = controller(&h);
    let first_tx = h.transport.defer();
    h.transport.respond(200, r#"{"title": "Second", "price": 2}"#);

    let (first, second) = block_on(async {
        let first = catalog.open_listing(Some("1"));
        let second = async {
            let outcome = catalog.open_listing(Some("2")).await;
            first_tx
                .send(Ok(ApiResponse::new(200, r#"{"title": "First", "price": 1}"#)))
                .unwrap();
            outcome
        };
        futures::join!(first, second)
    });

    assert_eq!(first.unwrap(), ListingOutcome::Superseded);
    assert_eq!(second.unwrap(), ListingOutcome::Rendered);
    assert_eq!(h.page.rendered.borrow().len(), 1);
    assert_eq!(h.page.last_rendered().unwrap().title, "Second");
}

#[test]
fn response_after_close_still_applies() {
    let h = Harness::new(FakePage::signed_in());
    let catalog = controller(&h);
    let tx = h.transport.defer();

    let (outcome, ()) = block_on(async {
        let click = catalog.open_listing(Some("3"));
        let close_then_answer = async {
            h.page.close_all_dialogs();
            tx.send(Ok(ApiResponse::new(200, WIDGET))).unwrap();
        };
        futures::join!(click, close_then_answer)
    });

    assert_eq!(outcome.unwrap(), ListingOutcome::Rendered);
    assert!(h.page.is_visible(DialogKind::Product));
}
