//! Browser tests for the `web-sys` backend
//!
//! These tests drive a real document: they verify that route selection
//! writes the hidden pair, that the address fragment changes, that route
//! buttons react to native clicks, and that routers over the page share
//! subscriptions.
//!
//! **Run with**: `wasm-pack test --chrome --headless crates/hashview-core`

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use hashview_core::HashRouter;
use hashview_core::dom::web::{WebDocument, WebLocation};
use hashview_core::router::RouterTarget;

type WebRouter = HashRouter<WebDocument, WebLocation>;

fn mount(markup: &str) -> WebRouter {
	let document = WebDocument::new().expect("document should exist");
	let body = document.inner().body().expect("body should exist");
	body.set_inner_html(markup);
	HashRouter::new(document, WebLocation::new().expect("location should exist"))
}

fn counter() -> (Rc<Cell<u32>>, impl Fn() + 'static) {
	let hits = Rc::new(Cell::new(0));
	let handle = Rc::clone(&hits);
	(hits, move || handle.set(handle.get() + 1))
}

fn dispatch_click(node: &web_sys::Element) {
	let event = web_sys::MouseEvent::new("click").expect("click event should be constructible");
	node.dispatch_event(&event).expect("click should dispatch");
}

fn element(router: &WebRouter, id: &str) -> web_sys::Element {
	router
		.document()
		.inner()
		.get_element_by_id(id)
		.unwrap_or_else(|| panic!("no element with id '{}'", id))
}

// ============================================================================
// Selection
// ============================================================================

#[wasm_bindgen_test]
fn test_set_route_toggles_hidden_pair() {
	let router = mount(
		r#"
		<div id="router">
			<div class="route" pattern="^/$" id="home"></div>
			<div class="route" pattern="^/foo$" id="foo" hidden></div>
		</div>
		"#,
	);

	router.set_route("/foo", RouterTarget::Default).unwrap();

	let home = element(&router, "home");
	let foo = element(&router, "foo");
	assert!(home.has_attribute("hidden"));
	assert_eq!(home.get_attribute("aria-hidden").as_deref(), Some("true"));
	assert!(!foo.has_attribute("hidden"));
	assert!(!foo.has_attribute("aria-hidden"));
}

#[wasm_bindgen_test]
fn test_set_route_updates_hash() {
	let router = mount(r#"<div id="router"><div class="route" pattern="^/bar$"></div></div>"#);

	router.set_route("/bar", RouterTarget::Default).unwrap();

	let window = web_sys::window().unwrap();
	assert_eq!(window.location().hash().unwrap(), "#/bar");
	assert_eq!(router.current_route().as_deref(), Some("/bar"));
}

#[wasm_bindgen_test]
fn test_selector_target() {
	let router = mount(
		r#"
		<section class="panel">
			<div class="route" pattern="^/$" id="a"></div>
			<div class="route" pattern="^/b$" id="b"></div>
		</section>
		"#,
	);

	router.set_route("/b", "section.panel").unwrap();
	assert!(element(&router, "a").has_attribute("hidden"));
}

// ============================================================================
// Route buttons
// ============================================================================

#[wasm_bindgen_test]
fn test_route_button_click() {
	let router = mount(
		r#"
		<button class="route-button" destination="/about" id="go"></button>
		<div id="router">
			<div class="route" pattern="^/$" id="home"></div>
			<div class="route" pattern="^/about$" id="about" hidden></div>
		</div>
		"#,
	);
	let hits = Rc::new(Cell::new(0));
	let counter = Rc::clone(&hits);
	router
		.on_route_switch(
			"^/about$",
			move || counter.set(counter.get() + 1),
			false,
			RouterTarget::Default,
		)
		.unwrap();

	assert_eq!(router.initialize_route_buttons(None, RouterTarget::Default), 1);
	element(&router, "go")
		.dyn_into::<web_sys::HtmlElement>()
		.unwrap()
		.click();

	assert_eq!(hits.get(), 1);
	assert!(!element(&router, "about").has_attribute("hidden"));
}

#[wasm_bindgen_test]
fn test_rebinding_keeps_one_listener() {
	let router = mount(
		r#"
		<button class="route-button" destination="/about" id="go"></button>
		<div id="router">
			<div class="route" pattern="^/$" id="home"></div>
			<div class="route" pattern="^/about$" id="about" hidden></div>
		</div>
		"#,
	);
	let (hits, callback) = counter();
	router
		.on_route_switch("^/about$", callback, false, RouterTarget::Default)
		.unwrap();

	for _ in 0..3 {
		assert_eq!(router.initialize_route_buttons(None, RouterTarget::Default), 1);
	}
	dispatch_click(&element(&router, "go"));

	assert_eq!(hits.get(), 1);
}

#[wasm_bindgen_test]
fn test_svg_route_button() {
	let router = mount(
		r#"
		<svg><rect class="route-button" destination="/about" id="go" width="10" height="10"></rect></svg>
		<div id="router">
			<div class="route" pattern="^/$" id="home"></div>
			<div class="route" pattern="^/about$" id="about" hidden></div>
		</div>
		"#,
	);

	assert_eq!(router.initialize_route_buttons(None, RouterTarget::Default), 1);
	dispatch_click(&element(&router, "go"));

	assert!(!element(&router, "about").has_attribute("hidden"));
	assert!(element(&router, "home").has_attribute("hidden"));
}

// ============================================================================
// Shared page
// ============================================================================

#[wasm_bindgen_test]
fn test_routers_over_page_share_subscriptions() {
	let router = mount(
		r#"
		<div id="router">
			<div class="route" pattern="^/$" id="home"></div>
			<div class="route" pattern="^/shared$" id="shared" hidden></div>
		</div>
		"#,
	);
	let other = HashRouter::new(
		WebDocument::new().expect("document should exist"),
		WebLocation::new().expect("location should exist"),
	);
	let (hits, callback) = counter();
	let id = router
		.on_route_switch("^/shared$", callback, false, RouterTarget::Default)
		.unwrap();

	other.set_route("/shared", RouterTarget::Default).unwrap();
	assert_eq!(hits.get(), 1);

	assert!(other.off_route_switch(id, RouterTarget::Default).unwrap());
	assert!(router.subscriptions(RouterTarget::Default).unwrap().is_empty());
}
