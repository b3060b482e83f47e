//! Shared helpers for the integration tests.
//!
//! Each suite builds its documents from markup and inspects visibility
//! through these helpers.

#![allow(dead_code)]

use hashview_core::dom::Document;
use hashview_core::dom::memory::{MemoryDocument, MemoryLocation};
use hashview_core::router::HashRouter;

/// Router type used throughout the suites.
pub type TestRouter = HashRouter<MemoryDocument, MemoryLocation>;

/// Address every suite starts from.
pub const START_HREF: &str = "http://localhost:8000/index.html";

/// Builds a router over `markup`.
pub fn router_from(markup: &str) -> TestRouter {
	HashRouter::new(
		MemoryDocument::from_markup(markup),
		MemoryLocation::new(START_HREF),
	)
}

/// Returns true if the element with `id` is shown (no `hidden`, no
/// `aria-hidden`).
pub fn is_visible(router: &TestRouter, id: &str) -> bool {
	let document = router.document();
	let node = document
		.element_by_id(id)
		.unwrap_or_else(|| panic!("no element with id '{}'", id));
	!document.has_attribute(&node, "hidden") && !document.has_attribute(&node, "aria-hidden")
}

/// Returns the ids of the shown route entries under the container `router_id`.
pub fn visible_ids(router: &TestRouter, router_id: &str) -> Vec<String> {
	let document = router.document();
	let container = document
		.element_by_id(router_id)
		.unwrap_or_else(|| panic!("no element with id '{}'", router_id));
	document
		.children(&container)
		.into_iter()
		.filter(|child| document.has_class(child, "route"))
		.filter(|child| !document.has_attribute(child, "hidden"))
		.filter_map(|child| document.attribute(&child, "id"))
		.collect()
}

/// Returns the `hidden` and `aria-hidden` values of the element with `id`.
pub fn hidden_pair(router: &TestRouter, id: &str) -> (Option<String>, Option<String>) {
	let document = router.document();
	let node = document
		.element_by_id(id)
		.unwrap_or_else(|| panic!("no element with id '{}'", id));
	(
		document.attribute(&node, "hidden"),
		document.attribute(&node, "aria-hidden"),
	)
}
