//! DOM abstraction layer.
//!
//! The router never touches a browser API directly. It talks to the element
//! tree through [`Document`] and to the address bar through [`Location`], so
//! the same routing code drives a real page on `wasm32` ([`web`]) and an
//! in-process tree everywhere else ([`memory`]).

pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod web;

use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::error::RouteError;
use crate::router::SharedRegistries;

/// Handler installed on a clickable element.
///
/// Returns the route that was activated, or the error raised while doing so.
pub type ClickHandler = Rc<dyn Fn() -> Result<String, RouteError>>;

/// Stable identity of a node, used to attach per-router state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(pub u64);

impl fmt::Display for NodeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "node#{}", self.0)
	}
}

/// A selector query that the document could not evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid selector '{selector}': {reason}")]
pub struct SelectorError {
	/// The selector as given.
	pub selector: String,
	/// Why it was rejected.
	pub reason: String,
}

impl SelectorError {
	/// Creates a new selector error.
	pub fn new(selector: impl Into<String>, reason: impl Into<String>) -> Self {
		Self {
			selector: selector.into(),
			reason: reason.into(),
		}
	}
}

/// Element tree operations used by the router.
///
/// All methods take `&self`: documents are shared handles with interior
/// mutability, and a click handler may call back into the router while the
/// document is in use.
pub trait Document {
	/// Handle to an element.
	type Node: Clone + fmt::Debug + 'static;

	/// Finds an element by id.
	fn element_by_id(&self, id: &str) -> Option<Self::Node>;

	/// Returns the first element, in document order, matching `selector`.
	fn query_selector(&self, selector: &str) -> Result<Option<Self::Node>, SelectorError>;

	/// Returns every element carrying `class`, in document order.
	fn elements_by_class_name(&self, class: &str) -> Vec<Self::Node>;

	/// Returns the direct element children of `node`, in document order.
	fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

	/// Returns true if `node`'s class list contains `class`.
	fn has_class(&self, node: &Self::Node, class: &str) -> bool;

	/// Reads an attribute. `None` means the attribute is absent.
	fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

	/// Writes an attribute.
	fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);

	/// Removes an attribute if present.
	fn remove_attribute(&self, node: &Self::Node, name: &str);

	/// Returns the node's stable key. Repeated calls for the same node return
	/// the same key.
	fn node_key(&self, node: &Self::Node) -> NodeKey;

	/// Installs `handler` as the node's click handler, replacing any handler
	/// installed before.
	///
	/// Returns false if the handler could not be installed.
	fn set_click_handler(&self, node: &Self::Node, handler: ClickHandler) -> bool;

	/// Returns the route switch registries of this document.
	///
	/// Every call, on any handle to the same document, returns the same store.
	fn registries(&self) -> SharedRegistries;

	/// Returns true if the attribute is present, whatever its value.
	fn has_attribute(&self, node: &Self::Node, name: &str) -> bool {
		self.attribute(node, name).is_some()
	}
}

/// The address bar.
pub trait Location {
	/// Returns the full current address.
	fn href(&self) -> String;

	/// Replaces the full current address.
	fn set_href(&self, href: &str);
}

/// Returns `href` with its fragment replaced by `fragment`.
///
/// Everything before the first `#` is kept verbatim; the fragment is not
/// encoded.
pub fn with_fragment(href: &str, fragment: &str) -> String {
	let base = href.split_once('#').map_or(href, |(base, _)| base);
	format!("{}#{}", base, fragment)
}

/// Returns the fragment of `href`, without the leading `#`.
pub fn fragment(href: &str) -> Option<&str> {
	href.split_once('#').map(|(_, fragment)| fragment)
}
