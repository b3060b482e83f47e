//! Browser document and location (WASM only).
//!
//! Thin wrappers over `web-sys` implementing [`Document`] and [`Location`].

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::{ClickHandler, Document, Location, NodeKey, SelectorError};
use crate::router::{RegistryStore, SharedRegistries};

/// Property used to stash a node's key on the element object itself.
const NODE_KEY_PROPERTY: &str = "__hashviewNodeKey";

/// A route button's native listener and the handler it forwards to.
///
/// The listener is installed once per node; rebinding only swaps the handler.
struct ClickBinding {
	handler: Rc<RefCell<ClickHandler>>,
	_listener: Closure<dyn FnMut(web_sys::MouseEvent)>,
}

thread_local! {
	static NEXT_NODE_KEY: Cell<u64> = const { Cell::new(1) };
	// Node keys are unique per thread, so one store serves every document.
	static REGISTRIES: SharedRegistries = RegistryStore::shared();
	static CLICK_BINDINGS: RefCell<HashMap<NodeKey, ClickBinding>> = RefCell::new(HashMap::new());
}

fn collect(collection: web_sys::HtmlCollection) -> Vec<web_sys::Element> {
	(0..collection.length())
		.filter_map(|index| collection.item(index))
		.collect()
}

/// The page's `document`.
#[derive(Debug, Clone)]
pub struct WebDocument {
	document: web_sys::Document,
}

impl WebDocument {
	/// Wraps the current window's document, if there is one.
	pub fn new() -> Option<Self> {
		web_sys::window()
			.and_then(|window| window.document())
			.map(Self::from_document)
	}

	/// Wraps an existing document.
	pub fn from_document(document: web_sys::Document) -> Self {
		Self { document }
	}

	/// Returns the wrapped document.
	pub fn inner(&self) -> &web_sys::Document {
		&self.document
	}
}

impl Document for WebDocument {
	type Node = web_sys::Element;

	fn element_by_id(&self, id: &str) -> Option<web_sys::Element> {
		self.document.get_element_by_id(id)
	}

	fn query_selector(&self, selector: &str) -> Result<Option<web_sys::Element>, SelectorError> {
		self.document.query_selector(selector).map_err(|err| {
			SelectorError::new(
				selector,
				err.as_string()
					.unwrap_or_else(|| "rejected by the browser".to_string()),
			)
		})
	}

	fn elements_by_class_name(&self, class: &str) -> Vec<web_sys::Element> {
		collect(self.document.get_elements_by_class_name(class))
	}

	fn children(&self, node: &web_sys::Element) -> Vec<web_sys::Element> {
		collect(node.children())
	}

	fn has_class(&self, node: &web_sys::Element, class: &str) -> bool {
		node.class_list().contains(class)
	}

	fn attribute(&self, node: &web_sys::Element, name: &str) -> Option<String> {
		node.get_attribute(name)
	}

	fn set_attribute(&self, node: &web_sys::Element, name: &str, value: &str) {
		let _ = node.set_attribute(name, value);
	}

	fn remove_attribute(&self, node: &web_sys::Element, name: &str) {
		let _ = node.remove_attribute(name);
	}

	fn node_key(&self, node: &web_sys::Element) -> NodeKey {
		let property = JsValue::from_str(NODE_KEY_PROPERTY);
		if let Some(key) = js_sys::Reflect::get(node, &property)
			.ok()
			.and_then(|value| value.as_f64())
		{
			return NodeKey(key as u64);
		}

		let key = NEXT_NODE_KEY.with(|next| {
			let key = next.get();
			next.set(key + 1);
			key
		});
		let _ = js_sys::Reflect::set(node, &property, &JsValue::from_f64(key as f64));
		NodeKey(key)
	}

	fn set_click_handler(&self, node: &web_sys::Element, handler: ClickHandler) -> bool {
		let key = self.node_key(node);
		CLICK_BINDINGS.with(|bindings| {
			let mut bindings = bindings.borrow_mut();
			if let Some(binding) = bindings.get(&key) {
				*binding.handler.borrow_mut() = handler;
				return true;
			}

			let slot = Rc::new(RefCell::new(handler));
			let current = Rc::clone(&slot);
			let listener = Closure::wrap(Box::new(move |_event: web_sys::MouseEvent| {
				let result = {
					let handler = Rc::clone(&current.borrow());
					handler()
				};
				if let Err(err) = result {
					wasm_bindgen::throw_str(&err.to_string());
				}
			}) as Box<dyn FnMut(web_sys::MouseEvent)>);

			match node.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref()) {
				Ok(()) => {
					bindings.insert(
						key,
						ClickBinding {
							handler: slot,
							_listener: listener,
						},
					);
					true
				}
				Err(err) => {
					tracing::warn!(?err, tag = %node.tag_name(), "failed to bind route button");
					false
				}
			}
		})
	}

	fn registries(&self) -> SharedRegistries {
		REGISTRIES.with(SharedRegistries::clone)
	}
}

/// The page's `window.location`.
#[derive(Debug, Clone)]
pub struct WebLocation {
	location: web_sys::Location,
}

impl WebLocation {
	/// Wraps the current window's location, if there is one.
	pub fn new() -> Option<Self> {
		web_sys::window().map(|window| Self {
			location: window.location(),
		})
	}
}

impl Location for WebLocation {
	fn href(&self) -> String {
		self.location.href().unwrap_or_default()
	}

	fn set_href(&self, href: &str) {
		if let Err(err) = self.location.set_href(href) {
			tracing::warn!(?err, href, "failed to update location");
		}
	}
}
