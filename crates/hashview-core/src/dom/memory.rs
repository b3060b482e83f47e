//! In-memory document and location.
//!
//! A small element tree that implements [`Document`] without a browser. It is
//! used on native targets and by the test suites.
//!
//! ```ignore
//! use hashview_core::dom::memory::{MemoryDocument, MemoryLocation};
//!
//! let document = MemoryDocument::from_markup(r#"
//!     <div id="router">
//!         <div class="route" pattern="^/$" id="home"></div>
//!     </div>
//! "#);
//! let location = MemoryLocation::new("http://localhost/");
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::{ClickHandler, Document, Location, NodeKey, SelectorError};
use crate::error::RouteError;
use crate::router::{RegistryStore, SharedRegistries};

/// Handle to an element of a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemoryNode(usize);

struct NodeData {
	tag: String,
	attributes: Vec<(String, String)>,
	children: Vec<usize>,
	click: Option<ClickHandler>,
}

impl NodeData {
	fn new(tag: &str) -> Self {
		Self {
			tag: tag.to_ascii_lowercase(),
			attributes: Vec::new(),
			children: Vec::new(),
			click: None,
		}
	}

	fn attribute(&self, name: &str) -> Option<&str> {
		self.attributes
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	fn has_class(&self, class: &str) -> bool {
		self.attribute("class")
			.is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
	}
}

struct Tree {
	nodes: Vec<NodeData>,
}

impl Tree {
	/// Element indices below the root, in document order.
	fn document_order(&self) -> Vec<usize> {
		let mut order = Vec::with_capacity(self.nodes.len());
		let mut stack: Vec<usize> = self.nodes[0].children.iter().rev().copied().collect();
		while let Some(index) = stack.pop() {
			order.push(index);
			stack.extend(self.nodes[index].children.iter().rev().copied());
		}
		order
	}
}

/// An element tree held in memory.
///
/// Cloning is cheap and yields another handle to the same tree.
#[derive(Clone)]
pub struct MemoryDocument {
	tree: Rc<RefCell<Tree>>,
	registries: SharedRegistries,
}

impl fmt::Debug for MemoryDocument {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemoryDocument")
			.field("elements", &(self.tree.borrow().nodes.len() - 1))
			.finish()
	}
}

impl Default for MemoryDocument {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryDocument {
	/// Creates a document containing only an empty `body`.
	pub fn new() -> Self {
		Self {
			tree: Rc::new(RefCell::new(Tree {
				nodes: vec![NodeData::new("body")],
			})),
			registries: RegistryStore::shared(),
		}
	}

	/// Builds a document from HTML markup.
	///
	/// Elements and their attributes are kept; text and comments are dropped.
	/// Bare attributes such as `hidden` or `fallback` are stored with an empty
	/// value.
	pub fn from_markup(markup: &str) -> Self {
		let document = Self::new();
		let fragment = scraper::Html::parse_fragment(markup);
		let root = document.root();
		for child in fragment
			.root_element()
			.children()
			.filter_map(scraper::ElementRef::wrap)
		{
			document.import(root, child);
		}
		document
	}

	fn import(&self, parent: MemoryNode, element: scraper::ElementRef<'_>) {
		let attributes: Vec<(&str, &str)> = element.value().attrs().collect();
		let created = self.append_element(parent, element.value().name(), &attributes);
		for child in element.children().filter_map(scraper::ElementRef::wrap) {
			self.import(created, child);
		}
	}

	/// Returns the `body` element.
	pub fn root(&self) -> MemoryNode {
		MemoryNode(0)
	}

	/// Appends a new element under `parent` and returns it.
	pub fn append_element(
		&self,
		parent: MemoryNode,
		tag: &str,
		attributes: &[(&str, &str)],
	) -> MemoryNode {
		let mut tree = self.tree.borrow_mut();
		let index = tree.nodes.len();
		let mut data = NodeData::new(tag);
		data.attributes = attributes
			.iter()
			.map(|(name, value)| (name.to_ascii_lowercase(), value.to_string()))
			.collect();
		tree.nodes.push(data);
		if let Some(parent) = tree.nodes.get_mut(parent.0) {
			parent.children.push(index);
		}
		MemoryNode(index)
	}

	/// Returns the element's tag name.
	pub fn tag_name(&self, node: MemoryNode) -> Option<String> {
		self.tree.borrow().nodes.get(node.0).map(|n| n.tag.clone())
	}

	/// Returns true if the element carries the `hidden` attribute.
	pub fn is_hidden(&self, node: MemoryNode) -> bool {
		self.has_attribute(&node, "hidden")
	}

	/// Returns true if a click handler is installed on the element.
	pub fn has_click_handler(&self, node: MemoryNode) -> bool {
		self.tree
			.borrow()
			.nodes
			.get(node.0)
			.is_some_and(|n| n.click.is_some())
	}

	/// Clicks the element.
	///
	/// Returns `None` when no handler is installed, otherwise the handler's
	/// result.
	pub fn click(&self, node: MemoryNode) -> Option<Result<String, RouteError>> {
		// The handler re-enters the document, so it must run unborrowed.
		let handler = self.tree.borrow().nodes.get(node.0)?.click.clone()?;
		Some(handler())
	}

	fn find_first(&self, predicate: impl Fn(&NodeData) -> bool) -> Option<MemoryNode> {
		let tree = self.tree.borrow();
		tree.document_order()
			.into_iter()
			.find(|&index| predicate(&tree.nodes[index]))
			.map(MemoryNode)
	}
}

impl Document for MemoryDocument {
	type Node = MemoryNode;

	fn element_by_id(&self, id: &str) -> Option<MemoryNode> {
		self.find_first(|node| node.attribute("id") == Some(id))
	}

	fn query_selector(&self, selector: &str) -> Result<Option<MemoryNode>, SelectorError> {
		let compound = CompoundSelector::parse(selector)?;
		Ok(self.find_first(|node| compound.matches(node)))
	}

	fn elements_by_class_name(&self, class: &str) -> Vec<MemoryNode> {
		let wanted: Vec<&str> = class.split_whitespace().collect();
		if wanted.is_empty() {
			return Vec::new();
		}
		let tree = self.tree.borrow();
		tree.document_order()
			.into_iter()
			.filter(|&index| wanted.iter().all(|c| tree.nodes[index].has_class(c)))
			.map(MemoryNode)
			.collect()
	}

	fn children(&self, node: &MemoryNode) -> Vec<MemoryNode> {
		self.tree
			.borrow()
			.nodes
			.get(node.0)
			.map(|n| n.children.iter().copied().map(MemoryNode).collect())
			.unwrap_or_default()
	}

	fn has_class(&self, node: &MemoryNode, class: &str) -> bool {
		self.tree
			.borrow()
			.nodes
			.get(node.0)
			.is_some_and(|n| n.has_class(class))
	}

	fn attribute(&self, node: &MemoryNode, name: &str) -> Option<String> {
		self.tree
			.borrow()
			.nodes
			.get(node.0)?
			.attribute(name)
			.map(str::to_string)
	}

	fn set_attribute(&self, node: &MemoryNode, name: &str, value: &str) {
		let mut tree = self.tree.borrow_mut();
		let Some(data) = tree.nodes.get_mut(node.0) else {
			return;
		};
		let name = name.to_ascii_lowercase();
		match data.attributes.iter_mut().find(|(key, _)| *key == name) {
			Some((_, existing)) => *existing = value.to_string(),
			None => data.attributes.push((name, value.to_string())),
		}
	}

	fn remove_attribute(&self, node: &MemoryNode, name: &str) {
		if let Some(data) = self.tree.borrow_mut().nodes.get_mut(node.0) {
			data.attributes.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
		}
	}

	fn node_key(&self, node: &MemoryNode) -> NodeKey {
		NodeKey(node.0 as u64)
	}

	fn set_click_handler(&self, node: &MemoryNode, handler: ClickHandler) -> bool {
		match self.tree.borrow_mut().nodes.get_mut(node.0) {
			Some(data) => {
				data.click = Some(handler);
				true
			}
			None => false,
		}
	}

	fn registries(&self) -> SharedRegistries {
		Rc::clone(&self.registries)
	}
}

/// One compound selector: `tag#id.class[attr][attr=value]`.
///
/// Combinators and selector lists are rejected.
#[derive(Debug, Default, PartialEq, Eq)]
struct CompoundSelector {
	tag: Option<String>,
	ids: Vec<String>,
	classes: Vec<String>,
	attributes: Vec<(String, Option<String>)>,
}

fn name_len(s: &str) -> usize {
	s.find(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_'))
		.unwrap_or(s.len())
}

impl CompoundSelector {
	fn parse(selector: &str) -> Result<Self, SelectorError> {
		let mut rest = selector.trim();
		if rest.is_empty() {
			return Err(SelectorError::new(selector, "empty selector"));
		}

		let mut parsed = Self::default();
		if let Some(stripped) = rest.strip_prefix('*') {
			rest = stripped;
		} else {
			let end = name_len(rest);
			if end > 0 {
				parsed.tag = Some(rest[..end].to_ascii_lowercase());
				rest = &rest[end..];
			}
		}

		while let Some(c) = rest.chars().next() {
			match c {
				'#' | '.' => {
					let body = &rest[1..];
					let end = name_len(body);
					if end == 0 {
						return Err(SelectorError::new(
							selector,
							format!("expected a name after '{}'", c),
						));
					}
					let name = body[..end].to_string();
					if c == '#' {
						parsed.ids.push(name);
					} else {
						parsed.classes.push(name);
					}
					rest = &body[end..];
				}
				'[' => {
					let close = rest.find(']').ok_or_else(|| {
						SelectorError::new(selector, "unterminated attribute selector")
					})?;
					let inner = rest[1..close].trim();
					let (name, value) = match inner.split_once('=') {
						Some((name, value)) => (
							name.trim(),
							Some(
								value
									.trim()
									.trim_matches(|q| q == '"' || q == '\'')
									.to_string(),
							),
						),
						None => (inner, None),
					};
					if name.is_empty() || name_len(name) != name.len() {
						return Err(SelectorError::new(
							selector,
							format!("invalid attribute name '{}'", name),
						));
					}
					parsed.attributes.push((name.to_ascii_lowercase(), value));
					rest = &rest[close + 1..];
				}
				_ => {
					return Err(SelectorError::new(
						selector,
						format!("unsupported syntax at '{}'", rest),
					));
				}
			}
		}
		Ok(parsed)
	}

	fn matches(&self, node: &NodeData) -> bool {
		self.tag.as_ref().is_none_or(|tag| *tag == node.tag)
			&& self.ids.iter().all(|id| node.attribute("id") == Some(id))
			&& self.classes.iter().all(|class| node.has_class(class))
			&& self.attributes.iter().all(|(name, value)| {
				match (node.attribute(name), value) {
					(Some(actual), Some(expected)) => actual == expected,
					(Some(_), None) => true,
					(None, _) => false,
				}
			})
	}
}

/// An address held in memory.
///
/// Cloning is cheap and yields another handle to the same address.
#[derive(Debug, Clone)]
pub struct MemoryLocation {
	href: Rc<RefCell<String>>,
}

impl Default for MemoryLocation {
	fn default() -> Self {
		Self::new("http://localhost/")
	}
}

impl MemoryLocation {
	/// Creates a location pointing at `href`.
	pub fn new(href: impl Into<String>) -> Self {
		Self {
			href: Rc::new(RefCell::new(href.into())),
		}
	}
}

impl Location for MemoryLocation {
	fn href(&self) -> String {
		self.href.borrow().clone()
	}

	fn set_href(&self, href: &str) {
		*self.href.borrow_mut() = href.to_string();
	}
}
