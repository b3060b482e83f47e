//! Router container resolution.

use std::fmt;

use crate::dom::Document;
use crate::error::{Result, RouteError};
use crate::settings::RouterSettings;

/// Which router container an operation applies to.
///
/// # Example
///
/// ```ignore
/// use hashview_core::router::RouterTarget;
///
/// router.set_route("/", RouterTarget::Default)?;
/// router.set_route("/", "#sidebar")?;
/// router.set_route("/", RouterTarget::Element(node))?;
/// ```
#[derive(Clone)]
pub enum RouterTarget<N> {
	/// The first element whose id is one of the configured defaults.
	Default,
	/// A specific element.
	Element(N),
	/// The first element matching a selector. An empty selector behaves
	/// like [`RouterTarget::Default`].
	Selector(String),
}

impl<N> Default for RouterTarget<N> {
	fn default() -> Self {
		Self::Default
	}
}

impl<N: fmt::Debug> fmt::Debug for RouterTarget<N> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Default => f.write_str("Default"),
			Self::Element(node) => f.debug_tuple("Element").field(node).finish(),
			Self::Selector(selector) => f.debug_tuple("Selector").field(selector).finish(),
		}
	}
}

impl<N> From<&str> for RouterTarget<N> {
	fn from(selector: &str) -> Self {
		Self::Selector(selector.to_string())
	}
}

impl<N> From<String> for RouterTarget<N> {
	fn from(selector: String) -> Self {
		Self::Selector(selector)
	}
}

impl<N> From<Option<N>> for RouterTarget<N> {
	fn from(node: Option<N>) -> Self {
		node.map_or(Self::Default, Self::Element)
	}
}

/// Finds the container `target` refers to.
pub(crate) fn resolve<D: Document>(
	document: &D,
	settings: &RouterSettings,
	target: &RouterTarget<D::Node>,
) -> Result<D::Node> {
	match target {
		RouterTarget::Element(node) => Ok(node.clone()),
		RouterTarget::Selector(selector) if !selector.is_empty() => {
			let described = format!("selector '{}'", selector);
			match document.query_selector(selector) {
				Ok(Some(node)) => Ok(node),
				Ok(None) => Err(RouteError::unresolved(described, "no element matches")),
				Err(err) => Err(RouteError::unresolved(described, err.to_string())),
			}
		}
		_ => settings
			.default_router_ids
			.iter()
			.find_map(|id| document.element_by_id(id))
			.ok_or_else(|| {
				RouteError::unresolved(
					"default router",
					format!(
						"no element with id {}",
						settings
							.default_router_ids
							.iter()
							.map(|id| format!("'{}'", id))
							.collect::<Vec<_>>()
							.join(" or ")
					),
				)
			}),
	}
}
