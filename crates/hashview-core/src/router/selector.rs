//! Route selection.
//!
//! Selection runs in two steps. [`select`] reads the route entries and
//! decides which one to reveal without touching the document; [`apply`]
//! writes the visibility attributes. A failing selection therefore leaves
//! every entry exactly as it was.

use crate::dom::Document;
use crate::error::{Result, RouteError};
use crate::router::events::compile;
use crate::settings::RouterSettings;

/// Attribute marking an entry as hidden.
pub const HIDDEN_ATTRIBUTE: &str = "hidden";

/// Attribute mirroring [`HIDDEN_ATTRIBUTE`] for assistive technology.
pub const ARIA_HIDDEN_ATTRIBUTE: &str = "aria-hidden";

/// A route child of a router container, as read from the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry<N> {
	/// The element.
	pub node: N,
	/// The match pattern, `None` when the attribute is missing.
	pub pattern: Option<String>,
	/// Whether the entry carries the fallback marker.
	pub fallback: bool,
}

/// The outcome of a successful selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
	/// Index of the chosen entry.
	pub index: usize,
	/// Whether the entry was chosen as the fallback.
	pub fallback: bool,
}

/// Reads the route entries of `router`, in document order.
///
/// Children without the route class are skipped.
pub fn route_entries<D: Document>(
	document: &D,
	settings: &RouterSettings,
	router: &D::Node,
) -> Vec<RouteEntry<D::Node>> {
	document
		.children(router)
		.into_iter()
		.filter(|child| document.has_class(child, &settings.route_class))
		.map(|node| RouteEntry {
			pattern: document.attribute(&node, &settings.pattern_attribute),
			fallback: document.has_attribute(&node, &settings.fallback_attribute),
			node,
		})
		.collect()
}

/// Chooses the entry to reveal for `route`.
///
/// The first entry whose pattern matches anywhere in `route` wins. Once an
/// entry has won, later patterns are no longer compiled or matched, but
/// every entry must still carry a pattern. Without a match, the first
/// fallback entry wins.
pub fn select<N>(entries: &[RouteEntry<N>], route: &str) -> Result<Selection> {
	let mut selected = None;
	for (index, entry) in entries.iter().enumerate() {
		let pattern = entry
			.pattern
			.as_deref()
			.ok_or(RouteError::MissingPattern { index })?;
		if selected.is_none() && compile(pattern)?.is_match(route) {
			selected = Some(index);
		}
	}

	if let Some(index) = selected {
		return Ok(Selection {
			index,
			fallback: false,
		});
	}

	entries
		.iter()
		.position(|entry| entry.fallback)
		.map(|index| Selection {
			index,
			fallback: true,
		})
		.ok_or_else(|| RouteError::NoMatch {
			route: route.to_string(),
		})
}

/// Reveals the selected entry and hides every other one.
pub fn apply<D: Document>(document: &D, entries: &[RouteEntry<D::Node>], selection: Selection) {
	for (index, entry) in entries.iter().enumerate() {
		if index == selection.index {
			document.remove_attribute(&entry.node, HIDDEN_ATTRIBUTE);
			document.remove_attribute(&entry.node, ARIA_HIDDEN_ATTRIBUTE);
		} else {
			document.set_attribute(&entry.node, HIDDEN_ATTRIBUTE, "hidden");
			document.set_attribute(&entry.node, ARIA_HIDDEN_ATTRIBUTE, "true");
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dom::memory::MemoryDocument;
	use rstest::rstest;

	fn entry(pattern: Option<&str>, fallback: bool) -> RouteEntry<()> {
		RouteEntry {
			node: (),
			pattern: pattern.map(str::to_string),
			fallback,
		}
	}

	#[rstest]
	#[case("/", 0)]
	#[case("/foo", 1)]
	fn test_select_exact(#[case] route: &str, #[case] expected: usize) {
		let entries = [entry(Some("^/$"), false), entry(Some("^/foo$"), false)];
		let selection = select(&entries, route).unwrap();
		assert_eq!(
			selection,
			Selection {
				index: expected,
				fallback: false
			}
		);
	}

	#[rstest]
	fn test_select_first_match_wins() {
		let entries = [entry(Some("foo"), false), entry(Some("^/foo$"), false)];
		assert_eq!(select(&entries, "/foo").unwrap().index, 0);
	}

	#[rstest]
	fn test_select_fallback_position_independent() {
		let entries = [
			entry(Some("^/a$"), false),
			entry(Some("^/b$"), false),
			entry(Some("^/c$"), true),
			entry(Some("^/d$"), true),
		];
		assert_eq!(
			select(&entries, "/zzz").unwrap(),
			Selection {
				index: 2,
				fallback: true
			}
		);
	}

	#[rstest]
	fn test_select_match_beats_fallback() {
		let entries = [entry(Some("^/$"), true), entry(Some("^/y$"), false)];
		assert_eq!(select(&entries, "/y").unwrap().index, 1);
	}

	#[rstest]
	fn test_select_no_match() {
		let entries = [entry(Some("^/$"), false)];
		let err = select(&entries, "nothing").unwrap_err();
		assert!(matches!(err, RouteError::NoMatch { ref route } if route == "nothing"));
	}

	#[rstest]
	fn test_select_empty() {
		let entries: [RouteEntry<()>; 0] = [];
		assert!(matches!(
			select(&entries, "/"),
			Err(RouteError::NoMatch { .. })
		));
	}

	#[rstest]
	fn test_select_missing_pattern_after_match() {
		let entries = [entry(Some("^/$"), false), entry(None, false)];
		assert!(matches!(
			select(&entries, "/"),
			Err(RouteError::MissingPattern { index: 1 })
		));
	}

	#[rstest]
	fn test_select_missing_pattern_on_fallback() {
		let entries = [entry(Some("^/a$"), false), entry(None, true)];
		assert!(matches!(
			select(&entries, "/zzz"),
			Err(RouteError::MissingPattern { index: 1 })
		));
	}

	#[rstest]
	fn test_select_empty_pattern_matches_everything() {
		let entries = [entry(Some(""), false), entry(Some("^/b$"), false)];
		assert_eq!(select(&entries, "/b").unwrap().index, 0);
	}

	#[rstest]
	fn test_select_invalid_pattern_before_match() {
		let entries = [entry(Some("(("), false), entry(Some("^/$"), false)];
		assert!(matches!(
			select(&entries, "/"),
			Err(RouteError::InvalidPattern { .. })
		));
	}

	#[rstest]
	fn test_select_invalid_pattern_after_match_not_compiled() {
		let entries = [entry(Some("^/$"), false), entry(Some("(("), false)];
		assert_eq!(select(&entries, "/").unwrap().index, 0);
	}

	#[rstest]
	fn test_route_entries_skip_unmarked_children() {
		let document = MemoryDocument::from_markup(
			r#"
			<div id="router">
				<div class="route" pattern="^/$"></div>
				<aside pattern="^/ignored$"></aside>
				<div class="route extra" fallback></div>
			</div>
			"#,
		);
		let router = document.element_by_id("router").unwrap();
		let entries = route_entries(&document, &RouterSettings::default(), &router);

		assert_eq!(entries.len(), 2);
		assert_eq!(entries[0].pattern.as_deref(), Some("^/$"));
		assert!(!entries[0].fallback);
		assert_eq!(entries[1].pattern, None);
		assert!(entries[1].fallback);
	}

	#[rstest]
	fn test_apply_visibility_pair() {
		let document = MemoryDocument::from_markup(
			r#"
			<div id="router">
				<div class="route" pattern="a" id="a" hidden aria-hidden="true"></div>
				<div class="route" pattern="b" id="b"></div>
			</div>
			"#,
		);
		let router = document.element_by_id("router").unwrap();
		let entries = route_entries(&document, &RouterSettings::default(), &router);
		apply(
			&document,
			&entries,
			Selection {
				index: 0,
				fallback: false,
			},
		);

		let a = document.element_by_id("a").unwrap();
		let b = document.element_by_id("b").unwrap();
		assert_eq!(document.attribute(&a, HIDDEN_ATTRIBUTE), None);
		assert_eq!(document.attribute(&a, ARIA_HIDDEN_ATTRIBUTE), None);
		assert_eq!(document.attribute(&b, HIDDEN_ATTRIBUTE).as_deref(), Some("hidden"));
		assert_eq!(
			document.attribute(&b, ARIA_HIDDEN_ATTRIBUTE).as_deref(),
			Some("true")
		);
	}
}
