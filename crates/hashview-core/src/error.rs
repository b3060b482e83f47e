//! Error types for hashview-core

use thiserror::Error;

/// Error type for routing operations.
///
/// Every variant is fatal for the call that produced it: nothing is retried
/// and no state is rolled back.
#[derive(Debug, Error)]
pub enum RouteError {
	/// A route entry was declared without a `pattern` attribute.
	///
	/// `index` is the position of the offending entry among the router's
	/// route entries, in document order.
	#[error("Route is missing a 'pattern' attribute")]
	MissingPattern {
		/// Position of the entry among the route entries.
		index: usize,
	},

	/// The requested route matched no entry and no fallback is declared.
	#[error("No route matches requested route, and no fallback provided")]
	NoMatch {
		/// The route that was requested.
		route: String,
	},

	/// The router container could not be found.
	#[error("Router could not be resolved from {target}: {reason}")]
	UnresolvedRouter {
		/// Human readable description of the lookup.
		target: String,
		/// Why the lookup failed.
		reason: String,
	},

	/// A route button was clicked without a `destination` attribute.
	#[error("Route button has no 'destination' attribute")]
	MissingDestination,

	/// A pattern is not a valid regular expression.
	#[error("Invalid route pattern '{pattern}': {source}")]
	InvalidPattern {
		/// The pattern source as written.
		pattern: String,
		/// The underlying regex compilation error.
		#[source]
		source: regex::Error,
	},
}

impl RouteError {
	pub(crate) fn unresolved(target: impl Into<String>, reason: impl Into<String>) -> Self {
		Self::UnresolvedRouter {
			target: target.into(),
			reason: reason.into(),
		}
	}

	/// Returns true for errors caused by how the document is declared
	/// (missing or malformed attributes) rather than by the requested route.
	pub fn is_configuration(&self) -> bool {
		matches!(
			self,
			Self::MissingPattern { .. } | Self::InvalidPattern { .. } | Self::MissingDestination
		)
	}
}

/// Result type for routing operations.
pub type Result<T> = std::result::Result<T, RouteError>;
