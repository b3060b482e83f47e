//! Router settings.
//!
//! Attribute names, marker classes and default container ids used by the
//! router. The defaults describe the conventional markup:
//!
//! ```html
//! <div id="router">
//!     <div class="route" pattern="^/$"></div>
//!     <div class="route" pattern="^/about$"></div>
//!     <div class="route" pattern="." fallback></div>
//! </div>
//! <button class="route-button" destination="/about">About</button>
//! ```
//!
//! Settings can be loaded from TOML or JSON; missing keys keep their
//! defaults.
//!
//! ```ignore
//! use hashview_core::RouterSettings;
//!
//! let settings = RouterSettings::from_toml_str(r#"
//!     default_router_ids = ["app"]
//!     route_class = "view"
//! "#)?;
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for settings loading.
#[derive(Debug, Error)]
pub enum SettingsError {
	/// TOML source could not be parsed.
	#[error("Failed to parse TOML settings: {0}")]
	Toml(#[from] toml::de::Error),

	/// JSON source could not be parsed.
	#[error("Failed to parse JSON settings: {0}")]
	Json(#[from] serde_json::Error),

	/// Settings parsed but are unusable.
	#[error("Invalid router settings: {0}")]
	Invalid(String),
}

/// Names the router reads from the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterSettings {
	/// Container ids tried, in order, when no router is specified.
	pub default_router_ids: Vec<String>,
	/// Class marking a router child as a route entry.
	pub route_class: String,
	/// Class marking an element as a route button for default discovery.
	pub button_class: String,
	/// Attribute holding a route entry's match pattern.
	pub pattern_attribute: String,
	/// Presence-only attribute marking the fallback entry.
	pub fallback_attribute: String,
	/// Attribute holding a route button's destination.
	pub destination_attribute: String,
}

impl Default for RouterSettings {
	fn default() -> Self {
		Self {
			default_router_ids: vec!["router".to_string(), "view-router".to_string()],
			route_class: "route".to_string(),
			button_class: "route-button".to_string(),
			pattern_attribute: "pattern".to_string(),
			fallback_attribute: "fallback".to_string(),
			destination_attribute: "destination".to_string(),
		}
	}
}

impl RouterSettings {
	/// Creates settings with the conventional names.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses settings from TOML.
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		let settings: Self = toml::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Parses settings from JSON.
	pub fn from_json_str(source: &str) -> Result<Self, SettingsError> {
		let settings: Self = serde_json::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Replaces the default container ids.
	pub fn default_router_ids<I, S>(mut self, ids: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.default_router_ids = ids.into_iter().map(Into::into).collect();
		self
	}

	/// Sets the route entry class.
	pub fn route_class(mut self, class: impl Into<String>) -> Self {
		self.route_class = class.into();
		self
	}

	/// Sets the route button class.
	pub fn button_class(mut self, class: impl Into<String>) -> Self {
		self.button_class = class.into();
		self
	}

	/// Sets the pattern attribute name.
	pub fn pattern_attribute(mut self, name: impl Into<String>) -> Self {
		self.pattern_attribute = name.into();
		self
	}

	/// Sets the fallback attribute name.
	pub fn fallback_attribute(mut self, name: impl Into<String>) -> Self {
		self.fallback_attribute = name.into();
		self
	}

	/// Sets the destination attribute name.
	pub fn destination_attribute(mut self, name: impl Into<String>) -> Self {
		self.destination_attribute = name.into();
		self
	}

	/// Checks that every name is usable.
	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.default_router_ids.is_empty() {
			return Err(SettingsError::Invalid(
				"default_router_ids must not be empty".to_string(),
			));
		}
		if let Some(id) = self.default_router_ids.iter().find(|id| id.trim().is_empty()) {
			return Err(SettingsError::Invalid(format!(
				"default router id '{}' is blank",
				id
			)));
		}

		let names = [
			("route_class", &self.route_class),
			("button_class", &self.button_class),
			("pattern_attribute", &self.pattern_attribute),
			("fallback_attribute", &self.fallback_attribute),
			("destination_attribute", &self.destination_attribute),
		];
		for (field, value) in names {
			if value.trim().is_empty() {
				return Err(SettingsError::Invalid(format!("{} must not be empty", field)));
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults() {
		let settings = RouterSettings::default();
		assert_eq!(settings.default_router_ids, vec!["router", "view-router"]);
		assert_eq!(settings.route_class, "route");
		assert_eq!(settings.button_class, "route-button");
		assert_eq!(settings.pattern_attribute, "pattern");
		assert_eq!(settings.fallback_attribute, "fallback");
		assert_eq!(settings.destination_attribute, "destination");
		assert!(settings.validate().is_ok());
	}

	#[rstest]
	fn test_builder() {
		let settings = RouterSettings::new()
			.default_router_ids(["app"])
			.route_class("view")
			.button_class("nav")
			.pattern_attribute("data-pattern")
			.fallback_attribute("data-fallback")
			.destination_attribute("data-to");

		assert_eq!(settings.default_router_ids, vec!["app"]);
		assert_eq!(settings.route_class, "view");
		assert_eq!(settings.button_class, "nav");
		assert_eq!(settings.pattern_attribute, "data-pattern");
		assert_eq!(settings.fallback_attribute, "data-fallback");
		assert_eq!(settings.destination_attribute, "data-to");
	}

	#[rstest]
	fn test_from_toml_partial_keeps_defaults() {
		let settings = RouterSettings::from_toml_str(
			r#"
			default_router_ids = ["app", "main"]
			route_class = "view"
			"#,
		)
		.unwrap();

		assert_eq!(settings.default_router_ids, vec!["app", "main"]);
		assert_eq!(settings.route_class, "view");
		assert_eq!(settings.button_class, "route-button");
	}

	#[rstest]
	fn test_from_json() {
		let settings =
			RouterSettings::from_json_str(r#"{"destination_attribute": "href"}"#).unwrap();
		assert_eq!(settings.destination_attribute, "href");
		assert_eq!(settings.pattern_attribute, "pattern");
	}

	#[rstest]
	#[case(r#"default_router_ids = []"#)]
	#[case(r#"default_router_ids = ["  "]"#)]
	#[case(r#"pattern_attribute = """#)]
	fn test_from_toml_rejects_invalid(#[case] source: &str) {
		let result = RouterSettings::from_toml_str(source);
		assert!(matches!(result, Err(SettingsError::Invalid(_))));
	}

	#[rstest]
	fn test_from_toml_syntax_error() {
		let result = RouterSettings::from_toml_str("route_class = ");
		assert!(matches!(result, Err(SettingsError::Toml(_))));
	}
}
