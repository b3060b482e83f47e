//! # Hashview
//!
//! A hash-fragment view router for browser frontends.
//!
//! A page declares a router container whose direct children are route
//! entries, each carrying a regular-expression `pattern`. Activating a route
//! writes it into the address fragment, reveals the first matching entry
//! (or the entry marked `fallback`) and hides the rest.
//!
//! ```html
//! <div id="router">
//!     <div class="route" pattern="^/$">Home</div>
//!     <div class="route" pattern="^/about$">About</div>
//!     <div class="route" pattern="^/404$" fallback>Not found</div>
//! </div>
//! <button class="route-button" destination="/about">About</button>
//! ```
//!
//! ## Quick Example
//!
//! ```rust
//! use hashview::prelude::*;
//! use hashview::router::dom::memory::{MemoryDocument, MemoryLocation};
//!
//! let document = MemoryDocument::from_markup(
//!     r#"<div id="router">
//!         <div class="route" pattern="^/$"></div>
//!         <div class="route" pattern="^/about$"></div>
//!     </div>"#,
//! );
//! let router = HashRouter::new(document, MemoryLocation::default());
//!
//! router.set_route("/about", RouterTarget::Default).unwrap();
//! assert_eq!(router.current_route().as_deref(), Some("/about"));
//! ```

pub mod router;

pub use hashview_core::{
	HashRouter, Result, RouteError, RouterSettings, RouterTarget, SettingsError, SubscriptionId,
};

pub mod prelude {
	pub use hashview_core::dom::{Document, Location};
	pub use hashview_core::router::{SubscriptionInfo, SubscriptionKind};
	pub use crate::{
		HashRouter, RouteError, RouterSettings, RouterTarget, SettingsError, SubscriptionId,
	};
}
