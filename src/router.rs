//! Hash-fragment view routing
//!
//! This module provides access to hashview-core, which shows one view at a
//! time inside a router container based on the route held in the address
//! fragment.
//!
//! ## Architecture
//!
//! - **Selection**: the first route entry whose pattern matches is revealed,
//!   every other entry gets `hidden` and `aria-hidden`
//! - **Listeners**: per-router callbacks fired after each route switch
//! - **Route buttons**: elements whose click activates a destination route
//! - **Backends**: `web-sys` in the browser, an in-memory document elsewhere
//!
//! ## Example
//!
//! ```rust,ignore
//! use hashview::prelude::*;
//! use hashview::router::dom::web::{WebDocument, WebLocation};
//!
//! let router = HashRouter::new(WebDocument::new()?, WebLocation::new()?);
//!
//! router.on_route_switch("^/settings$", || tracing::info!("settings opened"), false, RouterTarget::Default)?;
//! router.initialize_route_buttons(None, RouterTarget::Default);
//! router.restore(RouterTarget::Default)?;
//! ```

// Re-export all hashview-core functionality
pub use hashview_core::*;
