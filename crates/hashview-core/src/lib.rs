//! hashview core
//!
//! A hash-fragment view router. A router container holds route entries, each
//! tagged with a regular expression; activating a route reveals the first
//! matching entry (or the fallback entry), hides the others, writes the route
//! into the address fragment and notifies the router's subscribers.
//!
//! ```html
//! <div id="router">
//!     <section class="route" pattern="^/$">Home</section>
//!     <section class="route" pattern="^/users">Users</section>
//!     <section class="route" pattern="." fallback>Not found</section>
//! </div>
//! <a class="route-button" destination="/users">Users</a>
//! ```
//!
//! ## Modules
//!
//! - [`router`]: [`HashRouter`], subscriptions and route buttons
//! - [`dom`]: the [`Document`](dom::Document) and [`Location`](dom::Location)
//!   boundary, with an in-memory backend and a `web-sys` backend on `wasm32`
//! - [`settings`]: attribute names, marker classes and default container ids
//! - [`error`]: [`RouteError`]
//!
//! ## Example
//!
//! ```ignore
//! use hashview_core::dom::web::{WebDocument, WebLocation};
//! use hashview_core::router::{HashRouter, RouterTarget};
//!
//! let router = HashRouter::new(WebDocument::new().unwrap(), WebLocation::new().unwrap());
//! router.initialize_route_buttons(None, RouterTarget::Default);
//! router.on_route_switch("^/users", || load_users(), false, RouterTarget::Default)?;
//! router.restore(RouterTarget::Default)?;
//! ```
//!
//! ## Logging
//!
//! Selections, subscriptions and button bindings are reported through
//! `tracing` at `debug`/`trace` level. Install a subscriber to see them.

#![warn(missing_docs)]

pub mod dom;
pub mod error;
pub mod router;
pub mod settings;

pub use error::{Result, RouteError};
pub use router::{HashRouter, RouterTarget, SubscriptionId};
pub use settings::{RouterSettings, SettingsError};
