//! Client-side hash routing.
//!
//! - [`HashRouter`]: route selection, address updates and dispatch
//! - [`RouterTarget`]: which router container an operation applies to
//! - [`EventRegistry`]: per-router route switch subscriptions, kept in the
//!   document's [`RegistryStore`]
//! - [`selector`]: the selection algorithm on its own
//! - route buttons, bound with [`HashRouter::initialize_route_buttons`]

mod buttons;
mod context;
mod core;
mod events;
pub mod selector;

pub use self::context::RouterTarget;
pub use self::core::HashRouter;
pub use self::events::{
	EventRegistry, IntoRoutePattern, RegistryStore, SharedRegistries, Subscription,
	SubscriptionId, SubscriptionInfo, SubscriptionKind,
};
pub use self::selector::{RouteEntry, Selection};
