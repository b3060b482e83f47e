//! Core Router Implementation.
//!
//! This module provides the [`HashRouter`] handle: route selection, address
//! updates and route switch dispatch.

use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use super::context::{self, RouterTarget};
use super::events::{
	IntoRoutePattern, Subscription, SubscriptionId, SubscriptionInfo, SubscriptionKind,
};
use super::selector;
use crate::dom::{self, Document, Location, NodeKey};
use crate::error::Result;
use crate::settings::RouterSettings;

pub(super) struct RouterInner<D, L> {
	document: D,
	location: L,
	settings: RouterSettings,
}

/// A hash-fragment view router.
///
/// The handle is cheap to clone; clones share the document and the
/// location. Subscriptions belong to the router container and are kept by
/// the document, so every handle over the same document sees them. It is
/// single-threaded and meant to live on the UI thread.
///
/// # Example
///
/// ```ignore
/// use hashview_core::dom::memory::{MemoryDocument, MemoryLocation};
/// use hashview_core::router::{HashRouter, RouterTarget};
///
/// let document = MemoryDocument::from_markup(r#"
///     <div id="router">
///         <div class="route" pattern="^/$"></div>
///         <div class="route" pattern="^/users$"></div>
///     </div>
/// "#);
/// let router = HashRouter::new(document, MemoryLocation::default());
///
/// router.on_route_switch("^/users$", || println!("users"), false, RouterTarget::Default)?;
/// router.set_route("/users", RouterTarget::Default)?;
/// ```
pub struct HashRouter<D, L> {
	inner: Rc<RouterInner<D, L>>,
}

impl<D, L> Clone for HashRouter<D, L> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<D: Document + fmt::Debug, L: fmt::Debug> fmt::Debug for HashRouter<D, L> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HashRouter")
			.field("document", &self.inner.document)
			.field("location", &self.inner.location)
			.field("routers", &self.inner.document.registries().borrow().len())
			.finish()
	}
}

impl<D: Document, L: Location> HashRouter<D, L> {
	/// Creates a router with the conventional settings.
	pub fn new(document: D, location: L) -> Self {
		Self::with_settings(document, location, RouterSettings::default())
	}

	/// Creates a router with custom settings.
	pub fn with_settings(document: D, location: L, settings: RouterSettings) -> Self {
		Self {
			inner: Rc::new(RouterInner {
				document,
				location,
				settings,
			}),
		}
	}

	pub(super) fn downgrade(&self) -> Weak<RouterInner<D, L>> {
		Rc::downgrade(&self.inner)
	}

	pub(super) fn upgrade(inner: &Weak<RouterInner<D, L>>) -> Option<Self> {
		inner.upgrade().map(|inner| Self { inner })
	}

	/// Returns the document.
	pub fn document(&self) -> &D {
		&self.inner.document
	}

	/// Returns the location.
	pub fn location(&self) -> &L {
		&self.inner.location
	}

	/// Returns the settings.
	pub fn settings(&self) -> &RouterSettings {
		&self.inner.settings
	}

	/// Finds the router container `target` refers to.
	pub fn resolve(&self, target: &RouterTarget<D::Node>) -> Result<D::Node> {
		context::resolve(&self.inner.document, &self.inner.settings, target)
	}

	/// Activates `route` on the target router.
	///
	/// In order: the address fragment is set to `route`, the first route
	/// entry whose pattern matches (or else the first fallback entry) is
	/// revealed while every other entry is hidden, and then every
	/// subscription of that router whose pattern matches is invoked.
	///
	/// Returns `route` unchanged.
	///
	/// # Errors
	///
	/// - [`RouteError::UnresolvedRouter`](crate::error::RouteError::UnresolvedRouter)
	///   when the container cannot be found. Nothing is changed.
	/// - [`RouteError::MissingPattern`](crate::error::RouteError::MissingPattern),
	///   [`RouteError::InvalidPattern`](crate::error::RouteError::InvalidPattern) or
	///   [`RouteError::NoMatch`](crate::error::RouteError::NoMatch) when no entry can
	///   be selected. The address has already been updated; visibility is untouched
	///   and no subscription fires.
	pub fn set_route(&self, route: &str, target: impl Into<RouterTarget<D::Node>>) -> Result<String> {
		let router = self.resolve(&target.into())?;

		let href = dom::with_fragment(&self.inner.location.href(), route);
		self.inner.location.set_href(&href);

		let entries = selector::route_entries(&self.inner.document, &self.inner.settings, &router);
		let selection = selector::select(&entries, route)?;
		selector::apply(&self.inner.document, &entries, selection);
		debug!(
			route,
			index = selection.index,
			fallback = selection.fallback,
			"route selected"
		);

		self.dispatch(self.inner.document.node_key(&router), route);
		Ok(route.to_string())
	}

	/// Invokes the matching subscriptions of one router.
	///
	/// Iterates a snapshot, so callbacks may subscribe, unsubscribe or
	/// re-enter [`set_route`](Self::set_route) freely. No registry borrow is
	/// held while a callback runs.
	fn dispatch(&self, key: NodeKey, route: &str) {
		let registries = self.inner.document.registries();
		let snapshot = match registries.borrow().get(key) {
			Some(registry) => registry.snapshot(),
			None => return,
		};

		for subscription in snapshot {
			if !subscription.matches(route) || !subscription.claim() {
				continue;
			}
			trace!(id = %subscription.id(), route, "dispatching route switch");
			subscription.invoke();

			if subscription.kind() == SubscriptionKind::OneShot {
				if let Some(registry) = registries.borrow_mut().get_mut(key) {
					registry.remove(subscription.id());
				}
			}
		}
	}

	/// Subscribes `callback` to route switches on the target router.
	///
	/// The callback runs after every successful [`set_route`](Self::set_route)
	/// whose route matches `pattern` anywhere. With `once`, it runs at most
	/// once and then removes itself.
	pub fn on_route_switch<F>(
		&self,
		pattern: impl IntoRoutePattern,
		callback: F,
		once: bool,
		target: impl Into<RouterTarget<D::Node>>,
	) -> Result<SubscriptionId>
	where
		F: Fn() + 'static,
	{
		let pattern = pattern.into_route_pattern()?;
		let key = self.registry_key(&target.into())?;

		let registries = self.inner.document.registries();
		let id = registries.borrow_mut().next_id();

		let subscription = Subscription::new(
			id,
			pattern,
			Rc::new(callback),
			SubscriptionKind::from_once(once),
		);
		debug!(%id, pattern = subscription.pattern().as_str(), once, "route switch subscribed");
		registries.borrow_mut().registry(key).push(subscription);
		Ok(id)
	}

	/// Removes a subscription from the target router.
	///
	/// Returns false if the router holds no subscription with `id`.
	pub fn off_route_switch(
		&self,
		id: SubscriptionId,
		target: impl Into<RouterTarget<D::Node>>,
	) -> Result<bool> {
		let key = self.registry_key(&target.into())?;
		Ok(self
			.inner
			.document
			.registries()
			.borrow_mut()
			.get_mut(key)
			.is_some_and(|registry| registry.remove(id)))
	}

	/// Lists the target router's subscriptions in dispatch order.
	pub fn subscriptions(
		&self,
		target: impl Into<RouterTarget<D::Node>>,
	) -> Result<Vec<SubscriptionInfo>> {
		let key = self.registry_key(&target.into())?;
		Ok(self
			.inner
			.document
			.registries()
			.borrow()
			.get(key)
			.map(|registry| registry.iter().map(Subscription::info).collect())
			.unwrap_or_default())
	}

	/// Returns the route currently held in the address fragment.
	pub fn current_route(&self) -> Option<String> {
		dom::fragment(&self.inner.location.href()).map(str::to_string)
	}

	/// Re-applies the route held in the address fragment.
	///
	/// Intended for page start-up. Returns `Ok(None)` without touching
	/// anything when the fragment is absent or empty.
	pub fn restore(&self, target: impl Into<RouterTarget<D::Node>>) -> Result<Option<String>> {
		match self.current_route().filter(|route| !route.is_empty()) {
			Some(route) => self.set_route(&route, target).map(Some),
			None => Ok(None),
		}
	}

	fn registry_key(&self, target: &RouterTarget<D::Node>) -> Result<NodeKey> {
		let router = self.resolve(target)?;
		Ok(self.inner.document.node_key(&router))
	}
}
