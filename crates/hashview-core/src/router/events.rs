//! Route switch subscriptions.
//!
//! Each router container owns one [`EventRegistry`]: an insertion-ordered
//! list of subscriptions that fire when a route change matches their
//! pattern.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use regex::Regex;

use crate::dom::NodeKey;
use crate::error::{Result, RouteError};

/// Identity of a subscription, unique within its router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
	pub(crate) fn new(raw: u64) -> Self {
		Self(raw)
	}

	/// Returns the raw identifier.
	pub fn get(self) -> u64 {
		self.0
	}
}

impl fmt::Display for SubscriptionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "subscription#{}", self.0)
	}
}

/// Lifetime of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionKind {
	/// Fires on every matching route change.
	Persistent,
	/// Fires once, then removes itself.
	OneShot,
}

impl SubscriptionKind {
	/// Maps the `once` flag to a kind.
	pub fn from_once(once: bool) -> Self {
		if once { Self::OneShot } else { Self::Persistent }
	}
}

/// Conversion into a compiled route pattern.
///
/// Strings compile with default, case-sensitive, unanchored semantics.
pub trait IntoRoutePattern {
	/// Compiles the pattern.
	fn into_route_pattern(self) -> Result<Regex>;
}

pub(crate) fn compile(pattern: &str) -> Result<Regex> {
	Regex::new(pattern).map_err(|source| RouteError::InvalidPattern {
		pattern: pattern.to_string(),
		source,
	})
}

impl IntoRoutePattern for &str {
	fn into_route_pattern(self) -> Result<Regex> {
		compile(self)
	}
}

impl IntoRoutePattern for String {
	fn into_route_pattern(self) -> Result<Regex> {
		compile(&self)
	}
}

impl IntoRoutePattern for &String {
	fn into_route_pattern(self) -> Result<Regex> {
		compile(self)
	}
}

impl IntoRoutePattern for Regex {
	fn into_route_pattern(self) -> Result<Regex> {
		Ok(self)
	}
}

impl IntoRoutePattern for &Regex {
	fn into_route_pattern(self) -> Result<Regex> {
		Ok(self.clone())
	}
}

/// A registered route switch callback.
#[derive(Clone)]
pub struct Subscription {
	id: SubscriptionId,
	pattern: Regex,
	callback: Rc<dyn Fn()>,
	kind: SubscriptionKind,
	// Shared by every snapshot of this subscription.
	fired: Rc<Cell<bool>>,
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription")
			.field("id", &self.id)
			.field("pattern", &self.pattern.as_str())
			.field("kind", &self.kind)
			.finish()
	}
}

impl Subscription {
	/// Creates a subscription.
	pub fn new(
		id: SubscriptionId,
		pattern: Regex,
		callback: Rc<dyn Fn()>,
		kind: SubscriptionKind,
	) -> Self {
		Self {
			id,
			pattern,
			callback,
			kind,
			fired: Rc::new(Cell::new(false)),
		}
	}

	/// Returns the identity.
	pub fn id(&self) -> SubscriptionId {
		self.id
	}

	/// Returns the compiled pattern.
	pub fn pattern(&self) -> &Regex {
		&self.pattern
	}

	/// Returns the kind.
	pub fn kind(&self) -> SubscriptionKind {
		self.kind
	}

	/// Returns true if the pattern matches anywhere in `route`.
	pub fn matches(&self, route: &str) -> bool {
		self.pattern.is_match(route)
	}

	/// Claims the right to run.
	///
	/// Persistent subscriptions can always run. A one-shot subscription can
	/// be claimed once; every later claim fails, even from a re-entrant
	/// dispatch that started before it was removed.
	pub(crate) fn claim(&self) -> bool {
		match self.kind {
			SubscriptionKind::Persistent => true,
			SubscriptionKind::OneShot => !self.fired.replace(true),
		}
	}

	pub(crate) fn invoke(&self) {
		(self.callback)()
	}

	/// Returns a plain description of the subscription.
	pub fn info(&self) -> SubscriptionInfo {
		SubscriptionInfo {
			id: self.id,
			pattern: self.pattern.as_str().to_string(),
			once: self.kind == SubscriptionKind::OneShot,
		}
	}
}

/// Inspection view of a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionInfo {
	/// The identity.
	pub id: SubscriptionId,
	/// The pattern source.
	pub pattern: String,
	/// Whether the subscription removes itself after firing.
	pub once: bool,
}

/// Insertion-ordered subscriptions of one router.
#[derive(Debug, Default)]
pub struct EventRegistry {
	subscriptions: Vec<Subscription>,
}

impl EventRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a subscription.
	///
	/// Identities handed out by a router never repeat, so an appended
	/// subscription never shadows an existing one.
	pub fn push(&mut self, subscription: Subscription) {
		self.subscriptions.push(subscription);
	}

	/// Removes the subscription with `id`. Returns true if one was removed.
	pub fn remove(&mut self, id: SubscriptionId) -> bool {
		let before = self.subscriptions.len();
		self.subscriptions.retain(|s| s.id != id);
		self.subscriptions.len() != before
	}

	/// Returns true if a subscription with `id` is registered.
	pub fn contains(&self, id: SubscriptionId) -> bool {
		self.subscriptions.iter().any(|s| s.id == id)
	}

	/// Copies the current subscription list for dispatch.
	pub fn snapshot(&self) -> Vec<Subscription> {
		self.subscriptions.clone()
	}

	/// Iterates subscriptions in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = &Subscription> {
		self.subscriptions.iter()
	}

	/// Returns the number of subscriptions.
	pub fn len(&self) -> usize {
		self.subscriptions.len()
	}

	/// Returns true if no subscriptions are registered.
	pub fn is_empty(&self) -> bool {
		self.subscriptions.is_empty()
	}
}

/// Registries of every router container in one document.
///
/// Owned by the document, so every [`HashRouter`](super::HashRouter) over
/// the same document sees the same subscriptions for a container.
#[derive(Debug, Default)]
pub struct RegistryStore {
	registries: HashMap<NodeKey, EventRegistry>,
	last_id: u64,
}

/// Shared handle to a [`RegistryStore`].
pub type SharedRegistries = Rc<RefCell<RegistryStore>>;

impl RegistryStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty store behind a shared handle.
	pub fn shared() -> SharedRegistries {
		Rc::new(RefCell::new(Self::new()))
	}

	/// Hands out a subscription id never used before in this store.
	pub(crate) fn next_id(&mut self) -> SubscriptionId {
		self.last_id += 1;
		SubscriptionId::new(self.last_id)
	}

	/// Returns the registry of the container with `key`, if one was created.
	pub fn get(&self, key: NodeKey) -> Option<&EventRegistry> {
		self.registries.get(&key)
	}

	/// Mutable access to an existing registry.
	pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut EventRegistry> {
		self.registries.get_mut(&key)
	}

	/// Returns the registry of the container with `key`, creating it on
	/// first use.
	pub fn registry(&mut self, key: NodeKey) -> &mut EventRegistry {
		self.registries.entry(key).or_default()
	}

	/// Returns the number of containers with a registry.
	pub fn len(&self) -> usize {
		self.registries.len()
	}

	/// Returns true if no container has a registry yet.
	pub fn is_empty(&self) -> bool {
		self.registries.is_empty()
	}
}
