//! Route buttons.
//!
//! Any element can act as a link between routes: once bound, clicking it
//! activates the route named by its `destination` attribute.
//!
//! ```html
//! <button class="route-button" destination="/settings">Settings</button>
//! ```

use std::rc::Rc;

use tracing::{debug, warn};

use super::context::RouterTarget;
use super::core::HashRouter;
use crate::dom::{Document, Location};
use crate::error::{Result, RouteError};

impl<D, L> HashRouter<D, L>
where
	D: Document + 'static,
	L: Location + 'static,
{
	/// Binds route buttons.
	///
	/// `elements` defaults to every element carrying the route button class.
	/// Each element gets a click handler that activates its `destination` on
	/// `target`, replacing any handler it had. `target` is resolved on each
	/// click, not now, and the `destination` attribute is only read on click.
	///
	/// Returns the number of elements bound. Elements the document refuses
	/// a handler for are skipped and not counted.
	pub fn initialize_route_buttons(
		&self,
		elements: Option<Vec<D::Node>>,
		target: impl Into<RouterTarget<D::Node>>,
	) -> usize {
		let target = target.into();
		let elements = elements.unwrap_or_else(|| {
			self.document()
				.elements_by_class_name(&self.settings().button_class)
		});

		let mut bound = 0;
		for element in &elements {
			let router = self.downgrade();
			let button = element.clone();
			let target = target.clone();
			let installed = self.document().set_click_handler(
				element,
				Rc::new(move || match HashRouter::upgrade(&router) {
					Some(router) => router.follow_button(&button, &target),
					None => Err(RouteError::unresolved(
						"route button",
						"the router has been dropped",
					)),
				}),
			);
			if installed {
				bound += 1;
			} else {
				warn!(?element, "route button could not be bound");
			}
		}

		debug!(count = bound, skipped = elements.len() - bound, "route buttons bound");
		bound
	}

	fn follow_button(&self, button: &D::Node, target: &RouterTarget<D::Node>) -> Result<String> {
		let Some(destination) = self
			.document()
			.attribute(button, &self.settings().destination_attribute)
		else {
			warn!(?button, "route button clicked without a destination");
			return Err(RouteError::MissingDestination);
		};
		self.set_route(&destination, target.clone())
	}
}
