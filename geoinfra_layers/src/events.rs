//! Observer port for load cycles.
//!
//! The loader reports what it does on an [`EventBus`]; debugging tools and tests subscribe
//! to it instead of reaching into the loader.

use arc_swap::ArcSwap;
use std::sync::Arc;

/// Events emitted during a load cycle.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadEvent {
	CycleStarted { layers: usize },
	LayerLoaded { id: String, features: usize, dropped: usize },
	LayerFailed { id: String, message: String },
	CycleCompleted { loaded: usize, failed: usize },
	CycleCancelled,
}

impl std::fmt::Display for LoadEvent {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			LoadEvent::CycleStarted { layers } => write!(f, "loading {layers} layers"),
			LoadEvent::LayerLoaded { id, features, dropped } => {
				write!(f, "layer '{id}' loaded: {features} features, {dropped} dropped")
			}
			LoadEvent::LayerFailed { id, message } => write!(f, "layer '{id}' failed: {message}"),
			LoadEvent::CycleCompleted { loaded, failed } => {
				write!(f, "load cycle completed: {loaded} loaded, {failed} failed")
			}
			LoadEvent::CycleCancelled => write!(f, "load cycle cancelled"),
		}
	}
}

/// Unique identifier for event listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

type EventListener = Arc<dyn Fn(&LoadEvent) + Send + Sync>;

/// Thread-safe event bus for load events.
///
/// Listeners are called synchronously, in the order they subscribed.
#[derive(Clone)]
pub struct EventBus {
	listeners: Arc<ArcSwap<Vec<EventListener>>>,
}

impl EventBus {
	pub fn new() -> Self {
		Self {
			listeners: Arc::new(ArcSwap::from_pointee(Vec::new())),
		}
	}

	/// Registers a listener for all events emitted on this bus.
	pub fn subscribe<F>(&self, listener: F) -> ListenerId
	where
		F: Fn(&LoadEvent) + Send + Sync + 'static,
	{
		let listener: EventListener = Arc::new(listener);
		let id = self.listeners.load().len();
		self.listeners.rcu(|old| {
			let mut new = (**old).clone();
			new.push(listener.clone());
			new
		});
		ListenerId(id)
	}

	/// Emits an event to all listeners. A panicking listener does not stop the others.
	pub fn emit(&self, event: LoadEvent) {
		let listeners = self.listeners.load();
		for listener in listeners.iter() {
			let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
				listener(&event);
			}));
		}
	}

	pub fn listener_count(&self) -> usize {
		self.listeners.load().len()
	}
}

impl Default for EventBus {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for EventBus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "EventBus({} listeners)", self.listener_count())
	}
}
