//! Listener registry and event dispatcher for butsing.
//!
//! # Crate Architecture
//!
//! This crate sits between the event vocabulary and the application:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Plugin SDK Layer                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  butsing-event : EventCategory, CategoryTree, Event         │
//! │  butsing-hook  : ListenerRegistry, EventDispatcher ◄── HERE │
//! └─────────────────────────────────────────────────────────────┘
//!           ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Application Layer                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  butsing-app : config, routing, bootstrap                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Core Concepts
//!
//! ## Listeners
//!
//! A [`Listener`] is a shared callable plus a [`ListenerKey`]. Two
//! listeners with the same key are the same listener as far as the
//! registry is concerned.
//!
//! ## Priority Queue
//!
//! [`PriorityQueue`] keeps items ordered by priority (higher first),
//! registration order breaking ties. Iteration is non-destructive.
//!
//! ## Registry
//!
//! [`ListenerRegistry`] maps each [`EventCategory`](butsing_event::EventCategory)
//! to a queue of listeners. [`ListenerRegistry::listeners_for`] yields the
//! category's own listeners, then those of its parent, and so on up the
//! [`CategoryTree`](butsing_event::CategoryTree).
//!
//! ## Dispatcher
//!
//! [`EventDispatcher`] invokes the applicable listeners in order and
//! stops early when a stoppable event is marked stopped.
//!
//! # Concurrency
//!
//! The registry is shared as [`SharedRegistry`]
//! (`Arc<parking_lot::RwLock<ListenerRegistry>>`). Dispatch copies the
//! listener list under the read lock and releases it before invoking.
//!
//! # Example
//!
//! ```
//! use butsing_event::{Event, EventCategory, GenericEvent};
//! use butsing_hook::{EventDispatcher, Listener, ListenerRegistry};
//! use serde_json::json;
//!
//! let registry = ListenerRegistry::new().into_shared();
//! registry.write().add_listener(
//!     EventCategory::Auth,
//!     Listener::named("audit", |event: &mut dyn Event| {
//!         assert_eq!(event.category(), EventCategory::Login);
//!         Ok(())
//!     }),
//!     0,
//! );
//!
//! let dispatcher = EventDispatcher::new(registry);
//! let event = GenericEvent::new(EventCategory::Login, json!({ "user": "admin" }));
//! let event = dispatcher.dispatch(event).unwrap();
//! assert_eq!(event.payload["user"], "admin");
//! ```

mod dispatcher;
mod error;
mod listener;
mod plugin;
pub mod queue;
mod registry;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use dispatcher::{DispatchOutcome, EventDispatcher};
pub use error::{HookError, ListenerError};
pub use listener::{Listener, ListenerKey};
pub use plugin::Plugin;
pub use queue::PriorityQueue;
pub use registry::{ListenerRegistry, ListenersFor, SharedRegistry, DEFAULT_PRIORITY};
