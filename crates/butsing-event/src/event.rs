//! Event traits.
//!
//! An event is an emitter-defined value. The dispatcher only needs to know
//! its [`EventCategory`] and, for stoppable events, whether a listener has
//! stopped propagation.
//!
//! # Plain vs Stoppable
//!
//! A plain event returns `None` from [`Event::as_stoppable`]. Dispatch of a
//! plain event always runs every listener. A stoppable event embeds a
//! [`Propagation`] flag and exposes it:
//!
//! ```
//! use butsing_event::{Event, EventCategory, Propagation, StoppableEvent};
//! use std::any::Any;
//!
//! struct CacheFlushed {
//!     keys: usize,
//!     propagation: Propagation,
//! }
//!
//! impl Event for CacheFlushed {
//!     fn category(&self) -> EventCategory {
//!         EventCategory::extension("cache", "flushed")
//!     }
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//!     fn as_any_mut(&mut self) -> &mut dyn Any {
//!         self
//!     }
//!     fn as_stoppable(&self) -> Option<&dyn StoppableEvent> {
//!         Some(&self.propagation)
//!     }
//!     fn as_stoppable_mut(&mut self) -> Option<&mut dyn StoppableEvent> {
//!         Some(&mut self.propagation)
//!     }
//! }
//!
//! let mut event = CacheFlushed { keys: 3, propagation: Propagation::new() };
//! let dyn_event: &mut dyn Event = &mut event;
//! assert!(dyn_event.stop_propagation());
//! assert!(dyn_event.is_propagation_stopped());
//! ```

use crate::EventCategory;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// A dispatchable event.
///
/// `as_any`/`as_any_mut` must return `self`; they back the downcast
/// helpers on `dyn Event`.
pub trait Event: Any + Send {
    /// Runtime category of this event.
    fn category(&self) -> EventCategory;

    /// Returns `self` as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Returns `self` as `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Stop-propagation view. `None` for plain events.
    fn as_stoppable(&self) -> Option<&dyn StoppableEvent> {
        None
    }

    /// Mutable stop-propagation view. `None` for plain events.
    fn as_stoppable_mut(&mut self) -> Option<&mut dyn StoppableEvent> {
        None
    }
}

/// An event whose dispatch can be halted by a listener.
pub trait StoppableEvent {
    /// Returns `true` once a listener has stopped propagation.
    fn is_propagation_stopped(&self) -> bool;

    /// Stops delivery to the remaining listeners of the current dispatch.
    fn stop_propagation(&mut self);
}

impl dyn Event {
    /// Returns `true` if the concrete event type is `T`.
    #[must_use]
    pub fn is<T: Event>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Downcasts to the concrete event type.
    #[must_use]
    pub fn downcast_ref<T: Event>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Downcasts to the concrete event type, mutably.
    #[must_use]
    pub fn downcast_mut<T: Event>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Returns `true` if this event supports stopping propagation.
    #[must_use]
    pub fn is_stoppable(&self) -> bool {
        self.as_stoppable().is_some()
    }

    /// Returns `true` if a listener stopped propagation. Always `false`
    /// for plain events.
    #[must_use]
    pub fn is_propagation_stopped(&self) -> bool {
        self.as_stoppable()
            .is_some_and(|stoppable| stoppable.is_propagation_stopped())
    }

    /// Stops propagation. Returns `false` (and does nothing) for plain events.
    pub fn stop_propagation(&mut self) -> bool {
        match self.as_stoppable_mut() {
            Some(stoppable) => {
                stoppable.stop_propagation();
                true
            }
            None => false,
        }
    }
}

/// Reusable stop-propagation flag, initially not stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Propagation {
    stopped: bool,
}

impl Propagation {
    /// Creates a flag that is not stopped.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoppableEvent for Propagation {
    fn is_propagation_stopped(&self) -> bool {
        self.stopped
    }

    fn stop_propagation(&mut self) {
        self.stopped = true;
    }
}
