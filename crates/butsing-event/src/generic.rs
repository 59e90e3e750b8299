//! JSON-payload event for plugin-defined categories.

use crate::{Event, EventCategory, Propagation, StoppableEvent};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::Any;

/// Stoppable event carrying an arbitrary JSON payload.
///
/// Lets plugins emit events of [`EventCategory::Extension`] categories
/// without defining a Rust type. Listeners may rewrite the payload.
///
/// ```
/// use butsing_event::{Event, EventCategory, GenericEvent};
/// use serde_json::json;
///
/// let event = GenericEvent::new(
///     EventCategory::extension("cms", "page_saved"),
///     json!({ "slug": "about" }),
/// );
/// assert_eq!(event.category().to_string(), "ext.cms.page_saved");
/// assert_eq!(event.payload["slug"], "about");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericEvent {
    /// Category this event is dispatched under.
    pub category: EventCategory,
    /// Emitter-defined payload.
    pub payload: Value,
    #[serde(default)]
    propagation: Propagation,
}

impl GenericEvent {
    /// Creates an event that has not been stopped.
    #[must_use]
    pub fn new(category: EventCategory, payload: Value) -> Self {
        Self {
            category,
            payload,
            propagation: Propagation::new(),
        }
    }
}

impl Event for GenericEvent {
    fn category(&self) -> EventCategory {
        self.category.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn as_stoppable(&self) -> Option<&dyn StoppableEvent> {
        Some(&self.propagation)
    }

    fn as_stoppable_mut(&mut self) -> Option<&mut dyn StoppableEvent> {
        Some(&mut self.propagation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn generic_event_is_stoppable() {
        let mut event = GenericEvent::new(EventCategory::extension("a", "b"), json!(null));
        let dyn_event: &mut dyn Event = &mut event;
        assert!(dyn_event.stop_propagation());
        assert!(event.as_stoppable().is_some_and(|s| s.is_propagation_stopped()));
    }

    #[test]
    fn deserialize_without_flag_defaults_to_running() {
        let json = r#"{"category":"Auth","payload":{"user":"admin"}}"#;
        let event: GenericEvent = serde_json::from_str(json).expect("deserialize");
        assert_eq!(event.category, EventCategory::Auth);
        assert!(!event.propagation.is_propagation_stopped());
    }
}
