//! Event dispatcher.
//!
//! Drives listener invocation for one event at a time:
//!
//! ```text
//! Pending ─► Invoking(0) ─► Invoking(1) ─► ... ─► Completed
//!                 │              │
//!                 └──────────────┴──► Stopped   (stoppable event, flag set)
//! ```
//!
//! Listeners are snapshotted under the read lock and invoked after it is
//! released, so a listener may register further listeners without
//! deadlocking; those only take part in later dispatches.

use crate::{ListenerError, SharedRegistry};
use butsing_event::Event;
use tracing::{debug, trace};

/// Terminal state of one dispatch call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Every applicable listener ran.
    Completed {
        /// Number of listeners invoked.
        invoked: usize,
    },
    /// A listener stopped propagation; the rest were skipped.
    Stopped {
        /// Number of listeners invoked, including the one that stopped.
        invoked: usize,
    },
}

impl DispatchOutcome {
    /// Number of listeners invoked.
    #[must_use]
    pub fn invoked(&self) -> usize {
        match self {
            Self::Completed { invoked } | Self::Stopped { invoked } => *invoked,
        }
    }

    /// Returns `true` if a listener stopped propagation.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped { .. })
    }
}

/// Invokes registered listeners for events.
///
/// Cheap to clone; all clones share one registry.
#[derive(Clone)]
pub struct EventDispatcher {
    registry: SharedRegistry,
}

impl EventDispatcher {
    /// Creates a dispatcher over `registry`.
    #[must_use]
    pub fn new(registry: SharedRegistry) -> Self {
        Self { registry }
    }

    /// The registry listeners are looked up in.
    #[must_use]
    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    /// Dispatches `event` and returns it, possibly mutated by listeners.
    ///
    /// # Errors
    ///
    /// The first listener failure, unchanged. Listeners that ran before it
    /// keep their effects, but the event itself is dropped; use
    /// [`dispatch_in_place`](Self::dispatch_in_place) to keep it.
    pub fn dispatch<E: Event>(&self, mut event: E) -> Result<E, ListenerError> {
        self.dispatch_in_place(&mut event)?;
        Ok(event)
    }

    /// Dispatches `event` by reference.
    ///
    /// # Errors
    ///
    /// The first listener failure, unchanged. The remaining listeners are
    /// skipped.
    pub fn dispatch_in_place(
        &self,
        event: &mut dyn Event,
    ) -> Result<DispatchOutcome, ListenerError> {
        let category = event.category();
        let listeners = self.registry.read().snapshot(&category);

        let mut invoked = 0;
        for listener in &listeners {
            trace!(listener = %listener.key(), category = %category, "invoking listener");
            listener.call(event)?;
            invoked += 1;

            if event.is_propagation_stopped() {
                debug!(
                    listener = %listener.key(),
                    category = %category,
                    skipped = listeners.len() - invoked,
                    "propagation stopped"
                );
                return Ok(DispatchOutcome::Stopped { invoked });
            }
        }

        Ok(DispatchOutcome::Completed { invoked })
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listeners", &self.registry.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CallLog;
    use crate::{Listener, ListenerRegistry};
    use butsing_event::{EventCategory, GenericEvent, StoppableEvent};
    use serde_json::json;
    use std::any::Any;

    struct Plain {
        seen: Vec<&'static str>,
    }

    impl Event for Plain {
        fn category(&self) -> EventCategory {
            EventCategory::extension("test", "plain")
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn login_event() -> GenericEvent {
        GenericEvent::new(EventCategory::Login, json!({ "user": "admin" }))
    }

    fn setup() -> (SharedRegistry, EventDispatcher) {
        let registry = ListenerRegistry::new().into_shared();
        let dispatcher = EventDispatcher::new(registry.clone());
        (registry, dispatcher)
    }

    // ── Basic dispatch ───────────────────────────────────────

    #[test]
    fn dispatch_without_listeners_returns_event_unchanged() {
        let (_registry, dispatcher) = setup();
        let event = GenericEvent::new(EventCategory::extension("x", "unknown"), json!([1]));
        let returned = dispatcher.dispatch(event.clone()).expect("no listeners");
        assert_eq!(returned, event);
    }

    #[test]
    fn dispatch_runs_in_priority_order() {
        let (registry, dispatcher) = setup();
        let log = CallLog::new();
        {
            let mut reg = registry.write();
            reg.add_listener(EventCategory::Login, log.recorder("B"), 10);
            reg.add_listener(EventCategory::Login, log.recorder("A"), 20);
        }

        dispatcher.dispatch(login_event()).expect("dispatch");
        assert_eq!(log.entries(), vec!["A", "B"]);
    }

    #[test]
    fn dispatch_includes_parent_category_listeners_last() {
        let (registry, dispatcher) = setup();
        let log = CallLog::new();
        {
            let mut reg = registry.write();
            reg.add_listener(EventCategory::Auth, log.recorder("auth"), 1000);
            reg.add_listener(EventCategory::Login, log.recorder("login"), 1);
        }

        let outcome = dispatcher
            .dispatch_in_place(&mut login_event())
            .expect("dispatch");
        assert_eq!(outcome, DispatchOutcome::Completed { invoked: 2 });
        assert_eq!(log.entries(), vec!["login", "auth"]);
    }

    #[test]
    fn listeners_can_mutate_event() {
        let (registry, dispatcher) = setup();
        registry.write().add(
            EventCategory::Login,
            Listener::typed::<GenericEvent>("rewrite", |event| {
                event.payload["user"] = json!("root");
                Ok(())
            }),
        );

        let event = dispatcher.dispatch(login_event()).expect("dispatch");
        assert_eq!(event.payload["user"], "root");
    }

    // ── Stop propagation ─────────────────────────────────────

    #[test]
    fn stop_in_second_of_three() {
        let (registry, dispatcher) = setup();
        let log = CallLog::new();
        {
            let mut reg = registry.write();
            reg.add_listener(EventCategory::Login, log.recorder("first"), 30);
            reg.add_listener(EventCategory::Login, log.stopper("second"), 20);
            reg.add_listener(EventCategory::Login, log.recorder("third"), 10);
        }

        let mut event = login_event();
        let outcome = dispatcher.dispatch_in_place(&mut event).expect("dispatch");

        assert_eq!(outcome, DispatchOutcome::Stopped { invoked: 2 });
        assert!(outcome.is_stopped());
        assert_eq!(log.entries(), vec!["first", "second"]);
        assert!(event
            .as_stoppable()
            .is_some_and(|s| s.is_propagation_stopped()));
    }

    #[test]
    fn stop_in_child_skips_parent_listeners() {
        let (registry, dispatcher) = setup();
        let log = CallLog::new();
        {
            let mut reg = registry.write();
            reg.add(EventCategory::Login, log.stopper("login"));
            reg.add(EventCategory::Auth, log.recorder("auth"));
        }

        dispatcher.dispatch(login_event()).expect("dispatch");
        assert_eq!(log.entries(), vec!["login"]);
    }

    #[test]
    fn plain_event_ignores_stop_requests() {
        let (registry, dispatcher) = setup();
        let category = EventCategory::extension("test", "plain");
        {
            let mut reg = registry.write();
            for name in ["one", "two"] {
                reg.add(
                    category.clone(),
                    Listener::named(name, move |event: &mut dyn Event| {
                        assert!(!event.stop_propagation());
                        if let Some(plain) = event.downcast_mut::<Plain>() {
                            plain.seen.push(name);
                        }
                        Ok(())
                    }),
                );
            }
        }

        let event = dispatcher.dispatch(Plain { seen: Vec::new() }).expect("dispatch");
        assert_eq!(event.seen, vec!["one", "two"]);
    }

    #[test]
    fn pre_stopped_event_runs_first_listener_only() {
        let (registry, dispatcher) = setup();
        let log = CallLog::new();
        {
            let mut reg = registry.write();
            reg.add_listener(EventCategory::Login, log.recorder("a"), 2);
            reg.add_listener(EventCategory::Login, log.recorder("b"), 1);
        }

        let mut event = login_event();
        let dyn_event: &mut dyn Event = &mut event;
        dyn_event.stop_propagation();

        let outcome = dispatcher.dispatch_in_place(&mut event).expect("dispatch");
        assert_eq!(outcome.invoked(), 1);
        assert_eq!(log.entries(), vec!["a"]);
    }

    // ── Failures ─────────────────────────────────────────────

    #[test]
    fn listener_failure_propagates_after_partial_dispatch() {
        let (registry, dispatcher) = setup();
        let log = CallLog::new();
        {
            let mut reg = registry.write();
            reg.add_listener(EventCategory::Login, log.recorder("ran"), 3);
            reg.add_listener(EventCategory::Login, log.failer("broken", "db down"), 2);
            reg.add_listener(EventCategory::Login, log.recorder("skipped"), 1);
        }

        let mut event = login_event();
        let err = dispatcher
            .dispatch_in_place(&mut event)
            .expect_err("listener fails");

        assert!(matches!(err, ListenerError::Failed(ref m) if m == "db down"));
        assert_eq!(log.entries(), vec!["ran", "broken"]);
    }

    #[test]
    fn dispatch_does_not_change_registry() {
        let (registry, dispatcher) = setup();
        let log = CallLog::new();
        registry.write().add(EventCategory::Login, log.stopper("s"));

        dispatcher.dispatch(login_event()).expect("dispatch");
        dispatcher.dispatch(login_event()).expect("dispatch");

        assert_eq!(registry.read().len(), 1);
        assert_eq!(log.entries(), vec!["s", "s"]);
    }

    // ── Re-entrancy ──────────────────────────────────────────

    #[test]
    fn listener_may_register_during_dispatch() {
        let (registry, dispatcher) = setup();
        let log = CallLog::new();
        let late = log.recorder("late");
        let handle = registry.clone();
        registry.write().add(
            EventCategory::Login,
            Listener::named("registrar", move |_event: &mut dyn Event| {
                handle.write().add(EventCategory::Login, late.clone());
                Ok(())
            }),
        );

        dispatcher.dispatch(login_event()).expect("first dispatch");
        assert!(log.entries().is_empty());

        dispatcher.dispatch(login_event()).expect("second dispatch");
        assert_eq!(log.entries(), vec!["late"]);
    }
}
