//! Test utilities for the hook layer.
//!
//! [`CallLog`] hands out listeners that record their name when invoked,
//! so tests can assert invocation order across listeners.

use crate::{Listener, ListenerError};
use butsing_event::Event;
use parking_lot::Mutex;
use std::sync::Arc;

/// Shared, ordered record of listener invocations.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Names recorded so far, in invocation order.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    /// Listener named `name` that records itself.
    pub fn recorder(&self, name: &str) -> Listener {
        let entries = Arc::clone(&self.entries);
        let label = name.to_string();
        Listener::named(name, move |_event: &mut dyn Event| {
            entries.lock().push(label.clone());
            Ok(())
        })
    }

    /// Listener that records itself, then stops propagation.
    pub fn stopper(&self, name: &str) -> Listener {
        let entries = Arc::clone(&self.entries);
        let label = name.to_string();
        Listener::named(name, move |event: &mut dyn Event| {
            entries.lock().push(label.clone());
            event.stop_propagation();
            Ok(())
        })
    }

    /// Listener that records itself, then fails with `message`.
    pub fn failer(&self, name: &str, message: &str) -> Listener {
        let entries = Arc::clone(&self.entries);
        let label = name.to_string();
        let message = message.to_string();
        Listener::named(name, move |_event: &mut dyn Event| {
            entries.lock().push(label.clone());
            Err(ListenerError::failed(message.clone()))
        })
    }
}
