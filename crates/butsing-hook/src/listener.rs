//! Listener handles and identity.
//!
//! A [`Listener`] wraps a callable together with a [`ListenerKey`]
//! fixed at construction. The registry compares keys (and callable
//! allocations) to deduplicate registrations, so no reflection on the
//! callable itself is ever needed.
//!
//! | Constructor | Key | Same as |
//! |-------------|-----|---------|
//! | [`Listener::named`] | `Named(name)` | any listener with the same name |
//! | [`Listener::anonymous`] | `Anonymous(n)` | its own clones only |
//! | [`Listener::typed`] | `Named(name)` | any listener with the same name |

use crate::ListenerError;
use butsing_event::Event;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_ANONYMOUS: AtomicU64 = AtomicU64::new(1);

type Handler = dyn Fn(&mut dyn Event) -> Result<(), ListenerError> + Send + Sync;

/// Identity used for deduplication and removal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListenerKey {
    /// Canonical name chosen by the registrant.
    Named(String),
    /// Unique per [`Listener::anonymous`] call; shared by clones.
    Anonymous(u64),
}

impl fmt::Display for ListenerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Anonymous(id) => write!(f, "<anonymous#{id}>"),
        }
    }
}

/// A registered callback.
///
/// Cloning is cheap and preserves identity.
#[derive(Clone)]
pub struct Listener {
    key: ListenerKey,
    handler: Arc<Handler>,
}

impl Listener {
    /// Creates a listener identified by `name`.
    pub fn named(
        name: impl Into<String>,
        handler: impl Fn(&mut dyn Event) -> Result<(), ListenerError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: ListenerKey::Named(name.into()),
            handler: Arc::new(handler),
        }
    }

    /// Creates a listener identified only by itself.
    pub fn anonymous(
        handler: impl Fn(&mut dyn Event) -> Result<(), ListenerError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: ListenerKey::Anonymous(NEXT_ANONYMOUS.fetch_add(1, Ordering::Relaxed)),
            handler: Arc::new(handler),
        }
    }

    /// Creates a named listener for one concrete event type.
    ///
    /// Receiving any other event type fails with
    /// [`ListenerError::TypeMismatch`], which aborts the dispatch. Register
    /// typed listeners on the category that `E` itself reports.
    pub fn typed<E: Event>(
        name: impl Into<String>,
        handler: impl Fn(&mut E) -> Result<(), ListenerError> + Send + Sync + 'static,
    ) -> Self {
        Self::named(name, move |event: &mut dyn Event| match event.downcast_mut::<E>() {
            Some(typed) => handler(typed),
            None => Err(ListenerError::TypeMismatch {
                expected: std::any::type_name::<E>(),
                category: event.category(),
            }),
        })
    }

    /// Identity of this listener.
    #[must_use]
    pub fn key(&self) -> &ListenerKey {
        &self.key
    }

    /// Canonical name, if the listener is named.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match &self.key {
            ListenerKey::Named(name) => Some(name),
            ListenerKey::Anonymous(_) => None,
        }
    }

    /// Returns `true` if both handles denote the same listener.
    ///
    /// Equal keys, or the very same callable allocation.
    #[must_use]
    pub fn is_same(&self, other: &Listener) -> bool {
        self.key == other.key || Arc::ptr_eq(&self.handler, &other.handler)
    }

    /// Invokes the callback.
    ///
    /// # Errors
    ///
    /// Whatever the callback returns.
    pub fn call(&self, event: &mut dyn Event) -> Result<(), ListenerError> {
        (self.handler)(event)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener").field("key", &self.key).finish()
    }
}
