//! Listener registry.
//!
//! Holds, per [`EventCategory`], a deduplicated [`PriorityQueue`] of
//! [`Listener`]s and the [`CategoryTree`] used to resolve ancestors.
//!
//! Shared process-wide as [`SharedRegistry`]:
//! - [`listeners_for()`](ListenerRegistry::listeners_for) takes `&self` (read lock)
//! - [`add_listener()`](ListenerRegistry::add_listener) /
//!   [`remove_listener()`](ListenerRegistry::remove_listener) take `&mut self` (write lock)

use crate::{Listener, ListenerKey, PriorityQueue};
use butsing_event::{CategoryTree, EventCategory, EventError, Lineage};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Priority used by [`ListenerRegistry::add`]. Higher runs earlier.
pub const DEFAULT_PRIORITY: i32 = 10;

/// Registry handle shared by the dispatcher and plugin registration.
pub type SharedRegistry = Arc<RwLock<ListenerRegistry>>;

/// Central registry for all listeners.
///
/// Within each category, listeners are sorted by priority (descending),
/// first-registered first among equal priorities, and no two share an
/// identity.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    categories: CategoryTree,
    listeners: HashMap<EventCategory, PriorityQueue<Listener>>,
}

impl ListenerRegistry {
    /// Creates an empty registry with the built-in category links.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry over the given category tree.
    #[must_use]
    pub fn with_categories(categories: CategoryTree) -> Self {
        Self {
            categories,
            listeners: HashMap::new(),
        }
    }

    /// Wraps the registry for sharing.
    #[must_use]
    pub fn into_shared(self) -> SharedRegistry {
        Arc::new(RwLock::new(self))
    }

    /// Registers `listener` under `category`.
    ///
    /// Returns `false` (and changes nothing) if a listener with the same
    /// identity is already registered under `category`.
    pub fn add_listener(
        &mut self,
        category: EventCategory,
        listener: Listener,
        priority: i32,
    ) -> bool {
        let queue = self.listeners.entry(category.clone()).or_default();
        if queue.iter().any(|(existing, _)| existing.is_same(&listener)) {
            return false;
        }

        debug!(listener = %listener.key(), category = %category, priority, "listener registered");
        queue.enqueue(listener, priority);
        true
    }

    /// Registers `listener` under `category` at [`DEFAULT_PRIORITY`].
    pub fn add(&mut self, category: EventCategory, listener: Listener) -> bool {
        self.add_listener(category, listener, DEFAULT_PRIORITY)
    }

    /// Removes the first listener under `category` with the same identity.
    ///
    /// Returns `false` if `category` is unknown or nothing matched.
    pub fn remove_listener(&mut self, category: &EventCategory, listener: &Listener) -> bool {
        self.remove_first(category, |existing| existing.is_same(listener))
    }

    /// Removes the listener under `category` whose key is `key`.
    pub fn remove_by_key(&mut self, category: &EventCategory, key: &ListenerKey) -> bool {
        self.remove_first(category, |existing| existing.key() == key)
    }

    fn remove_first(
        &mut self,
        category: &EventCategory,
        predicate: impl FnMut(&Listener) -> bool,
    ) -> bool {
        let Some(listener) = self
            .listeners
            .get_mut(category)
            .and_then(|queue| queue.remove_first(predicate))
        else {
            return false;
        };
        debug!(listener = %listener.key(), category = %category, "listener removed");
        true
    }

    /// Listeners applicable to `category`, in dispatch order.
    ///
    /// Yields the category's own listeners by priority, then those of its
    /// parent, and so on up the lineage. A listener registered at two
    /// levels appears twice. The iterator is lazy and can be restarted by
    /// cloning it before use.
    pub fn listeners_for<'a>(&'a self, category: &'a EventCategory) -> ListenersFor<'a> {
        ListenersFor {
            registry: self,
            lineage: self.categories.lineage(category),
            current: None,
        }
    }

    /// Clones the applicable listeners out of the registry.
    #[must_use]
    pub fn snapshot(&self, category: &EventCategory) -> Vec<Listener> {
        self.listeners_for(category).cloned().collect()
    }

    /// Declares `parent` as the parent category of `child`.
    ///
    /// # Errors
    ///
    /// See [`CategoryTree::set_parent`].
    pub fn declare_parent(
        &mut self,
        child: EventCategory,
        parent: EventCategory,
    ) -> Result<(), EventError> {
        self.categories.set_parent(child, parent)
    }

    /// The category hierarchy used for lookups.
    #[must_use]
    pub fn categories(&self) -> &CategoryTree {
        &self.categories
    }

    /// Listeners registered directly under `category`, with priorities.
    pub fn entries(&self, category: &EventCategory) -> impl Iterator<Item = (&Listener, i32)> {
        self.listeners
            .get(category)
            .into_iter()
            .flat_map(|queue| queue.iter())
    }

    /// Categories with at least one listener.
    pub fn registered_categories(&self) -> impl Iterator<Item = &EventCategory> {
        self.listeners
            .iter()
            .filter(|(_, queue)| !queue.is_empty())
            .map(|(category, _)| category)
    }

    /// Number of listeners registered directly under `category`.
    #[must_use]
    pub fn count_for(&self, category: &EventCategory) -> usize {
        self.listeners.get(category).map_or(0, PriorityQueue::len)
    }

    /// Total number of registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.values().map(PriorityQueue::len).sum()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Iterator returned by [`ListenerRegistry::listeners_for`].
#[derive(Clone)]
pub struct ListenersFor<'a> {
    registry: &'a ListenerRegistry,
    lineage: Lineage<'a>,
    current: Option<crate::queue::Iter<'a, Listener>>,
}

impl<'a> Iterator for ListenersFor<'a> {
    type Item = &'a Listener;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((listener, _)) = self.current.as_mut().and_then(Iterator::next) {
                return Some(listener);
            }
            let category = self.lineage.next()?;
            self.current = self
                .registry
                .listeners
                .get(category)
                .map(PriorityQueue::iter);
        }
    }
}
