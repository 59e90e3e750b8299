//! Ordered priority collection.
//!
//! A sorted `Vec` rather than a heap: the registry mostly iterates in
//! full order and removes by index, and rarely pops.

use crate::HookError;
use std::cmp::Ordering;

#[derive(Debug, Clone)]
struct Slot<T> {
    item: T,
    priority: i32,
    seq: u64,
}

/// Items kept in priority order (descending), FIFO among equal priorities.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    slots: Vec<Slot<T>>,
    next_seq: u64,
}

impl<T> PriorityQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            next_seq: 0,
        }
    }

    /// Adds an item and restores the sort order.
    pub fn enqueue(&mut self, item: T, priority: i32) {
        self.slots.push(Slot {
            item,
            priority,
            seq: self.next_seq,
        });
        self.next_seq += 1;
        self.slots.sort_by(by_priority_then_seq);
    }

    /// Removes and returns the highest-priority item.
    pub fn dequeue(&mut self) -> Option<T> {
        if self.slots.is_empty() {
            return None;
        }
        Some(self.slots.remove(0).item)
    }

    /// Returns the highest-priority item without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.slots.first().map(|slot| &slot.item)
    }

    /// Iterates items with their priority, in dispatch order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.slots.iter(),
        }
    }

    /// Index of the first item matching `predicate`.
    pub fn position(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<usize> {
        self.slots.iter().position(|slot| predicate(&slot.item))
    }

    /// Removes and returns the first item matching `predicate`, keeping
    /// the order of the rest.
    pub fn remove_first(&mut self, mut predicate: impl FnMut(&T) -> bool) -> Option<T> {
        let index = self.slots.iter().position(|slot| predicate(&slot.item))?;
        Some(self.slots.remove(index).item)
    }

    /// Removes the item at `index`.
    ///
    /// # Errors
    ///
    /// [`HookError::IndexOutOfRange`] if `index >= len()`.
    pub fn remove_at(&mut self, index: usize) -> Result<T, HookError> {
        if index >= self.slots.len() {
            return Err(HookError::IndexOutOfRange {
                index,
                len: self.slots.len(),
            });
        }
        Ok(self.slots.remove(index).item)
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the queue holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn by_priority_then_seq<T>(a: &Slot<T>, b: &Slot<T>) -> Ordering {
    b.priority.cmp(&a.priority).then(a.seq.cmp(&b.seq))
}

/// Borrowing iterator over `(item, priority)` in dispatch order.
#[derive(Debug)]
pub struct Iter<'a, T> {
    inner: std::slice::Iter<'a, Slot<T>>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (&'a T, i32);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|slot| (&slot.item, slot.priority))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a PriorityQueue<T> {
    type Item = (&'a T, i32);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
