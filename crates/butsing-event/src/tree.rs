//! Category hierarchy.
//!
//! A [`CategoryTree`] is an explicit `child -> parent` lookup table.
//! Each category has at most one parent, and links that would form a
//! cycle are rejected when declared, so every [`Lineage`] is finite.
//!
//! ```text
//! Lifecycle            Auth
//!     │                  │
//!     ▼                  ▼
//! AfterRoutingSet      Login
//! ```

use crate::{EventCategory, EventError};
use std::collections::HashMap;

/// Single-parent hierarchy of event categories.
///
/// [`Default`] includes the built-in links; use [`CategoryTree::empty`]
/// for a tree without them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTree {
    parents: HashMap<EventCategory, EventCategory>,
}

impl CategoryTree {
    /// Creates a tree with no links.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            parents: HashMap::new(),
        }
    }

    /// Creates a tree with the built-in links.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut parents = HashMap::new();
        parents.insert(EventCategory::AfterRoutingSet, EventCategory::Lifecycle);
        parents.insert(EventCategory::Login, EventCategory::Auth);
        Self { parents }
    }

    /// Declares `parent` as the parent of `child`.
    ///
    /// Re-declaring an existing link is a no-op.
    ///
    /// # Errors
    ///
    /// - [`EventError::SelfParent`] if `child == parent`
    /// - [`EventError::ParentConflict`] if `child` already has a different parent
    /// - [`EventError::Cycle`] if `child` is already an ancestor of `parent`
    pub fn set_parent(
        &mut self,
        child: EventCategory,
        parent: EventCategory,
    ) -> Result<(), EventError> {
        if child == parent {
            return Err(EventError::SelfParent(child));
        }

        if let Some(existing) = self.parents.get(&child) {
            if *existing == parent {
                return Ok(());
            }
            return Err(EventError::ParentConflict {
                category: child,
                existing: existing.clone(),
                requested: parent,
            });
        }

        if self.lineage(&parent).any(|ancestor| *ancestor == child) {
            return Err(EventError::Cycle { child, parent });
        }

        self.parents.insert(child, parent);
        Ok(())
    }

    /// Returns the parent of `category`, if any.
    #[must_use]
    pub fn parent(&self, category: &EventCategory) -> Option<&EventCategory> {
        self.parents.get(category)
    }

    /// Returns `category` followed by each of its ancestors.
    #[must_use]
    pub fn lineage<'a>(&'a self, category: &'a EventCategory) -> Lineage<'a> {
        Lineage {
            tree: self,
            next: Some(category),
        }
    }

    /// Returns `true` if `ancestor` is a strict ancestor of `category`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: &EventCategory, category: &EventCategory) -> bool {
        self.lineage(category).skip(1).any(|c| c == ancestor)
    }

    /// Number of declared links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Returns `true` if no links are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

impl Default for CategoryTree {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Iterator over a category and its ancestors, least specific last.
#[derive(Debug, Clone)]
pub struct Lineage<'a> {
    tree: &'a CategoryTree,
    next: Option<&'a EventCategory>,
}

impl<'a> Iterator for Lineage<'a> {
    type Item = &'a EventCategory;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ext(kind: &str) -> EventCategory {
        EventCategory::extension("test", kind)
    }

    #[test]
    fn builtin_links() {
        let tree = CategoryTree::default();
        assert_eq!(
            tree.parent(&EventCategory::AfterRoutingSet),
            Some(&EventCategory::Lifecycle)
        );
        assert_eq!(tree.parent(&EventCategory::Login), Some(&EventCategory::Auth));
        assert_eq!(tree.parent(&EventCategory::Auth), None);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn empty_tree_has_no_links() {
        let tree = CategoryTree::empty();
        assert!(tree.is_empty());
        assert_eq!(tree.parent(&EventCategory::Login), None);
    }

    #[test]
    fn lineage_walks_to_root() {
        let mut tree = CategoryTree::empty();
        tree.set_parent(ext("child"), ext("parent")).expect("link");
        tree.set_parent(ext("parent"), ext("root")).expect("link");

        let child = ext("child");
        let lineage: Vec<_> = tree.lineage(&child).cloned().collect();
        assert_eq!(lineage, vec![ext("child"), ext("parent"), ext("root")]);
    }

    #[test]
    fn lineage_of_unlinked_category_is_itself() {
        let tree = CategoryTree::empty();
        let cat = ext("alone");
        assert_eq!(tree.lineage(&cat).count(), 1);
    }

    #[test]
    fn lineage_is_restartable() {
        let tree = CategoryTree::default();
        let login = EventCategory::Login;
        let lineage = tree.lineage(&login);
        let first: Vec<_> = lineage.clone().collect();
        let second: Vec<_> = lineage.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn self_parent_rejected() {
        let mut tree = CategoryTree::empty();
        let err = tree.set_parent(ext("a"), ext("a")).expect_err("self link");
        assert_eq!(err, EventError::SelfParent(ext("a")));
    }

    #[test]
    fn redeclaring_same_link_is_ok() {
        let mut tree = CategoryTree::default();
        tree.set_parent(EventCategory::Login, EventCategory::Auth)
            .expect("same link");
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn second_parent_rejected() {
        let mut tree = CategoryTree::default();
        let err = tree
            .set_parent(EventCategory::Login, EventCategory::Lifecycle)
            .expect_err("conflict");
        assert!(matches!(err, EventError::ParentConflict { .. }));
        assert_eq!(tree.parent(&EventCategory::Login), Some(&EventCategory::Auth));
    }

    #[test]
    fn cycle_rejected() {
        let mut tree = CategoryTree::empty();
        tree.set_parent(ext("b"), ext("a")).expect("link");
        tree.set_parent(ext("c"), ext("b")).expect("link");

        let err = tree.set_parent(ext("a"), ext("c")).expect_err("cycle");
        assert_eq!(
            err,
            EventError::Cycle {
                child: ext("a"),
                parent: ext("c"),
            }
        );
        assert_eq!(tree.parent(&ext("a")), None);
    }

    #[test]
    fn is_ancestor_is_strict() {
        let tree = CategoryTree::default();
        assert!(tree.is_ancestor(&EventCategory::Auth, &EventCategory::Login));
        assert!(!tree.is_ancestor(&EventCategory::Login, &EventCategory::Login));
        assert!(!tree.is_ancestor(&EventCategory::Login, &EventCategory::Auth));
    }
}
