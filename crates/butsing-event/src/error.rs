//! Event layer errors.
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`EventError::UnknownCategory`] | `EVENT_UNKNOWN_CATEGORY` | No |
//! | [`EventError::SelfParent`] | `EVENT_SELF_PARENT` | No |
//! | [`EventError::ParentConflict`] | `EVENT_PARENT_CONFLICT` | No |
//! | [`EventError::Cycle`] | `EVENT_CATEGORY_CYCLE` | No |
//!
//! All variants describe programming errors in category setup, so none
//! are recoverable.

use crate::{ErrorCode, EventCategory};
use thiserror::Error;

/// Event layer error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// Category name could not be parsed.
    #[error("unknown event category: {0}")]
    UnknownCategory(String),

    /// A category was declared as its own parent.
    #[error("category {0} cannot be its own parent")]
    SelfParent(EventCategory),

    /// A category already has a different parent.
    #[error("category {category} already has parent {existing}, cannot reparent to {requested}")]
    ParentConflict {
        /// Category being reparented.
        category: EventCategory,
        /// Parent already on record.
        existing: EventCategory,
        /// Parent that was requested.
        requested: EventCategory,
    },

    /// The link would make the category its own ancestor.
    #[error("linking {child} under {parent} would create a cycle")]
    Cycle {
        /// Child side of the rejected link.
        child: EventCategory,
        /// Parent side of the rejected link.
        parent: EventCategory,
    },
}

impl ErrorCode for EventError {
    fn code(&self) -> &'static str {
        match self {
            Self::UnknownCategory(_) => "EVENT_UNKNOWN_CATEGORY",
            Self::SelfParent(_) => "EVENT_SELF_PARENT",
            Self::ParentConflict { .. } => "EVENT_PARENT_CONFLICT",
            Self::Cycle { .. } => "EVENT_CATEGORY_CYCLE",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}
