//! Login attempt event.

use butsing_event::{Event, EventCategory, Propagation, StoppableEvent};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

/// Result of a credential check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginOutcome {
    Succeeded,
    Rejected,
}

impl fmt::Display for LoginOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded => f.write_str("succeeded"),
            Self::Rejected => f.write_str("rejected"),
        }
    }
}

/// Emitted after every login attempt, successful or not.
///
/// Its category is [`EventCategory::Login`], a child of
/// [`EventCategory::Auth`], so `Auth` listeners receive it too.
#[derive(Debug, Clone)]
pub struct LoginAttemptEvent {
    pub username: String,
    pub outcome: LoginOutcome,
    propagation: Propagation,
}

impl LoginAttemptEvent {
    pub fn new(username: impl Into<String>, outcome: LoginOutcome) -> Self {
        Self {
            username: username.into(),
            outcome,
            propagation: Propagation::default(),
        }
    }

    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.outcome == LoginOutcome::Succeeded
    }
}

impl Event for LoginAttemptEvent {
    fn category(&self) -> EventCategory {
        EventCategory::Login
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
