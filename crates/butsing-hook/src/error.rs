//! Error types for the hook layer.

use butsing_event::{ErrorCode, EventCategory};
use thiserror::Error;

/// Errors raised by the registry's internal structures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HookError {
    /// A removal used a stale or invalid index.
    #[error("index {index} is out of range (len={len})")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Collection length at the time of the call.
        len: usize,
    },
}

impl ErrorCode for HookError {
    fn code(&self) -> &'static str {
        match self {
            Self::IndexOutOfRange { .. } => "HOOK_INDEX_OUT_OF_RANGE",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

/// Failure raised by a listener during dispatch.
///
/// The dispatcher returns it to the caller unchanged; listeners that
/// already ran are not rolled back.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The listener reported a failure.
    #[error("listener failed: {0}")]
    Failed(String),

    /// A typed listener received an event of another concrete type.
    #[error("listener expected {expected} but received a {category} event")]
    TypeMismatch {
        /// Rust type name the listener accepts.
        expected: &'static str,
        /// Category of the event that was received.
        category: EventCategory,
    },

    /// Any other error raised by listener code.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ListenerError {
    /// Creates a [`ListenerError::Failed`].
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Wraps an arbitrary error.
    pub fn other(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Other(Box::new(err))
    }
}

impl ErrorCode for ListenerError {
    fn code(&self) -> &'static str {
        match self {
            Self::Failed(_) => "LISTENER_FAILED",
            Self::TypeMismatch { .. } => "LISTENER_TYPE_MISMATCH",
            Self::Other(_) => "LISTENER_ERROR",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_index_out_of_range() {
        let err = HookError::IndexOutOfRange { index: 3, len: 2 };
        assert_eq!(err.to_string(), "index 3 is out of range (len=2)");
        assert_eq!(err.code(), "HOOK_INDEX_OUT_OF_RANGE");
    }

    #[test]
    fn display_type_mismatch() {
        let err = ListenerError::TypeMismatch {
            expected: "LoginAttemptEvent",
            category: EventCategory::Lifecycle,
        };
        assert_eq!(
            err.to_string(),
            "listener expected LoginAttemptEvent but received a lifecycle event"
        );
    }

    #[test]
    fn other_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = ListenerError::other(io);
        assert_eq!(err.to_string(), "disk full");
        assert_eq!(err.code(), "LISTENER_ERROR");
    }

    #[test]
    fn failed_helper() {
        let err = ListenerError::failed("boom");
        assert!(matches!(err, ListenerError::Failed(ref m) if m == "boom"));
        assert!(!err.is_recoverable());
    }
}
