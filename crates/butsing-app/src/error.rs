//! Application-level error type.
//!
//! [`AppError`] unifies all internal errors for the application layer.

use crate::config::ConfigError;
use butsing_event::{ErrorCode, EventError};
use butsing_hook::ListenerError;
use thiserror::Error;

/// Unified application error.
///
/// # Example
///
/// ```
/// use butsing_app::{AppError, ErrorCode};
///
/// let err = AppError::UnknownPlugin("cms".into());
/// assert_eq!(err.code(), "APP_UNKNOWN_PLUGIN");
/// eprintln!("Error: {}", err);
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A listener failed while an event was dispatched
    #[error("Listener error: {0}")]
    Listener(#[from] ListenerError),

    /// Category hierarchy declaration failed
    #[error("Event error: {0}")]
    Event(#[from] EventError),

    /// Configured plugin name is not a built-in
    #[error("unknown plugin '{0}'")]
    UnknownPlugin(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ErrorCode for AppError {
    fn code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.code(),
            Self::Listener(e) => e.code(),
            Self::Event(e) => e.code(),
            Self::UnknownPlugin(_) => "APP_UNKNOWN_PLUGIN",
            Self::Io(_) => "APP_IO_ERROR",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Config(e) => e.is_recoverable(),
            Self::Listener(e) => e.is_recoverable(),
            Self::Event(e) => e.is_recoverable(),
            Self::UnknownPlugin(_) => false,
            Self::Io(_) => true,
        }
    }
}
