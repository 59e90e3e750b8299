//! Unified error interface.
//!
//! All butsing error types implement [`ErrorCode`] to provide a
//! machine-readable code and recoverability info.
//!
//! # Example
//!
//! ```
//! use butsing_event::ErrorCode;
//!
//! #[derive(Debug)]
//! enum MyError {
//!     NotFound(String),
//!     Busy,
//! }
//!
//! impl ErrorCode for MyError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::NotFound(_) => "MY_NOT_FOUND",
//!             Self::Busy => "MY_BUSY",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Busy)
//!     }
//! }
//!
//! assert_eq!(MyError::Busy.code(), "MY_BUSY");
//! assert!(!MyError::NotFound("x".into()).is_recoverable());
//! ```

/// Machine-readable error classification.
///
/// Codes are UPPER_SNAKE_CASE, prefixed by layer (`EVENT_`, `HOOK_`,
/// `LISTENER_`, `CONFIG_`, `APP_`) and stable across versions.
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns `true` if retrying or user action may resolve the error.
    fn is_recoverable(&self) -> bool;
}
