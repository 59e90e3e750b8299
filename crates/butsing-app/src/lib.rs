//! Butsing Application Layer.
//!
//! This crate provides:
//!
//! - **Configuration**: layered TOML/env loading ([`config`])
//! - **Routing**: the default route table and [`AfterRoutingSetEvent`](routing::AfterRoutingSetEvent)
//! - **Plugins**: the built-in plugin set ([`plugins`])
//! - **ButsingApp**: wiring and bootstrap
//! - **AppError**: unified application-level error type
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Plugin SDK Layer                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  butsing-event, butsing-hook                                │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Application Layer  ◄── HERE                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  butsing-app (config, routing, plugins, bootstrap)          │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Frontend Layer                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  butsing-cli (uses AppError → anyhow/eprintln)              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Error Handling Strategy
//!
//! ```text
//! Internal Errors (ConfigError, ListenerError, EventError)
//!                    ↓ From impl
//!               AppError (this crate)
//!                    ↓ anyhow::Error / eprintln
//!               CLI output
//! ```

mod app;
mod cli_overrides;
pub mod config;
mod error;
pub mod login;
pub mod plugins;
pub mod routing;

pub use app::{ButsingApp, ButsingAppBuilder};
pub use cli_overrides::CliOverrides;
pub use error::AppError;

// Re-export from Plugin SDK Layer
pub use butsing_event::{
    CategoryTree, ErrorCode, Event, EventCategory, EventError, GenericEvent, Propagation,
    StoppableEvent,
};
pub use butsing_hook::{
    DispatchOutcome, EventDispatcher, Listener, ListenerError, ListenerKey, ListenerRegistry,
    Plugin, SharedRegistry, DEFAULT_PRIORITY,
};
