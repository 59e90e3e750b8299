//! Configuration management with hierarchical layering.
//!
//! # Architecture
//!
//! ```text
//! Priority (highest to lowest):
//!
//! ┌────────────────────────────────────────────┐
//! │  1. CLI overrides (ConfigResolver)         │  Per invocation
//! ├────────────────────────────────────────────┤
//! │  2. Environment Variables (BUTSING_*)      │  Runtime override
//! ├────────────────────────────────────────────┤
//! │  3. Config file (--config, or              │  Project-specific
//! │     <project>/.butsing/config.toml)        │
//! ├────────────────────────────────────────────┤
//! │  4. Default Values (compile-time)          │  Fallback
//! └────────────────────────────────────────────┘
//! ```
//!
//! # Example File
//!
//! ```toml
//! debug = false
//!
//! [app]
//! name = "My Site"
//!
//! [composery]
//! home = "/var/lib/composery"
//!
//! [database]
//! host = "localhost"
//! dbname = "butsing"
//! username = "butsing"
//! password = "secret"
//!
//! [logging]
//! level = "info"
//!
//! [[plugins]]
//! name = "health-route"
//!
//! [[plugins]]
//! name = "login-audit"
//! enabled = false
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Field | Type |
//! |----------|-------|------|
//! | `BUTSING_DEBUG` | `debug` | bool |
//! | `BUTSING_APP_NAME` | `app.name` | string |
//! | `BUTSING_COMPOSERY_HOME` | `composery.home` | path |
//! | `BUTSING_LOG_LEVEL` | `logging.level` | string |
//! | `BUTSING_PLUGINS` | `plugins` | comma-separated names |

mod error;
mod loader;
mod resolver;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use resolver::{ConfigResolver, NoOpResolver};
pub use types::{
    AppConfig, AppSection, ComposeryConfig, DatabaseConfig, LoggingConfig, PluginDef,
};

/// Project-local configuration directory name.
pub const PROJECT_CONFIG_DIR: &str = ".butsing";

/// Configuration file name inside [`PROJECT_CONFIG_DIR`].
pub const PROJECT_CONFIG_FILE: &str = "config.toml";
