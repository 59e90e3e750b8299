//! Configuration resolver trait for layered overrides.
//!
//! ```text
//! ConfigLoader.load()  →  AppConfig (base)
//!                              │
//!                              ▼
//!                     ConfigResolver.apply()
//!                              │
//!                              ▼
//!                     AppConfig (final)
//! ```

use super::AppConfig;

/// Trait for applying configuration overrides.
///
/// Separates config loading (file/env) from per-invocation overrides
/// such as CLI flags.
pub trait ConfigResolver {
    /// Applies overrides to the given configuration.
    ///
    /// Only explicitly set values should be applied.
    fn apply(&self, config: &mut AppConfig);
}

/// Resolver that makes no changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpResolver;

impl ConfigResolver for NoOpResolver {
    fn apply(&self, _config: &mut AppConfig) {}
}
