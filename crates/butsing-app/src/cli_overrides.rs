//! CLI configuration overrides.
//!
//! Implements [`ConfigResolver`] for CLI flag overrides.

use crate::config::{AppConfig, ConfigResolver};

/// CLI configuration overrides.
///
/// Applied as the highest priority layer after file/env config loading.
///
/// # Example
///
/// ```
/// use butsing_app::config::{AppConfig, ConfigResolver};
/// use butsing_app::CliOverrides;
///
/// let mut config = AppConfig::default();
/// CliOverrides::new().debug(true).apply(&mut config);
/// assert!(config.debug);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    debug: Option<bool>,
    log_level: Option<String>,
    app_name: Option<String>,
}

impl CliOverrides {
    /// Creates a new empty overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets debug mode override.
    #[must_use]
    pub fn debug(mut self, value: bool) -> Self {
        self.debug = Some(value);
        self
    }

    /// Sets log level override.
    #[must_use]
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Sets site name override.
    #[must_use]
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Sets debug mode override if Some.
    #[must_use]
    pub fn debug_opt(mut self, value: Option<bool>) -> Self {
        if let Some(v) = value {
            self.debug = Some(v);
        }
        self
    }

    /// Sets log level override if Some.
    #[must_use]
    pub fn log_level_opt(mut self, level: Option<String>) -> Self {
        if let Some(l) = level {
            self.log_level = Some(l);
        }
        self
    }

    /// Sets site name override if Some.
    #[must_use]
    pub fn app_name_opt(mut self, name: Option<String>) -> Self {
        if let Some(n) = name {
            self.app_name = Some(n);
        }
        self
    }
}

impl ConfigResolver for CliOverrides {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(d) = self.debug {
            config.debug = d;
        }
        if let Some(ref level) = self.log_level {
            config.logging.level.clone_from(level);
        }
        if let Some(ref name) = self.app_name {
            config.app.name.clone_from(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_applies_nothing() {
        let mut config = AppConfig::default();
        let original = config.clone();

        CliOverrides::new().apply(&mut config);

        assert_eq!(config, original);
    }

    #[test]
    fn chained_overrides() {
        let mut config = AppConfig::default();

        CliOverrides::new()
            .debug(true)
            .log_level("debug")
            .app_name("CLI")
            .apply(&mut config);

        assert!(config.debug);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.app.name, "CLI");
    }

    #[test]
    fn opt_methods_skip_none() {
        let mut config = AppConfig::default();
        let original = config.clone();

        CliOverrides::new()
            .debug_opt(None)
            .log_level_opt(None)
            .app_name_opt(None)
            .apply(&mut config);

        assert_eq!(config, original);
    }

    #[test]
    fn opt_methods_apply_some() {
        let mut config = AppConfig::default();

        CliOverrides::new()
            .log_level_opt(Some("trace".into()))
            .app_name_opt(Some("Staging".into()))
            .apply(&mut config);

        assert!(!config.debug);
        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.app.name, "Staging");
    }
}
