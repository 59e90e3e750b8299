//! Configuration loader.
//!
//! # Load Order
//!
//! 1. Default values (compile-time)
//! 2. Explicit file ([`ConfigLoader::with_file`]), or else the project file
//!    (`<root>/.butsing/config.toml`)
//! 3. Environment variables (`BUTSING_*`)
//!
//! Each layer overrides the previous. Missing files are ignored; an
//! explicit file that does not exist is an error.

use super::{AppConfig, ConfigError, PluginDef, PROJECT_CONFIG_DIR, PROJECT_CONFIG_FILE};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Helper macro for parsing boolean environment variables.
macro_rules! parse_env_bool {
    ($lookup:expr, $field:expr, $var:literal) => {
        if let Some(val) = $lookup($var) {
            $field = parse_bool(&val)
                .ok_or_else(|| ConfigError::invalid_env_var($var, "expected bool"))?;
        }
    };
}

/// Configuration loader with builder pattern.
///
/// # Example
///
/// ```no_run
/// use butsing_app::config::ConfigLoader;
///
/// let config = ConfigLoader::new()
///     .with_project_root("/srv/site")
///     .skip_env_vars()
///     .load()?;
/// # Ok::<(), butsing_app::config::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    /// Explicit config file; replaces the project file lookup.
    file: Option<PathBuf>,

    /// Project root directory.
    project_root: Option<PathBuf>,

    /// Skip environment variable loading.
    skip_env: bool,
}

impl ConfigLoader {
    /// Creates a new loader with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads this file instead of the project config.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Sets the project root directory.
    ///
    /// Project config will be loaded from `<project_root>/.butsing/config.toml`.
    #[must_use]
    pub fn with_project_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_root = Some(path.into());
        self
    }

    /// Skips environment variable loading.
    ///
    /// Useful for testing with deterministic config.
    #[must_use]
    pub fn skip_env_vars(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Loads and layers configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a config file cannot be read or parsed,
    /// or an environment variable holds an invalid value.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let mut config = AppConfig::default();

        // Layer 1: file
        if let Some(ref path) = self.file {
            config = read_file(path)?;
            debug!(path = %path.display(), "Loaded config file");
        } else if let Some(ref root) = self.project_root {
            let path = root.join(PROJECT_CONFIG_DIR).join(PROJECT_CONFIG_FILE);
            if path.exists() {
                config = read_file(&path)?;
                debug!(
                    path = %path.display(),
                    project = %root.display(),
                    "Loaded project config"
                );
            }
        }

        // Layer 2: environment variables
        if !self.skip_env {
            apply_env_vars(&mut config, |name| std::env::var(name).ok())?;
        }

        Ok(config)
    }
}

fn read_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    AppConfig::from_toml(&content).map_err(|e| ConfigError::parse_toml(path, e))
}

/// Applies `BUTSING_*` overrides read through `lookup`.
fn apply_env_vars(
    config: &mut AppConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    parse_env_bool!(lookup, config.debug, "BUTSING_DEBUG");

    if let Some(val) = lookup("BUTSING_APP_NAME") {
        config.app.name = val;
    }
    if let Some(val) = lookup("BUTSING_COMPOSERY_HOME") {
        config.composery.home = PathBuf::from(val);
    }
    if let Some(val) = lookup("BUTSING_LOG_LEVEL") {
        config.logging.level = val;
    }
    if let Some(val) = lookup("BUTSING_PLUGINS") {
        config.plugins = val
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(PluginDef::new)
            .collect();
    }

    Ok(())
}

/// Parses a boolean from string.
///
/// Accepts: "true", "false", "1", "0", "yes", "no", "on", "off" (case-insensitive).
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
