//! Configuration types.
//!
//! All types implement [`Default`] for compile-time fallback values.

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Main configuration structure.
///
/// Fields carry `#[serde(default)]`, so every section is optional in the
/// config file.
///
/// # Example
///
/// ```
/// use butsing_app::config::AppConfig;
///
/// let config = AppConfig::default();
/// assert!(!config.debug);
/// assert_eq!(config.app.name, "Butsing");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Enable debug mode.
    pub debug: bool,

    /// Site identity.
    pub app: AppSection,

    /// Package manager working directory.
    pub composery: ComposeryConfig,

    /// Database connection settings.
    #[serde(alias = "pdo")]
    pub database: DatabaseConfig,

    /// Log filter settings.
    pub logging: LoggingConfig,

    /// Plugins to load, in registration order.
    pub plugins: Vec<PluginDef>,
}

impl AppConfig {
    /// Creates a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes to TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Deserializes from TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if deserialization fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Names of enabled plugins, in configured order.
    pub fn enabled_plugins(&self) -> impl Iterator<Item = &str> {
        self.plugins
            .iter()
            .filter(|p| p.enabled)
            .map(|p| p.name.as_str())
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// [`ConfigError::DuplicatePlugin`] if a plugin name appears twice.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for plugin in &self.plugins {
            if !seen.insert(plugin.name.as_str()) {
                return Err(ConfigError::DuplicatePlugin(plugin.name.clone()));
            }
        }
        Ok(())
    }
}

/// `[app]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppSection {
    /// Display name of the site.
    pub name: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: "Butsing".into(),
        }
    }
}

/// `[composery]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ComposeryConfig {
    /// Working directory for package installs.
    pub home: PathBuf,
}

impl Default for ComposeryConfig {
    fn default() -> Self {
        Self {
            home: std::env::temp_dir().join("composery"),
        }
    }
}

/// `[database]` section (`[pdo]` is accepted as an alias).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub dbname: String,
    pub username: String,
    pub password: String,
}

impl DatabaseConfig {
    /// MySQL data source name for this connection.
    #[must_use]
    pub fn dsn(&self) -> String {
        format!(
            "mysql:host={};dbname={};charset=utf8mb4",
            self.host, self.dbname
        )
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
        }
    }
}

/// One `[[plugins]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PluginDef {
    /// Built-in plugin name.
    pub name: String,

    /// Disabled entries are kept in the file but not loaded.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl PluginDef {
    /// Enabled plugin entry.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert!(!config.debug);
        assert_eq!(config.app.name, "Butsing");
        assert!(config.composery.home.ends_with("composery"));
        assert_eq!(config.logging.level, "warn");
        assert!(config.plugins.is_empty());
    }

    #[test]
    fn parse_full_file() {
        let config = AppConfig::from_toml(
            r#"
debug = true

[app]
name = "Intranet"

[database]
host = "db"
dbname = "cms"
username = "u"
password = "p"

[[plugins]]
name = "health-route"

[[plugins]]
name = "login-audit"
enabled = false
"#,
        )
        .expect("valid toml");

        assert!(config.debug);
        assert_eq!(config.app.name, "Intranet");
        assert_eq!(config.database.username, "u");
        assert_eq!(config.plugins.len(), 2);
        assert!(config.plugins[0].enabled);
        assert!(!config.plugins[1].enabled);
        assert_eq!(config.enabled_plugins().collect::<Vec<_>>(), vec!["health-route"]);
        // Unspecified sections keep defaults
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn pdo_alias() {
        let config = AppConfig::from_toml(
            r#"
[pdo]
host = "localhost"
dbname = "butsing"
"#,
        )
        .expect("valid toml");
        assert_eq!(config.database.host, "localhost");
    }

    #[test]
    fn dsn_format() {
        let db = DatabaseConfig {
            host: "localhost".into(),
            dbname: "butsing".into(),
            ..DatabaseConfig::default()
        };
        assert_eq!(db.dsn(), "mysql:host=localhost;dbname=butsing;charset=utf8mb4");
    }

    #[test]
    fn toml_roundtrip() {
        let mut config = AppConfig::default();
        config.plugins.push(PluginDef::new("route-audit"));
        let text = config.to_toml().expect("serialize");
        let restored = AppConfig::from_toml(&text).expect("parse");
        assert_eq!(restored, config);
    }

    #[test]
    fn validate_rejects_duplicate_plugins() {
        let mut config = AppConfig::default();
        config.plugins.push(PluginDef::new("health-route"));
        assert!(config.validate().is_ok());

        config.plugins.push(PluginDef {
            name: "health-route".into(),
            enabled: false,
        });
        let err = config.validate().expect_err("duplicate");
        assert!(matches!(err, ConfigError::DuplicatePlugin(ref n) if n == "health-route"));
    }
}
