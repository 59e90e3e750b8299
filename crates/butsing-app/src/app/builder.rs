//! Builder for [`ButsingApp`].

use super::ButsingApp;
use crate::config::{AppConfig, ConfigResolver};
use crate::plugins::builtin_plugin;
use crate::AppError;
use butsing_event::{CategoryTree, EventCategory};
use butsing_hook::{EventDispatcher, ListenerRegistry, Plugin};
use std::sync::atomic::AtomicBool;
use tracing::debug;

/// Builder for [`ButsingApp`].
///
/// Takes a loaded [`AppConfig`]; CLI-style overrides are layered on top
/// through [`with_overrides`](Self::with_overrides).
pub struct ButsingAppBuilder {
    config: AppConfig,
    overrides: Vec<Box<dyn ConfigResolver>>,
    /// Plugins supplied in code, registered after configured built-ins.
    extra_plugins: Vec<Box<dyn Plugin>>,
    /// Extra parent links on top of the built-in category tree.
    parents: Vec<(EventCategory, EventCategory)>,
}

impl ButsingAppBuilder {
    /// Creates a new builder with the given configuration.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            overrides: Vec::new(),
            extra_plugins: Vec::new(),
            parents: Vec::new(),
        }
    }

    /// Applies `resolver` to the configuration during [`build`](Self::build).
    #[must_use]
    pub fn with_overrides(mut self, resolver: impl ConfigResolver + 'static) -> Self {
        self.overrides.push(Box::new(resolver));
        self
    }

    /// Adds a plugin that is not selected through configuration.
    #[must_use]
    pub fn with_plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.extra_plugins.push(Box::new(plugin));
        self
    }

    /// Declares `parent` as the parent category of `child`.
    #[must_use]
    pub fn with_parent(mut self, child: EventCategory, parent: EventCategory) -> Self {
        self.parents.push((child, parent));
        self
    }

    /// Builds the application.
    ///
    /// # Errors
    ///
    /// - [`AppError::Config`] if the final configuration is invalid
    /// - [`AppError::UnknownPlugin`] if an enabled plugin is not a built-in
    /// - [`AppError::Event`] if a declared parent link is rejected
    pub fn build(self) -> Result<ButsingApp, AppError> {
        let mut config = self.config;
        for resolver in &self.overrides {
            resolver.apply(&mut config);
        }
        config.validate()?;

        let mut plugins = config
            .enabled_plugins()
            .map(|name| builtin_plugin(name).ok_or_else(|| AppError::UnknownPlugin(name.into())))
            .collect::<Result<Vec<_>, _>>()?;
        plugins.extend(self.extra_plugins);

        let mut categories = CategoryTree::with_builtins();
        for (child, parent) in self.parents {
            categories.set_parent(child, parent)?;
        }

        let registry = ListenerRegistry::with_categories(categories).into_shared();
        let dispatcher = EventDispatcher::new(registry.clone());

        debug!(
            app = %config.app.name,
            plugins = plugins.len(),
            "application built"
        );

        Ok(ButsingApp {
            config,
            plugins,
            registry,
            dispatcher,
            registered: AtomicBool::new(false),
        })
    }
}
