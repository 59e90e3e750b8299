//! Butsing application.
//!
//! Owns the resolved configuration, the plugin set, the shared listener
//! registry and the dispatcher, and drives startup:
//!
//! ```text
//! build()      config + overrides → validate → instantiate plugins
//!                  │
//! bootstrap()      ├─ plugin.register_listeners(&mut registry)   (once)
//!                  ├─ default_routes()
//!                  ├─ dispatch(AfterRoutingSetEvent)
//!                  └─ return event.into_routes()
//! ```
//!
//! # Example
//!
//! ```
//! use butsing_app::config::{AppConfig, PluginDef};
//! use butsing_app::routing::Method;
//! use butsing_app::ButsingApp;
//!
//! let mut config = AppConfig::default();
//! config.plugins.push(PluginDef::new("health-route"));
//!
//! let app = ButsingApp::builder(config).build()?;
//! let routes = app.bootstrap()?;
//! assert!(routes.find(Method::Get, "/healthz").is_some());
//! # Ok::<(), butsing_app::AppError>(())
//! ```

mod builder;

pub use builder::ButsingAppBuilder;

use crate::config::AppConfig;
use crate::login::{LoginAttemptEvent, LoginOutcome};
use crate::routing::{default_routes, AfterRoutingSetEvent, RouteTable};
use crate::AppError;
use butsing_hook::{EventDispatcher, Plugin, SharedRegistry};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// Configured application instance.
pub struct ButsingApp {
    config: AppConfig,
    plugins: Vec<Box<dyn Plugin>>,
    registry: SharedRegistry,
    dispatcher: EventDispatcher,
    /// Set once plugin listeners have been registered.
    registered: AtomicBool,
}

impl ButsingApp {
    /// Starts building an app from an already loaded configuration.
    #[must_use]
    pub fn builder(config: AppConfig) -> ButsingAppBuilder {
        ButsingAppBuilder::new(config)
    }

    /// Resolved configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Shared listener registry.
    #[must_use]
    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    /// Dispatcher bound to [`registry`](Self::registry).
    #[must_use]
    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    /// Plugin names in registration order.
    pub fn plugin_names(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(|p| p.name())
    }

    /// Registers plugin listeners, then builds and announces the routes.
    ///
    /// Plugin registration happens on the first call only. Every call
    /// rebuilds the default routes and dispatches a fresh
    /// [`AfterRoutingSetEvent`].
    ///
    /// # Errors
    ///
    /// [`AppError::Listener`] if a listener fails during dispatch.
    pub fn bootstrap(&self) -> Result<RouteTable, AppError> {
        self.register_plugins();

        let event = self
            .dispatcher
            .dispatch(AfterRoutingSetEvent::new(default_routes()))?;
        let routes = event.into_routes();

        info!(app = %self.config.app.name, routes = routes.len(), "bootstrap complete");
        Ok(routes)
    }

    /// Announces a login attempt to `login` and `auth` listeners.
    ///
    /// # Errors
    ///
    /// [`AppError::Listener`] if a listener fails.
    pub fn notify_login(
        &self,
        username: &str,
        outcome: LoginOutcome,
    ) -> Result<LoginAttemptEvent, AppError> {
        let event = self
            .dispatcher
            .dispatch(LoginAttemptEvent::new(username, outcome))?;
        Ok(event)
    }

    /// The flag is flipped under the write lock, so a concurrent caller
    /// that loses the race waits until registration has finished.
    fn register_plugins(&self) {
        let mut registry = self.registry.write();
        if self.registered.swap(true, Ordering::AcqRel) {
            return;
        }

        for plugin in &self.plugins {
            debug!(plugin = plugin.name(), "registering plugin listeners");
            plugin.register_listeners(&mut registry);
        }
    }
}

impl std::fmt::Debug for ButsingApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ButsingApp")
            .field("app", &self.config.app.name)
            .field("plugins", &self.plugin_names().collect::<Vec<_>>())
            .field("registered", &self.registered.load(Ordering::Acquire))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PluginDef;
    use crate::routing::Method;
    use butsing_event::{Event, EventCategory};
    use butsing_hook::testing::CallLog;
    use butsing_hook::{Listener, ListenerError, ListenerRegistry};

    fn config_with(plugins: &[&str]) -> AppConfig {
        let mut config = AppConfig::default();
        config.plugins = plugins.iter().map(|n| PluginDef::new(*n)).collect();
        config
    }

    struct Recording {
        log: CallLog,
    }

    impl Plugin for Recording {
        fn name(&self) -> &str {
            "recording"
        }

        fn register_listeners(&self, registry: &mut ListenerRegistry) {
            registry.add(EventCategory::Lifecycle, self.log.recorder("lifecycle"));
            registry.add(EventCategory::Auth, self.log.recorder("auth"));
        }
    }

    // ── Bootstrap ────────────────────────────────────────────

    #[test]
    fn bootstrap_without_plugins_serves_defaults() {
        let app = ButsingApp::builder(AppConfig::default()).build().unwrap();
        let routes = app.bootstrap().unwrap();
        assert_eq!(routes, default_routes());
    }

    #[test]
    fn bootstrap_registers_listeners_once() {
        let app = ButsingApp::builder(config_with(&["health-route", "route-audit"]))
            .build()
            .unwrap();

        let first = app.bootstrap().unwrap();
        let second = app.bootstrap().unwrap();

        assert_eq!(first, second);
        assert_eq!(app.registry().read().len(), 2);
        assert!(first.find(Method::Get, "/healthz").is_some());
    }

    #[test]
    fn concurrent_bootstrap_sees_plugin_routes() {
        let app = ButsingApp::builder(config_with(&["health-route", "route-audit"]))
            .build()
            .unwrap();

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..8).map(|_| s.spawn(|| app.bootstrap())).collect();
            for handle in handles {
                let routes = handle.join().unwrap().unwrap();
                assert!(routes.find(Method::Get, "/healthz").is_some());
            }
        });

        assert_eq!(app.registry().read().len(), 2);
    }

    #[test]
    fn parent_category_listener_sees_bootstrap_and_login() {
        let log = CallLog::new();
        let app = ButsingApp::builder(AppConfig::default())
            .with_plugin(Recording { log: log.clone() })
            .build()
            .unwrap();

        app.bootstrap().unwrap();
        app.notify_login("admin", LoginOutcome::Succeeded).unwrap();

        assert_eq!(log.entries(), vec!["lifecycle", "auth"]);
    }

    #[test]
    fn listener_failure_surfaces_from_bootstrap() {
        struct Broken;

        impl Plugin for Broken {
            fn name(&self) -> &str {
                "broken"
            }

            fn register_listeners(&self, registry: &mut ListenerRegistry) {
                registry.add(
                    EventCategory::AfterRoutingSet,
                    Listener::named("broken", |_event: &mut dyn Event| {
                        Err(ListenerError::failed("no routes for you"))
                    }),
                );
            }
        }

        let app = ButsingApp::builder(AppConfig::default())
            .with_plugin(Broken)
            .build()
            .unwrap();

        let err = app.bootstrap().unwrap_err();
        assert!(matches!(err, AppError::Listener(ListenerError::Failed(_))));
    }

    #[test]
    fn notify_login_returns_event() {
        let app = ButsingApp::builder(config_with(&["login-audit"]))
            .build()
            .unwrap();
        app.bootstrap().unwrap();

        let event = app.notify_login("guest", LoginOutcome::Rejected).unwrap();
        assert_eq!(event.username, "guest");
        assert!(!event.succeeded());
    }
}
