//! Built-in plugins.
//!
//! | Name | Category | Priority | Effect |
//! |------|----------|----------|--------|
//! | `route-audit` | `lifecycle.after_routing_set` | 0 | logs the final route count |
//! | `health-route` | `lifecycle.after_routing_set` | default | adds `GET /healthz` |
//! | `login-audit` | `auth` | default | logs auth events, counts rejected logins |

use crate::login::{LoginAttemptEvent, LoginOutcome};
use crate::routing::{AfterRoutingSetEvent, Method};
use butsing_event::{Event, EventCategory};
use butsing_hook::{Listener, ListenerRegistry, Plugin};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Names accepted by [`builtin_plugin`].
pub const BUILTIN_PLUGINS: &[&str] = &[RouteAudit::NAME, HealthRoute::NAME, LoginAudit::NAME];

/// Instantiates the built-in plugin called `name`.
#[must_use]
pub fn builtin_plugin(name: &str) -> Option<Box<dyn Plugin>> {
    match name {
        RouteAudit::NAME => Some(Box::new(RouteAudit::new())),
        HealthRoute::NAME => Some(Box::new(HealthRoute)),
        LoginAudit::NAME => Some(Box::new(LoginAudit::new())),
        _ => None,
    }
}

/// Logs the size of the route table once every other listener has run.
#[derive(Debug, Clone, Default)]
pub struct RouteAudit {
    last_count: Arc<AtomicUsize>,
}

impl RouteAudit {
    pub const NAME: &'static str = "route-audit";

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Route count seen by the most recent dispatch.
    #[must_use]
    pub fn last_count(&self) -> usize {
        self.last_count.load(Ordering::Relaxed)
    }
}

impl Plugin for RouteAudit {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn register_listeners(&self, registry: &mut ListenerRegistry) {
        let last_count = Arc::clone(&self.last_count);
        registry.add_listener(
            EventCategory::AfterRoutingSet,
            Listener::typed::<AfterRoutingSetEvent>("route-audit.count", move |event| {
                let count = event.routes.len();
                last_count.store(count, Ordering::Relaxed);
                info!(routes = count, "routing set");
                Ok(())
            }),
            0,
        );
    }
}

/// Serves a liveness probe at `GET /healthz`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthRoute;

impl HealthRoute {
    pub const NAME: &'static str = "health-route";
    pub const PATH: &'static str = "/healthz";
}

impl Plugin for HealthRoute {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn register_listeners(&self, registry: &mut ListenerRegistry) {
        registry.add(
            EventCategory::AfterRoutingSet,
            Listener::typed::<AfterRoutingSetEvent>("health-route.add", |event| {
                if event.routes.find(Method::Get, Self::PATH).is_none() {
                    event.routes.get(Self::PATH, "health.check");
                }
                Ok(())
            }),
        );
    }
}

/// Watches every auth event and tallies rejected logins per user.
#[derive(Debug, Clone, Default)]
pub struct LoginAudit {
    rejected: Arc<Mutex<HashMap<String, usize>>>,
}

impl LoginAudit {
    pub const NAME: &'static str = "login-audit";

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejected attempts recorded for `username`.
    #[must_use]
    pub fn rejected(&self, username: &str) -> usize {
        self.rejected.lock().get(username).copied().unwrap_or(0)
    }
}

impl Plugin for LoginAudit {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn register_listeners(&self, registry: &mut ListenerRegistry) {
        let rejected = Arc::clone(&self.rejected);
        registry.add(
            EventCategory::Auth,
            Listener::named("login-audit.record", move |event: &mut dyn Event| {
                let Some(attempt) = event.downcast_ref::<LoginAttemptEvent>() else {
                    info!(category = %event.category(), "auth event");
                    return Ok(());
                };
                match attempt.outcome {
                    LoginOutcome::Succeeded => {
                        info!(user = %attempt.username, "login succeeded");
                    }
                    LoginOutcome::Rejected => {
                        *rejected.lock().entry(attempt.username.clone()).or_default() += 1;
                        warn!(user = %attempt.username, "login rejected");
                    }
                }
                Ok(())
            }),
        );
    }
}
