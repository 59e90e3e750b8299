//! Route table and the event announcing it.
//!
//! The application builds its default routes, then hands the table to
//! listeners inside an [`AfterRoutingSetEvent`] so plugins can add their
//! own before the table is frozen.

use butsing_event::{Event, EventCategory, Propagation, StoppableEvent};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

/// HTTP method of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.pad("GET"),
            Self::Post => f.pad("POST"),
        }
    }
}

/// One registered route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub method: Method,
    pub path: String,
    /// Handler identifier, `<controller>.<action>`.
    pub handler: String,
    /// Middleware names applied to this route, outermost first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub middleware: Vec<String>,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<5}{:<28}{}", self.method, self.path, self.handler)?;
        if !self.middleware.is_empty() {
            write!(f, "  [{}]", self.middleware.join(", "))?;
        }
        Ok(())
    }
}

/// Ordered collection of routes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `GET` route.
    pub fn get(&mut self, path: impl Into<String>, handler: impl Into<String>) -> &mut Self {
        self.push(Method::Get, path.into(), handler.into(), Vec::new())
    }

    /// Adds a `POST` route.
    pub fn post(&mut self, path: impl Into<String>, handler: impl Into<String>) -> &mut Self {
        self.push(Method::Post, path.into(), handler.into(), Vec::new())
    }

    /// Adds the routes built by `build` under `prefix`, each wrapped in
    /// `middleware`.
    pub fn group(
        &mut self,
        prefix: &str,
        middleware: &[&str],
        build: impl FnOnce(&mut RouteTable),
    ) -> &mut Self {
        let mut group = RouteTable::new();
        build(&mut group);

        let prefix = prefix.trim_end_matches('/');
        for route in group.routes {
            let mut chain: Vec<String> = middleware.iter().map(|m| (*m).to_string()).collect();
            chain.extend(route.middleware);
            self.push(
                route.method,
                format!("{prefix}{}", route.path),
                route.handler,
                chain,
            );
        }
        self
    }

    fn push(
        &mut self,
        method: Method,
        path: String,
        handler: String,
        middleware: Vec<String>,
    ) -> &mut Self {
        self.routes.push(Route {
            method,
            path,
            handler,
            middleware,
        });
        self
    }

    /// First route matching `method` and `path` exactly.
    #[must_use]
    pub fn find(&self, method: Method, path: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|r| r.method == method && r.path == path)
    }

    /// Routes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

/// Routes every installation serves before plugins run.
#[must_use]
pub fn default_routes() -> RouteTable {
    let mut table = RouteTable::new();
    table
        .get("/login", "user.show_login_page")
        .post("/login", "user.verify_login")
        .get("/", "page.show_home")
        .group("/butsing-admin", &["auth"], |group| {
            group
                .get("/dashboard", "admin.show_dashboard")
                .get("/composer/info", "composer.show_info");
        });
    table
}

/// Emitted once the default routes are in place.
///
/// Listeners may add routes; the application serves whatever table the
/// event carries after dispatch.
#[derive(Debug, Clone, Default)]
pub struct AfterRoutingSetEvent {
    pub routes: RouteTable,
    propagation: Propagation,
}

impl AfterRoutingSetEvent {
    pub fn new(routes: RouteTable) -> Self {
        Self {
            routes,
            propagation: Propagation::default(),
        }
    }

    /// Consumes the event, returning its route table.
    #[must_use]
    pub fn into_routes(self) -> RouteTable {
        self.routes
    }
}

impl Event for AfterRoutingSetEvent {
    fn category(&self) -> EventCategory {
        EventCategory::AfterRoutingSet
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn as_stoppable(&self) -> Option<&dyn StoppableEvent> {
        Some(&self.propagation)
    }

    fn as_stoppable_mut(&mut self) -> Option<&mut dyn StoppableEvent> {
        Some(&mut self.propagation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_routes_layout() {
        let table = default_routes();
        assert_eq!(table.len(), 5);

        let login = table.find(Method::Post, "/login").expect("POST /login");
        assert_eq!(login.handler, "user.verify_login");
        assert!(login.middleware.is_empty());

        let dashboard = table
            .find(Method::Get, "/butsing-admin/dashboard")
            .expect("dashboard");
        assert_eq!(dashboard.handler, "admin.show_dashboard");
        assert_eq!(dashboard.middleware, vec!["auth"]);

        assert!(table.find(Method::Post, "/").is_none());
    }

    #[test]
    fn group_prefix_and_nested_middleware() {
        let mut table = RouteTable::new();
        table.group("/api/", &["auth"], |api| {
            api.group("/v1", &["rate-limit"], |v1| {
                v1.post("/items", "items.create");
            });
        });

        let route = table.find(Method::Post, "/api/v1/items").expect("nested");
        assert_eq!(route.middleware, vec!["auth", "rate-limit"]);
    }

    #[test]
    fn route_display() {
        let table = default_routes();
        let first = table.iter().next().expect("first route").to_string();
        assert!(first.starts_with("GET  /login"));
        assert!(first.ends_with("user.show_login_page"));

        let guarded = table
            .find(Method::Get, "/butsing-admin/composer/info")
            .expect("composer info")
            .to_string();
        assert!(guarded.ends_with("[auth]"));
    }

    #[test]
    fn table_serializes_as_list() {
        let mut table = RouteTable::new();
        table.get("/", "page.show_home");
        let json = serde_json::to_value(&table).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!([{ "method": "GET", "path": "/", "handler": "page.show_home" }])
        );
    }

    #[test]
    fn event_is_stoppable() {
        let mut event = AfterRoutingSetEvent::new(default_routes());
        let dyn_event: &mut dyn Event = &mut event;
        assert_eq!(dyn_event.category(), EventCategory::AfterRoutingSet);
        assert!(dyn_event.stop_propagation());
        assert!(dyn_event.is_propagation_stopped());
        assert_eq!(event.into_routes().len(), 5);
    }
}
