//! Plugin extension point.

use crate::ListenerRegistry;

/// A third-party integration.
///
/// Each plugin gets exactly one call to
/// [`register_listeners`](Plugin::register_listeners) during application
/// bootstrap, before any event is dispatched.
///
/// # Example
///
/// ```
/// use butsing_hook::{Listener, ListenerRegistry, Plugin};
/// use butsing_event::{Event, EventCategory};
///
/// struct Greeter;
///
/// impl Plugin for Greeter {
///     fn name(&self) -> &str {
///         "greeter"
///     }
///
///     fn register_listeners(&self, registry: &mut ListenerRegistry) {
///         registry.add(
///             EventCategory::Login,
///             Listener::named("greeter.hello", |_event: &mut dyn Event| Ok(())),
///         );
///     }
/// }
///
/// let mut registry = ListenerRegistry::new();
/// Greeter.register_listeners(&mut registry);
/// assert_eq!(registry.len(), 1);
/// ```
pub trait Plugin: Send + Sync {
    /// Unique plugin name.
    fn name(&self) -> &str;

    /// Adds this plugin's listeners to `registry`.
    fn register_listeners(&self, registry: &mut ListenerRegistry);
}
