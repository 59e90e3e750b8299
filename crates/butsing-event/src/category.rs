//! Event categories.
//!
//! Every event carries exactly one [`EventCategory`]. Listeners are
//! registered against a category and also receive events of every
//! descendant category (see [`CategoryTree`](crate::CategoryTree)).
//!
//! # Built-in Categories
//!
//! | Category | Canonical name | Parent |
//! |----------|----------------|--------|
//! | `Lifecycle` | `lifecycle` | - |
//! | `AfterRoutingSet` | `lifecycle.after_routing_set` | `Lifecycle` |
//! | `Auth` | `auth` | - |
//! | `Login` | `auth.login` | `Auth` |
//!
//! # Extension Categories
//!
//! Plugins define their own categories with `Extension`:
//!
//! ```
//! use butsing_event::EventCategory;
//!
//! let custom = EventCategory::extension("my-plugin", "cache_flushed");
//! assert_eq!(custom.to_string(), "ext.my-plugin.cache_flushed");
//! ```
//!
//! The canonical form is `ext.<namespace>.<kind>`, split at the last `.`.
//! `%` is written as `%25` in both parts and `.` as `%2E` in the kind, so
//! every extension category parses back to itself:
//!
//! ```
//! use butsing_event::EventCategory;
//!
//! let dotted = EventCategory::extension("acme.cms", "page.saved");
//! assert_eq!(dotted.to_string(), "ext.acme.cms.page%2Esaved");
//! assert_eq!(dotted.to_string().parse::<EventCategory>().unwrap(), dotted);
//! ```

use crate::EventError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Static classification of an event value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Application lifecycle (root).
    Lifecycle,

    /// Default routes are set; plugins may add their own.
    AfterRoutingSet,

    /// Authentication (root).
    Auth,

    /// A login attempt was verified.
    Login,

    /// Plugin-defined category.
    Extension {
        /// Plugin namespace (e.g., "my-plugin").
        namespace: String,
        /// Event kind within the namespace.
        kind: String,
    },
}

impl EventCategory {
    /// Creates an Extension category.
    #[must_use]
    pub fn extension(namespace: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::Extension {
            namespace: namespace.into(),
            kind: kind.into(),
        }
    }

    /// Returns `true` if this is an Extension category.
    #[must_use]
    pub fn is_extension(&self) -> bool {
        matches!(self, Self::Extension { .. })
    }

    /// Returns the canonical name.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Lifecycle => "lifecycle".to_string(),
            Self::AfterRoutingSet => "lifecycle.after_routing_set".to_string(),
            Self::Auth => "auth".to_string(),
            Self::Login => "auth.login".to_string(),
            Self::Extension { namespace, kind } => {
                format!("ext.{}.{}", encode(namespace, false), encode(kind, true))
            }
        }
    }
}

/// Escapes `%` (and `.` when `dots` is set) in one extension name part.
fn encode(part: &str, dots: bool) -> String {
    let mut out = String::with_capacity(part.len());
    for c in part.chars() {
        match c {
            '%' => out.push_str("%25"),
            '.' if dots => out.push_str("%2E"),
            c => out.push(c),
        }
    }
    out
}

/// Inverse of [`encode`]. Any other `%` sequence is rejected, so only
/// canonical spellings are accepted.
fn decode(part: &str, dots: bool) -> Option<String> {
    let mut out = String::with_capacity(part.len());
    let mut rest = part;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if let Some(after) = tail.strip_prefix("%25") {
            out.push('%');
            rest = after;
        } else if let Some(after) = tail.strip_prefix("%2E").filter(|_| dots) {
            out.push('.');
            rest = after;
        } else {
            return None;
        }
    }
    out.push_str(rest);
    Some(out)
}

impl FromStr for EventCategory {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lifecycle" => Ok(Self::Lifecycle),
            "lifecycle.after_routing_set" => Ok(Self::AfterRoutingSet),
            "auth" => Ok(Self::Auth),
            "auth.login" => Ok(Self::Login),
            other => {
                // ext.<namespace>.<kind>; an encoded kind never contains '.'
                let unknown = || EventError::UnknownCategory(other.to_string());
                let rest = other.strip_prefix("ext.").ok_or_else(unknown)?;
                let (namespace, kind) = rest.rsplit_once('.').ok_or_else(unknown)?;
                let namespace = decode(namespace, false).ok_or_else(unknown)?;
                let kind = decode(kind, true).ok_or_else(unknown)?;
                Ok(Self::extension(namespace, kind))
            }
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
