//! Event types for butsing.
//!
//! This crate provides the event vocabulary shared by the hook layer,
//! the application, and third-party plugins.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Plugin SDK Layer                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  butsing-event : EventCategory, CategoryTree, Event ◄── HERE │
//! │  butsing-hook  : ListenerRegistry, EventDispatcher, Plugin  │
//! └─────────────────────────────────────────────────────────────┘
//!           ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Application Layer                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  butsing-app : config, routing, bootstrap                   │
//! │  butsing-cli : command-line front end                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Categories and Hierarchy
//!
//! Every event has one [`EventCategory`]. Categories form a single-parent
//! hierarchy described by a [`CategoryTree`]; a listener registered for a
//! category also receives events of its descendant categories.
//!
//! ```
//! use butsing_event::{CategoryTree, EventCategory};
//!
//! let mut tree = CategoryTree::default();
//! let saved = EventCategory::extension("cms", "page_saved");
//! let content = EventCategory::extension("cms", "content");
//! tree.set_parent(saved.clone(), content.clone()).unwrap();
//!
//! let lineage: Vec<_> = tree.lineage(&saved).collect();
//! assert_eq!(lineage, vec![&saved, &content]);
//!
//! // Cycles are rejected up front
//! assert!(tree.set_parent(content, saved).is_err());
//! ```
//!
//! # Stoppable Events
//!
//! Events opt into stop-propagation by exposing a [`StoppableEvent`]
//! view, usually an embedded [`Propagation`] flag.
//!
//! # Error Handling
//!
//! All errors implement [`ErrorCode`]:
//!
//! ```
//! use butsing_event::{ErrorCode, EventCategory, EventError};
//!
//! let err = "nope".parse::<EventCategory>().unwrap_err();
//! assert_eq!(err.code(), "EVENT_UNKNOWN_CATEGORY");
//! assert!(!err.is_recoverable());
//! ```

mod category;
mod code;
mod error;
mod event;
mod generic;
mod tree;

pub use category::EventCategory;
pub use code::ErrorCode;
pub use error::EventError;
pub use event::{Event, Propagation, StoppableEvent};
pub use generic::GenericEvent;
pub use tree::{CategoryTree, Lineage};
