//! Snapshot Dispatch
//!
//! Event dispatch engine for content snapshot capture: when editorial
//! actions occur (publish, unpublish, form submission), registered handlers
//! build immutable snapshot records describing the state of affected
//! content. This crate is the dispatch core only; what a handler does with
//! an event belongs entirely to the embedding application.
//!
//! # Overview
//!
//! A [`Dispatcher`] maps event keys to ordered lists of handlers and
//! resolves which handlers fire for a given event/action pair with a
//! two-tier policy: handlers bound to the specific `"<event>.<action>"` key
//! fire first, then handlers bound to the bare `"<event>"` key, each list in
//! registration order, all sharing one read-only [`EventContext`].
//!
//! Registrations can come from three places:
//!
//! 1. direct calls to [`Dispatcher::add_listener`],
//! 2. bulk specs via [`Dispatcher::set_handlers`],
//! 3. [`Loader`]s configured with [`Dispatcher::set_loaders`] and run
//!    lazily, exactly once, at the first trigger.
//!
//! # Architecture
//!
//! 1. **Dispatcher** (`dispatcher`): registration, lazy initialization,
//!    two-tier trigger resolution
//! 2. **Handler registry** (`registry`): ordered per-key handler lists with
//!    identity-based duplicate detection
//! 3. **Capabilities** (`handler`, `loader`): the traits collaborators
//!    implement
//! 4. **Configuration** (`config`): YAML handler-spec documents resolved
//!    through a handler catalog
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use snapshot_dispatch::{Dispatcher, EventContext, Handler, Result, events};
//!
//! struct PublishSnapshotHandler;
//!
//! impl Handler for PublishSnapshotHandler {
//!     fn fire(&self, context: &EventContext) -> Result<()> {
//!         // Build and persist a snapshot for the affected record.
//!         Ok(())
//!     }
//! }
//!
//! let dispatcher = Dispatcher::new();
//! dispatcher.add_listener(
//!     &events::event_key(events::CONTENT, events::actions::PUBLISH),
//!     Arc::new(PublishSnapshotHandler),
//! )?;
//!
//! let context = EventContext::for_action(events::actions::PUBLISH)
//!     .with_data(serde_json::json!({ "record_id": 42 }));
//! dispatcher.trigger(events::CONTENT, &context)?;
//! # Ok::<(), snapshot_dispatch::DispatchError>(())
//! ```
//!
//! # Configuration
//!
//! Handler bindings can be described in YAML (see the `config` module) and
//! registered at first trigger through a [`ConfigLoader`]:
//!
//! ```yaml
//! handlers:
//!   - handler: publish_snapshot
//!     on: content.publish
//!   - handler: audit_log
//!     on:
//!       content.publish: true
//!       content.unpublish: false
//! ```
//!
//! # Error Handling
//!
//! All operations return [`Result<T>`], an alias over [`DispatchError`].
//! There is no retry and no internal catch-and-continue: a handler failure
//! aborts the remainder of its dispatch and surfaces, source preserved, to
//! the trigger caller.
//!
//! # Thread Safety
//!
//! Dispatch is synchronous and inline, but the dispatcher is `Send + Sync`:
//! the handler table sits behind a read-write lock (triggers iterate a
//! cloned snapshot per key), and lazy initialization is mutex-guarded so
//! loaders run exactly once under concurrent first triggers.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod handler;
pub mod loader;
pub mod registry;
pub mod types;

// Re-export public types
pub use config::{ConfigLoader, HandlerCatalog};
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, Result};
pub use handler::Handler;
pub use loader::{FnLoader, Loader};
pub use registry::HandlerTable;
pub use types::{EventContext, HandlerSpec, On};
