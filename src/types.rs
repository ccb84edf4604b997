//! Core data types for the dispatch engine
//!
//! This module defines the context passed to handlers on every trigger and
//! the spec types consumed by [`Dispatcher::set_handlers`].
//!
//! [`Dispatcher::set_handlers`]: crate::dispatcher::Dispatcher::set_handlers

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::handler::Handler;

/// Read-only carrier of the triggering action and handler payload
///
/// One context is constructed per triggering editorial action (publish,
/// unpublish, form submission) and shared by reference with every handler
/// fired during that trigger call. It is immutable once constructed and
/// discarded when the trigger returns; nothing here is persisted.
///
/// The `action` identifies which sub-operation raised the event and drives
/// two-tier key resolution: a context with no action is not dispatchable.
///
/// # Examples
///
/// ```ignore
/// let context = EventContext::for_action("publish")
///     .with_data(serde_json::json!({ "record_id": 42 }));
/// dispatcher.trigger("content", &context)?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventContext {
    /// Sub-operation that raised the event, e.g. "publish"
    action: Option<String>,

    /// Opaque payload owned by the constructing caller
    #[serde(default)]
    data: serde_json::Value,

    /// Ambient details (user, project) handlers may consult
    #[serde(default)]
    metadata: serde_json::Value,

    /// When the context was constructed
    created_at: DateTime<Utc>,
}

impl EventContext {
    /// Create a context with no action.
    ///
    /// Triggering with such a context fires nothing; it exists so callers
    /// can thread one construction path through optional-action call sites.
    pub fn new() -> Self {
        Self {
            action: None,
            data: serde_json::Value::Null,
            metadata: serde_json::Value::Null,
            created_at: Utc::now(),
        }
    }

    /// Create a context for a specific action.
    pub fn for_action(action: impl Into<String>) -> Self {
        Self {
            action: Some(action.into()),
            ..Self::new()
        }
    }

    /// Attach the caller-owned payload.
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }

    /// Attach ambient metadata.
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    /// The action that raised the event, if any.
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// Caller-owned payload.
    pub fn data(&self) -> &serde_json::Value {
        &self.data
    }

    /// Ambient metadata.
    pub fn metadata(&self) -> &serde_json::Value {
        &self.metadata
    }

    /// When the context was constructed.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Default for EventContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Event binding for a handler spec
///
/// Either a single event name (bound unconditionally) or a map from event
/// name to an include flag, which supports switching a specific binding off
/// without deleting the spec it belongs to.
///
/// Serializes untagged, so configuration can write either form:
///
/// ```yaml
/// on: content.publish
/// ```
///
/// ```yaml
/// on:
///   content.publish: true
///   content.unpublish: false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum On {
    /// Bind to one event name unconditionally
    Event(String),

    /// Bind to each event name whose flag is true
    Toggles(HashMap<String, bool>),
}

impl On {
    /// The bindings this value expands to, as `(event name, include)` pairs.
    ///
    /// A bare event name expands to a single pair with a true flag.
    pub fn bindings(&self) -> Vec<(&str, bool)> {
        match self {
            On::Event(name) => vec![(name.as_str(), true)],
            On::Toggles(map) => map.iter().map(|(k, v)| (k.as_str(), *v)).collect(),
        }
    }

    /// Event names this value mentions, included or not.
    ///
    /// Used by error messages that must name the offending event(s).
    pub fn event_names(&self) -> Vec<&str> {
        self.bindings().into_iter().map(|(name, _)| name).collect()
    }
}

impl From<&str> for On {
    fn from(name: &str) -> Self {
        On::Event(name.to_string())
    }
}

impl From<String> for On {
    fn from(name: String) -> Self {
        On::Event(name)
    }
}

impl From<HashMap<String, bool>> for On {
    fn from(map: HashMap<String, bool>) -> Self {
        On::Toggles(map)
    }
}

/// A handler together with the events it binds to
///
/// Consumed by [`Dispatcher::set_handlers`], which calls `add_listener` for
/// each included binding. The handler reference is shared, so one spec bound
/// to several events registers the same instance (same identity) under each.
///
/// [`Dispatcher::set_handlers`]: crate::dispatcher::Dispatcher::set_handlers
#[derive(Clone)]
pub struct HandlerSpec {
    /// The handler to register
    pub handler: Arc<dyn Handler>,

    /// The events to register it under
    pub on: On,
}

impl HandlerSpec {
    /// Create a spec binding `handler` to `on`.
    pub fn new(handler: Arc<dyn Handler>, on: impl Into<On>) -> Self {
        Self {
            handler,
            on: on.into(),
        }
    }
}
