//! Trigger pipeline and handler lifecycle implementation

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, warn};

use crate::error::{DispatchError, Result};
use crate::events::event_key;
use crate::handler::Handler;
use crate::loader::Loader;
use crate::registry::HandlerTable;
use crate::types::{EventContext, HandlerSpec};

/// Initialization lifecycle of a dispatcher
///
/// The single `Uninitialized -> Initialized` transition happens at the first
/// `trigger` call, before any dispatch logic, and is terminal: loaders are
/// never re-run, even when one of them failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InitState {
    Uninitialized,
    Initialized,
}

/// Central event registry and trigger pipeline
///
/// All operations take `&self`; the dispatcher is interior-mutable and
/// `Send + Sync`, so a process-wide instance can be shared freely. Handler
/// invocation is synchronous and inline: a handler that blocks blocks the
/// triggering call, and there is no timeout or cancellation.
pub struct Dispatcher {
    loaders: Mutex<Vec<Arc<dyn Loader>>>,
    table: HandlerTable,
    state: Mutex<InitState>,
}

impl Dispatcher {
    /// Create an empty, uninitialized dispatcher.
    pub fn new() -> Self {
        Self {
            loaders: Mutex::new(Vec::new()),
            table: HandlerTable::new(),
            state: Mutex::new(InitState::Uninitialized),
        }
    }

    /// Replace the loader list.
    ///
    /// Stores the list without running anything; loaders execute at the
    /// first `trigger`. Loaders set after that point are stored but never
    /// run, which is logged at WARN since it is always a wiring mistake.
    pub fn set_loaders(&self, loaders: Vec<Arc<dyn Loader>>) -> &Self {
        if *self.state_guard() == InitState::Initialized {
            warn!(
                count = loaders.len(),
                "Loaders set after first trigger will never run"
            );
        }

        *self
            .loaders
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = loaders;
        self
    }

    /// Bulk-register handlers from specs.
    ///
    /// For each spec, each bound event name with a true include flag is
    /// registered via [`add_listener`](Self::add_listener). A bare event
    /// name counts as unconditionally included.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the spec's event name(s) when a binding
    /// has an empty event name, and `DuplicateRegistration` as
    /// `add_listener` does. Specs before the failing one stay registered.
    pub fn set_handlers(&self, specs: Vec<HandlerSpec>) -> Result<()> {
        for spec in specs {
            if spec.on.bindings().iter().any(|(name, _)| name.is_empty()) {
                return Err(DispatchError::InvalidInput(format!(
                    "Handler spec bound to [{}] has an empty event name",
                    spec.on.event_names().join(", ")
                )));
            }

            for (event, include) in spec.on.bindings() {
                if include {
                    self.add_listener(event, spec.handler.clone())?;
                }
            }
        }
        Ok(())
    }

    /// Append `handler` to the ordered list for `event`, creating the list
    /// if absent. Chainable.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateRegistration` if this exact instance (pointer
    /// identity, not structural equality) is already registered under
    /// `event`.
    pub fn add_listener(&self, event: &str, handler: Arc<dyn Handler>) -> Result<&Self> {
        self.table.append(event, handler)?;
        Ok(self)
    }

    /// Remove all occurrences of `handler` (pointer identity) from the list
    /// for `event`. No-op when absent; registrations under other events are
    /// untouched. Chainable.
    pub fn remove_listener(&self, event: &str, handler: &Arc<dyn Handler>) -> &Self {
        self.table.remove(event, handler);
        self
    }

    /// Remove every handler under `event` whose runtime type name matches
    /// `type_name` — either the full `std::any::type_name` path or its bare
    /// trailing segment. Registrations under other events are untouched.
    /// Chainable.
    pub fn remove_listener_by_type_name(&self, event: &str, type_name: &str) -> &Self {
        self.table.remove_by_type_name(event, type_name);
        self
    }

    /// Dispatch `event` with `context`.
    ///
    /// Runs lazy initialization first (exactly once per dispatcher
    /// lifetime, even when the context carries no action). A context with
    /// no action dispatches nothing. Otherwise the candidate keys
    /// `"<event>.<action>"` then `"<event>"` are checked in order, firing
    /// every registered handler for each key in registration order; all
    /// specific-key handlers fire before any bare-key handler.
    ///
    /// # Errors
    ///
    /// Propagates loader errors from first-time initialization and the
    /// first handler error unmodified; a handler error aborts dispatch of
    /// the remaining handlers.
    pub fn trigger(&self, event: &str, context: &EventContext) -> Result<()> {
        self.initialise()?;

        let Some(action) = context.action() else {
            debug!(event, "Event carries no action, nothing to dispatch");
            return Ok(());
        };

        debug!(event, action, "Dispatching event");

        // Specific `event.action` listeners fire before generic `event` ones.
        let keys = [event_key(event, action), event.to_string()];
        for key in &keys {
            let handlers = self.table.snapshot(key);
            if handlers.is_empty() {
                continue;
            }

            debug!(key = %key, count = handlers.len(), "Firing handlers");
            for handler in handlers {
                if let Err(e) = handler.fire(context) {
                    error!(
                        key = %key,
                        handler = handler.type_name(),
                        error = %e,
                        "Handler failed, aborting dispatch"
                    );
                    return Err(e);
                }
            }
        }

        Ok(())
    }

    /// Whether the first trigger has already consumed the loader list.
    pub fn is_initialised(&self) -> bool {
        *self.state_guard() == InitState::Initialized
    }

    /// One-shot loader execution, guarded by the state mutex so concurrent
    /// first triggers run loaders exactly once and later triggers wait for
    /// registration to complete before dispatching.
    fn initialise(&self) -> Result<()> {
        let mut state = self.state_guard();
        if *state == InitState::Initialized {
            return Ok(());
        }

        // Transition before running loaders: the one-shot is consumed
        // regardless of outcome, and a failing loader is never retried.
        *state = InitState::Initialized;

        let loaders: Vec<Arc<dyn Loader>> = self
            .loaders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        debug!(count = loaders.len(), "Running loaders");
        for loader in loaders {
            loader.register(self)?;
        }

        Ok(())
    }

    // A poisoned state mutex still describes the lifecycle accurately.
    fn state_guard(&self) -> MutexGuard<'_, InitState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("initialised", &self.is_initialised())
            .field("table", &self.table)
            .finish()
    }
}
