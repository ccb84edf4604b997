//! Handler capability consumed by the dispatcher
//!
//! Handlers are the units of behavior that fire when a matching event/action
//! occurs. The dispatcher treats them opaquely and uniformly: it guarantees
//! registration order within one event key and specific-before-generic order
//! across keys, and nothing else. A typical implementation builds and
//! persists a snapshot record describing the content objects affected by the
//! triggering action; that logic lives entirely with the implementor.

use crate::error::Result;
use crate::types::EventContext;

/// A unit of behavior invoked when a matching event/action fires
///
/// Implementations must be `Send + Sync`; a process-wide dispatcher shares
/// them across threads. `fire` is called synchronously and inline from
/// [`Dispatcher::trigger`], so blocking work blocks the triggering call.
///
/// Errors from `fire` propagate unmodified to the trigger caller and abort
/// dispatch of the remaining handlers for that event. Wrap foreign error
/// types with [`DispatchError::handler_failure`].
///
/// [`Dispatcher::trigger`]: crate::dispatcher::Dispatcher::trigger
/// [`DispatchError::handler_failure`]: crate::error::DispatchError::handler_failure
pub trait Handler: Send + Sync {
    /// Perform this handler's side effects for one triggering action.
    ///
    /// The context is shared by reference with every sibling handler fired
    /// during the same trigger call and must not be mutated.
    fn fire(&self, context: &EventContext) -> Result<()>;

    /// Runtime type name of this handler.
    ///
    /// Resolved per concrete implementation, so it works through trait
    /// objects. Used by
    /// [`Dispatcher::remove_listener_by_type_name`](crate::dispatcher::Dispatcher::remove_listener_by_type_name).
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopHandler;

    impl Handler for NoopHandler {
        fn fire(&self, _context: &EventContext) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_type_name_resolves_concrete_type_through_trait_object() {
        let handler: Box<dyn Handler> = Box::new(NoopHandler);
        assert!(handler.type_name().ends_with("NoopHandler"));
    }
}
