//! Loader capability for deferred handler registration
//!
//! A loader is a source of handler registrations whose execution is deferred
//! until the dispatcher's first trigger. Loaders are run exactly once, in
//! list order, and each is handed the dispatcher so it can call
//! `add_listener` / `set_handlers` against it. There is no mechanism to run
//! loaders again or to add loaders after the first trigger has occurred.

use crate::dispatcher::Dispatcher;
use crate::error::Result;

/// A deferred source of handler registrations
///
/// `register` must only call the dispatcher's registration operations
/// (`add_listener`, `set_handlers`); calling `trigger` from inside a loader
/// deadlocks on the initialization gate.
pub trait Loader: Send + Sync {
    /// Populate the dispatcher's handler table.
    ///
    /// Errors propagate to the caller of the first `trigger`; the
    /// dispatcher still counts as initialized and never re-runs loaders.
    fn register(&self, dispatcher: &Dispatcher) -> Result<()>;
}

/// Adapter turning a closure into a [`Loader`]
///
/// # Examples
///
/// ```ignore
/// let loader = FnLoader::new(|dispatcher: &Dispatcher| {
///     dispatcher.add_listener("content.publish", handler.clone())?;
///     Ok(())
/// });
/// dispatcher.set_loaders(vec![Arc::new(loader)]);
/// ```
pub struct FnLoader<F> {
    f: F,
}

impl<F> FnLoader<F>
where
    F: Fn(&Dispatcher) -> Result<()> + Send + Sync,
{
    /// Wrap a registration closure.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Loader for FnLoader<F>
where
    F: Fn(&Dispatcher) -> Result<()> + Send + Sync,
{
    fn register(&self, dispatcher: &Dispatcher) -> Result<()> {
        (self.f)(dispatcher)
    }
}
