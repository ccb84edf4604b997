//! Event dispatcher: registration, lazy initialization, and triggering
//!
//! The dispatcher is the root of the engine. It owns the handler table and
//! the loader list, and resolves which handlers fire for a given
//! event/action pair using a two-tier policy:
//!
//! 1. handlers bound to the specific `"<event>.<action>"` key, then
//! 2. handlers bound to the bare `"<event>"` key,
//!
//! each list in registration order, all with the same shared context.
//!
//! Loaders run exactly once, at the first `trigger` call, regardless of that
//! call's action or outcome. A dispatcher is typically constructed once per
//! process, configured with loaders, and shared for the process lifetime.
//!
//! # Examples
//!
//! ```ignore
//! let dispatcher = Dispatcher::new();
//! dispatcher.set_loaders(vec![Arc::new(config_loader)]);
//!
//! let context = EventContext::for_action("publish");
//! dispatcher.trigger("content", &context)?;
//! ```

pub mod engine;

pub use engine::Dispatcher;
