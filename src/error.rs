//! Error types for the dispatch engine
//!
//! All public APIs return [`Result<T>`], an alias over [`DispatchError`].
//! Errors are surfaced to the immediate caller; nothing is retried or
//! swallowed internally. A handler failure aborts the remainder of the
//! dispatch it occurred in, so callers own recovery end to end.

use thiserror::Error;

/// Errors that can occur in the dispatch engine
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Malformed handler spec or configuration input
    ///
    /// Raised synchronously at the call that detects it. The message names
    /// the offending event name(s) or handler name where one exists.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Same handler instance registered twice under one event key
    ///
    /// Registration is identity-based: two structurally equal handler
    /// instances are distinct, but the same instance cannot appear twice
    /// under the same key. The string is the event key.
    #[error("Handler for {0} has already been added")]
    DuplicateRegistration(String),

    /// A handler's `fire` call failed
    ///
    /// The source error is preserved unmodified. Dispatch of remaining
    /// handlers for the triggering event is abandoned.
    #[error("Handler {handler} failed: {source}")]
    HandlerFailed {
        /// Runtime type name of the failing handler
        handler: String,
        /// The handler's own error, untouched
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration parse error
    ///
    /// Wraps `serde_yaml::Error` for malformed handler-spec documents.
    #[error("Configuration error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// IO error
    ///
    /// Wraps `std::io::Error` for configuration file reads.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DispatchError {
    /// Wrap a handler's own error type for propagation out of `fire`.
    pub fn handler_failure(
        handler: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::HandlerFailed {
            handler: handler.into(),
            source: source.into(),
        }
    }
}

/// Result type for dispatch operations
pub type Result<T> = std::result::Result<T, DispatchError>;
