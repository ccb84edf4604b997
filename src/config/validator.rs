//! Validation for handler configuration documents
//!
//! Validation runs when a document is parsed, before any registration, so a
//! malformed document fails fast with a message naming the offending
//! handler and event name(s).

use crate::error::{DispatchError, Result};

use super::{HandlerSpecConfig, HandlersDocument};

/// Structural validator for handler configuration
///
/// Checks that every spec names a handler, binds at least one event, and
/// uses well-formed event keys: one or two non-empty segments separated by
/// at most one `.`, each segment lowercase alphanumeric with underscores.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a whole document.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for the first malformed spec found.
    pub fn validate_document(document: &HandlersDocument) -> Result<()> {
        for spec in &document.handlers {
            Self::validate_spec(spec)?;
        }
        Ok(())
    }

    /// Validate a single spec.
    pub fn validate_spec(spec: &HandlerSpecConfig) -> Result<()> {
        if spec.handler.is_empty() {
            return Err(DispatchError::InvalidInput(format!(
                "Handler name missing for spec bound to: {}",
                spec.on.event_names().join(", ")
            )));
        }

        let bindings = spec.on.bindings();
        if bindings.is_empty() {
            return Err(DispatchError::InvalidInput(format!(
                "Handler '{}' binds no events",
                spec.handler
            )));
        }

        for (event, _) in bindings {
            Self::validate_event_key(event).map_err(|_| {
                DispatchError::InvalidInput(format!(
                    "Invalid event name '{}' for handler '{}'",
                    event, spec.handler
                ))
            })?;
        }

        Ok(())
    }

    /// Validate one event key: `"<event>"` or `"<event>.<action>"`.
    pub fn validate_event_key(key: &str) -> Result<()> {
        let segments: Vec<&str> = key.split('.').collect();

        let well_formed = segments.len() <= 2
            && segments.iter().all(|segment| {
                !segment.is_empty()
                    && segment
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
            });

        if !well_formed {
            return Err(DispatchError::InvalidInput(format!(
                "Invalid event name '{key}'. Event keys are lowercase segments with at most one '.'"
            )));
        }

        Ok(())
    }
}
