//! Configuration loader implementing the [`Loader`] capability

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::dispatcher::Dispatcher;
use crate::error::{DispatchError, Result};
use crate::handler::Handler;
use crate::loader::Loader;

use super::{ConfigValidator, HandlersDocument};

/// Name-to-instance table resolving configured handler names
///
/// Embedders register their handler instances under the names the
/// configuration document refers to. Cloning an entry out of the catalog
/// clones the `Arc`, so one catalog entry bound to several events keeps a
/// single handler identity.
#[derive(Default, Clone)]
pub struct HandlerCatalog {
    entries: HashMap<String, Arc<dyn Handler>>,
}

impl HandlerCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`, replacing any previous entry.
    pub fn insert(mut self, name: impl Into<String>, handler: Arc<dyn Handler>) -> Self {
        self.entries.insert(name.into(), handler);
        self
    }

    /// Look up a handler by its configured name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Handler>> {
        self.entries.get(name).cloned()
    }

    /// Names currently registered, unordered.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }
}

impl std::fmt::Debug for HandlerCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerCatalog")
            .field("names", &self.names())
            .finish()
    }
}

/// [`Loader`] that registers handler bindings parsed from YAML
///
/// Parsing and structural validation happen at construction, so a malformed
/// document is rejected before the dispatcher is ever triggered. Handler
/// names are resolved against the catalog at registration time; an unknown
/// name surfaces as `InvalidInput` from the first trigger, like any other
/// loader failure.
pub struct ConfigLoader {
    document: HandlersDocument,
    catalog: HandlerCatalog,
}

impl ConfigLoader {
    /// Parse a configuration document from YAML content.
    ///
    /// # Errors
    ///
    /// Returns `Config` for malformed YAML and `InvalidInput` for a
    /// structurally invalid document.
    pub fn load_from_str(content: &str, catalog: HandlerCatalog) -> Result<Self> {
        let document: HandlersDocument = serde_yaml::from_str(content)?;
        ConfigValidator::validate_document(&document)?;

        debug!(specs = document.handlers.len(), "Parsed handler configuration");
        Ok(Self { document, catalog })
    }

    /// Parse a configuration document from a file.
    ///
    /// A missing file is an empty configuration, not an error, so optional
    /// project-level config files can be probed unconditionally.
    ///
    /// # Errors
    ///
    /// Returns `Io` when the file exists but cannot be read, plus the
    /// errors of [`load_from_str`](Self::load_from_str).
    pub fn load_from_path(path: &Path, catalog: HandlerCatalog) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No handler configuration file, using empty document");
            return Ok(Self {
                document: HandlersDocument::default(),
                catalog,
            });
        }

        let content = fs::read_to_string(path)?;
        Self::load_from_str(&content, catalog)
    }

    /// Number of configured specs.
    pub fn len(&self) -> usize {
        self.document.handlers.len()
    }

    /// True when the document configures nothing.
    pub fn is_empty(&self) -> bool {
        self.document.handlers.is_empty()
    }
}

impl Loader for ConfigLoader {
    fn register(&self, dispatcher: &Dispatcher) -> Result<()> {
        for spec in &self.document.handlers {
            let handler = self.catalog.get(&spec.handler).ok_or_else(|| {
                DispatchError::InvalidInput(format!(
                    "Unknown handler '{}' bound to: {}",
                    spec.handler,
                    spec.on.event_names().join(", ")
                ))
            })?;

            for (event, include) in spec.on.bindings() {
                if include {
                    dispatcher.add_listener(event, handler.clone())?;
                }
            }
        }

        Ok(())
    }
}
