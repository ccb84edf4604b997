//! Configuration-driven handler registration
//!
//! Handler bindings can be described in YAML and registered through a
//! [`ConfigLoader`], which the dispatcher runs at first trigger like any
//! other [`Loader`](crate::loader::Loader). Because handlers themselves are
//! code, the document names them and a caller-supplied [`HandlerCatalog`]
//! resolves those names to instances.
//!
//! Document shape:
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
//! The `on` node accepts either a single event key or a map from event key
//! to an include flag, mirroring [`On`](crate::types::On).

pub mod loader;
pub mod validator;

use serde::{Deserialize, Serialize};

use crate::types::On;

pub use loader::{ConfigLoader, HandlerCatalog};
pub use validator::ConfigValidator;

/// One configured handler binding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandlerSpecConfig {
    /// Catalog name of the handler to register
    pub handler: String,

    /// Events to register it under
    pub on: On,
}

/// Root of a handler configuration document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HandlersDocument {
    /// Configured bindings, in document order
    #[serde(default)]
    pub handlers: Vec<HandlerSpecConfig>,
}
