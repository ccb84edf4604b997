//! Handler registry backing the dispatcher
//!
//! The registry maps event keys (`"<event>"` or `"<event>.<action>"`) to
//! ordered lists of handler references. Per-key order is the firing order
//! and is always insertion order; key order carries no meaning. Duplicate
//! detection and removal are identity-based: the same `Arc` cannot appear
//! twice under one key, and removal matches pointers, never structural
//! equality.
//!
//! # Examples
//!
//! ```ignore
//! let table = HandlerTable::new();
//! table.append("content.publish", handler.clone())?;
//! let handlers = table.snapshot("content.publish");
//! assert_eq!(handlers.len(), 1);
//! ```

pub mod storage;

pub use storage::HandlerTable;
