//! In-memory handler table implementation

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::{DispatchError, Result};
use crate::handler::Handler;

type Entries = HashMap<String, Vec<Arc<dyn Handler>>>;

/// Ordered per-key handler lists behind a read-write lock
///
/// Readers take a cloned snapshot of a key's list, so an in-flight dispatch
/// iterates stable state even while other threads (or the handlers
/// themselves) mutate the table.
#[derive(Default)]
pub struct HandlerTable {
    entries: RwLock<Entries>,
}

impl HandlerTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `handler` to the ordered list for `key`, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateRegistration` if this exact instance (pointer
    /// identity) is already registered under `key`.
    pub fn append(&self, key: &str, handler: Arc<dyn Handler>) -> Result<()> {
        let mut entries = self.write();
        let list = entries.entry(key.to_string()).or_default();

        if list.iter().any(|existing| Arc::ptr_eq(existing, &handler)) {
            return Err(DispatchError::DuplicateRegistration(key.to_string()));
        }

        debug!(key, handler = handler.type_name(), "Registered handler");
        list.push(handler);
        Ok(())
    }

    /// Remove all occurrences of `handler` (pointer identity) from `key`'s
    /// list. Lists under other keys are left untouched. No-op when the
    /// handler or the key is absent.
    pub fn remove(&self, key: &str, handler: &Arc<dyn Handler>) {
        let mut entries = self.write();
        if let Some(list) = entries.get_mut(key) {
            list.retain(|existing| !Arc::ptr_eq(existing, handler));
        }
    }

    /// Remove every handler under `key` whose runtime type name matches
    /// `type_name`. Lists under other keys are left untouched.
    pub fn remove_by_type_name(&self, key: &str, type_name: &str) {
        let mut entries = self.write();
        if let Some(list) = entries.get_mut(key) {
            list.retain(|existing| !type_name_matches(existing.type_name(), type_name));
        }
    }

    /// Cloned snapshot of `key`'s list, in registration order; empty when
    /// nothing is registered under `key`.
    pub fn snapshot(&self, key: &str) -> Vec<Arc<dyn Handler>> {
        self.read().get(key).cloned().unwrap_or_default()
    }

    /// Number of handlers registered under `key`.
    pub fn len(&self, key: &str) -> usize {
        self.read().get(key).map_or(0, Vec::len)
    }

    /// True when no key has any handler registered.
    pub fn is_empty(&self) -> bool {
        self.read().values().all(Vec::is_empty)
    }

    // A poisoned lock still holds a structurally valid table, so recover the
    // guard instead of failing registration paths that the contract defines
    // as infallible.
    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self.read();
        let mut map = f.debug_map();
        for (key, list) in entries.iter() {
            map.entry(key, &list.len());
        }
        map.finish()
    }
}

/// Match a full `std::any::type_name` path against a query that may be the
/// full path or just the bare type name.
fn type_name_matches(full: &str, query: &str) -> bool {
    full == query || full.rsplit("::").next() == Some(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EventContext;

    struct RecordingHandler;

    impl Handler for RecordingHandler {
        fn fire(&self, _context: &EventContext) -> Result<()> {
            Ok(())
        }
    }

    struct OtherHandler;

    impl Handler for OtherHandler {
        fn fire(&self, _context: &EventContext) -> Result<()> {
            Ok(())
        }
    }

    fn handler() -> Arc<dyn Handler> {
        Arc::new(RecordingHandler)
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let table = HandlerTable::new();
        let first = handler();
        let second = handler();

        table.append("content", first.clone()).unwrap();
        table.append("content", second.clone()).unwrap();

        let snapshot = table.snapshot("content");
        assert_eq!(snapshot.len(), 2);
        assert!(Arc::ptr_eq(&snapshot[0], &first));
        assert!(Arc::ptr_eq(&snapshot[1], &second));
    }

    #[test]
    fn test_append_rejects_same_instance_under_same_key() {
        let table = HandlerTable::new();
        let h = handler();

        table.append("content", h.clone()).unwrap();
        let result = table.append("content", h);

        assert!(matches!(
            result,
            Err(DispatchError::DuplicateRegistration(key)) if key == "content"
        ));
    }

    #[test]
    fn test_append_accepts_same_instance_under_different_keys() {
        let table = HandlerTable::new();
        let h = handler();

        table.append("content.publish", h.clone()).unwrap();
        table.append("content", h).unwrap();

        assert_eq!(table.len("content.publish"), 1);
        assert_eq!(table.len("content"), 1);
    }

    #[test]
    fn test_append_accepts_structurally_equal_but_distinct_instances() {
        let table = HandlerTable::new();

        table.append("content", handler()).unwrap();
        table.append("content", handler()).unwrap();

        assert_eq!(table.len("content"), 2);
    }

    #[test]
    fn test_remove_is_identity_based_and_scoped_to_key() {
        let table = HandlerTable::new();
        let target = handler();
        let bystander = handler();

        table.append("content", target.clone()).unwrap();
        table.append("content", bystander.clone()).unwrap();
        table.append("form", target.clone()).unwrap();

        table.remove("content", &target);

        let remaining = table.snapshot("content");
        assert_eq!(remaining.len(), 1);
        assert!(Arc::ptr_eq(&remaining[0], &bystander));
        // The same instance under another key survives.
        assert_eq!(table.len("form"), 1);
    }

    #[test]
    fn test_remove_absent_handler_is_noop() {
        let table = HandlerTable::new();
        table.append("content", handler()).unwrap();

        table.remove("content", &handler());
        table.remove("missing", &handler());

        assert_eq!(table.len("content"), 1);
    }

    #[test]
    fn test_remove_by_type_name_matches_bare_and_full_names() {
        let table = HandlerTable::new();
        table.append("content", Arc::new(RecordingHandler)).unwrap();
        table.append("content", Arc::new(OtherHandler)).unwrap();

        table.remove_by_type_name("content", "RecordingHandler");
        assert_eq!(table.len("content"), 1);

        let full = std::any::type_name::<OtherHandler>();
        table.remove_by_type_name("content", full);
        assert_eq!(table.len("content"), 0);
    }

    #[test]
    fn test_remove_by_type_name_scoped_to_key() {
        let table = HandlerTable::new();
        table.append("content", Arc::new(RecordingHandler)).unwrap();
        table.append("form", Arc::new(RecordingHandler)).unwrap();

        table.remove_by_type_name("content", "RecordingHandler");

        assert_eq!(table.len("content"), 0);
        assert_eq!(table.len("form"), 1);
    }

    #[test]
    fn test_snapshot_of_unknown_key_is_empty() {
        let table = HandlerTable::new();
        assert!(table.snapshot("missing").is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn test_type_name_matching() {
        assert!(type_name_matches("crate::handlers::AuditHandler", "AuditHandler"));
        assert!(type_name_matches(
            "crate::handlers::AuditHandler",
            "crate::handlers::AuditHandler"
        ));
        assert!(!type_name_matches("crate::handlers::AuditHandler", "Audit"));
        assert!(!type_name_matches(
            "crate::handlers::AuditHandler",
            "other::AuditHandler"
        ));
    }
}
