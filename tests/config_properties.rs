//! Property-based tests for configuration-driven registration
//!
//! Generates handler documents with mixed include flags and verifies that
//! exactly the included bindings fire after the dispatcher's first trigger.

use std::collections::HashMap;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use proptest::prelude::*;

use snapshot_dispatch::{
    ConfigLoader, Dispatcher, EventContext, Handler, HandlerCatalog, Result as DispatchResult,
};

/// Counts its own invocations.
struct CountingHandler {
    calls: AtomicUsize,
}

impl CountingHandler {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Handler for CountingHandler {
    fn fire(&self, _context: &EventContext) -> DispatchResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Strategy for a set of distinct event names with include flags
fn toggles_strategy() -> impl Strategy<Value = HashMap<String, bool>> {
    proptest::collection::hash_map("[a-z]{1,6}", any::<bool>(), 1..5)
}

fn toggles_yaml(toggles: &HashMap<String, bool>) -> String {
    let mut doc = String::from("handlers:\n  - handler: probe\n    on:\n");
    for (event, include) in toggles {
        doc.push_str(&format!("      {event}: {include}\n"));
    }
    doc
}

proptest! {
    /// Only bindings with a true include flag register; each fires exactly
    /// once when its event triggers with a matching action.
    #[test]
    fn prop_only_included_bindings_register(toggles in toggles_strategy()) {
        let handler = CountingHandler::new();
        let catalog = HandlerCatalog::new().insert("probe", handler.clone());

        let loader = ConfigLoader::load_from_str(&toggles_yaml(&toggles), catalog).unwrap();

        let dispatcher = Dispatcher::new();
        dispatcher.set_loaders(vec![Arc::new(loader)]);

        for event in toggles.keys() {
            dispatcher
                .trigger(event, &EventContext::for_action("touch"))
                .unwrap();
        }

        let included = toggles.values().filter(|include| **include).count();
        prop_assert_eq!(handler.calls(), included);
    }
}

#[test]
fn test_config_file_loading_through_first_trigger() {
    let handler = CountingHandler::new();
    let catalog = HandlerCatalog::new().insert("publish_snapshot", handler.clone());

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "handlers:\n  - handler: publish_snapshot\n    on: content.publish\n"
    )
    .unwrap();

    let loader = ConfigLoader::load_from_path(file.path(), catalog).unwrap();
    assert_eq!(loader.len(), 1);

    let dispatcher = Dispatcher::new();
    dispatcher.set_loaders(vec![Arc::new(loader)]);

    dispatcher
        .trigger("content", &EventContext::for_action("publish"))
        .unwrap();
    dispatcher
        .trigger("content", &EventContext::for_action("unpublish"))
        .unwrap();

    assert_eq!(handler.calls(), 1);
}

#[test]
fn test_missing_config_file_is_empty_configuration() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("handlers.yaml");

    let loader = ConfigLoader::load_from_path(&path, HandlerCatalog::new()).unwrap();
    assert!(loader.is_empty());

    let dispatcher = Dispatcher::new();
    dispatcher.set_loaders(vec![Arc::new(loader)]);
    dispatcher
        .trigger("content", &EventContext::for_action("publish"))
        .unwrap();
}

#[test]
fn test_spec_missing_handler_name_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "handlers:\n  - on: content.publish\n").unwrap();

    let result = ConfigLoader::load_from_path(file.path(), HandlerCatalog::new());
    assert!(result.is_err());
}
