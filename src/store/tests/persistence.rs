//! Persistence tests: what gets written, reloading, and storage failures.

use super::{empty_options, open_with, LAYOUTS_KEY, WIDGETS_KEY};
use crate::layout::Breakpoint;
use crate::registry::WidgetRegistry;
use crate::storage::{FileStorage, MemoryStorage, Storage, StorageError};
use crate::store::{PersistedInstances, ResetConfirmation, StoreOptions, WidgetStore};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Storage whose writes always fail.
#[derive(Debug, Default)]
struct ReadOnlyStorage {
    inner: MemoryStorage,
    write_attempts: usize,
}

impl Storage for ReadOnlyStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.read(key)
    }

    fn write(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
        self.write_attempts += 1;
        Err(StorageError::Write {
            key: key.to_string(),
            path: PathBuf::from("/read-only"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        Err(StorageError::Remove {
            key: key.to_string(),
            path: PathBuf::from("/read-only"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}

fn read_only_store() -> WidgetStore<ReadOnlyStorage> {
    WidgetStore::open(
        Arc::new(WidgetRegistry::builtin()),
        ReadOnlyStorage::default(),
        empty_options(),
    )
}

#[test]
fn test_add_writes_both_blobs() {
    let mut store = open_with(MemoryStorage::new());
    let chat = store.add_instance("AgentChatWidget", None);

    let widgets = store.storage().get(WIDGETS_KEY).expect("widgets saved");
    assert!(widgets.contains(chat.id.as_str()));
    assert!(widgets.contains(r#""widgetType":"AgentChatWidget""#));

    let layouts = store.storage().get(LAYOUTS_KEY).expect("layouts saved");
    assert!(layouts.contains(r#""lg""#));
    assert!(layouts.contains(r#""xxs""#));
}

#[test]
fn test_state_survives_reopen() {
    let mut store = open_with(MemoryStorage::new());
    let chat = store.add_instance("AgentChatWidget", None);
    store.add_instance("StatusWidget", None);
    let layouts = store.layouts().clone();
    let instances = store.list_instances().to_vec();

    let reopened = open_with(store.into_storage());
    assert_eq!(reopened.list_instances(), instances.as_slice());
    assert_eq!(reopened.layouts(), &layouts);
    assert!(reopened.get_instance(chat.id.as_str()).is_some());
}

#[test]
fn test_mutations_survive_failing_storage() {
    let mut store = read_only_store();
    let chat = store.add_instance("AgentChatWidget", None);
    store.add_instance("StatusWidget", None);
    assert_eq!(store.list_instances().len(), 2);
    assert_eq!(store.get_layout(Breakpoint::Lg).len(), 2);

    assert!(store.remove_instance(chat.id.as_str()).is_some());
    store.reset_to_defaults(ResetConfirmation::confirmed());
    assert!(store.list_instances().is_empty());
    assert!(store.storage().write_attempts > 0);
}

#[test]
fn test_flush_reports_storage_failure() {
    let mut store = read_only_store();
    store.add_instance("AgentChatWidget", None);
    let err = store.flush().expect_err("writes fail");
    assert!(matches!(err, StorageError::Write { ref key, .. } if key == WIDGETS_KEY));
}

#[test]
fn test_flush_writes_current_state() {
    let mut store = open_with(MemoryStorage::new());
    store.add_instance("StatusWidget", None);
    store.flush().expect("flush");

    let saved = store.storage().get(WIDGETS_KEY).expect("saved");
    let persisted = PersistedInstances::from_json(saved).expect("parse");
    assert_eq!(persisted.widgets, store.list_instances());
}

#[test]
fn test_custom_keys_are_used() {
    let options = StoreOptions {
        instances_key: "board-a.widgets".to_string(),
        layouts_key: "board-a.layouts".to_string(),
        default_widgets: vec!["StatusWidget".to_string()],
    };
    let store = WidgetStore::open(
        Arc::new(WidgetRegistry::builtin()),
        MemoryStorage::new(),
        options,
    );
    assert!(store.storage().contains("board-a.widgets"));
    assert!(store.storage().contains("board-a.layouts"));
    assert!(!store.storage().contains(WIDGETS_KEY));
}

#[test]
fn test_file_storage_round_trip() {
    let dir = TempDir::new().expect("tempdir");
    let registry = Arc::new(WidgetRegistry::builtin());

    let mut store = WidgetStore::open(
        Arc::clone(&registry),
        FileStorage::new(dir.path()),
        empty_options(),
    );
    let chat = store.add_instance("AgentChatWidget", None);
    store.add_instance("PromptLibraryWidget", None);
    drop(store);

    let reopened = WidgetStore::open(registry, FileStorage::new(dir.path()), empty_options());
    assert!(reopened.get_instance(chat.id.as_str()).is_some());
    let ys: Vec<u32> = reopened.get_layout(Breakpoint::Lg).iter().map(|e| e.y).collect();
    assert_eq!(ys, vec![0, 9]);
}
