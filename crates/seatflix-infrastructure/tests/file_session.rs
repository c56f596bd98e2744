//! Session persistence across process restarts using on-disk storage.

use std::sync::Arc;

use seatflix_core::storage::{AUTH_TOKEN_KEY, SESSION_KEYS, USER_ID_KEY, USER_KEY};
use seatflix_core::{DurableStorage, GuardDecision, Identity, NavigationGuard, SessionStore};
use seatflix_infrastructure::FileDurableStorage;
use tempfile::TempDir;

fn open_store(temp_dir: &TempDir) -> (Arc<FileDurableStorage>, SessionStore) {
    let storage = Arc::new(FileDurableStorage::new(Some(temp_dir.path())).unwrap());
    let store = SessionStore::new(storage.clone());
    (storage, store)
}

#[test]
fn test_login_survives_restart() {
    let temp_dir = TempDir::new().unwrap();

    {
        let (_, store) = open_store(&temp_dir);
        store.restore();
        store
            .login("tok-1", Identity::new("42", "alice", "alice@example.com"))
            .unwrap();
    }

    let (storage, store) = open_store(&temp_dir);
    let snapshot = store.restore();

    assert!(snapshot.is_authenticated);
    assert_eq!(snapshot.username(), Some("alice"));
    assert_eq!(store.token().as_deref(), Some("tok-1"));
    assert_eq!(storage.get_item(USER_ID_KEY).unwrap().as_deref(), Some("42"));
    assert!(NavigationGuard::new().decide(&snapshot, ()).is_render());
}

#[test]
fn test_logout_removes_keys_from_disk() {
    let temp_dir = TempDir::new().unwrap();
    let (storage, store) = open_store(&temp_dir);
    store.restore();
    store
        .login("tok-1", Identity::new("42", "alice", "alice@example.com"))
        .unwrap();

    store.logout().unwrap();

    for key in SESSION_KEYS {
        assert_eq!(storage.get_item(key).unwrap(), None, "{key} should be gone");
    }

    let (_, restarted) = open_store(&temp_dir);
    let snapshot = restarted.restore();
    assert!(!snapshot.is_authenticated);
    assert_eq!(
        NavigationGuard::new().decide(&snapshot, ()),
        GuardDecision::Redirect("/".to_string())
    );
}

#[test]
fn test_corrupt_identity_on_disk_is_purged() {
    let temp_dir = TempDir::new().unwrap();
    let (storage, _) = open_store(&temp_dir);
    storage.set_item(AUTH_TOKEN_KEY, "tok-1").unwrap();
    storage.set_item(USER_KEY, "{not json").unwrap();

    let (_, store) = open_store(&temp_dir);
    let snapshot = store.restore();

    assert!(!snapshot.loading);
    assert!(!snapshot.is_authenticated);
    assert_eq!(storage.get_item(AUTH_TOKEN_KEY).unwrap(), None);
    assert_eq!(storage.get_item(USER_KEY).unwrap(), None);
}

#[test]
fn test_unparseable_storage_file_does_not_block_sign_in() {
    let temp_dir = TempDir::new().unwrap();
    let (storage, _) = open_store(&temp_dir);
    std::fs::write(storage.path(), "authToken = [unterminated").unwrap();

    let (_, store) = open_store(&temp_dir);
    let snapshot = store.restore();
    assert!(!snapshot.loading);
    assert!(!snapshot.is_authenticated);

    store
        .login("tok-2", Identity::new("42", "alice", "alice@example.com"))
        .unwrap();
    assert_eq!(storage.get_item(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("tok-2"));

    let (_, restarted) = open_store(&temp_dir);
    assert!(restarted.restore().is_authenticated);

    restarted.logout().unwrap();
    for key in SESSION_KEYS {
        assert_eq!(storage.get_item(key).unwrap(), None, "{key} should be gone");
    }
}

#[test]
fn test_logout_recovers_unparseable_storage_file() {
    let temp_dir = TempDir::new().unwrap();
    let (storage, store) = open_store(&temp_dir);
    std::fs::write(storage.path(), "= garbage").unwrap();
    store.restore();

    store.logout().unwrap();

    for key in SESSION_KEYS {
        assert_eq!(storage.get_item(key).unwrap(), None);
    }
}
