use error_decoder::storage::{JsonFileStore, StorageService, StoreOpened};
use serde_json::json;
use tempfile::tempdir;

#[test]
fn fresh_store_reports_created_and_writes_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");

    let (_store, opened) = JsonFileStore::open(&path).unwrap();
    assert_eq!(opened, StoreOpened::Created);
    assert!(path.exists());

    let (_store, opened) = JsonFileStore::open(&path).unwrap();
    assert_eq!(opened, StoreOpened::Opened);
}

#[test]
fn values_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    {
        let (store, _) = JsonFileStore::open(&path).unwrap();
        store
            .set("backendUrl", json!("http://127.0.0.1:1041/decode"))
            .unwrap();
        store.set("popupDismissSeconds", json!(30)).unwrap();
    }

    let (store, opened) = JsonFileStore::open(&path).unwrap();
    assert_eq!(opened, StoreOpened::Opened);
    assert_eq!(
        store.get("backendUrl"),
        Some(json!("http://127.0.0.1:1041/decode"))
    );
    assert_eq!(store.get("popupDismissSeconds"), Some(json!(30)));
}

#[test]
fn set_overwrites_previous_value() {
    let dir = tempdir().unwrap();
    let (store, _) = JsonFileStore::open(dir.path().join("config.json")).unwrap();
    store.set("popupDismissSeconds", json!(30)).unwrap();
    store.set("popupDismissSeconds", json!(45)).unwrap();
    assert_eq!(store.get("popupDismissSeconds"), Some(json!(45)));
}

#[test]
fn remove_deletes_key_and_tolerates_absent_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    let (store, _) = JsonFileStore::open(&path).unwrap();
    store.set("backendUrl", json!("http://localhost/d")).unwrap();

    store.remove("backendUrl").unwrap();
    assert_eq!(store.get("backendUrl"), None);
    store.remove("backendUrl").unwrap();

    let (store, _) = JsonFileStore::open(&path).unwrap();
    assert_eq!(store.get("backendUrl"), None);
}

#[test]
fn corrupt_file_is_set_aside_and_store_starts_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ this is not json").unwrap();

    let (store, opened) = JsonFileStore::open(&path).unwrap();
    assert_eq!(opened, StoreOpened::Created);
    assert_eq!(store.get("backendUrl"), None);
    assert!(dir.path().join("config.corrupt").exists());

    store.set("backendUrl", json!("http://localhost/d")).unwrap();
    assert_eq!(store.get("backendUrl"), Some(json!("http://localhost/d")));
}
