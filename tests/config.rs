use error_decoder::config;
use error_decoder::storage::{JsonFileStore, StorageService};
use serde_json::json;
use tempfile::tempdir;

#[test]
fn backend_url_round_trips() {
    let dir = tempdir().unwrap();
    let (store, _) = JsonFileStore::open(dir.path().join("config.json")).unwrap();
    store
        .set("backendUrl", json!("http://127.0.0.1:1041/decode"))
        .unwrap();

    assert_eq!(
        config::backend_url(&store).unwrap(),
        "http://127.0.0.1:1041/decode"
    );
}

#[test]
fn backend_url_errors_when_unset() {
    let dir = tempdir().unwrap();
    let (store, _) = JsonFileStore::open(dir.path().join("config.json")).unwrap();

    let err = config::backend_url(&store).unwrap_err();
    assert!(err.to_string().contains("no backend URL"));
}

#[test]
fn backend_url_treats_empty_and_wrong_types_as_unset() {
    let dir = tempdir().unwrap();
    let (store, _) = JsonFileStore::open(dir.path().join("config.json")).unwrap();

    store.set("backendUrl", json!("")).unwrap();
    assert!(config::backend_url(&store).is_err());

    store.set("backendUrl", json!(42)).unwrap();
    assert!(config::backend_url(&store).is_err());
}

#[test]
fn dismiss_seconds_read_as_integer_or_nothing() {
    let dir = tempdir().unwrap();
    let (store, _) = JsonFileStore::open(dir.path().join("config.json")).unwrap();

    assert_eq!(config::stored_dismiss_seconds(&store), None);

    store.set("popupDismissSeconds", json!(45)).unwrap();
    assert_eq!(config::stored_dismiss_seconds(&store), Some(45));

    store.set("popupDismissSeconds", json!("45")).unwrap();
    assert_eq!(config::stored_dismiss_seconds(&store), None);
}
