//! ローカルストアのテスト

use home_online::error::HomeOnlineError;
use home_online::store::{LocalStore, DASHBOARD_KEY};
use home_online_common::{ApplicationType, DocumentChecklist, StoredApplication, APPLICATION_KEY};
use tempfile::tempdir;

#[test]
fn test_missing_file_is_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = LocalStore::open(&dir.path().join("none.json")).unwrap();
    assert!(store.is_empty());
}

/// 壊れたファイルは空扱いせずエラー
#[test]
fn test_corrupt_file_is_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("store.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = LocalStore::open(&path);
    assert!(matches!(result, Err(HomeOnlineError::CorruptStore { .. })));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
}

/// NotFound 以外の読み込みエラーはそのまま返す
#[test]
fn test_unreadable_file_is_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("store.json");
    std::fs::write(&path, [0xFF, 0xFE, 0x00, 0x7B]).unwrap();

    let result = LocalStore::open(&path);
    assert!(matches!(result, Err(HomeOnlineError::Io(_))));
}

#[test]
fn test_set_save_reload() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("store.json");

    let mut store = LocalStore::open(&path).unwrap();
    store
        .set_item(APPLICATION_KEY, &StoredApplication::new(ApplicationType::Refinance))
        .unwrap();
    store.set_item("counter", &3u32).unwrap();
    store.save().unwrap();

    let reloaded = LocalStore::open(&path).unwrap();
    assert_eq!(reloaded.len(), 2);
    let app: StoredApplication = reloaded.get_item(APPLICATION_KEY).unwrap().unwrap();
    assert_eq!(app.display_title(), "Refinance Application");
    assert_eq!(reloaded.get_item::<u32>("counter").unwrap(), Some(3));
    assert_eq!(reloaded.get_item::<u32>("missing").unwrap(), None);

    // 保存形式はキーがそのまま見える JSON
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"homeOnlineApplication\""));
    assert!(raw.contains("\"type\": \"refinance\""));
}

/// 型が合わないエントリはエラー（None にしない）
#[test]
fn test_get_item_wrong_type() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut store = LocalStore::open(&dir.path().join("store.json")).unwrap();
    store.set_item(DASHBOARD_KEY, &"not a checklist").unwrap();

    let result = store.get_item::<DocumentChecklist>(DASHBOARD_KEY);
    assert!(matches!(
        result,
        Err(HomeOnlineError::CorruptEntry { ref key, .. }) if key == DASHBOARD_KEY
    ));
    assert!(store.contains(DASHBOARD_KEY));
}

#[test]
fn test_remove_item() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut store = LocalStore::open(&dir.path().join("store.json")).unwrap();
    store.set_item("a", &1).unwrap();

    assert!(store.remove_item("a"));
    assert!(!store.remove_item("a"));
    assert!(store.is_empty());
}
