use super::*;
use crate::core::types::Bucket;
use tempfile::tempdir;

#[test]
fn test_missing_file_writes_defaults() {
    let dir = tempdir().expect("tempdir");
    let store = ConfigStore::new(dir.path().join("nested").join("config.json"));

    let loaded = store.load().expect("load");
    assert_eq!(loaded.config, AppConfig::default());
    assert!(loaded.recovered.is_none());
    assert!(store.path().exists());
}

#[test]
fn test_corrupt_file_is_backed_up_and_reset() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    fs::write(&path, "{ not json").expect("write");
    let store = ConfigStore::new(&path);

    let loaded = store.load().expect("load");
    assert!(loaded.recovered.is_some());
    assert_eq!(loaded.config, AppConfig::default());

    let backup = fs::read_to_string(store.backup_path()).expect("backup");
    assert_eq!(backup, "{ not json");

    let rewritten = fs::read_to_string(&path).expect("config");
    assert!(serde_json::from_str::<Value>(&rewritten).is_ok());
}

#[test]
fn test_update_persists_changes() {
    let dir = tempdir().expect("tempdir");
    let store = ConfigStore::new(dir.path().join("config.json"));

    store
        .update(|config| {
            config.store.managers = vec!["winget".to_string()];
            config.upsert_bucket(Bucket::named("dorado"));
        })
        .expect("update");

    let reloaded = store.load().expect("reload").config;
    assert_eq!(reloaded.store.managers, vec!["winget"]);
    assert!(reloaded.buckets.iter().any(|b| b.name == "dorado"));
    assert!(!dir.path().join("config.json.tmp").exists());
}

#[test]
fn test_partially_invalid_file_keeps_valid_fields() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{"buckets": 3, "store": {"managers": ["choco"], "layout": "grid"}}"#,
    )
    .expect("write");

    let loaded = ConfigStore::new(&path).load().expect("load");
    assert!(loaded.recovered.is_none());
    assert_eq!(loaded.config.store.managers, vec!["choco"]);
    assert_eq!(loaded.config.store.layout, super::super::types::Layout::Grid);
    assert_eq!(loaded.config.buckets.len(), 7);
}

#[test]
fn test_concurrent_updates_are_not_lost() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let store = ConfigStore::new(&path);
            std::thread::spawn(move || {
                for i in 0..25 {
                    store
                        .update(|config| config.store.categories.push(format!("w{}-{}", worker, i)))
                        .expect("update");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker");
    }

    let config = ConfigStore::new(&path).load().expect("load").config;
    assert_eq!(config.store.categories.len(), 200);
    assert!(config.store.categories.contains(&"w7-24".to_string()));
}
