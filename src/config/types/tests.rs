use super::*;
use serde_json::json;

#[test]
fn test_default_config_has_default_buckets_and_scoop() {
    let config = AppConfig::default();
    assert_eq!(config.buckets.len(), 7);
    assert_eq!(config.requested_managers(), vec!["scoop"]);
    assert!(config.advanced.is_none());
}

#[test]
fn test_from_value_replaces_malformed_fields_only() {
    let value = json!({
        "buckets": "not-an-array",
        "managers": [{ "id": "winget", "label": "WinGet" }],
        "store": { "managers": ["winget", "choco"], "categories": 5 }
    });
    let config = AppConfig::from_value(&value);

    assert_eq!(config.buckets, default_buckets());
    assert_eq!(config.managers.len(), 1);
    assert_eq!(config.store.managers, vec!["winget", "choco"]);
    assert!(config.store.categories.is_empty());
}

#[test]
fn test_from_value_non_object_is_default() {
    assert_eq!(AppConfig::from_value(&json!([1, 2])), AppConfig::default());
}

#[test]
fn test_legacy_single_manager() {
    let value = json!({ "store": { "manager": "choco", "managers": [] } });
    let config = AppConfig::from_value(&value);
    assert_eq!(config.requested_managers(), vec!["choco"]);
}

#[test]
fn test_storage_root_round_trips_in_camel_case() {
    let config = AppConfig {
        storage_root: Some(PathBuf::from("D:/scoop")),
        ..Default::default()
    };
    let value = serde_json::to_value(&config).expect("serialize");
    assert_eq!(value["storageRoot"], json!("D:/scoop"));
    assert_eq!(AppConfig::from_value(&value), config);
}

#[test]
fn test_upsert_bucket_replaces_url() {
    let mut config = AppConfig::default();
    config.upsert_bucket(Bucket::new("extras", Some("https://example.com/extras".to_string())));
    config.upsert_bucket(Bucket::named("dorado"));

    assert_eq!(config.buckets.len(), 8);
    let extras = config.buckets.iter().find(|b| b.name == "extras").expect("extras");
    assert_eq!(extras.url.as_deref(), Some("https://example.com/extras"));

    config.remove_bucket("dorado");
    assert_eq!(config.buckets.len(), 7);
}
