use super::*;

#[test]
fn test_key_prefers_id() {
    let winget = PackageRecord::new("Git", Some("Git.Git".to_string()), "winget");
    let scoop = PackageRecord::new("git", None, "scoop");
    assert_eq!(winget.key(), "winget:Git.Git");
    assert_eq!(scoop.key(), "scoop:git");
}

#[test]
fn test_target_matches_by_name_or_id() {
    let record = PackageRecord::new("Visual Studio Code", Some("Microsoft.VisualStudioCode".to_string()), "winget");

    assert!(PackageTarget::new("Visual Studio Code").matches(&record));
    assert!(
        PackageTarget::new("vscode")
            .with_id("Microsoft.VisualStudioCode")
            .matches(&record)
    );
    assert!(!PackageTarget::new("vscode").matches(&record));
}

#[test]
fn test_target_manager_must_agree() {
    let record = PackageRecord::new("git", None, "scoop");
    assert!(PackageTarget::new("git").matches(&record));
    assert!(PackageTarget::new("git").with_manager("scoop").matches(&record));
    assert!(!PackageTarget::new("git").with_manager("choco").matches(&record));
}

#[test]
fn test_target_from_record_keeps_routing() {
    let record = PackageRecord::new("7zip", None, "choco");
    let target = PackageTarget::from(&record);
    assert_eq!(target.manager.as_deref(), Some("choco"));
    assert_eq!(target.identifier(), "7zip");
}

#[test]
fn test_bucket_name_validation() {
    assert!(Bucket::is_valid_name("extras"));
    assert!(!Bucket::is_valid_name("  "));
    assert!(!Bucket::is_valid_name("Name"));
    assert!(!Bucket::is_valid_name("----"));
}

#[test]
fn test_bucket_empty_url_is_none() {
    assert_eq!(Bucket::new("extras", Some(" ".to_string())).url, None);
}

#[test]
fn test_default_buckets_start_with_main() {
    let buckets = default_buckets();
    assert_eq!(buckets.len(), 7);
    assert_eq!(buckets[0].name, "main");
}
