use super::*;

#[test]
fn data_dir_uses_expected_name() {
    let path = data_dir().expect("data_dir should resolve");
    assert_eq!(
        path.file_name().and_then(|f| f.to_str()),
        Some(project_identity::DATA_DIR_NAME)
    );
}

#[test]
fn expand_home_leaves_absolute_paths() {
    let path = Path::new("/opt/scoop");
    assert_eq!(expand_home(path).expect("expand"), PathBuf::from("/opt/scoop"));
}

#[test]
fn expand_home_resolves_tilde() {
    let expanded = expand_home(Path::new("~/apps")).expect("expand");
    assert!(expanded.ends_with("apps"));
    assert!(!expanded.to_string_lossy().starts_with('~'));
}

#[test]
fn log_file_sits_next_to_config() {
    let log = log_file_for(Path::new("/tmp/desk/config.json"));
    assert_eq!(log, PathBuf::from("/tmp/desk").join(project_identity::LOG_FILE_BASENAME));
}
