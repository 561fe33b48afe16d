use super::*;
use crate::managers::parsers::split_lines;

#[test]
fn test_scoop_search_fixture() {
    let output = "\
Results from local buckets...

Name     Version  Source Binaries
----     -------  ------ --------
ripgrep  14.1.0   main
ripgrep-all 0.10.6 extras
";
    let rows = parse_tokens(&split_lines(output));
    assert_eq!(
        rows,
        vec![ParsedRow::named("ripgrep"), ParsedRow::named("ripgrep-all")]
    );
}

#[test]
fn test_noise_rows_filtered_two_real_rows_kept() {
    let output = "\
Installed apps:
Name Version Source Updated Info
---- ------- ------ ------- ----
WARN  'git' (2.43.0) is already installed.
git 2.43.0 main 2024-01-10 12:00:00
7zip 23.01 main 2024-01-09 08:00:00
";
    let rows = parse_tokens(&split_lines(output));
    assert_eq!(rows, vec![ParsedRow::named("git"), ParsedRow::named("7zip")]);
}

#[test]
fn test_already_installed_without_prefix() {
    let lines = vec!["'fd' (9.0.0) is already installed.", "fd 9.0.0 main"];
    let rows = parse_tokens(&lines);
    assert_eq!(rows, vec![ParsedRow::named("fd")]);
}

#[test]
fn test_status_footer_ignored() {
    let lines = vec!["Scoop is up to date.", "Everything is ok!"];
    assert!(parse_tokens(&lines).is_empty());
}

#[test]
fn test_names_starting_with_marker_words_survive() {
    let lines = vec!["NameChanger 1.0 extras", "Installer-tool 2.0 extras"];
    let rows = parse_tokens(&lines);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "NameChanger");
}
