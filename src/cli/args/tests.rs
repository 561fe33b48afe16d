use super::*;
use crate::project_identity;
use clap::CommandFactory;

#[test]
fn parser_accepts_install_with_id_and_manager() {
    let parsed = Cli::try_parse_from([
        project_identity::BINARY_NAME,
        "install",
        "Visual Studio Code",
        "--id",
        "Microsoft.VisualStudioCode",
        "-m",
        "winget",
    ])
    .expect("install should parse");

    match parsed.command {
        Some(Command::Install(pkg)) => {
            assert_eq!(pkg.name, "Visual Studio Code");
            assert_eq!(pkg.id.as_deref(), Some("Microsoft.VisualStudioCode"));
            assert_eq!(pkg.manager.as_deref(), Some("winget"));
        }
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn parser_allows_global_flags_after_subcommand() {
    let parsed = Cli::try_parse_from([
        project_identity::BINARY_NAME,
        "status",
        "--config",
        "/tmp/desk.json",
        "-q",
    ])
    .expect("status should parse");
    assert!(parsed.global.quiet);
    assert_eq!(parsed.global.config, Some(PathBuf::from("/tmp/desk.json")));
}

#[test]
fn parser_collects_repeated_search_filters() {
    let parsed = Cli::try_parse_from([
        project_identity::BINARY_NAME,
        "search",
        "git",
        "-m",
        "scoop",
        "-m",
        "winget",
        "-c",
        "dev",
    ])
    .expect("search should parse");
    match parsed.command {
        Some(Command::Search {
            managers,
            categories,
            ..
        }) => {
            assert_eq!(managers, vec!["scoop", "winget"]);
            assert_eq!(categories, vec!["dev"]);
        }
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn parser_rejects_plan_without_subcommand() {
    assert!(Cli::try_parse_from([project_identity::BINARY_NAME, "plan"]).is_err());
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}
