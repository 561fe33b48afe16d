use super::*;
use crate::managers::config::Operation;

fn over(id: &str) -> ManagerOverride {
    ManagerOverride {
        id: Some(id.to_string()),
        ..Default::default()
    }
}

#[test]
fn test_builtins_are_registered_in_order() {
    let registry = ManagerRegistry::with_builtins(&[]);
    assert_eq!(registry.ids(), vec!["scoop", "winget", "choco"]);
    assert!(registry.base_manager().expect("base").requires_base);
}

#[test]
fn test_override_merges_case_insensitively() {
    let overrides = vec![ManagerOverride {
        label: Some("WinGet (mirror)".to_string()),
        ..over("WINGET")
    }];
    let registry = ManagerRegistry::with_builtins(&overrides);

    let winget = registry.resolve("winget").expect("winget");
    assert_eq!(winget.label, "WinGet (mirror)");
    assert_eq!(
        winget.template(Operation::List),
        Some("winget list --accept-source-agreements")
    );
    assert_eq!(registry.len(), 3);
}

#[test]
fn test_unknown_override_is_appended_and_idless_skipped() {
    let overrides = vec![
        ManagerOverride {
            search: Some("npm search {query} --parseable".to_string()),
            parser: Some(ParserKind::Delimited),
            ..over("npm")
        },
        ManagerOverride {
            label: Some("nameless".to_string()),
            ..Default::default()
        },
    ];
    let registry = ManagerRegistry::with_builtins(&overrides);

    assert_eq!(registry.ids(), vec!["scoop", "winget", "choco", "npm"]);
    let npm = registry.resolve("NPM").expect("npm");
    assert_eq!(npm.parser, ParserKind::Delimited);
    assert_eq!(npm.template(Operation::Install), None);
}

#[test]
fn test_active_set_normalizes_and_filters() {
    let registry = ManagerRegistry::with_builtins(&[]);
    let active = registry.active_set(&["Winget", "apt", "winget", "CHOCO"]);
    assert_eq!(active, vec!["winget", "choco"]);
}

#[test]
fn test_active_set_falls_back_to_first() {
    let registry = ManagerRegistry::with_builtins(&[]);
    let empty: [&str; 0] = [];
    assert_eq!(registry.active_set(&empty), vec!["scoop"]);
    assert_eq!(registry.active_set(&["nope"]), vec!["scoop"]);
}

#[test]
fn test_active_set_is_non_empty_subset() {
    let registry = ManagerRegistry::with_builtins(&[over("pip")]);
    let requests: Vec<Vec<&str>> = vec![
        vec![],
        vec!["PIP"],
        vec!["x", "y"],
        vec!["choco", "scoop", "pip", "choco"],
    ];
    let registered = registry.ids();

    for request in requests {
        let active = registry.active_set(&request);
        assert!(!active.is_empty());
        assert!(active.iter().all(|id| registered.contains(id)));
    }
}

#[test]
fn test_active_set_empty_registry() {
    let registry = ManagerRegistry::register(Vec::new(), &[]);
    assert!(registry.active_set(&["scoop"]).is_empty());
}

#[test]
fn test_manager_for_prefers_item_manager() {
    let registry = ManagerRegistry::with_builtins(&[]);
    let active = vec!["scoop".to_string()];

    let target = PackageTarget::new("Git").with_manager("winget");
    assert_eq!(registry.manager_for(&target, &active).expect("m").id, "winget");

    let unknown = PackageTarget::new("git").with_manager("apt");
    assert_eq!(registry.manager_for(&unknown, &active).expect("m").id, "scoop");

    let bare = PackageTarget::new("git");
    let active = vec!["choco".to_string()];
    assert_eq!(registry.manager_for(&bare, &active).expect("m").id, "choco");
}
