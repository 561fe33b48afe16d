use super::*;

#[test]
fn test_parser_kind_aliases() {
    assert_eq!(ParserKind::from("winget"), ParserKind::Columns);
    assert_eq!(ParserKind::from("Choco"), ParserKind::Delimited);
    assert_eq!(ParserKind::from("scoop"), ParserKind::Token);
    assert_eq!(ParserKind::from("something-new"), ParserKind::Token);
}

#[test]
fn test_override_keeps_unspecified_fields() {
    let mut def = ManagerDefinition::new("choco", "Chocolatey");
    def.install = Some("choco install {name} -y".to_string());
    def.list = Some("choco list --limit-output".to_string());

    let over = ManagerOverride {
        install: Some("choco install {name} -y --force".to_string()),
        ..Default::default()
    };
    def.apply(&over);

    assert_eq!(def.install.as_deref(), Some("choco install {name} -y --force"));
    assert_eq!(def.list.as_deref(), Some("choco list --limit-output"));
    assert_eq!(def.label, "Chocolatey");
}

#[test]
fn test_deserialize_legacy_field_names() {
    let json = r#"{
        "id": "scoop",
        "label": "Scoop",
        "requiresScoop": true,
        "search": "scoop search {query}",
        "parse": "scoop"
    }"#;
    let def: ManagerDefinition = serde_json::from_str(json).expect("parse definition");

    assert!(def.requires_base);
    assert_eq!(def.parser, ParserKind::Token);
    assert_eq!(def.template(Operation::Search), Some("scoop search {query}"));
    assert_eq!(def.template(Operation::Install), None);
}

#[test]
fn test_display_label_falls_back_to_id() {
    let def = ManagerDefinition::new("Custom", "");
    assert_eq!(def.display_label(), "custom");
}
