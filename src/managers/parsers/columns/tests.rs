use super::*;
use crate::managers::parsers::split_lines;

#[test]
fn test_winget_search_fixture() {
    let output = "\
The `msstore` source requires that you view the following agreements before using.
Terms of Transaction: https://aka.ms/microsoft-store-terms-of-transaction
Name                Id                          Version   Source
-------------------------------------------------------------------
Visual Studio Code  Microsoft.VisualStudioCode  1.85.1    winget
VSCodium            VSCodium.VSCodium           1.85.1.2  winget
Installed           Something.Else              1.0       winget
";
    let rows = parse_columns(&split_lines(output));

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Visual Studio Code");
    assert_eq!(rows[0].id.as_deref(), Some("Microsoft.VisualStudioCode"));
    assert_eq!(rows[1].id.as_deref(), Some("VSCodium.VSCodium"));
}

#[test]
fn test_single_column_lines_dropped() {
    let lines = vec!["-", "\\", "No package found matching input criteria.", "2 upgrades available."];
    assert!(parse_columns(&lines).is_empty());
}

#[test]
fn test_single_spaces_stay_inside_a_column() {
    let lines = vec!["Microsoft Edge  Microsoft.Edge  120.0"];
    let rows = parse_columns(&lines);
    assert_eq!(rows[0].name, "Microsoft Edge");
    assert_eq!(rows[0].id.as_deref(), Some("Microsoft.Edge"));
}

#[test]
fn test_localized_rows_filtered() {
    let lines = vec![
        "名称  ID  版本",
        "已安装  Foo.Bar  1.0",
        "此源要求你所在的地理区域  msstore",
        "Git  Git.Git  2.43.0",
    ];
    let rows = parse_columns(&lines);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Git");
}
