//! Command layer: loading record files and dispatching subcommands

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use treekit::cli::commands::{build_forest, execute_command, field_text, load_records, Record};
use treekit::cli::{Cli, CliError};
use treekit::config::Settings;
use treekit::exitcode;
use treekit::util::testing;

const STAFF: &str = r#"[
    {"name": "Amr", "age": 24, "boss": "Mezo"},
    {"name": "Zaher", "age": 25, "boss": "Mezo"},
    {"name": "Jebril", "age": 31, "boss": "Mezo"},
    {"name": "Doaa", "age": 37, "boss": "Hager"},
    {"name": "Hager", "age": 38, "boss": "Hany"},
    {"name": "Mezo", "age": 40, "boss": "Hany"},
    {"name": "Hany", "age": 41}
]"#;

struct Staff {
    _dir: TempDir,
    path: PathBuf,
}

#[fixture]
fn staff() -> Staff {
    testing::init_test_setup();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("staff.json");
    fs::write(&path, STAFF).unwrap();
    Staff { _dir: dir, path }
}

fn run(args: &[&str]) -> Result<(), CliError> {
    let cli = Cli::try_parse_from(args).unwrap();
    execute_command(&cli, &Settings::default())
}

// ============================================================
// Loading
// ============================================================

#[rstest]
fn given_staff_file_when_building_then_single_tree(staff: Staff) {
    let records = load_records(&staff.path).unwrap();
    let forest = build_forest(&records, &Settings::default()).unwrap();

    assert_eq!(forest.roots.len(), 1);
    let root = forest.trees().next().unwrap();
    assert_eq!(root.id(), "Hany");
    assert_eq!(root.size(), 7);
    assert_eq!(root.depth(), 3);

    let (_, doaa) = forest.lookup("Doaa").unwrap();
    let path: Vec<&str> = root.path_to_node(doaa).iter().map(|n| n.id()).collect();
    assert_eq!(path, vec!["Hany", "Hager", "Doaa"]);
}

#[rstest]
fn given_custom_fields_when_building_then_settings_drive_the_relation() {
    testing::init_test_setup();
    let records: Vec<Record> = serde_json::from_str(
        r#"[
            {"id": 1, "parent": null, "title": "CEO"},
            {"id": 2, "parent": 1, "title": "CTO"},
            {"id": 3, "parent": 2, "title": "Dev"}
        ]"#,
    )
    .unwrap();
    let settings = Settings {
        key_field: "id".into(),
        parent_field: "parent".into(),
        label_field: Some("title".into()),
        pretty_json: false,
    };

    let forest = build_forest(&records, &settings).unwrap();

    let root = forest.trees().next().unwrap();
    assert_eq!(root.depth(), 3);
    let (_, dev) = forest.lookup("3").unwrap();
    let dev = forest.forest.node(dev).unwrap();
    assert_eq!(field_text(dev.data(), settings.label_key()), "Dev");
}

#[rstest]
fn given_record_naming_itself_as_parent_when_building_then_cycle() {
    let records: Vec<Record> =
        serde_json::from_str(r#"[{"name": "Loop", "boss": "Loop"}]"#).unwrap();
    let result = build_forest(&records, &Settings::default());
    assert!(matches!(result, Err(CliError::Tree(_))));
}

#[rstest]
fn given_non_array_file_when_loading_then_invalid_input(staff: Staff) {
    fs::write(&staff.path, r#"{"name": "Hany"}"#).unwrap();
    let result = load_records(&staff.path);
    assert!(matches!(result, Err(CliError::InvalidInput(_))));
}

// ============================================================
// Dispatch
// ============================================================

#[rstest]
#[case::tree(&["tree"])]
#[case::leaves(&["leaves"])]
#[case::depth(&["depth"])]
#[case::size(&["size"])]
#[case::level(&["level", "1"])]
#[case::find(&["find", "Amr"])]
#[case::lca(&["lca", "Amr", "Doaa"])]
#[case::path(&["path", "Amr", "Doaa"])]
#[case::paths(&["paths"])]
#[case::json(&["json"])]
#[case::trim(&["trim"])]
fn given_staff_file_when_running_command_then_succeeds(staff: Staff, #[case] args: &[&str]) {
    let path = staff.path.to_str().unwrap();
    let mut argv = vec!["treekit", args[0], path];
    argv.extend_from_slice(&args[1..]);

    run(&argv).unwrap();
}

#[rstest]
fn given_unknown_key_when_find_then_usage_error(staff: Staff) {
    let path = staff.path.to_str().unwrap();
    let err = run(&["treekit", "find", path, "Nobody"]).unwrap_err();
    assert!(matches!(err, CliError::Usage(_)));
    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[rstest]
fn given_missing_file_when_running_then_io_error() {
    testing::init_test_setup();
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.json");

    let err = run(&["treekit", "tree", missing.to_str().unwrap()]).unwrap_err();

    assert!(matches!(err, CliError::Io { .. }));
    assert_eq!(err.exit_code(), exitcode::NOINPUT);
}

#[rstest]
fn given_config_show_when_running_then_succeeds() {
    run(&["treekit", "config", "show"]).unwrap();
}
