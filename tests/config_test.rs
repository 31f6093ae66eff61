//! Integration tests for Settings config loading.
//!
//! Environment overrides live in `config_env_test.rs`; env vars are process
//! wide and would leak into the tests here.

use std::fs;

use tempfile::TempDir;

use treekit::config::{global_config_path, Settings};

// ============================================================
// Settings::load() with an explicit file
// ============================================================

#[test]
fn given_explicit_config_file_when_load_then_values_override_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("treekit.toml");
    fs::write(
        &path,
        r#"
key_field = "id"
parent_field = "manager_id"
label_field = "title"
pretty_json = false
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.key_field, "id");
    assert_eq!(settings.parent_field, "manager_id");
    assert_eq!(settings.label_key(), "title");
    assert!(!settings.pretty_json);
}

#[test]
fn given_missing_config_file_when_load_then_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does-not-exist.toml");

    let result = Settings::load(Some(&path));

    assert!(result.is_err());
}

#[test]
fn given_invalid_toml_when_load_then_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "key_field = [unclosed").unwrap();

    assert!(Settings::load(Some(&path)).is_err());
}

#[test]
fn given_wrong_type_when_load_then_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("typed.toml");
    fs::write(&path, "pretty_json = \"sometimes\"\n").unwrap();

    assert!(Settings::load(Some(&path)).is_err());
}

#[test]
fn given_settings_when_serialized_to_toml_then_loads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roundtrip.toml");
    let settings = Settings {
        key_field: "key".into(),
        parent_field: "parent".into(),
        label_field: Some("label".into()),
        pretty_json: false,
    };
    fs::write(&path, toml::to_string(&settings).unwrap()).unwrap();

    let loaded = Settings::load(Some(&path)).unwrap();

    assert_eq!(loaded, settings);
}

#[test]
fn given_platform_dirs_then_global_config_named_after_crate() {
    if let Some(path) = global_config_path() {
        assert!(path.ends_with("treekit.toml"));
    }
}
