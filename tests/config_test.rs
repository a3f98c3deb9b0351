//! Integration tests for Settings config loading.
//!
//! These tests run without a global config (temp directories only),
//! so they effectively test local config merging with defaults.

use std::fs;

use tempfile::TempDir;

use checktree::application::ApplicationError;
use checktree::config::{local_config_path, Settings};

#[test]
fn given_no_local_config_when_loading_then_uses_defaults() {
    let dir = TempDir::new().unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.markers.checked, "[x]");
    assert_eq!(settings.label_field, "title");
}

#[test]
fn given_local_config_when_loading_then_overrides_specified_fields() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        r#"
indent = 4
label_field = "name"

[markers]
checked = "(*)"
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.indent, 4);
    assert_eq!(settings.label_field, "name");
    assert_eq!(settings.markers.checked, "(*)");
    assert_eq!(settings.markers.unchecked, "[ ]");
}

#[test]
fn given_malformed_local_config_when_loading_then_reports_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "indent = [not toml").unwrap();

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains(".checktree.toml"));
}
