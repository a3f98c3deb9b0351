//! Environment layer of Settings loading.
//!
//! Kept in its own test binary: it mutates process environment variables,
//! which would race with the file-based config tests.

use std::env;

use tempfile::TempDir;

use checktree::config::Settings;

#[test]
fn given_checktree_env_vars_when_loading_then_overrides_top_level_and_nested_fields() {
    let dir = TempDir::new().unwrap();
    env::set_var("CHECKTREE_INDENT", "7");
    env::set_var("CHECKTREE_MARKERS__CHECKED", "(*)");
    env::set_var("CHECKTREE_LABEL_FIELD", "name");

    let settings = Settings::load(Some(dir.path()));

    env::remove_var("CHECKTREE_INDENT");
    env::remove_var("CHECKTREE_MARKERS__CHECKED");
    env::remove_var("CHECKTREE_LABEL_FIELD");

    let settings = settings.expect("load settings");
    assert_eq!(settings.indent, 7);
    assert_eq!(settings.markers.checked, "(*)");
    assert_eq!(settings.label_field, "name");
    assert_eq!(settings.markers.unchecked, "[ ]");
}
