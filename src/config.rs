//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/checktree/checktree.toml`
//! 3. Local config: `<dir>/.checktree.toml` (usually the working directory)
//! 4. Environment variables: `CHECKTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// Row markers used when rendering the flattened view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Markers {
    pub checked: String,
    pub unchecked: String,
    pub indeterminate: String,
    /// Toggle shown for an expanded node with children
    pub expanded: String,
    /// Toggle shown for a collapsed node with children
    pub collapsed: String,
    /// Toggle placeholder for nodes without children
    pub leaf: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            checked: "[x]".into(),
            unchecked: "[ ]".into(),
            indeterminate: "[-]".into(),
            expanded: "▾".into(),
            collapsed: "▸".into(),
            leaf: " ".into(),
        }
    }
}

/// Raw markers for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawMarkers {
    pub checked: Option<String>,
    pub unchecked: Option<String>,
    pub indeterminate: Option<String>,
    pub expanded: Option<String>,
    pub collapsed: Option<String>,
    pub leaf: Option<String>,
}

impl Markers {
    /// Overlay wins per field if specified.
    pub fn merge(&self, overlay: &RawMarkers) -> Self {
        let pick = |o: &Option<String>, base: &String| o.clone().unwrap_or_else(|| base.clone());
        Self {
            checked: pick(&overlay.checked, &self.checked),
            unchecked: pick(&overlay.unchecked, &self.unchecked),
            indeterminate: pick(&overlay.indeterminate, &self.indeterminate),
            expanded: pick(&overlay.expanded, &self.expanded),
            collapsed: pick(&overlay.collapsed, &self.collapsed),
            leaf: pick(&overlay.leaf, &self.leaf),
        }
    }
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub indent: Option<usize>,
    pub color: Option<bool>,
    pub show_keys: Option<bool>,
    pub label_field: Option<String>,
    pub markers: RawMarkers,
}

/// Unified configuration for checktree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Spaces per depth level (default: 2)
    pub indent: usize,
    /// Colorize markers (default: true, NO_COLOR still applies)
    pub color: bool,
    /// Append each row's fingerprint token (default: false)
    pub show_keys: bool,
    /// Payload field used as row label, falls back to the id (default: "title")
    pub label_field: String,
    pub markers: Markers,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            indent: 2,
            color: true,
            show_keys: false,
            label_field: "title".into(),
            markers: Markers::default(),
        }
    }
}

/// Get the XDG config directory for checktree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "checktree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("checktree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".checktree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins for every field it specifies.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            indent: overlay.indent.unwrap_or(self.indent),
            color: overlay.color.unwrap_or(self.color),
            show_keys: overlay.show_keys.unwrap_or(self.show_keys),
            label_field: overlay
                .label_field
                .clone()
                .unwrap_or_else(|| self.label_field.clone()),
            markers: self.markers.merge(&overlay.markers),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.checktree.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/checktree/checktree.toml`
    /// 3. Local config: `<local_dir>/.checktree.toml`
    /// 4. Environment variables: `CHECKTREE_*` prefix
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("local config: {}", local_path.display());
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply CHECKTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let builder = Config::builder().add_source(
            Environment::with_prefix("CHECKTREE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get::<usize>("indent") {
            settings.indent = val;
        }
        if let Ok(val) = config.get_bool("color") {
            settings.color = val;
        }
        if let Ok(val) = config.get_bool("show_keys") {
            settings.show_keys = val;
        }
        if let Ok(val) = config.get_string("label_field") {
            settings.label_field = val;
        }
        if let Ok(val) = config.get_string("markers.checked") {
            settings.markers.checked = val;
        }
        if let Ok(val) = config.get_string("markers.unchecked") {
            settings.markers.unchecked = val;
        }
        if let Ok(val) = config.get_string("markers.indeterminate") {
            settings.markers.indeterminate = val;
        }
        if let Ok(val) = config.get_string("markers.expanded") {
            settings.markers.expanded = val;
        }
        if let Ok(val) = config.get_string("markers.collapsed") {
            settings.markers.collapsed = val;
        }
        if let Ok(val) = config.get_string("markers.leaf") {
            settings.markers.leaf = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# checktree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/checktree/checktree.toml
#   Local:  ./.checktree.toml
#   Env:    CHECKTREE_* environment variables (e.g. CHECKTREE_INDENT=4,
#           CHECKTREE_MARKERS__CHECKED="[*]")

# Spaces per depth level
# indent = 2

# Colorize markers (NO_COLOR is respected regardless)
# color = true

# Append each row's fingerprint token
# show_keys = false

# Payload field used as the row label (falls back to the node id)
# label_field = "title"

[markers]
# checked = "[x]"
# unchecked = "[ ]"
# indeterminate = "[-]"
# expanded = "▾"
# collapsed = "▸"
# leaf = " "
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_settings_when_created_then_has_expected_markers() {
        let settings = Settings::default();
        assert_eq!(settings.indent, 2);
        assert_eq!(settings.markers.checked, "[x]");
        assert_eq!(settings.markers.indeterminate, "[-]");
        assert_eq!(settings.label_field, "title");
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_fields() {
        let base = Settings::default();
        let overlay: RawSettings = toml::from_str(
            r#"
indent = 4
[markers]
checked = "[*]"
"#,
        )
        .unwrap();

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.indent, 4);
        assert_eq!(merged.markers.checked, "[*]");
        assert_eq!(merged.markers.unchecked, "[ ]");
        assert_eq!(merged.label_field, "title");
        assert!(merged.color);
    }

    #[test]
    fn given_settings_when_serializing_then_roundtrips_through_toml() {
        let settings = Settings::default();
        let text = settings.to_toml().unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn given_template_when_parsing_then_yields_defaults() {
        let parsed: Settings = toml::from_str(&Settings::template()).unwrap();
        assert_eq!(parsed, Settings::default());
    }
}
