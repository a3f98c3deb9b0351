//! Loading tree input from JSON or TOML files
//!
//! JSON input is either a top-level array of items or an object with an
//! `items` array. TOML input always uses a top-level `items` array of tables.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt, ParseResultExt};
use crate::domain::{CheckTree, TreeDataItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Toml,
}

impl InputFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(InputFormat::Json),
            "toml" => Some(InputFormat::Toml),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonDocument {
    List(Vec<TreeDataItem>),
    Wrapped { items: Vec<TreeDataItem> },
}

#[derive(Deserialize)]
struct TomlDocument {
    #[serde(default)]
    items: Vec<TreeDataItem>,
}

/// Parse items from a string in the given format.
///
/// `origin` is only used in error messages.
pub fn parse_items(
    content: &str,
    format: InputFormat,
    origin: &Path,
) -> ApplicationResult<Vec<TreeDataItem>> {
    match format {
        InputFormat::Json => {
            match serde_json::from_str::<JsonDocument>(content).with_input_context(origin)? {
                JsonDocument::List(items) | JsonDocument::Wrapped { items } => Ok(items),
            }
        }
        InputFormat::Toml => toml::from_str::<TomlDocument>(content)
            .map(|doc| doc.items)
            .with_input_context(origin),
    }
}

/// Read and parse an input file; the format follows the extension.
#[instrument(level = "debug")]
pub fn load_items(path: &Path) -> ApplicationResult<Vec<TreeDataItem>> {
    let format = InputFormat::from_path(path).ok_or_else(|| ApplicationError::InvalidInput {
        path: path.to_path_buf(),
        message: "unsupported extension, expected .json or .toml".to_string(),
    })?;
    let content = std::fs::read_to_string(path).with_path_context("read tree input", path)?;
    let items = parse_items(&content, format, path)?;
    debug!("loaded {} top-level items from {}", items.len(), path.display());
    Ok(items)
}

/// Load an input file straight into a tree.
pub fn load_tree(path: &Path) -> ApplicationResult<CheckTree> {
    Ok(CheckTree::new(load_items(path)?))
}
