//! Static trees loaded from disk.
//!
//! The file holds an `items` array of descriptors (bare values or entries
//! with `name`, `value`, `short`, `children` and `open`) and an optional
//! `message`. The format follows the extension.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{PickerError, PickerResult};
use crate::tree::Descriptor;

#[derive(Debug, Clone, Deserialize)]
pub struct TreeFile {
    /// Overrides the configured question
    #[serde(default)]
    pub message: Option<String>,
    pub items: Vec<Descriptor>,
}

pub fn load_tree_file(path: &Path) -> PickerResult<TreeFile> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let content = fs::read_to_string(path)?;
    let invalid = |message: String| PickerError::InvalidTree {
        file: path.to_path_buf(),
        message,
    };

    let tree: TreeFile = match extension.as_deref() {
        Some("json") => serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?,
        Some("yaml") | Some("yml") => {
            serde_yaml_ng::from_str(&content).map_err(|e| invalid(e.to_string()))?
        }
        Some("toml") => toml::from_str(&content).map_err(|e| invalid(e.to_string()))?,
        _ => {
            return Err(PickerError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };

    tracing::debug!(path = %path.display(), items = tree.items.len(), "loaded tree file");
    Ok(tree)
}
