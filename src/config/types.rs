//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PickerResult;
use crate::tree::LoaderPolicy;

use super::loader::{self, ConfigWarning};

/// Prompt options, as read from `config.toml` and adjusted by env and CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Question printed above the tree
    #[serde(default = "default_message")]
    pub message: String,

    /// Multi-select: space toggles, enter submits the whole selection
    #[serde(default)]
    pub multiple: bool,

    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Cursor wraps around at either end
    #[serde(default = "default_true", rename = "loop")]
    pub looping: bool,

    /// Prefix for auto-focus path comparison during search
    #[serde(default)]
    pub root_directory: Option<PathBuf>,

    #[serde(default)]
    pub only_show_valid: bool,

    #[serde(default)]
    pub hide_children_of_valid: bool,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            message: default_message(),
            multiple: false,
            page_size: default_page_size(),
            looping: true,
            root_directory: None,
            only_show_valid: false,
            hide_children_of_valid: false,
            output: OutputConfig::default(),
        }
    }
}

impl PromptConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> PickerResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> PickerResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Apply environment variable overrides (TREEPICK_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    pub fn loader_policy(&self) -> LoaderPolicy {
        LoaderPolicy {
            only_show_valid: self.only_show_valid,
            hide_children_of_valid: self.hide_children_of_valid,
        }
    }

    /// Root directory as a string for path comparison
    pub fn root_directory_str(&self) -> Option<String> {
        self.root_directory
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned())
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            unicode: true,
        }
    }
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

fn default_message() -> String {
    "Choose an item:".to_string()
}

fn default_page_size() -> usize {
    1000
}

fn default_true() -> bool {
    true
}
