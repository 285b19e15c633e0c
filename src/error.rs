//! Error types for treepick
//!
//! Uses `thiserror` for library errors. Resolver failures never surface here:
//! they are swallowed by the loader and the branch is shown as empty.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for picker operations
pub type PickerResult<T> = Result<T, PickerError>;

/// Main error type for picker operations
#[derive(Error, Debug)]
pub enum PickerError {
    /// IO error (terminal or file access)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The user aborted the prompt (Ctrl-C / Esc)
    #[error("prompt cancelled by user")]
    Cancelled,

    /// The intent source ran dry before an answer was submitted
    #[error("input closed before an answer was submitted")]
    InputClosed,

    /// Config file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Tree file could not be parsed
    #[error("invalid tree file {file}: {message}")]
    InvalidTree { file: PathBuf, message: String },

    /// Tree file extension is not one of json/yaml/yml/toml
    #[error("unsupported tree file format: {path} (expected .json, .yaml, .yml or .toml)")]
    UnsupportedFormat { path: PathBuf },

    /// Nothing to pick from
    #[error("the tree has no items to choose from")]
    EmptyTree,
}
