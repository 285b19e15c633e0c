//! Configuration module
//!
//! Precedence, highest first:
//! 1. CLI flags
//! 2. Environment variables (TREEPICK_*)
//! 3. `--config <file>`
//! 4. User config (`<config dir>/treepick/config.toml`)
//! 5. Built-in defaults

mod loader;
mod types;

pub use loader::{load_or_default, load_with_warnings, user_config_path, with_env_overrides, ConfigWarning};
pub use types::{ColorMode, OutputConfig, PromptConfig};
