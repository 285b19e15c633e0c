//! Ready-made trees for the command line
//!
//! - `fs` - lazily listed directories
//! - `file` - static trees read from JSON, YAML or TOML

pub mod file;
pub mod fs;

pub use file::{load_tree_file, TreeFile};
pub use fs::{directory_lister, is_dotfile, ListerOptions};
