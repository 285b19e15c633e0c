use std::path::PathBuf;

use clap::Parser;
use treepick::{ColorMode, PromptConfig};

/// Treepick - pick a path from a directory or a tree file
#[derive(Parser, Debug)]
#[command(name = "treepick")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "The answer is printed to stdout as JSON; the prompt is drawn on stderr.")]
pub struct Cli {
    /// Directory to browse (defaults to the current directory)
    pub dir: Option<PathBuf>,

    /// Pick from a static tree file (.json, .yaml, .yml or .toml)
    #[arg(long, conflicts_with = "dir")]
    pub tree: Option<PathBuf>,

    /// Select several items with space, submit with enter
    #[arg(short, long)]
    pub multiple: bool,

    /// Number of lines shown before paginating
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Stop the cursor at the ends of the list
    #[arg(long)]
    pub no_loop: bool,

    /// Drop invalid leaves from the tree
    #[arg(long)]
    pub only_valid: bool,

    /// Show valid nodes as leaves
    #[arg(long)]
    pub hide_children_of_valid: bool,

    /// List directories only
    #[arg(long)]
    pub dirs_only: bool,

    /// Allow picking dotfiles
    #[arg(long)]
    pub allow_hidden: bool,

    /// Question shown above the tree
    #[arg(long)]
    pub message: Option<String>,

    /// Config file (defaults to the user config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Color output: auto, always or never
    #[arg(long, value_parser = parse_color)]
    pub color: Option<ColorMode>,

    /// Write debug logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Layer command line flags over the loaded configuration
    pub fn apply(&self, mut config: PromptConfig) -> PromptConfig {
        if self.multiple {
            config.multiple = true;
        }
        if let Some(page_size) = self.page_size.filter(|&n| n > 0) {
            config.page_size = page_size;
        }
        if self.no_loop {
            config.looping = false;
        }
        if self.only_valid {
            config.only_show_valid = true;
        }
        if self.hide_children_of_valid {
            config.hide_children_of_valid = true;
        }
        if let Some(message) = &self.message {
            config.message = message.clone();
        }
        if let Some(color) = self.color {
            config.output.color = color;
        }
        config
    }
}

fn parse_color(s: &str) -> Result<ColorMode, String> {
    ColorMode::parse(s).ok_or_else(|| format!("invalid color mode '{s}' (expected auto, always or never)"))
}
