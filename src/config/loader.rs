//! Configuration loading

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PickerError, PickerResult};

use super::types::{ColorMode, PromptConfig};

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{suggestion}'?)")?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> PickerResult<(PromptConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: PromptConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| PickerError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load the explicit config file if given, else the user config, else defaults.
/// Environment overrides are applied on top.
///
/// An explicit file that fails to parse is an error; so is a broken user
/// config, since silently ignoring it hides typos.
pub fn load_or_default(explicit: Option<&Path>) -> PickerResult<(PromptConfig, Vec<ConfigWarning>)> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => user_config_path().filter(|p| p.exists()),
    };

    let (config, warnings) = match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            load_with_warnings(&path)?
        }
        None => (PromptConfig::default(), Vec::new()),
    };

    Ok((with_env_overrides(config), warnings))
}

/// `<config dir>/treepick/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("treepick").join("config.toml"))
}

/// Apply environment variable overrides (TREEPICK_* prefix)
pub fn with_env_overrides(config: PromptConfig) -> PromptConfig {
    with_env_overrides_from(config, |key| std::env::var(key).ok())
}

pub(super) fn with_env_overrides_from(
    mut config: PromptConfig,
    get_env: impl Fn(&str) -> Option<String>,
) -> PromptConfig {
    // TREEPICK_MULTIPLE
    if let Some(val) = get_env("TREEPICK_MULTIPLE") {
        config.multiple = parse_flag(&val);
    }

    // TREEPICK_LOOP
    if let Some(val) = get_env("TREEPICK_LOOP") {
        config.looping = parse_flag(&val);
    }

    // TREEPICK_PAGE_SIZE
    if let Some(val) = get_env("TREEPICK_PAGE_SIZE") {
        match val.trim().parse::<usize>() {
            Ok(size) if size > 0 => config.page_size = size,
            _ => tracing::warn!(value = %val, "ignoring invalid TREEPICK_PAGE_SIZE"),
        }
    }

    // TREEPICK_COLOR
    if let Some(val) = get_env("TREEPICK_COLOR") {
        match ColorMode::parse(&val) {
            Some(mode) => config.output.color = mode,
            None => tracing::warn!(value = %val, "ignoring invalid TREEPICK_COLOR"),
        }
    }

    config
}

fn parse_flag(val: &str) -> bool {
    let val = val.trim().to_lowercase();
    val != "false" && val != "0" && val != "no"
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "message",
        "multiple",
        "page_size",
        "loop",
        "root_directory",
        "only_show_valid",
        "hide_children_of_valid",
        "output",
        "color",
        "unicode",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
