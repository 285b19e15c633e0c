//! Directory trees resolved on demand.
//!
//! Every directory is a branch whose children are listed the first time it is
//! opened. Names are entry names; values are absolute paths, with a trailing
//! separator on directories.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;

use crate::labels::PATH_SEPARATOR;
use crate::tree::{Descriptor, Resolved, Resolver};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListerOptions {
    /// Skip regular files
    pub directories_only: bool,
}

/// Resolver listing `dir`; pass an absolute path to get absolute values.
pub fn directory_lister(dir: impl Into<PathBuf>, options: ListerOptions) -> Arc<dyn Resolver> {
    Arc::new(DirectoryLister {
        dir: dir.into(),
        options,
    })
}

/// True when the last path segment of a string value starts with a dot
pub fn is_dotfile(value: &Value) -> bool {
    let Some(path) = value.as_str() else {
        return false;
    };
    path.trim_end_matches(PATH_SEPARATOR)
        .rsplit(PATH_SEPARATOR)
        .next()
        .is_some_and(|name| name.starts_with('.'))
}

struct DirectoryLister {
    dir: PathBuf,
    options: ListerOptions,
}

#[async_trait]
impl Resolver for DirectoryLister {
    async fn resolve(&self) -> anyhow::Result<Resolved> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .with_context(|| format!("Failed to list {}", self.dir.display()))?;

        let mut listed: Vec<(String, Descriptor)> = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_dir = is_directory(&path).await;
            if self.options.directories_only && !is_dir {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            let mut value = path.to_string_lossy().into_owned();
            let descriptor = if is_dir {
                value.push(PATH_SEPARATOR);
                Descriptor::named(name.clone(), value).with_resolver(directory_lister(path, self.options))
            } else {
                Descriptor::named(name.clone(), value)
            };
            listed.push((name, descriptor));
        }
        listed.sort_by(|a, b| a.0.cmp(&b.0));

        tracing::trace!(dir = %self.dir.display(), entries = listed.len(), "listed directory");
        Ok(Resolved::Children(listed.into_iter().map(|(_, d)| d).collect()))
    }
}

/// Follows symlinks; broken links count as files.
async fn is_directory(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}
