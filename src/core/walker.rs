//! Page-dump discovery for batch runs.
//!
//! Walks a directory tree and keeps files matching the include globs,
//! skipping excluded trees, hidden directories and oversized files.
//! Unreadable entries are logged and skipped.

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::core::config::IndexingConfig;
use crate::core::error::{ReadorderError, Result};

pub struct SourceWalker {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
    max_file_size_bytes: u64,
}

fn compile(patterns: &[String], kind: &str) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| {
                ReadorderError::ConfigError(format!("Invalid {kind} pattern '{p}': {e}"))
            })
        })
        .collect()
}

impl SourceWalker {
    pub fn new(include: &[String], exclude: &[String], max_file_size_mb: usize) -> Result<Self> {
        Ok(Self {
            include: compile(include, "include")?,
            exclude: compile(exclude, "exclude")?,
            max_file_size_bytes: (max_file_size_mb as u64) * 1024 * 1024,
        })
    }

    pub fn from_config(config: &IndexingConfig) -> Result<Self> {
        Self::new(
            &config.include_patterns,
            &config.exclude_patterns,
            config.max_file_size_mb,
        )
    }

    /// Matching files under `root` in path order. A `root` that is
    /// itself a file is returned as-is.
    pub fn collect(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if root.is_file() {
            return Ok(vec![root.to_path_buf()]);
        }
        if !root.is_dir() {
            return Err(ReadorderError::InvalidPath(format!(
                "Not a file or directory: {}",
                root.display()
            )));
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| self.descend(e, root));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Walk error: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if let Ok(metadata) = entry.metadata() {
                if metadata.len() > self.max_file_size_bytes {
                    tracing::debug!("Skipping large file: {:?} ({} bytes)", path, metadata.len());
                    continue;
                }
            }
            if self.selects(path) {
                files.push(path.to_path_buf());
            }
        }

        tracing::debug!("Collected {} file(s) under {:?}", files.len(), root);
        Ok(files)
    }

    fn descend(&self, entry: &DirEntry, root: &Path) -> bool {
        let path = entry.path();
        if path == root || !entry.file_type().is_dir() {
            return true;
        }

        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.'));
        if hidden {
            return false;
        }

        !self.exclude.iter().any(|p| p.matches_path(path))
    }

    fn selects(&self, path: &Path) -> bool {
        let file_name = path.file_name().and_then(|f| f.to_str()).unwrap_or_default();

        let included = self
            .include
            .iter()
            .any(|p| p.matches(file_name) || p.matches_path(path));

        included && !self.exclude.iter().any(|p| p.matches_path(path))
    }
}
