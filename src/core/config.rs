//! Configuration management for readorder.
//!
//! Loads configuration from TOML and environment variables, with
//! defaults for every setting. Every section is optional and every
//! key inside a section falls back to its default on its own.

use crate::core::error::{ReadorderError, Result};
use crate::core::format::TableFormat;
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub indexing: IndexingConfig,
    #[serde(default)]
    pub conversion: ConversionConfig,
}

/// Linearization settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LayoutConfig {
    /// Table rendering used for tables embedded in page text
    #[serde(default)]
    pub table_format: TableFormat,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChunkingConfig {
    /// Lines of page text per node
    #[serde(default = "default_lines_per_node")]
    pub lines_per_node: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Root for per-document Markdown output
    #[serde(default = "default_save_directory")]
    pub save_directory: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// SQLite index file
    #[serde(default = "default_database")]
    pub database: PathBuf,
}

/// Batch input selection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexingConfig {
    /// File patterns to include (glob syntax)
    #[serde(default = "default_include_patterns")]
    pub include_patterns: Vec<String>,

    /// File patterns to exclude (glob syntax)
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,

    /// Maximum page dump size in MB (skip larger files)
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: usize,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConversionConfig {
    /// Office suite executable; looked up on PATH when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soffice: Option<PathBuf>,
}

fn default_lines_per_node() -> usize {
    crate::core::chunker::DEFAULT_LINES_PER_NODE
}

fn default_save_directory() -> PathBuf {
    PathBuf::from("processed_sources")
}

fn default_database() -> PathBuf {
    PathBuf::from("./readorder.db")
}

fn default_include_patterns() -> Vec<String> {
    vec!["*.json".to_string()]
}

fn default_exclude_patterns() -> Vec<String> {
    vec![
        "**/.git/**".to_string(),
        "**/target/**".to_string(),
        "**/node_modules/**".to_string(),
        "**/processed_sources/**".to_string(),
    ]
}

fn default_max_file_size() -> usize {
    64
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            lines_per_node: default_lines_per_node(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            save_directory: default_save_directory(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
        }
    }
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            include_patterns: default_include_patterns(),
            exclude_patterns: default_exclude_patterns(),
            max_file_size_mb: default_max_file_size(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ReadorderError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// File lookup order:
    /// 1. `READORDER_CONFIG` env var
    /// 2. XDG config file (~/.config/readorder/config.toml)
    /// 3. ./readorder.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("READORDER_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("readorder.toml").exists() {
                Self::from_file("readorder.toml")?
            } else {
                Self::default()
            }
        };

        // An unconfigured database lives in the XDG data directory
        if env::var("READORDER_DATABASE").is_err() && config.storage.database == default_database()
        {
            config.storage.database = xdg.database_file();
        }

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(lines) = env::var("READORDER_LINES_PER_NODE") {
            if let Ok(n) = lines.parse() {
                self.chunking.lines_per_node = n;
            }
        }
        if let Ok(format) = env::var("READORDER_TABLE_FORMAT") {
            match format.parse() {
                Ok(f) => self.layout.table_format = f,
                Err(e) => tracing::warn!("Ignoring READORDER_TABLE_FORMAT: {e}"),
            }
        }
        if let Ok(database) = env::var("READORDER_DATABASE") {
            self.storage.database = PathBuf::from(database);
        }
        if let Ok(dir) = env::var("READORDER_SAVE_DIR") {
            self.output.save_directory = PathBuf::from(dir);
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.chunking.lines_per_node == 0 {
            return Err(ReadorderError::ConfigError(
                "Lines per node must be non-zero".to_string(),
            ));
        }

        if self.indexing.max_file_size_mb == 0 {
            return Err(ReadorderError::ConfigError(
                "Max file size must be non-zero".to_string(),
            ));
        }

        if self.indexing.include_patterns.is_empty() {
            return Err(ReadorderError::ConfigError(
                "At least one include pattern is required".to_string(),
            ));
        }

        Ok(())
    }

    pub fn log_config(&self) {
        tracing::debug!("Configuration loaded:");
        tracing::debug!("  Table format: {:?}", self.layout.table_format);
        tracing::debug!("  Lines per node: {}", self.chunking.lines_per_node);
        tracing::debug!("  Save directory: {:?}", self.output.save_directory);
        tracing::debug!("  Database: {:?}", self.storage.database);
        tracing::debug!(
            "  Include patterns: {} patterns",
            self.indexing.include_patterns.len()
        );
        tracing::debug!(
            "  Exclude patterns: {} patterns",
            self.indexing.exclude_patterns.len()
        );
    }
}
