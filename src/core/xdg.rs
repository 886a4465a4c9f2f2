//! XDG Base Directory support.
//!
//! Resolves where readorder looks for its config file and keeps its
//! index database.

use std::env;
use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "readorder";

/// Resolved config and data directories
#[derive(Debug, Clone)]
pub struct XdgDirs {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl XdgDirs {
    /// Priority order (highest to lowest):
    /// 1. `READORDER_CONFIG_DIR` / `READORDER_DATA_DIR`
    /// 2. `XDG_CONFIG_HOME` / `XDG_DATA_HOME`
    /// 3. `~/.config`, `~/.local/share`
    pub fn new() -> Self {
        Self {
            config_dir: resolve("READORDER_CONFIG_DIR", "XDG_CONFIG_HOME", &[".config"]),
            data_dir: resolve("READORDER_DATA_DIR", "XDG_DATA_HOME", &[".local", "share"]),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Default location of the document index
    pub fn database_file(&self) -> PathBuf {
        self.data_dir.join("index.db")
    }

    pub fn ensure_dirs_exist(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.config_dir)?;
        fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    pub fn log_paths(&self) {
        tracing::debug!("XDG directories resolved:");
        tracing::debug!("  Config: {:?}", self.config_dir);
        tracing::debug!("  Data: {:?}", self.data_dir);
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve(override_var: &str, xdg_var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(dir) = env::var(override_var) {
        return PathBuf::from(dir);
    }
    if let Ok(xdg) = env::var(xdg_var) {
        return PathBuf::from(xdg).join(APP_DIR);
    }

    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    for part in home_default {
        path.push(part);
    }
    path.join(APP_DIR)
}
