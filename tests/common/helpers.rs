// Test helper functions

use readorder::core::config::Config;
use readorder::core::page::{RawDocument, RawPage};
use readorder::core::services::Services;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Services whose database and save directory live in a temp dir.
/// Keep the returned `TempDir` alive for the duration of the test.
#[allow(dead_code)]
pub fn create_test_services() -> (Services, TempDir) {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.storage.database = temp_dir.path().join("index.db");
    config.output.save_directory = temp_dir.path().join("processed_sources");

    let services = Services::new(config).unwrap();
    (services, temp_dir)
}

/// Write `pages` as the JSON page dump `dir/<name>`
#[allow(dead_code)]
pub fn write_dump(dir: &Path, name: &str, pages: Vec<RawPage>) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let document = RawDocument {
        source: None,
        pages,
    };
    std::fs::write(&path, serde_json::to_string_pretty(&document).unwrap()).unwrap();
    path
}
