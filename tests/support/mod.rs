use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Path to a checked-in fixture project
#[allow(dead_code)]
pub fn fixture_path(category: &str, name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(category)
        .join(name)
}

/// Materializes `(relative path, content)` pairs into a fresh temp directory
#[allow(dead_code)]
pub fn write_project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for (path, content) in files {
        let full = dir.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&full, content).expect("Failed to write fixture file");
    }
    dir
}

#[allow(dead_code)]
pub fn planbox_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_planbox"))
}
