//! In-memory [`FileSystem`] for tests
//!
//! Directories are implied by the files beneath them and can also be declared
//! explicitly. Every probe is counted so callers can assert how often the
//! source was touched.

use super::{DirEntry, FileSystem, FileType};
use anyhow::{anyhow, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct MockFileSystem {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
    exists_calls: AtomicUsize,
    read_calls: AtomicUsize,
    read_dir_calls: AtomicUsize,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) -> Self {
        self.files
            .insert(path.as_ref().to_path_buf(), content.as_ref().to_vec());
        self
    }

    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.dirs.insert(path.as_ref().to_path_buf());
        self
    }

    pub fn exists_calls(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst)
    }

    pub fn read_calls(&self) -> usize {
        self.read_calls.load(Ordering::SeqCst)
    }

    pub fn read_dir_calls(&self) -> usize {
        self.read_dir_calls.load(Ordering::SeqCst)
    }

    /// Total number of probes of any kind
    pub fn probes(&self) -> usize {
        self.exists_calls() + self.read_calls() + self.read_dir_calls()
    }

    fn is_dir(&self, path: &Path) -> bool {
        if path.as_os_str().is_empty() || self.dirs.contains(path) {
            return true;
        }
        self.all_paths().any(|p| p != path && p.starts_with(path))
    }

    fn all_paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.keys().chain(self.dirs.iter())
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        self.files.contains_key(path) || self.is_dir(path)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow!("File not found: {}", path.display()))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        self.read_dir_calls.fetch_add(1, Ordering::SeqCst);
        if !self.is_dir(path) {
            return Err(anyhow!("Directory not found: {}", path.display()));
        }

        let mut children: BTreeMap<String, FileType> = BTreeMap::new();
        for candidate in self.all_paths() {
            let Ok(rest) = candidate.strip_prefix(path) else {
                continue;
            };
            let mut components = rest.components();
            let Some(first) = components.next() else {
                continue;
            };
            let name = first.as_os_str().to_string_lossy().into_owned();
            let nested = components.next().is_some();
            let file_type = if nested || self.dirs.contains(candidate) {
                FileType::Directory
            } else {
                FileType::File
            };
            children
                .entry(name)
                .and_modify(|t| {
                    if file_type == FileType::Directory {
                        *t = FileType::Directory;
                    }
                })
                .or_insert(file_type);
        }

        Ok(children
            .into_iter()
            .map(|(name, file_type)| DirEntry::new(name, file_type))
            .collect())
    }
}
