//! # File Loader
//!
//! Resolves relative resource paths against an ordered list of directories.

use std::path::{Path, PathBuf};

/// Ordered list of search directories.
///
/// The first directory containing a regular file at the relative path wins.
#[derive(Debug, Clone, Default)]
pub struct FileLoader {
    search_directories: Vec<PathBuf>,
}

impl FileLoader {
    /// Creates a loader with no search directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a directory at the lowest priority.
    pub fn add_search_directory(&mut self, directory: impl Into<PathBuf>) {
        let directory = directory.into();
        log::debug!("Search directory added: '{}'", directory.display());
        self.search_directories.push(directory);
    }

    /// The search directories in priority order.
    pub fn search_directories(&self) -> &[PathBuf] {
        &self.search_directories
    }

    /// Finds the file for `relative_path`, or `None` when no directory has it.
    ///
    /// An absolute path that names an existing file is returned unchanged.
    pub fn search(&self, relative_path: impl AsRef<Path>) -> Option<PathBuf> {
        let relative_path = relative_path.as_ref();

        if relative_path.is_absolute() && relative_path.is_file() {
            return Some(relative_path.to_path_buf());
        }

        let found = self
            .search_directories
            .iter()
            .map(|directory| directory.join(relative_path))
            .find(|candidate| candidate.is_file());

        if found.is_none() {
            log::warn!("File not found: '{}'", relative_path.display());
        }

        found
    }
}
