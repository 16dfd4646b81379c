//! # Memory Loader
//!
//! Serves resource bytes from an in-process path table, e.g. assets
//! embedded with `include_bytes!`.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Path to byte-span table.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    entries: HashMap<PathBuf, Cow<'static, [u8]>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `bytes` under `path`, replacing a previous entry.
    pub fn add_memory(&mut self, path: impl Into<PathBuf>, bytes: impl Into<Cow<'static, [u8]>>) {
        self.entries.insert(path.into(), bytes.into());
    }

    /// Bytes registered under `path`.
    pub fn search(&self, path: impl AsRef<Path>) -> Option<&[u8]> {
        self.entries.get(path.as_ref()).map(|bytes| bytes.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
