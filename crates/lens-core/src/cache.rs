use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::atomic_io::write_text_atomic;

const CACHE_FILE_EXTENSION: &str = "md";

/// Flat-file key→text cache for serialized content.
///
/// One file per key under `dir`, created lazily on first write. There is no
/// TTL and no eviction; entries live until deleted by hand. Single-process
/// usage only, so no locking discipline.
#[derive(Debug, Clone)]
pub struct ContentCache {
    dir: PathBuf,
}

impl ContentCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{CACHE_FILE_EXTENSION}"))
    }

    /// Returns the cached text for `key`, or `None` when no entry exists.
    pub fn read(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.entry_path(key)).ok()
    }

    /// Writes (or overwrites) the entry for `key`, creating the cache
    /// directory when missing.
    pub fn write(&self, key: &str, value: &str) -> Result<()> {
        write_text_atomic(&self.entry_path(key), value)
    }
}
