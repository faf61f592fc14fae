//! Storage backends for the catalog document.

use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Whole-document reads and writes against a path.
pub trait DocumentStorage {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Replaces the whole document at `path` with `bytes`.
    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}

/// Local filesystem storage.
///
/// Writes go to a temporary file next to the target which is then renamed
/// over it, so the document is never left truncated.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStorage;

impl DocumentStorage for FsStorage {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}
