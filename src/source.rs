//! Where directory documents come from.
//!
//! [`DirectorySource`] separates byte access from parsing: the store asks a
//! source for the document's current bytes on every load, so a
//! [`FileSource`] picks up on-disk edits at the next reload while an
//! [`InMemorySource`] serves fixed bytes for tests and embedded fixtures.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Supplies the current bytes of a directory document.
pub trait DirectorySource: Send + Sync {
    /// Read the source's current contents.
    fn read(&self) -> io::Result<Vec<u8>>;
}

impl<S: DirectorySource + ?Sized> DirectorySource for Arc<S> {
    fn read(&self) -> io::Result<Vec<u8>> {
        (**self).read()
    }
}

/// A directory document on disk, re-read on every load.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path the source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DirectorySource for FileSource {
    fn read(&self) -> io::Result<Vec<u8>> {
        fs::read(&self.path)
    }
}

/// A directory document held in memory.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    bytes: Vec<u8>,
}

impl InMemorySource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

impl DirectorySource for InMemorySource {
    fn read(&self) -> io::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

impl From<&str> for InMemorySource {
    fn from(document: &str) -> Self {
        Self::new(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_source_returns_its_bytes() {
        let source = InMemorySource::new("<directory/>");
        assert_eq!(source.read().unwrap(), b"<directory/>");
        // Reads are repeatable.
        assert_eq!(source.read().unwrap(), b"<directory/>");
    }

    #[test]
    fn test_file_source_missing_file() {
        let source = FileSource::new("/nonexistent/directory.xml");
        let error = source.read().unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_arc_source_delegates() {
        let source = Arc::new(InMemorySource::new("x"));
        assert_eq!(source.read().unwrap(), b"x");
    }
}
