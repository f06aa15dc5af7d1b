//! Storage access for import targets
//!
//! The content hash cache never touches the file system directly. It reads
//! through a [`ContentSource`], which lets tests substitute an in-memory or
//! mocked reader and count how often a file is actually read.

use std::io;
use std::path::Path;
use tracing::trace;

/// Reads the full byte content of a file
pub trait ContentSource: Send + Sync {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// [`ContentSource`] backed by the local file system
#[derive(Debug, Clone, Copy, Default)]
pub struct FsContentSource;

impl ContentSource for FsContentSource {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        trace!(path = %path.display(), "Reading import target");
        std::fs::read(path)
    }
}

impl<T: ContentSource + ?Sized> ContentSource for std::sync::Arc<T> {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read(path)
    }
}
