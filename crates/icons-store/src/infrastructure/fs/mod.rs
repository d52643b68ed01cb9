//! File system access for the options store.
//!
//! The store only needs five operations on the configuration directory, so
//! they are expressed as the [`OptionsFileSystem`] trait.  Production code
//! uses [`LocalFileSystem`]; tests use [`mock::MemoryFileSystem`] to inject
//! missing files, corrupt bytes and I/O failures without touching disk.
//!
//! # Atomic writes
//!
//! [`LocalFileSystem::write_atomic`] writes the new document to a uniquely
//! named sibling file, flushes it, and renames it over the target.  A reader (or a
//! crash) therefore sees either the old document or the new one, never a
//! partially written file.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

pub mod mock;

/// File system operations consumed by the store.
pub trait OptionsFileSystem: Send + Sync {
    fn directory_exists(&self, path: &Path) -> bool;

    /// Creates `path` and any missing parents.
    fn create_directory(&self, path: &Path) -> io::Result<()>;

    fn file_exists(&self, path: &Path) -> bool;

    /// Reads the whole file.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Replaces the file at `path` with `contents` in one step.
    fn write_atomic(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// [`OptionsFileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl OptionsFileSystem for LocalFileSystem {
    fn directory_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_directory(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write_atomic(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        // Each write stages under its own name, so writers in other
        // processes never share a staging file.
        let mut staging = NamedTempFile::new_in(dir)?;
        staging.write_all(contents)?;
        staging.as_file().sync_all()?;
        staging.persist(path).map_err(|err| err.error)?;
        Ok(())
    }
}
