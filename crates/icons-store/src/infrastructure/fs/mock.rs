//! In-memory file system for unit testing.
//!
//! Lets tests seed documents, corrupt them, and make individual operations
//! fail, without a real configuration directory.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;

use super::OptionsFileSystem;

/// A mock implementation of [`OptionsFileSystem`] that keeps files in a map.
#[derive(Default)]
pub struct MemoryFileSystem {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
    directories: Mutex<HashSet<PathBuf>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    fail_create_directory: AtomicBool,
    write_count: AtomicUsize,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `contents` at `path`, as if written by another process.
    pub fn seed(&self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.files.lock().insert(path.into(), contents.into());
    }

    /// Returns the current contents of `path`, if any.
    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.lock().get(path).cloned()
    }

    /// Returns the contents of `path` as UTF-8 text, if any.
    pub fn text(&self, path: &Path) -> Option<String> {
        self.contents(path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Makes every subsequent [`OptionsFileSystem::read`] fail.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent [`OptionsFileSystem::write_atomic`] fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent [`OptionsFileSystem::create_directory`] fail.
    pub fn fail_create_directory(&self, fail: bool) {
        self.fail_create_directory.store(fail, Ordering::SeqCst);
    }

    /// Number of successful atomic writes so far.
    pub fn write_count(&self) -> usize {
        self.write_count.load(Ordering::SeqCst)
    }
}

fn injected(kind: io::ErrorKind, what: &str) -> io::Error {
    io::Error::new(kind, format!("injected {what} failure"))
}

impl OptionsFileSystem for MemoryFileSystem {
    fn directory_exists(&self, path: &Path) -> bool {
        self.directories.lock().contains(path)
    }

    fn create_directory(&self, path: &Path) -> io::Result<()> {
        if self.fail_create_directory.load(Ordering::SeqCst) {
            return Err(injected(io::ErrorKind::PermissionDenied, "create_directory"));
        }
        let mut directories = self.directories.lock();
        for ancestor in path.ancestors() {
            directories.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.files.lock().contains_key(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(injected(io::ErrorKind::PermissionDenied, "read"));
        }
        self.contents(path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    fn write_atomic(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(injected(io::ErrorKind::PermissionDenied, "write"));
        }
        self.files.lock().insert(path.to_path_buf(), contents.to_vec());
        self.write_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
