//! RAII lock guard implementation.

use super::file_lock::FileLock;
use std::path::Path;

/// RAII guard for a held [`FileLock`].
///
/// When dropped, the lock is released and its handle closed.
#[derive(Debug)]
pub struct LockGuard<'a> {
    lock: &'a mut FileLock,
}

impl<'a> LockGuard<'a> {
    /// Wrap a lock that has just been acquired.
    pub(super) fn new(lock: &'a mut FileLock) -> Self {
        Self { lock }
    }

    /// Get the path to the lock file.
    pub fn path(&self) -> &Path {
        self.lock.path()
    }

    /// Keep the lock held by a program this process `exec`s into.
    #[cfg(unix)]
    pub fn inherit_on_exec(&self) -> std::io::Result<()> {
        self.lock.inherit_on_exec()
    }

    /// Release the lock before the guard goes out of scope.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        self.lock.release();
    }
}
