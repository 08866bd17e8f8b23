//! Exclusive file lock acquisition and release.

use super::guard::LockGuard;
use super::types::BlockingMode;
use crate::error::LockError;
use fs4::fs_std::FileExt;
use log::{debug, warn};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Exclusive, advisory lock on a single file path.
///
/// The lock is held while `handle` is `Some`. Acquisition and release take
/// `&mut self`, so one instance cannot be driven from two threads at once;
/// use one instance per thread when several threads compete for a path.
#[derive(Debug)]
pub struct FileLock {
    /// Path to the lock file.
    path: PathBuf,

    /// Whether acquisition waits for other holders.
    mode: BlockingMode,

    /// Open handle carrying the lock, present only while it is held.
    handle: Option<File>,
}

impl FileLock {
    /// Create an unlocked `FileLock`. No file I/O happens here; the path is
    /// validated on [`acquire`](Self::acquire).
    pub fn new(path: impl Into<PathBuf>, mode: BlockingMode) -> Self {
        Self {
            path: path.into(),
            mode,
            handle: None,
        }
    }

    /// Get the path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> BlockingMode {
        self.mode
    }

    /// Whether this instance currently holds the lock.
    pub fn is_locked(&self) -> bool {
        self.handle.is_some()
    }

    /// Open (or create) the lock file and place an exclusive lock on it.
    ///
    /// In [`BlockingMode::Block`] this waits, without timeout, until the
    /// lock is free. In [`BlockingMode::FailImmediately`] it returns
    /// `LockFailed` at once if someone else holds the lock.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The lock is held until [`release`](Self::release)
    /// * `Err(LockError::AlreadyLocked)` - This instance already holds it; nothing is touched
    /// * `Err(LockError::InvalidPath)` - The path is empty
    /// * `Err(LockError::OpenFailed)` - The file could not be created or opened
    /// * `Err(LockError::LockFailed)` - The lock is contended or the lock call failed
    ///
    /// The file is created even when the lock attempt then fails.
    pub fn acquire(&mut self) -> Result<(), LockError> {
        if self.handle.is_some() {
            return Err(LockError::AlreadyLocked {
                path: self.path.clone(),
            });
        }

        if self.path.as_os_str().is_empty() {
            return Err(LockError::InvalidPath);
        }

        let file = open_lock_file(&self.path)?;

        match lock_exclusive(&file, self.mode) {
            Ok(true) => {}
            Ok(false) => {
                drop(file);
                return Err(LockError::LockFailed {
                    path: self.path.clone(),
                    source: None,
                });
            }
            Err(e) => {
                drop(file);
                return Err(LockError::LockFailed {
                    path: self.path.clone(),
                    source: Some(e),
                });
            }
        }

        debug!(
            "acquired exclusive lock on '{}' ({})",
            self.path.display(),
            self.mode
        );
        self.handle = Some(file);
        Ok(())
    }

    #[cfg(test)]
    pub(super) fn handle(&self) -> Option<&File> {
        self.handle.as_ref()
    }

    /// Acquire the lock, panicking if it cannot be acquired.
    ///
    /// Convenience for callers that treat any lock failure as fatal.
    pub fn lock(&mut self) {
        if let Err(e) = self.acquire() {
            panic!("{}", e);
        }
    }

    /// Acquire the lock and return a guard that releases it when dropped.
    pub fn guard(&mut self) -> Result<LockGuard<'_>, LockError> {
        self.acquire()?;
        Ok(LockGuard::new(self))
    }

    /// Release the lock and close the handle.
    ///
    /// Does nothing if the lock is not held. Unlock failures are logged and
    /// otherwise ignored; closing the handle releases the lock regardless.
    pub fn release(&mut self) {
        let Some(file) = self.handle.take() else {
            return;
        };

        if let Err(e) = FileExt::unlock(&file) {
            warn!("failed to unlock '{}': {}", self.path.display(), e);
        }
        drop(file);

        debug!("released lock on '{}'", self.path.display());
    }

    /// Keep the held lock across `exec`.
    ///
    /// Clears close-on-exec on the lock handle, so a program that replaces
    /// this process keeps holding the lock until it exits.
    #[cfg(unix)]
    pub fn inherit_on_exec(&self) -> io::Result<()> {
        use std::os::fd::AsRawFd;

        let Some(file) = &self.handle else {
            return Err(io::Error::other(format!(
                "lock on '{}' is not held",
                self.path.display()
            )));
        };
        let fd = file.as_raw_fd();

        // SAFETY: fd is an open descriptor owned by `file`
        let flags = unsafe { libc::fcntl(fd, libc::F_GETFD) };
        if flags < 0 {
            return Err(io::Error::last_os_error());
        }
        // SAFETY: same descriptor, only the FD_CLOEXEC bit changes
        if unsafe { libc::fcntl(fd, libc::F_SETFD, flags & !libc::FD_CLOEXEC) } < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        self.release();
    }
}

/// Open the lock file for read/write, creating it if absent.
///
/// Other openers are not excluded; only the lock enforces exclusivity.
fn open_lock_file(path: &Path) -> Result<File, LockError> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .map_err(|source| LockError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })
}

/// Place an exclusive lock on the whole file.
///
/// Returns `Ok(false)` when a non-blocking attempt finds the lock held.
fn lock_exclusive(file: &File, mode: BlockingMode) -> io::Result<bool> {
    match mode {
        BlockingMode::Block => file.lock_exclusive().map(|()| true),
        BlockingMode::FailImmediately => match file.try_lock_exclusive() {
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(false),
            result => result,
        },
    }
}
