//! Locking subsystem for setlock.
//!
//! A [`FileLock`] owns one exclusive, advisory, whole-file lock on a path.
//!
//! # Lock Files
//!
//! The lock file is opened read/write and created if absent. Its contents
//! are never read or written; only the OS-level lock on the open handle
//! matters. The file is left on disk after release.
//!
//! # Native Locking
//!
//! Locks are placed through `fs4` (flock(2) on Unix, `LockFileEx` on
//! Windows). They conflict with any other exclusive attempt on the same file,
//! including one made through a second `FileLock` in the same process, and
//! are released by the OS if the holder dies.
//!
//! # RAII Guards
//!
//! [`FileLock::guard`] returns a [`LockGuard`] that releases the lock when
//! dropped. A `FileLock` also releases on drop, so a held handle is never
//! leaked.

mod file_lock;
mod guard;
mod types;


// Re-export public API
pub use file_lock::FileLock;
pub use guard::LockGuard;
pub use types::BlockingMode;
