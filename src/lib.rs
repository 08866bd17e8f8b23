//! Setlock: exclusive, advisory, whole-file locking.
//!
//! The core is [`locks::FileLock`], which opens (or creates) a file and
//! holds an exclusive OS-level lock on it until released. The remaining
//! modules make up the `setlock` command-line tool, which runs a program
//! while the lock is held.

pub mod cli;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod locks;
pub mod logging;
pub mod runner;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::LockError;
pub use locks::{BlockingMode, FileLock, LockGuard};
