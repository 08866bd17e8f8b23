//! Error types for setlock.
//!
//! Uses thiserror for derive macros. `LockError` is what the lock itself can
//! report; `SetlockError` wraps it together with the failures of the CLI.

use crate::exit_codes;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single lock acquisition.
#[derive(Error, Debug)]
pub enum LockError {
    /// The lock path was empty when acquisition was attempted.
    #[error("lock file path is empty")]
    InvalidPath,

    /// The lock file could not be created or opened.
    #[error("unable to open {}: {source}", .path.display())]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The exclusive lock could not be placed on the file.
    ///
    /// `source` is `None` when the lock is simply held by someone else.
    #[error("unable to lock {}: {}", .path.display(), lock_failure_reason(.source))]
    LockFailed {
        path: PathBuf,
        #[source]
        source: Option<io::Error>,
    },

    /// This instance already holds the lock.
    #[error("lock on {} is already held by this instance", .path.display())]
    AlreadyLocked { path: PathBuf },
}

fn lock_failure_reason(source: &Option<io::Error>) -> String {
    match source {
        Some(err) => err.to_string(),
        None => "lock is held by another process".to_string(),
    }
}

impl LockError {
    /// True when the lock attempt failed only because another holder has it.
    pub fn is_contended(&self) -> bool {
        matches!(self, LockError::LockFailed { source: None, .. })
    }

    /// True when retrying the same acquisition later may succeed.
    pub fn is_retriable(&self) -> bool {
        matches!(self, LockError::LockFailed { .. })
    }

    /// Returns the exit code the CLI uses for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            LockError::InvalidPath => exit_codes::USAGE,
            LockError::OpenFailed { .. }
            | LockError::LockFailed { .. }
            | LockError::AlreadyLocked { .. } => exit_codes::TEMPORARY_FAILURE,
        }
    }
}

/// Main error type for the setlock CLI.
#[derive(Error, Debug)]
pub enum SetlockError {
    /// The lock could not be acquired.
    #[error(transparent)]
    Lock(#[from] LockError),

    /// The program could not be started.
    #[error("unable to run {}: {source}", .program.to_string_lossy())]
    Spawn {
        program: OsString,
        #[source]
        source: io::Error,
    },

    /// Waiting for the program to finish failed.
    #[error("unable to wait for {}: {source}", .program.to_string_lossy())]
    Wait {
        program: OsString,
        #[source]
        source: io::Error,
    },

    /// The logger could not be installed.
    #[error("unable to initialize logging: {0:#}")]
    Logging(anyhow::Error),
}

impl SetlockError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SetlockError::Lock(err) => err.exit_code(),
            SetlockError::Spawn { .. } => exit_codes::TEMPORARY_FAILURE,
            SetlockError::Wait { .. } => exit_codes::TEMPORARY_FAILURE,
            SetlockError::Logging(_) => exit_codes::TEMPORARY_FAILURE,
        }
    }
}

/// Result type alias for setlock operations.
pub type Result<T> = std::result::Result<T, SetlockError>;
