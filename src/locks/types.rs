//! Lock mode definitions.

/// How [`FileLock::acquire`](super::FileLock::acquire) behaves when the lock
/// is held elsewhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlockingMode {
    /// Suspend the calling thread until the lock becomes available.
    #[default]
    Block,
    /// Return `LockFailed` at once instead of waiting.
    FailImmediately,
}

impl BlockingMode {
    /// Select a mode from a "do not wait" flag.
    pub fn from_nonblocking(nonblocking: bool) -> Self {
        if nonblocking {
            BlockingMode::FailImmediately
        } else {
            BlockingMode::Block
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockingMode::Block => "block",
            BlockingMode::FailImmediately => "fail-immediately",
        }
    }
}

impl std::fmt::Display for BlockingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
