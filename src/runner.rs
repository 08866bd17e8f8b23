//! Run a program while holding the lock.

use crate::config::{FailurePolicy, RunConfig};
use crate::error::{Result, SetlockError};
use crate::exit_codes;
use crate::locks::{FileLock, LockGuard};
use log::{debug, info};
use std::process::Command;

/// Acquire the lock, then run the configured program under it.
///
/// On Unix the program replaces this process and inherits the lock handle,
/// so the lock lives exactly as long as the program. Elsewhere the program
/// runs as a child and the lock is released once it exits.
///
/// # Returns
///
/// * `Ok(code)` - The exit code setlock should exit with: the program's own
///   status, or `SUCCESS` when the lock failed under [`FailurePolicy::ExitZero`]
/// * `Err(SetlockError::Lock)` - The lock could not be obtained (`-X`)
/// * `Err(SetlockError::Spawn)` - The program could not be started
/// * `Err(SetlockError::Wait)` - The program's status could not be collected
pub fn run(config: &RunConfig) -> Result<i32> {
    let mut lock = FileLock::new(&config.lock_path, config.mode);

    let guard = match lock.guard() {
        Ok(guard) => guard,
        Err(e) => match config.on_failure {
            FailurePolicy::Report => return Err(e.into()),
            FailurePolicy::ExitZero => {
                info!("{}; exiting quietly", e);
                return Ok(exit_codes::SUCCESS);
            }
        },
    };

    debug!(
        "running {} under lock '{}'",
        config.program.to_string_lossy(),
        guard.path().display()
    );

    run_locked(config, guard)
}

/// Replace this process with the program, keeping the lock handle open.
///
/// Only returns if `exec` fails; the guard then releases the lock.
#[cfg(unix)]
fn run_locked(config: &RunConfig, guard: LockGuard<'_>) -> Result<i32> {
    use std::os::unix::process::CommandExt;

    let spawn_error = |source: std::io::Error| SetlockError::Spawn {
        program: config.program.clone(),
        source,
    };

    guard.inherit_on_exec().map_err(spawn_error)?;
    let source = Command::new(&config.program).args(&config.args).exec();
    Err(spawn_error(source))
}

/// Run the program as a child and release the lock once it exits.
#[cfg(not(unix))]
fn run_locked(config: &RunConfig, guard: LockGuard<'_>) -> Result<i32> {
    let mut child = Command::new(&config.program)
        .args(&config.args)
        .spawn()
        .map_err(|source| SetlockError::Spawn {
            program: config.program.clone(),
            source,
        })?;

    let status = match child.wait() {
        Ok(status) => status,
        Err(source) => {
            // The lock is about to be released; the program must not outlive it.
            let _ = child.kill();
            return Err(SetlockError::Wait {
                program: config.program.clone(),
                source,
            });
        }
    };

    guard.release();

    let code = status.code().unwrap_or(exit_codes::TEMPORARY_FAILURE);
    debug!("{} exited with {}", config.program.to_string_lossy(), code);
    Ok(code)
}
