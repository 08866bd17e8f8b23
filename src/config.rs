//! Run configuration for setlock.
//!
//! setlock has no configuration file; everything comes from the command
//! line. This module resolves the parsed [`Cli`] into a [`RunConfig`] with
//! the defaults applied.

use crate::cli::Cli;
use crate::locks::BlockingMode;
use log::LevelFilter;
use std::ffi::OsString;
use std::path::PathBuf;

/// What to do when the lock file cannot be opened or locked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Print an error and exit with a temporary failure (`-X`).
    #[default]
    Report,
    /// Exit 0 without running the program (`-x`).
    ExitZero,
}

/// Fully resolved settings for one setlock run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Path of the lock file.
    pub lock_path: PathBuf,

    /// Whether to wait for the lock.
    pub mode: BlockingMode,

    /// Behaviour when the lock cannot be obtained.
    pub on_failure: FailurePolicy,

    /// Program to run while the lock is held.
    pub program: OsString,

    /// Arguments passed to the program.
    pub args: Vec<OsString>,

    /// Maximum level of log records written to stderr.
    pub log_level: LevelFilter,
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        let mut command = cli.command.into_iter();
        let program = command.next().unwrap_or_default();

        let on_failure = if cli.exit_zero {
            FailurePolicy::ExitZero
        } else {
            FailurePolicy::Report
        };

        Self {
            lock_path: cli.file,
            mode: BlockingMode::from_nonblocking(cli.no_wait),
            on_failure,
            program,
            args: command.collect(),
            log_level: log_level_for_verbosity(cli.verbose),
        }
    }
}

/// Map the number of `-v` flags to a log level.
pub fn log_level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn resolve(args: &[&str]) -> RunConfig {
        RunConfig::from(Cli::try_parse_from(args).unwrap())
    }

    #[test]
    fn defaults_block_and_report() {
        let config = resolve(&["setlock", "/tmp/test.lock", "true"]);

        assert_eq!(config.lock_path, PathBuf::from("/tmp/test.lock"));
        assert_eq!(config.mode, BlockingMode::Block);
        assert_eq!(config.on_failure, FailurePolicy::Report);
        assert_eq!(config.program, OsString::from("true"));
        assert!(config.args.is_empty());
        assert_eq!(config.log_level, LevelFilter::Warn);
    }

    #[test]
    fn flags_select_nonblocking_and_exit_zero() {
        let config = resolve(&["setlock", "-n", "-x", "f", "echo", "a", "-b"]);

        assert_eq!(config.mode, BlockingMode::FailImmediately);
        assert_eq!(config.on_failure, FailurePolicy::ExitZero);
        assert_eq!(config.program, OsString::from("echo"));
        assert_eq!(config.args, vec![OsString::from("a"), OsString::from("-b")]);
    }

    #[test]
    fn verbosity_maps_to_log_level() {
        assert_eq!(log_level_for_verbosity(0), LevelFilter::Warn);
        assert_eq!(log_level_for_verbosity(1), LevelFilter::Info);
        assert_eq!(log_level_for_verbosity(2), LevelFilter::Debug);
        assert_eq!(log_level_for_verbosity(7), LevelFilter::Debug);
    }
}
