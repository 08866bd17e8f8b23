//! CLI argument parsing for setlock.
//!
//! Uses clap derive macros for declarative argument definitions. Flags follow
//! the daemontools `setlock` tool; see [`crate::config`] for how they are
//! resolved.

use crate::exit_codes;
use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// Setlock: run a program while holding an exclusive lock on a file.
///
/// Opens FILE (creating it if needed), locks it, runs PROGRAM with its
/// arguments, and releases the lock when PROGRAM exits. The exit status
/// is PROGRAM's, or 111 if the lock or the program could not be obtained.
#[derive(Parser, Debug)]
#[command(name = "setlock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Fail immediately if another process holds the lock.
    #[arg(short = 'n', long = "no-wait", overrides_with = "wait")]
    pub no_wait: bool,

    /// Wait until the lock is available (default).
    #[arg(short = 'N', long = "wait", overrides_with = "no_wait")]
    pub wait: bool,

    /// Exit 0 without running PROGRAM if FILE cannot be opened or locked.
    #[arg(short = 'x', long = "exit-zero", overrides_with = "report")]
    pub exit_zero: bool,

    /// Print an error and exit 111 if FILE cannot be opened or locked (default).
    #[arg(short = 'X', long = "report", overrides_with = "exit_zero")]
    pub report: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Lock file to open and lock.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Program to run while the lock is held, followed by its arguments.
    #[arg(
        value_name = "PROGRAM",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<OsString>,
}

impl Cli {
    /// Parse command-line arguments.
    ///
    /// Usage errors exit with [`exit_codes::USAGE`]; `--help` and
    /// `--version` exit normally.
    pub fn parse_args() -> Self {
        Cli::try_parse().unwrap_or_else(|err| match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                let _ = err.print();
                std::process::exit(exit_codes::USAGE)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_minimal() {
        let cli = Cli::try_parse_from(["setlock", "/tmp/test.lock", "true"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("/tmp/test.lock"));
        assert_eq!(cli.command, vec![OsString::from("true")]);
        assert!(!cli.no_wait);
        assert!(!cli.exit_zero);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parse_program_arguments_verbatim() {
        let cli = Cli::try_parse_from(["setlock", "-n", "/tmp/test.lock", "ls", "-l", "--all"])
            .unwrap();
        assert!(cli.no_wait);
        assert_eq!(
            cli.command,
            vec![
                OsString::from("ls"),
                OsString::from("-l"),
                OsString::from("--all")
            ]
        );
    }

    #[test]
    fn later_flags_override_earlier_ones() {
        let cli = Cli::try_parse_from(["setlock", "-n", "-N", "-x", "-X", "f", "true"]).unwrap();
        assert!(!cli.no_wait);
        assert!(cli.wait);
        assert!(!cli.exit_zero);
        assert!(cli.report);

        let cli = Cli::try_parse_from(["setlock", "-N", "-n", "-X", "-x", "f", "true"]).unwrap();
        assert!(cli.no_wait);
        assert!(cli.exit_zero);
    }

    #[test]
    fn parse_combined_short_flags() {
        let cli = Cli::try_parse_from(["setlock", "-nxvv", "f", "true"]).unwrap();
        assert!(cli.no_wait);
        assert!(cli.exit_zero);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn program_is_required() {
        let err = Cli::try_parse_from(["setlock", "/tmp/test.lock"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn file_is_required() {
        assert!(Cli::try_parse_from(["setlock"]).is_err());
    }
}
