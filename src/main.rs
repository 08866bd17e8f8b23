//! Setlock: run a program while holding an exclusive lock on a file.
//!
//! This is the main entry point for the `setlock` CLI. It parses arguments,
//! acquires the lock, runs the program, and maps errors to exit codes.

use setlock::cli::Cli;
use setlock::config::RunConfig;
use setlock::error::SetlockError;
use setlock::{exit_codes, logging, runner};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = RunConfig::from(Cli::parse_args());

    let result = logging::init(config.log_level)
        .map_err(SetlockError::Logging)
        .and_then(|()| runner::run(&config));

    match result {
        Ok(code) => ExitCode::from(exit_codes::to_process_code(code)),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("setlock: fatal: {}", err);

            // Return appropriate exit code
            ExitCode::from(exit_codes::to_process_code(err.exit_code()))
        }
    }
}
