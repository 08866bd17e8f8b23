//! Logger setup for the setlock binary.
//!
//! Library code only emits through the `log` facade; nothing is printed
//! unless a logger is installed here. Records go to stderr so the output
//! of the program run under the lock stays untouched.

use anyhow::{Context, Result};
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use std::io::{self, IsTerminal};

/// Install a stderr logger at the given level.
///
/// Fails if a logger has already been installed in this process.
pub fn init(level: LevelFilter) -> Result<()> {
    let is_terminal = io::stderr().is_terminal();

    let colors = ColoredLevelConfig::new()
        .info(Color::Green)
        .debug(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            let now = humantime::format_rfc3339_millis(std::time::SystemTime::now());
            if is_terminal {
                out.finish(format_args!(
                    "{} [{}] setlock: {}",
                    now,
                    colors.color(record.level()),
                    message
                ))
            } else {
                out.finish(format_args!(
                    "{} [{}] setlock: {}",
                    now,
                    record.level(),
                    message
                ))
            }
        })
        .level(level)
        .chain(io::stderr())
        .apply()
        .context("init logger")?;

    Ok(())
}
