//! Exit code constants for the setlock CLI.
//!
//! These follow the daemontools `setlock` conventions:
//! - 0: Success (or lock failure with `-x`)
//! - 100: Usage error (bad or missing arguments)
//! - 111: Temporary failure (cannot open/lock the file or run the program)
//!
//! Any other code is the exit status of the program run under the lock.

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Usage error: bad or missing arguments.
pub const USAGE: i32 = 100;

/// Temporary failure: the lock file could not be opened or locked, or the
/// program could not be started.
pub const TEMPORARY_FAILURE: i32 = 111;

/// Convert a code to a process exit status.
///
/// Codes outside `0..=255` cannot be represented and become
/// [`TEMPORARY_FAILURE`] rather than wrapping around.
pub fn to_process_code(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(TEMPORARY_FAILURE as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USAGE, TEMPORARY_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn exit_codes_match_daemontools() {
        assert_eq!(SUCCESS, 0);
        assert_eq!(USAGE, 100);
        assert_eq!(TEMPORARY_FAILURE, 111);
    }

    #[test]
    fn process_code_does_not_wrap() {
        assert_eq!(to_process_code(0), 0);
        assert_eq!(to_process_code(3), 3);
        assert_eq!(to_process_code(255), 255);
        assert_eq!(to_process_code(256), TEMPORARY_FAILURE as u8);
        assert_eq!(to_process_code(-1), TEMPORARY_FAILURE as u8);
        assert_eq!(to_process_code(0xC000_0005_u32 as i32), TEMPORARY_FAILURE as u8);
    }
}
