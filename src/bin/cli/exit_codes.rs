//! Exit codes for the CLI tool.

/// Exit code constants
pub const SUCCESS: i32 = 0;
/// Invalid or missing command line arguments
pub const BAD_ARGS: i32 = 1;
/// Files were skipped or a stage aborted (only with `--strict`)
pub const INCOMPLETE: i32 = 2;
/// The output directory could not be created (only with `--strict`)
pub const IO_ERROR: i32 = 5;
/// Ctrl+C (128 + SIGINT)
pub const USER_INTERRUPT: i32 = 130;

/// Exit code enum for structured handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    BadArgs,
    Incomplete,
    IoError,
}

impl ExitCode {
    /// Returns the numeric exit code
    pub fn code(self) -> i32 {
        match self {
            Self::Success => SUCCESS,
            Self::BadArgs => BAD_ARGS,
            Self::Incomplete => INCOMPLETE,
            Self::IoError => IO_ERROR,
        }
    }

    /// Applies the exit policy: without `--strict` every completed run
    /// exits successfully.
    pub fn with_policy(self, strict: bool) -> Self {
        if strict { self } else { Self::Success }
    }
}

/// Converts a packaging error to an exit code
pub fn error_to_exit_code(error: &minipack::Error) -> ExitCode {
    match error {
        minipack::Error::InvalidLevel { .. } => ExitCode::BadArgs,
        _ => ExitCode::IoError,
    }
}
