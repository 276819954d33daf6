//! Exit codes following sysexits.h conventions.
//!
//! These codes provide semantic meaning for different failure modes,
//! enabling scripts to tell a bad invocation from a failed batch.

use stegatool_core::StegaError;

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// General error (catch-all).
pub const GENERAL_ERROR: i32 = 1;

/// Command line usage error (invalid arguments or key).
/// Maps to EX_USAGE from sysexits.h.
pub const USAGE_ERROR: i32 = 64;

/// Input data could not be decoded (corrupt image).
/// Maps to EX_DATAERR from sysexits.h.
pub const DATA_ERROR: i32 = 65;

/// Cannot open input file or directory.
/// Maps to EX_NOINPUT from sysexits.h.
pub const INPUT_ERROR: i32 = 66;

/// I/O error (cannot write output file).
/// Maps to EX_IOERR from sysexits.h.
pub const IO_ERROR: i32 = 74;

/// Represents an exit code with optional error context.
pub struct ExitCode {
    pub code: i32,
    pub message: Option<String>,
}

impl ExitCode {
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let message = format!("{err:#}");

        // Classify by the first library error in the chain
        let code = match err.chain().find_map(|e| e.downcast_ref::<StegaError>()) {
            Some(StegaError::Read { .. } | StegaError::Font { .. }) => INPUT_ERROR,
            Some(StegaError::Write { .. }) => IO_ERROR,
            Some(StegaError::ImageDecode { .. } | StegaError::PngDecode(_)) => DATA_ERROR,
            Some(StegaError::InvalidKey(_)) => USAGE_ERROR,
            _ => GENERAL_ERROR,
        };

        Self {
            code,
            message: Some(message),
        }
    }

    /// Process exit status; codes outside `0..=255` collapse to 1.
    pub fn status(&self) -> u8 {
        u8::try_from(self.code).unwrap_or(1)
    }
}
