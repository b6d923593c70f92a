//! CLI Exit Code Registry
//!
//! Single source of truth for `qsum` exit codes. Scripts rely on them.
//!
//! | Range   | Domain     | Description                              |
//! |---------|------------|------------------------------------------|
//! | 0       | Universal  | Success                                  |
//! | 1       | Universal  | General error (unspecified)              |
//! | 2       | Universal  | CLI usage error (bad args, missing file) |
//! | 60-69   | summary    | Config, loading, validation, output      |

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Summary (60-69)
// =============================================================================

/// Config file failed to parse or validate.
pub const EXIT_SUMMARY_INVALID_CONFIG: u8 = 60;

/// A config or sheet file could not be read, or a sheet lacks a required column.
pub const EXIT_SUMMARY_LOAD: u8 = 61;

/// Self-assessment has duplicated qualities or lacks qualities reviewers chose.
pub const EXIT_SUMMARY_VALIDATION: u8 = 62;

/// Report files could not be written.
pub const EXIT_SUMMARY_OUTPUT: u8 = 63;

use qualities_summary::SummaryError;

/// Map a library error to its exit code.
pub fn summary_exit_code(err: &SummaryError) -> u8 {
    match err {
        SummaryError::DuplicateSelfQuality(_) | SummaryError::MissingSelfQuality(_) => {
            EXIT_SUMMARY_VALIDATION
        }
        SummaryError::ConfigParse(_)
        | SummaryError::ConfigValidation(_)
        | SummaryError::UnknownColumn(_) => EXIT_SUMMARY_INVALID_CONFIG,
        SummaryError::MissingColumn { .. }
        | SummaryError::TabIndex { .. }
        | SummaryError::Sheet(_)
        | SummaryError::Io(_) => EXIT_SUMMARY_LOAD,
    }
}
