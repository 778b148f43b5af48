//! Error types for positional capture extraction.

use thiserror::Error;

/// Failure to extract positional tokens from a provider state name.
///
/// Both variants carry the data a handler author needs to fix the mismatch:
/// the state name, the pattern involved, and the expected and actual capture
/// counts where they are known.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// No declared pattern fully matched the state name as a regular
    /// expression, so there is nothing to capture from.
    #[error("no declared pattern matches provider state '{state}' as a regular expression")]
    NoCapturingMatch {
        /// Name of the provider state under resolution.
        state: String,
    },
    /// The first matching pattern captured a different number of groups than
    /// the handler declares parameters.
    #[error(
        "provider state '{state}' matches pattern '{pattern}' but the handler declares \
         {expected} parameter(s) while the pattern captures {actual}"
    )]
    CaptureCountMismatch {
        /// Name of the provider state under resolution.
        state: String,
        /// The pattern that matched the state name.
        pattern: String,
        /// Parameter count declared by the handler.
        expected: usize,
        /// Capture groups produced by the matching pattern.
        actual: usize,
    },
}
