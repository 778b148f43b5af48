//! Error taxonomy for a verification run.
//!
//! Validation failures aggregate; everything after validation fails fast and
//! aborts the remainder of the run. Binding-time failures are distinguished
//! from invocation failures so callers can tell a mis-declared handler from
//! a broken one.

use thiserror::Error;

use crate::binding::BindingError;
use crate::definition::HandlerError;
use crate::source::SourceError;
use crate::validate::ValidationReport;

/// Top-level error for a verification run.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Structural validation failed before any execution; the message
    /// aggregates every violation.
    #[error("invalid verifier definition: {0}")]
    Validation(ValidationReport),
    /// Positional binding failed before a handler could be invoked.
    #[error(transparent)]
    Binding(#[from] BindingError),
    /// A state handler failed while preparing a provider state.
    #[error("state handler '{handler}' failed for provider state '{state}': {source}")]
    StateHandler {
        /// Name of the failing handler.
        handler: String,
        /// Name of the provider state being applied.
        state: String,
        /// The underlying failure, propagated as-is.
        #[source]
        source: HandlerError,
    },
    /// The delegated test body failed for an interaction.
    #[error("verification of interaction '{interaction}' failed: {source}")]
    Execution {
        /// Description of the interaction under execution.
        interaction: String,
        /// The underlying failure, propagated as-is.
        #[source]
        source: HandlerError,
    },
    /// The contract source failed to configure or retrieve.
    #[error(transparent)]
    Source(#[from] SourceError),
}
