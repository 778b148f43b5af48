//! Consumer-driven contract verification for Rust providers.
//!
//! For every interaction recorded in a consumer contract, the execution
//! driver prepares the provider into the states the consumer assumed,
//! propagates context to the transport target, and delegates exactly one
//! test execution. State handlers, request filters, and context slots are
//! declared up front on a [`VerifierDef`]; the definition is validated as a
//! whole before any run so a single failure reports every structural defect
//! at once.
//!
//! The engine is fully sequential and synchronous. The HTTP exchange itself,
//! contract-document parsing, and contract retrieval are external
//! collaborators reached through the [`Target`] and [`ContractSource`]
//! interfaces.

mod binding;
mod context;
mod definition;
#[cfg(feature = "diagnostics")]
mod diagnostics;
mod driver;
mod errors;
mod model;
mod resolve;
mod source;
mod target;
mod validate;

pub use binding::{BindingError, ParamValue, StateArgs, bind_all, bind_token};
pub use context::{StateContext, VerifyContext};
pub use definition::{
    HandlerError, ParamShape, ParamType, RequestFilterDescriptor, RequestFilterFn,
    StateHandlerDescriptor, StateHandlerFn, VerifierDef, VerifierDefBuilder,
};
#[cfg(feature = "diagnostics")]
pub use diagnostics::dump_definition;
pub use driver::{VerifySummary, verify};
pub use errors::VerifyError;
pub use model::{Consumer, Contract, Interaction, ProviderRequest, ProviderState, StateParams};
pub use resolve::apply_provider_states;
pub use source::{
    ConfigMap, ConfigurationError, ContractSource, SourceError, SourceLoader, source_for,
};
pub use target::{DefinitionAware, InteractionAware, Target, TargetSource};
pub use validate::{VIOLATION_SEPARATOR, ValidationReport, validate};
pub use veripact_patterns::StatePattern;
