//! Contract sources: the external collaborators that supply contracts, and
//! the loader registry they register with.
//!
//! Retrieval may involve network or file system I/O; all of that lives in
//! the adapter crates. The engine only consumes the ordered contract
//! collection a source produces.

use thiserror::Error;

use crate::definition::HandlerError;
use crate::model::Contract;

/// Configuration map passed to [`ContractSource::configure`].
pub type ConfigMap = serde_json::Map<String, serde_json::Value>;

/// Configuration failure raised before any retrieval.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A required configuration key is absent.
    #[error("contract source configuration requires the '{key}' key")]
    MissingKey {
        /// The absent key.
        key: &'static str,
    },
    /// A configuration key holds a value of the wrong type.
    #[error("configuration key '{key}' must be {expected}, found {found}")]
    InvalidType {
        /// The offending key.
        key: &'static str,
        /// What the key accepts.
        expected: &'static str,
        /// What was found instead.
        found: String,
    },
    /// The source was asked to retrieve before being configured.
    #[error("contract source '{name}' has not been configured")]
    Unconfigured {
        /// Registry name of the source.
        name: String,
    },
}

/// Failure while obtaining contracts from a source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source's configuration is missing or malformed.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// Retrieval itself failed.
    #[error("failed to retrieve contracts: {0}")]
    Retrieval(#[source] HandlerError),
}

/// Supplies an ordered collection of contracts for a provider.
pub trait ContractSource {
    /// Registry name of this source kind, e.g. `"pact-broker"`.
    fn name(&self) -> &'static str;

    /// Record the provider whose contracts should be retrieved.
    fn set_provider(&mut self, provider: &str);

    /// Apply external configuration. Errors are raised here, before any
    /// retrieval is attempted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when a recognized key is absent or
    /// holds a value of the wrong type.
    fn configure(&mut self, config: &ConfigMap) -> Result<(), ConfigurationError>;

    /// Retrieve the contracts, in source order.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the source is unconfigured or retrieval
    /// fails.
    fn retrieve(&mut self) -> Result<Vec<Contract>, SourceError>;
}

/// A named factory for a contract source kind.
///
/// Adapter crates submit one of these with `inventory::submit!` so callers
/// can instantiate a source by name without depending on the adapter
/// directly.
pub struct SourceLoader {
    /// Registry name the factory answers to.
    pub name: &'static str,
    /// Builds an unconfigured source instance.
    pub build: fn() -> Box<dyn ContractSource>,
}

inventory::collect!(SourceLoader);

/// Instantiate the registered contract source with the given name.
#[must_use]
pub fn source_for(name: &str) -> Option<Box<dyn ContractSource>> {
    inventory::iter::<SourceLoader>
        .into_iter()
        .find(|loader| loader.name == name)
        .map(|loader| (loader.build)())
}
