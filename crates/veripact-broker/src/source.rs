//! The broker-backed contract source and its client interface.

use veripact::{
    ConfigMap, ConfigurationError, Contract, ContractSource, HandlerError, SourceError,
    SourceLoader,
};

use crate::config::{BrokerAuth, BrokerConfig};

/// Registry name the broker source answers to.
pub const BROKER_SOURCE_NAME: &str = "pact-broker";

/// Transport-layer client the broker source delegates retrieval to.
///
/// Implementations own the HTTP conversation with the broker; the source
/// only decides what to ask for.
pub trait BrokerClient {
    /// Latest contracts recorded against `provider`, one batch per consumer.
    ///
    /// # Errors
    ///
    /// Returns the transport failure, propagated unchanged.
    fn consumer_contracts(
        &mut self,
        provider: &str,
        auth: Option<&BrokerAuth>,
    ) -> Result<Vec<Contract>, HandlerError>;

    /// Latest contracts recorded against `provider` under `tag`.
    ///
    /// # Errors
    ///
    /// Returns the transport failure, propagated unchanged.
    fn consumer_contracts_with_tag(
        &mut self,
        provider: &str,
        tag: &str,
        auth: Option<&BrokerAuth>,
    ) -> Result<Vec<Contract>, HandlerError>;
}

/// Contract source that downloads pacts from a broker.
///
/// With no tags configured it fetches the latest contract per consumer; with
/// tags it fetches per tag in declaration order and concatenates the results
/// in that order.
#[derive(Default)]
pub struct BrokerSource {
    provider: String,
    config: Option<BrokerConfig>,
    client: Option<Box<dyn BrokerClient>>,
}

impl BrokerSource {
    /// An unconfigured source; bind a client with
    /// [`with_client`](Self::with_client) before retrieval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the transport client used for retrieval.
    #[must_use]
    pub fn with_client(mut self, client: impl BrokerClient + 'static) -> Self {
        self.client = Some(Box::new(client));
        self
    }

    /// Supply pre-parsed configuration instead of calling
    /// [`configure`](ContractSource::configure).
    #[must_use]
    pub fn with_config(mut self, config: BrokerConfig) -> Self {
        self.config = Some(config);
        self
    }
}

impl ContractSource for BrokerSource {
    fn name(&self) -> &'static str {
        BROKER_SOURCE_NAME
    }

    fn set_provider(&mut self, provider: &str) {
        self.provider = provider.to_string();
    }

    fn configure(&mut self, config: &ConfigMap) -> Result<(), ConfigurationError> {
        self.config = Some(BrokerConfig::from_config(config)?);
        Ok(())
    }

    fn retrieve(&mut self) -> Result<Vec<Contract>, SourceError> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| ConfigurationError::Unconfigured {
                name: BROKER_SOURCE_NAME.to_string(),
            })?;
        let Some(client) = self.client.as_mut() else {
            return Err(SourceError::Retrieval(
                "no broker client bound; call BrokerSource::with_client".into(),
            ));
        };

        let auth = config.auth();
        if config.tags().is_empty() {
            log::debug!("retrieving latest contracts for provider '{}'", self.provider);
            return client
                .consumer_contracts(&self.provider, auth.as_ref())
                .map_err(SourceError::Retrieval);
        }

        let mut contracts = Vec::new();
        for tag in config.tags() {
            log::debug!(
                "retrieving contracts for provider '{}' tagged '{tag}'",
                self.provider
            );
            contracts.extend(
                client
                    .consumer_contracts_with_tag(&self.provider, tag, auth.as_ref())
                    .map_err(SourceError::Retrieval)?,
            );
        }
        Ok(contracts)
    }
}

fn build_broker_source() -> Box<dyn ContractSource> {
    Box::new(BrokerSource::new())
}

inventory::submit! {
    SourceLoader {
        name: BROKER_SOURCE_NAME,
        build: build_broker_source,
    }
}
