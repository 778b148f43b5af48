//! Shared in-memory collaborators for behavioural tests.

use veripact::{
    ConfigMap, ConfigurationError, Consumer, Contract, ContractSource, DefinitionAware,
    HandlerError, Interaction, InteractionAware, SourceError, Target, TargetSource, VerifierDef,
};

/// Contract source serving a fixed collection, counting retrievals.
#[derive(Default)]
pub struct InMemorySource {
    contracts: Vec<Contract>,
    /// Number of times `retrieve` was called.
    pub retrievals: usize,
}

impl InMemorySource {
    pub fn new(contracts: Vec<Contract>) -> Self {
        Self {
            contracts,
            retrievals: 0,
        }
    }
}

impl ContractSource for InMemorySource {
    fn name(&self) -> &'static str {
        "in-memory"
    }

    fn set_provider(&mut self, _provider: &str) {}

    fn configure(&mut self, _config: &ConfigMap) -> Result<(), ConfigurationError> {
        Ok(())
    }

    fn retrieve(&mut self) -> Result<Vec<Contract>, SourceError> {
        self.retrievals += 1;
        Ok(self.contracts.clone())
    }
}

/// Transport stand-in that records every piece of context it is given.
#[derive(Default)]
pub struct RecordingTarget {
    /// Number of completed `execute` calls.
    pub executions: usize,
    /// Provider name from the last `set_definition` call.
    pub definition_provider: Option<String>,
    /// `(consumer, interaction description)` pairs, in propagation order.
    pub interactions_seen: Vec<(String, String)>,
}

impl Target for RecordingTarget {
    fn execute(&mut self) -> Result<(), HandlerError> {
        self.executions += 1;
        Ok(())
    }

    fn definition_aware(&mut self) -> Option<&mut dyn DefinitionAware> {
        Some(self)
    }

    fn interaction_aware(&mut self) -> Option<&mut dyn InteractionAware> {
        Some(self)
    }
}

impl DefinitionAware for RecordingTarget {
    fn set_definition(&mut self, def: &VerifierDef) {
        self.definition_provider = Some(def.provider().to_string());
    }
}

impl InteractionAware for RecordingTarget {
    fn set_interaction(&mut self, consumer: &Consumer, interaction: &Interaction) {
        self.interactions_seen.push((
            consumer.name().to_string(),
            interaction.description().to_string(),
        ));
    }
}

/// Target source handing out the same recording target, counting fetches.
#[derive(Default)]
pub struct SingleTarget {
    /// The shared target instance.
    pub target: RecordingTarget,
    /// Number of times the driver fetched the target.
    pub fetches: usize,
}

impl TargetSource for SingleTarget {
    fn target(&mut self) -> &mut dyn Target {
        self.fetches += 1;
        &mut self.target
    }
}
