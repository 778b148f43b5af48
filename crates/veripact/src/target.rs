//! Target collaborators: the transport-layer objects that replay provider
//! requests and assert responses.
//!
//! The actual HTTP exchange lives entirely outside this crate. The driver
//! only propagates context through the optional capability accessors before
//! delegating to the test body.

use crate::definition::{HandlerError, VerifierDef};
use crate::model::{Consumer, Interaction};

/// Consumes the verifier definition before an interaction is replayed.
///
/// Targets use the definition to apply its request filters to the outgoing
/// exchange.
pub trait DefinitionAware {
    /// Supply the definition whose request filters apply to the exchange.
    fn set_definition(&mut self, def: &VerifierDef);
}

/// Consumes the consumer identity and interaction before replay.
pub trait InteractionAware {
    /// Supply the consumer and interaction about to be replayed.
    fn set_interaction(&mut self, consumer: &Consumer, interaction: &Interaction);
}

/// Executes the provider-side request and asserts the response.
pub trait Target {
    /// Replay the current interaction against the provider and assert the
    /// recorded response.
    ///
    /// # Errors
    ///
    /// Returns the transport or assertion failure, propagated unchanged.
    fn execute(&mut self) -> Result<(), HandlerError>;

    /// Capability check: definition awareness.
    fn definition_aware(&mut self) -> Option<&mut dyn DefinitionAware> {
        None
    }

    /// Capability check: interaction awareness.
    fn interaction_aware(&mut self) -> Option<&mut dyn InteractionAware> {
        None
    }
}

/// Yields the current target instance, fetched fresh per interaction so the
/// environment may reconfigure it between interactions.
pub trait TargetSource {
    /// The target to use for the next interaction.
    fn target(&mut self) -> &mut dyn Target;
}
