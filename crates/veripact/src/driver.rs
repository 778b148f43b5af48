//! Execution driver: validates the definition, then walks contracts and
//! interactions in strict program order, delegating one test execution per
//! interaction.
//!
//! Order per run: validation precedes any contract; consumer injection
//! precedes any interaction of that contract; state application precedes
//! context propagation; context propagation precedes test delegation. A
//! failure after validation aborts the remainder of the run.

use crate::context::{StateContext, VerifyContext};
use crate::definition::{HandlerError, VerifierDef};
use crate::errors::VerifyError;
use crate::resolve::apply_provider_states;
use crate::source::ContractSource;
use crate::target::{Target, TargetSource};
use crate::validate::validate;

/// Totals produced by a completed verification run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerifySummary {
    /// Number of contracts walked.
    pub contracts: usize,
    /// Number of delegated test executions, one per interaction.
    pub interactions: usize,
}

/// Run the full verification for `def`.
///
/// The test body receives the per-interaction target and the populated
/// context slots, and is delegated to exactly once per interaction; it
/// performs the actual HTTP exchange and assertion, entirely outside this
/// crate.
///
/// # Errors
///
/// Returns [`VerifyError::Validation`] (with every violation aggregated)
/// before any side effect when the definition is structurally invalid, and
/// otherwise propagates the first retrieval, binding, handler, or delegated
/// test failure, aborting the remaining interactions and contracts.
pub fn verify<F>(
    def: &VerifierDef,
    source: &mut dyn ContractSource,
    targets: &mut dyn TargetSource,
    ctx: &StateContext<'_>,
    mut test: F,
) -> Result<VerifySummary, VerifyError>
where
    F: FnMut(&mut dyn Target, &VerifyContext) -> Result<(), HandlerError>,
{
    let report = validate(def);
    if !report.is_empty() {
        return Err(VerifyError::Validation(report));
    }

    source.set_provider(def.provider());
    let contracts = source.retrieve()?;
    if contracts.is_empty() {
        log::warn!(
            "no contracts retrieved for provider '{}'; nothing to verify",
            def.provider()
        );
    }

    let mut summary = VerifySummary::default();
    let mut slots = VerifyContext::default();
    for contract in &contracts {
        if def.wants_consumer() {
            slots.set_consumer(contract.consumer().clone());
        }

        for interaction in contract.interactions() {
            apply_provider_states(def, interaction, ctx)?;

            let target = targets.target();
            if let Some(aware) = target.definition_aware() {
                aware.set_definition(def);
            }
            if let Some(aware) = target.interaction_aware() {
                aware.set_interaction(contract.consumer(), interaction);
            }

            if def.wants_interaction() {
                slots.set_interaction(interaction.clone());
            }

            test(target, &slots).map_err(|source| VerifyError::Execution {
                interaction: interaction.description().to_string(),
                source,
            })?;
            summary.interactions += 1;
        }
        summary.contracts += 1;
    }
    Ok(summary)
}
