//! Provider state resolution: selecting and invoking the handlers that apply
//! to each provider state of an interaction.
//!
//! Every matching handler is invoked, not just the first — a provider state
//! may be the simultaneous concern of several independent handlers. Binding
//! failures surface before any invocation of the affected handler.

use veripact_patterns::{ExtractionError, extract_positional, matches_any};

use crate::binding::{BindingError, StateArgs, bind_all};
use crate::context::StateContext;
use crate::definition::{ParamShape, StateHandlerDescriptor, VerifierDef};
use crate::errors::VerifyError;
use crate::model::{Interaction, ProviderState};

/// Apply every provider state of `interaction`, in declaration order.
///
/// # Errors
///
/// Propagates the first binding or handler failure; later states of the
/// interaction are not applied.
pub fn apply_provider_states(
    def: &VerifierDef,
    interaction: &Interaction,
    ctx: &StateContext<'_>,
) -> Result<(), VerifyError> {
    for state in interaction.provider_states() {
        apply_state(def, state, ctx)?;
    }
    Ok(())
}

fn apply_state(
    def: &VerifierDef,
    state: &ProviderState,
    ctx: &StateContext<'_>,
) -> Result<(), VerifyError> {
    let mut matched = false;
    for handler in def.state_handlers() {
        if !matches_any(handler.patterns(), state.name()) {
            continue;
        }
        matched = true;
        let args = bind_arguments(handler, state)?;
        log::debug!(
            "invoking state handler '{}' for provider state '{}'",
            handler.name(),
            state.name()
        );
        (handler.run())(ctx, args).map_err(|source| VerifyError::StateHandler {
            handler: handler.name().to_string(),
            state: state.name().to_string(),
            source,
        })?;
    }
    if !matched {
        log::warn!("no state handler matches provider state '{}'", state.name());
    }
    Ok(())
}

fn bind_arguments<'s>(
    handler: &StateHandlerDescriptor,
    state: &'s ProviderState,
) -> Result<StateArgs<'s>, VerifyError> {
    match handler.shape() {
        ParamShape::Nullary => Ok(StateArgs::None),
        ParamShape::ParamMap => Ok(StateArgs::Map(state.params())),
        ParamShape::Positional(types) => {
            let tokens = extract_positional(handler.patterns(), state.name(), types.len())
                .map_err(|err| count_mismatch(handler, types.len(), err))?;
            Ok(StateArgs::Positional(bind_all(types, &tokens)?))
        }
    }
}

/// Both extraction failure modes funnel into [`BindingError::ArgumentCountMismatch`]:
/// a handler selected by a literal (non-capturing) pattern reports that
/// pattern with zero captures.
fn count_mismatch(
    handler: &StateHandlerDescriptor,
    expected: usize,
    err: ExtractionError,
) -> VerifyError {
    let binding = match err {
        ExtractionError::CaptureCountMismatch {
            state,
            pattern,
            expected,
            actual,
        } => BindingError::ArgumentCountMismatch {
            state,
            pattern,
            expected,
            actual,
        },
        ExtractionError::NoCapturingMatch { state } => {
            let pattern = handler
                .patterns()
                .iter()
                .find(|pattern| pattern.matches(&state))
                .map_or_else(
                    || "<no declared pattern>".to_string(),
                    |pattern| pattern.as_str().to_string(),
                );
            BindingError::ArgumentCountMismatch {
                state,
                pattern,
                expected,
                actual: 0,
            }
        }
    };
    VerifyError::Binding(binding)
}
