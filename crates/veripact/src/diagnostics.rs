//! Diagnostics-only definition dump.
//!
//! Serializes a verifier definition's registry for consumption by external
//! tooling. Kept behind the `diagnostics` feature so the engine itself never
//! depends on serialization derives.

use serde::Serialize;
use veripact_patterns::StatePattern;

use crate::definition::{ParamShape, ParamType, VerifierDef};

#[derive(Serialize)]
struct DumpedHandler {
    name: String,
    patterns: Vec<String>,
    shape: String,
    file: Option<&'static str>,
    line: Option<u32>,
}

#[derive(Serialize)]
struct DumpedFilter {
    name: String,
}

#[derive(Serialize)]
struct DefinitionDump {
    provider: String,
    handlers: Vec<DumpedHandler>,
    filters: Vec<DumpedFilter>,
    target_slots: usize,
    consumer_slots: usize,
    interaction_slots: usize,
}

fn shape_label(shape: &ParamShape) -> String {
    match shape {
        ParamShape::Nullary => "nullary".to_string(),
        ParamShape::ParamMap => "param-map".to_string(),
        ParamShape::Positional(types) => {
            let names: Vec<_> = types.iter().copied().map(ParamType::name).collect();
            format!("positional({})", names.join(", "))
        }
    }
}

/// Serialize the definition's registry to a JSON object.
///
/// Each handler entry records its name, declared patterns, parameter shape,
/// and declaration site when one was recorded.
///
/// # Errors
///
/// Returns an error if serialization fails.
///
/// # Examples
///
/// ```
/// use veripact::{VerifierDef, dump_definition};
///
/// let def = VerifierDef::builder("order-service").target_slot().build();
/// let json = match dump_definition(&def) {
///     Ok(json) => json,
///     Err(err) => panic!("definition dumps are serializable: {err}"),
/// };
/// assert!(json.contains("order-service"));
/// ```
pub fn dump_definition(def: &VerifierDef) -> serde_json::Result<String> {
    let handlers = def
        .state_handlers()
        .iter()
        .map(|handler| DumpedHandler {
            name: handler.name().to_string(),
            patterns: handler
                .patterns()
                .iter()
                .map(|pattern: &StatePattern| pattern.as_str().to_string())
                .collect(),
            shape: shape_label(handler.shape()),
            file: handler.location().map(|(file, _)| file),
            line: handler.location().map(|(_, line)| line),
        })
        .collect();

    let filters = def
        .request_filters()
        .iter()
        .map(|filter| DumpedFilter {
            name: filter.name().to_string(),
        })
        .collect();

    serde_json::to_string(&DefinitionDump {
        provider: def.provider().to_string(),
        handlers,
        filters,
        target_slots: def.target_slots(),
        consumer_slots: def.consumer_slots(),
        interaction_slots: def.interaction_slots(),
    })
}
