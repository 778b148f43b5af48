//! Contract data model: consumers, interactions, and provider states.
//!
//! Contract documents are produced by an external source and are read-only
//! for the remainder of a run. Parsing wire formats is the source's business;
//! this module only models the shapes the engine walks.

use derive_more::{Deref, From};
use serde_json::{Map, Value};

/// Parameter map attached to a provider state.
///
/// Values are strings, numbers, or nested structures; keys are unique. Map
/// keys preserve the order the source produced.
pub type StateParams = Map<String, Value>;

/// Consumer identity recorded in a contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, From)]
pub struct Consumer(String);

impl Consumer {
    /// Consumer name as recorded in the contract document.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Consumer {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// A named precondition the provider must be placed into before an
/// interaction's request is sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderState {
    name: String,
    params: StateParams,
}

impl ProviderState {
    /// A provider state with no parameters.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: StateParams::new(),
        }
    }

    /// A provider state carrying a parameter map.
    #[must_use]
    pub fn with_params(name: impl Into<String>, params: StateParams) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    /// The state name consumers declared.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw parameter map, exactly as the source produced it.
    #[must_use]
    pub fn params(&self) -> &StateParams {
        &self.params
    }
}

/// One request/response exchange plus the provider states required before it.
///
/// The request and response payloads are opaque to the engine; only the
/// transport target interprets them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Interaction {
    description: String,
    provider_states: Vec<ProviderState>,
    request: Value,
    response: Value,
}

impl Interaction {
    /// An interaction with no provider states and empty payloads.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            provider_states: Vec::new(),
            request: Value::Null,
            response: Value::Null,
        }
    }

    /// An interaction requiring the given provider states, in order.
    #[must_use]
    pub fn with_states(
        description: impl Into<String>,
        provider_states: Vec<ProviderState>,
    ) -> Self {
        Self {
            provider_states,
            ..Self::new(description)
        }
    }

    /// Attach the opaque request and response payloads.
    #[must_use]
    pub fn with_exchange(mut self, request: Value, response: Value) -> Self {
        self.request = request;
        self.response = response;
        self
    }

    /// Human-readable description of the exchange.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Provider states to apply, in declaration order.
    #[must_use]
    pub fn provider_states(&self) -> &[ProviderState] {
        &self.provider_states
    }

    /// The opaque request payload.
    #[must_use]
    pub fn request(&self) -> &Value {
        &self.request
    }

    /// The opaque response payload.
    #[must_use]
    pub fn response(&self) -> &Value {
        &self.response
    }
}

/// A recorded set of interactions a consumer expects from a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Contract {
    consumer: Consumer,
    interactions: Vec<Interaction>,
}

impl Contract {
    /// A contract for `consumer` with its ordered interactions.
    #[must_use]
    pub fn new(consumer: impl Into<Consumer>, interactions: Vec<Interaction>) -> Self {
        Self {
            consumer: consumer.into(),
            interactions,
        }
    }

    /// The consumer that recorded this contract.
    #[must_use]
    pub fn consumer(&self) -> &Consumer {
        &self.consumer
    }

    /// The recorded interactions, in order.
    #[must_use]
    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }
}

/// Minimal view of the HTTP request a target is about to replay.
///
/// The transport layer owns the actual exchange; request filters mutate this
/// view before the request is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderRequest {
    /// HTTP method, upper case.
    pub method: String,
    /// Request path.
    pub path: String,
    /// Raw query string, when present.
    pub query: Option<String>,
    /// Header name/value pairs, in send order.
    pub headers: Vec<(String, String)>,
    /// Request body, when present.
    pub body: Option<String>,
}
