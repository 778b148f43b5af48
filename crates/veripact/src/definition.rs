//! Verifier definitions: the explicit registry of state handlers, request
//! filters, and context slots a provider verification run consumes.
//!
//! Registration order is discovery order. Handlers are matched and invoked in
//! the order they were added to the builder, so shared handlers belonging to
//! a common base definition should be registered before the specialised
//! ones. A definition is assembled once and read-only thereafter.

use veripact_patterns::StatePattern;

use crate::binding::StateArgs;
use crate::context::StateContext;
use crate::model::ProviderRequest;

/// Error type state handlers and delegated test bodies may fail with.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Function invoked to put the provider into a declared state.
pub type StateHandlerFn = fn(&StateContext<'_>, StateArgs<'_>) -> Result<(), HandlerError>;

/// Function applied to the outgoing provider request before replay.
pub type RequestFilterFn = fn(&mut ProviderRequest);

/// Declared type of one positional handler parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// Pass the captured token through unchanged.
    Str,
    /// Parse the token as `i32`.
    Int,
    /// Parse the token as `i64`.
    Long,
    /// Parse the token as `f32`.
    Float,
    /// Parse the token as `f64`.
    Double,
    /// Split the token on commas into trimmed, non-empty strings.
    StringList,
    /// A type the binder does not support; binding always fails, naming it.
    Other(&'static str),
}

impl ParamType {
    /// Name used in diagnostics and conversion errors.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Str => "string",
            Self::Int => "i32",
            Self::Long => "i64",
            Self::Float => "f32",
            Self::Double => "f64",
            Self::StringList => "string list",
            Self::Other(name) => name,
        }
    }
}

/// Parameter shape a state handler declares, selecting its binding mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamShape {
    /// The handler takes no arguments.
    Nullary,
    /// The handler takes the provider state's parameter map, passed as-is.
    ParamMap,
    /// The handler takes positional parameters bound from regex capture
    /// groups, in declaration order.
    Positional(Vec<ParamType>),
}

/// A registered state handler: its patterns, declared parameter shape, and
/// the function to invoke.
#[derive(Debug)]
pub struct StateHandlerDescriptor {
    name: String,
    patterns: Vec<StatePattern>,
    shape: ParamShape,
    run: StateHandlerFn,
    declared_at: Option<(&'static str, u32)>,
}

impl StateHandlerDescriptor {
    /// Describe a handler. Patterns are kept in declaration order.
    #[must_use]
    pub fn new<P>(
        name: impl Into<String>,
        patterns: impl IntoIterator<Item = P>,
        shape: ParamShape,
        run: StateHandlerFn,
    ) -> Self
    where
        P: Into<StatePattern>,
    {
        Self {
            name: name.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
            shape,
            run,
            declared_at: None,
        }
    }

    /// Record the source location of the declaration, for diagnostics.
    #[must_use]
    pub fn declared_at(mut self, file: &'static str, line: u32) -> Self {
        self.declared_at = Some((file, line));
        self
    }

    /// Handler name used in diagnostics and error messages.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared patterns, in declaration order.
    #[must_use]
    pub fn patterns(&self) -> &[StatePattern] {
        &self.patterns
    }

    /// Declared parameter shape.
    #[must_use]
    pub fn shape(&self) -> &ParamShape {
        &self.shape
    }

    /// The handler function.
    #[must_use]
    pub fn run(&self) -> StateHandlerFn {
        self.run
    }

    /// Source location of the declaration, when recorded.
    #[must_use]
    pub fn location(&self) -> Option<(&'static str, u32)> {
        self.declared_at
    }
}

/// A registered request filter, applied by targets before replaying a
/// request.
#[derive(Debug)]
pub struct RequestFilterDescriptor {
    name: String,
    apply: RequestFilterFn,
}

impl RequestFilterDescriptor {
    /// Describe a filter by name.
    #[must_use]
    pub fn new(name: impl Into<String>, apply: RequestFilterFn) -> Self {
        Self {
            name: name.into(),
            apply,
        }
    }

    /// Filter name used in diagnostics and validation messages.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply the filter to an outgoing request.
    pub fn apply(&self, request: &mut ProviderRequest) {
        (self.apply)(request);
    }
}

/// A verifier definition: everything the execution driver needs to know
/// about one provider verification suite.
#[derive(Debug)]
pub struct VerifierDef {
    provider: String,
    handlers: Vec<StateHandlerDescriptor>,
    filters: Vec<RequestFilterDescriptor>,
    target_slots: usize,
    consumer_slots: usize,
    interaction_slots: usize,
}

impl VerifierDef {
    /// Start assembling a definition for `provider`.
    #[must_use]
    pub fn builder(provider: impl Into<String>) -> VerifierDefBuilder {
        VerifierDefBuilder {
            provider: provider.into(),
            handlers: Vec::new(),
            filters: Vec::new(),
            target_slots: 0,
            consumer_slots: 0,
            interaction_slots: 0,
        }
    }

    /// The provider under verification.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Registered state handlers, in registration order.
    #[must_use]
    pub fn state_handlers(&self) -> &[StateHandlerDescriptor] {
        &self.handlers
    }

    /// Registered request filters, in registration order. Targets apply
    /// these to each outgoing request; the engine only validates and carries
    /// them.
    #[must_use]
    pub fn request_filters(&self) -> &[RequestFilterDescriptor] {
        &self.filters
    }

    /// Whether a current-consumer slot was declared.
    #[must_use]
    pub fn wants_consumer(&self) -> bool {
        self.consumer_slots > 0
    }

    /// Whether a current-interaction slot was declared.
    #[must_use]
    pub fn wants_interaction(&self) -> bool {
        self.interaction_slots > 0
    }

    pub(crate) fn target_slots(&self) -> usize {
        self.target_slots
    }

    pub(crate) fn consumer_slots(&self) -> usize {
        self.consumer_slots
    }

    pub(crate) fn interaction_slots(&self) -> usize {
        self.interaction_slots
    }
}

/// Builder assembling a [`VerifierDef`] in registration order.
///
/// The builder never rejects anything; structural rules are checked by
/// [`validate`](crate::validate) so that every defect of a definition is
/// reported at once.
#[derive(Debug)]
pub struct VerifierDefBuilder {
    provider: String,
    handlers: Vec<StateHandlerDescriptor>,
    filters: Vec<RequestFilterDescriptor>,
    target_slots: usize,
    consumer_slots: usize,
    interaction_slots: usize,
}

impl VerifierDefBuilder {
    /// Register a state handler. Handlers are matched and invoked in
    /// registration order.
    #[must_use]
    pub fn state_handler(mut self, handler: StateHandlerDescriptor) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Register a request filter.
    #[must_use]
    pub fn request_filter(mut self, filter: RequestFilterDescriptor) -> Self {
        self.filters.push(filter);
        self
    }

    /// Declare the externally supplied target slot. Exactly one must be
    /// declared for the definition to validate.
    #[must_use]
    pub fn target_slot(mut self) -> Self {
        self.target_slots += 1;
        self
    }

    /// Declare the current-consumer slot. At most one may be declared.
    #[must_use]
    pub fn current_consumer_slot(mut self) -> Self {
        self.consumer_slots += 1;
        self
    }

    /// Declare the current-interaction slot. At most one may be declared.
    #[must_use]
    pub fn current_interaction_slot(mut self) -> Self {
        self.interaction_slots += 1;
        self
    }

    /// Finish assembly. The result is read-only.
    #[must_use]
    pub fn build(self) -> VerifierDef {
        VerifierDef {
            provider: self.provider,
            handlers: self.handlers,
            filters: self.filters,
            target_slots: self.target_slots,
            consumer_slots: self.consumer_slots,
            interaction_slots: self.interaction_slots,
        }
    }
}

/// Register a state handler on a builder, capturing the declaration site.
///
/// # Examples
///
/// ```
/// use veripact::{ParamShape, ParamType, StateArgs, StateContext, VerifierDef, state_handler};
///
/// fn order_exists(
///     _ctx: &StateContext<'_>,
///     _args: StateArgs<'_>,
/// ) -> Result<(), veripact::HandlerError> {
///     Ok(())
/// }
///
/// let builder = VerifierDef::builder("order-service").target_slot();
/// let def = state_handler!(
///     builder,
///     "order exists",
///     [r"order (\d+) exists"],
///     ParamShape::Positional(vec![ParamType::Int]),
///     order_exists,
/// )
/// .build();
/// assert_eq!(def.state_handlers().len(), 1);
/// ```
#[macro_export]
macro_rules! state_handler {
    ($builder:expr, $name:expr, [$($pattern:expr),+ $(,)?], $shape:expr, $run:path $(,)?) => {
        $builder.state_handler(
            $crate::StateHandlerDescriptor::new($name, [$($pattern),+], $shape, $run)
                .declared_at(file!(), line!()),
        )
    };
}
