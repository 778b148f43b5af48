//! Behavioural tests for the execution driver's contract/interaction walk.

mod common;

use std::cell::RefCell;

use common::{InMemorySource, RecordingTarget, SingleTarget};
use veripact::{
    Contract, HandlerError, Interaction, ParamShape, ProviderState, StateArgs, StateContext,
    Target, VerifierDef, VerifyError, state_handler, verify,
};

fn tick(ctx: &StateContext<'_>, _args: StateArgs<'_>) -> Result<(), HandlerError> {
    let Some(count) = ctx.get::<RefCell<usize>>("handled") else {
        return Err("handled entry missing from the state context".into());
    };
    *count.borrow_mut() += 1;
    Ok(())
}

fn failing(_ctx: &StateContext<'_>, _args: StateArgs<'_>) -> Result<(), HandlerError> {
    Err("setup failed".into())
}

fn run_target(target: &mut dyn Target) -> Result<(), HandlerError> {
    target.execute()
}

#[test]
fn delegates_once_per_interaction_without_states() {
    let handled = RefCell::new(0_usize);
    let mut ctx = StateContext::default();
    ctx.insert("handled", &handled);

    let builder = VerifierDef::builder("order-service").target_slot();
    let def = state_handler!(
        builder,
        "unused",
        ["never declared by a consumer"],
        ParamShape::Nullary,
        tick,
    )
    .build();

    let mut source = InMemorySource::new(vec![Contract::new(
        "web-ui",
        vec![Interaction::new("list orders"), Interaction::new("get order")],
    )]);
    let mut targets = SingleTarget::default();

    let summary = match verify(&def, &mut source, &mut targets, &ctx, |target, _slots| {
        run_target(target)
    }) {
        Ok(summary) => summary,
        Err(err) => panic!("run should succeed: {err}"),
    };

    assert_eq!(summary.contracts, 1);
    assert_eq!(summary.interactions, 2);
    assert_eq!(targets.target.executions, 2);
    assert_eq!(targets.fetches, 2, "target is fetched fresh per interaction");
    assert_eq!(*handled.borrow(), 0, "no state handler may run");
}

#[test]
fn populates_declared_context_slots() {
    let ctx = StateContext::default();
    let def = VerifierDef::builder("order-service")
        .target_slot()
        .current_consumer_slot()
        .current_interaction_slot()
        .build();

    let mut source = InMemorySource::new(vec![
        Contract::new("web-ui", vec![Interaction::new("list orders")]),
        Contract::new("mobile-app", vec![Interaction::new("get order")]),
    ]);
    let mut targets = SingleTarget::default();

    let observed = RefCell::new(Vec::new());
    let summary = match verify(&def, &mut source, &mut targets, &ctx, |target, slots| {
        let consumer = slots.consumer().map(|c| c.name().to_string());
        let interaction = slots.interaction().map(|i| i.description().to_string());
        observed.borrow_mut().push((consumer, interaction));
        target.execute()
    }) {
        Ok(summary) => summary,
        Err(err) => panic!("run should succeed: {err}"),
    };

    assert_eq!(summary.contracts, 2);
    assert_eq!(
        *observed.borrow(),
        [
            (Some("web-ui".into()), Some("list orders".into())),
            (Some("mobile-app".into()), Some("get order".into())),
        ]
    );
}

#[test]
fn undeclared_context_slots_stay_empty() {
    let ctx = StateContext::default();
    let def = VerifierDef::builder("order-service").target_slot().build();

    let mut source = InMemorySource::new(vec![Contract::new(
        "web-ui",
        vec![Interaction::new("list orders")],
    )]);
    let mut targets = SingleTarget::default();

    let result = verify(&def, &mut source, &mut targets, &ctx, |target, slots| {
        assert!(slots.consumer().is_none());
        assert!(slots.interaction().is_none());
        target.execute()
    });
    assert!(result.is_ok(), "run should succeed: {result:?}");
}

#[test]
fn propagates_definition_and_interaction_to_aware_targets() {
    let ctx = StateContext::default();
    let def = VerifierDef::builder("order-service").target_slot().build();

    let mut source = InMemorySource::new(vec![Contract::new(
        "web-ui",
        vec![Interaction::new("list orders"), Interaction::new("get order")],
    )]);
    let mut targets = SingleTarget::default();

    let result = verify(&def, &mut source, &mut targets, &ctx, |target, _slots| {
        target.execute()
    });
    assert!(result.is_ok(), "run should succeed: {result:?}");

    let RecordingTarget {
        definition_provider,
        interactions_seen,
        ..
    } = &targets.target;
    assert_eq!(definition_provider.as_deref(), Some("order-service"));
    assert_eq!(
        *interactions_seen,
        [
            ("web-ui".to_string(), "list orders".to_string()),
            ("web-ui".to_string(), "get order".to_string()),
        ]
    );
}

#[test]
fn state_handler_failure_aborts_the_run() {
    let ctx = StateContext::default();
    let builder = VerifierDef::builder("order-service").target_slot();
    let def = state_handler!(
        builder,
        "broken setup",
        ["database is seeded"],
        ParamShape::Nullary,
        failing,
    )
    .build();

    let mut source = InMemorySource::new(vec![Contract::new(
        "web-ui",
        vec![
            Interaction::with_states(
                "seeded lookup",
                vec![ProviderState::new("database is seeded")],
            ),
            Interaction::new("second interaction"),
        ],
    )]);
    let mut targets = SingleTarget::default();

    let Err(VerifyError::StateHandler { handler, .. }) =
        verify(&def, &mut source, &mut targets, &ctx, |target, _slots| {
            target.execute()
        })
    else {
        panic!("expected the state handler failure to propagate");
    };
    assert_eq!(handler, "broken setup");
    assert_eq!(
        targets.target.executions, 0,
        "no delegation may happen after a state failure"
    );
}

#[test]
fn delegated_test_failure_aborts_remaining_interactions() {
    let ctx = StateContext::default();
    let def = VerifierDef::builder("order-service").target_slot().build();

    let mut source = InMemorySource::new(vec![Contract::new(
        "web-ui",
        vec![Interaction::new("first"), Interaction::new("second")],
    )]);
    let mut targets = SingleTarget::default();

    let mut attempts = 0_usize;
    let Err(VerifyError::Execution { interaction, source: cause }) =
        verify(&def, &mut source, &mut targets, &ctx, |_target, _slots| {
            attempts += 1;
            Err("response mismatch".into())
        })
    else {
        panic!("expected the delegated failure to propagate");
    };
    assert_eq!(interaction, "first");
    assert_eq!(cause.to_string(), "response mismatch");
    assert_eq!(attempts, 1, "the second interaction must not run");
}

#[test]
fn empty_retrieval_completes_with_nothing_verified() {
    let ctx = StateContext::default();
    let def = VerifierDef::builder("order-service").target_slot().build();

    let mut source = InMemorySource::new(Vec::new());
    let mut targets = SingleTarget::default();

    let summary = match verify(&def, &mut source, &mut targets, &ctx, |target, _slots| {
        target.execute()
    }) {
        Ok(summary) => summary,
        Err(err) => panic!("an empty retrieval is not an error: {err}"),
    };
    assert_eq!(summary.contracts, 0);
    assert_eq!(summary.interactions, 0);
    assert_eq!(targets.fetches, 0);
}
