//! Behavioural tests for pre-run validation and its gating of execution.

mod common;

use common::{InMemorySource, SingleTarget};
use veripact::{
    Contract, Interaction, StateContext, VIOLATION_SEPARATOR, VerifierDef, VerifyError, verify,
};

#[test]
fn duplicate_interaction_slots_block_every_execution() {
    let ctx = StateContext::default();
    let def = VerifierDef::builder("order-service")
        .target_slot()
        .current_interaction_slot()
        .current_interaction_slot()
        .build();

    let mut source = InMemorySource::new(vec![Contract::new(
        "web-ui",
        vec![Interaction::new("list orders")],
    )]);
    let mut targets = SingleTarget::default();

    let Err(VerifyError::Validation(report)) =
        verify(&def, &mut source, &mut targets, &ctx, |target, _slots| {
            target.execute()
        })
    else {
        panic!("expected a validation failure");
    };

    assert_eq!(report.len(), 1);
    assert!(
        report
            .to_string()
            .contains("Only one current-interaction slot may be declared")
    );
    assert_eq!(source.retrievals, 0, "validation precedes retrieval");
    assert_eq!(targets.target.executions, 0);
}

#[test]
fn aggregate_failure_reports_every_violation_at_once() {
    let ctx = StateContext::default();
    let def = VerifierDef::builder("order-service")
        .current_consumer_slot()
        .current_consumer_slot()
        .current_interaction_slot()
        .current_interaction_slot()
        .build();

    let mut source = InMemorySource::new(Vec::new());
    let mut targets = SingleTarget::default();

    let Err(VerifyError::Validation(report)) =
        verify(&def, &mut source, &mut targets, &ctx, |target, _slots| {
            target.execute()
        })
    else {
        panic!("expected a validation failure");
    };

    assert_eq!(report.len(), 3);
    let message = report.to_string();
    assert!(message.contains("none was found"));
    assert!(message.contains("Only one current-consumer slot"));
    assert!(message.contains("Only one current-interaction slot"));
    assert_eq!(message.matches(VIOLATION_SEPARATOR).count(), 2);
}
