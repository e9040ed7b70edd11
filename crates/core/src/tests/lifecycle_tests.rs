// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lifecycle operations on stored salary records.

use crate::{
    EngineError, InMemoryStore, SalaryRecordStore, add_adjustment, approve_record, cancel_record,
    mark_record_paid,
};
use payroll_audit::AuditEvent;
use payroll_domain::{
    AdjustmentKind, DomainError, ManualAdjustment, SalaryRecord, SalaryStatus,
};
use rust_decimal_macros::dec;

use super::helpers::{
    calculated_record, create_test_actor, create_test_cause, create_test_dataset, emp,
    january_2026,
};

fn stored_calculated_record() -> InMemoryStore {
    let mut store: InMemoryStore = InMemoryStore::new();
    calculated_record(&create_test_dataset(), &mut store);
    store
}

#[test]
fn test_full_lifecycle_produces_one_event_per_transition() {
    let mut store: InMemoryStore = stored_calculated_record();

    let approved: SalaryRecord = approve_record(
        &mut store,
        &emp("EMP001"),
        january_2026(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    assert_eq!(approved.status, SalaryStatus::Approved);

    let paid: SalaryRecord = mark_record_paid(
        &mut store,
        &emp("EMP001"),
        january_2026(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    assert_eq!(paid.status, SalaryStatus::Paid);

    let events: Vec<AuditEvent> = store.audit_events(&emp("EMP001"), january_2026()).unwrap();
    let names: Vec<&str> = events.iter().map(|e| e.action.name.as_str()).collect();
    assert_eq!(names, vec!["Calculate", "Approve", "MarkPaid"]);
}

#[test]
fn test_lifecycle_on_missing_record() {
    let mut store: InMemoryStore = InMemoryStore::new();

    let err: EngineError = approve_record(
        &mut store,
        &emp("EMP001"),
        january_2026(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap_err();

    assert!(matches!(err, EngineError::RecordNotFound { .. }));
}

#[test]
fn test_cannot_pay_unapproved_record() {
    let mut store: InMemoryStore = stored_calculated_record();

    let err: EngineError = mark_record_paid(
        &mut store,
        &emp("EMP001"),
        january_2026(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        EngineError::InvalidTransition {
            source: DomainError::InvalidStatusTransition { .. },
            ..
        }
    ));
    assert_eq!(
        store
            .audit_events(&emp("EMP001"), january_2026())
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_paid_record_rejects_cancel_and_adjustment() {
    let mut store: InMemoryStore = stored_calculated_record();
    approve_record(
        &mut store,
        &emp("EMP001"),
        january_2026(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    mark_record_paid(
        &mut store,
        &emp("EMP001"),
        january_2026(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    let cancel: EngineError = cancel_record(
        &mut store,
        &emp("EMP001"),
        january_2026(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap_err();
    assert!(matches!(cancel, EngineError::InvalidTransition { .. }));

    let adjustment: ManualAdjustment =
        ManualAdjustment::new("Late bonus", dec!(100), AdjustmentKind::Addition).unwrap();
    let adjust: EngineError = add_adjustment(
        &mut store,
        &emp("EMP001"),
        january_2026(),
        adjustment,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap_err();
    assert!(matches!(
        adjust,
        EngineError::InvalidTransition {
            source: DomainError::InvalidAdjustment(_),
            ..
        }
    ));
}

#[test]
fn test_approved_record_accepts_adjustment() {
    let mut store: InMemoryStore = stored_calculated_record();
    approve_record(
        &mut store,
        &emp("EMP001"),
        january_2026(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    let record: SalaryRecord = add_adjustment(
        &mut store,
        &emp("EMP001"),
        january_2026(),
        ManualAdjustment::new("Uniform", dec!(250), AdjustmentKind::Deduction).unwrap(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(record.status, SalaryStatus::Approved);
    assert_eq!(record.total_deductions, dec!(250));
    assert_eq!(record.net_payable, dec!(24750));
}

#[test]
fn test_cancelled_record_is_terminal() {
    let mut store: InMemoryStore = stored_calculated_record();
    let cancelled: SalaryRecord = cancel_record(
        &mut store,
        &emp("EMP001"),
        january_2026(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    assert_eq!(cancelled.status, SalaryStatus::Cancelled);

    let err: EngineError = approve_record(
        &mut store,
        &emp("EMP001"),
        january_2026(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap_err();
    assert!(matches!(err, EngineError::InvalidTransition { .. }));
}
