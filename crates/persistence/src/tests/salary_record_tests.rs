// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use payroll::{
    BulkReport, EngineError, PayrollDataset, SalaryRecordStore, approve_record, calculate_all,
    compute_salary_record,
};
use payroll_domain::{MonthlySummary, SalaryRecord, SalaryStatus};
use rust_decimal_macros::dec;

use super::{
    create_test_actor, create_test_cause, create_test_dataset, create_test_options, emp,
    january_2026,
};

/// Runs a bulk calculation for January 2026 into the given store.
pub fn calculated_store(mut persistence: Persistence) -> Persistence {
    let report: BulkReport = calculate_all(
        &create_test_dataset(),
        &mut persistence,
        january_2026(),
        &create_test_options(),
    );
    assert_eq!(report.success, 2);
    persistence
}

#[test]
fn test_record_round_trips_through_json_column() {
    let dataset: PayrollDataset = create_test_dataset();
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let computed: SalaryRecord = compute_salary_record(
        &dataset,
        &mut persistence,
        &emp("EMP001"),
        1,
        2026,
        &create_test_options(),
    )
    .unwrap();

    let stored: SalaryRecord = persistence
        .get_salary_record(&emp("EMP001"), january_2026())
        .unwrap()
        .unwrap();
    assert_eq!(stored, computed);
    assert_eq!(stored.net_payable, dec!(25000));

    let summary: MonthlySummary = persistence
        .get_monthly_summary(&emp("EMP001"), january_2026())
        .unwrap()
        .unwrap();
    assert_eq!(Some(summary), computed.summary);
}

#[test]
fn test_recalculation_upserts_single_row() {
    let dataset: PayrollDataset = create_test_dataset();
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    for _ in 0..3 {
        compute_salary_record(
            &dataset,
            &mut persistence,
            &emp("EMP001"),
            1,
            2026,
            &create_test_options(),
        )
        .unwrap();
    }

    assert_eq!(persistence.list_salary_records(january_2026()).unwrap().len(), 1);
    assert_eq!(
        persistence
            .get_audit_events(&emp("EMP001"), january_2026())
            .unwrap()
            .len(),
        3
    );
}

#[test]
fn test_register_is_ordered_by_employee() {
    let mut persistence: Persistence = calculated_store(Persistence::new_in_memory().unwrap());

    let records: Vec<SalaryRecord> = persistence.records_for_period(january_2026()).unwrap();

    let ids: Vec<&str> = records.iter().map(|r| r.employee_id.value()).collect();
    assert_eq!(ids, vec!["EMP001", "EMP002"]);
    assert_eq!(records[1].net_payable, dec!(50000));
}

#[test]
fn test_locked_record_guard_with_sqlite_store() {
    let mut persistence: Persistence = calculated_store(Persistence::new_in_memory().unwrap());
    approve_record(
        &mut persistence,
        &emp("EMP001"),
        january_2026(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    let err: EngineError = compute_salary_record(
        &create_test_dataset(),
        &mut persistence,
        &emp("EMP001"),
        1,
        2026,
        &create_test_options(),
    )
    .unwrap_err();

    assert!(matches!(err, EngineError::LockedRecordConflict { .. }));
    let stored: SalaryRecord = persistence
        .get_salary_record(&emp("EMP001"), january_2026())
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, SalaryStatus::Approved);
}

#[test]
fn test_recalculation_replaces_summary_with_record() {
    use crate::diesel_schema::monthly_summaries;
    use diesel::prelude::*;
    use time::macros::date;

    let mut dataset: PayrollDataset = create_test_dataset();
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    compute_salary_record(
        &dataset,
        &mut persistence,
        &emp("EMP001"),
        1,
        2026,
        &create_test_options(),
    )
    .unwrap();

    dataset
        .attendance
        .retain(|r| !(r.employee_id == emp("EMP001") && r.date == date!(2026 - 01 - 05)));
    let recalculated: SalaryRecord = compute_salary_record(
        &dataset,
        &mut persistence,
        &emp("EMP001"),
        1,
        2026,
        &create_test_options(),
    )
    .unwrap();

    let summary: MonthlySummary = persistence
        .get_monthly_summary(&emp("EMP001"), january_2026())
        .unwrap()
        .unwrap();
    assert_eq!(summary.days_attended, dec!(24));
    assert_eq!(Some(summary), recalculated.summary);

    let rows: i64 = monthly_summaries::table
        .count()
        .get_result(&mut persistence.conn)
        .unwrap();
    assert_eq!(rows, 1);
}
