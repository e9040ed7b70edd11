// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    BulkReport, InMemoryStore, PayrollDataset, SalaryRecordStore, VariablePayEntry,
    approve_record, calculate_all, cancel_record,
};
use payroll_domain::{SalaryRecord, SalaryStatus, VariablePay};
use rust_decimal_macros::dec;
use time::macros::date;

use super::helpers::{
    add_employee, create_test_actor, create_test_cause, create_test_dataset,
    create_test_employee, create_test_options, emp, january_2026,
};

/// EMP001 and EMP003 are valid; EMP002 carries an invalid override.
fn create_bulk_dataset() -> PayrollDataset {
    let mut dataset: PayrollDataset = create_test_dataset();
    let mut broken = create_test_employee("EMP002", date!(2024 - 04 - 01), dec!(40000));
    broken.salary_config.daily_work_hours = Some(dec!(0));
    add_employee(&mut dataset, broken, &[january_2026()]);
    add_employee(
        &mut dataset,
        create_test_employee("EMP003", date!(2023 - 09 - 01), dec!(62000)),
        &[january_2026()],
    );
    dataset
}

fn net_payable(store: &mut InMemoryStore, id: &str) -> rust_decimal::Decimal {
    store
        .load_record(&emp(id), january_2026())
        .unwrap()
        .unwrap()
        .net_payable
}

#[test]
fn test_failure_does_not_abort_batch() {
    let dataset: PayrollDataset = create_bulk_dataset();
    let mut store: InMemoryStore = InMemoryStore::new();

    let report: BulkReport =
        calculate_all(&dataset, &mut store, january_2026(), &create_test_options());

    assert_eq!(report.success, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.total(), 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].employee_id, emp("EMP002"));
    assert_eq!(report.failures[0].kind, "ConfigurationInvalid");
    assert!(report.failures[0].reason.contains("dailyWorkHours"));

    assert_eq!(store.record_count(), 2);
    assert_eq!(net_payable(&mut store, "EMP003"), dec!(50000));
}

#[test]
fn test_bulk_skips_locked_records_without_override() {
    let mut dataset: PayrollDataset = create_bulk_dataset();
    let mut store: InMemoryStore = InMemoryStore::new();
    calculate_all(&dataset, &mut store, january_2026(), &create_test_options());
    approve_record(
        &mut store,
        &emp("EMP001"),
        january_2026(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    dataset.variable_pay.push(VariablePayEntry {
        employee_id: emp("EMP001"),
        period: january_2026(),
        pay: VariablePay {
            bonus: dec!(3000),
            ..VariablePay::default()
        },
    });

    let report: BulkReport =
        calculate_all(&dataset, &mut store, january_2026(), &create_test_options());
    assert_eq!(report.skipped, 1);
    assert_eq!(report.skips[0].employee_id, emp("EMP001"));
    assert_eq!(report.skips[0].status, SalaryStatus::Approved);
    assert_eq!(net_payable(&mut store, "EMP001"), dec!(25000));

    let report: BulkReport = calculate_all(
        &dataset,
        &mut store,
        january_2026(),
        &create_test_options().with_recalculate(true),
    );
    assert_eq!(report.skipped, 0);
    assert_eq!(report.success, 2);
    assert_eq!(net_payable(&mut store, "EMP001"), dec!(28000));
}

#[test]
fn test_bulk_always_skips_cancelled_records() {
    let dataset: PayrollDataset = create_bulk_dataset();
    let mut store: InMemoryStore = InMemoryStore::new();
    calculate_all(&dataset, &mut store, january_2026(), &create_test_options());
    cancel_record(
        &mut store,
        &emp("EMP003"),
        january_2026(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    let report: BulkReport = calculate_all(
        &dataset,
        &mut store,
        january_2026(),
        &create_test_options().with_recalculate(true),
    );

    assert_eq!(report.skipped, 1);
    assert_eq!(report.skips[0].status, SalaryStatus::Cancelled);
    let record: SalaryRecord = store
        .load_record(&emp("EMP003"), january_2026())
        .unwrap()
        .unwrap();
    assert_eq!(record.status, SalaryStatus::Cancelled);
}

#[test]
fn test_report_serializes_counts() {
    let dataset: PayrollDataset = create_bulk_dataset();
    let mut store: InMemoryStore = InMemoryStore::new();

    let report: BulkReport =
        calculate_all(&dataset, &mut store, january_2026(), &create_test_options());
    let json: serde_json::Value = serde_json::to_value(&report).unwrap();

    assert_eq!(json["success"], 2);
    assert_eq!(json["failed"], 1);
    assert_eq!(json["failures"][0]["employeeId"], "EMP002");
    assert_eq!(json["period"]["month"], 1);
}
