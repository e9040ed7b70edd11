// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CalculationOptions, InMemoryStore, PayrollDataset, compute_salary_record};
use payroll_audit::{Actor, Cause};
use payroll_domain::{
    AttendanceRecord, CalendarDay, Employee, EmployeeId, PayrollMonth, SalaryConfig,
    SalaryConfigOverrides, SalaryRecord, build_calendar,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use time::Date;
use time::macros::date;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("hr-admin"), String::from("operator"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("run-2026-01"), String::from("Monthly payroll run"))
}

/// Options dated after January 2026 closes.
pub fn create_test_options() -> CalculationOptions {
    CalculationOptions::new(date!(2026 - 02 - 01), create_test_actor(), create_test_cause())
}

pub fn january_2026() -> PayrollMonth {
    PayrollMonth::new(1, 2026).unwrap()
}

pub fn emp(id: &str) -> EmployeeId {
    EmployeeId::new(id)
}

pub fn create_test_employee(id: &str, date_of_joining: Date, salary_offered: Decimal) -> Employee {
    Employee {
        employee_id: emp(id),
        name: format!("Employee {id}"),
        role: String::from("Designer"),
        department: String::from("Studio"),
        date_of_joining,
        salary_offered,
        salary_config: SalaryConfigOverrides::default(),
    }
}

/// A "Present" 9-hour record for every working day of the month under the
/// default Saturday pattern.
pub fn full_attendance(id: &str, period: PayrollMonth) -> Vec<AttendanceRecord> {
    let config: SalaryConfig = SalaryConfig::default();
    build_calendar(period, config.saturdays_off_pattern, &[])
        .into_iter()
        .filter(CalendarDay::is_working_day)
        .map(|day| AttendanceRecord {
            employee_id: emp(id),
            date: day.date,
            in_time: Some(String::from("09:30")),
            out_time: Some(String::from("18:30")),
            work_hours: dec!(9),
            ot_hours: Decimal::ZERO,
            status: String::from("Present"),
            remarks: None,
        })
        .collect()
}

/// One long-serving employee on 31000 with full January 2026 attendance.
///
/// January 2026 has 25 working days, so gross is 25000.
pub fn create_test_dataset() -> PayrollDataset {
    PayrollDataset {
        employees: vec![create_test_employee(
            "EMP001",
            date!(2024 - 04 - 01),
            dec!(31000),
        )],
        attendance: full_attendance("EMP001", january_2026()),
        ..PayrollDataset::default()
    }
}

/// Adds an employee with full attendance for the given months.
pub fn add_employee(dataset: &mut PayrollDataset, employee: Employee, months: &[PayrollMonth]) {
    for month in months {
        dataset
            .attendance
            .extend(full_attendance(employee.employee_id.value(), *month));
    }
    dataset.employees.push(employee);
}

/// Runs the engine once for EMP001 in January 2026.
pub fn calculated_record(dataset: &PayrollDataset, store: &mut InMemoryStore) -> SalaryRecord {
    compute_salary_record(
        dataset,
        store,
        &emp("EMP001"),
        1,
        2026,
        &create_test_options(),
    )
    .unwrap()
}
