// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod salary_record_tests;

use payroll::{CalculationOptions, PayrollDataset};
use payroll_audit::{Actor, Cause};
use payroll_domain::{
    AttendanceRecord, Employee, EmployeeId, PayrollMonth, SalaryConfig, SalaryConfigOverrides,
    build_calendar,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use time::macros::date;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("test-actor"), String::from("operator"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn create_test_options() -> CalculationOptions {
    CalculationOptions::new(date!(2026 - 02 - 01), create_test_actor(), create_test_cause())
}

pub fn january_2026() -> PayrollMonth {
    PayrollMonth::new(1, 2026).unwrap()
}

pub fn emp(id: &str) -> EmployeeId {
    EmployeeId::new(id)
}

fn create_test_employee(id: &str, salary_offered: Decimal) -> Employee {
    Employee {
        employee_id: emp(id),
        name: format!("Employee {id}"),
        role: String::from("Operator"),
        department: String::from("Printing"),
        date_of_joining: date!(2024 - 04 - 01),
        salary_offered,
        salary_config: SalaryConfigOverrides::default(),
    }
}

fn full_attendance(id: &str) -> Vec<AttendanceRecord> {
    build_calendar(
        january_2026(),
        SalaryConfig::default().saturdays_off_pattern,
        &[],
    )
    .into_iter()
    .filter(|day| day.is_working_day())
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

/// Two employees with full January 2026 attendance.
///
/// EMP001 earns 31000 and EMP002 62000; both have 25 working days.
pub fn create_test_dataset() -> PayrollDataset {
    let mut attendance: Vec<AttendanceRecord> = full_attendance("EMP002");
    attendance.extend(full_attendance("EMP001"));
    PayrollDataset {
        employees: vec![
            create_test_employee("EMP002", dec!(62000)),
            create_test_employee("EMP001", dec!(31000)),
        ],
        attendance,
        ..PayrollDataset::default()
    }
}
