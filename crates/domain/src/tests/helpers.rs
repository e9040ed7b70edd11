// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AttendanceRecord, ClassifiedDay, Employee, EmployeeId, HolidayEntry, LeaveBalance,
    LeaveRequest, LeaveType, MonthlySummary, PayrollMonth, RequestStatus, SalaryConfig,
    SalaryConfigOverrides, WfhRequest, aggregate_month, build_calendar, classify_days,
};
use rust_decimal::Decimal;
use time::Date;

pub fn create_test_employee_id() -> EmployeeId {
    EmployeeId::new("EMP001")
}

pub fn create_test_employee(date_of_joining: Date, salary_offered: Decimal) -> Employee {
    Employee {
        employee_id: create_test_employee_id(),
        name: String::from("Test Employee"),
        role: String::from("Designer"),
        department: String::from("Studio"),
        date_of_joining,
        salary_offered,
        salary_config: SalaryConfigOverrides::default(),
    }
}

/// January 2026: 31 days, starts on a Thursday, four Sundays.
pub fn january_2026() -> PayrollMonth {
    PayrollMonth::new(1, 2026).unwrap()
}

pub fn create_attendance(date: Date, status: &str, work_hours: Decimal) -> AttendanceRecord {
    AttendanceRecord {
        employee_id: create_test_employee_id(),
        date,
        in_time: Some(String::from("09:30")),
        out_time: Some(String::from("18:30")),
        work_hours,
        ot_hours: Decimal::ZERO,
        status: String::from(status),
        remarks: None,
    }
}

pub fn create_leave(start: Date, end: Date, leave_type: LeaveType, is_paid: bool) -> LeaveRequest {
    LeaveRequest {
        employee_id: create_test_employee_id(),
        start_date: start,
        end_date: end,
        leave_type,
        status: RequestStatus::Approved,
        is_paid,
    }
}

/// A "Present" record with the given hours for every working day of the month.
pub fn full_attendance(
    period: PayrollMonth,
    config: &SalaryConfig,
    holidays: &[HolidayEntry],
    work_hours: Decimal,
) -> Vec<AttendanceRecord> {
    build_calendar(period, config.saturdays_off_pattern, holidays)
        .into_iter()
        .filter(crate::CalendarDay::is_working_day)
        .map(|day| create_attendance(day.date, "Present", work_hours))
        .collect()
}

pub struct MonthInputs<'a> {
    pub period: PayrollMonth,
    pub config: &'a SalaryConfig,
    pub holidays: &'a [HolidayEntry],
    pub attendance: &'a [AttendanceRecord],
    pub leaves: &'a [LeaveRequest],
    pub wfh_requests: &'a [WfhRequest],
    pub on_probation: bool,
    pub leave_balance: Option<&'a LeaveBalance>,
}

impl<'a> MonthInputs<'a> {
    pub fn new(
        period: PayrollMonth,
        config: &'a SalaryConfig,
        attendance: &'a [AttendanceRecord],
    ) -> Self {
        Self {
            period,
            config,
            holidays: &[],
            attendance,
            leaves: &[],
            wfh_requests: &[],
            on_probation: false,
            leave_balance: None,
        }
    }

    pub fn classify(&self) -> Vec<ClassifiedDay> {
        let calendar = build_calendar(self.period, self.config.saturdays_off_pattern, self.holidays);
        classify_days(calendar, self.attendance, self.leaves, self.wfh_requests)
    }

    pub fn summarize(&self) -> (MonthlySummary, Vec<ClassifiedDay>) {
        let days: Vec<ClassifiedDay> = self.classify();
        let summary: MonthlySummary = aggregate_month(
            &create_test_employee_id(),
            self.period,
            &days,
            self.config,
            self.on_probation,
            self.leave_balance,
        );
        (summary, days)
    }
}
