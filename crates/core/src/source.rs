// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side collaborators.
//!
//! The engine never fetches data itself. Everything it needs for a period
//! is read through `PayrollSource`, which the batch job fills from the HR
//! directory, the attendance ledger and the request stores beforehand.

use payroll_domain::{
    AttendanceRecord, Employee, EmployeeId, HolidayEntry, LeaveBalance, LeaveRequest,
    PayrollMonth, SalaryConfig, SalaryConfigOverrides, VariablePay, WfhRequest,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pre-fetched inputs of the payroll engine.
pub trait PayrollSource {
    /// Company-wide salary policy.
    fn company_config(&self) -> SalaryConfig;

    /// Policy overrides of a department, if any.
    fn department_overrides(&self, department: &str) -> Option<SalaryConfigOverrides>;

    /// Looks up one employee.
    fn employee(&self, employee_id: &EmployeeId) -> Option<Employee>;

    /// Every employee in the directory.
    fn employees(&self) -> Vec<Employee>;

    /// Holiday calendar entries falling in the month.
    fn holidays(&self, period: PayrollMonth) -> Vec<HolidayEntry>;

    /// Attendance ledger entries of the employee in the month, in ledger order.
    fn attendance(&self, employee_id: &EmployeeId, period: PayrollMonth) -> Vec<AttendanceRecord>;

    /// Leave requests of the employee overlapping the month.
    fn leave_requests(&self, employee_id: &EmployeeId, period: PayrollMonth) -> Vec<LeaveRequest>;

    /// WFH requests of the employee in the month.
    fn wfh_requests(&self, employee_id: &EmployeeId, period: PayrollMonth) -> Vec<WfhRequest>;

    /// Variable pay entered for the employee and month.
    fn variable_pay(&self, employee_id: &EmployeeId, period: PayrollMonth) -> VariablePay;

    /// Opening leave position, when leave balances are tracked.
    fn leave_balance(&self, employee_id: &EmployeeId, period: PayrollMonth) -> Option<LeaveBalance>;

    /// Whether the employee qualified for the accuracy bonus this month.
    fn accuracy_qualified(&self, employee_id: &EmployeeId, period: PayrollMonth) -> bool;
}

/// Variable pay of one employee for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariablePayEntry {
    pub employee_id: EmployeeId,
    pub period: PayrollMonth,
    pub pay: VariablePay,
}

/// Opening leave position of one employee for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveBalanceEntry {
    pub employee_id: EmployeeId,
    pub period: PayrollMonth,
    pub balance: LeaveBalance,
}

/// Marks an employee as accuracy-qualified for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyEntry {
    pub employee_id: EmployeeId,
    pub period: PayrollMonth,
}

/// An in-memory `PayrollSource`, typically deserialized from a JSON export.
///
/// Missing sections default to empty; a missing `companyConfig` falls back
/// to `SalaryConfig::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PayrollDataset {
    pub company_config: SalaryConfig,
    pub department_overrides: BTreeMap<String, SalaryConfigOverrides>,
    pub employees: Vec<Employee>,
    pub holidays: Vec<HolidayEntry>,
    pub attendance: Vec<AttendanceRecord>,
    pub leave_requests: Vec<LeaveRequest>,
    pub wfh_requests: Vec<WfhRequest>,
    pub variable_pay: Vec<VariablePayEntry>,
    pub leave_balances: Vec<LeaveBalanceEntry>,
    pub accuracy_qualified: Vec<AccuracyEntry>,
}

impl PayrollDataset {
    /// Parses a dataset from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a field fails to decode
    /// (for example an out-of-range payroll month).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl PayrollSource for PayrollDataset {
    fn company_config(&self) -> SalaryConfig {
        self.company_config.clone()
    }

    fn department_overrides(&self, department: &str) -> Option<SalaryConfigOverrides> {
        self.department_overrides.get(department).cloned()
    }

    fn employee(&self, employee_id: &EmployeeId) -> Option<Employee> {
        self.employees
            .iter()
            .find(|e| &e.employee_id == employee_id)
            .cloned()
    }

    fn employees(&self) -> Vec<Employee> {
        let mut employees: Vec<Employee> = self.employees.clone();
        employees.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));
        employees
    }

    fn holidays(&self, period: PayrollMonth) -> Vec<HolidayEntry> {
        self.holidays
            .iter()
            .filter(|h| period.contains(h.date))
            .cloned()
            .collect()
    }

    fn attendance(&self, employee_id: &EmployeeId, period: PayrollMonth) -> Vec<AttendanceRecord> {
        self.attendance
            .iter()
            .filter(|a| &a.employee_id == employee_id && period.contains(a.date))
            .cloned()
            .collect()
    }

    fn leave_requests(&self, employee_id: &EmployeeId, period: PayrollMonth) -> Vec<LeaveRequest> {
        self.leave_requests
            .iter()
            .filter(|l| {
                &l.employee_id == employee_id
                    && l.start_date <= period.last_day()
                    && l.end_date >= period.first_day()
            })
            .cloned()
            .collect()
    }

    fn wfh_requests(&self, employee_id: &EmployeeId, period: PayrollMonth) -> Vec<WfhRequest> {
        self.wfh_requests
            .iter()
            .filter(|w| &w.employee_id == employee_id && period.contains(w.date))
            .cloned()
            .collect()
    }

    fn variable_pay(&self, employee_id: &EmployeeId, period: PayrollMonth) -> VariablePay {
        self.variable_pay
            .iter()
            .find(|v| &v.employee_id == employee_id && v.period == period)
            .map(|v| v.pay.clone())
            .unwrap_or_default()
    }

    fn leave_balance(&self, employee_id: &EmployeeId, period: PayrollMonth) -> Option<LeaveBalance> {
        self.leave_balances
            .iter()
            .find(|b| &b.employee_id == employee_id && b.period == period)
            .map(|b| b.balance.clone())
    }

    fn accuracy_qualified(&self, employee_id: &EmployeeId, period: PayrollMonth) -> bool {
        self.accuracy_qualified
            .iter()
            .any(|a| &a.employee_id == employee_id && a.period == period)
    }
}
