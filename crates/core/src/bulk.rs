// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::engine::{CalculationOptions, compute_salary_record};
use crate::source::PayrollSource;
use crate::store::SalaryRecordStore;
use payroll_domain::{Employee, EmployeeId, PayrollMonth, SalaryRecord, SalaryStatus};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A per-employee failure in a bulk run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkFailure {
    pub employee_id: EmployeeId,
    /// Error kind, e.g. `ConfigurationInvalid`.
    pub kind: String,
    pub reason: String,
}

/// An employee whose record was left untouched by a bulk run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkSkip {
    pub employee_id: EmployeeId,
    pub status: SalaryStatus,
}

/// Outcome of calculating every employee for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkReport {
    pub period: PayrollMonth,
    pub success: u32,
    pub skipped: u32,
    pub failed: u32,
    pub failures: Vec<BulkFailure>,
    pub skips: Vec<BulkSkip>,
}

impl BulkReport {
    const fn new(period: PayrollMonth) -> Self {
        Self {
            period,
            success: 0,
            skipped: 0,
            failed: 0,
            failures: Vec::new(),
            skips: Vec::new(),
        }
    }

    /// Total number of employees considered.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.success + self.skipped + self.failed
    }
}

/// Calculates the salary record of every employee for one month.
///
/// Employees are processed independently in employee id order; a failure
/// is recorded and the run continues. Cancelled records are always
/// skipped. Approved and paid records are skipped unless
/// `options.recalculate` is set.
///
/// # Arguments
///
/// * `source` - Pre-fetched inputs
/// * `store` - Salary record storage
/// * `period` - The payroll month
/// * `options` - Override flag, current date, actor and cause
pub fn calculate_all<S, T>(
    source: &S,
    store: &mut T,
    period: PayrollMonth,
    options: &CalculationOptions,
) -> BulkReport
where
    S: PayrollSource + ?Sized,
    T: SalaryRecordStore + ?Sized,
{
    let mut report: BulkReport = BulkReport::new(period);
    let employees: Vec<Employee> = source.employees();

    info!(
        year = period.year(),
        month = period.month(),
        employees = employees.len(),
        recalculate = options.recalculate,
        "Starting bulk salary calculation"
    );

    for employee in &employees {
        let employee_id: &EmployeeId = &employee.employee_id;

        let existing: Option<SalaryRecord> = match store.load_record(employee_id, period) {
            Ok(existing) => existing,
            Err(e) => {
                record_failure(&mut report, employee_id, "Store", e.to_string());
                continue;
            }
        };
        if let Some(record) = existing {
            let locked_out: bool = record.status.is_locked() && !options.recalculate;
            if record.status == SalaryStatus::Cancelled || locked_out {
                info!(
                    employee_id = %employee_id,
                    status = %record.status,
                    "Skipping salary record"
                );
                report.skipped += 1;
                report.skips.push(BulkSkip {
                    employee_id: employee_id.clone(),
                    status: record.status,
                });
                continue;
            }
        }

        match compute_salary_record(
            source,
            store,
            employee_id,
            period.month(),
            period.year(),
            options,
        ) {
            Ok(_) => report.success += 1,
            Err(e) => record_failure(&mut report, employee_id, e.kind(), e.to_string()),
        }
    }

    info!(
        year = period.year(),
        month = period.month(),
        total = report.total(),
        success = report.success,
        skipped = report.skipped,
        failed = report.failed,
        "Bulk salary calculation finished"
    );

    report
}

fn record_failure(report: &mut BulkReport, employee_id: &EmployeeId, kind: &str, reason: String) {
    warn!(employee_id = %employee_id, kind, %reason, "Salary calculation failed");
    report.failed += 1;
    report.failures.push(BulkFailure {
        employee_id: employee_id.clone(),
        kind: kind.to_string(),
        reason,
    });
}
