// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use payroll_domain::{EmployeeId, MonthlySummary, PayrollMonth, SalaryRecord};

use crate::diesel_schema::{monthly_summaries, salary_records};
use crate::error::PersistenceError;

/// Looks up the database ID of a salary record.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn lookup_record_id(
    conn: &mut SqliteConnection,
    employee_id: &EmployeeId,
    period: PayrollMonth,
) -> Result<Option<i64>, PersistenceError> {
    let record_id: Option<i64> = salary_records::table
        .filter(salary_records::employee_id.eq(employee_id.value()))
        .filter(salary_records::year.eq(period.year()))
        .filter(salary_records::month.eq(i32::from(period.month())))
        .select(salary_records::record_id)
        .first::<i64>(conn)
        .optional()?;
    Ok(record_id)
}

/// Loads a salary record.
///
/// # Errors
///
/// Returns an error if the query fails or the stored JSON cannot be decoded.
pub fn get_salary_record(
    conn: &mut SqliteConnection,
    employee_id: &EmployeeId,
    period: PayrollMonth,
) -> Result<Option<SalaryRecord>, PersistenceError> {
    let record_json: Option<String> = salary_records::table
        .filter(salary_records::employee_id.eq(employee_id.value()))
        .filter(salary_records::year.eq(period.year()))
        .filter(salary_records::month.eq(i32::from(period.month())))
        .select(salary_records::record_json)
        .first::<String>(conn)
        .optional()?;

    record_json
        .map(|json| serde_json::from_str::<SalaryRecord>(&json))
        .transpose()
        .map_err(PersistenceError::from)
}

/// Lists every salary record of a month, ordered by employee id.
///
/// # Errors
///
/// Returns an error if the query fails or a stored record cannot be decoded.
pub fn list_salary_records(
    conn: &mut SqliteConnection,
    period: PayrollMonth,
) -> Result<Vec<SalaryRecord>, PersistenceError> {
    let rows: Vec<String> = salary_records::table
        .filter(salary_records::year.eq(period.year()))
        .filter(salary_records::month.eq(i32::from(period.month())))
        .order(salary_records::employee_id.asc())
        .select(salary_records::record_json)
        .load::<String>(conn)?;

    rows.iter()
        .map(|json| serde_json::from_str::<SalaryRecord>(json).map_err(PersistenceError::from))
        .collect()
}

/// Loads a stored monthly summary.
///
/// # Errors
///
/// Returns an error if the query fails or the stored JSON cannot be decoded.
pub fn get_monthly_summary(
    conn: &mut SqliteConnection,
    employee_id: &EmployeeId,
    period: PayrollMonth,
) -> Result<Option<MonthlySummary>, PersistenceError> {
    let summary_json: Option<String> = monthly_summaries::table
        .filter(monthly_summaries::employee_id.eq(employee_id.value()))
        .filter(monthly_summaries::year.eq(period.year()))
        .filter(monthly_summaries::month.eq(i32::from(period.month())))
        .select(monthly_summaries::summary_json)
        .first::<String>(conn)
        .optional()?;

    summary_json
        .map(|json| serde_json::from_str::<MonthlySummary>(&json))
        .transpose()
        .map_err(PersistenceError::from)
}
