// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use payroll_domain::{MonthlySummary, SalaryRecord};

use crate::diesel_schema::{monthly_summaries, salary_records};
use crate::error::PersistenceError;
use crate::queries::lookup_record_id;

/// Inserts or replaces the salary record keyed on `(employee_id, year, month)`.
///
/// The record is stored as JSON; status and totals are duplicated into
/// columns for reporting.
///
/// # Returns
///
/// The database ID of the record row.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn upsert_salary_record(
    conn: &mut SqliteConnection,
    record: &SalaryRecord,
) -> Result<i64, PersistenceError> {
    let employee_id: &str = record.employee_id.value();
    let year: i32 = record.period.year();
    let month: i32 = i32::from(record.period.month());
    let status: &str = record.status.as_str();
    let gross_salary: String = record.gross_salary.to_string();
    let total_deductions: String = record.total_deductions.to_string();
    let total_additions: String = record.total_additions.to_string();
    let net_payable: String = record.net_payable.to_string();
    let record_json: String = serde_json::to_string(record)?;

    diesel::insert_into(salary_records::table)
        .values((
            salary_records::employee_id.eq(employee_id),
            salary_records::year.eq(year),
            salary_records::month.eq(month),
            salary_records::status.eq(status),
            salary_records::gross_salary.eq(&gross_salary),
            salary_records::total_deductions.eq(&total_deductions),
            salary_records::total_additions.eq(&total_additions),
            salary_records::net_payable.eq(&net_payable),
            salary_records::record_json.eq(&record_json),
        ))
        .on_conflict((
            salary_records::employee_id,
            salary_records::year,
            salary_records::month,
        ))
        .do_update()
        .set((
            salary_records::status.eq(status),
            salary_records::gross_salary.eq(&gross_salary),
            salary_records::total_deductions.eq(&total_deductions),
            salary_records::total_additions.eq(&total_additions),
            salary_records::net_payable.eq(&net_payable),
            salary_records::record_json.eq(&record_json),
            salary_records::updated_at.eq(diesel::dsl::sql::<diesel::sql_types::Text>(
                "CURRENT_TIMESTAMP",
            )),
        ))
        .execute(conn)?;

    lookup_record_id(conn, &record.employee_id, record.period)?.ok_or_else(|| {
        PersistenceError::NotFound(format!(
            "salary record for {} ({}) after upsert",
            record.employee_id, record.period
        ))
    })
}

/// Inserts or replaces the monthly summary keyed on `(employee_id, year, month)`.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn upsert_monthly_summary(
    conn: &mut SqliteConnection,
    summary: &MonthlySummary,
) -> Result<(), PersistenceError> {
    let employee_id: &str = summary.employee_id.value();
    let year: i32 = summary.period.year();
    let month: i32 = i32::from(summary.period.month());
    let summary_json: String = serde_json::to_string(summary)?;

    diesel::insert_into(monthly_summaries::table)
        .values((
            monthly_summaries::employee_id.eq(employee_id),
            monthly_summaries::year.eq(year),
            monthly_summaries::month.eq(month),
            monthly_summaries::summary_json.eq(&summary_json),
        ))
        .on_conflict((
            monthly_summaries::employee_id,
            monthly_summaries::year,
            monthly_summaries::month,
        ))
        .do_update()
        .set((
            monthly_summaries::summary_json.eq(&summary_json),
            monthly_summaries::updated_at.eq(diesel::dsl::sql::<diesel::sql_types::Text>(
                "CURRENT_TIMESTAMP",
            )),
        ))
        .execute(conn)?;

    Ok(())
}
