// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write paths.
//!
//! A salary record and the audit event describing its transition are
//! written in one transaction, together with the monthly summary when the
//! transition is a calculation.

mod audit;
mod salary_records;

use diesel::{Connection, SqliteConnection};
use payroll_audit::AuditEvent;
use payroll_domain::{MonthlySummary, SalaryRecord};
use tracing::debug;

use crate::error::PersistenceError;

pub use audit::persist_audit_event;
pub use salary_records::{upsert_monthly_summary, upsert_salary_record};

/// Upserts a salary record and appends its audit event atomically.
///
/// # Returns
///
/// The event ID assigned by the database.
///
/// # Errors
///
/// Returns an error if either write fails; nothing is stored in that case.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    record: &SalaryRecord,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    conn.transaction::<i64, PersistenceError, _>(|conn| {
        let record_id: i64 = upsert_salary_record(conn, record)?;
        let event_id: i64 = persist_audit_event(conn, record_id, event)?;
        debug!(record_id, event_id, status = %record.status, "Persisted salary record transition");
        Ok(event_id)
    })
}

/// Upserts a calculated salary record, its monthly summary and its audit
/// event atomically.
///
/// # Returns
///
/// The event ID assigned by the database.
///
/// # Errors
///
/// Returns an error if any write fails; nothing is stored in that case.
pub fn persist_calculation(
    conn: &mut SqliteConnection,
    record: &SalaryRecord,
    summary: &MonthlySummary,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    conn.transaction::<i64, PersistenceError, _>(|conn| {
        let record_id: i64 = upsert_salary_record(conn, record)?;
        let event_id: i64 = persist_audit_event(conn, record_id, event)?;
        upsert_monthly_summary(conn, summary)?;
        debug!(record_id, event_id, "Persisted salary calculation");
        Ok(event_id)
    })
}
