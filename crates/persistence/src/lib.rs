// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for computed payroll output.
//!
//! Salary records, monthly summaries and the audit trail are stored in
//! `SQLite` through Diesel. Records are upserted on
//! `(employee_id, year, month)` so recalculation is last-writer-wins.
//!
//! ## Storage format
//!
//! - `salary_records` holds the full record as JSON, with status and
//!   totals duplicated into columns for reporting
//! - `monthly_summaries` holds the summary used by the latest calculation
//! - `audit_events` is append-only and references its salary record
//!
//! Migrations are embedded and applied on open.
//!
//! ## Testing
//!
//! Tests run against per-test in-memory databases and need no external
//! infrastructure.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use payroll::{SalaryRecordStore, StoreError};
use payroll_audit::AuditEvent;
use payroll_domain::{EmployeeId, MonthlySummary, PayrollMonth, SalaryRecord};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for salary records, summaries and audit events.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:payroll_memdb_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Upserts a salary record and appends the audit event of its transition.
    ///
    /// # Returns
    ///
    /// The event ID assigned by the database.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails. Nothing is written in that case.
    pub fn persist_transition(
        &mut self,
        record: &SalaryRecord,
        event: &AuditEvent,
    ) -> Result<i64, PersistenceError> {
        mutations::persist_transition(&mut self.conn, record, event)
    }

    /// Upserts a calculated salary record, its monthly summary and the
    /// audit event in one transaction.
    ///
    /// # Returns
    ///
    /// The event ID assigned by the database.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails. Nothing is written in that case.
    pub fn persist_calculation(
        &mut self,
        record: &SalaryRecord,
        summary: &MonthlySummary,
        event: &AuditEvent,
    ) -> Result<i64, PersistenceError> {
        mutations::persist_calculation(&mut self.conn, record, summary, event)
    }

    /// Upserts a monthly summary.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn persist_summary(&mut self, summary: &MonthlySummary) -> Result<(), PersistenceError> {
        mutations::upsert_monthly_summary(&mut self.conn, summary)
    }

    /// Loads a salary record.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the record cannot be decoded.
    pub fn get_salary_record(
        &mut self,
        employee_id: &EmployeeId,
        period: PayrollMonth,
    ) -> Result<Option<SalaryRecord>, PersistenceError> {
        queries::get_salary_record(&mut self.conn, employee_id, period)
    }

    /// Loads a stored monthly summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the summary cannot be decoded.
    pub fn get_monthly_summary(
        &mut self,
        employee_id: &EmployeeId,
        period: PayrollMonth,
    ) -> Result<Option<MonthlySummary>, PersistenceError> {
        queries::get_monthly_summary(&mut self.conn, employee_id, period)
    }

    /// Lists the salary register of a month, ordered by employee id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a record cannot be decoded.
    pub fn list_salary_records(
        &mut self,
        period: PayrollMonth,
    ) -> Result<Vec<SalaryRecord>, PersistenceError> {
        queries::list_salary_records(&mut self.conn, period)
    }

    /// Returns the audit timeline of one salary record, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or an event cannot be decoded.
    pub fn get_audit_events(
        &mut self,
        employee_id: &EmployeeId,
        period: PayrollMonth,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::get_audit_events(&mut self.conn, employee_id, period)
    }
}

impl SalaryRecordStore for Persistence {
    fn load_record(
        &mut self,
        employee_id: &EmployeeId,
        period: PayrollMonth,
    ) -> Result<Option<SalaryRecord>, StoreError> {
        Ok(self.get_salary_record(employee_id, period)?)
    }

    fn save_record(&mut self, record: &SalaryRecord, event: &AuditEvent) -> Result<(), StoreError> {
        self.persist_transition(record, event)?;
        Ok(())
    }

    fn save_summary(&mut self, summary: &MonthlySummary) -> Result<(), StoreError> {
        Ok(self.persist_summary(summary)?)
    }

    fn save_calculation(
        &mut self,
        record: &SalaryRecord,
        summary: &MonthlySummary,
        event: &AuditEvent,
    ) -> Result<(), StoreError> {
        self.persist_calculation(record, summary, event)?;
        Ok(())
    }

    fn load_summary(
        &mut self,
        employee_id: &EmployeeId,
        period: PayrollMonth,
    ) -> Result<Option<MonthlySummary>, StoreError> {
        Ok(self.get_monthly_summary(employee_id, period)?)
    }

    fn records_for_period(&mut self, period: PayrollMonth) -> Result<Vec<SalaryRecord>, StoreError> {
        Ok(self.list_salary_records(period)?)
    }

    fn audit_events(
        &mut self,
        employee_id: &EmployeeId,
        period: PayrollMonth,
    ) -> Result<Vec<AuditEvent>, StoreError> {
        Ok(self.get_audit_events(employee_id, period)?)
    }
}
