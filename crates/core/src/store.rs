// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage seam for computed payroll output.
//!
//! The engine writes salary records, monthly summaries and audit events
//! through `SalaryRecordStore`. Records are keyed on
//! `(employee_id, period)`; saving an existing key replaces it.

use payroll_audit::AuditEvent;
use payroll_domain::{EmployeeId, MonthlySummary, PayrollMonth, SalaryRecord};
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backend failed to read or write.
    #[error("Storage backend error: {0}")]
    Backend(String),
    /// Stored data could not be decoded.
    #[error("Stored data is corrupt: {0}")]
    Corrupt(String),
}

/// Persistence of salary records, summaries and their audit trail.
///
/// Methods take `&mut self` so connection-backed stores can hold a single
/// connection without interior mutability.
pub trait SalaryRecordStore {
    /// Loads the salary record for an employee and month.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the record cannot be decoded.
    fn load_record(
        &mut self,
        employee_id: &EmployeeId,
        period: PayrollMonth,
    ) -> Result<Option<SalaryRecord>, StoreError>;

    /// Upserts a salary record together with the audit event that produced it.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails. Neither the record nor the
    /// event is stored in that case.
    fn save_record(&mut self, record: &SalaryRecord, event: &AuditEvent)
    -> Result<(), StoreError>;

    /// Upserts a monthly summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn save_summary(&mut self, summary: &MonthlySummary) -> Result<(), StoreError>;

    /// Stores a calculated record, the summary it was computed from and
    /// the audit event.
    ///
    /// The summary is only written once the record write succeeded.
    /// Transactional backends should write all three atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn save_calculation(
        &mut self,
        record: &SalaryRecord,
        summary: &MonthlySummary,
        event: &AuditEvent,
    ) -> Result<(), StoreError> {
        self.save_record(record, event)?;
        self.save_summary(summary)
    }

    /// Loads a stored monthly summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the summary cannot be decoded.
    fn load_summary(
        &mut self,
        employee_id: &EmployeeId,
        period: PayrollMonth,
    ) -> Result<Option<MonthlySummary>, StoreError>;

    /// Returns every salary record of a month, ordered by employee id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or a record cannot be decoded.
    fn records_for_period(&mut self, period: PayrollMonth) -> Result<Vec<SalaryRecord>, StoreError>;

    /// Returns the audit events of one record, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or an event cannot be decoded.
    fn audit_events(
        &mut self,
        employee_id: &EmployeeId,
        period: PayrollMonth,
    ) -> Result<Vec<AuditEvent>, StoreError>;
}

type RecordKey = (EmployeeId, PayrollMonth);

/// A `SalaryRecordStore` held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    records: HashMap<RecordKey, SalaryRecord>,
    summaries: HashMap<RecordKey, MonthlySummary>,
    events: Vec<AuditEvent>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored salary records.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Inserts a record without an audit event.
    ///
    /// Intended for seeding historical records.
    pub fn insert_record(&mut self, record: SalaryRecord) {
        self.records
            .insert((record.employee_id.clone(), record.period), record);
    }
}

impl SalaryRecordStore for InMemoryStore {
    fn load_record(
        &mut self,
        employee_id: &EmployeeId,
        period: PayrollMonth,
    ) -> Result<Option<SalaryRecord>, StoreError> {
        Ok(self.records.get(&(employee_id.clone(), period)).cloned())
    }

    fn save_record(
        &mut self,
        record: &SalaryRecord,
        event: &AuditEvent,
    ) -> Result<(), StoreError> {
        self.records
            .insert((record.employee_id.clone(), record.period), record.clone());
        self.events.push(event.clone());
        Ok(())
    }

    fn save_summary(&mut self, summary: &MonthlySummary) -> Result<(), StoreError> {
        self.summaries.insert(
            (summary.employee_id.clone(), summary.period),
            summary.clone(),
        );
        Ok(())
    }

    fn load_summary(
        &mut self,
        employee_id: &EmployeeId,
        period: PayrollMonth,
    ) -> Result<Option<MonthlySummary>, StoreError> {
        Ok(self.summaries.get(&(employee_id.clone(), period)).cloned())
    }

    fn records_for_period(&mut self, period: PayrollMonth) -> Result<Vec<SalaryRecord>, StoreError> {
        let mut records: Vec<SalaryRecord> = self
            .records
            .values()
            .filter(|r| r.period == period)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));
        Ok(records)
    }

    fn audit_events(
        &mut self,
        employee_id: &EmployeeId,
        period: PayrollMonth,
    ) -> Result<Vec<AuditEvent>, StoreError> {
        Ok(self
            .events
            .iter()
            .filter(|e| &e.employee_id == employee_id && e.period == period)
            .cloned()
            .collect())
    }
}
