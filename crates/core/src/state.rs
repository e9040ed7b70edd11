// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use payroll_audit::{AuditEvent, StateSnapshot};
use payroll_domain::SalaryRecord;

/// The result of a successful salary record transition.
///
/// A transition always produces a new record and exactly one audit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The record after the transition.
    pub new_record: SalaryRecord,
    /// The audit event describing the transition.
    pub audit_event: AuditEvent,
}

/// Renders the reviewable fields of a salary record for the audit log.
#[must_use]
pub fn snapshot(record: &SalaryRecord) -> StateSnapshot {
    StateSnapshot::new(format!(
        "status={},gross={},deductions={},additions={},net={},adjustments={},recalculations={}",
        record.status,
        record.gross_salary,
        record.total_deductions,
        record.total_additions,
        record.net_payable,
        record.adjustments.len(),
        record.recalculation_count
    ))
}
