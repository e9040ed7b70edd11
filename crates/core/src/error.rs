// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::store::StoreError;
use payroll_domain::{DomainError, EmployeeId, PayrollMonth, SalaryStatus};
use thiserror::Error;

/// Errors returned by the payroll engine.
///
/// Every variant carries the employee and period it concerns so failures
/// can be correlated with the audit log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Invalid period {year}-{month:02} for employee {employee_id}: {reason}")]
    InvalidPeriod {
        employee_id: EmployeeId,
        month: u8,
        year: i32,
        reason: String,
    },

    #[error("Employee {employee_id} not found ({period})")]
    EmployeeNotFound {
        employee_id: EmployeeId,
        period: PayrollMonth,
    },

    #[error("Invalid salary configuration for employee {employee_id} ({period}): {source}")]
    ConfigurationInvalid {
        employee_id: EmployeeId,
        period: PayrollMonth,
        source: DomainError,
    },

    #[error(
        "Salary record for employee {employee_id} ({period}) is {status}; recalculation requires the recalculate override"
    )]
    LockedRecordConflict {
        employee_id: EmployeeId,
        period: PayrollMonth,
        status: SalaryStatus,
    },

    #[error("No salary record for employee {employee_id} ({period})")]
    RecordNotFound {
        employee_id: EmployeeId,
        period: PayrollMonth,
    },

    #[error("Rejected change to salary record of employee {employee_id} ({period}): {source}")]
    InvalidTransition {
        employee_id: EmployeeId,
        period: PayrollMonth,
        source: DomainError,
    },

    #[error("Storage failure for employee {employee_id} ({period}): {source}")]
    Store {
        employee_id: EmployeeId,
        period: PayrollMonth,
        source: StoreError,
    },
}

impl EngineError {
    /// The employee this error concerns.
    #[must_use]
    pub const fn employee_id(&self) -> &EmployeeId {
        match self {
            Self::InvalidPeriod { employee_id, .. }
            | Self::EmployeeNotFound { employee_id, .. }
            | Self::ConfigurationInvalid { employee_id, .. }
            | Self::LockedRecordConflict { employee_id, .. }
            | Self::RecordNotFound { employee_id, .. }
            | Self::InvalidTransition { employee_id, .. }
            | Self::Store { employee_id, .. } => employee_id,
        }
    }

    /// A stable name for the error kind, used in reports and logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidPeriod { .. } => "InvalidPeriod",
            Self::EmployeeNotFound { .. } => "EmployeeNotFound",
            Self::ConfigurationInvalid { .. } => "ConfigurationInvalid",
            Self::LockedRecordConflict { .. } => "LockedRecordConflict",
            Self::RecordNotFound { .. } => "RecordNotFound",
            Self::InvalidTransition { .. } => "InvalidTransition",
            Self::Store { .. } => "Store",
        }
    }

    /// Wraps a domain error raised while changing a salary record.
    pub(crate) fn from_transition(
        employee_id: &EmployeeId,
        period: PayrollMonth,
        err: DomainError,
        status: SalaryStatus,
    ) -> Self {
        match err {
            DomainError::RecordLocked { .. } => Self::LockedRecordConflict {
                employee_id: employee_id.clone(),
                period,
                status,
            },
            other => Self::InvalidTransition {
                employee_id: employee_id.clone(),
                period,
                source: other,
            },
        }
    }

    pub(crate) fn store(employee_id: &EmployeeId, period: PayrollMonth, err: StoreError) -> Self {
        Self::Store {
            employee_id: employee_id.clone(),
            period,
            source: err,
        }
    }
}
