// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation and calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The month or year of a payroll period is out of range.
    InvalidPeriod {
        /// The requested month (1-12 expected).
        month: u8,
        /// The requested year.
        year: i32,
        /// Why the period was rejected.
        reason: String,
    },
    /// Employee identifier is empty or invalid.
    InvalidEmployeeId(String),
    /// A salary configuration field failed validation.
    ConfigurationInvalid {
        /// The offending field.
        field: String,
        /// Description of the validation error.
        reason: String,
    },
    /// A weekend deduction tier is malformed or overlaps its neighbour.
    InvalidWeekendTier {
        /// Zero-based position of the tier in the configured list.
        index: usize,
        /// Description of the validation error.
        reason: String,
    },
    /// A salary record status string could not be parsed.
    InvalidSalaryStatus(String),
    /// A salary record lifecycle transition is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition was rejected.
        reason: String,
    },
    /// Recalculation attempted on an approved or paid record without override.
    RecordLocked {
        /// The current status of the record.
        status: String,
    },
    /// A manual adjustment is invalid.
    InvalidAdjustment(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPeriod {
                month,
                year,
                reason,
            } => {
                write!(f, "Invalid payroll period {year}-{month:02}: {reason}")
            }
            Self::InvalidEmployeeId(msg) => write!(f, "Invalid employee id: {msg}"),
            Self::ConfigurationInvalid { field, reason } => {
                write!(f, "Invalid salary configuration field '{field}': {reason}")
            }
            Self::InvalidWeekendTier { index, reason } => {
                write!(f, "Invalid weekend deduction tier #{index}: {reason}")
            }
            Self::InvalidSalaryStatus(status) => {
                write!(f, "Invalid salary record status: {status}")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot move salary record from {from} to {to}: {reason}")
            }
            Self::RecordLocked { status } => {
                write!(
                    f,
                    "Salary record is {status}; recalculation requires an explicit override"
                )
            }
            Self::InvalidAdjustment(msg) => write!(f, "Invalid adjustment: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
