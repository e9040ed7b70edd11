// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use payroll_domain::{ManualAdjustment, MonthlySummary, PayrollCalculation};

/// A command represents operator or batch intent as data only.
///
/// Commands are the only way to request salary record changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store a fresh calculation on the record.
    ApplyCalculation {
        /// The monthly summary the calculation used.
        summary: Box<MonthlySummary>,
        /// The payroll calculation.
        calculation: Box<PayrollCalculation>,
        /// Allow a locked record to be recalculated.
        recalculate: bool,
    },
    /// Approve a calculated record.
    Approve,
    /// Mark an approved record as paid.
    MarkPaid,
    /// Cancel a record that has not been paid.
    Cancel,
    /// Append a manual adjustment.
    AddAdjustment {
        /// The adjustment to append.
        adjustment: ManualAdjustment,
    },
}

impl Command {
    /// Returns the action name recorded in the audit log.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ApplyCalculation { .. } => "Calculate",
            Self::Approve => "Approve",
            Self::MarkPaid => "MarkPaid",
            Self::Cancel => "Cancel",
            Self::AddAdjustment { .. } => "AddAdjustment",
        }
    }
}
