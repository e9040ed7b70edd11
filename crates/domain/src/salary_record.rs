// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Salary record lifecycle.
//!
//! A salary record moves `draft -> calculated -> approved -> paid`, and may
//! be cancelled from any state before `paid`. Approved and paid records are
//! locked: recalculating them requires an explicit override, which returns
//! the record to `calculated`.

use crate::error::DomainError;
use crate::line_item::{AdjustmentKind, ManualAdjustment};
use crate::payroll::PayrollCalculation;
use crate::summary::MonthlySummary;
use crate::types::{EmployeeId, PayrollMonth};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle state of a salary record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalaryStatus {
    Draft,
    Calculated,
    Approved,
    Paid,
    Cancelled,
}

impl SalaryStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and display.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Calculated => "calculated",
            Self::Approved => "approved",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns true if recalculation requires an explicit override.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        matches!(self, Self::Approved | Self::Paid)
    }

    /// Returns true if manual adjustments may be added.
    #[must_use]
    pub const fn accepts_adjustments(&self) -> bool {
        !matches!(self, Self::Paid | Self::Cancelled)
    }

    /// Returns true if a transition to `target` is permitted.
    ///
    /// `calculated -> calculated` is a recalculation. Transitions back to
    /// `calculated` from a locked state are only reached through an
    /// override and are checked separately.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        match self {
            Self::Draft => matches!(target, Self::Calculated | Self::Cancelled),
            Self::Calculated => matches!(
                target,
                Self::Calculated | Self::Approved | Self::Cancelled
            ),
            Self::Approved => matches!(target, Self::Paid | Self::Cancelled | Self::Calculated),
            Self::Paid => matches!(target, Self::Calculated),
            Self::Cancelled => false,
        }
    }

    /// Validates a transition from this status.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the transition is
    /// not permitted.
    pub fn validate_transition(&self, target: Self) -> Result<(), DomainError> {
        if self.can_transition_to(target) {
            return Ok(());
        }
        let reason: &str = match self {
            Self::Cancelled => "cancelled records cannot change",
            Self::Paid => "paid records can only be reopened by recalculation",
            _ => "transition not permitted by salary record lifecycle",
        };
        Err(DomainError::InvalidStatusTransition {
            from: self.as_str().to_string(),
            to: target.as_str().to_string(),
            reason: reason.to_string(),
        })
    }
}

impl FromStr for SalaryStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "calculated" => Ok(Self::Calculated),
            "approved" => Ok(Self::Approved),
            "paid" => Ok(Self::Paid),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidSalaryStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for SalaryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Anomalies surfaced for manual review. Never block a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PayrollWarning {
    /// Deductions exceed gross plus additions.
    NegativeNetPayable { net_payable: Decimal },
}

impl std::fmt::Display for PayrollWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeNetPayable { net_payable } => {
                write!(f, "Net payable is negative: {net_payable}")
            }
        }
    }
}

/// The persisted salary record for one employee and month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRecord {
    pub employee_id: EmployeeId,
    pub period: PayrollMonth,
    pub status: SalaryStatus,
    /// Snapshot of the summary the calculation used.
    pub summary: Option<MonthlySummary>,
    pub calculation: Option<PayrollCalculation>,
    pub adjustments: Vec<ManualAdjustment>,
    pub gross_salary: Decimal,
    pub total_deductions: Decimal,
    pub total_additions: Decimal,
    pub net_payable: Decimal,
    pub warnings: Vec<PayrollWarning>,
    /// Number of times a locked record was recalculated by override.
    pub recalculation_count: u32,
}

impl SalaryRecord {
    /// Creates an empty draft record.
    #[must_use]
    pub const fn draft(employee_id: EmployeeId, period: PayrollMonth) -> Self {
        Self {
            employee_id,
            period,
            status: SalaryStatus::Draft,
            summary: None,
            calculation: None,
            adjustments: Vec::new(),
            gross_salary: Decimal::ZERO,
            total_deductions: Decimal::ZERO,
            total_additions: Decimal::ZERO,
            net_payable: Decimal::ZERO,
            warnings: Vec::new(),
            recalculation_count: 0,
        }
    }

    /// Returns true if the recorded month had full attendance.
    #[must_use]
    pub fn has_full_attendance(&self) -> bool {
        self.status != SalaryStatus::Cancelled
            && self
                .summary
                .as_ref()
                .is_some_and(MonthlySummary::has_full_attendance)
    }

    /// Stores a new calculation and moves the record to `calculated`.
    ///
    /// Manual adjustments are kept and totals recomputed.
    ///
    /// # Arguments
    ///
    /// * `summary` - The monthly summary used
    /// * `calculation` - The payroll calculation
    /// * `recalculate` - Override allowing a locked record to be recalculated
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RecordLocked` if the record is approved or paid
    /// and `recalculate` is false, or `DomainError::InvalidStatusTransition`
    /// if the record is cancelled.
    pub fn apply_calculation(
        &mut self,
        summary: MonthlySummary,
        calculation: PayrollCalculation,
        recalculate: bool,
    ) -> Result<(), DomainError> {
        if self.status.is_locked() && !recalculate {
            return Err(DomainError::RecordLocked {
                status: self.status.as_str().to_string(),
            });
        }
        self.status.validate_transition(SalaryStatus::Calculated)?;

        if self.status.is_locked() {
            self.recalculation_count = self.recalculation_count.saturating_add(1);
        }
        self.summary = Some(summary);
        self.calculation = Some(calculation);
        self.status = SalaryStatus::Calculated;
        self.recompute_totals();
        Ok(())
    }

    /// Approves a calculated record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` unless the record is
    /// `calculated`.
    pub fn approve(&mut self) -> Result<(), DomainError> {
        self.transition(SalaryStatus::Approved)
    }

    /// Marks an approved record as paid.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` unless the record is
    /// `approved`.
    pub fn mark_paid(&mut self) -> Result<(), DomainError> {
        self.transition(SalaryStatus::Paid)
    }

    /// Cancels a record that has not been paid.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the record is paid
    /// or already cancelled.
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        self.transition(SalaryStatus::Cancelled)
    }

    /// Appends a manual adjustment and recomputes totals.
    ///
    /// Attendance-derived figures are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAdjustment` if the record is paid or
    /// cancelled.
    pub fn add_adjustment(&mut self, adjustment: ManualAdjustment) -> Result<(), DomainError> {
        if !self.status.accepts_adjustments() {
            return Err(DomainError::InvalidAdjustment(format!(
                "cannot adjust a {} salary record",
                self.status
            )));
        }
        self.adjustments.push(adjustment);
        self.recompute_totals();
        Ok(())
    }

    /// Recomputes gross, totals, net payable and warnings.
    pub fn recompute_totals(&mut self) {
        let (gross, computed_deductions, computed_additions): (Decimal, Decimal, Decimal) =
            self.calculation.as_ref().map_or(
                (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
                |c| (c.gross_salary, c.total_deductions(), c.total_additions()),
            );

        let manual = |kind: AdjustmentKind| -> Decimal {
            self.adjustments
                .iter()
                .filter(|a| a.kind == kind)
                .map(|a| a.amount)
                .sum()
        };
        let manual_deductions: Decimal = manual(AdjustmentKind::Deduction);
        let manual_additions: Decimal = manual(AdjustmentKind::Addition);

        self.gross_salary = gross;
        self.total_deductions = computed_deductions + manual_deductions;
        self.total_additions = computed_additions + manual_additions;
        self.net_payable = self.gross_salary - self.total_deductions + self.total_additions;

        self.warnings.clear();
        if self.net_payable < Decimal::ZERO {
            self.warnings.push(PayrollWarning::NegativeNetPayable {
                net_payable: self.net_payable,
            });
        }
    }

    fn transition(&mut self, target: SalaryStatus) -> Result<(), DomainError> {
        // Reopening to calculated goes through apply_calculation only.
        if target == SalaryStatus::Calculated {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status.as_str().to_string(),
                to: target.as_str().to_string(),
                reason: "use recalculation to return a record to calculated".to_string(),
            });
        }
        self.status.validate_transition(target)?;
        self.status = target;
        Ok(())
    }
}
