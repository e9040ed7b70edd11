// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::money::round2;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of a computed deduction or addition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    HourlyShortfall,
    WeekendDeduction,
    WfhEmergency,
    WfhCasual,
    MissedPunch,
    ProvidentFund,
    Esi,
    ProfessionalTax,
    Tds,
    Damages,
    AdvanceRecovery,
    OtherDeductions,
    AttendanceBonus,
    AccuracyBonus,
    Incentive,
    Bonus,
    OvertimePay,
    Reimbursement,
}

impl LineItemKind {
    /// Returns the stable string form of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HourlyShortfall => "hourly_shortfall",
            Self::WeekendDeduction => "weekend_deduction",
            Self::WfhEmergency => "wfh_emergency",
            Self::WfhCasual => "wfh_casual",
            Self::MissedPunch => "missed_punch",
            Self::ProvidentFund => "provident_fund",
            Self::Esi => "esi",
            Self::ProfessionalTax => "professional_tax",
            Self::Tds => "tds",
            Self::Damages => "damages",
            Self::AdvanceRecovery => "advance_recovery",
            Self::OtherDeductions => "other_deductions",
            Self::AttendanceBonus => "attendance_bonus",
            Self::AccuracyBonus => "accuracy_bonus",
            Self::Incentive => "incentive",
            Self::Bonus => "bonus",
            Self::OvertimePay => "overtime_pay",
            Self::Reimbursement => "reimbursement",
        }
    }
}

/// A single computed deduction or addition, rounded to two places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub kind: LineItemKind,
    pub description: String,
    pub amount: Decimal,
}

impl LineItem {
    /// Creates a line item, rounding the amount.
    #[must_use]
    pub fn new(kind: LineItemKind, description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            kind,
            description: description.into(),
            amount: round2(amount),
        }
    }
}

/// Direction of a manual adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentKind {
    Addition,
    Deduction,
}

impl AdjustmentKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Addition => "addition",
            Self::Deduction => "deduction",
        }
    }
}

impl std::str::FromStr for AdjustmentKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "addition" => Ok(Self::Addition),
            "deduction" => Ok(Self::Deduction),
            other => Err(DomainError::InvalidAdjustment(format!(
                "unknown adjustment kind '{other}'"
            ))),
        }
    }
}

/// A free-form adjustment appended after calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualAdjustment {
    pub description: String,
    pub amount: Decimal,
    pub kind: AdjustmentKind,
}

impl ManualAdjustment {
    /// Creates a validated manual adjustment.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAdjustment` if the description is blank
    /// or the amount is not positive.
    pub fn new(description: &str, amount: Decimal, kind: AdjustmentKind) -> Result<Self, DomainError> {
        let description: &str = description.trim();
        if description.is_empty() {
            return Err(DomainError::InvalidAdjustment(
                "description must not be empty".to_string(),
            ));
        }
        if amount <= Decimal::ZERO {
            return Err(DomainError::InvalidAdjustment(format!(
                "amount must be positive, got {amount}"
            )));
        }
        Ok(Self {
            description: description.to_string(),
            amount: round2(amount),
            kind,
        })
    }

    /// Returns the amount with its sign applied.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            AdjustmentKind::Addition => self.amount,
            AdjustmentKind::Deduction => -self.amount,
        }
    }
}
