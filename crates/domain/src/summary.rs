// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Monthly attendance aggregation.
//!
//! Reduces classified days into the monthly summary that payroll consumes.
//! Figures are kept unrounded; `MonthlySummary::rounded` produces the
//! two-decimal display copy.

use crate::calendar::count_sundays;
use crate::classifier::{ClassifiedDay, DayStatus};
use crate::config::SalaryConfig;
use crate::leave_accrual::monthly_accrual_days;
use crate::money::round2;
use crate::types::{EmployeeId, LeaveBalance, LeaveType, PayrollMonth};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Leave-derived figures of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaveFigures {
    pub total_leaves_taken: Decimal,
    pub paid_leaves: Decimal,
    pub pay_loss_days: Decimal,
    pub days_to_be_paid_for: Decimal,
}

impl LeaveFigures {
    /// Derives leave figures from working days, attendance and paid leave.
    ///
    /// - `totalLeavesTaken = max(0, workingDays - daysAttended)`
    /// - `paidLeaves = min(paidLeaveDays, totalLeavesTaken)`
    /// - `payLossDays = max(0, totalLeavesTaken - paidLeaves)`
    /// - `daysToBePaidFor = daysAttended + paidLeaves`
    ///
    /// # Arguments
    ///
    /// * `total_working_days` - Working days in the month
    /// * `days_attended` - Sum of attended fractions
    /// * `paid_leave_days` - Paid leave days before capping
    #[must_use]
    pub fn derive(
        total_working_days: Decimal,
        days_attended: Decimal,
        paid_leave_days: Decimal,
    ) -> Self {
        let total_leaves_taken: Decimal = (total_working_days - days_attended).max(Decimal::ZERO);
        let paid_leaves: Decimal = paid_leave_days
            .max(Decimal::ZERO)
            .min(total_leaves_taken);
        let pay_loss_days: Decimal = (total_leaves_taken - paid_leaves).max(Decimal::ZERO);
        let days_to_be_paid_for: Decimal = days_attended + paid_leaves;

        Self {
            total_leaves_taken,
            paid_leaves,
            pay_loss_days,
            days_to_be_paid_for,
        }
    }
}

/// Attendance summary of one employee for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub employee_id: EmployeeId,
    pub period: PayrollMonth,
    pub days_in_month: u8,
    pub total_working_days: u32,
    pub days_attended: Decimal,
    pub total_leaves_taken: Decimal,
    pub paid_leaves: Decimal,
    pub pay_loss_days: Decimal,
    pub expected_hours: Decimal,
    pub hours_worked: Decimal,
    pub ot_hours: Decimal,
    pub days_to_be_paid_for: Decimal,
    pub weekly_offs: u32,
    pub public_holidays: u32,
    pub restricted_holidays: u32,
    pub wfh_emergency_days: u32,
    pub wfh_casual_days: u32,
    pub not_marked_days: u32,
    pub missed_punches: u32,
    pub sundays_in_month: u32,
    pub on_probation: bool,
}

impl MonthlySummary {
    /// Returns a copy with every decimal figure rounded to two places.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            days_attended: round2(self.days_attended),
            total_leaves_taken: round2(self.total_leaves_taken),
            paid_leaves: round2(self.paid_leaves),
            pay_loss_days: round2(self.pay_loss_days),
            expected_hours: round2(self.expected_hours),
            hours_worked: round2(self.hours_worked),
            ot_hours: round2(self.ot_hours),
            days_to_be_paid_for: round2(self.days_to_be_paid_for),
            ..self.clone()
        }
    }

    /// Returns true if every working day of the month was attended.
    #[must_use]
    pub fn has_full_attendance(&self) -> bool {
        self.total_working_days > 0 && self.total_leaves_taken.is_zero()
    }
}

/// Aggregates classified days into a monthly summary.
///
/// # Arguments
///
/// * `employee_id` - The employee
/// * `period` - The payroll month
/// * `days` - Output of `classify_days` for the month
/// * `config` - Effective salary configuration
/// * `on_probation` - Whether leave benefits are withheld this month
/// * `leave_balance` - Opening leave position, if known
#[must_use]
pub fn aggregate_month(
    employee_id: &EmployeeId,
    period: PayrollMonth,
    days: &[ClassifiedDay],
    config: &SalaryConfig,
    on_probation: bool,
    leave_balance: Option<&LeaveBalance>,
) -> MonthlySummary {
    let wfh_credit: Decimal = config.wfh_attendance_credit;

    let total_working_days: u32 = count(days, ClassifiedDay::is_working_day);
    let days_attended: Decimal = days
        .iter()
        .map(|d| d.status.attended_fraction(wfh_credit))
        .sum();
    let hours_worked: Decimal = days.iter().map(ClassifiedDay::work_hours).sum();
    let ot_hours: Decimal = days.iter().map(ClassifiedDay::ot_hours).sum();
    let expected_hours: Decimal = Decimal::from(total_working_days) * config.daily_work_hours;

    let paid_leave_days: Decimal = paid_leave_days(days, config, on_probation, leave_balance);
    let figures: LeaveFigures = LeaveFigures::derive(
        Decimal::from(total_working_days),
        days_attended,
        paid_leave_days,
    );

    let calendar: Vec<_> = days.iter().map(|d| d.day.clone()).collect();

    MonthlySummary {
        employee_id: employee_id.clone(),
        period,
        days_in_month: period.days_in_month(),
        total_working_days,
        days_attended,
        total_leaves_taken: figures.total_leaves_taken,
        paid_leaves: figures.paid_leaves,
        pay_loss_days: figures.pay_loss_days,
        expected_hours,
        hours_worked,
        ot_hours,
        days_to_be_paid_for: figures.days_to_be_paid_for,
        weekly_offs: count(days, |d| d.day.is_weekend),
        public_holidays: count(days, |d| d.day.is_public_holiday()),
        restricted_holidays: count(days, |d| {
            d.day.holiday.is_some() && !d.day.is_public_holiday()
        }),
        wfh_emergency_days: count(days, |d| d.status == DayStatus::WfhEmergency),
        wfh_casual_days: count(days, |d| d.status == DayStatus::WfhCasual),
        not_marked_days: count(days, |d| d.status == DayStatus::NotMarked),
        missed_punches: count(days, |d| d.has_missed_punch(wfh_credit)),
        sundays_in_month: count_sundays(&calendar),
        on_probation,
    }
}

/// Paid leave days before capping at leaves taken.
///
/// Each working day covered by approved paid leave contributes its
/// un-attended fraction. Probation withholds paid leave entirely.
fn paid_leave_days(
    days: &[ClassifiedDay],
    config: &SalaryConfig,
    on_probation: bool,
    leave_balance: Option<&LeaveBalance>,
) -> Decimal {
    if on_probation {
        return Decimal::ZERO;
    }

    let wfh_credit: Decimal = config.wfh_attendance_credit;
    let mut by_type: HashMap<LeaveType, Decimal> = HashMap::new();
    for day in days.iter().filter(|d| d.is_working_day()) {
        let Some(leave) = &day.leave else {
            continue;
        };
        if !leave.is_paid {
            continue;
        }
        let unattended: Decimal =
            (Decimal::ONE - day.status.attended_fraction(wfh_credit)).max(Decimal::ZERO);
        *by_type.entry(leave.leave_type).or_insert(Decimal::ZERO) += unattended;
    }

    let policy = &config.leave_policy;
    if !policy.special_leave_entitlements.is_empty() {
        let entitled: Decimal = policy
            .special_leave_entitlements
            .iter()
            .map(|e| e.days)
            .sum();
        if let Some(special) = by_type.get_mut(&LeaveType::Special) {
            *special = (*special).min(entitled);
        }
    }

    if let Some(balance) = leave_balance {
        let remaining: u32 = policy
            .restricted_holidays_per_year
            .saturating_sub(balance.restricted_holidays_used);
        if let Some(restricted) = by_type.get_mut(&LeaveType::RestrictedHoliday) {
            *restricted = (*restricted).min(Decimal::from(remaining));
        }
    }

    let total: Decimal = by_type.values().copied().sum();

    match leave_balance {
        Some(balance) => {
            let available: Decimal = (balance.opening_paid_leave_days
                + monthly_accrual_days(policy, on_probation))
            .max(Decimal::ZERO);
            total.min(available)
        }
        None => total,
    }
}

fn count<F>(days: &[ClassifiedDay], predicate: F) -> u32
where
    F: Fn(&ClassifiedDay) -> bool,
{
    u32::try_from(days.iter().filter(|d| predicate(d)).count()).unwrap_or(u32::MAX)
}
