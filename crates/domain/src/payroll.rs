// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payroll calculation.
//!
//! Turns a monthly summary and the effective salary configuration into
//! gross salary, the deduction and addition line items, and the per-period
//! bi-weekly breakdown kept for audit.
//!
//! During probation pay is strictly per day attended: paid leave, the
//! bi-weekly hour rule, weekend tiers and bonuses do not apply. WFH,
//! missed-punch, statutory and variable-pay items still do.

use crate::classifier::ClassifiedDay;
use crate::config::{SalaryConfig, WeekendDeductionTier, find_weekend_tier};
use crate::leave_accrual::{LeaveAccrual, calculate_leave_accrual};
use crate::line_item::{LineItem, LineItemKind};
use crate::money::{percent_of, round2};
use crate::summary::MonthlySummary;
use crate::types::{LeaveBalance, VariablePay};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

/// Length of a bi-weekly period in days.
pub const BI_WEEKLY_PERIOD_DAYS: usize = 14;

/// Everything the payroll calculator reads for one employee and month.
#[derive(Debug, Clone, Copy)]
pub struct PayrollInputs<'a> {
    pub summary: &'a MonthlySummary,
    /// Classified days of the month, for bi-weekly segmentation.
    pub days: &'a [ClassifiedDay],
    /// Monthly salary offered.
    pub salary_offered: Decimal,
    pub config: &'a SalaryConfig,
    pub variable_pay: &'a VariablePay,
    /// Opening leave position, if tracked.
    pub leave_balance: Option<&'a LeaveBalance>,
    /// Consecutive months with full attendance immediately before this one.
    pub prior_full_attendance_months: u32,
    pub accuracy_qualified: bool,
}

/// Hour accounting for one bi-weekly period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiWeeklyPeriod {
    /// 1-based period number within the month.
    pub index: u32,
    pub start_date: Date,
    pub end_date: Date,
    pub working_days: u32,
    pub expected_hours: Decimal,
    pub actual_hours: Decimal,
    pub shortfall: Decimal,
    pub deduction: Decimal,
}

/// Outcome of the weekend tier lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekendDeduction {
    pub excess_days: Decimal,
    pub tier: Option<WeekendDeductionTier>,
    /// Sundays actually deducted, never more than the month has.
    pub sundays_deducted: u32,
    pub amount: Decimal,
}

/// Result of a payroll calculation before manual adjustments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollCalculation {
    pub per_day_salary: Decimal,
    pub gross_salary: Decimal,
    pub bi_weekly: Vec<BiWeeklyPeriod>,
    pub hourly_deduction: Decimal,
    pub weekend_deduction: WeekendDeduction,
    pub deductions: Vec<LineItem>,
    pub additions: Vec<LineItem>,
    pub leave_accrual: LeaveAccrual,
    pub on_probation: bool,
}

impl PayrollCalculation {
    /// Sum of computed deduction line items.
    #[must_use]
    pub fn total_deductions(&self) -> Decimal {
        self.deductions.iter().map(|item| item.amount).sum()
    }

    /// Sum of computed addition line items.
    #[must_use]
    pub fn total_additions(&self) -> Decimal {
        self.additions.iter().map(|item| item.amount).sum()
    }

    /// Returns the line item of the given kind, if one was produced.
    #[must_use]
    pub fn item(&self, kind: LineItemKind) -> Option<&LineItem> {
        self.deductions
            .iter()
            .chain(self.additions.iter())
            .find(|item| item.kind == kind)
    }
}

/// Computes the shortfall and deduction of one bi-weekly period.
///
/// The deduction is `(shortfall - grace) * rate` once the shortfall exceeds
/// the grace period, otherwise zero.
///
/// # Arguments
///
/// * `expected_hours` - Hours expected in the period
/// * `actual_hours` - Hours worked in the period
/// * `grace_period_hours` - Shortfall tolerated without deduction
/// * `hourly_deduction_rate` - Amount deducted per hour beyond grace
///
/// # Returns
///
/// `(shortfall, deduction)`, both unrounded.
#[must_use]
pub fn period_deduction(
    expected_hours: Decimal,
    actual_hours: Decimal,
    grace_period_hours: Decimal,
    hourly_deduction_rate: Decimal,
) -> (Decimal, Decimal) {
    let shortfall: Decimal = (expected_hours - actual_hours).max(Decimal::ZERO);
    let deduction: Decimal = if shortfall > grace_period_hours {
        (shortfall - grace_period_hours) * hourly_deduction_rate
    } else {
        Decimal::ZERO
    };
    (shortfall, deduction)
}

/// Splits a month into consecutive 14-day periods from day 1.
///
/// Expected hours are working days times daily hours, capped at the
/// bi-weekly target when one is configured. The last period may be
/// shorter.
///
/// # Arguments
///
/// * `days` - Classified days of the month in date order
/// * `config` - Effective salary configuration
#[must_use]
pub fn bi_weekly_periods(days: &[ClassifiedDay], config: &SalaryConfig) -> Vec<BiWeeklyPeriod> {
    days.chunks(BI_WEEKLY_PERIOD_DAYS)
        .zip(1_u32..)
        .filter_map(|(chunk, index)| {
            let first: &ClassifiedDay = chunk.first()?;
            let last: &ClassifiedDay = chunk.last()?;

            let working_days: u32 =
                u32::try_from(chunk.iter().filter(|d| d.is_working_day()).count()).ok()?;
            let mut expected_hours: Decimal = Decimal::from(working_days) * config.daily_work_hours;
            if let Some(target) = config.bi_weekly_target_hours {
                expected_hours = expected_hours.min(target);
            }
            let actual_hours: Decimal = chunk.iter().map(ClassifiedDay::work_hours).sum();
            let (shortfall, deduction) = period_deduction(
                expected_hours,
                actual_hours,
                config.grace_period_hours,
                config.hourly_deduction_rate,
            );

            Some(BiWeeklyPeriod {
                index,
                start_date: first.day.date,
                end_date: last.day.date,
                working_days,
                expected_hours,
                actual_hours,
                shortfall,
                deduction: round2(deduction),
            })
        })
        .collect()
}

/// Looks up the weekend deduction for a month.
///
/// # Arguments
///
/// * `tiers` - Configured tiers
/// * `excess_days` - Leave days beyond the paid-leave balance
/// * `sundays_in_month` - Sundays available to deduct
/// * `per_day_salary` - Unrounded per-day salary
#[must_use]
pub fn weekend_deduction(
    tiers: &[WeekendDeductionTier],
    excess_days: Decimal,
    sundays_in_month: u32,
    per_day_salary: Decimal,
) -> WeekendDeduction {
    let tier: Option<&WeekendDeductionTier> = find_weekend_tier(tiers, excess_days);
    let sundays_deducted: u32 = tier.map_or(0, |t| t.sundays_deducted.min(sundays_in_month));

    WeekendDeduction {
        excess_days,
        tier: tier.cloned(),
        sundays_deducted,
        amount: round2(Decimal::from(sundays_deducted) * per_day_salary),
    }
}

/// Calculates payroll for one employee and month.
///
/// # Arguments
///
/// * `inputs` - Summary, configuration and additional pay inputs
///
/// # Returns
///
/// The computed calculation. Totals including manual adjustments are
/// derived on the salary record.
#[must_use]
pub fn calculate_payroll(inputs: &PayrollInputs<'_>) -> PayrollCalculation {
    let summary: &MonthlySummary = inputs.summary;
    let config: &SalaryConfig = inputs.config;
    let on_probation: bool = summary.on_probation;

    let per_day_salary: Decimal = if summary.days_in_month == 0 {
        Decimal::ZERO
    } else {
        inputs.salary_offered / Decimal::from(summary.days_in_month)
    };
    let paid_days: Decimal = if on_probation {
        summary.days_attended
    } else {
        summary.days_to_be_paid_for
    };
    let gross_salary: Decimal = round2(per_day_salary * paid_days);

    let mut deductions: Vec<LineItem> = Vec::new();
    let mut additions: Vec<LineItem> = Vec::new();

    let bi_weekly: Vec<BiWeeklyPeriod> = if on_probation {
        Vec::new()
    } else {
        bi_weekly_periods(inputs.days, config)
    };
    let hourly_deduction: Decimal = bi_weekly.iter().map(|p| p.deduction).sum();
    push(
        &mut deductions,
        LineItemKind::HourlyShortfall,
        format!(
            "Bi-weekly hour shortfall over {} period(s)",
            bi_weekly.iter().filter(|p| !p.deduction.is_zero()).count()
        ),
        hourly_deduction,
    );

    let weekend: WeekendDeduction = if on_probation {
        WeekendDeduction {
            excess_days: summary.pay_loss_days,
            tier: None,
            sundays_deducted: 0,
            amount: Decimal::ZERO,
        }
    } else {
        weekend_deduction(
            &config.weekend_deduction_tiers,
            summary.pay_loss_days,
            summary.sundays_in_month,
            per_day_salary,
        )
    };
    push(
        &mut deductions,
        LineItemKind::WeekendDeduction,
        format!(
            "{} Sunday(s) for {} excess leave day(s)",
            weekend.sundays_deducted,
            round2(weekend.excess_days)
        ),
        weekend.amount,
    );

    push(
        &mut deductions,
        LineItemKind::WfhEmergency,
        format!("{} emergency WFH day(s)", summary.wfh_emergency_days),
        percent_of(
            Decimal::from(summary.wfh_emergency_days) * per_day_salary,
            config.emergency_wfh_deduction,
        ),
    );
    push(
        &mut deductions,
        LineItemKind::WfhCasual,
        format!("{} casual WFH day(s)", summary.wfh_casual_days),
        percent_of(
            Decimal::from(summary.wfh_casual_days) * per_day_salary,
            config.casual_wfh_deduction,
        ),
    );
    push(
        &mut deductions,
        LineItemKind::MissedPunch,
        format!("{} missed punch(es)", summary.missed_punches),
        Decimal::from(summary.missed_punches) * config.missed_punch_penalty,
    );

    statutory_deductions(&mut deductions, config, gross_salary);

    let variable: &VariablePay = inputs.variable_pay;
    push(&mut deductions, LineItemKind::Damages, "Damages", variable.damages);
    push(
        &mut deductions,
        LineItemKind::AdvanceRecovery,
        "Advance recovery",
        variable.advance_recovery,
    );
    push(
        &mut deductions,
        LineItemKind::OtherDeductions,
        "Other deductions",
        variable.other_deductions,
    );

    if !on_probation {
        bonuses(&mut additions, inputs);
    }
    push(&mut additions, LineItemKind::Incentive, "Incentive", variable.incentive);
    push(&mut additions, LineItemKind::Bonus, "Bonus", variable.bonus);
    push(
        &mut additions,
        LineItemKind::OvertimePay,
        "Overtime pay",
        variable.overtime_pay,
    );
    push(
        &mut additions,
        LineItemKind::Reimbursement,
        "Reimbursement",
        variable.reimbursement,
    );

    let leave_accrual: LeaveAccrual = calculate_leave_accrual(
        &config.leave_policy,
        on_probation,
        inputs.leave_balance,
        summary.paid_leaves,
    );

    PayrollCalculation {
        per_day_salary: round2(per_day_salary),
        gross_salary,
        bi_weekly,
        hourly_deduction,
        weekend_deduction: weekend,
        deductions,
        additions,
        leave_accrual,
        on_probation,
    }
}

fn statutory_deductions(deductions: &mut Vec<LineItem>, config: &SalaryConfig, gross: Decimal) {
    let statutory = &config.statutory;
    if statutory.pf_enabled {
        push(
            deductions,
            LineItemKind::ProvidentFund,
            format!("PF at {}%", statutory.pf_percentage),
            percent_of(gross, statutory.pf_percentage),
        );
    }
    if statutory.esi_enabled && gross <= statutory.esi_salary_threshold {
        push(
            deductions,
            LineItemKind::Esi,
            format!("ESI at {}%", statutory.esi_percentage),
            percent_of(gross, statutory.esi_percentage),
        );
    }
    if statutory.professional_tax_enabled {
        push(
            deductions,
            LineItemKind::ProfessionalTax,
            "Professional tax",
            statutory.professional_tax_amount,
        );
    }
    if statutory.tds_enabled {
        push(
            deductions,
            LineItemKind::Tds,
            format!("TDS at {}%", statutory.tds_percentage),
            percent_of(gross, statutory.tds_percentage),
        );
    }
}

fn bonuses(additions: &mut Vec<LineItem>, inputs: &PayrollInputs<'_>) {
    let policy = &inputs.config.bonus_policy;

    let streak: u32 = if inputs.summary.has_full_attendance() {
        inputs.prior_full_attendance_months.saturating_add(1)
    } else {
        0
    };
    if policy.attendance_bonus_months > 0 && streak >= policy.attendance_bonus_months {
        push(
            additions,
            LineItemKind::AttendanceBonus,
            format!("Full attendance for {streak} consecutive month(s)"),
            policy.attendance_bonus_amount,
        );
    }

    let frequency: u32 = policy.accuracy_bonus_frequency_months;
    if inputs.accuracy_qualified
        && frequency > 0
        && u32::from(inputs.summary.period.month()) % frequency == 0
    {
        push(
            additions,
            LineItemKind::AccuracyBonus,
            "Accuracy bonus",
            policy.accuracy_bonus_amount,
        );
    }
}

/// Appends a line item when its rounded amount is positive.
fn push(items: &mut Vec<LineItem>, kind: LineItemKind, description: impl Into<String>, amount: Decimal) {
    let item: LineItem = LineItem::new(kind, description, amount);
    if item.amount > Decimal::ZERO {
        items.push(item);
    }
}
