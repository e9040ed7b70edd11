// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Salary policy configuration and layered resolution.
//!
//! A company-wide `SalaryConfig` provides defaults. Department and employee
//! `SalaryConfigOverrides` are applied on top, in that order, to produce the
//! effective configuration for one calculation. Resolution happens once per
//! call; calculation functions never look policy up on their own.

use crate::error::DomainError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Which Saturdays of the month are weekly offs. Sundays are always off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SaturdayPattern {
    /// First and third Saturdays off.
    #[default]
    #[serde(rename = "1st_3rd")]
    FirstAndThird,
    /// Second and fourth Saturdays off.
    #[serde(rename = "2nd_4th")]
    SecondAndFourth,
    /// Every Saturday off.
    #[serde(rename = "all")]
    All,
    /// No Saturday off.
    #[serde(rename = "none")]
    None,
}

impl SaturdayPattern {
    /// Returns true if a Saturday in the given week of the month is off.
    ///
    /// # Arguments
    ///
    /// * `week_of_month` - 1-based week index, `floor((day - 1) / 7) + 1`
    #[must_use]
    pub const fn is_off(&self, week_of_month: u8) -> bool {
        match self {
            Self::FirstAndThird => matches!(week_of_month, 1 | 3),
            Self::SecondAndFourth => matches!(week_of_month, 2 | 4),
            Self::All => true,
            Self::None => false,
        }
    }
}

/// One row of the excess-leave weekend deduction table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekendDeductionTier {
    /// Lower bound of excess leave days (inclusive).
    pub min_excess_days: Decimal,
    /// Upper bound of excess leave days (inclusive).
    pub max_excess_days: Decimal,
    /// Number of Sundays whose pay is deducted.
    pub sundays_deducted: u32,
}

impl WeekendDeductionTier {
    /// Creates a new tier.
    #[must_use]
    pub const fn new(min_excess_days: Decimal, max_excess_days: Decimal, sundays_deducted: u32) -> Self {
        Self {
            min_excess_days,
            max_excess_days,
            sundays_deducted,
        }
    }

    /// Returns true if the excess leave days fall within this tier.
    ///
    /// A tier followed by `next` covers `min..next.min`, so fractional
    /// excess between two configured ranges belongs to the lower tier. The
    /// last tier covers `min..=max`.
    #[must_use]
    pub fn contains(&self, excess_days: Decimal, next: Option<&Self>) -> bool {
        if excess_days < self.min_excess_days {
            return false;
        }
        next.map_or(excess_days <= self.max_excess_days, |n| {
            excess_days < n.min_excess_days
        })
    }
}

/// Finds the tier covering the given number of excess leave days.
///
/// Tiers must be ordered (see `validate_weekend_tiers`). Returns `None`
/// below the first tier or above the last, which means no weekend
/// deduction.
#[must_use]
pub fn find_weekend_tier(
    tiers: &[WeekendDeductionTier],
    excess_days: Decimal,
) -> Option<&WeekendDeductionTier> {
    tiers
        .iter()
        .enumerate()
        .find(|(index, tier)| tier.contains(excess_days, tiers.get(index + 1)))
        .map(|(_, tier)| tier)
}

/// A named special leave entitlement (e.g. marriage, bereavement).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialLeaveEntitlement {
    pub name: String,
    pub days: Decimal,
}

/// Leave policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeavePolicy {
    /// Sick leave days credited each month.
    pub sick_leave_per_month: Decimal,
    /// Earned leave days accrued each month.
    pub earned_leave_accrual_rate: Decimal,
    /// Cap on the paid leave balance carried into the next month.
    pub max_carry_forward: Decimal,
    /// Special leave entitlements. When non-empty, paid special leave in a
    /// month is capped at their total.
    #[serde(default)]
    pub special_leave_entitlements: Vec<SpecialLeaveEntitlement>,
    /// Restricted holidays an employee may take per calendar year.
    pub restricted_holidays_per_year: u32,
}

impl Default for LeavePolicy {
    fn default() -> Self {
        Self {
            sick_leave_per_month: dec!(0.5),
            earned_leave_accrual_rate: dec!(1.5),
            max_carry_forward: dec!(30),
            special_leave_entitlements: Vec::new(),
            restricted_holidays_per_year: 2,
        }
    }
}

/// Attendance and accuracy bonus rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusPolicy {
    pub attendance_bonus_amount: Decimal,
    /// Consecutive full-attendance months required, ending with the current month.
    pub attendance_bonus_months: u32,
    pub accuracy_bonus_amount: Decimal,
    /// The accuracy bonus is considered in months whose number is a multiple of this.
    pub accuracy_bonus_frequency_months: u32,
}

impl Default for BonusPolicy {
    fn default() -> Self {
        Self {
            attendance_bonus_amount: Decimal::ZERO,
            attendance_bonus_months: 3,
            accuracy_bonus_amount: Decimal::ZERO,
            accuracy_bonus_frequency_months: 1,
        }
    }
}

/// Statutory deduction rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatutoryConfig {
    pub pf_enabled: bool,
    pub pf_percentage: Decimal,
    pub esi_enabled: bool,
    pub esi_percentage: Decimal,
    /// ESI applies only when gross salary is at or below this amount.
    pub esi_salary_threshold: Decimal,
    pub professional_tax_enabled: bool,
    pub professional_tax_amount: Decimal,
    pub tds_enabled: bool,
    pub tds_percentage: Decimal,
}

impl Default for StatutoryConfig {
    fn default() -> Self {
        Self {
            pf_enabled: false,
            pf_percentage: dec!(12),
            esi_enabled: false,
            esi_percentage: dec!(0.75),
            esi_salary_threshold: dec!(21000),
            professional_tax_enabled: false,
            professional_tax_amount: dec!(200),
            tds_enabled: false,
            tds_percentage: Decimal::ZERO,
        }
    }
}

/// Effective salary policy for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryConfig {
    pub daily_work_hours: Decimal,
    pub saturdays_off_pattern: SaturdayPattern,
    /// Ceiling on the expected hours of one 14-day period. Uncapped when
    /// absent.
    #[serde(default)]
    pub bi_weekly_target_hours: Option<Decimal>,
    pub grace_period_hours: Decimal,
    pub hourly_deduction_rate: Decimal,
    pub leave_policy: LeavePolicy,
    pub weekend_deduction_tiers: Vec<WeekendDeductionTier>,
    /// Percentage of a day's pay deducted per emergency WFH day.
    pub emergency_wfh_deduction: Decimal,
    /// Percentage of a day's pay deducted per casual WFH day.
    pub casual_wfh_deduction: Decimal,
    /// Attendance credited for a WFH day (0 to 1).
    pub wfh_attendance_credit: Decimal,
    pub missed_punch_penalty: Decimal,
    pub probation_period_days: u32,
    pub bonus_policy: BonusPolicy,
    pub statutory: StatutoryConfig,
}

impl Default for SalaryConfig {
    fn default() -> Self {
        Self {
            daily_work_hours: dec!(9),
            saturdays_off_pattern: SaturdayPattern::FirstAndThird,
            bi_weekly_target_hours: None,
            grace_period_hours: dec!(2),
            hourly_deduction_rate: Decimal::ZERO,
            leave_policy: LeavePolicy::default(),
            weekend_deduction_tiers: vec![
                WeekendDeductionTier::new(dec!(0), dec!(2), 0),
                WeekendDeductionTier::new(dec!(3), dec!(4), 1),
                WeekendDeductionTier::new(dec!(5), dec!(6), 2),
                WeekendDeductionTier::new(dec!(7), dec!(999), 4),
            ],
            emergency_wfh_deduction: Decimal::ZERO,
            casual_wfh_deduction: dec!(50),
            wfh_attendance_credit: Decimal::ONE,
            missed_punch_penalty: Decimal::ZERO,
            probation_period_days: 90,
            bonus_policy: BonusPolicy::default(),
            statutory: StatutoryConfig::default(),
        }
    }
}

/// Partial salary policy applied over a base configuration.
///
/// Every field is optional. Nested policy blocks (leave, bonus, statutory)
/// replace the base block as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalaryConfigOverrides {
    pub daily_work_hours: Option<Decimal>,
    pub saturdays_off_pattern: Option<SaturdayPattern>,
    pub bi_weekly_target_hours: Option<Decimal>,
    pub grace_period_hours: Option<Decimal>,
    pub hourly_deduction_rate: Option<Decimal>,
    pub leave_policy: Option<LeavePolicy>,
    pub weekend_deduction_tiers: Option<Vec<WeekendDeductionTier>>,
    pub emergency_wfh_deduction: Option<Decimal>,
    pub casual_wfh_deduction: Option<Decimal>,
    pub wfh_attendance_credit: Option<Decimal>,
    pub missed_punch_penalty: Option<Decimal>,
    pub probation_period_days: Option<u32>,
    pub bonus_policy: Option<BonusPolicy>,
    pub statutory: Option<StatutoryConfig>,
}

impl SalaryConfigOverrides {
    /// Applies these overrides to a base configuration.
    pub fn apply_to(&self, base: &mut SalaryConfig) {
        if let Some(value) = self.daily_work_hours {
            base.daily_work_hours = value;
        }
        if let Some(value) = self.saturdays_off_pattern {
            base.saturdays_off_pattern = value;
        }
        if let Some(value) = self.bi_weekly_target_hours {
            base.bi_weekly_target_hours = Some(value);
        }
        if let Some(value) = self.grace_period_hours {
            base.grace_period_hours = value;
        }
        if let Some(value) = self.hourly_deduction_rate {
            base.hourly_deduction_rate = value;
        }
        if let Some(value) = &self.leave_policy {
            base.leave_policy = value.clone();
        }
        if let Some(value) = &self.weekend_deduction_tiers {
            base.weekend_deduction_tiers = value.clone();
        }
        if let Some(value) = self.emergency_wfh_deduction {
            base.emergency_wfh_deduction = value;
        }
        if let Some(value) = self.casual_wfh_deduction {
            base.casual_wfh_deduction = value;
        }
        if let Some(value) = self.wfh_attendance_credit {
            base.wfh_attendance_credit = value;
        }
        if let Some(value) = self.missed_punch_penalty {
            base.missed_punch_penalty = value;
        }
        if let Some(value) = self.probation_period_days {
            base.probation_period_days = value;
        }
        if let Some(value) = &self.bonus_policy {
            base.bonus_policy = value.clone();
        }
        if let Some(value) = &self.statutory {
            base.statutory = value.clone();
        }
    }
}

/// Resolves the effective configuration for one employee.
///
/// `effective = merge(company, department?, employee)`, later layers winning.
/// The merged result is validated before it is returned.
///
/// # Arguments
///
/// * `company` - Company-wide defaults
/// * `department` - Optional department-level overrides
/// * `employee` - Employee-level overrides
///
/// # Errors
///
/// Returns an error if the merged configuration fails validation.
pub fn resolve_effective_config(
    company: &SalaryConfig,
    department: Option<&SalaryConfigOverrides>,
    employee: &SalaryConfigOverrides,
) -> Result<SalaryConfig, DomainError> {
    let mut effective: SalaryConfig = company.clone();
    if let Some(department) = department {
        department.apply_to(&mut effective);
    }
    employee.apply_to(&mut effective);

    validate_salary_config(&effective)?;
    Ok(effective)
}

/// Validates a salary configuration.
///
/// # Errors
///
/// Returns an error if:
/// - `dailyWorkHours` is not in (0, 24]
/// - A percentage is outside [0, 100]
/// - A rate, amount or hour count is negative
/// - `wfhAttendanceCredit` is outside [0, 1]
/// - A bonus is configured with a zero month count
/// - Weekend deduction tiers are malformed, unordered or overlapping
pub fn validate_salary_config(config: &SalaryConfig) -> Result<(), DomainError> {
    if config.daily_work_hours <= Decimal::ZERO || config.daily_work_hours > dec!(24) {
        return Err(invalid(
            "dailyWorkHours",
            "must be greater than 0 and at most 24",
        ));
    }

    if let Some(target) = config.bi_weekly_target_hours {
        if target <= Decimal::ZERO {
            return Err(invalid("biWeeklyTargetHours", "must be greater than 0"));
        }
    }

    for (field, value) in [
        ("emergencyWFHDeduction", config.emergency_wfh_deduction),
        ("casualWFHDeduction", config.casual_wfh_deduction),
        ("pfPercentage", config.statutory.pf_percentage),
        ("esiPercentage", config.statutory.esi_percentage),
        ("tdsPercentage", config.statutory.tds_percentage),
    ] {
        validate_percentage(field, value)?;
    }

    for (field, value) in [
        ("gracePeriodHours", config.grace_period_hours),
        ("hourlyDeductionRate", config.hourly_deduction_rate),
        ("missedPunchPenalty", config.missed_punch_penalty),
        ("sickLeavePerMonth", config.leave_policy.sick_leave_per_month),
        (
            "earnedLeaveAccrualRate",
            config.leave_policy.earned_leave_accrual_rate,
        ),
        ("maxCarryForward", config.leave_policy.max_carry_forward),
        (
            "attendanceBonusAmount",
            config.bonus_policy.attendance_bonus_amount,
        ),
        ("accuracyBonusAmount", config.bonus_policy.accuracy_bonus_amount),
        ("esiSalaryThreshold", config.statutory.esi_salary_threshold),
        (
            "professionalTaxAmount",
            config.statutory.professional_tax_amount,
        ),
    ] {
        if value < Decimal::ZERO {
            return Err(invalid(field, "must not be negative"));
        }
    }

    for entitlement in &config.leave_policy.special_leave_entitlements {
        if entitlement.days < Decimal::ZERO {
            return Err(invalid(
                "specialLeaveEntitlements",
                &format!("'{}' has negative days", entitlement.name),
            ));
        }
    }

    if config.wfh_attendance_credit < Decimal::ZERO || config.wfh_attendance_credit > Decimal::ONE
    {
        return Err(invalid("wfhAttendanceCredit", "must be between 0 and 1"));
    }

    if config.bonus_policy.attendance_bonus_amount > Decimal::ZERO
        && config.bonus_policy.attendance_bonus_months == 0
    {
        return Err(invalid("attendanceBonusMonths", "must be at least 1"));
    }

    if config.bonus_policy.accuracy_bonus_amount > Decimal::ZERO
        && config.bonus_policy.accuracy_bonus_frequency_months == 0
    {
        return Err(invalid("accuracyBonusFrequencyMonths", "must be at least 1"));
    }

    validate_weekend_tiers(&config.weekend_deduction_tiers)
}

/// Validates the weekend deduction tier table.
///
/// Tiers must have non-negative bounds with `min <= max`, be ordered by
/// `minExcessDays`, and not overlap. At lookup a tier extends up to the
/// next tier's `minExcessDays` (exclusive), so an excess of 4.5 days with
/// tiers `{3,4}` and `{5,6}` falls in `{3,4}`. Only the last tier is bounded
/// by its own `maxExcessDays`.
///
/// # Errors
///
/// Returns `DomainError::InvalidWeekendTier` for the first offending tier.
pub fn validate_weekend_tiers(tiers: &[WeekendDeductionTier]) -> Result<(), DomainError> {
    for (index, tier) in tiers.iter().enumerate() {
        if tier.min_excess_days < Decimal::ZERO {
            return Err(DomainError::InvalidWeekendTier {
                index,
                reason: String::from("minExcessDays must not be negative"),
            });
        }
        if tier.min_excess_days > tier.max_excess_days {
            return Err(DomainError::InvalidWeekendTier {
                index,
                reason: format!(
                    "minExcessDays {} is greater than maxExcessDays {}",
                    tier.min_excess_days, tier.max_excess_days
                ),
            });
        }
        if index > 0 {
            let previous: &WeekendDeductionTier = &tiers[index - 1];
            if tier.min_excess_days < previous.min_excess_days {
                return Err(DomainError::InvalidWeekendTier {
                    index,
                    reason: String::from("tiers must be ordered by minExcessDays"),
                });
            }
            if tier.min_excess_days <= previous.max_excess_days {
                return Err(DomainError::InvalidWeekendTier {
                    index,
                    reason: format!(
                        "range {}..={} overlaps the previous tier ending at {}",
                        tier.min_excess_days, tier.max_excess_days, previous.max_excess_days
                    ),
                });
            }
        }
    }
    Ok(())
}

fn validate_percentage(field: &str, value: Decimal) -> Result<(), DomainError> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(invalid(field, "must be between 0 and 100"));
    }
    Ok(())
}

fn invalid(field: &str, reason: &str) -> DomainError {
    DomainError::ConfigurationInvalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
