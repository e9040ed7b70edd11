// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Monthly leave accrual.
//!
//! Sick leave and earned leave are credited once per month outside
//! probation. When an opening balance is known, the closing balance is
//! carried forward up to the configured cap.

use crate::config::LeavePolicy;
use crate::types::LeaveBalance;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Leave credited for one month and the resulting balance movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveAccrual {
    /// False during probation; all credits are then zero.
    pub applied: bool,
    pub sick_days: Decimal,
    pub earned_days: Decimal,
    /// `sick_days + earned_days`.
    pub total_days: Decimal,
    /// Paid leave days consumed this month.
    pub paid_leaves_used: Decimal,
    pub opening_balance: Option<Decimal>,
    pub closing_balance: Option<Decimal>,
    /// True if the closing balance was cut down to the carry-forward cap.
    pub carry_forward_capped: bool,
}

/// Returns the leave days credited for one month.
///
/// # Arguments
///
/// * `policy` - The leave policy
/// * `on_probation` - Whether the employee is on probation this month
#[must_use]
pub fn monthly_accrual_days(policy: &LeavePolicy, on_probation: bool) -> Decimal {
    if on_probation {
        return Decimal::ZERO;
    }
    policy.sick_leave_per_month + policy.earned_leave_accrual_rate
}

/// Calculates the leave accrual for one month.
///
/// The closing balance is `min(opening + accrual - used, maxCarryForward)`,
/// never below zero. Without an opening balance only the credits are
/// reported.
///
/// # Arguments
///
/// * `policy` - The leave policy
/// * `on_probation` - Whether the employee is on probation this month
/// * `balance` - Opening leave position, if known
/// * `paid_leaves_used` - Paid leave days taken this month
#[must_use]
pub fn calculate_leave_accrual(
    policy: &LeavePolicy,
    on_probation: bool,
    balance: Option<&LeaveBalance>,
    paid_leaves_used: Decimal,
) -> LeaveAccrual {
    let applied: bool = !on_probation;
    let (sick_days, earned_days): (Decimal, Decimal) = if applied {
        (policy.sick_leave_per_month, policy.earned_leave_accrual_rate)
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };
    let total_days: Decimal = sick_days + earned_days;

    let opening_balance: Option<Decimal> = balance.map(|b| b.opening_paid_leave_days);
    let mut carry_forward_capped: bool = false;
    let closing_balance: Option<Decimal> = opening_balance.map(|opening| {
        let uncapped: Decimal = (opening + total_days - paid_leaves_used).max(Decimal::ZERO);
        if uncapped > policy.max_carry_forward {
            carry_forward_capped = true;
            policy.max_carry_forward
        } else {
            uncapped
        }
    });

    LeaveAccrual {
        applied,
        sick_days,
        earned_days,
        total_days,
        paid_leaves_used,
        opening_balance,
        closing_balance,
        carry_forward_capped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn policy() -> LeavePolicy {
        LeavePolicy {
            sick_leave_per_month: dec!(1),
            earned_leave_accrual_rate: dec!(1.5),
            max_carry_forward: dec!(10),
            special_leave_entitlements: Vec::new(),
            restricted_holidays_per_year: 2,
        }
    }

    #[test]
    fn test_accrual_without_balance_reports_credits_only() {
        let accrual: LeaveAccrual = calculate_leave_accrual(&policy(), false, None, dec!(1));

        assert!(accrual.applied);
        assert_eq!(accrual.total_days, dec!(2.5));
        assert_eq!(accrual.opening_balance, None);
        assert_eq!(accrual.closing_balance, None);
    }

    #[test]
    fn test_accrual_closing_balance() {
        let balance: LeaveBalance = LeaveBalance {
            opening_paid_leave_days: dec!(4),
            restricted_holidays_used: 0,
        };
        let accrual: LeaveAccrual =
            calculate_leave_accrual(&policy(), false, Some(&balance), dec!(2));

        // 4 + 2.5 - 2
        assert_eq!(accrual.closing_balance, Some(dec!(4.5)));
        assert!(!accrual.carry_forward_capped);
    }

    #[test]
    fn test_accrual_capped_at_carry_forward() {
        let balance: LeaveBalance = LeaveBalance {
            opening_paid_leave_days: dec!(9),
            restricted_holidays_used: 0,
        };
        let accrual: LeaveAccrual =
            calculate_leave_accrual(&policy(), false, Some(&balance), Decimal::ZERO);

        assert_eq!(accrual.closing_balance, Some(dec!(10)));
        assert!(accrual.carry_forward_capped);
    }

    #[test]
    fn test_no_accrual_during_probation() {
        let accrual: LeaveAccrual = calculate_leave_accrual(&policy(), true, None, Decimal::ZERO);

        assert!(!accrual.applied);
        assert_eq!(accrual.total_days, Decimal::ZERO);
        assert_eq!(monthly_accrual_days(&policy(), true), Decimal::ZERO);
    }
}
