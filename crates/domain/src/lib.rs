// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod calendar;
mod classifier;
mod config;
mod error;
mod leave_accrual;
mod line_item;
mod money;
mod payroll;
mod salary_record;
mod summary;
mod types;

#[cfg(test)]
mod tests;

pub use calendar::{CalendarDay, build_calendar, count_sundays, is_weekly_off, week_of_month};
pub use classifier::{ClassifiedDay, DayStatus, classify_days, parse_attendance_status};
pub use config::{
    BonusPolicy, LeavePolicy, SalaryConfig, SalaryConfigOverrides, SaturdayPattern,
    SpecialLeaveEntitlement, StatutoryConfig, WeekendDeductionTier, find_weekend_tier,
    resolve_effective_config, validate_salary_config, validate_weekend_tiers,
};
pub use error::DomainError;
pub use leave_accrual::{LeaveAccrual, calculate_leave_accrual, monthly_accrual_days};
pub use line_item::{AdjustmentKind, LineItem, LineItemKind, ManualAdjustment};
pub use money::{DECIMAL_PLACES, percent_of, round2};
pub use payroll::{
    BI_WEEKLY_PERIOD_DAYS, BiWeeklyPeriod, PayrollCalculation, PayrollInputs, WeekendDeduction,
    bi_weekly_periods, calculate_payroll, period_deduction, weekend_deduction,
};
pub use salary_record::{PayrollWarning, SalaryRecord, SalaryStatus};
pub use summary::{LeaveFigures, MonthlySummary, aggregate_month};
pub use types::{
    AttendanceRecord, Employee, EmployeeId, HolidayEntry, HolidayKind, LeaveBalance, LeaveRequest,
    LeaveType, MAX_PAYROLL_YEAR, MIN_PAYROLL_YEAR, PayrollMonth, RequestStatus, VariablePay,
    WfhKind, WfhRequest,
};
