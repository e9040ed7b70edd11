// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::config::SalaryConfigOverrides;
use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, Duration, Month};

/// Earliest year accepted for a payroll period.
pub const MIN_PAYROLL_YEAR: i32 = 1900;
/// Latest year accepted for a payroll period.
pub const MAX_PAYROLL_YEAR: i32 = 2999;

/// Identifier of an employee in the HR directory.
///
/// Identifiers are trimmed on construction; comparison is exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    /// Creates a new `EmployeeId`.
    ///
    /// # Arguments
    ///
    /// * `value` - The raw identifier
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    /// Creates a new `EmployeeId`, rejecting blank identifiers.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty after trimming.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let id: Self = Self::new(value);
        if id.0.is_empty() {
            return Err(DomainError::InvalidEmployeeId(String::from(
                "Employee id cannot be empty",
            )));
        }
        Ok(id)
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wire representation of a payroll month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct PayrollMonthRepr {
    year: i32,
    month: u8,
}

/// A calendar month for which attendance is summarised and salary computed.
///
/// The month is validated on construction so every `PayrollMonth` in the
/// system refers to a real calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "PayrollMonthRepr", into = "PayrollMonthRepr")]
pub struct PayrollMonth {
    first_day: Date,
}

impl TryFrom<PayrollMonthRepr> for PayrollMonth {
    type Error = DomainError;

    fn try_from(repr: PayrollMonthRepr) -> Result<Self, Self::Error> {
        Self::new(repr.month, repr.year)
    }
}

impl From<PayrollMonth> for PayrollMonthRepr {
    fn from(period: PayrollMonth) -> Self {
        Self {
            year: period.year(),
            month: period.month(),
        }
    }
}

impl PayrollMonth {
    /// Creates a new payroll month.
    ///
    /// # Arguments
    ///
    /// * `month` - The month number (1-12)
    /// * `year` - The calendar year
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPeriod` if the month is not 1-12 or the
    /// year is outside the supported range.
    pub fn new(month: u8, year: i32) -> Result<Self, DomainError> {
        if !(MIN_PAYROLL_YEAR..=MAX_PAYROLL_YEAR).contains(&year) {
            return Err(DomainError::InvalidPeriod {
                month,
                year,
                reason: format!("Year must be between {MIN_PAYROLL_YEAR} and {MAX_PAYROLL_YEAR}"),
            });
        }

        let calendar_month: Month =
            Month::try_from(month).map_err(|_| DomainError::InvalidPeriod {
                month,
                year,
                reason: String::from("Month must be between 1 and 12"),
            })?;

        let first_day: Date = Date::from_calendar_date(year, calendar_month, 1).map_err(|e| {
            DomainError::InvalidPeriod {
                month,
                year,
                reason: e.to_string(),
            }
        })?;

        Ok(Self { first_day })
    }

    /// Returns the payroll month containing the given date.
    #[must_use]
    pub fn containing(date: Date) -> Self {
        Self {
            first_day: date.replace_day(1).unwrap_or(date),
        }
    }

    /// Returns the calendar year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// Returns the month number (1-12).
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.first_day.month() as u8
    }

    /// Returns the first day of the month.
    #[must_use]
    pub const fn first_day(&self) -> Date {
        self.first_day
    }

    /// Returns the number of calendar days in the month.
    #[must_use]
    pub fn days_in_month(&self) -> u8 {
        (28..=31)
            .rev()
            .find(|day| self.first_day.replace_day(*day).is_ok())
            .unwrap_or(28)
    }

    /// Returns the last day of the month.
    #[must_use]
    pub fn last_day(&self) -> Date {
        self.first_day
            .replace_day(self.days_in_month())
            .unwrap_or(self.first_day)
    }

    /// Returns every date in the month, in order.
    pub fn dates(&self) -> impl Iterator<Item = Date> + use<> {
        let first_day: Date = self.first_day;
        (0..i64::from(self.days_in_month())).map(move |offset| first_day + Duration::days(offset))
    }

    /// Checks whether a date falls inside this month.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year() && date.month() == self.first_day.month()
    }

    /// Returns the month before this one, if it is still within range.
    #[must_use]
    pub fn previous(&self) -> Option<Self> {
        let day_before: Date = self.first_day.previous_day()?;
        if day_before.year() < MIN_PAYROLL_YEAR {
            return None;
        }
        Some(Self::containing(day_before))
    }
}

impl std::fmt::Display for PayrollMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year(), self.month())
    }
}

/// An employee as read from the HR directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// The employee identifier.
    pub employee_id: EmployeeId,
    /// Display name.
    pub name: String,
    /// Job role.
    #[serde(default)]
    pub role: String,
    /// Department; used to look up department-level policy overrides.
    #[serde(default)]
    pub department: String,
    /// Date of joining; drives probation.
    pub date_of_joining: Date,
    /// Monthly salary offered.
    pub salary_offered: Decimal,
    /// Employee-level policy overrides.
    #[serde(default)]
    pub salary_config: SalaryConfigOverrides,
}

impl Employee {
    /// Returns true while the employee is within the probation window.
    ///
    /// The window covers `probation_period_days` days starting on the date
    /// of joining.
    ///
    /// # Arguments
    ///
    /// * `as_of` - The date probation is evaluated at
    /// * `probation_period_days` - Length of the probation window
    #[must_use]
    pub fn is_on_probation(&self, as_of: Date, probation_period_days: u32) -> bool {
        let probation_end: Date = self
            .date_of_joining
            .saturating_add(Duration::days(i64::from(probation_period_days)));
        as_of >= self.date_of_joining && as_of < probation_end
    }
}

/// One raw attendance ledger entry for an employee and a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub employee_id: EmployeeId,
    pub date: Date,
    /// Punch-in as recorded by the device, if any.
    #[serde(default)]
    pub in_time: Option<String>,
    /// Punch-out as recorded by the device, if any.
    #[serde(default)]
    pub out_time: Option<String>,
    /// Decimal hours worked.
    #[serde(default)]
    pub work_hours: Decimal,
    /// Decimal overtime hours.
    #[serde(default)]
    pub ot_hours: Decimal,
    /// Free-text status as entered or uploaded.
    pub status: String,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl AttendanceRecord {
    /// Returns true when exactly one of the two punches is present.
    #[must_use]
    pub fn has_missed_punch(&self) -> bool {
        let punched_in: bool = self.in_time.as_deref().is_some_and(|t| !t.trim().is_empty());
        let punched_out: bool = self
            .out_time
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty());
        punched_in != punched_out
    }
}

/// Kind of leave requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeaveType {
    Sick,
    Earned,
    Special,
    RestrictedHoliday,
}

/// Workflow status of a leave or WFH request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Applied,
    Approved,
    Rejected,
    Cancelled,
}

/// A leave request spanning one or more days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub employee_id: EmployeeId,
    pub start_date: Date,
    pub end_date: Date,
    pub leave_type: LeaveType,
    pub status: RequestStatus,
    /// Whether the leave is paid. Unflagged leave is unpaid.
    #[serde(default)]
    pub is_paid: bool,
}

impl LeaveRequest {
    /// Returns true if the request is approved.
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.status == RequestStatus::Approved
    }

    /// Returns true if the date falls within the requested range (inclusive).
    #[must_use]
    pub fn covers(&self, date: Date) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Whether a holiday is observed by everyone or optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HolidayKind {
    /// Public holiday; not a working day.
    Public,
    /// Restricted (optional) holiday; still a working day.
    Restricted,
}

/// An entry in the company holiday calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayEntry {
    pub date: Date,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: HolidayKind,
}

/// Work-from-home category, each with its own deduction percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WfhKind {
    Emergency,
    Casual,
}

/// A work-from-home request for a single date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WfhRequest {
    pub employee_id: EmployeeId,
    pub date: Date,
    pub kind: WfhKind,
    pub status: RequestStatus,
}

/// Variable pay items entered for an employee and month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VariablePay {
    pub incentive: Decimal,
    pub bonus: Decimal,
    pub overtime_pay: Decimal,
    pub reimbursement: Decimal,
    pub damages: Decimal,
    pub advance_recovery: Decimal,
    pub other_deductions: Decimal,
}

/// Opening leave position for an employee at the start of a month.
///
/// Supplying a balance switches paid-leave accounting from "every approved
/// paid request counts" to "paid leave is limited by what is available".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeaveBalance {
    /// Paid leave days available at the start of the month.
    pub opening_paid_leave_days: Decimal,
    /// Restricted holidays already taken earlier in the calendar year.
    pub restricted_holidays_used: u32,
}
