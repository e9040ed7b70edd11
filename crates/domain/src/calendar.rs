// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Month calendar construction.
//!
//! Classifies each day of a payroll month as weekday or weekly off and
//! attaches holiday calendar entries, independent of any attendance.

use crate::config::SaturdayPattern;
use crate::types::{HolidayEntry, HolidayKind, PayrollMonth};
use serde::{Deserialize, Serialize};
use time::{Date, Weekday};

/// A day of a payroll month before attendance is joined in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: Date,
    pub day_of_week: Weekday,
    /// Sunday, or a Saturday matched by the Saturday-off pattern.
    pub is_weekend: bool,
    pub holiday: Option<HolidayEntry>,
}

impl CalendarDay {
    /// Returns true if the day counts toward working days.
    ///
    /// A working day is not a weekend and not a public holiday. Restricted
    /// holidays remain working days.
    #[must_use]
    pub fn is_working_day(&self) -> bool {
        !self.is_weekend && !self.is_public_holiday()
    }

    /// Returns true if a public holiday falls on this day.
    #[must_use]
    pub fn is_public_holiday(&self) -> bool {
        self.holiday
            .as_ref()
            .is_some_and(|h| h.kind == HolidayKind::Public)
    }

    /// Returns true if this day is a Sunday.
    #[must_use]
    pub fn is_sunday(&self) -> bool {
        self.day_of_week == Weekday::Sunday
    }
}

/// Returns the 1-based week-of-month index for a day of the month.
#[must_use]
pub const fn week_of_month(day_of_month: u8) -> u8 {
    (day_of_month.saturating_sub(1)) / 7 + 1
}

/// Returns true if the date is a weekly off under the given pattern.
#[must_use]
pub fn is_weekly_off(date: Date, pattern: SaturdayPattern) -> bool {
    match date.weekday() {
        Weekday::Sunday => true,
        Weekday::Saturday => pattern.is_off(week_of_month(date.day())),
        _ => false,
    }
}

/// Builds the calendar skeleton for a payroll month.
///
/// Holiday entries outside the month are ignored. When two entries share a
/// date, a public holiday wins over a restricted one.
///
/// # Arguments
///
/// * `period` - The payroll month
/// * `pattern` - Saturday-off pattern from the effective configuration
/// * `holidays` - Holiday calendar entries
///
/// # Returns
///
/// One `CalendarDay` per day of the month, in date order.
#[must_use]
pub fn build_calendar(
    period: PayrollMonth,
    pattern: SaturdayPattern,
    holidays: &[HolidayEntry],
) -> Vec<CalendarDay> {
    period
        .dates()
        .map(|date| CalendarDay {
            date,
            day_of_week: date.weekday(),
            is_weekend: is_weekly_off(date, pattern),
            holiday: holiday_on(holidays, date),
        })
        .collect()
}

fn holiday_on(holidays: &[HolidayEntry], date: Date) -> Option<HolidayEntry> {
    let mut matches = holidays.iter().filter(|h| h.date == date);
    let first: &HolidayEntry = matches.next()?;
    if first.kind == HolidayKind::Public {
        return Some(first.clone());
    }
    Some(
        matches
            .find(|h| h.kind == HolidayKind::Public)
            .unwrap_or(first)
            .clone(),
    )
}

/// Counts the Sundays in a calendar.
#[must_use]
pub fn count_sundays(days: &[CalendarDay]) -> u32 {
    u32::try_from(days.iter().filter(|d| d.is_sunday()).count()).unwrap_or(u32::MAX)
}
