// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attendance classification.
//!
//! Joins each calendar day with the attendance ledger, approved leave and
//! approved WFH requests, and resolves exactly one `DayStatus` per day.
//!
//! Precedence, highest first:
//! 1. An attendance record for the date (its free-text status is parsed here,
//!    once, into a `DayStatus`)
//! 2. An approved leave request covering the date
//! 3. A holiday calendar entry
//! 4. A weekly off
//! 5. Otherwise the day is not marked
//!
//! Attendance is checked first so that work recorded on a weekly off or a
//! holiday is credited.

use crate::calendar::CalendarDay;
use crate::types::{AttendanceRecord, HolidayKind, LeaveRequest, RequestStatus, WfhKind, WfhRequest};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use time::Date;

/// Resolved status of a single day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    Present,
    HalfPresent,
    Absent,
    Leave,
    WfhEmergency,
    WfhCasual,
    WeeklyOff,
    /// Worked on a weekly off.
    WeeklyOffPresent,
    Holiday,
    RestrictedHoliday,
    /// Working day with no record, leave or holiday.
    NotMarked,
    /// Recorded status outside the known vocabulary; never attended.
    Other(String),
}

impl DayStatus {
    /// Returns the fraction of a day attended.
    ///
    /// # Arguments
    ///
    /// * `wfh_credit` - Attendance credited for a WFH day
    #[must_use]
    pub fn attended_fraction(&self, wfh_credit: Decimal) -> Decimal {
        match self {
            Self::Present | Self::WeeklyOffPresent => Decimal::ONE,
            Self::HalfPresent => dec!(0.5),
            Self::WfhEmergency | Self::WfhCasual => wfh_credit,
            Self::Absent
            | Self::Leave
            | Self::WeeklyOff
            | Self::Holiday
            | Self::RestrictedHoliday
            | Self::NotMarked
            | Self::Other(_) => Decimal::ZERO,
        }
    }
}

/// Parses a free-text attendance status into a `DayStatus`.
///
/// Matching is case-insensitive and ignores spaces, hyphens and underscores,
/// so `"Weekly Off - Present"` and `"weeklyoff_present"` parse the same.
/// A WFH status takes its kind from the approved WFH request for the date
/// when there is one, otherwise from the text, otherwise casual.
///
/// # Arguments
///
/// * `raw` - The recorded status string
/// * `requested_wfh` - Kind of the approved WFH request for the date, if any
#[must_use]
pub fn parse_attendance_status(raw: &str, requested_wfh: Option<WfhKind>) -> DayStatus {
    let normalized: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .collect();

    let half: bool = normalized.contains('½') || normalized.contains("half");

    if normalized.contains("weeklyoff") {
        return if half && normalized.contains("present") {
            DayStatus::HalfPresent
        } else if normalized.contains("present") {
            DayStatus::WeeklyOffPresent
        } else {
            DayStatus::WeeklyOff
        };
    }

    if half {
        return DayStatus::HalfPresent;
    }

    if normalized.contains("wfh") || normalized.contains("workfromhome") {
        let kind: WfhKind = requested_wfh.unwrap_or(if normalized.contains("emergency") {
            WfhKind::Emergency
        } else {
            WfhKind::Casual
        });
        return match kind {
            WfhKind::Emergency => DayStatus::WfhEmergency,
            WfhKind::Casual => DayStatus::WfhCasual,
        };
    }

    if normalized.contains("absent") {
        return DayStatus::Absent;
    }

    if normalized.contains("leave") {
        return DayStatus::Leave;
    }

    if normalized.contains("present") {
        return DayStatus::Present;
    }

    DayStatus::Other(raw.trim().to_string())
}

/// A calendar day joined with its attendance sources and resolved status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedDay {
    #[serde(flatten)]
    pub day: CalendarDay,
    pub attendance: Option<AttendanceRecord>,
    /// Approved leave covering this date, if any.
    pub leave: Option<LeaveRequest>,
    pub status: DayStatus,
}

impl ClassifiedDay {
    /// Hours worked as recorded; zero without a record.
    #[must_use]
    pub fn work_hours(&self) -> Decimal {
        self.attendance
            .as_ref()
            .map_or(Decimal::ZERO, |a| a.work_hours)
    }

    /// Overtime hours as recorded; zero without a record.
    #[must_use]
    pub fn ot_hours(&self) -> Decimal {
        self.attendance
            .as_ref()
            .map_or(Decimal::ZERO, |a| a.ot_hours)
    }

    /// Returns true if the day was attended and one punch is missing.
    #[must_use]
    pub fn has_missed_punch(&self, wfh_credit: Decimal) -> bool {
        self.status.attended_fraction(wfh_credit) > Decimal::ZERO
            && self
                .attendance
                .as_ref()
                .is_some_and(AttendanceRecord::has_missed_punch)
    }

    /// Returns true if the day is a working day.
    #[must_use]
    pub fn is_working_day(&self) -> bool {
        self.day.is_working_day()
    }
}

/// Classifies every day of a month.
///
/// Leave and WFH requests that are not approved are ignored. If the ledger
/// holds more than one record for a date, the first one wins.
///
/// # Arguments
///
/// * `calendar` - Calendar skeleton from `build_calendar`
/// * `attendance` - Attendance ledger entries for the employee
/// * `leaves` - Leave requests for the employee
/// * `wfh_requests` - WFH requests for the employee
///
/// # Returns
///
/// One `ClassifiedDay` per calendar day, in the same order.
#[must_use]
pub fn classify_days(
    calendar: Vec<CalendarDay>,
    attendance: &[AttendanceRecord],
    leaves: &[LeaveRequest],
    wfh_requests: &[WfhRequest],
) -> Vec<ClassifiedDay> {
    let mut records_by_date: HashMap<Date, &AttendanceRecord> = HashMap::new();
    for record in attendance {
        records_by_date.entry(record.date).or_insert(record);
    }

    let mut wfh_by_date: HashMap<Date, WfhKind> = HashMap::new();
    for request in wfh_requests
        .iter()
        .filter(|r| r.status == RequestStatus::Approved)
    {
        wfh_by_date.entry(request.date).or_insert(request.kind);
    }

    let approved_leaves: Vec<&LeaveRequest> = leaves.iter().filter(|l| l.is_approved()).collect();

    calendar
        .into_iter()
        .map(|day| {
            let record: Option<&AttendanceRecord> = records_by_date.get(&day.date).copied();
            let leave: Option<&LeaveRequest> = approved_leaves
                .iter()
                .copied()
                .find(|l| l.covers(day.date));

            let status: DayStatus = if let Some(record) = record {
                parse_attendance_status(&record.status, wfh_by_date.get(&day.date).copied())
            } else if leave.is_some() {
                DayStatus::Leave
            } else if let Some(holiday) = &day.holiday {
                match holiday.kind {
                    HolidayKind::Public => DayStatus::Holiday,
                    HolidayKind::Restricted => DayStatus::RestrictedHoliday,
                }
            } else if day.is_weekend {
                DayStatus::WeeklyOff
            } else {
                DayStatus::NotMarked
            };

            ClassifiedDay {
                day,
                attendance: record.cloned(),
                leave: leave.cloned(),
                status,
            }
        })
        .collect()
}
