// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::january_2026;
use crate::{
    CalendarDay, HolidayEntry, HolidayKind, PayrollMonth, SaturdayPattern, build_calendar,
    count_sundays, is_weekly_off, week_of_month,
};
use time::Date;
use time::macros::date;

fn off_saturdays(pattern: SaturdayPattern) -> Vec<u8> {
    build_calendar(january_2026(), pattern, &[])
        .iter()
        .filter(|d| d.day_of_week == time::Weekday::Saturday && d.is_weekend)
        .map(|d| d.date.day())
        .collect()
}

fn holiday(date: Date, name: &str, kind: HolidayKind) -> HolidayEntry {
    HolidayEntry {
        date,
        name: String::from(name),
        kind,
    }
}

#[test]
fn test_week_of_month_index() {
    assert_eq!(week_of_month(1), 1);
    assert_eq!(week_of_month(7), 1);
    assert_eq!(week_of_month(8), 2);
    assert_eq!(week_of_month(14), 2);
    assert_eq!(week_of_month(15), 3);
    assert_eq!(week_of_month(28), 4);
    assert_eq!(week_of_month(29), 5);
    assert_eq!(week_of_month(31), 5);
}

#[test]
fn test_saturday_patterns() {
    // Saturdays in January 2026: 3, 10, 17, 24, 31
    assert_eq!(off_saturdays(SaturdayPattern::FirstAndThird), vec![3, 17]);
    assert_eq!(off_saturdays(SaturdayPattern::SecondAndFourth), vec![10, 24]);
    assert_eq!(off_saturdays(SaturdayPattern::All), vec![3, 10, 17, 24, 31]);
    assert!(off_saturdays(SaturdayPattern::None).is_empty());
}

#[test]
fn test_sundays_always_off() {
    for pattern in [
        SaturdayPattern::FirstAndThird,
        SaturdayPattern::SecondAndFourth,
        SaturdayPattern::All,
        SaturdayPattern::None,
    ] {
        assert!(is_weekly_off(date!(2026 - 01 - 04), pattern));
        assert!(!is_weekly_off(date!(2026 - 01 - 05), pattern));
    }
}

#[test]
fn test_calendar_covers_every_day_in_order() {
    let period: PayrollMonth = PayrollMonth::new(2, 2024).unwrap();
    let calendar: Vec<CalendarDay> = build_calendar(period, SaturdayPattern::FirstAndThird, &[]);

    assert_eq!(calendar.len(), 29);
    assert_eq!(calendar[0].date, date!(2024 - 02 - 01));
    assert_eq!(calendar[28].date, date!(2024 - 02 - 29));
    assert!(calendar.windows(2).all(|w| w[0].date < w[1].date));
}

#[test]
fn test_working_days_with_holidays() {
    let holidays: Vec<HolidayEntry> = vec![
        holiday(date!(2026 - 01 - 26), "Republic Day", HolidayKind::Public),
        holiday(date!(2026 - 01 - 14), "Makar Sankranti", HolidayKind::Restricted),
        holiday(date!(2026 - 02 - 02), "Outside month", HolidayKind::Public),
    ];
    let calendar: Vec<CalendarDay> =
        build_calendar(january_2026(), SaturdayPattern::FirstAndThird, &holidays);

    let working: usize = calendar.iter().filter(|d| d.is_working_day()).count();
    // 31 days - 6 weekly offs - 1 public holiday
    assert_eq!(working, 24);

    let restricted: &CalendarDay = &calendar[13];
    assert!(restricted.holiday.is_some());
    assert!(restricted.is_working_day());

    assert!(!calendar[25].is_working_day());
    assert_eq!(calendar.iter().filter(|d| d.holiday.is_some()).count(), 2);
}

#[test]
fn test_public_holiday_wins_over_restricted_on_same_date() {
    let holidays: Vec<HolidayEntry> = vec![
        holiday(date!(2026 - 01 - 14), "Optional", HolidayKind::Restricted),
        holiday(date!(2026 - 01 - 14), "Festival", HolidayKind::Public),
    ];
    let calendar: Vec<CalendarDay> =
        build_calendar(january_2026(), SaturdayPattern::FirstAndThird, &holidays);

    let day: &CalendarDay = &calendar[13];
    assert!(day.is_public_holiday());
    assert_eq!(day.holiday.as_ref().unwrap().name, "Festival");
}

#[test]
fn test_count_sundays() {
    let calendar: Vec<CalendarDay> =
        build_calendar(january_2026(), SaturdayPattern::FirstAndThird, &[]);
    assert_eq!(count_sundays(&calendar), 4);

    let march: Vec<CalendarDay> = build_calendar(
        PayrollMonth::new(3, 2026).unwrap(),
        SaturdayPattern::FirstAndThird,
        &[],
    );
    assert_eq!(count_sundays(&march), 5);
}
