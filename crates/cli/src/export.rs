// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Salary register export.
//!
//! Hours are rendered as `HH:MM` here and nowhere else; the engine keeps
//! decimal hours.

use payroll_domain::{ManualAdjustment, MonthlySummary, SalaryRecord};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::io::Write;

/// One line of the salary register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRow {
    pub employee_id: String,
    pub status: String,
    pub working_days: u32,
    pub days_attended: Decimal,
    pub paid_leaves: Decimal,
    pub pay_loss_days: Decimal,
    pub expected_hours: String,
    pub hours_worked: String,
    pub ot_hours: String,
    pub gross_salary: Decimal,
    pub total_deductions: Decimal,
    pub total_additions: Decimal,
    /// Net of manual adjustments, already included in the totals.
    pub adjustments: Decimal,
    pub net_payable: Decimal,
    pub warnings: String,
}

impl RegisterRow {
    /// Builds a register row from a stored salary record.
    #[must_use]
    pub fn from_record(record: &SalaryRecord) -> Self {
        let summary: Option<MonthlySummary> = record.summary.as_ref().map(MonthlySummary::rounded);
        let hours = |f: fn(&MonthlySummary) -> Decimal| -> String {
            summary.as_ref().map_or_else(String::new, |s| format_hours(f(s)))
        };

        Self {
            employee_id: record.employee_id.to_string(),
            status: record.status.to_string(),
            working_days: summary.as_ref().map_or(0, |s| s.total_working_days),
            days_attended: summary.as_ref().map_or(Decimal::ZERO, |s| s.days_attended),
            paid_leaves: summary.as_ref().map_or(Decimal::ZERO, |s| s.paid_leaves),
            pay_loss_days: summary.as_ref().map_or(Decimal::ZERO, |s| s.pay_loss_days),
            expected_hours: hours(|s| s.expected_hours),
            hours_worked: hours(|s| s.hours_worked),
            ot_hours: hours(|s| s.ot_hours),
            gross_salary: record.gross_salary,
            total_deductions: record.total_deductions,
            total_additions: record.total_additions,
            adjustments: record
                .adjustments
                .iter()
                .map(ManualAdjustment::signed_amount)
                .sum(),
            net_payable: record.net_payable,
            warnings: record
                .warnings
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<String>>()
                .join("; "),
        }
    }
}

/// Formats decimal hours as `HH:MM`, rounding to the nearest minute.
#[must_use]
pub fn format_hours(hours: Decimal) -> String {
    let minutes: i64 = (hours.abs() * Decimal::from(60))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0);
    let sign: &str = if hours.is_sign_negative() && minutes > 0 {
        "-"
    } else {
        ""
    };
    format!("{sign}{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Writes the salary register as CSV with a header row.
///
/// # Errors
///
/// Returns an error if a row cannot be written.
pub fn write_register<W: Write>(writer: W, records: &[SalaryRecord]) -> Result<(), csv::Error> {
    let mut csv_writer: csv::Writer<W> = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(RegisterRow::from_record(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use payroll_domain::{AdjustmentKind, EmployeeId, PayrollMonth};
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(dec!(9)), "09:00");
        assert_eq!(format_hours(dec!(8.5)), "08:30");
        assert_eq!(format_hours(dec!(225.25)), "225:15");
        assert_eq!(format_hours(dec!(0.0083)), "00:00");
        assert_eq!(format_hours(dec!(1.99)), "01:59");
        assert_eq!(format_hours(Decimal::ZERO), "00:00");
    }

    #[test]
    fn test_register_csv_has_header_and_rows() {
        let period: PayrollMonth = PayrollMonth::new(1, 2026).unwrap();
        let mut record: SalaryRecord = SalaryRecord::draft(EmployeeId::new("EMP001"), period);
        record.gross_salary = dec!(25000);
        record.net_payable = dec!(25000);
        record.adjustments.push(
            ManualAdjustment::new("Laptop damage", dec!(500), AdjustmentKind::Deduction).unwrap(),
        );
        record.adjustments.push(
            ManualAdjustment::new("Travel", dec!(200), AdjustmentKind::Addition).unwrap(),
        );

        let mut buffer: Vec<u8> = Vec::new();
        write_register(&mut buffer, &[record]).unwrap();
        let csv: String = String::from_utf8(buffer).unwrap();

        let mut lines = csv.lines();
        assert!(lines.next().unwrap().starts_with("employee_id,status,working_days"));
        assert_eq!(
            lines.next().unwrap(),
            "EMP001,draft,0,0,0,0,,,,25000,0,0,-300,25000,"
        );
        assert!(lines.next().is_none());
    }
}
