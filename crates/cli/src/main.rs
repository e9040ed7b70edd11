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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod export;

use clap::{Parser, Subcommand};
use payroll::{
    BulkReport, CalculationOptions, PayrollDataset, add_adjustment, approve_record, calculate_all,
    cancel_record, compute_monthly_summary, compute_salary_record, mark_record_paid,
};
use payroll_audit::{Actor, AuditEvent, Cause};
use payroll_domain::{
    AdjustmentKind, EmployeeId, ManualAdjustment, MonthlySummary, PayrollMonth, SalaryRecord,
};
use payroll_persistence::Persistence;
use rust_decimal::Decimal;
use std::io::Write;
use std::path::{Path, PathBuf};
use time::Date;
use time::macros::format_description;
use tracing::{info, warn};

/// Payroll - attendance to salary batch runner
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, global = true)]
    database: Option<String>,

    /// Operator recorded in the audit trail.
    #[arg(long, global = true, default_value = "payroll-cli")]
    actor: String,

    /// Reason recorded in the audit trail.
    #[arg(long, global = true, default_value = "Monthly payroll run")]
    reason: String,

    /// Treat this date (YYYY-MM-DD) as today. Defaults to the current UTC date.
    #[arg(long, global = true, value_parser = parse_date)]
    as_of: Option<Date>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug, Clone, Copy)]
struct PeriodArgs {
    /// Month number (1-12)
    #[arg(long)]
    month: u8,
    /// Calendar year
    #[arg(long)]
    year: i32,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the monthly attendance summary of one employee
    Summary {
        /// Path to the JSON payroll dataset
        #[arg(long)]
        dataset: PathBuf,
        #[arg(long)]
        employee: String,
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Calculate and store the salary record of one employee
    Calculate {
        #[arg(long)]
        dataset: PathBuf,
        #[arg(long)]
        employee: String,
        #[command(flatten)]
        period: PeriodArgs,
        /// Recalculate approved or paid records
        #[arg(long)]
        recalculate: bool,
    },
    /// Calculate the salary records of every employee
    CalculateAll {
        #[arg(long)]
        dataset: PathBuf,
        #[command(flatten)]
        period: PeriodArgs,
        #[arg(long)]
        recalculate: bool,
    },
    /// Approve a calculated record
    Approve {
        #[arg(long)]
        employee: String,
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Mark an approved record as paid
    MarkPaid {
        #[arg(long)]
        employee: String,
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Cancel a record that has not been paid
    Cancel {
        #[arg(long)]
        employee: String,
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Append a manual addition or deduction
    Adjust {
        #[arg(long)]
        employee: String,
        #[command(flatten)]
        period: PeriodArgs,
        /// `addition` or `deduction`
        #[arg(long)]
        kind: AdjustmentKind,
        #[arg(long)]
        amount: Decimal,
        #[arg(long)]
        description: String,
    },
    /// Write the salary register of a month as CSV
    Export {
        #[command(flatten)]
        period: PeriodArgs,
        /// Output file. Writes to stdout if omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the audit timeline of one salary record
    History {
        #[arg(long)]
        employee: String,
        #[command(flatten)]
        period: PeriodArgs,
    },
}

fn parse_date(value: &str) -> Result<Date, String> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map_err(|e| format!("invalid date '{value}': {e}"))
}

fn load_dataset(path: &Path) -> Result<PayrollDataset, Box<dyn std::error::Error>> {
    let json: String = std::fs::read_to_string(path)?;
    let dataset: PayrollDataset = PayrollDataset::from_json(&json)?;
    info!(path = %path.display(), employees = dataset.employees.len(), "Loaded payroll dataset");
    Ok(dataset)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Args = Args::parse();

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using database file: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let as_of: Date = args
        .as_of
        .unwrap_or_else(|| time::OffsetDateTime::now_utc().date());
    let actor: Actor = Actor::new(args.actor, String::from("operator"));
    let cause: Cause = Cause::new(format!("cli-{as_of}"), args.reason);

    match args.command {
        Commands::Summary {
            dataset,
            employee,
            period,
        } => {
            let dataset: PayrollDataset = load_dataset(&dataset)?;
            let summary: MonthlySummary = compute_monthly_summary(
                &dataset,
                &EmployeeId::new(&employee),
                period.month,
                period.year,
                as_of,
            )?;
            print_json(&summary.rounded())?;
        }
        Commands::Calculate {
            dataset,
            employee,
            period,
            recalculate,
        } => {
            let dataset: PayrollDataset = load_dataset(&dataset)?;
            let options: CalculationOptions =
                CalculationOptions::new(as_of, actor, cause).with_recalculate(recalculate);
            let record: SalaryRecord = compute_salary_record(
                &dataset,
                &mut persistence,
                &EmployeeId::new(&employee),
                period.month,
                period.year,
                &options,
            )?;
            print_json(&record)?;
        }
        Commands::CalculateAll {
            dataset,
            period,
            recalculate,
        } => {
            let dataset: PayrollDataset = load_dataset(&dataset)?;
            let period: PayrollMonth = PayrollMonth::new(period.month, period.year)?;
            let options: CalculationOptions =
                CalculationOptions::new(as_of, actor, cause).with_recalculate(recalculate);
            let report: BulkReport = calculate_all(&dataset, &mut persistence, period, &options);
            if report.failed > 0 {
                warn!(failed = report.failed, "Some salary records could not be calculated");
            }
            print_json(&report)?;
        }
        Commands::Approve { employee, period } => {
            let period: PayrollMonth = PayrollMonth::new(period.month, period.year)?;
            let record: SalaryRecord = approve_record(
                &mut persistence,
                &EmployeeId::new(&employee),
                period,
                actor,
                cause,
            )?;
            print_json(&record)?;
        }
        Commands::MarkPaid { employee, period } => {
            let period: PayrollMonth = PayrollMonth::new(period.month, period.year)?;
            let record: SalaryRecord = mark_record_paid(
                &mut persistence,
                &EmployeeId::new(&employee),
                period,
                actor,
                cause,
            )?;
            print_json(&record)?;
        }
        Commands::Cancel { employee, period } => {
            let period: PayrollMonth = PayrollMonth::new(period.month, period.year)?;
            let record: SalaryRecord = cancel_record(
                &mut persistence,
                &EmployeeId::new(&employee),
                period,
                actor,
                cause,
            )?;
            print_json(&record)?;
        }
        Commands::Adjust {
            employee,
            period,
            kind,
            amount,
            description,
        } => {
            let period: PayrollMonth = PayrollMonth::new(period.month, period.year)?;
            let adjustment: ManualAdjustment = ManualAdjustment::new(&description, amount, kind)?;
            let record: SalaryRecord = add_adjustment(
                &mut persistence,
                &EmployeeId::new(&employee),
                period,
                adjustment,
                actor,
                cause,
            )?;
            print_json(&record)?;
        }
        Commands::Export { period, output } => {
            let period: PayrollMonth = PayrollMonth::new(period.month, period.year)?;
            let records: Vec<SalaryRecord> = persistence.list_salary_records(period)?;
            let writer: Box<dyn Write> = match &output {
                Some(path) => Box::new(std::fs::File::create(path)?),
                None => Box::new(std::io::stdout().lock()),
            };
            export::write_register(writer, &records)?;
            info!(%period, records = records.len(), "Exported salary register");
        }
        Commands::History { employee, period } => {
            let period: PayrollMonth = PayrollMonth::new(period.month, period.year)?;
            let events: Vec<AuditEvent> =
                persistence.get_audit_events(&EmployeeId::new(&employee), period)?;
            for event in &events {
                println!(
                    "{}\t{}\t{}\t{}",
                    event.action.name, event.actor.id, event.cause.description, event.after.data
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_adjust_command() {
        let args: Args = Args::parse_from([
            "payroll",
            "adjust",
            "--employee",
            "EMP001",
            "--month",
            "1",
            "--year",
            "2026",
            "--kind",
            "deduction",
            "--amount",
            "1500.50",
            "--description",
            "Laptop damage",
        ]);

        let Commands::Adjust {
            employee,
            period,
            kind,
            amount,
            description,
        } = args.command
        else {
            panic!("expected adjust command");
        };
        assert_eq!(employee, "EMP001");
        assert_eq!(period.month, 1);
        assert_eq!(period.year, 2026);
        assert_eq!(kind, AdjustmentKind::Deduction);
        assert_eq!(amount, dec!(1500.50));
        assert_eq!(description, "Laptop damage");
        assert!(args.database.is_none());
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args: Args = Args::parse_from([
            "payroll",
            "calculate-all",
            "--dataset",
            "payroll.json",
            "--month",
            "2",
            "--year",
            "2026",
            "--recalculate",
            "--as-of",
            "2026-03-05",
            "--database",
            "payroll.db",
        ]);

        assert_eq!(args.database.as_deref(), Some("payroll.db"));
        assert_eq!(args.as_of, Some(parse_date("2026-03-05").unwrap()));
        assert!(matches!(
            args.command,
            Commands::CalculateAll {
                recalculate: true,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(parse_date("2026-13-01").is_err());
        assert!(
            Args::try_parse_from([
                "payroll", "adjust", "--employee", "E", "--month", "1", "--year", "2026",
                "--kind", "bonus", "--amount", "10", "--description", "x",
            ])
            .is_err()
        );
    }
}
