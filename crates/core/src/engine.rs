// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The two engine entry points and the record lifecycle operations.
//!
//! `compute_monthly_summary` runs Calendar Builder, Attendance Classifier
//! and Monthly Aggregator. `compute_salary_record` adds the Payroll
//! Calculator and stores the result through a `SalaryRecordStore`.

use crate::apply::apply;
use crate::command::Command;
use crate::error::EngineError;
use crate::source::PayrollSource;
use crate::state::TransitionResult;
use crate::store::SalaryRecordStore;
use payroll_audit::{Actor, Cause};
use payroll_domain::{
    AttendanceRecord, CalendarDay, ClassifiedDay, Employee, EmployeeId, LeaveBalance,
    ManualAdjustment, MonthlySummary, PayrollCalculation, PayrollInputs, PayrollMonth,
    SalaryConfig, SalaryConfigOverrides, SalaryRecord, SalaryStatus, VariablePay,
    aggregate_month, build_calendar, calculate_payroll, classify_days, resolve_effective_config,
};
use time::Date;
use tracing::{debug, info, warn};

/// Options of a salary calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationOptions {
    /// Allow approved or paid records to be recalculated.
    pub recalculate: bool,
    /// The current date; periods after it need attendance to be calculated.
    pub as_of: Date,
    /// Who is running the calculation.
    pub actor: Actor,
    /// Why the calculation is being run.
    pub cause: Cause,
}

impl CalculationOptions {
    /// Creates options without the recalculate override.
    #[must_use]
    pub const fn new(as_of: Date, actor: Actor, cause: Cause) -> Self {
        Self {
            recalculate: false,
            as_of,
            actor,
            cause,
        }
    }

    /// Sets the recalculate override.
    #[must_use]
    pub const fn with_recalculate(mut self, recalculate: bool) -> Self {
        self.recalculate = recalculate;
        self
    }
}

/// Everything derived for one employee and month before payroll runs.
struct PreparedMonth {
    employee: Employee,
    config: SalaryConfig,
    days: Vec<ClassifiedDay>,
    leave_balance: Option<LeaveBalance>,
    summary: MonthlySummary,
}

/// Computes the monthly attendance summary of one employee.
///
/// # Arguments
///
/// * `source` - Pre-fetched inputs
/// * `employee_id` - The employee
/// * `month` - The month number (1-12)
/// * `year` - The calendar year
/// * `as_of` - The current date
///
/// # Errors
///
/// Returns an error if:
/// - The month or year is out of range, or the period is in the future
///   and has no attendance
/// - The employee is unknown
/// - The effective salary configuration is invalid
pub fn compute_monthly_summary<S>(
    source: &S,
    employee_id: &EmployeeId,
    month: u8,
    year: i32,
    as_of: Date,
) -> Result<MonthlySummary, EngineError>
where
    S: PayrollSource + ?Sized,
{
    let period: PayrollMonth = resolve_period(employee_id, month, year)?;
    prepare_month(source, employee_id, period, as_of).map(|prepared| prepared.summary)
}

/// Computes and stores the salary record of one employee.
///
/// An existing record is recalculated in place; manual adjustments are
/// kept. The monthly summary, the record and one audit event are written
/// to the store.
///
/// # Arguments
///
/// * `source` - Pre-fetched inputs
/// * `store` - Salary record storage
/// * `employee_id` - The employee
/// * `month` - The month number (1-12)
/// * `year` - The calendar year
/// * `options` - Override flag, current date, actor and cause
///
/// # Errors
///
/// Returns an error if:
/// - The summary cannot be computed (see `compute_monthly_summary`)
/// - The record is approved or paid and `options.recalculate` is false
/// - The record is cancelled
/// - The store fails
pub fn compute_salary_record<S, T>(
    source: &S,
    store: &mut T,
    employee_id: &EmployeeId,
    month: u8,
    year: i32,
    options: &CalculationOptions,
) -> Result<SalaryRecord, EngineError>
where
    S: PayrollSource + ?Sized,
    T: SalaryRecordStore + ?Sized,
{
    let period: PayrollMonth = resolve_period(employee_id, month, year)?;

    let record: SalaryRecord = store
        .load_record(employee_id, period)
        .map_err(|e| EngineError::store(employee_id, period, e))?
        .unwrap_or_else(|| SalaryRecord::draft(employee_id.clone(), period));

    if record.status.is_locked() && !options.recalculate {
        return Err(EngineError::LockedRecordConflict {
            employee_id: employee_id.clone(),
            period,
            status: record.status,
        });
    }

    let prepared: PreparedMonth = prepare_month(source, employee_id, period, options.as_of)?;

    let prior_full_attendance_months: u32 = prior_full_attendance_months(
        store,
        employee_id,
        period,
        prepared.config.bonus_policy.attendance_bonus_months,
    )?;
    let variable_pay: VariablePay = source.variable_pay(employee_id, period);
    let accuracy_qualified: bool = source.accuracy_qualified(employee_id, period);

    let calculation: PayrollCalculation = calculate_payroll(&PayrollInputs {
        summary: &prepared.summary,
        days: &prepared.days,
        salary_offered: prepared.employee.salary_offered,
        config: &prepared.config,
        variable_pay: &variable_pay,
        leave_balance: prepared.leave_balance.as_ref(),
        prior_full_attendance_months,
        accuracy_qualified,
    });

    let previous_status: SalaryStatus = record.status;
    let command: Command = Command::ApplyCalculation {
        summary: Box::new(prepared.summary.clone()),
        calculation: Box::new(calculation),
        recalculate: options.recalculate,
    };
    let result: TransitionResult = apply(
        &record,
        command,
        options.actor.clone(),
        options.cause.clone(),
    )
    .map_err(|e| EngineError::from_transition(employee_id, period, e, previous_status))?;

    for warning in &result.new_record.warnings {
        warn!(
            employee_id = %employee_id,
            year = period.year(),
            month = period.month(),
            %warning,
            "Salary record needs manual review"
        );
    }

    store
        .save_calculation(&result.new_record, &prepared.summary, &result.audit_event)
        .map_err(|e| EngineError::store(employee_id, period, e))?;

    info!(
        employee_id = %employee_id,
        year = period.year(),
        month = period.month(),
        previous_status = %previous_status,
        gross = %result.new_record.gross_salary,
        net_payable = %result.new_record.net_payable,
        "Salary record calculated"
    );

    Ok(result.new_record)
}

/// Approves a calculated salary record.
///
/// # Errors
///
/// Returns an error if the record does not exist, is not `calculated`, or
/// the store fails.
pub fn approve_record<T>(
    store: &mut T,
    employee_id: &EmployeeId,
    period: PayrollMonth,
    actor: Actor,
    cause: Cause,
) -> Result<SalaryRecord, EngineError>
where
    T: SalaryRecordStore + ?Sized,
{
    transition_record(store, employee_id, period, Command::Approve, actor, cause)
}

/// Marks an approved salary record as paid.
///
/// # Errors
///
/// Returns an error if the record does not exist, is not `approved`, or
/// the store fails.
pub fn mark_record_paid<T>(
    store: &mut T,
    employee_id: &EmployeeId,
    period: PayrollMonth,
    actor: Actor,
    cause: Cause,
) -> Result<SalaryRecord, EngineError>
where
    T: SalaryRecordStore + ?Sized,
{
    transition_record(store, employee_id, period, Command::MarkPaid, actor, cause)
}

/// Cancels a salary record that has not been paid.
///
/// # Errors
///
/// Returns an error if the record does not exist, is paid or already
/// cancelled, or the store fails.
pub fn cancel_record<T>(
    store: &mut T,
    employee_id: &EmployeeId,
    period: PayrollMonth,
    actor: Actor,
    cause: Cause,
) -> Result<SalaryRecord, EngineError>
where
    T: SalaryRecordStore + ?Sized,
{
    transition_record(store, employee_id, period, Command::Cancel, actor, cause)
}

/// Appends a manual adjustment to a salary record.
///
/// # Errors
///
/// Returns an error if the record does not exist, is paid or cancelled, or
/// the store fails.
pub fn add_adjustment<T>(
    store: &mut T,
    employee_id: &EmployeeId,
    period: PayrollMonth,
    adjustment: ManualAdjustment,
    actor: Actor,
    cause: Cause,
) -> Result<SalaryRecord, EngineError>
where
    T: SalaryRecordStore + ?Sized,
{
    transition_record(
        store,
        employee_id,
        period,
        Command::AddAdjustment { adjustment },
        actor,
        cause,
    )
}

fn transition_record<T>(
    store: &mut T,
    employee_id: &EmployeeId,
    period: PayrollMonth,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<SalaryRecord, EngineError>
where
    T: SalaryRecordStore + ?Sized,
{
    let record: SalaryRecord = store
        .load_record(employee_id, period)
        .map_err(|e| EngineError::store(employee_id, period, e))?
        .ok_or_else(|| EngineError::RecordNotFound {
            employee_id: employee_id.clone(),
            period,
        })?;

    let action: &str = command.name();
    let result: TransitionResult = apply(&record, command, actor, cause)
        .map_err(|e| EngineError::from_transition(employee_id, period, e, record.status))?;

    store
        .save_record(&result.new_record, &result.audit_event)
        .map_err(|e| EngineError::store(employee_id, period, e))?;

    info!(
        employee_id = %employee_id,
        year = period.year(),
        month = period.month(),
        action,
        from = %record.status,
        to = %result.new_record.status,
        "Salary record updated"
    );

    Ok(result.new_record)
}

fn resolve_period(employee_id: &EmployeeId, month: u8, year: i32) -> Result<PayrollMonth, EngineError> {
    PayrollMonth::new(month, year).map_err(|e| EngineError::InvalidPeriod {
        employee_id: employee_id.clone(),
        month,
        year,
        reason: e.to_string(),
    })
}

fn prepare_month<S>(
    source: &S,
    employee_id: &EmployeeId,
    period: PayrollMonth,
    as_of: Date,
) -> Result<PreparedMonth, EngineError>
where
    S: PayrollSource + ?Sized,
{
    let employee: Employee =
        source
            .employee(employee_id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.clone(),
                period,
            })?;

    let department: Option<SalaryConfigOverrides> = if employee.department.trim().is_empty() {
        None
    } else {
        source.department_overrides(&employee.department)
    };
    let config: SalaryConfig = resolve_effective_config(
        &source.company_config(),
        department.as_ref(),
        &employee.salary_config,
    )
    .map_err(|e| EngineError::ConfigurationInvalid {
        employee_id: employee_id.clone(),
        period,
        source: e,
    })?;

    let attendance: Vec<AttendanceRecord> = source.attendance(employee_id, period);
    if period.first_day() > as_of && attendance.is_empty() {
        return Err(EngineError::InvalidPeriod {
            employee_id: employee_id.clone(),
            month: period.month(),
            year: period.year(),
            reason: String::from("period is in the future and has no attendance"),
        });
    }

    let on_probation: bool =
        employee.is_on_probation(period.last_day(), config.probation_period_days);
    let leave_balance: Option<LeaveBalance> = source.leave_balance(employee_id, period);

    let calendar: Vec<CalendarDay> = build_calendar(
        period,
        config.saturdays_off_pattern,
        &source.holidays(period),
    );
    let days: Vec<ClassifiedDay> = classify_days(
        calendar,
        &attendance,
        &source.leave_requests(employee_id, period),
        &source.wfh_requests(employee_id, period),
    );
    let summary: MonthlySummary = aggregate_month(
        employee_id,
        period,
        &days,
        &config,
        on_probation,
        leave_balance.as_ref(),
    );

    debug!(
        employee_id = %employee_id,
        year = period.year(),
        month = period.month(),
        on_probation,
        working_days = summary.total_working_days,
        days_attended = %summary.days_attended,
        "Monthly summary computed"
    );

    Ok(PreparedMonth {
        employee,
        config,
        days,
        leave_balance,
        summary,
    })
}

/// Counts consecutive stored months with full attendance before `period`.
///
/// Looks back at most `limit` months; the bonus never needs more.
fn prior_full_attendance_months<T>(
    store: &mut T,
    employee_id: &EmployeeId,
    period: PayrollMonth,
    limit: u32,
) -> Result<u32, EngineError>
where
    T: SalaryRecordStore + ?Sized,
{
    let mut streak: u32 = 0;
    let mut cursor: Option<PayrollMonth> = period.previous();
    while let Some(month) = cursor {
        if streak >= limit {
            break;
        }
        let full: bool = store
            .load_record(employee_id, month)
            .map_err(|e| EngineError::store(employee_id, period, e))?
            .is_some_and(|r| r.has_full_attendance());
        if !full {
            break;
        }
        streak += 1;
        cursor = month.previous();
    }
    Ok(streak)
}
