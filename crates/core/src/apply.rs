// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::state::{TransitionResult, snapshot};
use payroll_audit::{Action, Actor, AuditEvent, Cause};
use payroll_domain::{DomainError, SalaryRecord};

/// Applies a command to a salary record, producing a new record and audit event.
///
/// The input record is never modified.
///
/// # Arguments
///
/// * `record` - The current salary record (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new record and audit event
/// * `Err(DomainError)` if the command is not permitted
///
/// # Errors
///
/// Returns an error if:
/// - A locked record is recalculated without the override
/// - The lifecycle does not permit the transition
/// - An adjustment targets a paid or cancelled record
pub fn apply(
    record: &SalaryRecord,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, DomainError> {
    let mut new_record: SalaryRecord = record.clone();
    let mut name: &'static str = command.name();

    let details: String = match command {
        Command::ApplyCalculation {
            summary,
            calculation,
            recalculate,
        } => {
            let reopening: bool = record.status.is_locked();
            new_record.apply_calculation(*summary, *calculation, recalculate)?;
            if reopening {
                name = "Recalculate";
                format!(
                    "Recalculated {} record by override, net payable {}",
                    record.status, new_record.net_payable
                )
            } else {
                format!("Calculated net payable {}", new_record.net_payable)
            }
        }
        Command::Approve => {
            new_record.approve()?;
            format!("Approved net payable {}", new_record.net_payable)
        }
        Command::MarkPaid => {
            new_record.mark_paid()?;
            format!("Paid {}", new_record.net_payable)
        }
        Command::Cancel => {
            new_record.cancel()?;
            format!("Cancelled {} record", record.status)
        }
        Command::AddAdjustment { adjustment } => {
            let details: String = format!(
                "{} of {}: {}",
                adjustment.kind.as_str(),
                adjustment.amount,
                adjustment.description
            );
            new_record.add_adjustment(adjustment)?;
            details
        }
    };

    let audit_event: AuditEvent = AuditEvent::new(
        record.employee_id.clone(),
        record.period,
        actor,
        cause,
        Action::new(name.to_string(), Some(details)),
        snapshot(record),
        snapshot(&new_record),
    );

    Ok(TransitionResult {
        new_record,
        audit_event,
    })
}
