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

use payroll_domain::{EmployeeId, PayrollMonth};

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change:
/// an operator running a command, or the batch job itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "operator", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }

    /// The actor used for unattended batch runs.
    #[must_use]
    pub fn system() -> Self {
        Self::new(String::from("payroll-batch"), String::from("system"))
    }
}

/// Represents the reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., run ID, ticket ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`Calculate`", "`Approve`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A snapshot of a salary record at a point in time.
///
/// The data is a compact rendering of the fields that matter for review
/// (status, gross, totals, net payable).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// An immutable audit event representing a salary record transition.
///
/// Every successful transition produces exactly one audit event, scoped to
/// the employee and payroll month of the record. An event captures:
/// - Who performed the action (actor)
/// - Why it was performed (cause)
/// - What action was performed (action)
/// - The record before and after the transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The employee whose record changed.
    pub employee_id: EmployeeId,
    /// The payroll month of the record.
    pub period: PayrollMonth,
    pub actor: Actor,
    pub cause: Cause,
    pub action: Action,
    pub before: StateSnapshot,
    pub after: StateSnapshot,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// Once created, an audit event is immutable.
    ///
    /// # Arguments
    ///
    /// * `employee_id` - The employee whose record changed
    /// * `period` - The payroll month of the record
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The record before the transition
    /// * `after` - The record after the transition
    #[must_use]
    pub const fn new(
        employee_id: EmployeeId,
        period: PayrollMonth,
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            employee_id,
            period,
            actor,
            cause,
            action,
            before,
            after,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_event(action_name: &str) -> AuditEvent {
        AuditEvent::new(
            EmployeeId::new("EMP001"),
            PayrollMonth::new(1, 2026).unwrap_or_else(|e| panic!("{e}")),
            Actor::new(String::from("hr-7"), String::from("operator")),
            Cause::new(String::from("run-42"), String::from("Monthly payroll")),
            Action::new(String::from(action_name), None),
            StateSnapshot::new(String::from("status=calculated")),
            StateSnapshot::new(String::from("status=approved")),
        )
    }

    #[test]
    fn test_system_actor() {
        let actor: Actor = Actor::system();

        assert_eq!(actor.id, "payroll-batch");
        assert_eq!(actor.actor_type, "system");
    }

    #[test]
    fn test_action_creation_with_details() {
        let action: Action = Action::new(
            String::from("Recalculate"),
            Some(String::from("override on approved record")),
        );

        assert_eq!(action.name, "Recalculate");
        assert_eq!(
            action.details,
            Some(String::from("override on approved record"))
        );
    }

    #[test]
    fn test_audit_event_is_scoped_to_employee_and_period() {
        let event: AuditEvent = create_test_event("Approve");

        assert_eq!(event.employee_id.value(), "EMP001");
        assert_eq!(event.period.to_string(), "2026-01");
        assert_eq!(event.before.data, "status=calculated");
        assert_eq!(event.after.data, "status=approved");
    }

    #[test]
    fn test_audit_event_equality() {
        assert_eq!(create_test_event("Approve"), create_test_event("Approve"));
        assert_ne!(create_test_event("Approve"), create_test_event("Cancel"));
    }
}
