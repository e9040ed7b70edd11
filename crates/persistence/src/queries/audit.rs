// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use payroll_audit::AuditEvent;
use payroll_domain::{EmployeeId, PayrollMonth};

use crate::data_models::{ActionData, ActorData, AuditEventRow, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Returns the audit timeline of one salary record, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored event cannot be decoded.
pub fn get_audit_events(
    conn: &mut SqliteConnection,
    employee_id: &EmployeeId,
    period: PayrollMonth,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .filter(audit_events::employee_id.eq(employee_id.value()))
        .filter(audit_events::year.eq(period.year()))
        .filter(audit_events::month.eq(i32::from(period.month())))
        .order(audit_events::event_id.asc())
        .select((
            audit_events::actor_json,
            audit_events::cause_json,
            audit_events::action_json,
            audit_events::before_snapshot_json,
            audit_events::after_snapshot_json,
        ))
        .load::<AuditEventRow>(conn)?;

    rows.into_iter()
        .map(
            |(actor_json, cause_json, action_json, before_json, after_json)| -> Result<AuditEvent, PersistenceError> {
            let actor: ActorData = serde_json::from_str(&actor_json)?;
            let cause: CauseData = serde_json::from_str(&cause_json)?;
            let action: ActionData = serde_json::from_str(&action_json)?;
            let before: StateSnapshotData = serde_json::from_str(&before_json)?;
            let after: StateSnapshotData = serde_json::from_str(&after_json)?;

            Ok(AuditEvent::new(
                employee_id.clone(),
                period,
                actor.into(),
                cause.into(),
                action.into(),
                before.into(),
                after.into(),
            ))
        })
        .collect()
}
