// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use payroll_audit::AuditEvent;

use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Persists an audit event against a stored salary record.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `record_id` - The database ID of the salary record
/// * `event` - The audit event to persist
///
/// # Returns
///
/// The event ID assigned by the database.
///
/// # Errors
///
/// Returns an error if persistence or serialization fails.
pub fn persist_audit_event(
    conn: &mut SqliteConnection,
    record_id: i64,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    let actor_json: String = serde_json::to_string(&ActorData::from(&event.actor))?;
    let cause_json: String = serde_json::to_string(&CauseData::from(&event.cause))?;
    let action_json: String = serde_json::to_string(&ActionData::from(&event.action))?;
    let before_json: String = serde_json::to_string(&StateSnapshotData::from(&event.before))?;
    let after_json: String = serde_json::to_string(&StateSnapshotData::from(&event.after))?;

    let event_id: i64 = diesel::insert_into(audit_events::table)
        .values((
            audit_events::record_id.eq(record_id),
            audit_events::employee_id.eq(event.employee_id.value()),
            audit_events::year.eq(event.period.year()),
            audit_events::month.eq(i32::from(event.period.month())),
            audit_events::action_name.eq(&event.action.name),
            audit_events::actor_json.eq(actor_json),
            audit_events::cause_json.eq(cause_json),
            audit_events::action_json.eq(action_json),
            audit_events::before_snapshot_json.eq(before_json),
            audit_events::after_snapshot_json.eq(after_json),
        ))
        .returning(audit_events::event_id)
        .get_result(conn)?;

    Ok(event_id)
}
