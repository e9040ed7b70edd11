// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read paths.

mod audit;
mod salary_records;

pub use audit::get_audit_events;
pub use salary_records::{
    get_monthly_summary, get_salary_record, list_salary_records, lookup_record_id,
};
