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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod bulk;
mod command;
mod engine;
mod error;
mod source;
mod state;
mod store;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::apply;
pub use bulk::{BulkFailure, BulkReport, BulkSkip, calculate_all};
pub use command::Command;
pub use engine::{
    CalculationOptions, add_adjustment, approve_record, cancel_record, compute_monthly_summary,
    compute_salary_record, mark_record_paid,
};
pub use error::EngineError;
pub use source::{
    AccuracyEntry, LeaveBalanceEntry, PayrollDataset, PayrollSource, VariablePayEntry,
};
pub use state::{TransitionResult, snapshot};
pub use store::{InMemoryStore, SalaryRecordStore, StoreError};
