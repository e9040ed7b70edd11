// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rounding helpers.
//!
//! All arithmetic is done on unrounded `Decimal` values; rounding happens
//! only when a figure is emitted (a line item, a gross total, a summary
//! display value).

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places used for money and display figures.
pub const DECIMAL_PLACES: u32 = 2;

/// Rounds a value to two places, midpoints away from zero.
#[must_use]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `percentage` percent of `amount`, unrounded.
#[must_use]
pub fn percent_of(amount: Decimal, percentage: Decimal) -> Decimal {
    amount * percentage / Decimal::ONE_HUNDRED
}
