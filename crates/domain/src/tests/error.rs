// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DomainError;

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InvalidPeriod {
        month: 13,
        year: 2026,
        reason: String::from("Month must be between 1 and 12"),
    };
    assert_eq!(
        format!("{err}"),
        "Invalid payroll period 2026-13: Month must be between 1 and 12"
    );

    let err: DomainError = DomainError::InvalidEmployeeId(String::from("empty"));
    assert_eq!(format!("{err}"), "Invalid employee id: empty");

    let err: DomainError = DomainError::ConfigurationInvalid {
        field: String::from("pfPercentage"),
        reason: String::from("must be between 0 and 100"),
    };
    assert_eq!(
        format!("{err}"),
        "Invalid salary configuration field 'pfPercentage': must be between 0 and 100"
    );

    let err: DomainError = DomainError::InvalidWeekendTier {
        index: 2,
        reason: String::from("bad"),
    };
    assert_eq!(format!("{err}"), "Invalid weekend deduction tier #2: bad");

    let err: DomainError = DomainError::InvalidSalaryStatus(String::from("pending"));
    assert_eq!(format!("{err}"), "Invalid salary record status: pending");

    let err: DomainError = DomainError::RecordLocked {
        status: String::from("approved"),
    };
    assert_eq!(
        format!("{err}"),
        "Salary record is approved; recalculation requires an explicit override"
    );

    let err: DomainError = DomainError::InvalidAdjustment(String::from("zero amount"));
    assert_eq!(format!("{err}"), "Invalid adjustment: zero amount");
}
