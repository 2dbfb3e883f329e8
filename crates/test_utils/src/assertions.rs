//! Custom Test Assertions
//!
//! Assertion helpers with messages that say what went wrong in domain
//! terms.

use rust_decimal::Decimal;

use core_kernel::{parse_amount, Money};
use domain_lending::ScheduledInstallment;

/// Asserts that two Money values are equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies differ or the amounts differ by more than
/// `tolerance`.
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that a schedule adds up to `total`, allowing a cent of
/// rounding per installment
pub fn assert_schedule_sums_to(schedule: &[ScheduledInstallment], total: Decimal) {
    let sum: Decimal = schedule.iter().map(|row| row.amount).sum();
    let tolerance = Decimal::new(schedule.len() as i64, 2);
    assert!(
        (sum - total).abs() <= tolerance,
        "Schedule sums to {}, expected {} (tolerance {})",
        sum,
        total,
        tolerance
    );
}

/// Asserts that `text` is a grouped Argentine amount reading as `expected`
pub fn assert_formatted_amount(text: &str, expected: Decimal) {
    let digits = text.trim_start_matches('$').trim_start_matches('-');
    let int_part = digits.split(',').next().unwrap_or_default();
    for (i, group) in int_part.split('.').enumerate() {
        let ok = if i == 0 {
            (1..=3).contains(&group.len())
        } else {
            group.len() == 3
        };
        assert!(ok, "Badly grouped amount {:?}", text);
    }

    let value = parse_amount(text.trim_start_matches('$'));
    assert_eq!(value, expected, "{:?} does not read as {}", text, expected);
}
