//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::money::MoneyError;
use core_kernel::InstallmentId;

#[test]
fn test_core_error_validation() {
    let error = CoreError::validation("Invalid input");

    match error {
        CoreError::Validation(msg) => assert_eq!(msg, "Invalid input"),
    }
}

#[test]
fn test_core_error_display() {
    let error = CoreError::validation("Test error");
    assert_eq!(error.to_string(), "Validation error: Test error");
}

#[test]
fn test_bad_identifier_is_a_validation_error() {
    let err = "CUO-abc".parse::<InstallmentId>().unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
}

#[test]
fn test_money_error_display() {
    assert_eq!(
        MoneyError::CurrencyMismatch("ARS".into(), "USD".into()).to_string(),
        "Currency mismatch: cannot operate on ARS and USD"
    );
    assert_eq!(MoneyError::Overflow.to_string(), "Overflow during calculation");
}
