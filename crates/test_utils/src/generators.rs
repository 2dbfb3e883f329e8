//! Property-Based Test Generators
//!
//! Provides proptest strategies for amounts, rates and installment counts
//! in the ranges the loan form accepts.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{Money, InstallmentId};
use domain_lending::Frequency;

/// Whole peso amounts up to a billion
pub fn whole_amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=1_000_000_000i64).prop_map(Decimal::from)
}

/// Positive principals, in whole pesos
pub fn principal_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=1_000_000_000i64).prop_map(Decimal::from)
}

/// Amounts with up to two decimals, negative ones included
pub fn cents_amount_strategy() -> impl Strategy<Value = Decimal> {
    (-100_000_000_000i64..100_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Positive ARS money with cents
pub fn positive_money_strategy() -> impl Strategy<Value = Money> {
    (1i64..10_000_000_000i64).prop_map(|cents| Money::ars(Decimal::new(cents, 2)))
}

/// Interest percentages from 0% to 100% with two decimals
pub fn rate_percent_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..=10_000u32).prop_map(|n| Decimal::new(n as i64, 2))
}

/// Installment counts the form allows, zero included
pub fn installment_count_strategy() -> impl Strategy<Value = u32> {
    0u32..=365u32
}

pub fn frequency_strategy() -> impl Strategy<Value = Frequency> {
    prop_oneof![
        Just(Frequency::Daily),
        Just(Frequency::Weekly),
        Just(Frequency::Biweekly),
        Just(Frequency::Monthly),
    ]
}

/// Dates within 2024
pub fn date_2024_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..366i64).prop_map(|days| {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default() + Duration::days(days)
    })
}

pub fn installment_id_strategy() -> impl Strategy<Value = InstallmentId> {
    (1u64..1_000_000u64).prop_map(InstallmentId::new)
}

/// Whatever a user might paste into an amount field
pub fn typed_text_strategy() -> impl Strategy<Value = String> {
    "[0-9.,$ a-z-]{0,24}"
}
