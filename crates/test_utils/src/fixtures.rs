//! Pre-built Test Fixtures
//!
//! Ready-to-use values shared by the test suites. They are fixed so that
//! expected strings can be written by hand.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{ClientId, InstallmentId, LoanId};
use domain_lending::{quote, LoanQuote};

/// Fixture for money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// The example loan amount: $100.000
    pub fn principal() -> Decimal {
        dec!(100000)
    }

    /// A credit limit just above [`MoneyFixtures::principal`]
    pub fn credit_limit() -> Decimal {
        dec!(120000)
    }
}

/// Fixture for quotes
pub struct QuoteFixtures;

impl QuoteFixtures {
    /// $100.000 at 10% in 12 installments
    pub fn standard() -> LoanQuote {
        quote(dec!(100000), Some(dec!(10)), Some(12)).unwrap_or_else(|| {
            panic!("standard quote fixture must be valid")
        })
    }

    /// $30.000 at 20% in 4 installments of $9.000
    pub fn four_installments() -> LoanQuote {
        quote(dec!(30000), Some(dec!(20)), Some(4)).unwrap_or_else(|| {
            panic!("four installment quote fixture must be valid")
        })
    }
}

/// Fixture for dates
pub struct DateFixtures;

impl DateFixtures {
    /// Monday, January 1st 2024
    pub fn loan_start() -> NaiveDate {
        date(2024, 1, 1)
    }

    /// Collection day used across the suites
    pub fn today() -> NaiveDate {
        date(2024, 1, 8)
    }
}

/// Fixture for identifiers
pub struct IdFixtures;

impl IdFixtures {
    pub fn loan_id() -> LoanId {
        LoanId::new(1)
    }

    pub fn client_id() -> ClientId {
        ClientId::new(9)
    }

    pub fn installment_id() -> InstallmentId {
        InstallmentId::new(42)
    }
}

/// Builds a date, panicking on an invalid one
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("invalid fixture date {year}-{month}-{day}"))
}
