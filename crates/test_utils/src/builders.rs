//! Test Data Builders
//!
//! Builders that let a test name only the fields it cares about.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{ClientId, LoanId};
use domain_lending::{quote, Frequency, Loan};

use crate::fixtures::{DateFixtures, IdFixtures};

/// Builder for loans
pub struct LoanBuilder {
    id: LoanId,
    client_id: ClientId,
    principal: Decimal,
    rate_percent: Decimal,
    installments: u32,
    frequency: Frequency,
    start_date: NaiveDate,
}

impl Default for LoanBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoanBuilder {
    /// $30.000 at 20%, 4 weekly installments from 2024-01-01
    pub fn new() -> Self {
        Self {
            id: IdFixtures::loan_id(),
            client_id: IdFixtures::client_id(),
            principal: dec!(30000),
            rate_percent: dec!(20),
            installments: 4,
            frequency: Frequency::Weekly,
            start_date: DateFixtures::loan_start(),
        }
    }

    pub fn with_principal(mut self, principal: Decimal) -> Self {
        self.principal = principal;
        self
    }

    pub fn with_rate(mut self, rate_percent: Decimal) -> Self {
        self.rate_percent = rate_percent;
        self
    }

    pub fn with_installments(mut self, count: u32) -> Self {
        self.installments = count;
        self
    }

    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn starting(mut self, date: NaiveDate) -> Self {
        self.start_date = date;
        self
    }

    /// Builds the loan
    ///
    /// # Panics
    ///
    /// Panics if the principal is not positive.
    pub fn build(self) -> Loan {
        let quote = quote(self.principal, Some(self.rate_percent), Some(self.installments))
            .unwrap_or_else(|| panic!("LoanBuilder needs a positive principal"));
        Loan::originate(self.id, self.client_id, quote, self.frequency, self.start_date)
    }
}
