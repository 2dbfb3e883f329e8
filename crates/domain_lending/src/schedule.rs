//! Installment schedules
//!
//! Due dates are chained from the loan's start date. Daily loans are never
//! collected on Sundays.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculator::LoanQuote;

/// Collection frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    #[serde(rename = "DI")]
    Daily,
    #[serde(rename = "SE")]
    Weekly,
    #[serde(rename = "QU")]
    Biweekly,
    #[serde(rename = "ME")]
    Monthly,
}

impl Frequency {
    /// Two-letter code used by the host application
    pub fn code(&self) -> &'static str {
        match self {
            Frequency::Daily => "DI",
            Frequency::Weekly => "SE",
            Frequency::Biweekly => "QU",
            Frequency::Monthly => "ME",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "DI" => Some(Frequency::Daily),
            "SE" => Some(Frequency::Weekly),
            "QU" => Some(Frequency::Biweekly),
            "ME" => Some(Frequency::Monthly),
            _ => None,
        }
    }

    /// Calculates the due date following `from_date`
    ///
    /// Biweekly and monthly periods are fixed 15 and 30 day steps, not
    /// calendar months.
    pub fn next_due_date(&self, from_date: NaiveDate) -> NaiveDate {
        match self {
            Frequency::Daily => {
                let mut next = from_date + Duration::days(1);
                while next.weekday() == Weekday::Sun {
                    next += Duration::days(1);
                }
                next
            }
            Frequency::Weekly => from_date + Duration::weeks(1),
            Frequency::Biweekly => from_date + Duration::days(15),
            Frequency::Monthly => from_date + Duration::days(30),
        }
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Frequency::Daily
    }
}

/// One row of a freshly generated schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledInstallment {
    /// 1-based position in the schedule
    pub number: u32,
    pub amount: Decimal,
    pub due_date: NaiveDate,
}

/// Splits a quote into dated installments
///
/// Every installment is the quote's per-installment amount rounded to
/// centavos.
pub fn generate_schedule(
    quote: &LoanQuote,
    frequency: Frequency,
    start_date: NaiveDate,
) -> Vec<ScheduledInstallment> {
    let amount = quote.installment_amount.round_dp(2);
    let mut due_date = start_date;

    (1..=quote.installment_count)
        .map(|number| {
            due_date = frequency.next_due_date(due_date);
            ScheduledInstallment {
                number,
                amount,
                due_date,
            }
        })
        .collect()
}

/// Due date of the last of `count` installments
pub fn end_date(count: u32, frequency: Frequency, start_date: NaiveDate) -> NaiveDate {
    (0..count).fold(start_date, |date, _| frequency.next_due_date(date))
}
