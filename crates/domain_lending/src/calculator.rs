//! Loan quoting and credit limit checks
//!
//! Loans carry a flat interest rate: the whole interest is charged up front
//! on the principal and the total is split evenly across installments.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::warn;

use core_kernel::{Currency, Money, Rate};

/// Share of the credit limit above which a requested amount is flagged
pub const CREDIT_WARNING_RATIO: Decimal = dec!(0.8);

/// A derived loan quote
///
/// Recomputed on every input change; amounts are unrounded and rounding is
/// left to whoever displays them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanQuote {
    pub principal: Decimal,
    pub rate_percent: Decimal,
    pub installment_count: u32,
    pub interest: Decimal,
    pub total_payable: Decimal,
    pub installment_amount: Decimal,
}

impl LoanQuote {
    /// Total payable as pesos
    pub fn total_money(&self) -> Money {
        Money::new(self.total_payable, Currency::ARS)
    }

    /// Per-installment amount as pesos
    pub fn installment_money(&self) -> Money {
        Money::new(self.installment_amount, Currency::ARS)
    }
}

/// Computes a quote for `principal` at a flat `rate_percent`
///
/// Returns `None` when the principal is not positive, which tells the UI to
/// hide the summary. A missing rate counts as 0% and a missing or zero
/// installment count as a single installment.
pub fn quote(
    principal: Decimal,
    rate_percent: Option<Decimal>,
    installment_count: Option<u32>,
) -> Option<LoanQuote> {
    if principal <= Decimal::ZERO {
        return None;
    }

    let rate_percent = rate_percent.unwrap_or(Decimal::ZERO);
    let installment_count = installment_count.filter(|n| *n > 0).unwrap_or(1);

    let computed = Rate::from_percentage(rate_percent)
        .interest_on(principal)
        .and_then(|interest| {
            let total = principal.checked_add(interest)?;
            let installment = total.checked_div(Decimal::from(installment_count))?;
            Some((interest, total, installment))
        });

    let Some((interest, total_payable, installment_amount)) = computed else {
        warn!(%principal, %rate_percent, installment_count, "Loan quote overflowed");
        return None;
    };

    Some(LoanQuote {
        principal,
        rate_percent,
        installment_count,
        interest,
        total_payable,
        installment_amount,
    })
}

/// How a requested principal sits against the client's credit limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreditLimitStatus {
    /// Within limits, or no limit configured
    Ok,
    /// Above 80% of the limit
    Warning,
    /// Above the limit
    Exceeded,
}

/// Classifies `principal` against an optional maximum
pub fn credit_limit_status(principal: Decimal, max_allowed: Option<Decimal>) -> CreditLimitStatus {
    let Some(max_allowed) = max_allowed else {
        return CreditLimitStatus::Ok;
    };

    if principal > max_allowed {
        CreditLimitStatus::Exceeded
    } else if principal > max_allowed * CREDIT_WARNING_RATIO {
        CreditLimitStatus::Warning
    } else {
        CreditLimitStatus::Ok
    }
}
