//! Loan form calculator

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{format_currency, parse_amount, parse_decimal_prefix};
use domain_lending::{credit_limit_status, quote, CreditLimitStatus, LoanQuote};

use crate::render::{elements, AlertLevel, RenderInstruction};

/// Raw field contents of the loan form
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CalculatorInput {
    /// Requested amount as typed, grouped with `.`
    pub principal: String,
    /// Interest percentage, dot decimal
    pub rate: String,
    /// Number of installments
    pub installments: String,
    /// Most the selected client may borrow; `None` without a client
    #[serde(default)]
    pub credit_limit: Option<Decimal>,
}

/// Quote and credit check for the current form contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalculatorView {
    pub quote: LoanQuote,
    pub credit: CreditLimitStatus,
}

/// Runs the calculator; `None` when the amount is not positive
pub fn evaluate(input: &CalculatorInput) -> Option<CalculatorView> {
    let principal = parse_amount(input.principal.as_str());
    let rate = parse_decimal_prefix(&input.rate);
    let count = parse_count(&input.installments);

    let quote = quote(principal, rate, count)?;
    let credit = credit_limit_status(principal, input.credit_limit);
    debug!(
        principal = %quote.principal,
        total = %quote.total_payable,
        count = quote.installment_count,
        ?credit,
        "Loan form recalculated"
    );
    Some(CalculatorView { quote, credit })
}

/// Handles input on any of the loan form fields
pub fn on_calculator_input(input: &CalculatorInput) -> Vec<RenderInstruction> {
    let Some(view) = evaluate(input) else {
        return vec![RenderInstruction::Hide {
            target: elements::LOAN_SUMMARY,
        }];
    };

    vec![
        RenderInstruction::set_text(
            elements::TOTAL_PAYABLE,
            format_currency(view.quote.total_payable, 0),
        ),
        RenderInstruction::set_text(
            elements::INSTALLMENT_AMOUNT,
            format_currency(view.quote.installment_amount, 0),
        ),
        RenderInstruction::Show {
            target: elements::LOAN_SUMMARY,
        },
        credit_alert(view.quote.principal, input.credit_limit, view.credit),
    ]
}

fn credit_alert(
    principal: Decimal,
    limit: Option<Decimal>,
    status: CreditLimitStatus,
) -> RenderInstruction {
    let target = elements::CREDIT_ALERT;
    match (status, limit) {
        (CreditLimitStatus::Exceeded, Some(max)) => RenderInstruction::ShowAlert {
            target,
            level: AlertLevel::Danger,
            text: format!(
                "¡Atención! El monto ingresado ({}) excede el límite de crédito disponible ({}).",
                format_currency(principal, 0),
                format_currency(max, 0)
            ),
        },
        (CreditLimitStatus::Warning, Some(max)) => RenderInstruction::ShowAlert {
            target,
            level: AlertLevel::Warning,
            text: format!(
                "El monto está cerca del límite de crédito disponible ({}).",
                format_currency(max, 0)
            ),
        },
        _ => RenderInstruction::HideAlert { target },
    }
}

/// Leading unsigned integer of the field; `None` reads as one installment
///
/// Counts too large for `u32` saturate rather than collapsing to one.
fn parse_count(text: &str) -> Option<u32> {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u32::MAX))
}
