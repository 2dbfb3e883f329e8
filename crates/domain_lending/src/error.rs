//! Lending domain errors

use thiserror::Error;

use core_kernel::{LoanId, MoneyError};

/// Errors that can occur in the lending domain
#[derive(Debug, Error)]
pub enum LendingError {
    /// No installment with that number on the loan
    #[error("Installment not found: {0}")]
    InstallmentNotFound(u32),

    /// Installment was already settled
    #[error("Installment {0} is already paid")]
    AlreadyPaid(u32),

    /// Payment amount rejected
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Loan is finished, cancelled or renewed
    #[error("Loan {0} is not active")]
    LoanNotActive(LoanId),

    #[error(transparent)]
    Money(#[from] MoneyError),
}
