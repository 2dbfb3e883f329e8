//! Lending Domain - Quotes, Schedules and Collections
//!
//! This crate holds the arithmetic behind the loan form and the collection
//! screens:
//!
//! - **Calculator**: flat-rate loan quotes and the credit limit check
//! - **Schedule**: installment due dates per collection frequency
//! - **Loan / Installment**: registering full and partial payments
//!
//! # Example
//!
//! ```rust
//! use domain_lending::{quote, credit_limit_status, CreditLimitStatus};
//! use rust_decimal_macros::dec;
//!
//! let q = quote(dec!(100000), Some(dec!(10)), Some(12)).unwrap();
//! assert_eq!(q.total_payable, dec!(110000));
//!
//! let status = credit_limit_status(q.principal, Some(dec!(120000)));
//! assert_eq!(status, CreditLimitStatus::Warning);
//! ```

pub mod calculator;
pub mod schedule;
pub mod installment;
pub mod loan;
pub mod error;

pub use calculator::{credit_limit_status, quote, CreditLimitStatus, LoanQuote, CREDIT_WARNING_RATIO};
pub use schedule::{end_date, generate_schedule, Frequency, ScheduledInstallment};
pub use installment::{Installment, InstallmentStatus, RemainderAction};
pub use loan::{Loan, LoanStatus, PaymentReceipt, RemainderOutcome};
pub use error::LendingError;
