//! Core Kernel - Foundational types for the collections system
//!
//! This crate provides the building blocks shared by the lending domain and
//! the UI layer:
//! - Money types with precise decimal arithmetic
//! - Locale-aware formatting and parsing of amounts
//! - Typed identifiers for the host's records

pub mod money;
pub mod format;
pub mod identifiers;
pub mod error;

pub use money::{Money, Currency, MoneyError, Rate};
pub use format::{
    format_currency, format_currency_full, format_live_input, format_number,
    format_with_symbol, parse_amount, parse_decimal_prefix, raw_number, reformat_live_input,
    IntoAmount, LiveInput, NumberFormat,
};
pub use identifiers::{ClientId, LoanId, InstallmentId};
pub use error::CoreError;
