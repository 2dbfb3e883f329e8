//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! cobranza test suites.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built amounts, dates and quotes
//! - `builders`: Loan builder with sensible defaults
//! - `assertions`: Assertion helpers for money and schedules
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
