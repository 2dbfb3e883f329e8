//! Strongly-typed identifiers for domain entities
//!
//! The host application keys its records with integer primary keys. Wrapping
//! them in newtypes keeps a loan id from being passed where an installment
//! id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps an existing primary key
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the underlying key
            pub fn value(&self) -> u64 {
                self.0
            }

            /// Returns the identifier prefix used in log output
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        /// Displays the bare key, as used in URL paths
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Strip prefix if present
                let raw = s.trim();
                let raw = raw.strip_prefix(concat!($prefix, "-")).unwrap_or(raw);
                raw.parse().map(Self).map_err(|_| {
                    CoreError::validation(format!(concat!("invalid ", $prefix, " identifier: {:?}"), s))
                })
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> u64 {
                id.0
            }
        }
    };
}

define_id!(ClientId, "CLI");
define_id!(LoanId, "PRE");
define_id!(InstallmentId, "CUO");
