//! Installments (cuotas) and what to do with an unpaid remainder

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::Money;

/// Installment status, with the host's two-letter codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallmentStatus {
    #[serde(rename = "PE")]
    Pending,
    #[serde(rename = "PC")]
    Partial,
    #[serde(rename = "PA")]
    Paid,
}

impl InstallmentStatus {
    /// Label shown next to the installment
    pub fn label(&self) -> &'static str {
        match self {
            InstallmentStatus::Pending => "Pendiente",
            InstallmentStatus::Partial => "Pago Parcial",
            InstallmentStatus::Paid => "Pagado",
        }
    }
}

/// What happens to the part of an installment a partial payment leaves open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemainderAction {
    /// Leave it owing on the same installment
    Ignore,
    /// Add it to the next pending installment
    NextInstallment,
    /// Move it to a new installment due on the given date
    Special(NaiveDate),
}

impl RemainderAction {
    /// Wire code sent as `accion_restante`
    pub fn code(&self) -> &'static str {
        match self {
            RemainderAction::Ignore => "ignorar",
            RemainderAction::NextInstallment => "proxima",
            RemainderAction::Special(_) => "especial",
        }
    }

    /// Date of the special installment, if any
    pub fn special_date(&self) -> Option<NaiveDate> {
        match self {
            RemainderAction::Special(date) => Some(*date),
            _ => None,
        }
    }
}

impl Default for RemainderAction {
    fn default() -> Self {
        RemainderAction::Ignore
    }
}

/// A single installment of a loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// 1-based position within the loan
    pub number: u32,
    /// Amount due
    pub amount: Money,
    /// Amount collected so far
    pub paid: Money,
    pub due_date: NaiveDate,
    pub status: InstallmentStatus,
    /// Date of the last collection
    pub paid_on: Option<NaiveDate>,
}

impl Installment {
    /// Creates a pending installment
    pub fn new(number: u32, amount: Money, due_date: NaiveDate) -> Self {
        Self {
            number,
            amount,
            paid: Money::zero(amount.currency()),
            due_date,
            status: InstallmentStatus::Pending,
            paid_on: None,
        }
    }

    /// Amount still owed on this installment
    pub fn remaining(&self) -> Money {
        self.amount
            .checked_sub(&self.paid)
            .unwrap_or_else(|_| Money::zero(self.amount.currency()))
    }

    /// Pending or partially paid
    pub fn is_open(&self) -> bool {
        self.status != InstallmentStatus::Paid
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_open() && self.due_date < today
    }

    pub fn days_overdue(&self, today: NaiveDate) -> i64 {
        if !self.is_overdue(today) {
            return 0;
        }
        (today - self.due_date).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_installment_is_pending() {
        let i = Installment::new(1, Money::ars(dec!(500)), date(2024, 3, 1));
        assert_eq!(i.status, InstallmentStatus::Pending);
        assert_eq!(i.remaining().amount(), dec!(500));
    }

    #[test]
    fn test_overdue_days() {
        let i = Installment::new(1, Money::ars(dec!(500)), date(2024, 3, 1));
        assert!(!i.is_overdue(date(2024, 3, 1)));
        assert_eq!(i.days_overdue(date(2024, 3, 4)), 3);
    }

    #[test]
    fn test_paid_installment_is_never_overdue() {
        let mut i = Installment::new(1, Money::ars(dec!(500)), date(2024, 3, 1));
        i.status = InstallmentStatus::Paid;
        assert_eq!(i.days_overdue(date(2024, 4, 1)), 0);
    }

    #[test]
    fn test_action_codes() {
        assert_eq!(RemainderAction::Ignore.code(), "ignorar");
        assert_eq!(RemainderAction::NextInstallment.code(), "proxima");
        let special = RemainderAction::Special(date(2024, 5, 2));
        assert_eq!(special.code(), "especial");
        assert_eq!(special.special_date(), Some(date(2024, 5, 2)));
    }
}
