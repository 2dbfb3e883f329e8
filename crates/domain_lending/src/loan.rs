//! Loans and payment registration
//!
//! A loan owns its installments. Registering a payment may touch more than
//! one of them: a partial payment's remainder can be pushed onto the next
//! pending installment or split off into a new special installment.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use core_kernel::{ClientId, LoanId, Money};

use crate::calculator::LoanQuote;
use crate::error::LendingError;
use crate::installment::{Installment, InstallmentStatus, RemainderAction};
use crate::schedule::{generate_schedule, Frequency};

/// Loan status, with the host's two-letter codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    #[serde(rename = "AC")]
    Active,
    #[serde(rename = "FI")]
    Finished,
    #[serde(rename = "CA")]
    Cancelled,
    #[serde(rename = "RE")]
    Renewed,
}

/// Where the remainder of a payment ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RemainderOutcome {
    /// Nothing left over
    Settled,
    /// Still owed on the same installment
    LeftPending,
    /// Added to the installment with this number
    MovedToNext { number: u32 },
    /// New installment with this number was created
    SpecialCreated { number: u32 },
}

/// Result of registering a payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub installment_number: u32,
    pub collected: Money,
    /// Part of the installment the payment did not cover
    pub leftover: Money,
    pub outcome: RemainderOutcome,
    pub installment_status: InstallmentStatus,
    pub loan_status: LoanStatus,
}

impl PaymentReceipt {
    /// User-facing confirmation
    pub fn message(&self) -> String {
        match self.outcome {
            RemainderOutcome::MovedToNext { .. } => format!(
                "Pago registrado. {:.2} sumado a la próxima cuota.",
                self.leftover
            ),
            RemainderOutcome::SpecialCreated { .. } => format!(
                "Pago registrado. Cuota especial creada por {:.2}.",
                self.leftover
            ),
            RemainderOutcome::Settled | RemainderOutcome::LeftPending => {
                "Pago registrado exitosamente".to_string()
            }
        }
    }
}

/// A loan and its installments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub client_id: ClientId,
    pub quote: LoanQuote,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub status: LoanStatus,
    installments: Vec<Installment>,
}

impl Loan {
    /// Creates an active loan with its full installment schedule
    pub fn originate(
        id: LoanId,
        client_id: ClientId,
        quote: LoanQuote,
        frequency: Frequency,
        start_date: NaiveDate,
    ) -> Self {
        let installments = generate_schedule(&quote, frequency, start_date)
            .into_iter()
            .map(|row| Installment::new(row.number, Money::ars(row.amount), row.due_date))
            .collect();

        debug!(loan_id = %id, count = quote.installment_count, "Loan originated");

        Self {
            id,
            client_id,
            quote,
            frequency,
            start_date,
            status: LoanStatus::Active,
            installments,
        }
    }

    pub fn installments(&self) -> &[Installment] {
        &self.installments
    }

    pub fn installment(&self, number: u32) -> Option<&Installment> {
        self.installments.iter().find(|i| i.number == number)
    }

    /// Due date of the latest installment
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.installments.iter().map(|i| i.due_date).max()
    }

    /// Sum collected across all installments
    pub fn paid_amount(&self) -> Money {
        self.installments
            .iter()
            .filter(|i| i.status != InstallmentStatus::Pending)
            .fold(Money::ars(Default::default()), |acc, i| acc + i.paid)
    }

    /// Total payable minus what has been collected
    pub fn pending_amount(&self) -> Money {
        self.quote.total_money() - self.paid_amount()
    }

    /// Number of fully paid installments
    pub fn paid_installments(&self) -> usize {
        self.installments
            .iter()
            .filter(|i| i.status == InstallmentStatus::Paid)
            .count()
    }

    /// Paid installments as a truncated percentage of all installments
    pub fn progress_percent(&self) -> u32 {
        if self.installments.is_empty() {
            return 0;
        }
        (self.paid_installments() * 100 / self.installments.len()) as u32
    }

    /// Lowest-numbered installment nothing has been paid on
    pub fn next_pending(&self) -> Option<&Installment> {
        self.installments
            .iter()
            .filter(|i| i.status == InstallmentStatus::Pending)
            .min_by_key(|i| i.number)
    }

    /// Registers a payment against installment `number`
    ///
    /// `None` pays whatever the installment still owes. If the payment
    /// leaves part of the installment open, `action` decides where that
    /// remainder goes. The loan finishes once no installment is open.
    pub fn register_payment(
        &mut self,
        number: u32,
        amount: Option<Money>,
        action: RemainderAction,
        today: NaiveDate,
    ) -> Result<PaymentReceipt, LendingError> {
        if self.status != LoanStatus::Active {
            return Err(LendingError::LoanNotActive(self.id));
        }

        let index = self
            .installments
            .iter()
            .position(|i| i.number == number)
            .ok_or(LendingError::InstallmentNotFound(number))?;

        let installment = &mut self.installments[index];
        if installment.status == InstallmentStatus::Paid {
            return Err(LendingError::AlreadyPaid(number));
        }

        let remaining_before = installment.remaining();
        let amount = amount.unwrap_or(remaining_before);
        if !amount.is_positive() {
            return Err(LendingError::InvalidAmount(format!(
                "payment must be positive, got {:.2}",
                amount
            )));
        }

        installment.paid = installment.paid.checked_add(&amount)?;
        installment.paid_on = Some(today);
        if installment.paid.amount() >= installment.amount.amount() {
            installment.status = InstallmentStatus::Paid;
            installment.paid = installment.amount;
        } else {
            installment.status = InstallmentStatus::Partial;
        }

        let leftover = remaining_before.checked_sub(&amount)?.clamp_non_negative();

        debug!(
            loan_id = %self.id,
            installment = number,
            collected = %amount.amount(),
            leftover = %leftover.amount(),
            action = action.code(),
            "Payment registered"
        );

        let outcome = if leftover.is_zero() {
            RemainderOutcome::Settled
        } else {
            self.place_remainder(index, leftover, action)
        };

        if !self.installments.iter().any(Installment::is_open) {
            self.status = LoanStatus::Finished;
            info!(loan_id = %self.id, "Loan fully paid");
        }

        Ok(PaymentReceipt {
            installment_number: number,
            collected: amount,
            leftover,
            outcome,
            installment_status: self.installments[index].status,
            loan_status: self.status,
        })
    }

    /// Marks every open installment paid and finishes the loan
    pub fn settle(&mut self, today: NaiveDate) -> Result<(), LendingError> {
        if self.status != LoanStatus::Active {
            return Err(LendingError::LoanNotActive(self.id));
        }
        for installment in self.installments.iter_mut().filter(|i| i.is_open()) {
            installment.status = InstallmentStatus::Paid;
            installment.paid = installment.amount;
            installment.paid_on = Some(today);
        }
        self.status = LoanStatus::Finished;
        Ok(())
    }

    fn place_remainder(
        &mut self,
        index: usize,
        leftover: Money,
        action: RemainderAction,
    ) -> RemainderOutcome {
        let number = self.installments[index].number;

        match action {
            RemainderAction::Ignore => RemainderOutcome::LeftPending,
            RemainderAction::NextInstallment => {
                let next = self
                    .installments
                    .iter()
                    .enumerate()
                    .filter(|(_, i)| i.status == InstallmentStatus::Pending && i.number > number)
                    .min_by_key(|(_, i)| i.number)
                    .map(|(position, _)| position);

                let Some(next) = next else {
                    return RemainderOutcome::LeftPending;
                };

                let target = &mut self.installments[next];
                target.amount = target.amount + leftover;
                let moved_to = target.number;
                self.installments[index].status = InstallmentStatus::Paid;
                RemainderOutcome::MovedToNext { number: moved_to }
            }
            RemainderAction::Special(due_date) => {
                let new_number = self
                    .installments
                    .iter()
                    .map(|i| i.number)
                    .max()
                    .unwrap_or(0)
                    + 1;
                self.installments
                    .push(Installment::new(new_number, leftover, due_date));
                self.installments[index].status = InstallmentStatus::Paid;
                RemainderOutcome::SpecialCreated { number: new_number }
            }
        }
    }
}
