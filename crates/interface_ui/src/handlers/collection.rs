//! Payment collection
//!
//! Full collections post straight from the installment's button. Partial
//! collections go through a modal where the user types the amount and
//! decides what happens to the remainder.

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use core_kernel::{
    format_currency, format_number, parse_amount, parse_decimal_prefix, CoreError, InstallmentId,
};

use crate::dto::{CollectionRequest, CollectionResponse, RemainderActionCode};
use crate::error::{FormError, UiError};
use crate::gateway::CollectionGateway;
use crate::render::{elements, RenderInstruction};

/// Label shown under the amount field while it is empty
pub const AMOUNT_PROMPT: &str = "Ingrese el monto que el cliente pagará";

/// Fills and opens the partial payment modal
pub fn open_partial_payment(
    installment: InstallmentId,
    remaining: Decimal,
    client_name: Option<&str>,
    today: NaiveDate,
) -> Vec<RenderInstruction> {
    let mut out = vec![
        RenderInstruction::set_value(elements::PARTIAL_INSTALLMENT_ID, installment.to_string()),
        RenderInstruction::set_value(elements::PARTIAL_MAX, remaining.normalize().to_string()),
        RenderInstruction::set_text(elements::PARTIAL_MAX_LABEL, format_currency(remaining, 0)),
        RenderInstruction::set_value(elements::PARTIAL_AMOUNT, ""),
        RenderInstruction::SetPlaceholder {
            target: elements::PARTIAL_AMOUNT,
            text: format_number(remaining, 0),
        },
        RenderInstruction::set_value(
            elements::PARTIAL_ACTION,
            RemainderActionCode::Ignore.as_str(),
        ),
    ];
    out.extend(on_remainder_action_changed(RemainderActionCode::Ignore, today));

    if let Some(name) = client_name.filter(|n| !n.is_empty()) {
        out.push(RenderInstruction::set_text(elements::PARTIAL_CLIENT_NAME, name));
    }

    out.push(RenderInstruction::ShowModal {
        target: elements::PARTIAL_MODAL,
    });
    out.push(RenderInstruction::set_text(
        elements::TYPED_AMOUNT_LABEL,
        AMOUNT_PROMPT,
    ));
    out
}

/// Shows the special date picker only for `especial`, bounded to tomorrow
pub fn on_remainder_action_changed(
    action: RemainderActionCode,
    today: NaiveDate,
) -> Vec<RenderInstruction> {
    let target = elements::SPECIAL_DATE_CONTAINER;
    let visibility = if action == RemainderActionCode::Special {
        RenderInstruction::Show { target }
    } else {
        RenderInstruction::Hide { target }
    };

    let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);
    vec![
        visibility,
        RenderInstruction::SetDateBounds {
            target: elements::SPECIAL_DATE_INPUT,
            min: tomorrow,
            value: tomorrow,
        },
    ]
}

/// Label echoing the amount being typed in the modal
pub fn describe_typed_amount(text: &str) -> String {
    let value = parse_amount(text);
    if value > Decimal::ZERO {
        format!("Cobrando: {}", format_currency(value, 0))
    } else {
        AMOUNT_PROMPT.to_string()
    }
}

/// Current contents of the partial payment modal
#[derive(Debug, Clone, PartialEq)]
pub struct PartialPaymentForm {
    pub installment: InstallmentId,
    /// What the installment still owes
    pub max_amount: Decimal,
    pub amount_text: String,
    pub action: RemainderActionCode,
    pub special_date: Option<NaiveDate>,
}

impl PartialPaymentForm {
    /// Reads the modal's raw field values
    ///
    /// The hidden fields hold what [`open_partial_payment`] wrote: the
    /// bare installment key and a dot-decimal maximum. An empty date means
    /// none was picked.
    pub fn from_fields(
        installment: &str,
        max_amount: &str,
        amount_text: &str,
        action: &str,
        special_date: &str,
    ) -> Result<Self, CoreError> {
        let installment: InstallmentId = installment.parse()?;
        let max_amount = parse_decimal_prefix(max_amount)
            .ok_or_else(|| CoreError::validation(format!("invalid pending amount {:?}", max_amount)))?;
        let special_date = match special_date.trim() {
            "" => None,
            text => Some(
                NaiveDate::parse_from_str(text, "%Y-%m-%d")
                    .map_err(|e| CoreError::validation(format!("invalid special date {:?}: {}", text, e)))?,
            ),
        };

        Ok(Self {
            installment,
            max_amount,
            amount_text: amount_text.to_string(),
            action: RemainderActionCode::from_code(action),
            special_date,
        })
    }

    /// Checks the form and builds the request body
    pub fn validate(&self) -> Result<CollectionRequest, FormError> {
        let amount = parse_amount(self.amount_text.as_str());
        if amount <= Decimal::ZERO {
            return Err(FormError::InvalidAmount);
        }
        if amount > self.max_amount {
            return Err(FormError::ExceedsPending);
        }

        let special = self.action == RemainderActionCode::Special;
        if special && amount < self.max_amount && self.special_date.is_none() {
            return Err(FormError::MissingSpecialDate);
        }

        Ok(CollectionRequest {
            amount,
            remainder_action: self.action,
            special_date: if special { self.special_date } else { None },
        })
    }
}

/// Instructions for a finished full collection
pub fn full_collection_outcome(
    installment: InstallmentId,
    result: &Result<CollectionResponse, UiError>,
) -> Vec<RenderInstruction> {
    match result {
        Ok(response) => {
            let mut out = vec![
                RenderInstruction::success("¡Pago registrado!"),
                RenderInstruction::MarkInstallmentPaid { installment },
            ];
            if let Some(stats) = &response.stats {
                out.push(RenderInstruction::set_text(
                    elements::COLLECTED_TODAY,
                    format_currency(stats.collected_today, 0),
                ));
                out.push(RenderInstruction::set_text(
                    elements::COLLECTIONS_TODAY,
                    stats.collections_today.to_string(),
                ));
            }
            out
        }
        Err(err) => vec![
            RenderInstruction::error(err.user_message()),
            RenderInstruction::EnableControl { installment },
        ],
    }
}

/// Instructions for a finished partial collection
pub fn partial_collection_outcome(
    installment: InstallmentId,
    amount: Decimal,
    result: &Result<CollectionResponse, UiError>,
) -> Vec<RenderInstruction> {
    match result {
        Ok(response) => {
            let message = response
                .message
                .clone()
                .unwrap_or_else(|| format!("Pago de {} registrado", format_currency(amount, 0)));
            vec![
                RenderInstruction::success(message),
                RenderInstruction::ReloadPage,
            ]
        }
        Err(err) => vec![
            RenderInstruction::error(err.user_message()),
            RenderInstruction::EnableControl { installment },
        ],
    }
}

/// Submits collections, one at a time per installment
pub struct CollectionController<G> {
    gateway: G,
    in_flight: Mutex<HashSet<InstallmentId>>,
}

/// Holds an installment's in-flight slot until dropped
struct InFlightSlot<'a> {
    set: &'a Mutex<HashSet<InstallmentId>>,
    installment: InstallmentId,
}

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        let mut set = self.set.lock().unwrap_or_else(|e| e.into_inner());
        set.remove(&self.installment);
    }
}

impl<G: CollectionGateway> CollectionController<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Whether a collection for `installment` is awaiting the server
    pub fn is_in_flight(&self, installment: InstallmentId) -> bool {
        let set = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        set.contains(&installment)
    }

    fn claim(&self, installment: InstallmentId) -> Result<InFlightSlot<'_>, UiError> {
        let mut set = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if !set.insert(installment) {
            return Err(UiError::InFlight(installment));
        }
        Ok(InFlightSlot {
            set: &self.in_flight,
            installment,
        })
    }

    /// Collects everything the installment owes
    ///
    /// The host disables the installment's button when the click arrives.
    /// A click on an installment already being collected returns nothing.
    #[instrument(skip_all, fields(installment = %installment))]
    pub async fn collect_full(&self, installment: InstallmentId) -> Vec<RenderInstruction> {
        let _slot = match self.claim(installment) {
            Ok(slot) => slot,
            Err(err) => {
                debug!(%err, "Duplicate click ignored");
                return Vec::new();
            }
        };

        let result = self.gateway.submit(installment, None).await;
        full_collection_outcome(installment, &result)
    }

    /// Validates the modal and collects the typed amount
    #[instrument(skip_all, fields(installment = %form.installment))]
    pub async fn collect_partial(&self, form: &PartialPaymentForm) -> Vec<RenderInstruction> {
        let body = match form.validate() {
            Ok(body) => body,
            Err(err) => return vec![RenderInstruction::error(err.to_string())],
        };

        let _slot = match self.claim(form.installment) {
            Ok(slot) => slot,
            Err(err) => {
                debug!(%err, "Duplicate submit ignored");
                return Vec::new();
            }
        };

        let result = self.gateway.submit(form.installment, Some(&body)).await;
        partial_collection_outcome(form.installment, body.amount, &result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn form(amount: &str, action: RemainderActionCode, date: Option<NaiveDate>) -> PartialPaymentForm {
        PartialPaymentForm {
            installment: InstallmentId::new(3),
            max_amount: dec!(9000),
            amount_text: amount.to_string(),
            action,
            special_date: date,
        }
    }

    #[test]
    fn test_validate_messages() {
        let ignore = RemainderActionCode::Ignore;
        assert_eq!(form("", ignore, None).validate(), Err(FormError::InvalidAmount));
        assert_eq!(form("abc", ignore, None).validate(), Err(FormError::InvalidAmount));
        assert_eq!(form("9.001", ignore, None).validate(), Err(FormError::ExceedsPending));
        assert_eq!(
            form("4.000", RemainderActionCode::Special, None).validate(),
            Err(FormError::MissingSpecialDate)
        );
        assert_eq!(FormError::ExceedsPending.to_string(), "El monto no puede ser mayor al pendiente");
    }

    #[test]
    fn test_special_without_date_is_fine_when_nothing_remains() {
        let body = form("9.000", RemainderActionCode::Special, None).validate().unwrap();
        assert_eq!(body.amount, dec!(9000));
        assert_eq!(body.special_date, None);
    }

    #[test]
    fn test_date_only_sent_for_special() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 1);
        let body = form("4.000", RemainderActionCode::NextInstallment, date)
            .validate()
            .unwrap();
        assert_eq!(body.special_date, None);

        let body = form("4.000", RemainderActionCode::Special, date).validate().unwrap();
        assert_eq!(body.special_date, date);
    }

    #[test]
    fn test_form_from_page_fields() {
        let form = PartialPaymentForm::from_fields("3", "9000.5", "4.000", "especial", "2024-02-01")
            .unwrap();
        assert_eq!(form.installment, InstallmentId::new(3));
        assert_eq!(form.max_amount, dec!(9000.5));
        assert_eq!(form.action, RemainderActionCode::Special);
        assert_eq!(form.special_date, NaiveDate::from_ymd_opt(2024, 2, 1));

        let form = PartialPaymentForm::from_fields("3", "100", "", "", "").unwrap();
        assert_eq!(form.action, RemainderActionCode::Ignore);
        assert_eq!(form.special_date, None);
    }

    #[test]
    fn test_form_with_bad_hidden_fields() {
        assert!(matches!(
            PartialPaymentForm::from_fields("x", "100", "", "ignorar", ""),
            Err(CoreError::Validation(_))
        ));
        assert!(PartialPaymentForm::from_fields("3", "", "", "ignorar", "").is_err());
        assert!(PartialPaymentForm::from_fields("3", "100", "", "especial", "01/02/2024").is_err());
    }

    #[test]
    fn test_describe_typed_amount() {
        assert_eq!(describe_typed_amount("25.000"), "Cobrando: $25.000");
        assert_eq!(describe_typed_amount(""), AMOUNT_PROMPT);
    }

    #[test]
    fn test_date_picker_bounds() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let ins = on_remainder_action_changed(RemainderActionCode::Special, today);
        let tomorrow = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(
            ins,
            vec![
                RenderInstruction::Show {
                    target: elements::SPECIAL_DATE_CONTAINER
                },
                RenderInstruction::SetDateBounds {
                    target: elements::SPECIAL_DATE_INPUT,
                    min: tomorrow,
                    value: tomorrow
                },
            ]
        );
    }
}
