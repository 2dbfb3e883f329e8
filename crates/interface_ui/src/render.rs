//! Render instructions
//!
//! Handlers never touch the page. They return a list of instructions the
//! host applies in order, which keeps every handler a plain function that
//! can be tested without a browser.

use chrono::NaiveDate;
use serde::Serialize;

use core_kernel::InstallmentId;

/// Element ids of the host page
pub mod elements {
    pub const PRINCIPAL_INPUT: &str = "id_monto_solicitado";
    pub const RATE_INPUT: &str = "id_tasa_interes_porcentaje";
    pub const INSTALLMENTS_INPUT: &str = "id_cuotas_pactadas";
    pub const LOAN_SUMMARY: &str = "resumen-prestamo";
    pub const TOTAL_PAYABLE: &str = "total-pagar";
    pub const INSTALLMENT_AMOUNT: &str = "valor-cuota";
    pub const CREDIT_ALERT: &str = "alerta-credito";

    pub const COLLECTED_TODAY: &str = "total-cobrado-hoy";
    pub const COLLECTIONS_TODAY: &str = "cantidad-cobros-hoy";

    pub const PARTIAL_MODAL: &str = "modal-pago-parcial";
    pub const PARTIAL_INSTALLMENT_ID: &str = "pago-cuota-id";
    pub const PARTIAL_MAX: &str = "pago-monto-max";
    pub const PARTIAL_MAX_LABEL: &str = "pago-monto-max-label";
    pub const PARTIAL_AMOUNT: &str = "pago-monto";
    pub const PARTIAL_ACTION: &str = "pago-accion-restante";
    pub const PARTIAL_CLIENT_NAME: &str = "pago-cliente-nombre";
    pub const TYPED_AMOUNT_LABEL: &str = "monto-formateado-label";
    pub const SPECIAL_DATE_CONTAINER: &str = "fecha-especial-container";
    pub const SPECIAL_DATE_INPUT: &str = "pago-fecha-especial";

    pub const SEARCH_INPUT: &str = "search-input";
    pub const SEARCH_RESULTS: &str = "search-results";
}

/// Element id on the host page
pub type ElementId = &'static str;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

/// One change the host applies to the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RenderInstruction {
    SetText { target: ElementId, text: String },
    SetValue { target: ElementId, value: String },
    SetPlaceholder { target: ElementId, text: String },
    /// Moves the caret of an input field, in characters
    SetCursor { target: ElementId, position: usize },
    Show { target: ElementId },
    Hide { target: ElementId },
    ShowAlert { target: ElementId, level: AlertLevel, text: String },
    HideAlert { target: ElementId },
    Toast { kind: ToastKind, message: String },
    /// Collect button of an installment
    DisableControl { installment: InstallmentId },
    EnableControl { installment: InstallmentId },
    MarkInstallmentPaid { installment: InstallmentId },
    SetDateBounds { target: ElementId, min: NaiveDate, value: NaiveDate },
    ShowModal { target: ElementId },
    /// Empties the children of a container
    ClearContent { target: ElementId },
    /// Filterable list entries, addressed by the key the host gave them
    ShowItem { item: String },
    HideItem { item: String },
    ReloadPage,
}

impl RenderInstruction {
    pub fn set_text(target: ElementId, text: impl Into<String>) -> Self {
        RenderInstruction::SetText {
            target,
            text: text.into(),
        }
    }

    pub fn set_value(target: ElementId, value: impl Into<String>) -> Self {
        RenderInstruction::SetValue {
            target,
            value: value.into(),
        }
    }

    pub fn toast(kind: ToastKind, message: impl Into<String>) -> Self {
        RenderInstruction::Toast {
            kind,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::toast(ToastKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::toast(ToastKind::Error, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_instruction_wire_shape() {
        let ins = RenderInstruction::set_text(elements::TOTAL_PAYABLE, "$110.000");
        assert_eq!(
            serde_json::to_value(&ins).unwrap(),
            json!({"op": "set_text", "target": "total-pagar", "text": "$110.000"})
        );
    }

    #[test]
    fn test_unit_and_id_variants() {
        assert_eq!(
            serde_json::to_value(RenderInstruction::ReloadPage).unwrap(),
            json!({"op": "reload_page"})
        );
        let ins = RenderInstruction::MarkInstallmentPaid {
            installment: InstallmentId::new(12),
        };
        assert_eq!(
            serde_json::to_value(&ins).unwrap(),
            json!({"op": "mark_installment_paid", "installment": 12})
        );
    }

    #[test]
    fn test_item_variants() {
        assert_eq!(
            serde_json::to_value(RenderInstruction::HideItem { item: "c-3".into() }).unwrap(),
            json!({"op": "hide_item", "item": "c-3"})
        );
        assert_eq!(
            serde_json::to_value(RenderInstruction::ClearContent {
                target: elements::SEARCH_RESULTS
            })
            .unwrap(),
            json!({"op": "clear_content", "target": "search-results"})
        );
    }

    #[test]
    fn test_toast_kind() {
        assert_eq!(
            serde_json::to_value(RenderInstruction::error("x")).unwrap(),
            json!({"op": "toast", "kind": "error", "message": "x"})
        );
    }
}
