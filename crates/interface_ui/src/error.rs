//! UI error handling

use thiserror::Error;

use core_kernel::InstallmentId;

/// Message shown when the server rejects a payment without saying why
pub const DEFAULT_REJECTION: &str = "Error al procesar el pago";

/// Failures talking to the collection endpoint
#[derive(Debug, Error)]
pub enum UiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The server answered `success: false`
    #[error("{0}")]
    Rejected(String),

    #[error("Collection already in progress for installment {0}")]
    InFlight(InstallmentId),
}

impl UiError {
    /// Text for the error toast
    pub fn user_message(&self) -> String {
        match self {
            UiError::Rejected(msg) => msg.clone(),
            UiError::Timeout(_) | UiError::Transport(_) => {
                "Error de conexión con el servidor".to_string()
            }
            UiError::InvalidResponse(_) | UiError::InvalidRequest(_) => {
                DEFAULT_REJECTION.to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Partial payment form problems, worded for the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Ingrese un monto válido")]
    InvalidAmount,

    #[error("El monto no puede ser mayor al pendiente")]
    ExceedsPending,

    #[error("Seleccione una fecha para la cuota especial")]
    MissingSpecialDate,
}
