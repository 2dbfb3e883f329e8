//! Collection DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use domain_lending::RemainderAction;

/// What the server should do with the unpaid part of an installment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemainderActionCode {
    #[default]
    #[serde(rename = "ignorar")]
    Ignore,
    #[serde(rename = "proxima")]
    NextInstallment,
    #[serde(rename = "especial")]
    Special,
}

impl RemainderActionCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemainderActionCode::Ignore => "ignorar",
            RemainderActionCode::NextInstallment => "proxima",
            RemainderActionCode::Special => "especial",
        }
    }

    /// Reads the select's value; anything unknown is `ignorar`
    pub fn from_code(code: &str) -> Self {
        match code {
            "proxima" => RemainderActionCode::NextInstallment,
            "especial" => RemainderActionCode::Special,
            _ => RemainderActionCode::Ignore,
        }
    }
}

impl From<&RemainderAction> for RemainderActionCode {
    fn from(action: &RemainderAction) -> Self {
        match action {
            RemainderAction::Ignore => RemainderActionCode::Ignore,
            RemainderAction::NextInstallment => RemainderActionCode::NextInstallment,
            RemainderAction::Special(_) => RemainderActionCode::Special,
        }
    }
}

/// Body of a partial collection
///
/// A full collection is posted without a body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionRequest {
    #[serde(rename = "monto", with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "accion_restante")]
    pub remainder_action: RemainderActionCode,
    #[serde(
        rename = "fecha_especial",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub special_date: Option<NaiveDate>,
}

impl CollectionRequest {
    pub fn new(amount: Decimal, action: RemainderAction) -> Self {
        Self {
            amount,
            remainder_action: RemainderActionCode::from(&action),
            special_date: action.special_date(),
        }
    }

    /// Domain reading of the requested action
    ///
    /// `especial` without a date cannot create an installment and is
    /// treated as `ignorar`.
    pub fn remainder_action(&self) -> RemainderAction {
        match (self.remainder_action, self.special_date) {
            (RemainderActionCode::NextInstallment, _) => RemainderAction::NextInstallment,
            (RemainderActionCode::Special, Some(date)) => RemainderAction::Special(date),
            _ => RemainderAction::Ignore,
        }
    }
}

/// Daily totals the server returns after a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionStats {
    #[serde(rename = "total_cobrado_hoy", with = "rust_decimal::serde::float")]
    pub collected_today: Decimal,
    #[serde(rename = "cantidad_cobros_hoy")]
    pub collections_today: u64,
}

/// Server answer to a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "estadisticas", default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<CollectionStats>,
}
