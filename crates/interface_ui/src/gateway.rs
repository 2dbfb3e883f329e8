//! Collection gateway
//!
//! The port the collection controller talks to, and its adapter over any
//! `tower::Service` that speaks `http` with axum bodies. In production the
//! service is an HTTP client stack; in tests it is an `axum::Router`.

use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use tower::{Service, ServiceExt};
use tracing::{info, instrument, warn};

use core_kernel::InstallmentId;

use crate::config::UiConfig;
use crate::dto::{CollectionRequest, CollectionResponse};
use crate::error::{UiError, DEFAULT_REJECTION};

/// Anti-forgery header the backend checks
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Largest response body read back
const MAX_RESPONSE_BYTES: usize = 64 * 1024;

/// Builds the `POST` for a collection
///
/// `None` is a full collection and carries no body.
pub fn build_collection_request(
    config: &UiConfig,
    installment: InstallmentId,
    body: Option<&CollectionRequest>,
) -> Result<Request<Body>, UiError> {
    let payload = match body {
        Some(body) => Body::from(
            serde_json::to_vec(body).map_err(|e| UiError::InvalidRequest(e.to_string()))?,
        ),
        None => Body::empty(),
    };

    Request::builder()
        .method(Method::POST)
        .uri(config.collection_url(installment))
        .header(header::CONTENT_TYPE, "application/json")
        .header(CSRF_HEADER, config.csrf_token.as_str())
        .body(payload)
        .map_err(|e| UiError::InvalidRequest(e.to_string()))
}

/// Submits collections to the backend
#[async_trait]
pub trait CollectionGateway: Send + Sync {
    /// Posts one collection and returns the accepted response
    ///
    /// A response with `success: false` is an error carrying the server's
    /// message.
    async fn submit(
        &self,
        installment: InstallmentId,
        body: Option<&CollectionRequest>,
    ) -> Result<CollectionResponse, UiError>;
}

/// [`CollectionGateway`] over a tower service
#[derive(Clone)]
pub struct TowerCollectionGateway<S> {
    service: S,
    config: UiConfig,
}

impl<S> TowerCollectionGateway<S> {
    pub fn new(service: S, config: UiConfig) -> Self {
        Self { service, config }
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }
}

#[async_trait]
impl<S> CollectionGateway for TowerCollectionGateway<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + Sync + 'static,
    S::Future: Send,
    S::Error: std::fmt::Display,
{
    #[instrument(skip_all, fields(installment = %installment, partial = body.is_some()))]
    async fn submit(
        &self,
        installment: InstallmentId,
        body: Option<&CollectionRequest>,
    ) -> Result<CollectionResponse, UiError> {
        let request = build_collection_request(&self.config, installment, body)?;
        let timeout_ms = self.config.request_timeout_ms;

        let response = tokio::time::timeout(
            Duration::from_millis(timeout_ms),
            self.service.clone().oneshot(request),
        )
        .await
        .map_err(|_| UiError::Timeout(timeout_ms))?
        .map_err(|e| UiError::Transport(e.to_string()))?;

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), MAX_RESPONSE_BYTES)
            .await
            .map_err(|e| UiError::InvalidResponse(e.to_string()))?;
        let parsed: CollectionResponse = serde_json::from_slice(&bytes)
            .map_err(|e| UiError::InvalidResponse(format!("status {}: {}", status, e)))?;

        if !parsed.success {
            warn!(%status, message = ?parsed.message, "Collection rejected");
            return Err(UiError::Rejected(
                parsed
                    .message
                    .unwrap_or_else(|| DEFAULT_REJECTION.to_string()),
            ));
        }

        info!(%status, "Collection accepted");
        Ok(parsed)
    }
}
