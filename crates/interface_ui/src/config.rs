//! UI configuration

use serde::Deserialize;

use core_kernel::InstallmentId;

/// Configuration the UI collaborator receives from its host page
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Origin of the collections backend, without trailing slash
    pub base_url: String,
    /// Anti-forgery token sent with every collection request
    pub csrf_token: String,
    /// Collection request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Log level
    pub log_level: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            csrf_token: String::new(),
            request_timeout_ms: 15_000,
            log_level: "info".to_string(),
        }
    }
}

impl UiConfig {
    /// Loads configuration from `COBRANZA_*` environment variables
    ///
    /// Unset variables keep their default value.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("COBRANZA").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Same configuration with another CSRF token
    pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = token.into();
        self
    }

    /// Collection endpoint for one installment
    pub fn collection_url(&self, installment: InstallmentId) -> String {
        format!(
            "{}/api/cobrar/{}/",
            self.base_url.trim_end_matches('/'),
            installment
        )
    }
}
