//! Paper Generation Boundary
//!
//! The wizard hands its assembled configuration to an external paper generation service
//! and consumes only the returned paper id or the failure message. [`PaperGenerator`] is
//! the seam; [`HttpPaperGenerator`] talks to a JSON HTTP service.

use crate::assembler::PaperConfig;
use crate::error::WizardError;
use crate::types::PaperId;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Failure reported by a generator. The message, when present, is shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .message.as_deref().unwrap_or("paper generation failed"))]
pub struct GenerationError {
    pub message: Option<String>,
}

impl GenerationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    pub fn without_message() -> Self {
        Self { message: None }
    }
}

/// Result of asking the wizard to generate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Generated(PaperId),
    Failed(String),
    /// A request was already outstanding; nothing was sent
    AlreadyInFlight,
}

/// External paper generation service
#[async_trait]
pub trait PaperGenerator: Send + Sync {
    async fn generate(&self, config: &PaperConfig) -> Result<PaperId, GenerationError>;
}

/// Connection settings for [`HttpPaperGenerator`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Base URL, e.g. `https://papers.example.com/api`
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(endpoint) = &self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(format!(
                    "Endpoint must start with http:// or https:// (got '{}')",
                    endpoint
                ));
            }
        }
        if self.request_timeout_secs == 0 {
            return Err("Request timeout must be greater than zero".to_string());
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    paper_id: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

fn map_http_error(error: reqwest::Error) -> GenerationError {
    if error.is_timeout() {
        GenerationError::new(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        GenerationError::new(format!("Connection error: {}", error))
    } else {
        GenerationError::new(format!("HTTP error: {}", error))
    }
}

/// Pull a user-facing message out of an error response body, if it has one
fn error_message_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.or(b.message))
        .filter(|m| !m.trim().is_empty())
}

/// Generator backed by `POST {endpoint}/papers`
pub struct HttpPaperGenerator {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpPaperGenerator {
    pub fn new(config: &GeneratorConfig) -> Result<Self, WizardError> {
        config.validate().map_err(WizardError::ConfigError)?;
        let endpoint = config.endpoint.clone().ok_or_else(|| {
            WizardError::ConfigError("generator.endpoint is not configured".to_string())
        })?;
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| WizardError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn papers_url(&self) -> String {
        format!("{}/papers", self.endpoint)
    }
}

#[async_trait]
impl PaperGenerator for HttpPaperGenerator {
    async fn generate(&self, config: &PaperConfig) -> Result<PaperId, GenerationError> {
        let url = self.papers_url();
        debug!(url = %url, "Posting paper configuration");

        let mut request = self.client.post(&url).json(config);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request.send().await.map_err(map_http_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(match error_message_from_body(&body) {
                Some(message) => GenerationError::new(message),
                None => GenerationError::new(format!("Request failed with status {}", status)),
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::new(format!("Failed to parse response: {}", e)))?;
        Ok(parsed.paper_id)
    }
}
