//! HTTP client for the external AI analysis service

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

use super::types::AnalysisRequest;

/// Default base URL of the analysis service
pub const DEFAULT_AI_URL: &str = "http://localhost:8000";

/// Errors returned by an analysis call
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Non-2xx answer; the message is the service's `detail` when it sent one
    #[error("{message}")]
    Service { status: u16, message: String },

    /// The service could not be reached
    #[error("analysis request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The answer did not match the expected result shape
    #[error("unexpected analysis result: {0}")]
    Decode(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Build the error for a failed response from its status and raw body
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| match v.get("detail") {
                Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
                Some(Value::Null) | None => None,
                Some(other) => Some(other.to_string()),
            });
        AnalysisError::Service {
            status,
            message: detail.unwrap_or_else(|| format!("API error: {status}")),
        }
    }
}

/// Something that can run a named analysis over a repository
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// POST `request` to the analysis named `endpoint` (e.g. `analyze-prs`)
    async fn analyze(&self, endpoint: &str, request: &AnalysisRequest) -> Result<Value, AnalysisError>;
}

/// reqwest-backed [`AnalysisService`]
#[derive(Debug, Clone)]
pub struct AiClient {
    http: Client,
    base_url: String,
}

impl AiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for AiClient {
    fn default() -> Self {
        Self::new(DEFAULT_AI_URL)
    }
}

#[async_trait]
impl AnalysisService for AiClient {
    #[instrument(skip(self), fields(owner = %request.owner, repo = %request.repo))]
    async fn analyze(&self, endpoint: &str, request: &AnalysisRequest) -> Result<Value, AnalysisError> {
        let url = format!("{}/api/ai/{}", self.base_url, endpoint);
        debug!(%url, "calling analysis service");

        let response = self.http.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AnalysisError::from_response(status.as_u16(), &body));
        }
        Ok(serde_json::from_str(&body)?)
    }
}
