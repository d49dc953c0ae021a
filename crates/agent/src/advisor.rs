//! External AI advisor boundary.
//!
//! The advisor only proposes supplement names and free text. Canonical names,
//! dosage defaults and the fallback decision stay with the deterministic core.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use stackcoach_core::config::AdvisorConfig;
use stackcoach_core::{AdvisorResponse, UserProfile};
use thiserror::Error;
use tracing::{debug, warn};

const INITIAL_BACKOFF_MS: u64 = 250;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorRequest {
    pub request_id: String,
    pub primary_goal: String,
    pub profile: UserProfile,
    /// Opaque result of an earlier quiz, forwarded as-is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prior_result: Option<Value>,
}

impl AdvisorRequest {
    pub fn new(
        request_id: impl Into<String>,
        profile: &UserProfile,
        prior_result: Option<Value>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            primary_goal: profile.primary_goal.as_str().to_string(),
            profile: profile.clone(),
            prior_result,
        }
    }
}

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("advisor credentials are not configured")]
    MissingCredentials,
    #[error("advisor request timed out after {0:?}")]
    Timeout(Duration),
    #[error("advisor transport failure: {0}")]
    Transport(String),
    #[error("advisor returned HTTP {status}")]
    Status { status: u16 },
    #[error("advisor payload was malformed: {0}")]
    MalformedPayload(String),
}

impl AdvisorError {
    /// Stable reason code reported with a fallback.
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::MissingCredentials => "missing_credentials",
            Self::Timeout(_) => "timeout",
            Self::Transport(_) => "transport",
            Self::Status { .. } => "http_status",
            Self::MalformedPayload(_) => "malformed_payload",
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::Transport(_) => true,
            Self::Status { status } => {
                *status == StatusCode::TOO_MANY_REQUESTS.as_u16() || *status >= 500
            }
            Self::MissingCredentials | Self::MalformedPayload(_) => false,
        }
    }
}

#[async_trait]
pub trait AdvisorClient: Send + Sync {
    async fn recommend(&self, request: &AdvisorRequest) -> Result<AdvisorResponse, AdvisorError>;
}

#[derive(Serialize)]
struct AdvisorEnvelope<'a> {
    model: &'a str,
    #[serde(flatten)]
    request: &'a AdvisorRequest,
}

/// POSTs to `{base_url}/recommendations` with bearer auth.
#[derive(Clone, Debug)]
pub struct HttpAdvisorClient {
    client: Client,
    endpoint: String,
    api_key: SecretString,
    model: String,
    timeout: Duration,
    max_retries: u32,
}

impl HttpAdvisorClient {
    pub fn from_config(config: &AdvisorConfig) -> Result<Self, AdvisorError> {
        let (base_url, api_key) = config.credentials().ok_or(AdvisorError::MissingCredentials)?;
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| AdvisorError::Transport(error.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/recommendations", base_url.trim_end_matches('/')),
            api_key: api_key.clone(),
            model: config.model.clone(),
            timeout,
            max_retries: config.max_retries,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Longest a full `recommend` call can take: every attempt at the
    /// per-request timeout plus every backoff sleep between attempts.
    pub fn call_budget(&self) -> Duration {
        let attempts = self.timeout.saturating_mul(self.max_retries.saturating_add(1));
        (1..=self.max_retries).map(backoff).fold(attempts, Duration::saturating_add)
    }

    async fn send_once(&self, request: &AdvisorRequest) -> Result<AdvisorResponse, AdvisorError> {
        let envelope = AdvisorEnvelope { model: &self.model, request };
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret()) // ubs:ignore
            .json(&envelope)
            .send()
            .await
            .map_err(|error| self.transport_error(error))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::Status { status: status.as_u16() });
        }

        let body = response.text().await.map_err(|error| self.transport_error(error))?;
        serde_json::from_str::<AdvisorResponse>(&body)
            .map_err(|error| AdvisorError::MalformedPayload(error.to_string()))
    }

    fn transport_error(&self, error: reqwest::Error) -> AdvisorError {
        if error.is_timeout() {
            AdvisorError::Timeout(self.timeout)
        } else {
            AdvisorError::Transport(error.to_string())
        }
    }
}

#[async_trait]
impl AdvisorClient for HttpAdvisorClient {
    async fn recommend(&self, request: &AdvisorRequest) -> Result<AdvisorResponse, AdvisorError> {
        let mut attempt = 0;
        loop {
            match self.send_once(request).await {
                Ok(response) => {
                    debug!(
                        event_name = "agent.advisor.response",
                        request_id = %request.request_id,
                        supplements = response.supplements.len(),
                        "advisor responded"
                    );
                    return Ok(response);
                }
                Err(error) if error.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(
                        event_name = "agent.advisor.retry",
                        request_id = %request.request_id,
                        attempt,
                        max_retries = self.max_retries,
                        error = %error,
                        "advisor request failed; retrying"
                    );
                    tokio::time::sleep(backoff(attempt)).await;
                }
                Err(error) => return Err(error),
            }
        }
    }
}

/// Sleep before retry `attempt` (1-based), doubling up to a cap.
fn backoff(attempt: u32) -> Duration {
    Duration::from_millis(INITIAL_BACKOFF_MS << attempt.saturating_sub(1).min(6))
}
