//! AI capability probe.
//!
//! The editor exposes a "test AI" control that checks whether the
//! configured assistant backend is reachable before the user relies on it.
//! This client sends the smallest possible request and reports the model
//! that answered. Parsing is pure so it can be tested without a network.

use std::time::Duration;

const API_VERSION: &str = "2023-06-01";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("AI api key not configured (set {var})")]
    MissingApiKey { var: String },
    #[error("http client build failed: {0}")]
    HttpClientBuild(String),
    #[error("AI request failed: {0}")]
    Request(String),
    #[error("AI endpoint returned {status}: {body}")]
    Response { status: u16, body: String },
    #[error("AI response did not parse: {0}")]
    Parse(String),
}

/// Typed AI probe configuration from environment variables.
///
/// Required:
/// - `AI_API_KEY`
///
/// Optional:
/// - `AI_MODEL`, `AI_BASE_URL`
/// - `AI_REQUEST_TIMEOUT_SECS` (default 30), `AI_CONNECT_TIMEOUT_SECS` (default 10)
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl AiConfig {
    /// # Errors
    ///
    /// [`AiError::MissingApiKey`] when `AI_API_KEY` is unset.
    pub fn from_env() -> Result<Self, AiError> {
        let api_key =
            std::env::var("AI_API_KEY").map_err(|_| AiError::MissingApiKey { var: "AI_API_KEY".into() })?;
        Ok(Self {
            api_key,
            model: std::env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_owned()),
            base_url: std::env::var("AI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned())
                .trim_end_matches('/')
                .to_owned(),
            request_timeout_secs: crate::state::env_parse("AI_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout_secs: crate::state::env_parse("AI_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        })
    }

    /// Config for a key submitted through the configuration form; model and
    /// endpoint fall back to the environment or the defaults.
    #[must_use]
    pub fn for_key(api_key: String, model: Option<String>) -> Self {
        Self {
            api_key,
            model: model
                .filter(|m| !m.trim().is_empty())
                .or_else(|| std::env::var("AI_MODEL").ok())
                .unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            base_url: std::env::var("AI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned())
                .trim_end_matches('/')
                .to_owned(),
            request_timeout_secs: crate::state::env_parse("AI_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout_secs: crate::state::env_parse("AI_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

pub struct AiClient {
    http: reqwest::Client,
    config: AiConfig,
}

impl AiClient {
    /// Build a client from the environment.
    ///
    /// # Errors
    ///
    /// Missing key or an HTTP client build failure.
    pub fn from_env() -> Result<Self, AiError> {
        Self::new(AiConfig::from_env()?)
    }

    /// Build a client for an explicit configuration.
    ///
    /// # Errors
    ///
    /// HTTP client build failure.
    pub fn new(config: AiConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| AiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send a one-token request and report which model answered.
    ///
    /// # Errors
    ///
    /// Transport failure, a non-200 status, or an unparsable body.
    pub async fn probe(&self) -> Result<String, AiError> {
        let body = ProbeRequest {
            model: &self.config.model,
            max_tokens: 1,
            messages: &[ProbeMessage { role: "user", content: "ping" }],
        };

        let response = self
            .http
            .post(format!("{}/v1/messages", self.config.base_url))
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| AiError::Request(e.to_string()))?;
        parse_probe_response(status, &text)
    }
}

#[derive(serde::Serialize)]
struct ProbeRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: &'a [ProbeMessage<'a>],
}

#[derive(serde::Serialize)]
struct ProbeMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(serde::Deserialize)]
struct ProbeResponse {
    model: String,
}

fn parse_probe_response(status: u16, body: &str) -> Result<String, AiError> {
    if status != 200 {
        return Err(AiError::Response { status, body: body.to_owned() });
    }

    let parsed: ProbeResponse = serde_json::from_str(body).map_err(|e| AiError::Parse(e.to_string()))?;
    Ok(format!("AI connection ok (model {})", parsed.model))
}

#[cfg(test)]
#[path = "ai_test.rs"]
mod tests;
