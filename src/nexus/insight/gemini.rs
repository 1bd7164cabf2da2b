//! Reqwest-backed insight adapter for the Gemini `generateContent` API.
//!
//! This adapter owns transport details only: request serialisation, timeout and
//! HTTP error mapping, and decoding the generated text.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::{build_prompt, InsightError, InsightFetcher};
use crate::config::NexusConfig;

const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiFetcher {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    key_env: String,
}

impl GeminiFetcher {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: &str,
        model: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, InsightError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InsightError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            key_env: String::new(),
        })
    }

    /// Build an adapter from configuration, reading the key from the configured
    /// environment variable. A missing key is not an error here; requests fail
    /// with [`InsightError::MissingCredentials`] instead.
    pub fn from_config(config: &NexusConfig) -> Result<Self, InsightError> {
        let api_key = std::env::var(&config.insight_key_env).ok();
        let mut fetcher = Self::new(
            &config.insight_endpoint,
            &config.insight_model,
            api_key,
            Duration::from_secs(config.insight_timeout_secs),
        )?;
        fetcher.key_env = config.insight_key_env.clone();
        Ok(fetcher)
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl InsightFetcher for GeminiFetcher {
    async fn request_insight(
        &self,
        title: &str,
        description: &str,
    ) -> Result<String, InsightError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| InsightError::MissingCredentials(self.key_env.clone()))?;

        let response = self
            .client
            .post(self.url())
            .header(API_KEY_HEADER, api_key)
            .json(&request_body(&build_prompt(title, description)))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_response(body.as_ref())
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

fn request_body(prompt: &str) -> GenerateRequest {
    GenerateRequest {
        contents: vec![RequestContent {
            parts: vec![RequestPart {
                text: prompt.to_string(),
            }],
        }],
    }
}

fn parse_response(body: &[u8]) -> Result<String, InsightError> {
    let decoded: GenerateResponse = serde_json::from_slice(body)
        .map_err(|e| InsightError::Decode(format!("invalid JSON payload: {}", e)))?;

    let text = decoded
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        return Err(InsightError::Decode("response contained no text".to_string()));
    }
    Ok(text.to_string())
}

fn map_transport_error(error: reqwest::Error) -> InsightError {
    if error.is_timeout() {
        InsightError::Timeout(error.to_string())
    } else {
        InsightError::Transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> InsightError {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let message = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => InsightError::Timeout(
            format!("status {}", status.as_u16()),
        ),
        _ => InsightError::Status {
            status: status.as_u16(),
            message,
        },
    }
}
