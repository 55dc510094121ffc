// src/session.rs

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::ApiError;

/// HTTP session against the YouTube Data API. Holds the key it was built with;
/// every call is a fresh request, nothing is cached or retried.
#[derive(Clone)]
pub struct YouTubeSession {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeSession {
    pub fn new(api_key: &str, base_url: &str, client: Client) -> Result<Self, ApiError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ApiError::MissingKey);
        }
        Ok(YouTubeSession {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.http_timeout).build()?;
        Self::new(&config.api_key, &config.api_base_url, client)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GETs `{base_url}/{resource}` with `params` plus the key and returns the JSON body.
    pub async fn send_request(&self, resource: &str, params: &[(&str, String)]) -> Result<Value, ApiError> {
        let url = format!("{}/{}", self.base_url, resource);
        debug!(%url, ?params, "sending YouTube API request");

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(classify_error(status, &body));
        }

        serde_json::from_str::<Value>(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Maps an error response onto the [`ApiError`] taxonomy using the `reason`
/// codes the Data API puts in `error.errors[].reason`.
pub fn classify_error(status: StatusCode, body: &str) -> ApiError {
    let json = serde_json::from_str::<Value>(body).unwrap_or(Value::Null);
    let message = json["error"]["message"]
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());

    let reasons: Vec<&str> = json["error"]["errors"]
        .as_array()
        .map(|errors| errors.iter().filter_map(|e| e["reason"].as_str()).collect())
        .unwrap_or_default();

    let has_reason = |wanted: &[&str]| reasons.iter().any(|r| wanted.contains(r));

    if has_reason(&["quotaExceeded", "dailyLimitExceeded", "rateLimitExceeded", "userRateLimitExceeded"]) {
        ApiError::QuotaExceeded(message)
    } else if has_reason(&["keyInvalid", "keyExpired"]) || message.contains("API key not valid") {
        ApiError::InvalidKey(message)
    } else {
        ApiError::Status { code: status.as_u16(), message }
    }
}
