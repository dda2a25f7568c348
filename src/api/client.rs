//! Payroll backend HTTP client.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::request::ApiRequest;
use crate::error::{AppError, Result};

/// Path requested by [`ApiClient::test_connection`].
const PROBE_PATH: &str = "/api/departments";

/// Longest backend error body echoed into a status error.
const MAX_ERROR_BODY: usize = 200;

/// Backend HTTP client.
///
/// Every call goes through [`ApiClient::send`], which validates the status
/// code before touching the body, so callers always get either the decoded
/// JSON or a typed [`AppError`].
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - The backend root (e.g., "http://localhost:8080")
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let parsed = reqwest::Url::parse(base_url)
            .map_err(|e| AppError::config(format!("{base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::config(format!("{base_url}: expected an http or https URL")));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The backend root this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a request path.
    pub fn url(&self, path: &str) -> String {
        format!("{base}{path}", base = self.base_url)
    }

    /// Execute a request and return its JSON body.
    ///
    /// Non-success statuses become [`AppError::Status`]. An empty body
    /// decodes as `Value::Null`.
    pub async fn send(&self, request: &ApiRequest) -> Result<Value> {
        let url = self.url(&request.path);
        debug!("{request}");

        let mut builder = self.client.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.inspect_err(|e| warn!("{request} failed: {e}"))?;
        let status = response.status();
        // The backend answered; a broken body is not a transport failure.
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                warn!("{request} returned {status} with an unreadable body: {e}");
                if !status.is_success() {
                    return Err(AppError::Status {
                        status,
                        message: status_message(status, ""),
                    });
                }
                return Err(AppError::decode(format!("{request}: unreadable response body: {e}")));
            }
        };

        if !status.is_success() {
            warn!("{request} returned {status}");
            return Err(AppError::Status {
                status,
                message: status_message(status, &text),
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| AppError::decode(format!("{request}: {e}")))
    }

    /// Execute a request and decode the body into `T`.
    pub async fn send_as<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T> {
        let value = self.send(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Check that the backend answers.
    pub async fn test_connection(&self) -> Result<()> {
        self.send(&ApiRequest::get(PROBE_PATH)).await.map(|_| ())
    }
}

/// Build the message for a failed status from the body or the reason phrase.
fn status_message(status: reqwest::StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return status.canonical_reason().unwrap_or("Request failed").to_string();
    }
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
