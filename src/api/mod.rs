//! Client for the remote catalog endpoint
//!
//! Every operation is a single `POST` to one fixed URL. The body names the
//! action and its params; the `X-Auth` header carries the credential derived
//! for the current UTC day.
//!
//! # Error policy
//!
//! The client reports failures as [`ApiError`] and does nothing else: no
//! retries, no backoff, no caching. Callers log and move on.

pub mod models;

use crate::auth::{self, AUTH_HEADER};
use models::{Action, Envelope, Field, FieldsParams, Product, ProductId};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

/// Errors that can occur talking to the catalog endpoint
#[derive(Debug)]
pub enum ApiError {
    /// The request never produced a response (DNS, TLS, connect, timeout)
    Transport(String),
    /// The service answered with a non-success status
    Status { status: u16, body: String },
    /// The body was not JSON or did not have the expected shape
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "Network error: {}", msg),
            Self::Status { status, body } => {
                if body.is_empty() {
                    write!(f, "API error ({})", status)
                } else {
                    write!(f, "API error ({}): {}", status, truncate_body(body))
                }
            }
            Self::Decode(msg) => write!(f, "Malformed response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Keep error bodies short enough for a log line
fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() <= MAX {
        body.to_string()
    } else {
        let head: String = body.chars().take(MAX).collect();
        format!("{}...", head)
    }
}

/// Connection settings for [`ApiClient`]
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Endpoint URL (all actions go to the same URL)
    pub api_url: String,
    /// Shared secret the credential is derived from
    pub password: String,
    /// Per-request timeout
    pub timeout: Duration,
}

/// HTTP client for the catalog API
///
/// Cheap to clone: the underlying connection pool is shared.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api_url: String,
    password: String,
}

impl ApiClient {
    /// Create a new client
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(settings: &ClientSettings) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        tracing::debug!(
            "Catalog client ready: {} (timeout {}s)",
            settings.api_url,
            settings.timeout.as_secs()
        );

        Ok(Self {
            http,
            api_url: settings.api_url.clone(),
            password: settings.password.clone(),
        })
    }

    /// Endpoint this client talks to
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Issue one action and return the `result` payload as raw JSON
    pub async fn send(&self, action: &Action) -> Result<serde_json::Value, ApiError> {
        let token = auth::current_token(&self.password);
        tracing::debug!("→ {} {:?}", action.name(), action);

        let response = self
            .http
            .post(&self.api_url)
            .header(AUTH_HEADER, token.as_str())
            .json(action)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ApiError::Transport(format!("{} timed out", action.name()))
                } else {
                    ApiError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Envelope<serde_json::Value> =
            serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?;

        tracing::debug!("← {} ok ({} bytes)", action.name(), body.len());
        Ok(envelope.result)
    }

    /// Issue one action and decode the payload into `T`
    pub async fn call<T: DeserializeOwned>(&self, action: &Action) -> Result<T, ApiError> {
        let value = self.send(action).await?;
        serde_json::from_value(value)
            .map_err(|e| ApiError::Decode(format!("{}: {}", action.name(), e)))
    }

    /// Product records for the given identifiers
    pub async fn get_items(&self, ids: &[ProductId]) -> Result<Vec<Product>, ApiError> {
        self.call(&Action::GetItems { ids: ids.to_vec() }).await
    }

    /// Observed values of one field (may contain nulls)
    pub async fn get_fields(&self, field: Field) -> Result<Vec<serde_json::Value>, ApiError> {
        self.call(&Action::field_values(field)).await
    }

    /// Names of the fields the service knows about
    pub async fn get_field_names(&self) -> Result<Vec<String>, ApiError> {
        self.call(&Action::GetFields(FieldsParams::default())).await
    }
}
