//! Shared HTTP connection for all gateway implementations.
//!
//! One `reqwest::Client` (and one connection pool) serves every endpoint.
//! Routing all requests through [`ApiConnection`] keeps the bearer header
//! and the error mapping uniform: the session token is attached whenever a
//! session exists, and non-2xx responses are decoded into
//! [`ScribeError::Api`] with the backend's own message text.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use scribe_core::auth::SessionHandle;
use scribe_core::config::ClientConfig;
use scribe_core::{Result, ScribeError};

/// Shared connection state: base URL, HTTP client and session handle.
///
/// Cloning is cheap; clones share the client and observe the same session.
#[derive(Debug, Clone)]
pub struct ApiConnection {
    client: reqwest::Client,
    base_url: String,
    session: SessionHandle,
}

impl ApiConnection {
    /// Builds a connection from the client configuration.
    pub fn new(config: &ClientConfig, session: SessionHandle) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ScribeError::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// The session handle requests are signed with.
    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Starts a request to `path` (leading slash), attaching the bearer
    /// token when a session exists.
    pub(crate) async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, url);
        if let Some(token) = self.session.bearer_token().await {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        request
    }

    /// Sends a prepared request and maps transport and status failures.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(transport_error)?;
        check_status(response).await
    }

    /// Probes the backend health endpoint.
    pub async fn health(&self) -> Result<()> {
        let request = self.request(Method::GET, "/health").await;
        self.send(request).await?;
        Ok(())
    }
}

/// Decodes a JSON response body, mapping decode failures.
pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    response.json::<T>().await.map_err(|e| ScribeError::Serialization {
        format: "JSON".to_string(),
        message: format!("failed to decode response body: {e}"),
    })
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(api_error(status, body))
}

/// Maps a non-2xx response to [`ScribeError::Api`].
///
/// The backend answers errors as JSON carrying a `detail`, `error` or
/// `message` field; when none parses, the raw body text is the message.
fn api_error(status: StatusCode, body: String) -> ScribeError {
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|json| {
            ["detail", "error", "message"]
                .iter()
                .find_map(|key| json.get(key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .unwrap_or(body);
    tracing::debug!(
        target: "scribe::gateway",
        status = status.as_u16(),
        "request rejected: {message}"
    );
    ScribeError::api(status.as_u16(), message)
}

pub(crate) fn transport_error(err: reqwest::Error) -> ScribeError {
    if err.is_timeout() {
        return ScribeError::network(format!("request timed out: {err}"));
    }
    ScribeError::network(err.to_string())
}
