use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::errors::RemoteError;

/// HTTP client bound to a base resource and carrying auth for its calls.
///
/// Success responses come back as parsed JSON (null for empty bodies).
/// Non-success responses become a [`RemoteError`] whose status is the HTTP
/// status and whose nested cause is the parsed error body, so callers can
/// inspect the service's semantic `code`.
#[derive(Clone)]
pub struct GraphClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl GraphClient {
    pub(crate) fn new(http: reqwest::Client, base_url: String, token: String) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    /// GET a resource relative to the base URL.
    pub async fn get(&self, uri: &str) -> Result<Value, RemoteError> {
        self.invoke(Method::GET, uri, None).await
    }

    /// Issue a single call with an optional JSON body.
    pub async fn invoke(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> Result<Value, RemoteError> {
        let url = format!("{}{}", self.base_url, uri);
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, &url).bearer_auth(&self.token);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RemoteError::new(e.to_string(), e.status().map(|s| s.as_u16())))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RemoteError::new(e.to_string(), Some(status.as_u16())))?;

        if !status.is_success() {
            return Err(error_from_response(status, &text));
        }
        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| {
            RemoteError::new(
                format!("invalid JSON in response: {e}"),
                Some(status.as_u16()),
            )
        })
    }
}

/// Build the transport error for a non-success response, hanging the parsed
/// error body off the cause chain.
fn error_from_response(status: StatusCode, body: &str) -> RemoteError {
    let error = RemoteError::new(
        format!("{} - {}", status.as_u16(), body),
        Some(status.as_u16()),
    );
    match serde_json::from_str::<RemoteError>(body) {
        Ok(cause) => error.with_cause(cause),
        Err(_) => error,
    }
}
