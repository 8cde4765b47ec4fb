use serde_json::{Map, Value};
use thiserror::Error;

use super::remote::RemoteError;

/// Transport diagnostics that must never reach a caller.
const STRIPPED_KEYS: [&str; 3] = ["options", "request", "response"];

/// Status used when the transport reported none.
const DEFAULT_STATUS: u16 = 500;

/// Caller-facing error for every workbook operation.
///
/// Immutable once constructed: a message, a numeric status code, and
/// optional diagnostic details salvaged from the underlying cause.
#[derive(Debug, Clone, Error)]
#[error("{message} (status {status_code})")]
pub struct StatusError {
    message: String,
    status_code: u16,
    details: Option<Map<String, Value>>,
}

impl StatusError {
    pub fn new(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            message: message.into(),
            status_code,
            details: None,
        }
    }

    /// Normalize a raw transport error without revealing too much detail.
    ///
    /// The message and status come from the error as caught, status 500
    /// when the transport reported none. Details come from the unwrapped
    /// actual error: every field it carries except the transport keys in
    /// `STRIPPED_KEYS`. When nothing survives the strip, `details` stays
    /// `None` rather than an empty map.
    pub fn from_remote(error: &RemoteError) -> Self {
        let mut normalized = Self::new(
            error.message.clone(),
            error.status_code.unwrap_or(DEFAULT_STATUS),
        );
        let details: Map<String, Value> = error
            .actual()
            .own_fields()
            .into_iter()
            .filter(|(key, _)| !STRIPPED_KEYS.contains(&key.as_str()))
            .collect();
        if !details.is_empty() {
            normalized.details = Some(details);
        }
        normalized
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn details(&self) -> Option<&Map<String, Value>> {
        self.details.as_ref()
    }
}
