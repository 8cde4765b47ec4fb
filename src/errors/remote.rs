use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;

/// Longest cause chain [`RemoteError::actual`] will follow.
const MAX_CAUSE_DEPTH: usize = 64;

/// Raw error surfaced by the transport layer for a failed remote call.
///
/// Mirrors the shape of the service's error bodies: the top-level value the
/// client constructs carries the HTTP status and response text, and the
/// parsed body hangs off `error` as a nested cause, itself carrying the
/// service's semantic `code` (e.g. `"ItemNotFound"`). Fields the service
/// returns beyond these are kept in `extra`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RemoteError {
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: Option<u16>,
    pub code: Option<String>,
    pub error: Option<Box<RemoteError>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RemoteError {
    pub fn new(message: impl Into<String>, status_code: Option<u16>) -> Self {
        Self {
            message: message.into(),
            status_code,
            ..Self::default()
        }
    }

    /// Attach a nested cause, as parsed from the service's error body.
    pub fn with_cause(mut self, cause: RemoteError) -> Self {
        self.error = Some(Box::new(cause));
        self
    }

    /// Attach the service's semantic error code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// The actual underlying error, found by descending through the nested
    /// causes until one has no further cause.
    ///
    /// Traversal is capped at `MAX_CAUSE_DEPTH`. Causes are owned, so the
    /// chain cannot loop back on itself, but the cap keeps an adversarially
    /// deep chain off the wire from being walked end to end; at the cap the
    /// node reached there is returned.
    pub fn actual(&self) -> &RemoteError {
        let mut current = self;
        let mut depth = 0;
        while let Some(cause) = current.error.as_deref() {
            if depth == MAX_CAUSE_DEPTH {
                break;
            }
            current = cause;
            depth += 1;
        }
        current
    }

    /// Fields of this node alone, excluding the nested cause.
    pub(crate) fn own_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        if !self.message.is_empty() {
            fields.insert("message".to_string(), Value::from(self.message.clone()));
        }
        if let Some(status) = self.status_code {
            fields.insert("statusCode".to_string(), Value::from(status));
        }
        if let Some(code) = &self.code {
            fields.insert("code".to_string(), Value::from(code.clone()));
        }
        for (key, value) in &self.extra {
            fields.insert(key.clone(), value.clone());
        }
        fields
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            f.write_str("remote call failed")?;
        } else {
            f.write_str(&self.message)?;
        }
        if let Some(code) = &self.code {
            write!(f, " [{code}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for RemoteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.error
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_service_error_body() {
        let body = json!({
            "error": {
                "code": "ItemNotFound",
                "message": "The requested resource doesn't exist.",
                "innerError": { "date": "2026-05-01T10:00:00" }
            }
        });
        let error: RemoteError = serde_json::from_value(body).unwrap();

        let actual = error.actual();
        assert_eq!(actual.code.as_deref(), Some("ItemNotFound"));
        assert_eq!(actual.message, "The requested resource doesn't exist.");
        assert!(actual.extra.contains_key("innerError"));
    }

    #[test]
    fn actual_returns_terminal_cause() {
        let error = RemoteError::new("outer", Some(502)).with_cause(
            RemoteError::new("middle", None)
                .with_cause(RemoteError::new("inner", None).with_code("Conflict")),
        );
        assert_eq!(error.actual().message, "inner");
        assert_eq!(error.actual().code.as_deref(), Some("Conflict"));
    }

    #[test]
    fn actual_without_cause_is_the_error_itself() {
        let error = RemoteError::new("plain", Some(400));
        assert_eq!(error.actual().message, "plain");
    }

    #[test]
    fn actual_terminates_on_adversarially_deep_chain() {
        let mut error = RemoteError::new("terminal", None);
        for depth in 0..1000 {
            error = RemoteError::new(format!("level {depth}"), None).with_cause(error);
        }

        // Deeper than the traversal cap; must stop rather than walk forever.
        let actual = error.actual();
        assert_eq!(actual.message, "level 935");
        assert!(actual.error.is_some());
    }

    #[test]
    fn display_carries_message_and_code() {
        let error = RemoteError::new("locked", None).with_code("resourceLocked");
        assert_eq!(error.to_string(), "locked [resourceLocked]");
        assert_eq!(RemoteError::default().to_string(), "remote call failed");
    }
}
