use std::sync::Arc;

use reqwest::Method;
use serde_json::{json, Value};
use tracing::error;

use crate::errors::{RemoteError, StatusError};
use crate::graph::ClientProvider;
use crate::models::NamedItem;
use crate::table::Table;

/// Semantic codes the service reports for named-item conflicts.
const ITEM_ALREADY_EXISTS: &str = "ItemAlreadyExists";
const ITEM_NOT_FOUND: &str = "ItemNotFound";

/// Root handle for one workbook: named items plus access to its tables.
pub struct Workbook {
    drive: Arc<dyn ClientProvider>,
    uri: String,
}

impl Workbook {
    /// `uri` is the workbook resource path relative to the client's base
    /// URL, e.g. `/me/drive/items/{id}/workbook`.
    pub fn new(drive: Arc<dyn ClientProvider>, uri: impl Into<String>) -> Self {
        Self {
            drive,
            uri: uri.into(),
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// A table of this workbook, addressed by display name.
    pub fn table(&self, name: impl Into<String>) -> Table {
        Table::new(self.drive.clone(), format!("{}/tables", self.uri), name)
    }

    /// All named items of the workbook.
    pub async fn named_items(&self) -> Result<Vec<NamedItem>, StatusError> {
        let result = async {
            let client = self.drive.client(false).await?;
            client.get(&format!("{}/names", self.uri)).await
        }
        .await
        .map_err(|e| self.fail(e))?;

        serde_json::from_value(result.get("value").cloned().unwrap_or(Value::Null))
            .map_err(|e| StatusError::new(format!("unexpected response: {e}"), 500))
    }

    /// One named item, or `None` when the service reports it absent.
    pub async fn named_item(&self, name: &str) -> Result<Option<NamedItem>, StatusError> {
        let result = async {
            let client = self.drive.client(false).await?;
            client
                .get(&format!("{}/names/{}", self.uri, urlencoding::encode(name)))
                .await
        }
        .await;

        match result {
            Ok(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| StatusError::new(format!("unexpected response: {e}"), 500)),
            Err(e) if e.status_code == Some(404) => Ok(None),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Create a named item pointing at `reference`.
    ///
    /// A conflict the service reports as `ItemAlreadyExists` surfaces with
    /// status 409 regardless of the transport status.
    pub async fn add_named_item(
        &self,
        name: &str,
        reference: &str,
        comment: Option<&str>,
    ) -> Result<(), StatusError> {
        let mut body = json!({ "name": name, "reference": reference });
        if let Some(comment) = comment {
            body["comment"] = Value::from(comment);
        }

        let result = async {
            let client = self.drive.client(true).await?;
            client
                .invoke(Method::POST, &format!("{}/names/add", self.uri), Some(body))
                .await
        }
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if e.actual().code.as_deref() == Some(ITEM_ALREADY_EXISTS) => {
                Err(StatusError::new(e.message.clone(), 409))
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Delete a named item.
    ///
    /// An absence the service reports as `ItemNotFound` surfaces with
    /// status 404 regardless of the transport status.
    pub async fn delete_named_item(&self, name: &str) -> Result<(), StatusError> {
        let result = async {
            let client = self.drive.client(true).await?;
            client
                .invoke(
                    Method::DELETE,
                    &format!("{}/names/{}", self.uri, urlencoding::encode(name)),
                    None,
                )
                .await
        }
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if e.actual().code.as_deref() == Some(ITEM_NOT_FOUND) => {
                Err(StatusError::new(e.message.clone(), 404))
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Log the actual underlying error, then normalize.
    fn fail(&self, error: RemoteError) -> StatusError {
        error!("workbook request failed: {}", error.actual());
        StatusError::from_remote(&error)
    }
}
