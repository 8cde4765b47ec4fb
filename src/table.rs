use std::sync::Arc;

use reqwest::Method;
use serde_json::{json, Map, Value};
use tracing::{debug, error};

use crate::errors::{RemoteError, StatusError};
use crate::graph::ClientProvider;
use crate::models::TableColumn;

/// One workbook table, addressed by display name.
///
/// Operations are pass-throughs: one HTTP call, one reshaped result. All
/// failures surface as [`StatusError`].
pub struct Table {
    drive: Arc<dyn ClientProvider>,
    prefix: String,
    name: String,
}

impl Table {
    pub(crate) fn new(
        drive: Arc<dyn ClientProvider>,
        prefix: String,
        name: impl Into<String>,
    ) -> Self {
        Self {
            drive,
            prefix,
            name: name.into(),
        }
    }

    /// Current display name. Updated locally after a successful [`rename`].
    ///
    /// [`rename`]: Table::rename
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resource URI of this table, relative to the client's base resource.
    pub fn uri(&self) -> String {
        format!("{}/{}", self.prefix, urlencoding::encode(&self.name))
    }

    /// Change the table's display name.
    ///
    /// Subsequent operations on this instance address the new name. Not
    /// safe to interleave with other in-flight operations on the same
    /// table, which the exclusive borrow enforces.
    pub async fn rename(&mut self, name: impl Into<String>) -> Result<(), StatusError> {
        let name = name.into();
        self.invoke(Method::PATCH, &self.uri(), Some(json!({ "name": name })))
            .await?;
        self.name = name;
        Ok(())
    }

    /// Header row values, left to right.
    pub async fn header_names(&self) -> Result<Vec<Value>, StatusError> {
        let result = self.get(&format!("{}/headerRowRange", self.uri())).await?;
        row_values(&result)
    }

    /// Every data row, row-major.
    pub async fn rows(&self) -> Result<Vec<Vec<Value>>, StatusError> {
        let result = self.get(&format!("{}/rows", self.uri())).await?;
        let entries = result
            .get("value")
            .and_then(Value::as_array)
            .ok_or_else(|| shape_error("rows response has no value array"))?;
        entries.iter().map(row_values).collect()
    }

    /// Rows as records keyed by column name. The header row the service
    /// echoes as data is discarded.
    pub async fn rows_as_records(&self) -> Result<Vec<Map<String, Value>>, StatusError> {
        let uri = format!("{}/columns", self.uri());
        debug!("get columns from {}", uri);
        let result = self.get(&uri).await?;
        let columns: Vec<TableColumn> =
            serde_json::from_value(result.get("value").cloned().unwrap_or(Value::Null))
                .map_err(|e| shape_error(&format!("columns response: {e}")))?;
        debug!(
            "got column names: {:?}",
            columns.iter().map(|c| c.name.as_str()).collect::<Vec<_>>()
        );
        Ok(records_from_columns(&columns))
    }

    /// One row by zero-based index.
    pub async fn row(&self, index: u32) -> Result<Vec<Value>, StatusError> {
        let result = self
            .get(&format!("{}/rows/itemAt(index={})", self.uri(), index))
            .await?;
        row_values(&result)
    }

    /// Append a single row; returns the index the service reports.
    pub async fn add_row(&self, values: Vec<Value>) -> Result<i64, StatusError> {
        self.add_rows(vec![values]).await
    }

    /// Append several rows in one call; returns the index the service
    /// reports for the insertion.
    pub async fn add_rows(&self, rows: Vec<Vec<Value>>) -> Result<i64, StatusError> {
        let result = self
            .invoke(
                Method::POST,
                &format!("{}/rows/add", self.uri()),
                Some(json!({ "index": null, "values": rows })),
            )
            .await?;
        result
            .get("index")
            .and_then(Value::as_i64)
            .ok_or_else(|| shape_error("add response has no index"))
    }

    /// Overwrite one row by zero-based index.
    pub async fn replace_row(&self, index: u32, values: Vec<Value>) -> Result<(), StatusError> {
        self.invoke(
            Method::PATCH,
            &format!("{}/rows/itemAt(index={})", self.uri(), index),
            Some(json!({ "values": [values] })),
        )
        .await?;
        Ok(())
    }

    /// Delete one row by zero-based index.
    pub async fn delete_row(&self, index: u32) -> Result<(), StatusError> {
        self.invoke(
            Method::DELETE,
            &format!("{}/rows/itemAt(index={})", self.uri(), index),
            None,
        )
        .await?;
        Ok(())
    }

    /// Number of data rows, header excluded.
    pub async fn row_count(&self) -> Result<u64, StatusError> {
        let result = self
            .get(&format!("{}/dataBodyRange?$select=rowCount", self.uri()))
            .await?;
        result
            .get("rowCount")
            .and_then(Value::as_u64)
            .ok_or_else(|| shape_error("dataBodyRange response has no rowCount"))
    }

    /// Column-major values of one column, header included.
    pub async fn column(&self, name: &str) -> Result<Vec<Vec<Value>>, StatusError> {
        let result = self
            .get(&format!(
                "{}/columns('{}')",
                self.uri(),
                urlencoding::encode(name)
            ))
            .await?;
        serde_json::from_value(result.get("values").cloned().unwrap_or(Value::Null))
            .map_err(|e| shape_error(&format!("column response: {e}")))
    }

    /// One authenticated read with failures normalized at the boundary.
    async fn get(&self, uri: &str) -> Result<Value, StatusError> {
        let result = async {
            let client = self.drive.client(false).await?;
            client.get(uri).await
        }
        .await;
        result.map_err(|e| self.fail(e))
    }

    /// One authenticated write call with failures normalized at the boundary.
    async fn invoke(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> Result<Value, StatusError> {
        let result = async {
            let client = self.drive.client(true).await?;
            client.invoke(method, uri, body).await
        }
        .await;
        result.map_err(|e| self.fail(e))
    }

    /// Log the actual underlying error, then normalize.
    fn fail(&self, error: RemoteError) -> StatusError {
        error!("table '{}' request failed: {}", self.name, error.actual());
        StatusError::from_remote(&error)
    }
}

/// First row of a range payload, as the service returns single-row ranges.
fn row_values(entry: &Value) -> Result<Vec<Value>, StatusError> {
    entry
        .get("values")
        .and_then(Value::as_array)
        .and_then(|rows| rows.first())
        .and_then(Value::as_array)
        .cloned()
        .ok_or_else(|| shape_error("range response has no values"))
}

/// Build row-major records from the column-major payload: record *i* takes,
/// for each column in declared order, the first cell of that column's row
/// *i*. The first record is the header row echoed as data and is dropped.
fn records_from_columns(columns: &[TableColumn]) -> Vec<Map<String, Value>> {
    let Some(first) = columns.first() else {
        return Vec::new();
    };
    let mut records: Vec<Map<String, Value>> = (0..first.values.len())
        .map(|rownum| {
            columns
                .iter()
                .map(|column| {
                    let value = column
                        .values
                        .get(rownum)
                        .and_then(|cells| cells.first())
                        .cloned()
                        .unwrap_or(Value::Null);
                    (column.name.clone(), value)
                })
                .collect()
        })
        .collect();
    if !records.is_empty() {
        records.remove(0);
    }
    records
}

fn shape_error(message: &str) -> StatusError {
    StatusError::new(format!("unexpected response: {message}"), 500)
}
