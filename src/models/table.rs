use serde::Deserialize;
use serde_json::Value;

/// One table column as returned by the columns endpoint: the declared name
/// plus the column-major cell values, one single-cell row per table row,
/// header included.
#[derive(Debug, Clone, Deserialize)]
pub struct TableColumn {
    pub name: String,
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}
