use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named range within a workbook document.
///
/// A projection of the service's resource: anything beyond name, value and
/// comment is dropped on the floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedItem {
    pub name: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}
