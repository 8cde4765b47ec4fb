//! Client library for OneDrive workbook tables and named items.
//!
//! Wraps the hosting service's REST resource model in two thin facades:
//! [`Workbook`] for named items and [`Table`] for header, row and column
//! access. Every operation issues one HTTP call and reshapes the JSON
//! response; every failure is normalized into a single status-coded
//! [`StatusError`] before it reaches the caller.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use onedrive_workbook::{BearerTokenProvider, ClientConfig, Workbook};
//!
//! # async fn run() -> Result<(), onedrive_workbook::StatusError> {
//! let drive = Arc::new(BearerTokenProvider::new(ClientConfig::default(), "token"));
//! let workbook = Workbook::new(drive, "/me/drive/items/ABC123/workbook");
//!
//! let table = workbook.table("Sales");
//! let headers = table.header_names().await?;
//! let index = table.add_row(vec!["2026".into(), "42".into()]).await?;
//! # let _ = (headers, index);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod graph;
pub mod models;
pub mod table;
pub mod workbook;

pub use config::ClientConfig;
pub use errors::{RemoteError, StatusError};
pub use graph::{BearerTokenProvider, ClientProvider, GraphClient};
pub use models::{NamedItem, TableColumn};
pub use table::Table;
pub use workbook::Workbook;
