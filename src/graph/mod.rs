//! Authenticated HTTP transport for the workbook API

pub mod client;
pub mod provider;

pub use client::GraphClient;
pub use provider::{BearerTokenProvider, ClientProvider};
