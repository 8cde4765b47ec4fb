use anyhow::{Context, Result};
use std::env;

/// Default base for the hosting service's REST API.
pub const DEFAULT_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Connection settings for the hosting service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: default_user_agent(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Ok(ClientConfig {
            base_url: env::var("ONEDRIVE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            user_agent: env::var("ONEDRIVE_USER_AGENT").unwrap_or_else(|_| default_user_agent()),
            timeout_seconds: env::var("ONEDRIVE_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECONDS.to_string())
                .parse()
                .context("ONEDRIVE_TIMEOUT_SECONDS must be a valid number")?,
        })
    }
}

fn default_user_agent() -> String {
    format!("onedrive-workbook/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_graph() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.user_agent.starts_with("onedrive-workbook/"));
        assert_eq!(config.timeout_seconds, 30);
    }
}
