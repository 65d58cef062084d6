//! Console configuration

use loctur_gateway::TransportOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::error::CoreError;
use crate::Result;

pub const SERVER_URL_ENV: &str = "LOCTUR_SERVER_URL";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend origin; the API lives under `/api/`
    pub server_url: String,
    /// Per-request timeout in seconds
    pub request_timeout: u64,
    pub user_agent: String,
}

impl Config {
    pub fn new(server_url: impl Into<String>) -> Self {
        let options = TransportOptions::default();
        Self {
            server_url: server_url.into(),
            request_timeout: options.timeout.as_secs(),
            user_agent: options.user_agent,
        }
    }

    /// `LOCTUR_SERVER_URL` when set, the local development server otherwise
    pub fn server_url_from_env() -> String {
        std::env::var(SERVER_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.server_url)
            .map_err(|e| CoreError::Config(format!("server_url {}: {e}", self.server_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CoreError::Config(format!(
                "server_url must be http or https, got {}",
                url.scheme()
            )));
        }
        if self.request_timeout == 0 {
            return Err(CoreError::Config("request_timeout must be positive".into()));
        }
        Ok(())
    }

    pub fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            timeout: Duration::from_secs(self.request_timeout),
            user_agent: self.user_agent.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::server_url_from_env())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_transport_defaults() {
        let config = Config::new("https://admin.loctur.ru");
        assert_eq!(config.request_timeout, 30);
        assert!(config.user_agent.starts_with("loctur-admin/"));
        assert!(config.validate().is_ok());
        assert_eq!(config.transport_options().timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_validate() {
        assert!(Config::new("not a url").validate().is_err());
        assert!(Config::new("ftp://files.loctur.ru").validate().is_err());

        let mut config = Config::new("http://127.0.0.1:8000");
        config.request_timeout = 0;
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_partial_config_file() {
        let config: Config =
            serde_json::from_str(r#"{"server_url": "https://admin.loctur.ru"}"#).unwrap();
        assert_eq!(config.server_url, "https://admin.loctur.ru");
        assert_eq!(config.request_timeout, 30);
    }
}
