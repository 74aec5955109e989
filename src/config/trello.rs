//! Trello API configuration

use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use crate::adapters::trello::{TrelloConfig, DEFAULT_BASE_URL};

use super::error::ValidationError;

/// Trello API configuration
#[derive(Clone, Deserialize)]
pub struct TrelloApiConfig {
    /// Trello API key
    pub api_key: Option<String>,

    /// Trello member token
    pub token: Option<String>,

    /// Base URL of the REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl TrelloApiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// Client configuration for the Trello history source
    pub fn client_config(&self) -> Result<TrelloConfig, ValidationError> {
        let api_key = self
            .api_key()
            .ok_or(ValidationError::MissingRequired("TRELLO__API_KEY"))?;
        let token = self
            .token()
            .ok_or(ValidationError::MissingRequired("TRELLO__TOKEN"))?;

        Ok(TrelloConfig::new(api_key, token)
            .with_base_url(self.base_url.clone())
            .with_timeout(self.timeout()))
    }

    /// Validate Trello configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.client_config()?;

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl fmt::Debug for TrelloApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redacted(value: &Option<String>) -> Option<&'static str> {
            value.as_ref().map(|_| "[REDACTED]")
        }

        f.debug_struct("TrelloApiConfig")
            .field("api_key", &redacted(&self.api_key))
            .field("token", &redacted(&self.token))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for TrelloApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            token: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}
