//! Trello History Source - Implementation of HistorySource over the Trello REST API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = TrelloConfig::new(api_key, token)
//!     .with_base_url("https://api.trello.com/1");
//!
//! let source = TrelloHistorySource::new(config)?;
//! ```
//!
//! Credentials are passed as the `key` and `token` query parameters Trello
//! expects. Every call is a single GET; pacing is left to the caller's
//! rate-limited executor.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::domain::board::{ActionEvent, Column};
use crate::domain::foundation::{BoardId, CardId};
use crate::ports::{HistoryError, HistorySource};

use super::dto::{columns_from_lists, events_from_actions, TrelloAction, TrelloList};

pub const DEFAULT_BASE_URL: &str = "https://api.trello.com/1";

/// Configuration for the Trello history source.
#[derive(Debug, Clone)]
pub struct TrelloConfig {
    api_key: Secret<String>,
    token: Secret<String>,
    /// Base URL for the API (default: https://api.trello.com/1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl TrelloConfig {
    pub fn new(api_key: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            token: Secret::new(token.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn credentials(&self) -> [(&'static str, &str); 2] {
        [
            ("key", self.api_key.expose_secret().as_str()),
            ("token", self.token.expose_secret().as_str()),
        ]
    }
}

/// Reads columns and card histories from Trello.
pub struct TrelloHistorySource {
    client: Client,
    config: TrelloConfig,
}

impl TrelloHistorySource {
    pub fn new(config: TrelloConfig) -> Result<Self, HistoryError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| HistoryError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, HistoryError> {
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .query(&self.config.credentials())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    HistoryError::Transport(format!(
                        "Request timed out after {}s",
                        self.config.timeout.as_secs()
                    ))
                } else if e.is_connect() {
                    HistoryError::Transport(format!("Connection failed: {}", e))
                } else {
                    HistoryError::Transport(e.to_string())
                }
            })?;

        let response = Self::handle_response_status(response).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| HistoryError::Decode(e.to_string()))
    }

    async fn handle_response_status(response: Response) -> Result<Response, HistoryError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 => Err(HistoryError::Unauthorized),
            code => Err(HistoryError::Api {
                status: code,
                message: error_body,
            }),
        }
    }
}

#[async_trait]
impl HistorySource for TrelloHistorySource {
    async fn fetch_columns(&self, board_id: &BoardId) -> Result<Vec<Column>, HistoryError> {
        let lists: Vec<TrelloList> = self
            .get_json(
                &format!("boards/{}/lists", board_id),
                &[
                    ("fields", "id,name"),
                    ("filter", "all"),
                    ("cards", "all"),
                    ("card_fields", "shortUrl,name"),
                ],
            )
            .await?;

        tracing::debug!(board_id = %board_id, lists = lists.len(), "Fetched board lists");

        Ok(columns_from_lists(lists))
    }

    async fn fetch_actions(&self, card_id: &CardId) -> Result<Vec<ActionEvent>, HistoryError> {
        let actions: Vec<TrelloAction> = self
            .get_json(
                &format!("cards/{}/actions", card_id),
                &[("filter", "updateCard,createCard")],
            )
            .await?;

        tracing::debug!(card_id = %card_id, actions = actions.len(), "Fetched card actions");

        Ok(events_from_actions(actions))
    }
}

impl std::fmt::Debug for TrelloHistorySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrelloHistorySource")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_to_public_api() {
        let config = TrelloConfig::new("key", "token");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn config_debug_does_not_leak_credentials() {
        let config = TrelloConfig::new("super-secret-key", "super-secret-token");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-key"));
        assert!(!debug.contains("super-secret-token"));
    }

    #[test]
    fn urls_join_base_and_path() {
        let source = TrelloHistorySource::new(
            TrelloConfig::new("k", "t").with_base_url("http://localhost:8080/1/"),
        )
        .unwrap();
        assert_eq!(
            source.url("boards/abc/lists"),
            "http://localhost:8080/1/boards/abc/lists"
        );
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let source = TrelloHistorySource::new(
            TrelloConfig::new("k", "t")
                .with_base_url("http://127.0.0.1:1")
                .with_timeout(Duration::from_secs(2)),
        )
        .unwrap();

        let result = source
            .fetch_columns(&BoardId::new("board").unwrap())
            .await;

        assert!(matches!(result, Err(HistoryError::Transport(_))));
    }
}
