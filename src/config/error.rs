//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid poll interval")]
    InvalidPollInterval,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid Trello base URL")]
    InvalidBaseUrl,

    #[error("Invalid {section} configuration: {source}")]
    InvalidSection {
        section: &'static str,
        #[source]
        source: crate::domain::foundation::ValidationError,
    },
}

impl ValidationError {
    /// Wraps a domain validation failure with the section it came from.
    pub fn in_section(
        section: &'static str,
    ) -> impl FnOnce(crate::domain::foundation::ValidationError) -> Self {
        move |source| ValidationError::InvalidSection { section, source }
    }
}
