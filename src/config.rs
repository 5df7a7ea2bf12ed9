//! Application configuration loaded from environment variables.
//!
//! Configuration is read once at startup. A `.env` file is honored for
//! local development.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the workout source REST API
    pub source_base_url: String,
    /// API key used to obtain per-user access tokens from the source
    pub source_api_key: String,
    /// GCP project ID for the Firestore record store
    pub gcp_project_id: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            source_base_url: env::var("SOURCE_BASE_URL")
                .map_err(|_| ConfigError::Missing("SOURCE_BASE_URL"))?,
            source_api_key: env::var("SOURCE_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("SOURCE_API_KEY"))?,
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            source_base_url: "http://localhost:4180".to_string(),
            source_api_key: "test_api_key".to_string(),
            gcp_project_id: "test-project".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
