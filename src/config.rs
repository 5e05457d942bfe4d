// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Endpoint of the managed data API
    pub data_api_url: String,
    /// API key for guest-mode access to the data API
    pub data_api_key: String,
    /// Identity to run the binary as; read-only guest when unset
    pub local_user: Option<String>,
    /// Whether to run the baseline seeding routine at startup
    pub seed_on_start: bool,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            data_api_url: "http://localhost:20002/graphql".to_string(),
            data_api_key: "test-api-key".to_string(),
            local_user: Some("test-user".to_string()),
            seed_on_start: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            data_api_url: env::var("DATA_API_URL")
                .map_err(|_| ConfigError::Missing("DATA_API_URL"))?,
            data_api_key: env::var("DATA_API_KEY")
                .map_err(|_| ConfigError::Missing("DATA_API_KEY"))?,
            local_user: env::var("LOCAL_USER").ok(),
            seed_on_start: env::var("SEED_ON_START")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
