//! HTTP response DTOs.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`.
    pub status: String,
    /// Version.
    pub version: String,
    /// `up` or `down`.
    pub database: String,
}

impl HealthResponse {
    /// Build from the outcome of a store ping.
    #[must_use]
    pub fn from_ping(database_up: bool, version: &str) -> Self {
        Self {
            status: if database_up { "healthy" } else { "degraded" }.to_string(),
            version: version.to_string(),
            database: if database_up { "up" } else { "down" }.to_string(),
        }
    }
}
