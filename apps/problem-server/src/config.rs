//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Maximum number of items the catalog accepts.
    pub catalog_capacity: usize,
    /// Key required by destructive catalog routes.
    pub admin_api_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            catalog_capacity: 100,
            admin_api_key: "change-me".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            catalog_capacity: env::var("CATALOG_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.catalog_capacity),
            admin_api_key: env::var("ADMIN_API_KEY").unwrap_or(defaults.admin_api_key),
        }
    }
}
