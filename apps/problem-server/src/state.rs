//! Application state - shared across all handlers.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub admin_api_key: Arc<str>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        tracing::info!(
            capacity = config.catalog_capacity,
            "Application state initialized"
        );

        Self {
            catalog: Arc::new(Catalog::new(config.catalog_capacity)),
            admin_api_key: Arc::from(config.admin_api_key.as_str()),
        }
    }
}
