//! Application state shared across all handlers.

use std::sync::Arc;

use crate::config::Config;
use crate::database::Database;
use crate::services::ProductService;

/// Application state shared across handlers.
///
/// The database is injected here once at startup and handed to the services;
/// nothing else in the crate decides which backend is used.
#[derive(Clone)]
pub struct AppState {
    /// Human-readable name of the backend, reported by `/health`
    pub database_label: String,
    /// Application configuration
    pub config: Config,
    /// Product configuration CRUD
    pub product_service: ProductService,
}

impl AppState {
    pub fn new(db: Arc<dyn Database>, database_label: impl Into<String>, config: Config) -> Self {
        Self {
            product_service: ProductService::new(db),
            database_label: database_label.into(),
            config,
        }
    }
}
