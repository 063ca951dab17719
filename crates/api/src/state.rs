use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::LogoStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: repairdesk_db::DbPool,
    /// Server configuration (JWT settings, upload limits).
    pub config: Arc<ServerConfig>,
    /// Filesystem bucket for showroom logos.
    pub logos: Arc<LogoStore>,
}

impl AppState {
    pub fn new(pool: repairdesk_db::DbPool, config: ServerConfig) -> Self {
        let logos = LogoStore::new(&config.storage_root, &config.public_base_url);
        Self {
            pool,
            config: Arc::new(config),
            logos: Arc::new(logos),
        }
    }
}
