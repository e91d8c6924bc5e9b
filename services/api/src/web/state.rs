//! services/api/src/web/state.rs
//!
//! Defines the application's shared state and the startup sequence that
//! builds it (configuration → database and schema → adapters → ready).

use crate::adapters::{DbAdapter, LocalFileAdapter, LocalSessionAdapter, ReqwestApiAdapter};
use crate::config::Config;
use crate::error::ApiError;
use relay_core::ports::{DatabaseService, ExternalApiService, FileSystemService, SessionService};
use std::sync::Arc;
use tracing::info;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn DatabaseService>,
    pub config: Arc<Config>,
    pub sessions: Arc<dyn SessionService>,
    pub files: Arc<dyn FileSystemService>,
    pub external_api: Arc<dyn ExternalApiService>,
}

impl AppState {
    /// Connects to the database, applies migrations and wires the default adapters.
    pub async fn initialize(config: Config) -> Result<Arc<Self>, ApiError> {
        info!("Connecting to database...");
        let db_adapter = DbAdapter::connect(&config.database_url, config.database_pool_size).await?;
        info!("Running database migrations...");
        db_adapter.run_migrations().await?;
        info!("Database migrations complete.");

        let external_api = ReqwestApiAdapter::new(config.external_api_timeout)?;

        Ok(Arc::new(Self {
            db: Arc::new(db_adapter),
            sessions: Arc::new(LocalSessionAdapter::new(config.sessions_root.clone())),
            files: Arc::new(LocalFileAdapter::new()),
            external_api: Arc::new(external_api),
            config: Arc::new(config),
        }))
    }
}
