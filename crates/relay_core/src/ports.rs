//! crates/relay_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! request orchestration to be independent of the concrete filesystem,
//! database and HTTP implementations.

use crate::domain::UserConfiguration;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Filesystem error: {0}")]
    Filesystem(String),
    #[error("Remote call failed: {0}")]
    RemoteCall(String),
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait DatabaseService: Send + Sync {
    /// Inserts a new configuration record.
    ///
    /// Fails with `PortError::ConstraintViolation` when `api_key` is taken;
    /// the existing record is left unmodified.
    async fn save_user_configuration(&self, api_key: &str, settings: &Value) -> PortResult<()>;

    /// Returns the record stored under `api_key`, if any.
    async fn find_user_configuration(&self, api_key: &str)
        -> PortResult<Option<UserConfiguration>>;
}

#[async_trait]
pub trait SessionService: Send + Sync {
    /// Creates the session directory if it does not exist yet.
    async fn ensure_session_folder(&self, name: &str) -> PortResult<()>;

    /// Returns the absolute path of the session directory without touching the disk.
    fn resolve_session_folder(&self, name: &str) -> PortResult<PathBuf>;
}

#[async_trait]
pub trait FileSystemService: Send + Sync {
    /// Overwrites the file at `path` with `content`.
    async fn write_text(&self, path: &Path, content: &str) -> PortResult<()>;

    /// Reads the whole file at `path` as UTF-8 text.
    async fn read_text(&self, path: &Path) -> PortResult<String>;
}

#[async_trait]
pub trait ExternalApiService: Send + Sync {
    /// POSTs `payload` as JSON to `endpoint` and returns the parsed JSON reply.
    async fn post_json(
        &self,
        endpoint: &str,
        payload: &Value,
        headers: &HashMap<String, String>,
    ) -> PortResult<Value>;
}
