//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `DatabaseService` port from the `core` crate. It handles all interactions
//! with the SQLite database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use relay_core::domain::UserConfiguration;
use relay_core::ports::{DatabaseService, PortError, PortResult};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;
use tracing::{debug, info};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `DatabaseService` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: SqlitePool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter` over an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool on `url`, creating the database file if it is missing.
    ///
    /// Foreign keys are switched on for every connection so that child rows
    /// are removed together with their configuration record.
    pub async fn connect(url: &str, pool_size: u32) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .connect_with(options)
            .await?;

        info!("Connected to database: {} (pool size: {})", url, pool_size);
        Ok(Self::new(pool))
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct UserConfigurationRecord {
    id: i64,
    api_key: String,
    settings: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}
impl UserConfigurationRecord {
    fn to_domain(self) -> PortResult<UserConfiguration> {
        let settings = match self.settings {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                PortError::Unexpected(format!(
                    "Stored settings for {} are not valid JSON: {}",
                    self.api_key, e
                ))
            })?,
            None => Value::Null,
        };
        Ok(UserConfiguration {
            id: self.id,
            api_key: self.api_key,
            settings,
            created_at: DateTime::from_naive_utc_and_offset(self.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(self.updated_at, Utc),
        })
    }
}

//=========================================================================================
// `DatabaseService` Trait Implementation
//=========================================================================================

#[async_trait]
impl DatabaseService for DbAdapter {
    async fn save_user_configuration(&self, api_key: &str, settings: &Value) -> PortResult<()> {
        let settings_text = match settings {
            Value::Null => None,
            other => Some(other.to_string()),
        };

        sqlx::query("INSERT INTO user_configuration (api_key, settings) VALUES (?, ?)")
            .bind(api_key)
            .bind(settings_text)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    PortError::ConstraintViolation(format!(
                        "User configuration {} already exists",
                        api_key
                    ))
                }
                _ => PortError::Unexpected(e.to_string()),
            })?;

        debug!("Saved user configuration {}", api_key);
        Ok(())
    }

    async fn find_user_configuration(
        &self,
        api_key: &str,
    ) -> PortResult<Option<UserConfiguration>> {
        let record = sqlx::query_as::<_, UserConfigurationRecord>(
            "SELECT id, api_key, settings, created_at, updated_at FROM user_configuration WHERE api_key = ? LIMIT 1",
        )
        .bind(api_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        record.map(UserConfigurationRecord::to_domain).transpose()
    }
}
