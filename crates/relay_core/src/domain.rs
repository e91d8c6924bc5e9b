//! crates/relay_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database row layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A persisted key/settings pair, identified by its API key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserConfiguration {
    pub id: i64,
    pub api_key: String,
    /// Arbitrary JSON settings; `Value::Null` when the column is empty.
    pub settings: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
