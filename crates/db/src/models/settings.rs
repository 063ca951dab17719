//! Global settings singleton.

use repairdesk_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The single row of the `settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Settings {
    pub id: i32,
    pub tracking_url: Option<String>,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSettings {
    pub tracking_url: Option<String>,
}
