//! Dashboard counters.

use serde::Serialize;
use sqlx::FromRow;

/// Headline counts shown on the admin dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DashboardStats {
    pub users: i64,
    pub showrooms: i64,
    pub active_devices: i64,
}
