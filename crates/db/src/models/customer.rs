//! Customer model and DTOs.

use repairdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `customers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Customer {
    pub id: DbId,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub showroom_id: DbId,
    pub whatsapp_available: bool,
    pub balance: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Customer joined with its showroom name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CustomerListItem {
    pub id: DbId,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub showroom_id: DbId,
    pub showroom_name: Option<String>,
    pub whatsapp_available: bool,
    pub balance: f64,
    pub created_at: Timestamp,
}

/// Fields for creating or replacing a customer.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerInput {
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub showroom_id: Option<DbId>,
    #[serde(default = "default_whatsapp")]
    pub whatsapp_available: bool,
}

fn default_whatsapp() -> bool {
    true
}
