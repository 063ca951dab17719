//! Customer equipment.

use repairdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `devices` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Device {
    pub id: DbId,
    pub device_type_id: Option<DbId>,
    pub brand_id: Option<DbId>,
    pub model: String,
    pub serial_number: Option<String>,
    pub customer_id: DbId,
    pub showroom_id: DbId,
    pub created_at: Timestamp,
}

/// Device joined with item type label and brand name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DeviceDetail {
    pub id: DbId,
    pub device_type_id: Option<DbId>,
    pub item_type_code: Option<String>,
    pub item_type_label_en: Option<String>,
    pub item_type_label_fr: Option<String>,
    pub brand_id: Option<DbId>,
    pub brand_name: Option<String>,
    pub model: String,
    pub serial_number: Option<String>,
    pub customer_id: DbId,
    pub showroom_id: DbId,
    pub created_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateDevice {
    pub device_type_id: Option<DbId>,
    pub brand_id: Option<DbId>,
    pub model: String,
    pub serial_number: Option<String>,
    pub customer_id: DbId,
    pub showroom_id: DbId,
}
