//! Device approval records.

use repairdesk_core::device_gate::DeviceState;
use repairdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `device_auth` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DeviceAuth {
    pub id: DbId,
    /// Device fingerprint.
    pub cpu_id: String,
    pub device_label: Option<String>,
    pub mac_address: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub showroom_id: DbId,
    pub requesting_user_id: DbId,
    pub requester_user_id: Option<DbId>,
    pub active: bool,
    pub awaiting_approval: bool,
    pub first_seen_at: Timestamp,
    pub approved_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DeviceAuth {
    pub fn state(&self) -> DeviceState {
        DeviceState {
            active: self.active,
            awaiting_approval: self.awaiting_approval,
        }
    }
}

/// Device record joined with showroom and requester names, for the admin list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DeviceAuthListItem {
    pub id: DbId,
    pub cpu_id: String,
    pub device_label: Option<String>,
    pub mac_address: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub showroom_id: DbId,
    pub showroom_name: Option<String>,
    pub requesting_user_id: DbId,
    pub requester_full_name: Option<String>,
    pub requester_username: Option<String>,
    pub active: bool,
    pub awaiting_approval: bool,
    pub first_seen_at: Timestamp,
    pub approved_at: Option<Timestamp>,
}

/// Registration of a device seen at login for the first time.
#[derive(Debug)]
pub struct RegisterDevice {
    pub cpu_id: String,
    pub device_label: String,
    pub mac_address: String,
    pub showroom_id: DbId,
    pub requesting_user_id: DbId,
}

/// Admin edits to a device record.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDeviceAuth {
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub device_label: Option<String>,
}
