//! Repair tickets.

use repairdesk_core::repair_ref::Priority;
use repairdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `repairs` table.
///
/// `tracking_password_hash` is never serialized.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Repair {
    pub id: DbId,
    pub repair_ref: String,
    pub repair_seq: i32,
    pub repair_year: i32,
    pub customer_id: DbId,
    pub device_id: DbId,
    pub showroom_id: DbId,
    pub prepared_by: Option<DbId>,
    pub reported_problem: String,
    pub intake_condition: String,
    pub accessories_received: Option<String>,
    pub priority: String,
    pub password_provided: bool,
    #[serde(skip_serializing)]
    pub tracking_password_hash: Option<String>,
    pub status: String,
    pub repair_phase: String,
    pub received_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Repair list row with customer, device and staff names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RepairListItem {
    pub id: DbId,
    pub repair_ref: String,
    pub showroom_id: DbId,
    pub customer_id: DbId,
    pub customer_name: String,
    pub customer_phone: String,
    pub device_id: DbId,
    pub device_model: String,
    pub prepared_by: Option<DbId>,
    pub prepared_by_name: Option<String>,
    pub priority: String,
    pub status: String,
    pub repair_phase: String,
    pub received_at: Timestamp,
}

/// Customer part of an intake.
#[derive(Debug, Clone)]
pub struct IntakeCustomer {
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub whatsapp_available: bool,
}

/// Device part of an intake.
#[derive(Debug, Clone)]
pub struct IntakeDevice {
    pub device_type_id: DbId,
    pub brand_id: Option<DbId>,
    pub model: String,
    pub serial_number: Option<String>,
}

/// A validated intake, ready to be written in one transaction.
#[derive(Debug, Clone)]
pub struct NewIntake {
    pub showroom_id: DbId,
    pub prepared_by: DbId,
    /// Year the reference is numbered in.
    pub year: i32,
    pub customer: IntakeCustomer,
    pub device: IntakeDevice,
    pub reported_problem: String,
    pub intake_condition: String,
    pub accessories_received: Option<String>,
    pub priority: Priority,
    /// Set when tracking is enabled; `password_provided` follows from it.
    pub tracking_password_hash: Option<String>,
}

/// Ids produced by a successful intake.
#[derive(Debug, Clone, Serialize)]
pub struct IntakeResult {
    pub repair: Repair,
    pub customer_id: DbId,
    pub device_id: DbId,
}
