//! Staff profile model and DTOs.
//!
//! A profile shares its id with the login identity. The legacy `users` table
//! mirrors the same columns and is written alongside every profile change.

use repairdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub username: String,
    pub full_name: String,
    pub role: String,
    pub showroom_id: Option<DbId>,
    pub language: String,
    pub active: bool,
    pub max_discount_percent: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Profile joined with its showroom name, for the user administration list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProfileListItem {
    pub id: DbId,
    pub username: String,
    pub full_name: String,
    pub role: String,
    pub showroom_id: Option<DbId>,
    pub showroom_name: Option<String>,
    pub language: String,
    pub active: bool,
    pub max_discount_percent: f64,
    pub created_at: Timestamp,
}

/// Everything needed to provision a staff account.
///
/// Built by the API layer after validation; the password is already hashed.
#[derive(Debug)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: String,
    pub showroom_id: Option<DbId>,
    pub language: String,
    pub active: bool,
    pub max_discount_percent: f64,
}

/// Changes to an existing account. `None` leaves the column untouched.
#[derive(Debug, Default)]
pub struct UpdateAccount {
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub active: Option<bool>,
    pub language: Option<String>,
    pub max_discount_percent: Option<f64>,
    /// Ignored when the resulting role is admin.
    pub showroom_id: Option<DbId>,
    /// Already hashed; applied to the login identity.
    pub password_hash: Option<String>,
}
