//! Showroom (branch) model and DTOs.

use repairdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `showrooms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Showroom {
    pub id: DbId,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub whatsapp_number: Option<String>,
    pub currency_code: String,
    pub logo_url: Option<String>,
    pub balance: f64,
    pub markup_percent: f64,
    pub default_tax_percent: f64,
    pub tax_stamp_amount: f64,
    pub legal_line_1: Option<String>,
    pub legal_line_2: Option<String>,
    pub legal_line_3: Option<String>,
    pub receipt_footer_text: Option<String>,
    pub receipt_terms: Option<String>,
    pub notes: Option<String>,
    pub active: bool,
    pub last_serial_number: i32,
    pub current_serial_year: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The subset of a showroom embedded in session and summary payloads.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShowroomSummary {
    pub id: DbId,
    pub name: String,
    pub active: bool,
    pub currency_code: String,
    pub logo_url: Option<String>,
}

/// Editable showroom fields.
///
/// Used for both create and full update. Text fields are normalized by the
/// caller (trimmed, blanks become `None`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShowroomInput {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub whatsapp_number: Option<String>,
    pub currency_code: Option<String>,
    /// Opening balance on create. On update only admins may change it and
    /// `None` keeps the stored value.
    pub balance: Option<f64>,
    #[serde(default)]
    pub markup_percent: f64,
    #[serde(default)]
    pub default_tax_percent: f64,
    #[serde(default)]
    pub tax_stamp_amount: f64,
    pub legal_line_1: Option<String>,
    pub legal_line_2: Option<String>,
    pub legal_line_3: Option<String>,
    pub receipt_footer_text: Option<String>,
    pub receipt_terms: Option<String>,
    pub notes: Option<String>,
    /// Only honoured for admins; the handler clears it otherwise.
    pub active: Option<bool>,
}
