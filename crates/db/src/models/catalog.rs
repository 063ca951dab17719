//! Reference catalogs: brands, item types, repair categories and repair items.

use repairdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Brand {
    pub id: DbId,
    pub name: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct BrandInput {
    pub name: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// A kind of equipment (phone, laptop, ...). `code` is the stable key.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ItemType {
    pub id: DbId,
    pub code: String,
    pub label_en: String,
    pub label_fr: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct ItemTypeInput {
    pub code: String,
    pub label_en: String,
    pub label_fr: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RepairCategory {
    pub id: DbId,
    pub name_en: String,
    pub name_fr: String,
    pub description_en: Option<String>,
    pub description_fr: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// Category row with the number of repair items filed under it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RepairCategoryWithCount {
    pub id: DbId,
    pub name_en: String,
    pub name_fr: String,
    pub description_en: Option<String>,
    pub description_fr: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub item_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct RepairCategoryInput {
    pub name_en: String,
    pub name_fr: String,
    pub description_en: Option<String>,
    pub description_fr: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RepairItem {
    pub id: DbId,
    pub category_id: DbId,
    pub name_en: String,
    pub name_fr: String,
    pub description_en: Option<String>,
    pub description_fr: Option<String>,
    pub default_price: f64,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// Repair item joined with its category names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RepairItemListItem {
    pub id: DbId,
    pub category_id: DbId,
    pub category_name_en: String,
    pub category_name_fr: String,
    pub name_en: String,
    pub name_fr: String,
    pub description_en: Option<String>,
    pub description_fr: Option<String>,
    pub default_price: f64,
    pub is_active: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct RepairItemInput {
    pub category_id: DbId,
    pub name_en: String,
    pub name_fr: String,
    pub description_en: Option<String>,
    pub description_fr: Option<String>,
    #[serde(default)]
    pub default_price: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}
