//! Repository for the `item_types` table.

use repairdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::catalog::{ItemType, ItemTypeInput};

const COLUMNS: &str = "id, code, label_en, label_fr, is_active, created_at";

pub struct ItemTypeRepo;

impl ItemTypeRepo {
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<ItemType>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM item_types WHERE ($1 OR is_active) ORDER BY label_en"
        );
        sqlx::query_as::<_, ItemType>(&query)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ItemType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM item_types WHERE id = $1");
        sqlx::query_as::<_, ItemType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert an item type. `input.code` must already be normalized.
    pub async fn create(pool: &PgPool, input: &ItemTypeInput) -> Result<ItemType, sqlx::Error> {
        let query = format!(
            "INSERT INTO item_types (code, label_en, label_fr, is_active)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ItemType>(&query)
            .bind(&input.code)
            .bind(&input.label_en)
            .bind(&input.label_fr)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ItemTypeInput,
    ) -> Result<Option<ItemType>, sqlx::Error> {
        let query = format!(
            "UPDATE item_types SET code = $2, label_en = $3, label_fr = $4, is_active = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ItemType>(&query)
            .bind(id)
            .bind(&input.code)
            .bind(&input.label_en)
            .bind(&input.label_fr)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM item_types WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
