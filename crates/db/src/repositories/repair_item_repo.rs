//! Repository for the `repair_items` table.

use repairdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::catalog::{RepairItem, RepairItemInput, RepairItemListItem};

const COLUMNS: &str = "id, category_id, name_en, name_fr, description_en, description_fr, \
                        default_price, is_active, created_at";

pub struct RepairItemRepo;

impl RepairItemRepo {
    /// Items with their category names, optionally filtered by category.
    pub async fn list(
        pool: &PgPool,
        category_id: Option<DbId>,
    ) -> Result<Vec<RepairItemListItem>, sqlx::Error> {
        sqlx::query_as::<_, RepairItemListItem>(
            "SELECT i.id, i.category_id, c.name_en AS category_name_en,
                    c.name_fr AS category_name_fr, i.name_en, i.name_fr, i.description_en,
                    i.description_fr, i.default_price, i.is_active, i.created_at
             FROM repair_items i
             JOIN repair_categories c ON c.id = i.category_id
             WHERE ($1::uuid IS NULL OR i.category_id = $1)
             ORDER BY c.name_en, i.name_en",
        )
        .bind(category_id)
        .fetch_all(pool)
        .await
    }

    pub async fn create(pool: &PgPool, input: &RepairItemInput) -> Result<RepairItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO repair_items
                (category_id, name_en, name_fr, description_en, description_fr, default_price,
                 is_active)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RepairItem>(&query)
            .bind(input.category_id)
            .bind(&input.name_en)
            .bind(&input.name_fr)
            .bind(&input.description_en)
            .bind(&input.description_fr)
            .bind(input.default_price)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &RepairItemInput,
    ) -> Result<Option<RepairItem>, sqlx::Error> {
        let query = format!(
            "UPDATE repair_items SET
                category_id = $2, name_en = $3, name_fr = $4, description_en = $5,
                description_fr = $6, default_price = $7, is_active = $8
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RepairItem>(&query)
            .bind(id)
            .bind(input.category_id)
            .bind(&input.name_en)
            .bind(&input.name_fr)
            .bind(&input.description_en)
            .bind(&input.description_fr)
            .bind(input.default_price)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM repair_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
