//! Repository for the `repair_categories` table.

use repairdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::catalog::{RepairCategory, RepairCategoryInput, RepairCategoryWithCount};

const COLUMNS: &str =
    "id, name_en, name_fr, description_en, description_fr, is_active, created_at";

pub struct RepairCategoryRepo;

impl RepairCategoryRepo {
    /// Categories by English name, each with the number of items it holds.
    pub async fn list_with_counts(
        pool: &PgPool,
    ) -> Result<Vec<RepairCategoryWithCount>, sqlx::Error> {
        sqlx::query_as::<_, RepairCategoryWithCount>(
            "SELECT c.id, c.name_en, c.name_fr, c.description_en, c.description_fr,
                    c.is_active, c.created_at, COUNT(i.id) AS item_count
             FROM repair_categories c
             LEFT JOIN repair_items i ON i.category_id = c.id
             GROUP BY c.id
             ORDER BY c.name_en",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn create(
        pool: &PgPool,
        input: &RepairCategoryInput,
    ) -> Result<RepairCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO repair_categories
                (name_en, name_fr, description_en, description_fr, is_active)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RepairCategory>(&query)
            .bind(&input.name_en)
            .bind(&input.name_fr)
            .bind(&input.description_en)
            .bind(&input.description_fr)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &RepairCategoryInput,
    ) -> Result<Option<RepairCategory>, sqlx::Error> {
        let query = format!(
            "UPDATE repair_categories SET
                name_en = $2, name_fr = $3, description_en = $4, description_fr = $5,
                is_active = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RepairCategory>(&query)
            .bind(id)
            .bind(&input.name_en)
            .bind(&input.name_fr)
            .bind(&input.description_en)
            .bind(&input.description_fr)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Fails with a foreign key violation while items still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM repair_categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
