//! Repository for the `brands` table.

use repairdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::catalog::{Brand, BrandInput};

const COLUMNS: &str = "id, name, is_active, created_at";

pub struct BrandRepo;

impl BrandRepo {
    /// Brands by name. Inactive ones are included only on request.
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Brand>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM brands WHERE ($1 OR is_active) ORDER BY name"
        );
        sqlx::query_as::<_, Brand>(&query)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &BrandInput) -> Result<Brand, sqlx::Error> {
        let query =
            format!("INSERT INTO brands (name, is_active) VALUES ($1, $2) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Brand>(&query)
            .bind(&input.name)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Insert an active brand, or return the existing row with that name.
    pub async fn quick_add(pool: &PgPool, name: &str) -> Result<Brand, sqlx::Error> {
        let query = format!(
            "INSERT INTO brands (name, is_active) VALUES ($1, true)
             ON CONFLICT ON CONSTRAINT uq_brands_name DO UPDATE SET name = brands.name
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Brand>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &BrandInput,
    ) -> Result<Option<Brand>, sqlx::Error> {
        let query = format!(
            "UPDATE brands SET name = $2, is_active = $3 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Brand>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM brands WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
