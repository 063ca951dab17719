//! Repository for the singleton `settings` row.

use sqlx::PgPool;

use crate::models::settings::{Settings, UpdateSettings};

const COLUMNS: &str = "id, tracking_url, updated_at";

pub struct SettingsRepo;

impl SettingsRepo {
    pub async fn get(pool: &PgPool) -> Result<Settings, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM settings WHERE id = 1");
        sqlx::query_as::<_, Settings>(&query).fetch_one(pool).await
    }

    pub async fn update(pool: &PgPool, input: &UpdateSettings) -> Result<Settings, sqlx::Error> {
        let query = format!(
            "INSERT INTO settings (id, tracking_url) VALUES (1, $1)
             ON CONFLICT (id) DO UPDATE SET tracking_url = EXCLUDED.tracking_url
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Settings>(&query)
            .bind(&input.tracking_url)
            .fetch_one(pool)
            .await
    }
}
