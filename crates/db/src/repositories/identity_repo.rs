//! Repository for the `auth_identities` table.

use repairdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::identity::AuthIdentity;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, last_sign_in_at, created_at, updated_at";

/// Login identities keyed by synthetic email.
pub struct IdentityRepo;

impl IdentityRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AuthIdentity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM auth_identities WHERE id = $1");
        sqlx::query_as::<_, AuthIdentity>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<AuthIdentity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM auth_identities WHERE email = $1");
        sqlx::query_as::<_, AuthIdentity>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// All identities, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<AuthIdentity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM auth_identities ORDER BY created_at");
        sqlx::query_as::<_, AuthIdentity>(&query)
            .fetch_all(pool)
            .await
    }

    /// Replace the stored password hash. Returns `true` if the identity exists.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE auth_identities SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn record_sign_in(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE auth_identities SET last_sign_in_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
