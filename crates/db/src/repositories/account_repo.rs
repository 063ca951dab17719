//! Staff account lifecycle across `auth_identities`, `profiles` and the
//! legacy `users` mirror.
//!
//! Every method here writes all three tables in a single transaction, so an
//! account is either fully present or fully absent.

use repairdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{NewAccount, Profile, UpdateAccount};
use crate::repositories::profile_repo::COLUMNS;

/// Placeholder stored in the mirror's password column; the real hash lives in
/// `auth_identities`.
pub const MIRROR_PASSWORD_MARKER: &str = "AUTH_MANAGED";

pub struct AccountRepo;

impl AccountRepo {
    /// Provision identity, profile and mirror row.
    pub async fn create(pool: &PgPool, input: &NewAccount) -> Result<Profile, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO auth_identities (email, password_hash) VALUES ($1, $2) RETURNING id",
        )
        .bind(&input.email)
        .bind(&input.password_hash)
        .fetch_one(&mut *tx)
        .await?;

        let query = format!(
            "INSERT INTO profiles
                (id, username, full_name, role, showroom_id, language, active, max_discount_percent)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let profile = sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.full_name)
            .bind(&input.role)
            .bind(input.showroom_id)
            .bind(&input.language)
            .bind(input.active)
            .bind(input.max_discount_percent)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO users
                (id, username, password_hash, full_name, role, showroom_id, language, active,
                 max_discount_percent)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(profile.id)
        .bind(&profile.username)
        .bind(MIRROR_PASSWORD_MARKER)
        .bind(&profile.full_name)
        .bind(&profile.role)
        .bind(profile.showroom_id)
        .bind(&profile.language)
        .bind(profile.active)
        .bind(profile.max_discount_percent)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(profile)
    }

    /// Apply the non-`None` fields of `input` to profile, mirror and identity.
    ///
    /// An admin never keeps a showroom, so promoting to admin clears it.
    /// Returns `None` if the profile does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAccount,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE profiles SET
                full_name = COALESCE($2, full_name),
                role = COALESCE($3, role),
                active = COALESCE($4, active),
                language = COALESCE($5, language),
                max_discount_percent = COALESCE($6, max_discount_percent),
                showroom_id = CASE
                    WHEN COALESCE($3, role) = 'admin' THEN NULL
                    ELSE COALESCE($7, showroom_id)
                END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let Some(profile) = sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.role)
            .bind(input.active)
            .bind(&input.language)
            .bind(input.max_discount_percent)
            .bind(input.showroom_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        sqlx::query(
            "UPDATE users SET
                full_name = $2, role = $3, showroom_id = $4, language = $5, active = $6,
                max_discount_percent = $7
             WHERE id = $1",
        )
        .bind(profile.id)
        .bind(&profile.full_name)
        .bind(&profile.role)
        .bind(profile.showroom_id)
        .bind(&profile.language)
        .bind(profile.active)
        .bind(profile.max_discount_percent)
        .execute(&mut *tx)
        .await?;

        if let Some(hash) = &input.password_hash {
            sqlx::query("UPDATE auth_identities SET password_hash = $2 WHERE id = $1")
                .bind(id)
                .bind(hash)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(Some(profile))
    }

    /// Remove sessions, mirror row, profile and identity.
    ///
    /// Returns `false` if the identity did not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM user_sessions WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM auth_identities WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
