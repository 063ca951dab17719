//! Repository for the `profiles` table (reads and status changes).
//!
//! Account provisioning, edits and deletion touch three tables at once and
//! live in [`AccountRepo`](super::AccountRepo).

use repairdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{Profile, ProfileListItem};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, username, full_name, role, showroom_id, language, active, \
                                  max_discount_percent, created_at, updated_at";

const LIST_COLUMNS: &str = "p.id, p.username, p.full_name, p.role, p.showroom_id, \
                            s.name AS showroom_name, p.language, p.active, \
                            p.max_discount_percent, p.created_at";

pub struct ProfileRepo;

impl ProfileRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE username = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// List profiles newest first, optionally restricted to one showroom.
    pub async fn list(
        pool: &PgPool,
        showroom_id: Option<DbId>,
    ) -> Result<Vec<ProfileListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {LIST_COLUMNS}
             FROM profiles p
             LEFT JOIN showrooms s ON s.id = p.showroom_id
             WHERE ($1::uuid IS NULL OR p.showroom_id = $1)
             ORDER BY p.created_at DESC"
        );
        sqlx::query_as::<_, ProfileListItem>(&query)
            .bind(showroom_id)
            .fetch_all(pool)
            .await
    }

    /// Set `active` on the profile and its mirror row in one transaction.
    pub async fn set_active(
        pool: &PgPool,
        id: DbId,
        active: bool,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!("UPDATE profiles SET active = $2 WHERE id = $1 RETURNING {COLUMNS}");
        let profile = sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .bind(active)
            .fetch_optional(&mut *tx)
            .await?;
        if profile.is_some() {
            sqlx::query("UPDATE users SET active = $2 WHERE id = $1")
                .bind(id)
                .bind(active)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(profile)
    }
}
