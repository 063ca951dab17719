//! Repository for the `device_auth` table.

use repairdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::device_auth::{
    DeviceAuth, DeviceAuthListItem, RegisterDevice, UpdateDeviceAuth,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, cpu_id, device_label, mac_address, manufacturer, model, showroom_id, \
                        requesting_user_id, requester_user_id, active, awaiting_approval, \
                        first_seen_at, approved_at, created_at, updated_at";

const LIST_COLUMNS: &str = "d.id, d.cpu_id, d.device_label, d.mac_address, d.manufacturer, \
                            d.model, d.showroom_id, s.name AS showroom_name, \
                            d.requesting_user_id, p.full_name AS requester_full_name, \
                            p.username AS requester_username, d.active, d.awaiting_approval, \
                            d.first_seen_at, d.approved_at";

pub struct DeviceAuthRepo;

impl DeviceAuthRepo {
    /// Look up the record for a fingerprint used by one user in one showroom.
    pub async fn find_by_fingerprint(
        pool: &PgPool,
        cpu_id: &str,
        showroom_id: DbId,
        user_id: DbId,
    ) -> Result<Option<DeviceAuth>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM device_auth
             WHERE cpu_id = $1 AND showroom_id = $2 AND requesting_user_id = $3"
        );
        sqlx::query_as::<_, DeviceAuth>(&query)
            .bind(cpu_id)
            .bind(showroom_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Return the existing record for this fingerprint, registering it as
    /// pending approval if it has never been seen.
    ///
    /// Concurrent first logins converge on a single row.
    pub async fn find_or_register(
        pool: &PgPool,
        input: &RegisterDevice,
    ) -> Result<DeviceAuth, sqlx::Error> {
        sqlx::query(
            "INSERT INTO device_auth
                (cpu_id, device_label, mac_address, showroom_id, requesting_user_id,
                 requester_user_id, active, awaiting_approval)
             VALUES ($1, $2, $3, $4, $5, $5, false, true)
             ON CONFLICT ON CONSTRAINT uq_device_auth_fingerprint DO NOTHING",
        )
        .bind(&input.cpu_id)
        .bind(&input.device_label)
        .bind(&input.mac_address)
        .bind(input.showroom_id)
        .bind(input.requesting_user_id)
        .execute(pool)
        .await?;

        Self::find_by_fingerprint(
            pool,
            &input.cpu_id,
            input.showroom_id,
            input.requesting_user_id,
        )
        .await?
        .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<DeviceAuth>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM device_auth WHERE id = $1");
        sqlx::query_as::<_, DeviceAuth>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All records, most recently seen first.
    pub async fn list(pool: &PgPool) -> Result<Vec<DeviceAuthListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {LIST_COLUMNS}
             FROM device_auth d
             LEFT JOIN showrooms s ON s.id = d.showroom_id
             LEFT JOIN profiles p ON p.id = d.requesting_user_id
             ORDER BY d.first_seen_at DESC"
        );
        sqlx::query_as::<_, DeviceAuthListItem>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn approve(pool: &PgPool, id: DbId) -> Result<Option<DeviceAuth>, sqlx::Error> {
        let query = format!(
            "UPDATE device_auth
             SET active = true, awaiting_approval = false, approved_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DeviceAuth>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Approve `id` after deactivating every other active device of its showroom.
    pub async fn replace(pool: &PgPool, id: DbId) -> Result<Option<DeviceAuth>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let showroom_id: Option<DbId> =
            sqlx::query_scalar("SELECT showroom_id FROM device_auth WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(showroom_id) = showroom_id else {
            return Ok(None);
        };

        sqlx::query(
            "UPDATE device_auth SET active = false
             WHERE showroom_id = $1 AND id <> $2 AND active = true",
        )
        .bind(showroom_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "UPDATE device_auth
             SET active = true, awaiting_approval = false, approved_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let device = sqlx::query_as::<_, DeviceAuth>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(device))
    }

    /// Flip `active` on a device that is not awaiting approval.
    ///
    /// Returns `None` if the row is missing or still pending.
    pub async fn toggle_active(pool: &PgPool, id: DbId) -> Result<Option<DeviceAuth>, sqlx::Error> {
        let query = format!(
            "UPDATE device_auth SET active = NOT active
             WHERE id = $1 AND awaiting_approval = false
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DeviceAuth>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDeviceAuth,
    ) -> Result<Option<DeviceAuth>, sqlx::Error> {
        let query = format!(
            "UPDATE device_auth SET
                manufacturer = COALESCE($2, manufacturer),
                model = COALESCE($3, model),
                device_label = COALESCE($4, device_label)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DeviceAuth>(&query)
            .bind(id)
            .bind(&input.manufacturer)
            .bind(&input.model)
            .bind(&input.device_label)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM device_auth WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
