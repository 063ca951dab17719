//! Repository for the `devices` table (customer equipment).

use repairdesk_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::device::{CreateDevice, Device, DeviceDetail};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, device_type_id, brand_id, model, serial_number, customer_id, \
                        showroom_id, created_at";

const DETAIL_SELECT: &str = "SELECT d.id, d.device_type_id, t.code AS item_type_code, \
                             t.label_en AS item_type_label_en, t.label_fr AS item_type_label_fr, \
                             d.brand_id, b.name AS brand_name, d.model, d.serial_number, \
                             d.customer_id, d.showroom_id, d.created_at \
                             FROM devices d \
                             LEFT JOIN item_types t ON t.id = d.device_type_id \
                             LEFT JOIN brands b ON b.id = d.brand_id";

pub struct DeviceRepo;

impl DeviceRepo {
    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateDevice,
    ) -> Result<Device, sqlx::Error> {
        let query = format!(
            "INSERT INTO devices
                (device_type_id, brand_id, model, serial_number, customer_id, showroom_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Device>(&query)
            .bind(input.device_type_id)
            .bind(input.brand_id)
            .bind(&input.model)
            .bind(&input.serial_number)
            .bind(input.customer_id)
            .bind(input.showroom_id)
            .fetch_one(&mut **tx)
            .await
    }

    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<DeviceDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE d.id = $1");
        sqlx::query_as::<_, DeviceDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A customer's equipment, newest first.
    pub async fn list_by_customer(
        pool: &PgPool,
        customer_id: DbId,
    ) -> Result<Vec<DeviceDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE d.customer_id = $1 ORDER BY d.created_at DESC");
        sqlx::query_as::<_, DeviceDetail>(&query)
            .bind(customer_id)
            .fetch_all(pool)
            .await
    }
}
