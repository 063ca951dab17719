//! Repository for the `repairs` table and the intake workflow.

use repairdesk_core::repair_ref::{format_repair_ref, PHASE_INTAKE, STATUS_RECEIVED};
use repairdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::device::CreateDevice;
use crate::models::repair::{IntakeResult, NewIntake, Repair, RepairListItem};
use crate::repositories::{CustomerRepo, DeviceRepo, ShowroomRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, repair_ref, repair_seq, repair_year, customer_id, device_id, \
                        showroom_id, prepared_by, reported_problem, intake_condition, \
                        accessories_received, priority, password_provided, \
                        tracking_password_hash, status, repair_phase, received_at, \
                        created_at, updated_at";

pub struct RepairRepo;

impl RepairRepo {
    /// Record a repair intake.
    ///
    /// Counter increment, customer upsert, device insert and repair insert
    /// share one transaction, so a failure anywhere leaves no trace and does
    /// not consume a reference number. Fails with `RowNotFound` when the
    /// showroom does not exist.
    pub async fn intake(pool: &PgPool, input: &NewIntake) -> Result<IntakeResult, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let seq = ShowroomRepo::next_repair_sequence(&mut tx, input.showroom_id, input.year)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        let repair_ref = format_repair_ref(input.year, seq);

        let customer_id =
            CustomerRepo::upsert_for_intake(&mut tx, input.showroom_id, &input.customer).await?;

        let device = DeviceRepo::create(
            &mut tx,
            &CreateDevice {
                device_type_id: Some(input.device.device_type_id),
                brand_id: input.device.brand_id,
                model: input.device.model.clone(),
                serial_number: input.device.serial_number.clone(),
                customer_id,
                showroom_id: input.showroom_id,
            },
        )
        .await?;

        let query = format!(
            "INSERT INTO repairs
                (repair_ref, repair_seq, repair_year, customer_id, device_id, showroom_id,
                 prepared_by, reported_problem, intake_condition, accessories_received,
                 priority, password_provided, tracking_password_hash, status, repair_phase)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
             RETURNING {COLUMNS}"
        );
        let repair = sqlx::query_as::<_, Repair>(&query)
            .bind(&repair_ref)
            .bind(seq)
            .bind(input.year)
            .bind(customer_id)
            .bind(device.id)
            .bind(input.showroom_id)
            .bind(input.prepared_by)
            .bind(&input.reported_problem)
            .bind(&input.intake_condition)
            .bind(&input.accessories_received)
            .bind(input.priority.as_str())
            .bind(input.tracking_password_hash.is_some())
            .bind(&input.tracking_password_hash)
            .bind(STATUS_RECEIVED)
            .bind(PHASE_INTAKE)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(IntakeResult {
            repair,
            customer_id,
            device_id: device.id,
        })
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Repair>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM repairs WHERE id = $1");
        sqlx::query_as::<_, Repair>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Most recent repairs first, optionally restricted to one showroom.
    pub async fn list(
        pool: &PgPool,
        showroom_id: Option<DbId>,
    ) -> Result<Vec<RepairListItem>, sqlx::Error> {
        sqlx::query_as::<_, RepairListItem>(
            "SELECT r.id, r.repair_ref, r.showroom_id, r.customer_id,
                    c.full_name AS customer_name, c.phone AS customer_phone,
                    r.device_id, d.model AS device_model, r.prepared_by,
                    p.full_name AS prepared_by_name, r.priority, r.status, r.repair_phase,
                    r.received_at
             FROM repairs r
             JOIN customers c ON c.id = r.customer_id
             JOIN devices d ON d.id = r.device_id
             LEFT JOIN profiles p ON p.id = r.prepared_by
             WHERE ($1::uuid IS NULL OR r.showroom_id = $1)
             ORDER BY r.received_at DESC, r.repair_seq DESC",
        )
        .bind(showroom_id)
        .fetch_all(pool)
        .await
    }
}
