//! Repository for the `showrooms` table.

use repairdesk_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::showroom::{Showroom, ShowroomInput, ShowroomSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, address, phone, whatsapp_number, currency_code, logo_url, \
                        balance, markup_percent, default_tax_percent, tax_stamp_amount, \
                        legal_line_1, legal_line_2, legal_line_3, receipt_footer_text, \
                        receipt_terms, notes, active, last_serial_number, current_serial_year, \
                        created_at, updated_at";

const SUMMARY_COLUMNS: &str = "id, name, active, currency_code, logo_url";

/// Default currency when none is supplied.
pub const DEFAULT_CURRENCY: &str = "TND";

pub struct ShowroomRepo;

impl ShowroomRepo {
    /// Insert a showroom. The repair counter starts at `(0, NULL)`.
    pub async fn create(pool: &PgPool, input: &ShowroomInput) -> Result<Showroom, sqlx::Error> {
        let query = format!(
            "INSERT INTO showrooms
                (name, address, phone, whatsapp_number, currency_code, balance, markup_percent,
                 default_tax_percent, tax_stamp_amount, legal_line_1, legal_line_2, legal_line_3,
                 receipt_footer_text, receipt_terms, notes, active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Showroom>(&query)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.phone)
            .bind(&input.whatsapp_number)
            .bind(input.currency_code.as_deref().unwrap_or(DEFAULT_CURRENCY))
            .bind(input.balance.unwrap_or(0.0))
            .bind(input.markup_percent)
            .bind(input.default_tax_percent)
            .bind(input.tax_stamp_amount)
            .bind(&input.legal_line_1)
            .bind(&input.legal_line_2)
            .bind(&input.legal_line_3)
            .bind(&input.receipt_footer_text)
            .bind(&input.receipt_terms)
            .bind(&input.notes)
            .bind(input.active.unwrap_or(true))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Showroom>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM showrooms WHERE id = $1");
        sqlx::query_as::<_, Showroom>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_summary(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ShowroomSummary>, sqlx::Error> {
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM showrooms WHERE id = $1");
        sqlx::query_as::<_, ShowroomSummary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List showrooms by name. `Some(id)` restricts the result to that showroom.
    pub async fn list(pool: &PgPool, only: Option<DbId>) -> Result<Vec<Showroom>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM showrooms
             WHERE ($1::uuid IS NULL OR id = $1)
             ORDER BY name"
        );
        sqlx::query_as::<_, Showroom>(&query)
            .bind(only)
            .fetch_all(pool)
            .await
    }

    /// Replace the editable fields. `balance` and `active` are kept when `None`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ShowroomInput,
    ) -> Result<Option<Showroom>, sqlx::Error> {
        let query = format!(
            "UPDATE showrooms SET
                name = $2, address = $3, phone = $4, whatsapp_number = $5,
                currency_code = COALESCE($6, currency_code),
                balance = COALESCE($7, balance), markup_percent = $8, default_tax_percent = $9,
                tax_stamp_amount = $10, legal_line_1 = $11, legal_line_2 = $12,
                legal_line_3 = $13, receipt_footer_text = $14, receipt_terms = $15,
                notes = $16, active = COALESCE($17, active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Showroom>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.phone)
            .bind(&input.whatsapp_number)
            .bind(&input.currency_code)
            .bind(input.balance)
            .bind(input.markup_percent)
            .bind(input.default_tax_percent)
            .bind(input.tax_stamp_amount)
            .bind(&input.legal_line_1)
            .bind(&input.legal_line_2)
            .bind(&input.legal_line_3)
            .bind(&input.receipt_footer_text)
            .bind(&input.receipt_terms)
            .bind(&input.notes)
            .bind(input.active)
            .fetch_optional(pool)
            .await
    }

    pub async fn toggle_active(pool: &PgPool, id: DbId) -> Result<Option<Showroom>, sqlx::Error> {
        let query = format!(
            "UPDATE showrooms SET active = NOT active WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Showroom>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn set_logo_url(
        pool: &PgPool,
        id: DbId,
        logo_url: Option<&str>,
    ) -> Result<Option<Showroom>, sqlx::Error> {
        let query = format!("UPDATE showrooms SET logo_url = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Showroom>(&query)
            .bind(id)
            .bind(logo_url)
            .fetch_optional(pool)
            .await
    }

    /// `(id, logo_url)` of every showroom that has a logo.
    pub async fn list_logo_urls(pool: &PgPool) -> Result<Vec<(DbId, String)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT id, logo_url FROM showrooms WHERE logo_url IS NOT NULL ORDER BY name",
        )
        .fetch_all(pool)
        .await
    }

    /// Advance the repair counter for `year` and return the new sequence.
    ///
    /// The counter restarts at 1 when the stored year differs. The row lock
    /// taken by the UPDATE serializes concurrent intakes on one showroom until
    /// the surrounding transaction ends. Returns `None` for an unknown showroom.
    pub async fn next_repair_sequence(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        year: i32,
    ) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE showrooms SET
                last_serial_number = CASE
                    WHEN current_serial_year = $2 THEN last_serial_number + 1
                    ELSE 1
                END,
                current_serial_year = $2
             WHERE id = $1
             RETURNING last_serial_number",
        )
        .bind(id)
        .bind(year)
        .fetch_optional(&mut **tx)
        .await
    }
}
