//! Repository for the `customers` table.

use repairdesk_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::customer::{Customer, CustomerInput, CustomerListItem};
use crate::models::repair::IntakeCustomer;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, full_name, phone, email, address, showroom_id, whatsapp_available, \
                        balance, created_at, updated_at";

pub struct CustomerRepo;

impl CustomerRepo {
    /// List customers by name, optionally restricted to one showroom.
    pub async fn list(
        pool: &PgPool,
        showroom_id: Option<DbId>,
    ) -> Result<Vec<CustomerListItem>, sqlx::Error> {
        sqlx::query_as::<_, CustomerListItem>(
            "SELECT c.id, c.full_name, c.phone, c.email, c.address, c.showroom_id,
                    s.name AS showroom_name, c.whatsapp_available, c.balance, c.created_at
             FROM customers c
             LEFT JOIN showrooms s ON s.id = c.showroom_id
             WHERE ($1::uuid IS NULL OR c.showroom_id = $1)
             ORDER BY c.full_name",
        )
        .bind(showroom_id)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE id = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Exact phone match within a showroom.
    pub async fn find_by_phone(
        pool: &PgPool,
        showroom_id: DbId,
        phone: &str,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM customers WHERE showroom_id = $1 AND phone = $2");
        sqlx::query_as::<_, Customer>(&query)
            .bind(showroom_id)
            .bind(phone)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        showroom_id: DbId,
        input: &CustomerInput,
    ) -> Result<Customer, sqlx::Error> {
        let query = format!(
            "INSERT INTO customers (full_name, phone, email, address, showroom_id, whatsapp_available)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(&input.full_name)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.address)
            .bind(showroom_id)
            .bind(input.whatsapp_available)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        showroom_id: DbId,
        input: &CustomerInput,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!(
            "UPDATE customers SET
                full_name = $2, phone = $3, email = $4, address = $5, showroom_id = $6,
                whatsapp_available = $7
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.address)
            .bind(showroom_id)
            .bind(input.whatsapp_available)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find the customer with this phone in the showroom or create one.
    ///
    /// An existing customer whose name differs gets name, email and address
    /// overwritten with the intake values.
    pub async fn upsert_for_intake(
        tx: &mut Transaction<'_, Postgres>,
        showroom_id: DbId,
        input: &IntakeCustomer,
    ) -> Result<DbId, sqlx::Error> {
        let existing: Option<(DbId, String)> = sqlx::query_as(
            "SELECT id, full_name FROM customers
             WHERE showroom_id = $1 AND phone = $2
             FOR UPDATE",
        )
        .bind(showroom_id)
        .bind(&input.phone)
        .fetch_optional(&mut **tx)
        .await?;

        match existing {
            Some((id, full_name)) => {
                if full_name != input.full_name {
                    sqlx::query(
                        "UPDATE customers SET full_name = $2, email = $3, address = $4
                         WHERE id = $1",
                    )
                    .bind(id)
                    .bind(&input.full_name)
                    .bind(&input.email)
                    .bind(&input.address)
                    .execute(&mut **tx)
                    .await?;
                }
                Ok(id)
            }
            None => {
                sqlx::query_scalar(
                    "INSERT INTO customers
                        (full_name, phone, email, address, showroom_id, whatsapp_available)
                     VALUES ($1, $2, $3, $4, $5, $6)
                     RETURNING id",
                )
                .bind(&input.full_name)
                .bind(&input.phone)
                .bind(&input.email)
                .bind(&input.address)
                .bind(showroom_id)
                .bind(input.whatsapp_available)
                .fetch_one(&mut **tx)
                .await
            }
        }
    }
}
