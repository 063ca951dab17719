//! Login identity model.

use repairdesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from `auth_identities`.
///
/// Contains the password hash -- NEVER serialize this to API responses.
#[derive(Debug, Clone, FromRow)]
pub struct AuthIdentity {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub last_sign_in_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
