use crate::device_gate::LoginDenial;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Credentials were valid but the account, showroom or device may not sign in.
    #[error("Login denied: {0}")]
    LoginDenied(LoginDenial),

    #[error("Internal error: {0}")]
    Internal(String),
}
