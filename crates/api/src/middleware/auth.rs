//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use repairdesk_core::error::CoreError;
use repairdesk_core::roles::ROLE_ADMIN;
use repairdesk_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Profile id (from `claims.sub`).
    pub user_id: DbId,
    pub role: String,
    /// `None` for admins.
    pub showroom_id: Option<DbId>,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Showroom filter to apply to a listing (`None` means every showroom).
    ///
    /// Admins may pick any showroom or none; everyone else is pinned to their
    /// own and refused if they have none.
    pub fn list_scope(&self, requested: Option<DbId>) -> Result<Option<DbId>, AppError> {
        if self.is_admin() {
            return Ok(requested);
        }
        self.showroom_id
            .map(Some)
            .ok_or_else(|| AppError::Core(CoreError::Forbidden("No showroom assigned".into())))
    }

    /// Whether the caller may act on data belonging to `showroom_id`.
    pub fn can_access_showroom(&self, showroom_id: DbId) -> bool {
        self.is_admin() || self.showroom_id == Some(showroom_id)
    }

    /// Showroom a write should target: the requested one for admins, the
    /// caller's own for everyone else. Staff naming another showroom are refused.
    pub fn target_showroom(&self, requested: Option<DbId>) -> Result<DbId, AppError> {
        if self.is_admin() {
            return requested.ok_or_else(|| {
                AppError::Core(CoreError::Validation("Showroom is required".into()))
            });
        }
        let own = self.showroom_id.ok_or_else(|| {
            AppError::Core(CoreError::Forbidden("No showroom assigned".into()))
        })?;
        match requested {
            Some(id) if id != own => Err(AppError::Core(CoreError::Forbidden(
                "You can only act within your own showroom".into(),
            ))),
            _ => Ok(own),
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
            showroom_id: claims.showroom_id,
        })
    }
}
