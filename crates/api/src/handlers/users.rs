//! Handlers for the `/users` resource (staff administration).
//!
//! Admins manage everyone. Managers manage the staff of their own showroom
//! and can neither create nor promote admins.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use repairdesk_core::error::CoreError;
use repairdesk_core::roles::{validate_role, ROLE_ADMIN};
use repairdesk_core::types::DbId;
use repairdesk_core::validation::{
    blank_to_none, clamp_discount, normalize_username, require_text, synthetic_email,
    validate_language, validate_password, MIN_PASSWORD_LENGTH,
};
use repairdesk_db::models::profile::{NewAccount, Profile, ProfileListItem, UpdateAccount};
use repairdesk_db::repositories::{AccountRepo, ProfileRepo, SessionRepo};
use serde::Deserialize;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireManager};
use crate::response::DataResponse;
use crate::state::AppState;

const DEFAULT_LANGUAGE: &str = "EN";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub full_name: String,
    pub password: String,
    pub role: String,
    pub showroom_id: Option<DbId>,
    pub language: Option<String>,
    pub active: Option<bool>,
    pub max_discount_percent: Option<f64>,
}

/// Request body for `PUT /users/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub active: Option<bool>,
    pub language: Option<String>,
    pub max_discount_percent: Option<f64>,
    /// Ignored unless at least six characters long.
    pub password: Option<String>,
    pub showroom_id: Option<DbId>,
}

/// Request body for `POST /users/{id}/toggle-active`.
#[derive(Debug, Deserialize)]
pub struct ToggleActiveRequest {
    pub active: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireManager(caller): RequireManager,
) -> AppResult<Json<DataResponse<Vec<ProfileListItem>>>> {
    let scope = caller.list_scope(None)?;
    let users = ProfileRepo::list(&state.pool, scope).await?;
    Ok(Json(DataResponse { data: users }))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireManager(caller): RequireManager,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Profile>>> {
    let profile = load_scoped_profile(&state, &caller, id).await?;
    Ok(Json(DataResponse { data: profile }))
}

/// POST /api/v1/users
///
/// Provision identity, profile and mirror row for a new staff member.
pub async fn create_user(
    State(state): State<AppState>,
    RequireManager(caller): RequireManager,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Profile>>)> {
    validate_role(&input.role)?;
    if input.role == ROLE_ADMIN && !caller.is_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Managers cannot create admins".into(),
        )));
    }

    let username = normalize_username(&input.username)?;
    let full_name = require_text("Full name", &input.full_name)?;
    validate_password(&input.password)?;
    let language = input
        .language
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
    validate_language(&language)?;

    let showroom_id = if input.role == ROLE_ADMIN {
        None
    } else {
        Some(caller.target_showroom(input.showroom_id)?)
    };

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let account = NewAccount {
        email: synthetic_email(&username),
        username,
        password_hash,
        full_name,
        role: input.role,
        showroom_id,
        language,
        active: input.active.unwrap_or(true),
        max_discount_percent: clamp_discount(input.max_discount_percent.unwrap_or(0.0)),
    };
    let profile = AccountRepo::create(&state.pool, &account).await?;

    tracing::info!(
        user_id = %profile.id,
        role = %profile.role,
        showroom_id = ?profile.showroom_id,
        created_by = %caller.user_id,
        "User created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: profile })))
}

/// PUT /api/v1/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    RequireManager(caller): RequireManager,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<DataResponse<Profile>>> {
    let current = load_scoped_profile(&state, &caller, id).await?;

    if let Some(role) = &input.role {
        validate_role(role)?;
        if role == ROLE_ADMIN && !caller.is_admin() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Managers cannot grant the admin role".into(),
            )));
        }
    }
    if id == caller.user_id && input.active == Some(false) {
        return Err(self_deactivation());
    }
    if !caller.is_admin() && input.showroom_id.is_some_and(|s| Some(s) != caller.showroom_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Managers cannot move users to another showroom".into(),
        )));
    }

    let resulting_role = input.role.as_deref().unwrap_or(&current.role);
    if resulting_role != ROLE_ADMIN && current.showroom_id.is_none() && input.showroom_id.is_none()
    {
        return Err(AppError::Core(CoreError::Validation(
            "Showroom is required".into(),
        )));
    }

    if let Some(language) = &input.language {
        validate_language(language)?;
    }
    let full_name = match input.full_name {
        Some(name) => Some(require_text("Full name", &name)?),
        None => None,
    };

    let password_hash = match blank_to_none(input.password)
        .filter(|p| p.chars().count() >= MIN_PASSWORD_LENGTH)
    {
        Some(password) => Some(
            hash_password(&password)
                .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?,
        ),
        None => None,
    };

    let update = UpdateAccount {
        full_name,
        role: input.role,
        active: input.active,
        language: input.language,
        max_discount_percent: input.max_discount_percent.map(clamp_discount),
        showroom_id: input.showroom_id,
        password_hash,
    };
    let profile = AccountRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    if !profile.active {
        SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    }

    tracing::info!(user_id = %id, updated_by = %caller.user_id, "User updated");
    Ok(Json(DataResponse { data: profile }))
}

/// POST /api/v1/users/{id}/toggle-active
///
/// Deactivating a user also revokes their sessions.
pub async fn toggle_active(
    State(state): State<AppState>,
    RequireManager(caller): RequireManager,
    Path(id): Path<DbId>,
    Json(input): Json<ToggleActiveRequest>,
) -> AppResult<Json<DataResponse<Profile>>> {
    if id == caller.user_id && !input.active {
        return Err(self_deactivation());
    }
    load_scoped_profile(&state, &caller, id).await?;

    let profile = ProfileRepo::set_active(&state.pool, id, input.active)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    if !input.active {
        SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    }

    tracing::info!(user_id = %id, active = input.active, updated_by = %caller.user_id, "User active flag changed");
    Ok(Json(DataResponse { data: profile }))
}

/// DELETE /api/v1/users/{id}
///
/// Remove sessions, mirror row, profile and identity in one transaction.
/// Returns 204 No Content.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You cannot delete your own account.".into(),
        )));
    }

    if AccountRepo::delete(&state.pool, id).await? {
        tracing::info!(user_id = %id, deleted_by = %admin.user_id, "User deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "User", id }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a profile the caller may see. Profiles outside a manager's showroom
/// are reported as missing.
async fn load_scoped_profile(state: &AppState, caller: &AuthUser, id: DbId) -> AppResult<Profile> {
    let not_found = || AppError::Core(CoreError::NotFound { entity: "User", id });
    let profile = ProfileRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;

    let visible = caller.is_admin()
        || (profile.showroom_id.is_some() && profile.showroom_id == caller.showroom_id);
    if visible {
        Ok(profile)
    } else {
        Err(not_found())
    }
}

fn self_deactivation() -> AppError {
    AppError::Core(CoreError::Forbidden(
        "You cannot deactivate your own account.".into(),
    ))
}
