//! Handlers for `/device-auth` (device approval administration).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use repairdesk_core::error::CoreError;
use repairdesk_core::types::DbId;
use repairdesk_core::validation::blank_to_none;
use repairdesk_db::models::device_auth::{DeviceAuth, DeviceAuthListItem, UpdateDeviceAuth};
use repairdesk_db::repositories::DeviceAuthRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Device",
        id,
    })
}

/// GET /api/v1/device-auth
pub async fn list_devices(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<DeviceAuthListItem>>>> {
    let devices = DeviceAuthRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: devices }))
}

/// POST /api/v1/device-auth/{id}/approve
pub async fn approve_device(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DeviceAuth>>> {
    let device = DeviceAuthRepo::approve(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        device_id = %id,
        showroom_id = %device.showroom_id,
        approved_by = %admin.user_id,
        "Device approved",
    );
    Ok(Json(DataResponse { data: device }))
}

/// POST /api/v1/device-auth/{id}/replace
///
/// Approve this device and deactivate every other active device of the same
/// showroom in one transaction.
pub async fn replace_device(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DeviceAuth>>> {
    let device = DeviceAuthRepo::replace(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        device_id = %id,
        showroom_id = %device.showroom_id,
        approved_by = %admin.user_id,
        "Device approved as replacement",
    );
    Ok(Json(DataResponse { data: device }))
}

/// POST /api/v1/device-auth/{id}/toggle-active
///
/// Refused with 409 while the device is still awaiting approval.
pub async fn toggle_device(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DeviceAuth>>> {
    if let Some(device) = DeviceAuthRepo::toggle_active(&state.pool, id).await? {
        tracing::info!(
            device_id = %id,
            active = device.active,
            updated_by = %admin.user_id,
            "Device active flag changed",
        );
        return Ok(Json(DataResponse { data: device }));
    }

    // Nothing updated: either missing or still pending.
    match DeviceAuthRepo::find_by_id(&state.pool, id).await? {
        Some(_) => Err(AppError::Core(CoreError::Conflict(
            "Device is awaiting approval; approve or reject it first".into(),
        ))),
        None => Err(not_found(id)),
    }
}

/// PATCH /api/v1/device-auth/{id}
pub async fn update_device(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDeviceAuth>,
) -> AppResult<Json<DataResponse<DeviceAuth>>> {
    let input = UpdateDeviceAuth {
        manufacturer: blank_to_none(input.manufacturer),
        model: blank_to_none(input.model),
        device_label: blank_to_none(input.device_label),
    };
    let device = DeviceAuthRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: device }))
}

/// DELETE /api/v1/device-auth/{id}
///
/// Reject a device by deleting its record. Returns 204 No Content.
pub async fn delete_device(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if DeviceAuthRepo::delete(&state.pool, id).await? {
        tracing::info!(device_id = %id, deleted_by = %admin.user_id, "Device rejected");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
