//! Handlers for the global `/settings` singleton.

use axum::extract::State;
use axum::Json;
use repairdesk_core::validation::blank_to_none;
use repairdesk_db::models::settings::{Settings, UpdateSettings};
use repairdesk_db::repositories::SettingsRepo;

use crate::error::AppResult;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/settings
pub async fn get_settings(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Settings>>> {
    let settings = SettingsRepo::get(&state.pool).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/v1/settings
pub async fn update_settings(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<UpdateSettings>,
) -> AppResult<Json<DataResponse<Settings>>> {
    let input = UpdateSettings {
        tracking_url: blank_to_none(input.tracking_url),
    };
    let settings = SettingsRepo::update(&state.pool, &input).await?;
    tracing::info!(updated_by = %admin.user_id, "Settings updated");
    Ok(Json(DataResponse { data: settings }))
}
