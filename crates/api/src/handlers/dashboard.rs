//! Handler for `/dashboard/stats` (admin overview counts).

use axum::extract::State;
use axum::Json;
use repairdesk_db::models::dashboard::DashboardStats;
use repairdesk_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard/stats
pub async fn stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<DashboardStats>>> {
    let stats = DashboardRepo::stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}
