//! Handlers for the `/showrooms` resource, including logo upload.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use repairdesk_core::error::CoreError;
use repairdesk_core::storage::{logo_extension, logo_object_name};
use repairdesk_core::types::DbId;
use repairdesk_core::validation::{blank_to_none, validate_non_negative, validate_showroom_name};
use repairdesk_db::models::showroom::{Showroom, ShowroomInput};
use repairdesk_db::repositories::ShowroomRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireManager};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/showrooms
///
/// Admins see every showroom, everyone else only their own.
pub async fn list_showrooms(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Showroom>>>> {
    let scope = auth.list_scope(None)?;
    let showrooms = ShowroomRepo::list(&state.pool, scope).await?;
    Ok(Json(DataResponse { data: showrooms }))
}

/// GET /api/v1/showrooms/{id}
pub async fn get_showroom(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Showroom>>> {
    if !auth.can_access_showroom(id) {
        return Err(not_found(id));
    }
    let showroom = find_showroom(&state, id).await?;
    Ok(Json(DataResponse { data: showroom }))
}

/// POST /api/v1/showrooms
pub async fn create_showroom(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<ShowroomInput>,
) -> AppResult<(StatusCode, Json<DataResponse<Showroom>>)> {
    let input = normalize_input(input, true)?;
    let showroom = ShowroomRepo::create(&state.pool, &input).await?;

    tracing::info!(showroom_id = %showroom.id, created_by = %admin.user_id, "Showroom created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: showroom })))
}

/// PUT /api/v1/showrooms/{id}
///
/// Admins, or the manager of this showroom. Only admins may change `balance`
/// and `active`; an omitted balance keeps the stored one.
pub async fn update_showroom(
    State(state): State<AppState>,
    RequireManager(caller): RequireManager,
    Path(id): Path<DbId>,
    Json(input): Json<ShowroomInput>,
) -> AppResult<Json<DataResponse<Showroom>>> {
    ensure_can_edit(&caller, id)?;
    let input = normalize_input(input, caller.is_admin())?;

    let showroom = ShowroomRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(showroom_id = %id, updated_by = %caller.user_id, "Showroom updated");
    Ok(Json(DataResponse { data: showroom }))
}

/// POST /api/v1/showrooms/{id}/toggle-active
pub async fn toggle_active(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Showroom>>> {
    let showroom = ShowroomRepo::toggle_active(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        showroom_id = %id,
        active = showroom.active,
        updated_by = %admin.user_id,
        "Showroom active flag changed",
    );
    Ok(Json(DataResponse { data: showroom }))
}

/// PUT /api/v1/showrooms/{id}/logo
///
/// Accepts a multipart form with a required `file` field. The new object is
/// written before the row is updated, and the previous object is removed
/// afterwards.
pub async fn upload_logo(
    State(state): State<AppState>,
    RequireManager(caller): RequireManager,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<Showroom>>> {
    ensure_can_edit(&caller, id)?;
    let current = find_showroom(&state, id).await?;

    let mut file_data: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        file_data = Some((filename, data.to_vec()));
    }

    let (filename, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }
    if data.len() > state.config.max_logo_bytes {
        return Err(AppError::BadRequest(format!(
            "Logo exceeds the maximum size of {} bytes",
            state.config.max_logo_bytes
        )));
    }
    let ext = logo_extension(&filename)?;

    let object = logo_object_name(id, &ext);
    let url = state.logos.put(&object, &data).await?;
    let showroom = ShowroomRepo::set_logo_url(&state.pool, id, Some(&url))
        .await?
        .ok_or_else(|| not_found(id))?;

    remove_previous_logo(&state, current.logo_url.as_deref()).await;

    tracing::info!(showroom_id = %id, object = %object, size = data.len(), "Showroom logo uploaded");
    Ok(Json(DataResponse { data: showroom }))
}

/// DELETE /api/v1/showrooms/{id}/logo
pub async fn delete_logo(
    State(state): State<AppState>,
    RequireManager(caller): RequireManager,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Showroom>>> {
    ensure_can_edit(&caller, id)?;
    let current = find_showroom(&state, id).await?;

    let showroom = ShowroomRepo::set_logo_url(&state.pool, id, None)
        .await?
        .ok_or_else(|| not_found(id))?;
    remove_previous_logo(&state, current.logo_url.as_deref()).await;

    tracing::info!(showroom_id = %id, "Showroom logo removed");
    Ok(Json(DataResponse { data: showroom }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Showroom",
        id,
    })
}

async fn find_showroom(state: &AppState, id: DbId) -> AppResult<Showroom> {
    ShowroomRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

fn ensure_can_edit(caller: &AuthUser, id: DbId) -> AppResult<()> {
    if caller.can_access_showroom(id) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "You can only manage your own showroom".into(),
        )))
    }
}

/// Trim text fields, collapse blanks to `None`, and drop `balance` and `active`
/// for non-admins.
fn normalize_input(input: ShowroomInput, is_admin: bool) -> AppResult<ShowroomInput> {
    let name = validate_showroom_name(&input.name)?;
    for (field, value) in [
        ("Markup", input.markup_percent),
        ("Default tax", input.default_tax_percent),
        ("Tax stamp", input.tax_stamp_amount),
    ] {
        validate_non_negative(field, value)?;
    }

    Ok(ShowroomInput {
        name,
        address: blank_to_none(input.address),
        phone: blank_to_none(input.phone),
        whatsapp_number: blank_to_none(input.whatsapp_number),
        currency_code: blank_to_none(input.currency_code).map(|c| c.to_uppercase()),
        legal_line_1: blank_to_none(input.legal_line_1),
        legal_line_2: blank_to_none(input.legal_line_2),
        legal_line_3: blank_to_none(input.legal_line_3),
        receipt_footer_text: blank_to_none(input.receipt_footer_text),
        receipt_terms: blank_to_none(input.receipt_terms),
        notes: blank_to_none(input.notes),
        balance: if is_admin { input.balance } else { None },
        active: if is_admin { input.active } else { None },
        ..input
    })
}

/// Best-effort removal of the object behind a replaced logo URL.
async fn remove_previous_logo(state: &AppState, previous_url: Option<&str>) {
    let Some(object) = previous_url.and_then(|url| state.logos.object_for_url(url)) else {
        return;
    };
    if let Err(e) = state.logos.remove(&object).await {
        tracing::warn!(object = %object, error = %e, "Failed to remove previous logo");
    }
}
