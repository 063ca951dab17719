//! Handlers for the reference catalogs: `/brands`, `/item-types`,
//! `/repair-categories` and `/repair-items`.
//!
//! Reads are open to any authenticated user; writes require admin, except
//! `POST /brands/quick` which intake staff use to add a missing brand.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use repairdesk_core::error::CoreError;
use repairdesk_core::types::DbId;
use repairdesk_core::validation::{
    blank_to_none, normalize_brand_name, normalize_item_type_code, require_text,
    validate_non_negative,
};
use repairdesk_db::models::catalog::{
    Brand, BrandInput, ItemType, ItemTypeInput, RepairCategory, RepairCategoryInput,
    RepairCategoryWithCount, RepairItem, RepairItemInput, RepairItemListItem,
};
use repairdesk_db::repositories::{BrandRepo, ItemTypeRepo, RepairCategoryRepo, RepairItemRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /brands/quick`.
#[derive(Debug, Deserialize)]
pub struct QuickBrandRequest {
    pub name: String,
}

/// Query parameters for `GET /repair-items`.
#[derive(Debug, Deserialize)]
pub struct RepairItemFilter {
    pub category_id: Option<DbId>,
}

fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}

fn deleted_or_not_found(deleted: bool, entity: &'static str, id: DbId) -> AppResult<StatusCode> {
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(entity, id))
    }
}

// ---------------------------------------------------------------------------
// Brands
// ---------------------------------------------------------------------------

/// Admin brand names are stored as typed, trimmed. Only quick-add upper-cases.
fn normalize_brand(input: BrandInput) -> AppResult<BrandInput> {
    let name = require_text("Brand name", &input.name)?;
    Ok(BrandInput { name, ..input })
}

/// GET /api/v1/brands
pub async fn list_brands(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<DataResponse<Vec<Brand>>>> {
    let brands = BrandRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: brands }))
}

/// POST /api/v1/brands
pub async fn create_brand(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<BrandInput>,
) -> AppResult<(StatusCode, Json<DataResponse<Brand>>)> {
    let brand = BrandRepo::create(&state.pool, &normalize_brand(input)?).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: brand })))
}

/// POST /api/v1/brands/quick
///
/// Add a brand from the intake form. An existing name returns the existing row.
pub async fn quick_add_brand(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(input): Json<QuickBrandRequest>,
) -> AppResult<Json<DataResponse<Brand>>> {
    let name = normalize_brand_name(&input.name);
    if name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Brand name is required".into(),
        )));
    }
    let brand = BrandRepo::quick_add(&state.pool, &name).await?;
    tracing::debug!(brand_id = %brand.id, user_id = %user.user_id, "Brand quick-added");
    Ok(Json(DataResponse { data: brand }))
}

/// PUT /api/v1/brands/{id}
pub async fn update_brand(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<BrandInput>,
) -> AppResult<Json<DataResponse<Brand>>> {
    let brand = BrandRepo::update(&state.pool, id, &normalize_brand(input)?)
        .await?
        .ok_or_else(|| not_found("Brand", id))?;
    Ok(Json(DataResponse { data: brand }))
}

/// DELETE /api/v1/brands/{id}
pub async fn delete_brand(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    deleted_or_not_found(BrandRepo::delete(&state.pool, id).await?, "Brand", id)
}

// ---------------------------------------------------------------------------
// Item types
// ---------------------------------------------------------------------------

fn normalize_item_type(input: ItemTypeInput) -> AppResult<ItemTypeInput> {
    let code = normalize_item_type_code(&input.code);
    if code.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Code is required".into(),
        )));
    }
    Ok(ItemTypeInput {
        code,
        label_en: require_text("English label", &input.label_en)?,
        label_fr: require_text("French label", &input.label_fr)?,
        is_active: input.is_active,
    })
}

/// GET /api/v1/item-types
pub async fn list_item_types(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<DataResponse<Vec<ItemType>>>> {
    let types = ItemTypeRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: types }))
}

/// POST /api/v1/item-types
pub async fn create_item_type(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<ItemTypeInput>,
) -> AppResult<(StatusCode, Json<DataResponse<ItemType>>)> {
    let item_type = ItemTypeRepo::create(&state.pool, &normalize_item_type(input)?).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: item_type })))
}

/// PUT /api/v1/item-types/{id}
pub async fn update_item_type(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ItemTypeInput>,
) -> AppResult<Json<DataResponse<ItemType>>> {
    let item_type = ItemTypeRepo::update(&state.pool, id, &normalize_item_type(input)?)
        .await?
        .ok_or_else(|| not_found("ItemType", id))?;
    Ok(Json(DataResponse { data: item_type }))
}

/// DELETE /api/v1/item-types/{id}
pub async fn delete_item_type(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    deleted_or_not_found(ItemTypeRepo::delete(&state.pool, id).await?, "ItemType", id)
}

// ---------------------------------------------------------------------------
// Repair categories
// ---------------------------------------------------------------------------

fn normalize_category(input: RepairCategoryInput) -> AppResult<RepairCategoryInput> {
    Ok(RepairCategoryInput {
        name_en: require_text("English name", &input.name_en)?,
        name_fr: require_text("French name", &input.name_fr)?,
        description_en: blank_to_none(input.description_en),
        description_fr: blank_to_none(input.description_fr),
        is_active: input.is_active,
    })
}

/// GET /api/v1/repair-categories
pub async fn list_categories(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<RepairCategoryWithCount>>>> {
    let categories = RepairCategoryRepo::list_with_counts(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/v1/repair-categories
pub async fn create_category(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<RepairCategoryInput>,
) -> AppResult<(StatusCode, Json<DataResponse<RepairCategory>>)> {
    let category = RepairCategoryRepo::create(&state.pool, &normalize_category(input)?).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /api/v1/repair-categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<RepairCategoryInput>,
) -> AppResult<Json<DataResponse<RepairCategory>>> {
    let category = RepairCategoryRepo::update(&state.pool, id, &normalize_category(input)?)
        .await?
        .ok_or_else(|| not_found("RepairCategory", id))?;
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/repair-categories/{id}
///
/// A category that still holds items cannot be deleted (400 reference error).
pub async fn delete_category(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    deleted_or_not_found(
        RepairCategoryRepo::delete(&state.pool, id).await?,
        "RepairCategory",
        id,
    )
}

// ---------------------------------------------------------------------------
// Repair items
// ---------------------------------------------------------------------------

fn normalize_item(input: RepairItemInput) -> AppResult<RepairItemInput> {
    validate_non_negative("Default price", input.default_price)?;
    Ok(RepairItemInput {
        category_id: input.category_id,
        name_en: require_text("English name", &input.name_en)?,
        name_fr: require_text("French name", &input.name_fr)?,
        description_en: blank_to_none(input.description_en),
        description_fr: blank_to_none(input.description_fr),
        default_price: input.default_price,
        is_active: input.is_active,
    })
}

/// GET /api/v1/repair-items
pub async fn list_items(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(filter): Query<RepairItemFilter>,
) -> AppResult<Json<DataResponse<Vec<RepairItemListItem>>>> {
    let items = RepairItemRepo::list(&state.pool, filter.category_id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/repair-items
pub async fn create_item(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<RepairItemInput>,
) -> AppResult<(StatusCode, Json<DataResponse<RepairItem>>)> {
    let item = RepairItemRepo::create(&state.pool, &normalize_item(input)?).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/v1/repair-items/{id}
pub async fn update_item(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<RepairItemInput>,
) -> AppResult<Json<DataResponse<RepairItem>>> {
    let item = RepairItemRepo::update(&state.pool, id, &normalize_item(input)?)
        .await?
        .ok_or_else(|| not_found("RepairItem", id))?;
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/repair-items/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    deleted_or_not_found(RepairItemRepo::delete(&state.pool, id).await?, "RepairItem", id)
}
