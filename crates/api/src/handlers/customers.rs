//! Handlers for the `/customers` resource.
//!
//! Customers belong to one showroom. Non-admin callers only ever see and
//! write their own showroom's customers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use repairdesk_core::error::CoreError;
use repairdesk_core::types::DbId;
use repairdesk_core::validation::{blank_to_none, require_text, validate_optional_email};
use repairdesk_db::models::customer::{Customer, CustomerInput, CustomerListItem};
use repairdesk_db::models::device::DeviceDetail;
use repairdesk_db::repositories::{CustomerRepo, DeviceRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireManager;
use crate::query::ShowroomFilter;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /customers/lookup`.
#[derive(Debug, Deserialize)]
pub struct LookupParams {
    pub phone: String,
    pub showroom_id: Option<DbId>,
}

/// GET /api/v1/customers
pub async fn list_customers(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<ShowroomFilter>,
) -> AppResult<Json<DataResponse<Vec<CustomerListItem>>>> {
    let scope = auth.list_scope(filter.showroom_id)?;
    let customers = CustomerRepo::list(&state.pool, scope).await?;
    Ok(Json(DataResponse { data: customers }))
}

/// GET /api/v1/customers/lookup?phone=&showroom_id=
///
/// Exact phone match used to pre-fill the intake form. `data` is `null` when
/// nobody matches.
pub async fn lookup_customer(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<LookupParams>,
) -> AppResult<Json<DataResponse<Option<Customer>>>> {
    let showroom_id = auth.target_showroom(params.showroom_id)?;
    let phone = require_text("Phone", &params.phone)?;
    let customer = CustomerRepo::find_by_phone(&state.pool, showroom_id, &phone).await?;
    Ok(Json(DataResponse { data: customer }))
}

/// GET /api/v1/customers/{id}
pub async fn get_customer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Customer>>> {
    let customer = load_scoped_customer(&state, &auth, id).await?;
    Ok(Json(DataResponse { data: customer }))
}

/// POST /api/v1/customers
pub async fn create_customer(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CustomerInput>,
) -> AppResult<(StatusCode, Json<DataResponse<Customer>>)> {
    let showroom_id = auth.target_showroom(input.showroom_id)?;
    let input = normalize_input(input)?;
    let customer = CustomerRepo::create(&state.pool, showroom_id, &input).await?;

    tracing::info!(customer_id = %customer.id, showroom_id = %showroom_id, "Customer created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: customer })))
}

/// PUT /api/v1/customers/{id}
pub async fn update_customer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CustomerInput>,
) -> AppResult<Json<DataResponse<Customer>>> {
    let existing = load_scoped_customer(&state, &auth, id).await?;
    let showroom_id = auth.target_showroom(input.showroom_id.or(Some(existing.showroom_id)))?;
    let input = normalize_input(input)?;

    let customer = CustomerRepo::update(&state.pool, id, showroom_id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: customer }))
}

/// DELETE /api/v1/customers/{id}
pub async fn delete_customer(
    State(state): State<AppState>,
    RequireManager(caller): RequireManager,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    load_scoped_customer(&state, &caller, id).await?;
    if CustomerRepo::delete(&state.pool, id).await? {
        tracing::info!(customer_id = %id, deleted_by = %caller.user_id, "Customer deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// GET /api/v1/customers/{id}/devices
pub async fn list_customer_devices(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<DeviceDetail>>>> {
    load_scoped_customer(&state, &auth, id).await?;
    let devices = DeviceRepo::list_by_customer(&state.pool, id).await?;
    Ok(Json(DataResponse { data: devices }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Customer",
        id,
    })
}

async fn load_scoped_customer(state: &AppState, auth: &AuthUser, id: DbId) -> AppResult<Customer> {
    match CustomerRepo::find_by_id(&state.pool, id).await? {
        Some(customer) if auth.can_access_showroom(customer.showroom_id) => Ok(customer),
        _ => Err(not_found(id)),
    }
}

fn normalize_input(input: CustomerInput) -> AppResult<CustomerInput> {
    Ok(CustomerInput {
        full_name: require_text("Full name", &input.full_name)?,
        phone: require_text("Phone", &input.phone)?,
        email: validate_optional_email(input.email)?,
        address: blank_to_none(input.address),
        ..input
    })
}
