//! Handlers for the `/repairs` resource: intake, listing and the printable
//! intake summary.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Datelike, Utc};
use repairdesk_core::error::CoreError;
use repairdesk_core::repair_ref::Priority;
use repairdesk_core::types::DbId;
use repairdesk_core::validation::{
    blank_to_none, validate_intake, validate_optional_email, IntakeFields,
};
use repairdesk_db::models::customer::Customer;
use repairdesk_db::models::device::DeviceDetail;
use repairdesk_db::models::repair::{
    IntakeCustomer, IntakeDevice, IntakeResult, NewIntake, Repair, RepairListItem,
};
use repairdesk_db::models::settings::Settings;
use repairdesk_db::models::showroom::Showroom;
use repairdesk_db::repositories::{
    CustomerRepo, DeviceRepo, RepairRepo, SettingsRepo, ShowroomRepo,
};
use serde::{Deserialize, Serialize};

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ShowroomFilter;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Customer block of the intake form.
#[derive(Debug, Deserialize)]
pub struct IntakeCustomerRequest {
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    #[serde(default = "default_true")]
    pub whatsapp_available: bool,
}

/// Device block of the intake form.
#[derive(Debug, Deserialize)]
pub struct IntakeDeviceRequest {
    pub device_type_id: Option<DbId>,
    pub brand_id: Option<DbId>,
    pub model: String,
    pub serial_number: Option<String>,
}

/// Request body for `POST /repairs/intake`.
#[derive(Debug, Deserialize)]
pub struct IntakeRequest {
    /// Required for admins; other callers always intake into their own showroom.
    pub showroom_id: Option<DbId>,
    pub customer: IntakeCustomerRequest,
    pub device: IntakeDeviceRequest,
    pub reported_problem: String,
    pub intake_condition: String,
    pub accessories_received: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    /// Enabling tracking also marks the repair as `password_provided`.
    #[serde(default)]
    pub tracking_enabled: bool,
    pub tracking_pin: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Response body for `POST /repairs/intake`.
#[derive(Debug, Serialize)]
pub struct IntakeResponse {
    #[serde(flatten)]
    pub result: IntakeResult,
    /// Echoed once so the receipt can print it; only the hash is stored.
    pub tracking_pin: Option<String>,
}

/// Everything the printable intake receipt needs.
#[derive(Debug, Serialize)]
pub struct IntakeSummary {
    pub repair: Repair,
    pub showroom: Showroom,
    pub customer: Customer,
    pub device: DeviceDetail,
    pub settings: Settings,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/repairs/intake
///
/// Number the repair, upsert the customer, record the device and the repair,
/// all in one transaction.
pub async fn create_intake(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<IntakeRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<IntakeResponse>>)> {
    let showroom_id = auth.target_showroom(input.showroom_id)?;

    let tracking_pin = if input.tracking_enabled {
        Some(
            input
                .tracking_pin
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
        )
    } else {
        None
    };

    validate_intake(IntakeFields {
        customer_name: &input.customer.full_name,
        customer_phone: &input.customer.phone,
        model: &input.device.model,
        reported_problem: &input.reported_problem,
        intake_condition: &input.intake_condition,
        tracking_pin: tracking_pin.as_deref(),
    })?;
    let email = validate_optional_email(input.customer.email)?;
    let device_type_id = input.device.device_type_id.ok_or_else(|| {
        AppError::Core(CoreError::Validation("Item type is required".into()))
    })?;

    let tracking_password_hash = match &tracking_pin {
        Some(pin) => Some(
            hash_password(pin)
                .map_err(|e| AppError::InternalError(format!("PIN hashing error: {e}")))?,
        ),
        None => None,
    };

    let intake = NewIntake {
        showroom_id,
        prepared_by: auth.user_id,
        year: Utc::now().year(),
        customer: IntakeCustomer {
            full_name: input.customer.full_name.trim().to_string(),
            phone: input.customer.phone.trim().to_string(),
            email,
            address: blank_to_none(input.customer.address),
            whatsapp_available: input.customer.whatsapp_available,
        },
        device: IntakeDevice {
            device_type_id,
            brand_id: input.device.brand_id,
            model: input.device.model.trim().to_string(),
            serial_number: blank_to_none(input.device.serial_number),
        },
        reported_problem: input.reported_problem.trim().to_string(),
        intake_condition: input.intake_condition.trim().to_string(),
        accessories_received: blank_to_none(input.accessories_received),
        priority: input.priority,
        tracking_password_hash,
    };

    let result = RepairRepo::intake(&state.pool, &intake).await?;

    tracing::info!(
        repair_id = %result.repair.id,
        repair_ref = %result.repair.repair_ref,
        showroom_id = %showroom_id,
        customer_id = %result.customer_id,
        user_id = %auth.user_id,
        "Repair intake recorded",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: IntakeResponse {
                result,
                tracking_pin,
            },
        }),
    ))
}

/// GET /api/v1/repairs
pub async fn list_repairs(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<ShowroomFilter>,
) -> AppResult<Json<DataResponse<Vec<RepairListItem>>>> {
    let scope = auth.list_scope(filter.showroom_id)?;
    let repairs = RepairRepo::list(&state.pool, scope).await?;
    Ok(Json(DataResponse { data: repairs }))
}

/// GET /api/v1/repairs/{id}/intake-summary
pub async fn intake_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<IntakeSummary>>> {
    let repair = match RepairRepo::find_by_id(&state.pool, id).await? {
        Some(repair) if auth.can_access_showroom(repair.showroom_id) => repair,
        _ => {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Repair",
                id,
            }))
        }
    };

    let showroom = ShowroomRepo::find_by_id(&state.pool, repair.showroom_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;
    let customer = CustomerRepo::find_by_id(&state.pool, repair.customer_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;
    let device = DeviceRepo::find_detail(&state.pool, repair.device_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;
    let settings = SettingsRepo::get(&state.pool).await?;

    Ok(Json(DataResponse {
        data: IntakeSummary {
            repair,
            showroom,
            customer,
            device,
            settings,
        },
    }))
}
