//! Handlers for `/auth` (login, refresh, logout, session profile) and
//! `/account/change-password`.

use axum::extract::State;
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use repairdesk_core::device_gate::{
    check_account, evaluate, requires_device_check, GateDecision, LoginDenial,
};
use repairdesk_core::error::CoreError;
use repairdesk_core::fingerprint::{fingerprint, DeviceInfo};
use repairdesk_core::types::DbId;
use repairdesk_core::validation::{blank_to_none, synthetic_email, validate_password};
use repairdesk_db::models::device_auth::RegisterDevice;
use repairdesk_db::models::profile::Profile;
use repairdesk_db::models::session::CreateSession;
use repairdesk_db::models::showroom::ShowroomSummary;
use repairdesk_db::repositories::{
    DeviceAuthRepo, IdentityRepo, ProfileRepo, SessionRepo, ShowroomRepo,
};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Label stored when the client does not report a MAC address.
const UNKNOWN_MAC: &str = "unknown";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    /// Required for every role except admin.
    pub device: Option<DeviceInfo>,
    pub device_label: Option<String>,
    pub mac_address: Option<String>,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Request body for `POST /account/change-password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub old_password: String,
    #[serde(default)]
    pub new_password: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: SessionProfile,
}

/// The signed-in profile as the client keeps it for the session.
#[derive(Debug, Serialize)]
pub struct SessionProfile {
    pub id: DbId,
    pub username: String,
    pub full_name: String,
    pub role: String,
    pub language: String,
    pub max_discount_percent: f64,
    pub showroom: Option<ShowroomSummary>,
}

impl SessionProfile {
    fn new(profile: Profile, showroom: Option<ShowroomSummary>) -> Self {
        Self {
            id: profile.id,
            username: profile.username,
            full_name: profile.full_name,
            role: profile.role,
            language: profile.language,
            max_discount_percent: profile.max_discount_percent,
            showroom,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Verify credentials, then account and showroom status, then (for
/// non-admins) the device the request comes from. A device seen for the first
/// time is registered as awaiting approval and the login is refused.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let invalid_credentials =
        || AppError::Core(CoreError::Unauthorized("Invalid username or password.".into()));

    // 1. Credentials against the synthetic identity.
    let email = synthetic_email(&input.username);
    let identity = IdentityRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &identity.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid_credentials());
    }

    // 2. Profile, account and showroom status.
    let profile = ProfileRepo::find_by_id(&state.pool, identity.id)
        .await?
        .ok_or_else(invalid_credentials)?;
    let showroom = load_showroom(&state, profile.showroom_id).await?;
    check_account(
        &profile.role,
        profile.active,
        showroom.as_ref().map(|s| s.active),
    )
    .map_err(|denial| {
        tracing::info!(user_id = %profile.id, code = denial.code(), "Login refused");
        AppError::Core(CoreError::LoginDenied(denial))
    })?;

    // 3. Device approval.
    let mut device_auth_id = None;
    if requires_device_check(&profile.role) {
        let device = input
            .device
            .as_ref()
            .ok_or_else(|| AppError::BadRequest("Device information is required".into()))?;
        let showroom_id = profile.showroom_id.ok_or_else(|| {
            AppError::Core(CoreError::Forbidden("No showroom assigned".into()))
        })?;

        let registration = RegisterDevice {
            cpu_id: fingerprint(device),
            device_label: blank_to_none(input.device_label.clone())
                .unwrap_or_else(|| device.platform.clone()),
            mac_address: blank_to_none(input.mac_address.clone())
                .unwrap_or_else(|| UNKNOWN_MAC.to_string()),
            showroom_id,
            requesting_user_id: profile.id,
        };
        let record = DeviceAuthRepo::find_or_register(&state.pool, &registration).await?;

        if let GateDecision::Denied(denial) = evaluate(&profile.role, record.state()) {
            tracing::info!(
                user_id = %profile.id,
                showroom_id = %showroom_id,
                device_id = %record.id,
                code = denial.code(),
                "Login refused by device gate",
            );
            return Err(AppError::Core(CoreError::LoginDenied(denial)));
        }
        device_auth_id = Some(record.id);
    }

    // 4. Success.
    IdentityRepo::record_sign_in(&state.pool, identity.id).await?;
    tracing::info!(user_id = %profile.id, role = %profile.role, "User signed in");

    let client = ClientMeta::from_headers(&headers);
    let response =
        create_auth_response(&state, profile, showroom, client, device_auth_id).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens. Account,
/// showroom and device checks are repeated, so a device blocked after login
/// cannot keep its session alive.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    // Rotation: the presented session is revoked as it is read.
    let session = SessionRepo::consume(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    let profile = ProfileRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    let showroom = load_showroom(&state, profile.showroom_id).await?;
    check_account(
        &profile.role,
        profile.active,
        showroom.as_ref().map(|s| s.active),
    )
    .map_err(|denial| AppError::Core(CoreError::LoginDenied(denial)))?;

    let device_auth_id = if requires_device_check(&profile.role) {
        Some(recheck_device(&state, &profile, session.device_auth_id).await?)
    } else {
        None
    };

    let client = ClientMeta::from_headers(&headers);
    let response =
        create_auth_response(&state, profile, showroom, client, device_auth_id).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<SessionProfile>> {
    let profile = ProfileRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: auth_user.user_id,
        }))?;
    let showroom = load_showroom(&state, profile.showroom_id).await?;
    Ok(Json(SessionProfile::new(profile, showroom)))
}

/// POST /api/v1/account/change-password
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    if input.old_password.is_empty() || input.new_password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "All fields are required".into(),
        )));
    }
    validate_password(&input.new_password)?;

    let identity = IdentityRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Account",
            id: auth_user.user_id,
        }))?;

    let valid = verify_password(&input.old_password, &identity.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Current password is incorrect".into(),
        )));
    }

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    IdentityRepo::update_password(&state.pool, identity.id, &hashed).await?;
    tracing::info!(user_id = %identity.id, "Password changed");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_showroom(
    state: &AppState,
    showroom_id: Option<DbId>,
) -> AppResult<Option<ShowroomSummary>> {
    match showroom_id {
        Some(id) => Ok(ShowroomRepo::find_summary(&state.pool, id).await?),
        None => Ok(None),
    }
}

/// Re-run the device gate for a staff session being refreshed.
///
/// A session without a device, or whose device was rejected or belongs to
/// another showroom, counts as blocked.
async fn recheck_device(
    state: &AppState,
    profile: &Profile,
    device_auth_id: Option<DbId>,
) -> AppResult<DbId> {
    let device = match device_auth_id {
        Some(id) => DeviceAuthRepo::find_by_id(&state.pool, id).await?,
        None => None,
    };
    let Some(device) = device.filter(|d| Some(d.showroom_id) == profile.showroom_id) else {
        tracing::info!(user_id = %profile.id, "Refresh refused: session has no usable device");
        return Err(AppError::Core(CoreError::LoginDenied(
            LoginDenial::DeviceBlocked,
        )));
    };

    if let GateDecision::Denied(denial) = evaluate(&profile.role, device.state()) {
        tracing::info!(
            user_id = %profile.id,
            device_id = %device.id,
            code = denial.code(),
            "Refresh refused by device gate",
        );
        return Err(AppError::Core(CoreError::LoginDenied(denial)));
    }
    Ok(device.id)
}

/// Client details recorded on a new session.
struct ClientMeta {
    user_agent: Option<String>,
    ip_address: Option<String>,
}

impl ClientMeta {
    /// The address is the first `X-Forwarded-For` hop, else `X-Real-IP`.
    fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };
        let ip_address = header("x-forwarded-for")
            .and_then(|chain| chain.split(',').next())
            .map(str::trim)
            .or_else(|| header("x-real-ip"))
            .map(str::to_string);

        Self {
            user_agent: header(USER_AGENT.as_str()).map(str::to_string),
            ip_address,
        }
    }
}

/// Generate access + refresh tokens, persist a session row, and build the response.
async fn create_auth_response(
    state: &AppState,
    profile: Profile,
    showroom: Option<ShowroomSummary>,
    client: ClientMeta,
    device_auth_id: Option<DbId>,
) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(
        profile.id,
        &profile.role,
        profile.showroom_id,
        &state.config.jwt,
    )
    .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    let expires_at = state.config.jwt.refresh_expires_at(Utc::now());

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: profile.id,
            refresh_token_hash: refresh_hash,
            expires_at,
            user_agent: client.user_agent,
            ip_address: client.ip_address,
            device_auth_id,
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_ttl_secs(),
        user: SessionProfile::new(profile, showroom),
    })
}
