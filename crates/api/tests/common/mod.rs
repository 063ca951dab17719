#![allow(dead_code)]

use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use repairdesk_api::auth::jwt::{generate_access_token, JwtConfig};
use repairdesk_api::auth::password::hash_password;
use repairdesk_api::config::ServerConfig;
use repairdesk_api::router::build_app_router;
use repairdesk_api::state::AppState;
use repairdesk_core::fingerprint::{fingerprint, DeviceInfo};
use repairdesk_core::types::DbId;
use repairdesk_core::validation::synthetic_email;
use repairdesk_db::models::device_auth::RegisterDevice;
use repairdesk_db::models::profile::{NewAccount, Profile};
use repairdesk_db::models::showroom::{Showroom, ShowroomInput};
use repairdesk_db::repositories::{AccountRepo, DeviceAuthRepo, ShowroomRepo};
use sqlx::PgPool;
use tower::ServiceExt;

/// Password given to every seeded account.
pub const TEST_PASSWORD: &str = "secret123";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config(storage_root: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        storage_root: storage_root.to_path_buf(),
        public_base_url: "http://localhost:3000".to_string(),
        max_logo_bytes: 64 * 1024,
    }
}

/// Build the full application router, with a throwaway storage directory.
pub fn build_test_app(pool: PgPool) -> Router {
    let root: PathBuf = std::env::temp_dir().join(format!("repairdesk-test-{}", uuid::Uuid::new_v4()));
    build_test_app_with_storage(pool, &root)
}

/// Build the full application router storing logos under `storage_root`.
pub fn build_test_app_with_storage(pool: PgPool, storage_root: &Path) -> Router {
    let config = test_config(storage_root);
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn seed_showroom(pool: &PgPool, name: &str) -> Showroom {
    let input = ShowroomInput {
        name: name.to_string(),
        ..Default::default()
    };
    ShowroomRepo::create(pool, &input)
        .await
        .expect("showroom creation should succeed")
}

/// Provision an account with [`TEST_PASSWORD`].
pub async fn seed_account(
    pool: &PgPool,
    username: &str,
    role: &str,
    showroom_id: Option<DbId>,
) -> Profile {
    let account = NewAccount {
        username: username.to_string(),
        email: synthetic_email(username),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        full_name: format!("{username} test"),
        role: role.to_string(),
        showroom_id,
        language: "EN".to_string(),
        active: true,
        max_discount_percent: 10.0,
    };
    AccountRepo::create(pool, &account)
        .await
        .expect("account creation should succeed")
}

/// Access token for `profile`, signed with the test secret.
pub fn token_for(profile: &Profile) -> String {
    let config = test_config(Path::new("unused"));
    generate_access_token(profile.id, &profile.role, profile.showroom_id, &config.jwt)
        .expect("token generation should succeed")
}

/// The browser fingerprint inputs every test client reports.
pub fn test_device() -> DeviceInfo {
    DeviceInfo {
        user_agent: "Mozilla/5.0 (X11; Linux x86_64) TestBrowser/1.0".to_string(),
        platform: "Linux x86_64".to_string(),
        cpu_cores: Some(8),
        language: "fr-TN".to_string(),
        screen: "1920x1080".to_string(),
        color_depth: Some(24),
    }
}

/// Register [`test_device`] for `profile` and approve it.
pub async fn approve_test_device(pool: &PgPool, profile: &Profile) {
    let registration = RegisterDevice {
        cpu_id: fingerprint(&test_device()),
        device_label: "Counter PC".to_string(),
        mac_address: "unknown".to_string(),
        showroom_id: profile.showroom_id.expect("staff must have a showroom"),
        requesting_user_id: profile.id,
    };
    let device = DeviceAuthRepo::find_or_register(pool, &registration)
        .await
        .expect("device registration should succeed");
    DeviceAuthRepo::approve(pool, device.id)
        .await
        .expect("approval should succeed");
}

/// Login request body for `username` from [`test_device`].
pub fn login_body(username: &str, password: &str) -> serde_json::Value {
    serde_json::json!({
        "username": username,
        "password": password,
        "device": test_device(),
    })
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");
    app.oneshot(request).await.expect("request should complete")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}
