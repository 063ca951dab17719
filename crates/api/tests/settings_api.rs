//! HTTP-level integration tests for `/settings` and `/dashboard/stats`.

mod common;

use axum::http::StatusCode;
use common::{
    approve_test_device, body_json, get_auth, put_json_auth, seed_account, seed_showroom,
    token_for,
};
use repairdesk_core::roles::{ROLE_ADMIN, ROLE_EMPLOYEE, ROLE_MANAGER};
use repairdesk_db::models::device_auth::RegisterDevice;
use repairdesk_db::repositories::DeviceAuthRepo;
use sqlx::PgPool;

const SETTINGS: &str = "/api/v1/settings";
const STATS: &str = "/api/v1/dashboard/stats";

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn any_signed_in_user_reads_settings(pool: PgPool) {
    let showroom = seed_showroom(&pool, "Sfax").await;
    let employee = seed_account(&pool, "amira", ROLE_EMPLOYEE, Some(showroom.id)).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, SETTINGS, &token_for(&employee)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], 1);
    assert!(json["data"]["tracking_url"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_admins_update_settings(pool: PgPool) {
    let showroom = seed_showroom(&pool, "Sfax").await;
    let admin = seed_account(&pool, "boss", ROLE_ADMIN, None).await;
    let manager = seed_account(&pool, "leila", ROLE_MANAGER, Some(showroom.id)).await;
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "tracking_url": " https://track.example.tn " });

    let refused = put_json_auth(app.clone(), SETTINGS, body.clone(), &token_for(&manager)).await;
    assert_eq!(refused.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(app.clone(), SETTINGS, body, &token_for(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["data"]["tracking_url"],
        "https://track.example.tn"
    );

    // A blank URL clears the setting.
    let blank = serde_json::json!({ "tracking_url": "   " });
    let response = put_json_auth(app.clone(), SETTINGS, blank, &token_for(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"]["tracking_url"].is_null());

    let stored = body_json(get_auth(app, SETTINGS, &token_for(&manager)).await).await;
    assert!(stored["data"]["tracking_url"].is_null());
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn stats_count_users_showrooms_and_active_devices(pool: PgPool) {
    let sfax = seed_showroom(&pool, "Sfax").await;
    seed_showroom(&pool, "Gabes").await;
    let admin = seed_account(&pool, "boss", ROLE_ADMIN, None).await;
    let approved = seed_account(&pool, "amira", ROLE_EMPLOYEE, Some(sfax.id)).await;
    let pending = seed_account(&pool, "karim", ROLE_EMPLOYEE, Some(sfax.id)).await;

    approve_test_device(&pool, &approved).await;
    DeviceAuthRepo::find_or_register(
        &pool,
        &RegisterDevice {
            cpu_id: "pending-fingerprint".to_string(),
            device_label: "Win32".to_string(),
            mac_address: "unknown".to_string(),
            showroom_id: sfax.id,
            requesting_user_id: pending.id,
        },
    )
    .await
    .unwrap();
    let app = common::build_test_app(pool);

    let response = get_auth(app, STATS, &token_for(&admin)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["users"], 3);
    assert_eq!(json["data"]["showrooms"], 2);
    assert_eq!(json["data"]["active_devices"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stats_are_admin_only(pool: PgPool) {
    let showroom = seed_showroom(&pool, "Sfax").await;
    let manager = seed_account(&pool, "leila", ROLE_MANAGER, Some(showroom.id)).await;
    let employee = seed_account(&pool, "amira", ROLE_EMPLOYEE, Some(showroom.id)).await;
    let app = common::build_test_app(pool);

    for caller in [&manager, &employee] {
        let response = get_auth(app.clone(), STATS, &token_for(caller)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
