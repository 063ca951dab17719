//! HTTP-level integration tests for the `/device-auth` admin surface.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get_auth, patch_json_auth, post_auth, seed_account, seed_showroom,
    token_for,
};
use repairdesk_core::roles::{ROLE_ADMIN, ROLE_EMPLOYEE, ROLE_MANAGER};
use repairdesk_core::types::DbId;
use repairdesk_db::models::device_auth::{DeviceAuth, RegisterDevice};
use repairdesk_db::models::profile::Profile;
use repairdesk_db::repositories::DeviceAuthRepo;
use sqlx::PgPool;

async fn register(pool: &PgPool, profile: &Profile, cpu_id: &str) -> DeviceAuth {
    let registration = RegisterDevice {
        cpu_id: cpu_id.to_string(),
        device_label: format!("PC {cpu_id}"),
        mac_address: "unknown".to_string(),
        showroom_id: profile.showroom_id.expect("staff must have a showroom"),
        requesting_user_id: profile.id,
    };
    DeviceAuthRepo::find_or_register(pool, &registration)
        .await
        .expect("device registration should succeed")
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn device_admin_requires_admin(pool: PgPool) {
    let showroom = seed_showroom(&pool, "Sfax").await;
    let manager = seed_account(&pool, "leila", ROLE_MANAGER, Some(showroom.id)).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/device-auth", &token_for(&manager)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_shows_requester_and_showroom(pool: PgPool) {
    let showroom = seed_showroom(&pool, "Sfax").await;
    let employee = seed_account(&pool, "amira", ROLE_EMPLOYEE, Some(showroom.id)).await;
    let admin = seed_account(&pool, "boss", ROLE_ADMIN, None).await;
    register(&pool, &employee, "cpu-a").await;
    let app = common::build_test_app(pool);

    let json = body_json(get_auth(app, "/api/v1/device-auth", &token_for(&admin)).await).await;
    let rows = json["data"].as_array().unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["showroom_name"], "Sfax");
    assert_eq!(rows[0]["requester_username"], "amira");
    assert_eq!(rows[0]["awaiting_approval"], true);
    assert_eq!(rows[0]["active"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn toggle_refused_while_pending(pool: PgPool) {
    let showroom = seed_showroom(&pool, "Sfax").await;
    let employee = seed_account(&pool, "amira", ROLE_EMPLOYEE, Some(showroom.id)).await;
    let admin = seed_account(&pool, "boss", ROLE_ADMIN, None).await;
    let device = register(&pool, &employee, "cpu-a").await;
    let token = token_for(&admin);
    let app = common::build_test_app(pool);

    let pending = post_auth(
        app.clone(),
        &format!("/api/v1/device-auth/{}/toggle-active", device.id),
        &token,
    )
    .await;
    assert_eq!(pending.status(), StatusCode::CONFLICT);

    let missing = post_auth(
        app.clone(),
        &format!("/api/v1/device-auth/{}/toggle-active", DbId::new_v4()),
        &token,
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let approved = post_auth(
        app.clone(),
        &format!("/api/v1/device-auth/{}/approve", device.id),
        &token,
    )
    .await;
    assert_eq!(body_json(approved).await["data"]["active"], true);

    let toggled = post_auth(
        app,
        &format!("/api/v1/device-auth/{}/toggle-active", device.id),
        &token,
    )
    .await;
    assert_eq!(toggled.status(), StatusCode::OK);
    assert_eq!(body_json(toggled).await["data"]["active"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn replace_deactivates_other_showroom_devices(pool: PgPool) {
    let sfax = seed_showroom(&pool, "Sfax").await;
    let gabes = seed_showroom(&pool, "Gabes").await;
    let sfax_staff = seed_account(&pool, "amira", ROLE_EMPLOYEE, Some(sfax.id)).await;
    let gabes_staff = seed_account(&pool, "karim", ROLE_EMPLOYEE, Some(gabes.id)).await;
    let admin = seed_account(&pool, "boss", ROLE_ADMIN, None).await;

    let old = register(&pool, &sfax_staff, "cpu-old").await;
    let new = register(&pool, &sfax_staff, "cpu-new").await;
    let elsewhere = register(&pool, &gabes_staff, "cpu-gabes").await;
    for id in [old.id, elsewhere.id] {
        DeviceAuthRepo::approve(&pool, id).await.unwrap();
    }
    let app = common::build_test_app(pool.clone());

    let response = post_auth(
        app,
        &format!("/api/v1/device-auth/{}/replace", new.id),
        &token_for(&admin),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["active"], true);
    assert_eq!(json["data"]["awaiting_approval"], false);

    let old = DeviceAuthRepo::find_by_id(&pool, old.id).await.unwrap().unwrap();
    assert!(!old.active);
    let elsewhere = DeviceAuthRepo::find_by_id(&pool, elsewhere.id).await.unwrap().unwrap();
    assert!(elsewhere.active);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_and_reject_device(pool: PgPool) {
    let showroom = seed_showroom(&pool, "Sfax").await;
    let employee = seed_account(&pool, "amira", ROLE_EMPLOYEE, Some(showroom.id)).await;
    let admin = seed_account(&pool, "boss", ROLE_ADMIN, None).await;
    let device = register(&pool, &employee, "cpu-a").await;
    let token = token_for(&admin);
    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/device-auth/{}", device.id);

    let body = serde_json::json!({ "manufacturer": "Lenovo", "model": "  ", "device_label": "Front desk" });
    let patched = patch_json_auth(app.clone(), &uri, body, &token).await;
    assert_eq!(patched.status(), StatusCode::OK);
    let json = body_json(patched).await;
    assert_eq!(json["data"]["manufacturer"], "Lenovo");
    assert!(json["data"]["model"].is_null());
    assert_eq!(json["data"]["device_label"], "Front desk");

    let deleted = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let again = delete_auth(app, &uri, &token).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}
