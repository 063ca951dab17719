//! HTTP-level integration tests for repair intake.

mod common;

use axum::http::StatusCode;
use chrono::{Datelike, Utc};
use common::{body_json, get_auth, post_json_auth, seed_account, seed_showroom, token_for};
use repairdesk_api::auth::password::verify_password;
use repairdesk_core::roles::{ROLE_ADMIN, ROLE_EMPLOYEE};
use repairdesk_core::types::DbId;
use repairdesk_db::models::catalog::ItemTypeInput;
use repairdesk_db::repositories::{ItemTypeRepo, RepairRepo};
use sqlx::PgPool;

async fn seed_item_type(pool: &PgPool) -> DbId {
    let input = ItemTypeInput {
        code: "LAPTOP".to_string(),
        label_en: "Laptop".to_string(),
        label_fr: "Ordinateur portable".to_string(),
        is_active: true,
    };
    ItemTypeRepo::create(pool, &input)
        .await
        .expect("item type creation should succeed")
        .id
}

fn intake_body(item_type: DbId, phone: &str) -> serde_json::Value {
    serde_json::json!({
        "customer": { "full_name": "Sami Ben Ali", "phone": phone },
        "device": { "device_type_id": item_type, "model": "ThinkPad T14", "serial_number": " " },
        "reported_problem": "Does not power on after a fall",
        "intake_condition": "Scratched lid, no charger",
        "priority": "urgent",
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn intake_numbers_repairs_sequentially(pool: PgPool) {
    let showroom = seed_showroom(&pool, "Sfax").await;
    let employee = seed_account(&pool, "amira", ROLE_EMPLOYEE, Some(showroom.id)).await;
    let item_type = seed_item_type(&pool).await;
    let token = token_for(&employee);
    let app = common::build_test_app(pool);
    let year = Utc::now().year();

    let first = post_json_auth(
        app.clone(),
        "/api/v1/repairs/intake",
        intake_body(item_type, "22333444"),
        &token,
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let first = body_json(first).await;
    assert_eq!(first["data"]["repair"]["repair_ref"], format!("{year}/0001"));
    assert_eq!(first["data"]["repair"]["priority"], "urgent");
    assert_eq!(first["data"]["repair"]["status"], "received");
    assert_eq!(first["data"]["repair"]["prepared_by"], employee.id.to_string());
    assert!(first["data"]["tracking_pin"].is_null());

    // Same phone: the customer is reused, a second device is recorded.
    let second = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/repairs/intake",
            intake_body(item_type, "22333444"),
            &token,
        )
        .await,
    )
    .await;
    assert_eq!(second["data"]["repair"]["repair_ref"], format!("{year}/0002"));
    assert_eq!(second["data"]["customer_id"], first["data"]["customer_id"]);
    assert_ne!(second["data"]["device_id"], first["data"]["device_id"]);

    let list = body_json(get_auth(app.clone(), "/api/v1/repairs", &token).await).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 2);
    assert_eq!(list["data"][0]["customer_name"], "Sami Ben Ali");

    let devices = body_json(
        get_auth(
            app,
            &format!(
                "/api/v1/customers/{}/devices",
                first["data"]["customer_id"].as_str().unwrap()
            ),
            &token,
        )
        .await,
    )
    .await;
    assert_eq!(devices["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sequences_are_per_showroom(pool: PgPool) {
    let sfax = seed_showroom(&pool, "Sfax").await;
    let gabes = seed_showroom(&pool, "Gabes").await;
    let admin = seed_account(&pool, "boss", ROLE_ADMIN, None).await;
    let item_type = seed_item_type(&pool).await;
    let token = token_for(&admin);
    let app = common::build_test_app(pool);
    let year = Utc::now().year();

    for showroom in [sfax.id, sfax.id, gabes.id] {
        let mut body = intake_body(item_type, "22333444");
        body["showroom_id"] = serde_json::json!(showroom);
        let response = post_json_auth(app.clone(), "/api/v1/repairs/intake", body, &token).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        if showroom == gabes.id {
            assert_eq!(json["data"]["repair"]["repair_ref"], format!("{year}/0001"));
        }
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_intake_requires_showroom(pool: PgPool) {
    let admin = seed_account(&pool, "boss", ROLE_ADMIN, None).await;
    let item_type = seed_item_type(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/repairs/intake",
        intake_body(item_type, "22333444"),
        &token_for(&admin),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn intake_validation_failures(pool: PgPool) {
    let showroom = seed_showroom(&pool, "Sfax").await;
    let employee = seed_account(&pool, "amira", ROLE_EMPLOYEE, Some(showroom.id)).await;
    let item_type = seed_item_type(&pool).await;
    let token = token_for(&employee);
    let app = common::build_test_app(pool.clone());

    let mut short_problem = intake_body(item_type, "22333444");
    short_problem["reported_problem"] = serde_json::json!("broken");

    let mut no_type = intake_body(item_type, "22333444");
    no_type["device"]["device_type_id"] = serde_json::Value::Null;

    let mut bad_pin = intake_body(item_type, "22333444");
    bad_pin["tracking_enabled"] = serde_json::json!(true);
    bad_pin["tracking_pin"] = serde_json::json!("12a4");

    let mut missing_pin = intake_body(item_type, "22333444");
    missing_pin["tracking_enabled"] = serde_json::json!(true);

    for body in [short_problem, no_type, bad_pin, missing_pin] {
        let response = post_json_auth(app.clone(), "/api/v1/repairs/intake", body, &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    // Nothing was numbered.
    let stored = RepairRepo::list(&pool, Some(showroom.id)).await.unwrap();
    assert!(stored.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn tracking_pin_is_echoed_and_stored_hashed(pool: PgPool) {
    let showroom = seed_showroom(&pool, "Sfax").await;
    let employee = seed_account(&pool, "amira", ROLE_EMPLOYEE, Some(showroom.id)).await;
    let item_type = seed_item_type(&pool).await;
    let app = common::build_test_app(pool.clone());

    let mut body = intake_body(item_type, "22333444");
    body["tracking_enabled"] = serde_json::json!(true);
    body["tracking_pin"] = serde_json::json!("4821");
    let response = post_json_auth(app, "/api/v1/repairs/intake", body, &token_for(&employee)).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["tracking_pin"], "4821");
    assert_eq!(json["data"]["repair"]["password_provided"], true);
    assert!(json["data"]["repair"].get("tracking_password_hash").is_none());

    let id: DbId = json["data"]["repair"]["id"].as_str().unwrap().parse().unwrap();
    let stored = RepairRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    let hash = stored.tracking_password_hash.expect("hash should be stored");
    assert_ne!(hash, "4821");
    assert!(verify_password("4821", &hash).unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn password_provided_follows_tracking(pool: PgPool) {
    let showroom = seed_showroom(&pool, "Sfax").await;
    let employee = seed_account(&pool, "amira", ROLE_EMPLOYEE, Some(showroom.id)).await;
    let item_type = seed_item_type(&pool).await;
    let app = common::build_test_app(pool.clone());

    // A stray flag without tracking does not mark the repair.
    let mut body = intake_body(item_type, "22333444");
    body["password_provided"] = serde_json::json!(true);
    let response = post_json_auth(app, "/api/v1/repairs/intake", body, &token_for(&employee)).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["repair"]["password_provided"], false);

    let id: DbId = json["data"]["repair"]["id"].as_str().unwrap().parse().unwrap();
    let stored = RepairRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert!(!stored.password_provided);
    assert!(stored.tracking_password_hash.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn intake_summary_is_scoped(pool: PgPool) {
    let sfax = seed_showroom(&pool, "Sfax").await;
    let gabes = seed_showroom(&pool, "Gabes").await;
    let sfax_staff = seed_account(&pool, "amira", ROLE_EMPLOYEE, Some(sfax.id)).await;
    let gabes_staff = seed_account(&pool, "karim", ROLE_EMPLOYEE, Some(gabes.id)).await;
    let item_type = seed_item_type(&pool).await;
    let app = common::build_test_app(pool);

    let created = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/repairs/intake",
            intake_body(item_type, "22333444"),
            &token_for(&sfax_staff),
        )
        .await,
    )
    .await;
    let uri = format!(
        "/api/v1/repairs/{}/intake-summary",
        created["data"]["repair"]["id"].as_str().unwrap()
    );

    let response = get_auth(app.clone(), &uri, &token_for(&sfax_staff)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let summary = body_json(response).await;
    assert_eq!(summary["data"]["showroom"]["name"], "Sfax");
    assert_eq!(summary["data"]["customer"]["phone"], "22333444");
    assert_eq!(summary["data"]["device"]["model"], "ThinkPad T14");
    assert!(summary["data"]["device"]["serial_number"].is_null());
    assert_eq!(summary["data"]["settings"]["id"], 1);

    let hidden = get_auth(app.clone(), &uri, &token_for(&gabes_staff)).await;
    assert_eq!(hidden.status(), StatusCode::NOT_FOUND);

    let mut cross = intake_body(item_type, "22333444");
    cross["showroom_id"] = serde_json::json!(sfax.id);
    let refused = post_json_auth(app, "/api/v1/repairs/intake", cross, &token_for(&gabes_staff)).await;
    assert_eq!(refused.status(), StatusCode::FORBIDDEN);
}
