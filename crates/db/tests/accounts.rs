//! Account provisioning across identity, profile and mirror tables.

use repairdesk_db::models::profile::{NewAccount, UpdateAccount};
use repairdesk_db::models::showroom::ShowroomInput;
use repairdesk_db::repositories::{AccountRepo, IdentityRepo, ProfileRepo, ShowroomRepo};
use sqlx::PgPool;

fn new_account(username: &str, role: &str, showroom_id: Option<uuid::Uuid>) -> NewAccount {
    NewAccount {
        username: username.to_string(),
        email: format!("{username}@local.auth"),
        password_hash: "hash".to_string(),
        full_name: format!("{username} full"),
        role: role.to_string(),
        showroom_id,
        language: "EN".to_string(),
        active: true,
        max_discount_percent: 10.0,
    }
}

async fn showroom(pool: &PgPool) -> uuid::Uuid {
    ShowroomRepo::create(
        pool,
        &ShowroomInput {
            name: "Main Street".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .id
}

async fn mirror_count(pool: &PgPool, id: uuid::Uuid) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_provisions_all_three_rows(pool: PgPool) {
    let showroom_id = showroom(&pool).await;
    let profile = AccountRepo::create(&pool, &new_account("alice", "employee", Some(showroom_id)))
        .await
        .unwrap();

    let identity = IdentityRepo::find_by_id(&pool, profile.id).await.unwrap().unwrap();
    assert_eq!(identity.email, "alice@local.auth");
    assert_eq!(mirror_count(&pool, profile.id).await, 1);

    let marker: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE id = $1")
        .bind(profile.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(marker, "AUTH_MANAGED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_username_rolls_back(pool: PgPool) {
    let showroom_id = showroom(&pool).await;
    AccountRepo::create(&pool, &new_account("bob", "employee", Some(showroom_id)))
        .await
        .unwrap();

    let mut dup = new_account("bob", "employee", Some(showroom_id));
    dup.email = "bob2@local.auth".to_string();
    let err = AccountRepo::create(&pool, &dup).await.unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("uq_profiles_username"));

    // The identity inserted before the failure must not survive.
    assert!(IdentityRepo::find_by_email(&pool, "bob2@local.auth")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_cannot_hold_showroom(pool: PgPool) {
    let showroom_id = showroom(&pool).await;
    let result = AccountRepo::create(&pool, &new_account("root", "admin", Some(showroom_id))).await;
    assert!(result.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_keeps_mirror_in_step(pool: PgPool) {
    let showroom_id = showroom(&pool).await;
    let profile = AccountRepo::create(&pool, &new_account("carol", "employee", Some(showroom_id)))
        .await
        .unwrap();

    let updated = AccountRepo::update(
        &pool,
        profile.id,
        &UpdateAccount {
            full_name: Some("Carol Smith".to_string()),
            role: Some("manager".to_string()),
            password_hash: Some("new-hash".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.full_name, "Carol Smith");
    assert_eq!(updated.role, "manager");
    assert_eq!(updated.showroom_id, Some(showroom_id));

    let (name, role): (String, String) =
        sqlx::query_as("SELECT full_name, role FROM users WHERE id = $1")
            .bind(profile.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(name, "Carol Smith");
    assert_eq!(role, "manager");

    let identity = IdentityRepo::find_by_id(&pool, profile.id).await.unwrap().unwrap();
    assert_eq!(identity.password_hash, "new-hash");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_promotion_to_admin_clears_showroom(pool: PgPool) {
    let showroom_id = showroom(&pool).await;
    let profile = AccountRepo::create(&pool, &new_account("dave", "manager", Some(showroom_id)))
        .await
        .unwrap();

    let updated = AccountRepo::update(
        &pool,
        profile.id,
        &UpdateAccount {
            role: Some("admin".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.role, "admin");
    assert!(updated.showroom_id.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_active_updates_profile_and_mirror(pool: PgPool) {
    let showroom_id = showroom(&pool).await;
    let profile = AccountRepo::create(&pool, &new_account("erin", "driver", Some(showroom_id)))
        .await
        .unwrap();

    let updated = ProfileRepo::set_active(&pool, profile.id, false)
        .await
        .unwrap()
        .unwrap();
    assert!(!updated.active);

    let mirror_active: bool = sqlx::query_scalar("SELECT active FROM users WHERE id = $1")
        .bind(profile.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(!mirror_active);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_removes_every_row(pool: PgPool) {
    let showroom_id = showroom(&pool).await;
    let profile = AccountRepo::create(&pool, &new_account("frank", "employee", Some(showroom_id)))
        .await
        .unwrap();

    assert!(AccountRepo::delete(&pool, profile.id).await.unwrap());
    assert!(ProfileRepo::find_by_id(&pool, profile.id).await.unwrap().is_none());
    assert!(IdentityRepo::find_by_id(&pool, profile.id).await.unwrap().is_none());
    assert_eq!(mirror_count(&pool, profile.id).await, 0);

    assert!(!AccountRepo::delete(&pool, profile.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_scopes_by_showroom(pool: PgPool) {
    let first = showroom(&pool).await;
    let second = showroom(&pool).await;
    AccountRepo::create(&pool, &new_account("gina", "employee", Some(first)))
        .await
        .unwrap();
    AccountRepo::create(&pool, &new_account("hank", "employee", Some(second)))
        .await
        .unwrap();

    let scoped = ProfileRepo::list(&pool, Some(first)).await.unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].username, "gina");
    assert_eq!(scoped[0].showroom_name.as_deref(), Some("Main Street"));

    assert_eq!(ProfileRepo::list(&pool, None).await.unwrap().len(), 2);
}
