//! Refresh session consumption and cleanup.

use chrono::{Duration, Utc};
use repairdesk_db::models::profile::NewAccount;
use repairdesk_db::models::session::CreateSession;
use repairdesk_db::repositories::{AccountRepo, SessionRepo};
use sqlx::PgPool;

async fn admin(pool: &PgPool) -> uuid::Uuid {
    let account = NewAccount {
        username: "boss".to_string(),
        email: "boss@local.auth".to_string(),
        password_hash: "hash".to_string(),
        full_name: "Boss".to_string(),
        role: "admin".to_string(),
        showroom_id: None,
        language: "EN".to_string(),
        active: true,
        max_discount_percent: 0.0,
    };
    AccountRepo::create(pool, &account).await.unwrap().id
}

fn session(user_id: uuid::Uuid, hash: &str, expires_in: Duration) -> CreateSession {
    CreateSession {
        user_id,
        refresh_token_hash: hash.to_string(),
        expires_at: Utc::now() + expires_in,
        user_agent: None,
        ip_address: Some("203.0.113.7".to_string()),
        device_auth_id: None,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_consume_is_single_use(pool: PgPool) {
    let user_id = admin(&pool).await;
    SessionRepo::create(&pool, &session(user_id, "live", Duration::days(7)))
        .await
        .unwrap();

    let consumed = SessionRepo::consume(&pool, "live").await.unwrap().unwrap();
    assert_eq!(consumed.user_id, user_id);
    assert!(consumed.is_revoked);
    assert_eq!(consumed.ip_address.as_deref(), Some("203.0.113.7"));

    assert!(SessionRepo::consume(&pool, "live").await.unwrap().is_none());
    assert!(SessionRepo::consume(&pool, "unknown").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_session_cannot_be_consumed(pool: PgPool) {
    let user_id = admin(&pool).await;
    SessionRepo::create(&pool, &session(user_id, "old", -Duration::minutes(1)))
        .await
        .unwrap();

    assert!(SessionRepo::consume(&pool, "old").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_revoke_all_then_purge(pool: PgPool) {
    let user_id = admin(&pool).await;
    for hash in ["a", "b"] {
        SessionRepo::create(&pool, &session(user_id, hash, Duration::days(7)))
            .await
            .unwrap();
    }
    SessionRepo::create(&pool, &session(user_id, "expired", -Duration::days(1)))
        .await
        .unwrap();

    assert_eq!(SessionRepo::revoke_all_for_user(&pool, user_id).await.unwrap(), 3);
    assert_eq!(SessionRepo::purge_stale(&pool).await.unwrap(), 3);
    assert_eq!(SessionRepo::purge_stale(&pool).await.unwrap(), 0);
}
