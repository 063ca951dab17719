use sqlx::PgPool;

/// Connect, migrate, verify the schema is usable.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    repairdesk_db::health_check(&pool).await.unwrap();

    let tables = [
        "auth_identities",
        "profiles",
        "users",
        "user_sessions",
        "showrooms",
        "device_auth",
        "customers",
        "devices",
        "repairs",
        "brands",
        "item_types",
        "repair_categories",
        "repair_items",
        "settings",
    ];
    for table in tables {
        sqlx::query(&format!("SELECT COUNT(*) FROM {table}"))
            .execute(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_settings_singleton_is_seeded(pool: PgPool) {
    let settings = repairdesk_db::repositories::SettingsRepo::get(&pool)
        .await
        .unwrap();
    assert_eq!(settings.id, 1);
    assert!(settings.tracking_url.is_none());

    let second = sqlx::query("INSERT INTO settings (id) VALUES (2)")
        .execute(&pool)
        .await;
    assert!(second.is_err(), "settings must stay a single row");
}

/// Unique constraints must follow the `uq_` naming the API maps to 409.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unique_constraints_use_uq_prefix(pool: PgPool) {
    let names: Vec<(String,)> = sqlx::query_as(
        "SELECT conname::text FROM pg_constraint
         WHERE contype = 'u' AND connamespace = 'public'::regnamespace",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!names.is_empty());
    for (name,) in names {
        assert!(name.starts_with("uq_"), "unique constraint {name} lacks uq_ prefix");
    }
}
