use std::net::{IpAddr, SocketAddr};

use anyhow::Context;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use repairdesk_api::config::ServerConfig;
use repairdesk_api::router::build_app_router;
use repairdesk_api::state::AppState;
use repairdesk_core::storage::LOGO_BUCKET;
use repairdesk_db::DbPool;

const DEFAULT_LOG_FILTER: &str = "repairdesk_api=debug,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = config.port, "Loaded server configuration");

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = prepare_database(&database_url).await?;

    let bucket = config.storage_root.join(LOGO_BUCKET);
    tokio::fs::create_dir_all(&bucket)
        .await
        .with_context(|| format!("Failed to create {}", bucket.display()))?;
    tracing::info!(dir = %bucket.display(), "Logo storage ready");

    let state = AppState::new(pool.clone(), config.clone());
    let app = build_app_router(state, &config);

    let ip = config
        .host
        .parse::<IpAddr>()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let addr = SocketAddr::new(ip, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, "RepairDesk API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Stopped accepting connections, closing database pool");
    pool.close().await;
    tracing::info!("Shutdown complete");
    Ok(())
}

/// `RUST_LOG` selects levels; `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Connect, confirm the database answers, and apply pending migrations.
async fn prepare_database(database_url: &str) -> anyhow::Result<DbPool> {
    let pool = repairdesk_db::create_pool(database_url)
        .await
        .context("Failed to connect to database")?;
    repairdesk_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    repairdesk_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database ready and migrated");
    Ok(pool)
}

/// Resolve on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl-C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
