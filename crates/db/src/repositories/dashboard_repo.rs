//! Dashboard counters.

use sqlx::PgPool;

use crate::models::dashboard::DashboardStats;

pub struct DashboardRepo;

impl DashboardRepo {
    pub async fn stats(pool: &PgPool) -> Result<DashboardStats, sqlx::Error> {
        sqlx::query_as::<_, DashboardStats>(
            "SELECT
                (SELECT COUNT(*) FROM profiles) AS users,
                (SELECT COUNT(*) FROM showrooms) AS showrooms,
                (SELECT COUNT(*) FROM device_auth WHERE active = true) AS active_devices",
        )
        .fetch_one(pool)
        .await
    }
}
