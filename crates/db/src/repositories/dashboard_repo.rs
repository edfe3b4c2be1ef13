//! Aggregate queries for the dashboard.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::dashboard::DashboardCounts;

/// Provides the dashboard's summary counts.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Event counts split around `today`, plus participant and category totals.
    pub async fn counts(pool: &PgPool, today: NaiveDate) -> Result<DashboardCounts, sqlx::Error> {
        sqlx::query_as::<_, DashboardCounts>(
            "SELECT \
                COUNT(e.id) AS total, \
                COUNT(e.id) FILTER (WHERE e.date < $1) AS past_events, \
                COUNT(e.id) FILTER (WHERE e.date > $1) AS future_events, \
                COUNT(e.id) FILTER (WHERE e.date = $1) AS today_event, \
                (SELECT COUNT(DISTINCT p.id) FROM participants p) AS unique_participants, \
                (SELECT COUNT(*) FROM categories c) AS total_categories \
             FROM events e",
        )
        .bind(today)
        .fetch_one(pool)
        .await
    }
}
