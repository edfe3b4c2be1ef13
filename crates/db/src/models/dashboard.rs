//! Aggregate counts shown on the dashboard.

use serde::Serialize;
use sqlx::FromRow;

/// Counts computed once per dashboard request, independent of the view.
///
/// With `events.date` non-null, `total == past_events + future_events + today_event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, FromRow)]
pub struct DashboardCounts {
    pub total: i64,
    pub past_events: i64,
    pub future_events: i64,
    pub today_event: i64,
    pub unique_participants: i64,
    pub total_categories: i64,
}
