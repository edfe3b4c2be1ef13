//! Event model and its enriched listing shapes.

use chrono::{NaiveDate, NaiveTime};
use eventdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::category::Category;
use super::participant::Participant;

/// A row from the `events` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Event {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub category_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Home listing row: the event, its category name and its participant count.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EventSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub event: Event,
    pub category_name: Option<String>,
    pub total: i64,
}

/// Event joined with its category name (internal listing row).
#[derive(Debug, Clone, FromRow)]
pub(crate) struct EventWithCategoryName {
    #[sqlx(flatten)]
    pub event: Event,
    pub category_name: Option<String>,
}

/// Dashboard listing row: the event with its participants loaded alongside.
#[derive(Debug, Clone, Serialize)]
pub struct EventWithParticipants {
    #[serde(flatten)]
    pub event: Event,
    pub category_name: Option<String>,
    pub participants: Vec<Participant>,
}

/// Full event view: the event, its category and its participants.
#[derive(Debug, Clone, Serialize)]
pub struct EventDetail {
    #[serde(flatten)]
    pub event: Event,
    pub category: Option<Category>,
    pub participants: Vec<Participant>,
}
