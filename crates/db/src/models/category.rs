//! Category model.

use eventdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::event::Event;

/// A row from the `categories` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A category together with all of its events.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryWithEvents {
    #[serde(flatten)]
    pub category: Category,
    pub events: Vec<Event>,
}
