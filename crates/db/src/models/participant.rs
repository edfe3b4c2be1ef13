//! Participant model.

use eventdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `participants` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Participant {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A participant with the number of events they are linked to.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ParticipantWithEventCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub participant: Participant,
    pub total: i64,
}
