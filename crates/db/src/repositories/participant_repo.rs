//! Repository for the `participants` table.

use eventdesk_core::forms::ParticipantInput;
use eventdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::participant::{Participant, ParticipantWithEventCount};

/// Column list for participants queries.
const COLUMNS: &str = "id, name, email, created_at, updated_at";

/// Column list qualified with the `p` alias (used in JOIN queries).
pub(crate) const P_COLUMNS: &str = "p.id, p.name, p.email, p.created_at, p.updated_at";

/// Provides CRUD operations for participants.
pub struct ParticipantRepo;

impl ParticipantRepo {
    /// List all participants, ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Participant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM participants ORDER BY name ASC, id ASC");
        sqlx::query_as::<_, Participant>(&query)
            .fetch_all(pool)
            .await
    }

    /// List every participant once, each with the number of events they attend.
    ///
    /// Participants without events are included with a total of zero.
    pub async fn list_with_event_counts(
        pool: &PgPool,
    ) -> Result<Vec<ParticipantWithEventCount>, sqlx::Error> {
        let query = format!(
            "SELECT {P_COLUMNS}, COUNT(ep.event_id) AS total \
             FROM participants p \
             LEFT JOIN event_participants ep ON ep.participant_id = p.id \
             GROUP BY p.id \
             ORDER BY p.name ASC, p.id ASC"
        );
        sqlx::query_as::<_, ParticipantWithEventCount>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a participant by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Participant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM participants WHERE id = $1");
        sqlx::query_as::<_, Participant>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether another participant (other than `exclude_id`) already uses `email`.
    pub async fn email_taken<'c, E>(
        db: E,
        email: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error>
    where
        E: sqlx::Executor<'c, Database = sqlx::Postgres>,
    {
        let (taken,): (bool,) = sqlx::query_as(
            "SELECT EXISTS( \
                SELECT 1 FROM participants \
                WHERE email = $1 AND ($2::BIGINT IS NULL OR id <> $2) \
             )",
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(db)
        .await?;
        Ok(taken)
    }

    /// Return the subset of `ids` that exist, ascending.
    pub async fn existing_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<(DbId,)> =
            sqlx::query_as("SELECT id FROM participants WHERE id = ANY($1) ORDER BY id")
                .bind(ids)
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Create a new participant, returning the created row.
    pub async fn create<'c, E>(db: E, input: &ParticipantInput) -> Result<Participant, sqlx::Error>
    where
        E: sqlx::Executor<'c, Database = sqlx::Postgres>,
    {
        let query = format!(
            "INSERT INTO participants (name, email) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        let participant = sqlx::query_as::<_, Participant>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .fetch_one(db)
            .await?;
        tracing::debug!(participant_id = participant.id, "Inserted participant");
        Ok(participant)
    }

    /// Replace a participant's editable fields. Returns `None` if it does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ParticipantInput,
    ) -> Result<Option<Participant>, sqlx::Error> {
        let query = format!(
            "UPDATE participants SET \
                name = $2, \
                email = $3, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .fetch_optional(pool)
            .await
    }

    /// Delete a participant by ID, dropping their event memberships.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM participants WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
