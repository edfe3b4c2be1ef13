//! Repository for the `events` and `event_participants` tables.

use std::collections::HashMap;

use chrono::NaiveDate;
use eventdesk_core::dashboard::EventScope;
use eventdesk_core::forms::EventInput;
use eventdesk_core::listing::HomeFilter;
use eventdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::event::{
    Event, EventDetail, EventSummary, EventWithCategoryName, EventWithParticipants,
};
use crate::models::participant::Participant;
use crate::repositories::participant_repo::P_COLUMNS;
use crate::repositories::CategoryRepo;

/// Column list for events queries. `date` and `time` are quoted because they
/// double as SQL type names.
pub(crate) const EVENT_COLUMNS: &str =
    "id, name, description, \"date\", \"time\", location, category_id, created_at, updated_at";

/// Column list qualified with the `e` alias (used in JOIN queries).
const E_COLUMNS: &str = "e.id, e.name, e.description, e.\"date\", e.\"time\", e.location, \
    e.category_id, e.created_at, e.updated_at";

/// Listing order shared by every event query.
const ORDER: &str = "ORDER BY e.\"date\" ASC, e.\"time\" ASC, e.id ASC";

/// A participant row tagged with the event it was loaded for.
#[derive(Debug, sqlx::FromRow)]
struct EventParticipantRow {
    event_id: DbId,
    #[sqlx(flatten)]
    participant: Participant,
}

/// Provides CRUD and listing operations for events.
pub struct EventRepo;

impl EventRepo {
    // -----------------------------------------------------------------------
    // Listings
    // -----------------------------------------------------------------------

    /// Home listing: the events selected by `filter`, each with its category
    /// name and participant count.
    pub async fn search(
        pool: &PgPool,
        filter: &HomeFilter,
    ) -> Result<Vec<EventSummary>, sqlx::Error> {
        let select = format!(
            "SELECT {E_COLUMNS}, c.name AS category_name, \
                (SELECT COUNT(*) FROM event_participants ep WHERE ep.event_id = e.id) AS total \
             FROM events e \
             LEFT JOIN categories c ON c.id = e.category_id"
        );

        match filter {
            HomeFilter::Category(category_id) => {
                let query = format!("{select} WHERE e.category_id = $1 {ORDER}");
                sqlx::query_as::<_, EventSummary>(&query)
                    .bind(category_id)
                    .fetch_all(pool)
                    .await
            }
            HomeFilter::Search(text) => {
                let query = format!(
                    "{select} \
                     WHERE strpos(lower(e.name), lower($1)) > 0 \
                        OR strpos(lower(e.location), lower($1)) > 0 \
                     {ORDER}"
                );
                sqlx::query_as::<_, EventSummary>(&query)
                    .bind(text)
                    .fetch_all(pool)
                    .await
            }
            HomeFilter::DateRange { start, end } => {
                let query = format!("{select} WHERE e.\"date\" BETWEEN $1 AND $2 {ORDER}");
                sqlx::query_as::<_, EventSummary>(&query)
                    .bind(start)
                    .bind(end)
                    .fetch_all(pool)
                    .await
            }
            HomeFilter::All => {
                let query = format!("{select} {ORDER}");
                sqlx::query_as::<_, EventSummary>(&query)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Dashboard listing: events inside `scope`, each with its participants
    /// loaded in one follow-up query.
    pub async fn list_for_dashboard(
        pool: &PgPool,
        scope: EventScope,
    ) -> Result<Vec<EventWithParticipants>, sqlx::Error> {
        let select = format!(
            "SELECT {E_COLUMNS}, c.name AS category_name \
             FROM events e \
             LEFT JOIN categories c ON c.id = e.category_id"
        );

        let (predicate, pivot): (&str, Option<NaiveDate>) = match scope {
            EventScope::All => ("", None),
            EventScope::Before(day) => ("WHERE e.\"date\" < $1", Some(day)),
            EventScope::After(day) => ("WHERE e.\"date\" > $1", Some(day)),
            EventScope::On(day) => ("WHERE e.\"date\" = $1", Some(day)),
        };
        let query = format!("{select} {predicate} {ORDER}");

        let mut q = sqlx::query_as::<_, EventWithCategoryName>(&query);
        if let Some(day) = pivot {
            q = q.bind(day);
        }
        let rows = q.fetch_all(pool).await?;

        let ids: Vec<DbId> = rows.iter().map(|r| r.event.id).collect();
        let mut participants = Self::participants_by_event(pool, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| EventWithParticipants {
                participants: participants.remove(&row.event.id).unwrap_or_default(),
                category_name: row.category_name,
                event: row.event,
            })
            .collect())
    }

    // -----------------------------------------------------------------------
    // Single-event lookups
    // -----------------------------------------------------------------------

    /// Find an event by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an event by ID, enriched with its category and participants.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<EventDetail>, sqlx::Error> {
        let Some(event) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let category = match event.category_id {
            Some(category_id) => CategoryRepo::find_by_id(pool, category_id).await?,
            None => None,
        };
        let participants = Self::participants_by_event(pool, &[event.id])
            .await?
            .remove(&event.id)
            .unwrap_or_default();

        Ok(Some(EventDetail {
            event,
            category,
            participants,
        }))
    }

    /// IDs of the participants linked to an event, ascending.
    pub async fn participant_ids(pool: &PgPool, event_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT participant_id FROM event_participants \
             WHERE event_id = $1 ORDER BY participant_id",
        )
        .bind(event_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Insert a new event and its participant links in one transaction.
    pub async fn create(pool: &PgPool, input: &EventInput) -> Result<Event, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let event = Self::create_inner(&mut tx, input).await?;
        tx.commit().await?;
        Ok(event)
    }

    /// Insert an event and its participant links inside the caller's transaction.
    pub(crate) async fn create_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        input: &EventInput,
    ) -> Result<Event, sqlx::Error> {
        let insert_query = format!(
            "INSERT INTO events (name, description, \"date\", \"time\", location, category_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {EVENT_COLUMNS}"
        );
        let event = sqlx::query_as::<_, Event>(&insert_query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.date)
            .bind(input.time)
            .bind(&input.location)
            .bind(input.category_id)
            .fetch_one(&mut **tx)
            .await?;

        Self::set_participants_inner(tx, event.id, &input.participant_ids).await?;

        tracing::debug!(event_id = event.id, "Inserted event");
        Ok(event)
    }

    /// Replace every editable field of an event, including its participant set.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &EventInput,
    ) -> Result<Option<Event>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update_query = format!(
            "UPDATE events SET \
                name = $2, \
                description = $3, \
                \"date\" = $4, \
                \"time\" = $5, \
                location = $6, \
                category_id = $7, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {EVENT_COLUMNS}"
        );
        let event = sqlx::query_as::<_, Event>(&update_query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.date)
            .bind(input.time)
            .bind(&input.location)
            .bind(input.category_id)
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(ref event) = event {
            Self::set_participants_inner(&mut tx, event.id, &input.participant_ids).await?;
        }

        tx.commit().await?;
        Ok(event)
    }

    /// Delete an event by ID along with its participant links.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Load the participants of several events at once, grouped by event.
    async fn participants_by_event(
        pool: &PgPool,
        event_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<Participant>>, sqlx::Error> {
        if event_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let query = format!(
            "SELECT ep.event_id, {P_COLUMNS} \
             FROM event_participants ep \
             JOIN participants p ON p.id = ep.participant_id \
             WHERE ep.event_id = ANY($1) \
             ORDER BY p.name ASC, p.id ASC"
        );
        let rows = sqlx::query_as::<_, EventParticipantRow>(&query)
            .bind(event_ids)
            .fetch_all(pool)
            .await?;

        let mut grouped: HashMap<DbId, Vec<Participant>> = HashMap::new();
        for row in rows {
            grouped.entry(row.event_id).or_default().push(row.participant);
        }
        Ok(grouped)
    }

    /// Replace participant links within an existing transaction.
    async fn set_participants_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        event_id: DbId,
        participant_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM event_participants WHERE event_id = $1")
            .bind(event_id)
            .execute(&mut **tx)
            .await?;

        for &participant_id in participant_ids {
            sqlx::query(
                "INSERT INTO event_participants (event_id, participant_id) \
                 VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(event_id)
            .bind(participant_id)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }
}
