//! Repository for the `categories` table.

use std::collections::HashMap;

use eventdesk_core::forms::CategoryInput;
use eventdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{Category, CategoryWithEvents};
use crate::models::event::Event;
use crate::repositories::event_repo::EVENT_COLUMNS;

/// Column list for categories queries.
const COLUMNS: &str = "id, name, description, created_at, updated_at";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List all categories, ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY name ASC, id ASC");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// List all categories with their events loaded in a second query.
    pub async fn list_with_events(pool: &PgPool) -> Result<Vec<CategoryWithEvents>, sqlx::Error> {
        let categories = Self::list(pool).await?;
        let ids: Vec<DbId> = categories.iter().map(|c| c.id).collect();

        let query = format!(
            "SELECT {EVENT_COLUMNS} FROM events \
             WHERE category_id = ANY($1) \
             ORDER BY \"date\" ASC, \"time\" ASC, id ASC"
        );
        let events = sqlx::query_as::<_, Event>(&query)
            .bind(&ids)
            .fetch_all(pool)
            .await?;

        let mut by_category: HashMap<DbId, Vec<Event>> = HashMap::new();
        for event in events {
            if let Some(category_id) = event.category_id {
                by_category.entry(category_id).or_default().push(event);
            }
        }

        Ok(categories
            .into_iter()
            .map(|category| CategoryWithEvents {
                events: by_category.remove(&category.id).unwrap_or_default(),
                category,
            })
            .collect())
    }

    /// Find a category by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a new category, returning the created row.
    ///
    /// Accepts the pool or an open transaction.
    pub async fn create<'c, E>(db: E, input: &CategoryInput) -> Result<Category, sqlx::Error>
    where
        E: sqlx::Executor<'c, Database = sqlx::Postgres>,
    {
        let query = format!(
            "INSERT INTO categories (name, description) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        let category = sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(db)
            .await?;
        tracing::debug!(category_id = category.id, "Inserted category");
        Ok(category)
    }

    /// Replace a category's editable fields. Returns `None` if it does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CategoryInput,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET \
                name = $2, \
                description = $3, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category by ID. Its events stay, with `category_id` cleared.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
